use std::sync::Arc;

use axum::{
    debug_handler,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use time::OffsetDateTime;
use tower_sessions::Session;
use tracing::{debug, info};

use crate::{config::Config, dataset::Dataset, session::CELEBRATION, AppResult, AppState};

use super::{load_deck, save_deck, Celebration};

#[debug_handler(state = AppState)]
pub(crate) async fn trade(
    State(dataset): State<Arc<Dataset>>,
    State(config): State<Arc<Config>>,
    session: Session,
) -> AppResult<Response> {
    let mut deck = load_deck(&dataset, &session).await?;

    if let Some(matched) = deck.trade() {
        info!(profile = matched.id, name = %matched.name, "traded");
        session
            .insert(
                CELEBRATION,
                Celebration {
                    profile_id: matched.id,
                    until: OffsetDateTime::now_utc() + config.celebration,
                },
            )
            .await?;
    }
    save_deck(&deck, &session).await?;

    Ok(Redirect::to("/matches").into_response())
}

#[debug_handler(state = AppState)]
pub(crate) async fn skip(
    State(dataset): State<Arc<Dataset>>,
    session: Session,
) -> AppResult<Response> {
    let mut deck = load_deck(&dataset, &session).await?;
    deck.skip();
    debug!(position = deck.position(), "skipped");
    save_deck(&deck, &session).await?;

    Ok(Redirect::to("/matches").into_response())
}
