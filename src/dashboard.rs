use std::sync::Arc;

use axum::{
    debug_handler,
    extract::State,
    response::{IntoResponse, Response},
};
use tower_sessions::Session;

use crate::{
    dataset::Dataset,
    include_res, profiles,
    res::{self, Nav},
    session::VISITOR,
    settings, AppResult, AppState,
};

const CARD_COUNT: usize = 4;

#[debug_handler(state = AppState)]
pub async fn dashboard(
    State(dataset): State<Arc<Dataset>>,
    session: Session,
) -> AppResult<Response> {
    let settings = settings::load(&session).await?;
    let viewer = dataset.viewer();

    let visitor = match session.get::<String>(VISITOR).await? {
        Some(visitor) => visitor,
        None => viewer
            .and_then(|p| p.name.split_whitespace().next())
            .unwrap_or("there")
            .to_owned(),
    };

    let cards: String = dataset
        .profiles
        .iter()
        .take(CARD_COUNT)
        .map(profiles::card)
        .collect();

    let body = include_res!(str, "/pages/dashboard.html")
        .replace("{visitor}", &res::escape(&visitor))
        .replace("{matches}", &viewer.map_or(0, |p| p.matches).to_string())
        .replace("{exchanges}", &viewer.map_or(0, |p| p.exchanges).to_string())
        .replace("{messages}", &dataset.message_count().to_string())
        .replace("{followers}", &viewer.map_or(0, |p| p.followers).to_string())
        .replace("{cards}", &cards);

    Ok(res::page("Dashboard", Some(Nav::Dashboard), settings.dark_mode, &body).into_response())
}
