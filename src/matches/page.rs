use std::sync::Arc;

use axum::{
    debug_handler,
    extract::State,
    response::{IntoResponse, Response},
};
use time::OffsetDateTime;
use tower_sessions::Session;

use crate::{
    dataset::Dataset,
    include_res,
    res::{self, Nav},
    session::CELEBRATION,
    settings, AppResult, AppState,
};

use super::{load_deck, Celebration};

#[debug_handler(state = AppState)]
pub(crate) async fn matches(
    State(dataset): State<Arc<Dataset>>,
    session: Session,
) -> AppResult<Response> {
    let settings = settings::load(&session).await?;
    let deck = load_deck(&dataset, &session).await?;

    let deck_html = match (deck.current(), deck.progress()) {
        (Some(candidate), Some((number, total))) => include_res!(str, "/pages/match_card.html")
            .replace("{number}", &number.to_string())
            .replace("{total}", &total.to_string())
            .replace("{percent}", &(number * 100 / total).to_string())
            .replace("{id}", &candidate.id.to_string())
            .replace("{avatar}", &res::escape(&candidate.avatar))
            .replace("{name}", &res::escape(&candidate.name))
            .replace("{bio}", &res::escape(&candidate.bio))
            .replace("{skills_offered}", &res::tags(&candidate.skills_offered))
            .replace("{skills_wanted}", &res::tags(&candidate.skills_wanted)),
        _ => include_res!(str, "/pages/match_empty.html").to_owned(),
    };

    let celebration = match session.get::<Celebration>(CELEBRATION).await? {
        Some(celebration) if celebration.is_open(OffsetDateTime::now_utc()) => {
            match dataset.profile(celebration.profile_id) {
                Some(matched) => include_res!(str, "/pages/celebration.html")
                    .replace("{id}", &matched.id.to_string())
                    .replace("{name}", &res::escape(&matched.name)),
                None => String::new(),
            }
        }
        Some(_) => {
            session.remove::<Celebration>(CELEBRATION).await?;
            String::new()
        }
        None => String::new(),
    };

    let body = include_res!(str, "/pages/matches.html")
        .replace("{celebration}", &celebration)
        .replace("{deck}", &deck_html);

    Ok(res::page("Matches", Some(Nav::Matches), settings.dark_mode, &body).into_response())
}
