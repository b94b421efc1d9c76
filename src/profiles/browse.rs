use std::sync::Arc;

use axum::{
    debug_handler,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::{
    dataset::Dataset,
    filter, include_res,
    res::{self, Nav},
    settings, AppResult, AppState,
};

#[derive(Debug, Deserialize)]
pub(crate) struct SearchQuery {
    #[serde(default)]
    q: String,
}

#[debug_handler(state = AppState)]
pub(crate) async fn browse(
    Query(SearchQuery { q }): Query<SearchQuery>,
    State(dataset): State<Arc<Dataset>>,
    session: Session,
) -> AppResult<Response> {
    let settings = settings::load(&session).await?;

    let found = filter::filter(&dataset.profiles, &q);
    let cards: String = found.iter().map(|profile| super::card(profile)).collect();

    let body = include_res!(str, "/pages/profiles.html")
        .replace("{query}", &res::escape(&q))
        .replace("{count}", &found.len().to_string())
        .replace("{total}", &dataset.profiles.len().to_string())
        .replace("{cards}", &cards);

    Ok(res::page("Browse", Some(Nav::Browse), settings.dark_mode, &body).into_response())
}
