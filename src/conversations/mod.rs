//! The two-pane messages page.

mod msg;
mod pane;

use axum::{
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::{chat::{ChatSession, ChatState}, dataset::Dataset, session::CHAT_STATE, AppResult, AppState};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/chat", get(pane::chat))
        .route("/chat/{id}", get(pane::conversation))
        .route("/chat/{id}/send", post(msg::send))
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SearchQuery {
    #[serde(default)]
    pub(crate) q: String,
}

async fn load_chat<'a>(dataset: &'a Dataset, session: &Session) -> AppResult<ChatSession<'a>> {
    let state = session.get::<ChatState>(CHAT_STATE).await?.unwrap_or_default();
    Ok(ChatSession::resume(&dataset.conversations, state))
}

async fn save_chat(chat: ChatSession<'_>, session: &Session) -> AppResult<()> {
    session.insert(CHAT_STATE, chat.into_state()).await?;
    Ok(())
}
