use std::sync::Arc;

use axum::{
    debug_handler,
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Response},
};
use tower_sessions::Session;
use tracing::debug;

use crate::{
    chat::{ChatError, ChatSession},
    dataset::Dataset,
    include_res,
    model::ConversationId,
    res::{self, Nav},
    settings, AppResult, AppState,
};

use super::{load_chat, msg, save_chat, SearchQuery};

#[debug_handler(state = AppState)]
pub(crate) async fn chat(
    Query(SearchQuery { q }): Query<SearchQuery>,
    State(dataset): State<Arc<Dataset>>,
    session: Session,
) -> AppResult<Response> {
    let settings = settings::load(&session).await?;
    let chat = load_chat(&dataset, &session).await?;

    Ok(render(&chat, &q, None, settings.dark_mode).into_response())
}

/// Shows conversation `id`, selecting it first unless it is already the active one.
/// Re-showing the active conversation keeps what the visitor sent in it.
#[debug_handler(state = AppState)]
pub(crate) async fn conversation(
    Path(id): Path<ConversationId>,
    Query(SearchQuery { q }): Query<SearchQuery>,
    State(dataset): State<Arc<Dataset>>,
    session: Session,
) -> AppResult<Response> {
    let settings = settings::load(&session).await?;
    let mut chat = load_chat(&dataset, &session).await?;

    if chat.active_id() != Some(id) {
        match chat.select_conversation(id) {
            Ok(selected) => debug!(conversation = id, name = %selected.user_name, "selected"),
            Err(ChatError::NotFound(_)) => return res::sorry("conversation"),
            Err(err) => return Err(err.into()),
        }
        let body = render(&chat, &q, None, settings.dark_mode);
        save_chat(chat, &session).await?;
        return Ok(body.into_response());
    }

    Ok(render(&chat, &q, None, settings.dark_mode).into_response())
}

pub(super) fn render(chat: &ChatSession, query: &str, error: Option<&str>, dark: bool) -> Html<String> {
    let active = chat.active_id();

    let chat_items: String = chat
        .filter_conversations(query)
        .into_iter()
        .map(|conversation| {
            include_res!(str, "/pages/chat_item.html")
                .replace("{id}", &conversation.id.to_string())
                .replace("{selected}", if active == Some(conversation.id) { "selected" } else { "" })
                .replace("{avatar}", &res::escape(&conversation.avatar))
                .replace("{name}", &res::escape(&conversation.user_name))
                .replace("{unread}", if conversation.unread { "<span class=\"dot\"></span>" } else { "" })
                .replace("{last_message}", &res::escape(&conversation.last_message))
                .replace("{timestamp}", &res::escape(&conversation.timestamp))
        })
        .collect();

    let pane = match chat.active_conversation() {
        Some(conversation) => {
            let messages: String = chat.messages().iter().map(msg::msg_to_html).collect();
            include_res!(str, "/pages/chat_pane.html")
                .replace("{id}", &conversation.id.to_string())
                .replace("{avatar}", &res::escape(&conversation.avatar))
                .replace("{name}", &res::escape(&conversation.user_name))
                .replace("{error}", &error.map(res::error_note).unwrap_or_default())
                .replace("{messages}", &messages)
        }
        None => include_res!(str, "/pages/chat_none.html").to_owned(),
    };

    let list_action = match active {
        Some(id) => format!("/chat/{id}"),
        None => "/chat".to_owned(),
    };

    let body = include_res!(str, "/pages/chat.html")
        .replace("{list_action}", &list_action)
        .replace("{query}", &res::escape(query))
        .replace("{chat_items}", &chat_items)
        .replace("{pane}", &pane);

    res::page("Messages", Some(Nav::Messages), dark, &body)
}
