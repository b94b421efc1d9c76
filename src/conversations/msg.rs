use std::sync::Arc;

use axum::{
    debug_handler,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::{info, warn};

use crate::{
    chat::ChatError,
    dataset::Dataset,
    include_res,
    model::{ConversationId, Message},
    res, settings, AppResult, AppState,
};

use super::{load_chat, pane, save_chat};

#[derive(Deserialize)]
pub(crate) struct SendMessageForm {
    #[serde(default)]
    text: String,
}

#[debug_handler(state = AppState)]
pub(crate) async fn send(
    Path(id): Path<ConversationId>,
    State(dataset): State<Arc<Dataset>>,
    session: Session,
    Form(SendMessageForm { text }): Form<SendMessageForm>,
) -> AppResult<Response> {
    let mut chat = load_chat(&dataset, &session).await?;

    if dataset.conversation(id).is_none() {
        return res::sorry("conversation");
    }
    // the form belongs to conversation `id`; an expired session has lost the selection
    if chat.active_id() != Some(id) {
        chat.select_conversation(id)?;
    }

    match chat.send_message(&text) {
        Ok(message) => {
            info!(conversation = id, message = message.id, "message sent");
        }
        Err(err @ ChatError::InvalidInput) => {
            warn!(conversation = id, "message rejected: {err}");
            let dark = settings::load(&session).await?.dark_mode;
            let body = pane::render(&chat, "", Some("Type a message before sending."), dark);
            save_chat(chat, &session).await?;
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, body).into_response());
        }
        Err(err) => return Err(err.into()),
    }

    save_chat(chat, &session).await?;
    Ok(Redirect::to(&format!("/chat/{id}")).into_response())
}

pub(crate) fn msg_to_html(message: &Message) -> String {
    include_res!(str, "/pages/message.html")
        .replace("{sender}", message.sender.as_str())
        .replace("{id}", &message.id.to_string())
        .replace("{timestamp}", &res::escape(&message.timestamp))
        .replace("{content}", &res::markdown(&message.text))
}
