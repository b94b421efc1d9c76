//! State of the two-pane messages page.
//!
//! A [`ChatSession`] starts with no conversation selected. Selecting one loads
//! that conversation's seed messages, replacing whatever was on screen, and
//! sending appends a locally authored message to the visible list.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::{macros::format_description, OffsetDateTime};

use crate::{
    filter,
    model::{Conversation, ConversationId, Message, Sender},
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChatError {
    #[error("no conversation with id {0}")]
    NotFound(ConversationId),
    #[error("message text is empty")]
    InvalidInput,
    #[error("no conversation is selected")]
    NoActiveConversation,
}

/// The serializable half of a [`ChatSession`], kept between page loads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ChatState {
    #[default]
    NoSelection,
    Active {
        conversation_id: ConversationId,
        messages: Vec<Message>,
    },
}

#[derive(Debug, Clone)]
pub struct ChatSession<'a> {
    conversations: &'a [Conversation],
    state: ChatState,
}

impl<'a> ChatSession<'a> {
    pub fn new(conversations: &'a [Conversation]) -> Self {
        Self {
            conversations,
            state: ChatState::NoSelection,
        }
    }

    /// Picks up a saved state. If the saved conversation is gone from
    /// `conversations` the session falls back to no selection.
    pub fn resume(conversations: &'a [Conversation], state: ChatState) -> Self {
        let state = match state {
            ChatState::Active { conversation_id, .. }
                if !conversations.iter().any(|c| c.id == conversation_id) =>
            {
                ChatState::NoSelection
            }
            state => state,
        };
        Self { conversations, state }
    }

    pub fn into_state(self) -> ChatState {
        self.state
    }

    pub fn active_id(&self) -> Option<ConversationId> {
        match &self.state {
            ChatState::NoSelection => None,
            ChatState::Active { conversation_id, .. } => Some(*conversation_id),
        }
    }

    pub fn active_conversation(&self) -> Option<&'a Conversation> {
        let id = self.active_id()?;
        self.conversations.iter().find(|c| c.id == id)
    }

    /// Messages of the active conversation, empty when nothing is selected.
    pub fn messages(&self) -> &[Message] {
        match &self.state {
            ChatState::NoSelection => &[],
            ChatState::Active { messages, .. } => messages,
        }
    }

    /// Makes `id` the active conversation and loads its seed messages. On
    /// failure the current selection is left as it was.
    pub fn select_conversation(&mut self, id: ConversationId) -> Result<&'a Conversation, ChatError> {
        let conversation = self
            .conversations
            .iter()
            .find(|c| c.id == id)
            .ok_or(ChatError::NotFound(id))?;

        self.state = ChatState::Active {
            conversation_id: conversation.id,
            messages: conversation.messages.clone(),
        };
        Ok(conversation)
    }

    pub fn send_message(&mut self, text: &str) -> Result<&Message, ChatError> {
        self.send_message_at(text, now_local())
    }

    /// Appends `text` as a local message stamped with `now`. The new id is the
    /// list length plus one.
    pub fn send_message_at(&mut self, text: &str, now: OffsetDateTime) -> Result<&Message, ChatError> {
        if text.trim().is_empty() {
            return Err(ChatError::InvalidInput);
        }

        let ChatState::Active { messages, .. } = &mut self.state else {
            return Err(ChatError::NoActiveConversation);
        };

        let id = messages.len() as u32 + 1;
        messages.push(Message {
            id,
            sender: Sender::Local,
            text: text.to_owned(),
            timestamp: format_timestamp(now),
        });
        Ok(&messages[messages.len() - 1])
    }

    pub fn filter_conversations(&self, query: &str) -> Vec<&'a Conversation> {
        filter::filter(self.conversations, query)
    }
}

/// `02:35 PM` style clock time.
pub fn format_timestamp(at: OffsetDateTime) -> String {
    // OffsetDateTime carries every component this description reads, so formatting can't fail.
    at.format(format_description!("[hour repr:12]:[minute] [period]"))
        .unwrap_or_default()
}

fn now_local() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}
