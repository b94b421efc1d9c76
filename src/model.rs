use serde::{Deserialize, Serialize};

pub type ProfileId = u32;
pub type ConversationId = u32;
pub type MessageId = u32;

/// A community member as it appears in the seed dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: ProfileId,
    pub name: String,
    pub avatar: String,
    pub bio: String,
    pub location: String,
    pub skills_offered: Vec<String>,
    pub skills_wanted: Vec<String>,

    // display counters only
    pub matches: u32,
    pub exchanges: u32,
    pub followers: u32,
}

/// A two-party thread. `id` doubles as the counterpart's profile id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    pub id: ConversationId,
    pub user_name: String,
    pub avatar: String,
    pub messages: Vec<Message>,

    pub last_message: String,
    pub timestamp: String,
    pub unread: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub sender: Sender,
    pub text: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    Local,
    Remote,
}

impl Sender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sender::Local => "local",
            Sender::Remote => "remote",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Testimonial {
    pub id: u32,
    pub name: String,
    pub role: String,
    pub avatar: String,
    pub quote: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillCategory {
    pub name: String,
    pub icon: String,
    pub count: u32,
}
