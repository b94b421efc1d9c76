//! The read-only seed data every page draws from.

use std::{
    collections::HashSet,
    fs, io,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::{
    include_res,
    model::{Conversation, ConversationId, Profile, ProfileId, SkillCategory, Testimonial},
};

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("could not read seed dataset {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("could not parse seed dataset: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("duplicate {kind} id {id} in seed dataset")]
    DuplicateId { kind: &'static str, id: u32 },
    #[error("conversation {conversation} repeats message id {message}")]
    DuplicateMessageId { conversation: ConversationId, message: u32 },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub profiles: Vec<Profile>,
    pub conversations: Vec<Conversation>,
    #[serde(default)]
    pub testimonials: Vec<Testimonial>,
    #[serde(default)]
    pub skill_categories: Vec<SkillCategory>,
}

impl Dataset {
    /// Loads from `path` if given, otherwise the dataset compiled into the binary.
    pub fn load(path: Option<&Path>) -> Result<Self, DatasetError> {
        let dataset = match path {
            Some(path) => Self::from_path(path)?,
            None => Self::embedded()?,
        };
        info!(
            profiles = dataset.profiles.len(),
            conversations = dataset.conversations.len(),
            "seed dataset loaded"
        );
        Ok(dataset)
    }

    pub fn embedded() -> Result<Self, DatasetError> {
        Self::from_json(include_res!(str, "/seed.json"))
    }

    pub fn from_path(path: &Path) -> Result<Self, DatasetError> {
        let json = fs::read_to_string(path).map_err(|source| DatasetError::Read {
            path: path.to_owned(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn from_json(json: &str) -> Result<Self, DatasetError> {
        let dataset: Dataset = serde_json::from_str(json)?;
        dataset.validate()?;
        Ok(dataset)
    }

    pub fn profile(&self, id: ProfileId) -> Option<&Profile> {
        self.profiles.iter().find(|p| p.id == id)
    }

    pub fn conversation(&self, id: ConversationId) -> Option<&Conversation> {
        self.conversations.iter().find(|c| c.id == id)
    }

    /// The member the pages are shown as: the first profile in the dataset.
    pub fn viewer(&self) -> Option<&Profile> {
        self.profiles.first()
    }

    pub fn message_count(&self) -> usize {
        self.conversations.iter().map(|c| c.messages.len()).sum()
    }

    fn validate(&self) -> Result<(), DatasetError> {
        unique_ids("profile", self.profiles.iter().map(|p| p.id))?;
        unique_ids("conversation", self.conversations.iter().map(|c| c.id))?;

        for conversation in &self.conversations {
            let mut seen = HashSet::new();
            for message in &conversation.messages {
                if !seen.insert(message.id) {
                    return Err(DatasetError::DuplicateMessageId {
                        conversation: conversation.id,
                        message: message.id,
                    });
                }
            }

            if self.profile(conversation.id).is_none() {
                warn!(
                    conversation = conversation.id,
                    user_name = %conversation.user_name,
                    "conversation has no matching profile"
                );
            }
        }

        Ok(())
    }
}

fn unique_ids(kind: &'static str, ids: impl Iterator<Item = u32>) -> Result<(), DatasetError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(DatasetError::DuplicateId { kind, id });
        }
    }
    Ok(())
}
