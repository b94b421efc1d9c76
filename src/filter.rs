//! Name search shared by the profile browser and the conversation list.

use crate::model::{Conversation, Profile};

/// Anything with a display name the search box can match against.
pub trait Named {
    fn name(&self) -> &str;
}

impl Named for Profile {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for Conversation {
    fn name(&self) -> &str {
        &self.user_name
    }
}

/// Returns the items whose name contains `query`, ignoring case, in their original order.
/// An empty query keeps everything.
pub fn filter<'a, T: Named>(items: &'a [T], query: &str) -> Vec<&'a T> {
    if query.is_empty() {
        return items.iter().collect();
    }

    let query = query.to_lowercase();
    items
        .iter()
        .filter(|item| item.name().to_lowercase().contains(&query))
        .collect()
}
