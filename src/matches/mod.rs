//! The swipe page: one candidate at a time, trade or skip.

mod page;
mod swipe;

use axum::{
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tower_sessions::Session;

use crate::{dataset::Dataset, deck::MatchDeck, model::ProfileId, session::DECK_POSITION, AppResult, AppState};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/matches", get(page::matches))
        .route("/matches/trade", post(swipe::trade))
        .route("/matches/skip", post(swipe::skip))
}

/// The "It's a Match!" banner raised by a trade, shown until `until`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Celebration {
    pub profile_id: ProfileId,
    pub until: OffsetDateTime,
}

impl Celebration {
    pub fn is_open(&self, now: OffsetDateTime) -> bool {
        now < self.until
    }
}

/// The visitor's deck over every profile, at the cursor saved in their session.
async fn load_deck<'a>(dataset: &'a Dataset, session: &Session) -> AppResult<MatchDeck<'a>> {
    let position = session.get::<usize>(DECK_POSITION).await?.unwrap_or_default();
    Ok(MatchDeck::resume(&dataset.profiles, position))
}

async fn save_deck(deck: &MatchDeck<'_>, session: &Session) -> AppResult<()> {
    session.insert(DECK_POSITION, deck.position()).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use time::{macros::datetime, Duration};

    use super::*;

    #[test]
    fn celebration_closes_at_deadline() {
        let until = datetime!(2024-05-04 12:00:02 UTC);
        let celebration = Celebration { profile_id: 2, until };
        assert!(celebration.is_open(until - Duration::milliseconds(1)));
        assert!(!celebration.is_open(until));
        assert!(!celebration.is_open(until + Duration::seconds(5)));
    }
}
