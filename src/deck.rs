//! The swipe deck on the matches page.
//!
//! A [`MatchDeck`] shows one candidate at a time and walks forward through the
//! whole set, wrapping back to the first candidate after the last. Trading and
//! skipping both advance the cursor; neither removes anyone from the deck, so a
//! traded candidate comes around again on the next pass.

use crate::model::Profile;

#[derive(Debug, Clone)]
pub struct MatchDeck<'a> {
    candidates: &'a [Profile],
    position: usize,
}

impl<'a> MatchDeck<'a> {
    pub fn new(candidates: &'a [Profile]) -> Self {
        Self::resume(candidates, 0)
    }

    /// Rebuilds a deck from a cursor saved earlier. A cursor that no longer
    /// points into `candidates` starts over at the first candidate.
    pub fn resume(candidates: &'a [Profile], position: usize) -> Self {
        let position = if position < candidates.len() { position } else { 0 };
        Self { candidates, position }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// The candidate on top of the deck, or `None` when there are no candidates at all.
    pub fn current(&self) -> Option<&'a Profile> {
        self.candidates.get(self.position)
    }

    /// One-based position and deck size, for the "n of m" counter.
    pub fn progress(&self) -> Option<(usize, usize)> {
        if self.is_empty() {
            None
        } else {
            Some((self.position + 1, self.len()))
        }
    }

    pub fn skip(&mut self) {
        self.advance();
    }

    /// Advances like [`skip`](Self::skip) and hands back the candidate that was
    /// traded with so the caller can celebrate. Nothing about the match is kept.
    pub fn trade(&mut self) -> Option<&'a Profile> {
        let matched = self.current()?;
        self.advance();
        Some(matched)
    }

    fn advance(&mut self) {
        if self.candidates.is_empty() {
            return;
        }
        self.position = (self.position + 1) % self.candidates.len();
    }
}
