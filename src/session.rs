//! Keys for the values kept in a visitor's session, and the per-session request lock.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, PoisonError},
};

use axum::{
    extract::{Request, State},
    http::header::COOKIE,
    middleware::Next,
    response::Response,
};
use tower_sessions::cookie::Cookie;

pub const COOKIE_NAME: &str = "skillswap";

pub const VISITOR: &str = "visitor";
pub const DECK_POSITION: &str = "deck_position";
pub const CELEBRATION: &str = "celebration";
pub const CHAT_STATE: &str = "chat_state";
pub const PROFILE_EDITS: &str = "profile_edits";
pub const SETTINGS: &str = "settings";
pub const SETTINGS_SAVED_UNTIL: &str = "settings_saved_until";

/// One lock per session cookie. Entries are dropped once no request holds them.
#[derive(Clone, Default)]
pub struct SessionLocks {
    locks: Arc<Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>>,
}

impl SessionLocks {
    fn lock_for(&self, id: &str) -> Arc<tokio::sync::Mutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        locks.entry(id.to_owned()).or_default().clone()
    }

    fn release(&self, id: &str) {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        if locks.get(id).is_some_and(|lock| Arc::strong_count(lock) == 1) {
            locks.remove(id);
        }
    }
}

fn session_cookie(request: &Request) -> Option<String> {
    request
        .headers()
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(Cookie::split_parse)
        .filter_map(Result::ok)
        .find(|cookie| cookie.name() == COOKIE_NAME)
        .map(|cookie| cookie.value().to_owned())
}

/// Runs requests of one session one at a time, from the record's load through
/// its save, so the deck cursor and chat messages never lose a write.
/// Requests without a session cookie start a fresh session and run freely.
pub async fn serialize(State(locks): State<SessionLocks>, request: Request, next: Next) -> Response {
    let Some(id) = session_cookie(&request) else {
        return next.run(request).await;
    };

    let lock = locks.lock_for(&id);
    let response = {
        let _guard = lock.lock().await;
        next.run(request).await
    };
    drop(lock);
    locks.release(&id);

    response
}

#[cfg(test)]
mod tests {
    use axum::body::Body;

    use super::*;

    #[test]
    fn finds_the_session_cookie_among_others() {
        let request = axum::http::Request::builder()
            .header(COOKIE, "theme=dark; skillswap=abc123; other=1")
            .body(Body::empty())
            .unwrap();
        assert_eq!(session_cookie(&request).as_deref(), Some("abc123"));

        let request = axum::http::Request::builder().header(COOKIE, "theme=dark").body(Body::empty()).unwrap();
        assert_eq!(session_cookie(&request), None);
    }

    #[test]
    fn released_locks_are_forgotten() {
        let locks = SessionLocks::default();
        let held = locks.lock_for("a");
        let waiting = locks.lock_for("a");
        assert!(Arc::ptr_eq(&held, &waiting));

        drop(waiting);
        locks.release("a");
        assert!(locks.locks.lock().unwrap().contains_key("a"));

        drop(held);
        locks.release("a");
        assert!(locks.locks.lock().unwrap().is_empty());
    }
}
