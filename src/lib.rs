pub mod appresult;
pub mod auth;
pub mod chat;
pub mod config;
pub mod conversations;
pub mod dashboard;
pub mod dataset;
pub mod deck;
pub mod filter;
pub mod form;
pub mod index;
pub mod matches;
pub mod model;
pub mod profiles;
pub mod res;
pub mod session;
pub mod settings;

use std::sync::Arc;

use axum::{extract::FromRef, middleware, routing::get, Router};
use tower_http::trace::TraceLayer;
use tower_sessions::{cookie::SameSite, Expiry, MemoryStore, SessionManagerLayer};

pub use appresult::{AppError, AppResult};
pub use config::Config;
pub use dataset::Dataset;

use session::{SessionLocks, COOKIE_NAME};

#[derive(Clone, FromRef)]
pub struct AppState {
    pub dataset: Arc<Dataset>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(dataset: Dataset, config: Config) -> Self {
        Self {
            dataset: Arc::new(dataset),
            config: Arc::new(config),
        }
    }
}

/// Every page, with a fresh in-memory session store. Requests sharing a
/// session cookie are handled one at a time.
pub fn app(state: AppState) -> Router {
    let session_layer = SessionManagerLayer::new(MemoryStore::default())
        .with_name(COOKIE_NAME)
        .with_secure(false)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(state.config.session_idle));

    Router::new()
        .route("/", get(index::index))
        .route("/style.css", get(res::stylesheet))
        .route("/dashboard", get(dashboard::dashboard))
        .route("/settings", get(settings::settings_page).post(settings::save_settings))
        .merge(auth::router())
        .merge(profiles::router())
        .merge(matches::router())
        .merge(conversations::router())
        .fallback(res::not_found)
        .with_state(state)
        .layer(session_layer)
        .layer(middleware::from_fn_with_state(SessionLocks::default(), session::serialize))
        .layer(TraceLayer::new_for_http())
}
