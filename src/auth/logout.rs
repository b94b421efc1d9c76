use axum::{debug_handler, response::Redirect};
use tower_sessions::Session;
use tracing::info;

#[debug_handler]
pub(crate) async fn logout(session: Session) -> Redirect {
    session.clear().await;
    info!("signed out");
    Redirect::to("/")
}
