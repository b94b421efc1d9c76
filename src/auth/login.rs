use std::sync::Arc;

use axum::{
    debug_handler,
    extract::State,
    response::{IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::info;

use crate::{config::Config, include_res, res, session::VISITOR, AppResult, AppState};

#[derive(Debug, Deserialize)]
pub(crate) struct LoginForm {
    email: String,
}

#[debug_handler]
pub(crate) async fn login_page() -> impl IntoResponse {
    res::page("Sign In", None, false, include_res!(str, "/pages/login.html"))
}

#[debug_handler(state = AppState)]
pub(crate) async fn login(
    State(config): State<Arc<Config>>,
    session: Session,
    Form(LoginForm { email }): Form<LoginForm>,
) -> AppResult<Response> {
    tokio::time::sleep(config.login_delay).await;

    let visitor = email.split('@').next().unwrap_or_default().trim().to_owned();
    if !visitor.is_empty() {
        session.insert(VISITOR, &visitor).await?;
    }
    info!(%visitor, "signed in");

    Ok(Redirect::to("/dashboard").into_response())
}
