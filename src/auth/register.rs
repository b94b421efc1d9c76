use std::sync::Arc;

use axum::{
    debug_handler,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::{info, warn};

use crate::{
    config::Config,
    form::{parse_skills, FormError},
    include_res, res,
    session::VISITOR,
    AppResult, AppState,
};

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RegisterForm {
    name: String,
    email: String,
    password: String,
    confirm_password: String,
    #[serde(default)]
    skills_offered: String,
    #[serde(default)]
    skills_wanted: String,
}

impl RegisterForm {
    fn validate(&self) -> Result<(), FormError> {
        if self.name.trim().is_empty() {
            return Err(FormError::EmptyName);
        }
        if self.password != self.confirm_password {
            return Err(FormError::PasswordMismatch);
        }
        Ok(())
    }
}

#[debug_handler]
pub(crate) async fn register_page() -> impl IntoResponse {
    render(&RegisterForm::default(), None)
}

#[debug_handler(state = AppState)]
pub(crate) async fn register(
    State(config): State<Arc<Config>>,
    session: Session,
    Form(form): Form<RegisterForm>,
) -> AppResult<Response> {
    if let Err(err) = form.validate() {
        warn!("registration rejected: {err}");
        return Ok((StatusCode::UNPROCESSABLE_ENTITY, render(&form, Some(&err))).into_response());
    }

    tokio::time::sleep(config.login_delay).await;

    let name = form.name.trim().to_owned();
    info!(
        %name,
        offered = ?parse_skills(&form.skills_offered),
        wanted = ?parse_skills(&form.skills_wanted),
        "registered"
    );
    session.insert(VISITOR, &name).await?;

    Ok(Redirect::to("/dashboard").into_response())
}

fn render(form: &RegisterForm, error: Option<&FormError>) -> Html<String> {
    let body = include_res!(str, "/pages/register.html")
        .replace("{name}", &res::escape(&form.name))
        .replace("{email}", &res::escape(&form.email))
        .replace("{skills_offered}", &res::escape(&parse_skills(&form.skills_offered).join(", ")))
        .replace("{skills_wanted}", &res::escape(&parse_skills(&form.skills_wanted).join(", ")))
        .replace("{error}", &error.map(|e| res::error_note(&e.to_string())).unwrap_or_default());

    res::page("Create Account", None, false, &body)
}
