use axum::{http::StatusCode, response::{IntoResponse, Response}};
use tracing::error;

use crate::{include_res, res};

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug)]
pub struct AppError(pub anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!("request failed: {:#}", self.0);

        let body = include_res!(str, "/pages/oops.html").replace("{detail}", &res::escape(&self.0.to_string()));
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            res::page("Error", None, false, &body),
        )
            .into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
