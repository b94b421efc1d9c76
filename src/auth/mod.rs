//! Sign-in and sign-up. There are no accounts behind these forms: both wait a
//! moment as if a server were answering and then let the visitor in.

mod login;
mod logout;
mod register;

use axum::{routing::get, Router};

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", get(login::login_page).post(login::login))
        .route("/register", get(register::register_page).post(register::register))
        .route("/logout", get(logout::logout))
}
