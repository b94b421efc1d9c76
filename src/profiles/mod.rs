mod browse;
mod edit;
mod page;

use axum::{
    routing::{get, post},
    Router,
};

use crate::{include_res, model::Profile, res, AppState};

pub use edit::ProfileEdit;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/profiles", get(browse::browse))
        .route("/profile", get(page::own_profile))
        .route("/profile/{id}", get(page::profile))
        .route("/profile/{id}/edit", post(edit::save_edit))
}

/// The small card used on the dashboard and the profile browser.
pub(crate) fn card(profile: &Profile) -> String {
    include_res!(str, "/pages/profile_card.html")
        .replace("{id}", &profile.id.to_string())
        .replace("{avatar}", &res::escape(&profile.avatar))
        .replace("{name}", &res::escape(&profile.name))
        .replace("{location}", &res::escape(&profile.location))
        .replace("{bio}", &res::escape(&profile.bio))
        .replace("{skills_offered}", &res::tags(&profile.skills_offered))
}
