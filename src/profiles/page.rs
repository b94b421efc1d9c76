use std::sync::Arc;

use axum::{
    debug_handler,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::{
    dataset::Dataset,
    form::FormError,
    include_res,
    model::{Profile, ProfileId},
    res::{self, Nav},
    settings, AppResult, AppState,
};

use super::{edit::load_edits, ProfileEdit};

/// The sidebar's "Profile" entry: the viewer's own page, whatever its id.
#[debug_handler(state = AppState)]
pub(crate) async fn own_profile(State(dataset): State<Arc<Dataset>>) -> AppResult<Response> {
    match dataset.viewer() {
        Some(viewer) => Ok(Redirect::to(&format!("/profile/{}", viewer.id)).into_response()),
        None => res::sorry("profile"),
    }
}

#[debug_handler(state = AppState)]
pub(crate) async fn profile(
    Path(id): Path<ProfileId>,
    State(dataset): State<Arc<Dataset>>,
    session: Session,
) -> AppResult<Response> {
    let Some(profile) = dataset.profile(id) else {
        return res::sorry("profile");
    };

    let settings = settings::load(&session).await?;
    let shown = match load_edits(&session).await?.get(&id) {
        Some(edit) => edit.apply(profile),
        None => profile.clone(),
    };

    let body = render(&shown, &ProfileEdit::from_profile(&shown), None);
    Ok(res::page(&shown.name, Some(Nav::Profile), settings.dark_mode, &body).into_response())
}

/// `form` fills the edit dialog; it's open straight away when `error` is set.
pub(super) fn render(profile: &Profile, form: &ProfileEdit, error: Option<&FormError>) -> String {
    include_res!(str, "/pages/profile.html")
        .replace("{id}", &profile.id.to_string())
        .replace("{avatar}", &res::escape(&profile.avatar))
        .replace("{name}", &res::escape(&profile.name))
        .replace("{location}", &res::escape(&profile.location))
        .replace("{bio}", &res::escape(&profile.bio))
        .replace("{matches}", &profile.matches.to_string())
        .replace("{exchanges}", &profile.exchanges.to_string())
        .replace("{followers}", &profile.followers.to_string())
        .replace("{skills_offered}", &res::tags(&profile.skills_offered))
        .replace("{skills_wanted}", &res::tags(&profile.skills_wanted))
        .replace("{dialog_open}", if error.is_some() { "open" } else { "" })
        .replace("{edit_name}", &res::escape(&form.name))
        .replace("{edit_bio}", &res::escape(&form.bio))
        .replace("{edit_location}", &res::escape(&form.location))
        .replace("{error}", &error.map(|e| res::error_note(&e.to_string())).unwrap_or_default())
}
