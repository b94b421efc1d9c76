use std::{collections::HashMap, sync::Arc};

use axum::{
    debug_handler,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Form,
};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::{info, warn};

use crate::{
    dataset::Dataset,
    form::FormError,
    model::{Profile, ProfileId},
    res,
    session::PROFILE_EDITS,
    settings, AppResult, AppState,
};

/// The edit form's fields. Saved edits live in the visitor's session and are
/// laid over the seed profile when it is shown; the dataset itself never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileEdit {
    pub name: String,
    pub bio: String,
    pub location: String,
}

impl ProfileEdit {
    pub fn from_profile(profile: &Profile) -> Self {
        Self {
            name: profile.name.clone(),
            bio: profile.bio.clone(),
            location: profile.location.clone(),
        }
    }

    /// Trims the fields and checks the name isn't blank.
    pub fn cleaned(self) -> Result<Self, FormError> {
        let name = self.name.trim().to_owned();
        if name.is_empty() {
            return Err(FormError::EmptyName);
        }
        Ok(Self {
            name,
            bio: self.bio.trim().to_owned(),
            location: self.location.trim().to_owned(),
        })
    }

    pub fn apply(&self, profile: &Profile) -> Profile {
        Profile {
            name: self.name.clone(),
            bio: self.bio.clone(),
            location: self.location.clone(),
            ..profile.clone()
        }
    }
}

pub(crate) async fn load_edits(session: &Session) -> AppResult<HashMap<ProfileId, ProfileEdit>> {
    Ok(session
        .get::<HashMap<ProfileId, ProfileEdit>>(PROFILE_EDITS)
        .await?
        .unwrap_or_default())
}

#[debug_handler(state = AppState)]
pub(crate) async fn save_edit(
    Path(id): Path<ProfileId>,
    State(dataset): State<Arc<Dataset>>,
    session: Session,
    Form(edit): Form<ProfileEdit>,
) -> AppResult<Response> {
    let Some(profile) = dataset.profile(id) else {
        return res::sorry("profile");
    };

    let edit = match edit.clone().cleaned() {
        Ok(edit) => edit,
        Err(err) => {
            warn!(profile = id, "profile edit rejected: {err}");
            let settings = settings::load(&session).await?;
            let mut edits = load_edits(&session).await?;
            let shown = edits.remove(&id).map_or_else(|| profile.clone(), |saved| saved.apply(profile));
            let body = super::page::render(&shown, &edit, Some(&err));
            return Ok((
                StatusCode::UNPROCESSABLE_ENTITY,
                res::page(&shown.name, Some(res::Nav::Profile), settings.dark_mode, &body),
            )
                .into_response());
        }
    };

    let mut edits = load_edits(&session).await?;
    edits.insert(id, edit);
    session.insert(PROFILE_EDITS, &edits).await?;
    info!(profile = id, "profile edit saved");

    Ok(Redirect::to(&format!("/profile/{id}")).into_response())
}
