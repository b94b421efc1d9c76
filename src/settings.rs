//! Account, notification and appearance preferences, kept per visitor.

use std::sync::Arc;

use axum::{
    debug_handler,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Form,
};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tower_sessions::Session;
use tracing::{info, warn};

use crate::{
    config::Config,
    form::FormError,
    include_res,
    res::{self, Nav},
    session::{SETTINGS, SETTINGS_SAVED_UNTIL},
    AppResult, AppState,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub email: String,
    pub notifications: Notifications,
    pub dark_mode: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notifications {
    pub matches: bool,
    pub messages: bool,
    pub updates: bool,
    pub newsletter: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            email: "alex@example.com".to_owned(),
            notifications: Notifications {
                matches: true,
                messages: true,
                updates: false,
                newsletter: true,
            },
            dark_mode: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tab {
    #[default]
    Account,
    Notifications,
    Appearance,
}

impl Tab {
    const ALL: [Tab; 3] = [Tab::Account, Tab::Notifications, Tab::Appearance];

    fn id(self) -> &'static str {
        match self {
            Tab::Account => "account",
            Tab::Notifications => "notifications",
            Tab::Appearance => "appearance",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Tab::Account => "Account",
            Tab::Notifications => "Notifications",
            Tab::Appearance => "Appearance",
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct TabQuery {
    #[serde(default)]
    tab: Tab,
}

/// Only the fields of the submitted tab are present. Checkboxes are absent when unticked.
#[derive(Debug, Default, Deserialize)]
pub struct SettingsForm {
    pub email: Option<String>,
    pub current_password: Option<String>,
    pub new_password: Option<String>,
    pub confirm_password: Option<String>,
    pub matches: Option<String>,
    pub messages: Option<String>,
    pub updates: Option<String>,
    pub newsletter: Option<String>,
    pub dark_mode: Option<String>,
}

impl Settings {
    /// Applies the fields of `tab` from `form`. Nothing changes when validation fails.
    pub fn apply(&mut self, tab: Tab, form: &SettingsForm) -> Result<(), FormError> {
        match tab {
            Tab::Account => {
                let email = match form.email.as_deref().map(str::trim) {
                    Some("") => return Err(FormError::EmptyEmail),
                    Some(email) => Some(email.to_owned()),
                    None => None,
                };

                let new_password = form.new_password.as_deref().unwrap_or_default();
                let confirm_password = form.confirm_password.as_deref().unwrap_or_default();
                if !new_password.is_empty() && new_password != confirm_password {
                    return Err(FormError::PasswordMismatch);
                }

                if let Some(email) = email {
                    self.email = email;
                }
            }
            Tab::Notifications => {
                self.notifications = Notifications {
                    matches: form.matches.is_some(),
                    messages: form.messages.is_some(),
                    updates: form.updates.is_some(),
                    newsletter: form.newsletter.is_some(),
                };
            }
            Tab::Appearance => {
                self.dark_mode = form.dark_mode.is_some();
            }
        }
        Ok(())
    }
}

pub async fn load(session: &Session) -> AppResult<Settings> {
    Ok(session.get::<Settings>(SETTINGS).await?.unwrap_or_default())
}

#[debug_handler]
pub async fn settings_page(
    Query(TabQuery { tab }): Query<TabQuery>,
    session: Session,
) -> AppResult<Response> {
    let settings = load(&session).await?;
    let notice = session
        .get::<OffsetDateTime>(SETTINGS_SAVED_UNTIL)
        .await?
        .is_some_and(|until| OffsetDateTime::now_utc() < until);

    Ok(render(&settings, tab, notice, None).into_response())
}

#[debug_handler(state = AppState)]
pub async fn save_settings(
    Query(TabQuery { tab }): Query<TabQuery>,
    State(config): State<Arc<Config>>,
    session: Session,
    Form(form): Form<SettingsForm>,
) -> AppResult<Response> {
    let mut settings = load(&session).await?;

    if let Err(err) = settings.apply(tab, &form) {
        warn!(tab = tab.id(), "settings rejected: {err}");
        return Ok((
            StatusCode::UNPROCESSABLE_ENTITY,
            render(&settings, tab, false, Some(&err.to_string())),
        )
            .into_response());
    }

    session.insert(SETTINGS, &settings).await?;
    session
        .insert(SETTINGS_SAVED_UNTIL, OffsetDateTime::now_utc() + config.save_notice)
        .await?;
    info!(tab = tab.id(), "settings saved");

    Ok(Redirect::to(&format!("/settings?tab={}", tab.id())).into_response())
}

fn render(settings: &Settings, tab: Tab, notice: bool, error: Option<&str>) -> axum::response::Html<String> {
    let tabs: String = Tab::ALL
        .iter()
        .map(|&t| {
            format!(
                "    <a href=\"/settings?tab={}\"{}>{}</a>\n",
                t.id(),
                if t == tab { " class=\"active\"" } else { "" },
                t.label()
            )
        })
        .collect();

    let content = match tab {
        Tab::Account => include_res!(str, "/pages/settings_account.html")
            .replace("{email}", &res::escape(&settings.email)),
        Tab::Notifications => include_res!(str, "/pages/settings_notifications.html")
            .replace("{matches}", res::checked(settings.notifications.matches))
            .replace("{messages}", res::checked(settings.notifications.messages))
            .replace("{updates}", res::checked(settings.notifications.updates))
            .replace("{newsletter}", res::checked(settings.notifications.newsletter)),
        Tab::Appearance => include_res!(str, "/pages/settings_appearance.html")
            .replace("{dark_mode}", res::checked(settings.dark_mode)),
    };

    let body = include_res!(str, "/pages/settings.html")
        .replace("{tabs}", &tabs)
        .replace("{tab}", tab.id())
        .replace(
            "{notice}",
            if notice { "<p class=\"notice\">Settings saved</p>" } else { "" },
        )
        .replace("{error}", &error.map(res::error_note).unwrap_or_default())
        .replace("{content}", &content);

    res::page("Settings", Some(Nav::Settings), settings.dark_mode, &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_a_fresh_account() {
        let settings = Settings::default();
        assert_eq!(settings.email, "alex@example.com");
        assert!(settings.notifications.matches);
        assert!(!settings.notifications.updates);
        assert!(!settings.dark_mode);
    }

    #[test]
    fn notifications_follow_checkboxes() {
        let mut settings = Settings::default();
        let form = SettingsForm {
            updates: Some("on".to_owned()),
            ..Default::default()
        };
        settings.apply(Tab::Notifications, &form).unwrap();
        assert_eq!(
            settings.notifications,
            Notifications {
                matches: false,
                messages: false,
                updates: true,
                newsletter: false
            }
        );
    }

    #[test]
    fn mismatched_passwords_change_nothing() {
        let mut settings = Settings::default();
        let form = SettingsForm {
            email: Some("new@example.com".to_owned()),
            new_password: Some("hunter22".to_owned()),
            confirm_password: Some("hunter23".to_owned()),
            ..Default::default()
        };
        assert_eq!(settings.apply(Tab::Account, &form), Err(FormError::PasswordMismatch));
        assert_eq!(settings.email, "alex@example.com");
    }

    #[test]
    fn account_updates_email() {
        let mut settings = Settings::default();
        let form = SettingsForm {
            email: Some("  new@example.com ".to_owned()),
            new_password: Some(String::new()),
            confirm_password: Some(String::new()),
            ..Default::default()
        };
        settings.apply(Tab::Account, &form).unwrap();
        assert_eq!(settings.email, "new@example.com");
    }

    #[test]
    fn blank_email_is_rejected() {
        let mut settings = Settings::default();
        let form = SettingsForm {
            email: Some("   ".to_owned()),
            ..Default::default()
        };
        assert_eq!(settings.apply(Tab::Account, &form), Err(FormError::EmptyEmail));
    }

    #[test]
    fn appearance_toggles_dark_mode() {
        let mut settings = Settings::default();
        let on = SettingsForm {
            dark_mode: Some("on".to_owned()),
            ..Default::default()
        };
        settings.apply(Tab::Appearance, &on).unwrap();
        assert!(settings.dark_mode);

        settings.apply(Tab::Appearance, &SettingsForm::default()).unwrap();
        assert!(!settings.dark_mode);
    }
}
