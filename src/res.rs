use axum::{
    debug_handler,
    http::{header::CONTENT_TYPE, StatusCode},
    response::{Html, IntoResponse, Response},
};

use crate::AppResult;

#[macro_export]
macro_rules! include_res {
    (bytes, $p:expr) => {
        include_bytes!(concat!(env!("CARGO_MANIFEST_DIR"), "/res", $p))
    };
    (str, $p:expr) => {
        include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/res", $p))
    };
}

#[debug_handler]
pub async fn stylesheet() -> impl IntoResponse {
    ([(CONTENT_TYPE, "text/css")], include_res!(str, "/style.css"))
}

/// Sidebar entries. Pages outside the app shell (landing, sign-in) have none.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nav {
    Dashboard,
    Browse,
    Matches,
    Messages,
    Profile,
    Settings,
}

impl Nav {
    const ALL: [Nav; 6] = [
        Nav::Dashboard,
        Nav::Browse,
        Nav::Matches,
        Nav::Messages,
        Nav::Profile,
        Nav::Settings,
    ];

    fn href(self) -> &'static str {
        match self {
            Nav::Dashboard => "/dashboard",
            Nav::Browse => "/profiles",
            Nav::Matches => "/matches",
            Nav::Messages => "/chat",
            // redirects to the viewer's own page
            Nav::Profile => "/profile",
            Nav::Settings => "/settings",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Nav::Dashboard => "Dashboard",
            Nav::Browse => "Browse",
            Nav::Matches => "Matches",
            Nav::Messages => "Messages",
            Nav::Profile => "Profile",
            Nav::Settings => "Settings",
        }
    }
}

/// Wraps a page body in the shared layout. `nav` selects the app shell with
/// its sidebar; `None` renders a bare page.
pub fn page(title: &str, nav: Option<Nav>, dark: bool, main: &str) -> Html<String> {
    let sidebar = match nav {
        Some(active) => {
            let items: String = Nav::ALL
                .iter()
                .map(|&item| {
                    format!(
                        "        <a href=\"{}\"{}>{}</a>\n",
                        item.href(),
                        if item == active { " class=\"active\"" } else { "" },
                        item.label()
                    )
                })
                .collect();
            include_res!(str, "/pages/sidebar.html").replace("{items}", &items)
        }
        None => String::new(),
    };

    Html(
        include_res!(str, "/pages/layout.html")
            .replace("{title}", &escape(title))
            .replace("{body_class}", if dark { "dark" } else { "" })
            .replace("{sidebar}", &sidebar)
            .replace("{main}", main),
    )
}

pub fn sorry(what: &str) -> AppResult<Response> {
    let body = include_res!(str, "/pages/sorry.html").replace("{what}", &escape(what));
    Ok((StatusCode::NOT_FOUND, page("Not found", None, false, &body)).into_response())
}

pub async fn not_found() -> AppResult<Response> {
    sorry("page")
}

/// Escapes text for HTML bodies and attribute values. Braces are escaped too
/// so user text can never be mistaken for a template placeholder.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            '{' => escaped.push_str("&#123;"),
            '}' => escaped.push_str("&#125;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Renders user-written text as Markdown. Raw HTML in the input is escaped first.
pub fn markdown(text: &str) -> String {
    let escaped = escape(text);
    let mut html = String::new();
    pulldown_cmark::html::push_html(&mut html, pulldown_cmark::Parser::new(&escaped));
    html
}

pub fn tags(skills: &[String]) -> String {
    skills
        .iter()
        .map(|skill| format!("<span>{}</span>", escape(skill)))
        .collect()
}

pub fn checked(on: bool) -> &'static str {
    if on { "checked" } else { "" }
}

pub fn error_note(message: &str) -> String {
    format!("<p class=\"error\">{}</p>", escape(message))
}
