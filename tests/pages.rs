use std::time::Duration;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use skillswap::{app, AppState, Config, Dataset};
use tower::ServiceExt;

struct Reply {
    status: StatusCode,
    location: Option<String>,
    content_type: Option<String>,
    body: String,
}

/// A browser stand-in that keeps the session cookie between requests.
struct Visitor {
    app: Router,
    cookie: Option<String>,
}

impl Visitor {
    fn new() -> Self {
        Self::with_config(Config {
            login_delay: Duration::ZERO,
            ..Config::default()
        })
    }

    fn with_config(config: Config) -> Self {
        Self::with_dataset(Dataset::embedded().unwrap(), config)
    }

    fn with_dataset(dataset: Dataset, config: Config) -> Self {
        Self {
            app: app(AppState::new(dataset, config)),
            cookie: None,
        }
    }

    async fn get(&mut self, uri: &str) -> Reply {
        let request = Request::builder().uri(uri);
        self.send(request, Body::empty()).await
    }

    async fn post(&mut self, uri: &str, form: &str) -> Reply {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        self.send(request, Body::from(form.to_owned())).await
    }

    async fn send(&mut self, mut request: axum::http::request::Builder, body: Body) -> Reply {
        if let Some(cookie) = &self.cookie {
            request = request.header(header::COOKIE, cookie);
        }
        let response = self
            .app
            .clone()
            .oneshot(request.body(body).unwrap())
            .await
            .unwrap();

        if let Some(set_cookie) = response.headers().get(header::SET_COOKIE) {
            let pair = set_cookie.to_str().unwrap().split(';').next().unwrap();
            self.cookie = Some(pair.to_owned());
        }

        let header_value = |name| {
            response
                .headers()
                .get(name)
                .map(|v: &header::HeaderValue| v.to_str().unwrap().to_owned())
        };
        let status = response.status();
        let location = header_value(header::LOCATION);
        let content_type = header_value(header::CONTENT_TYPE);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();

        Reply {
            status,
            location,
            content_type,
            body: String::from_utf8(bytes.to_vec()).unwrap(),
        }
    }
}

fn assert_redirect(reply: &Reply, to: &str) {
    assert_eq!(reply.status, StatusCode::SEE_OTHER);
    assert_eq!(reply.location.as_deref(), Some(to));
}

#[tokio::test]
async fn landing_page_shows_community() {
    let mut visitor = Visitor::new();
    let reply = visitor.get("/").await;
    assert_eq!(reply.status, StatusCode::OK);
    assert!(reply.body.contains("Trade Skills."));
    assert!(reply.body.contains("Sarah Kim"));
    assert!(reply.body.contains("Programming"));
    assert!(!reply.body.contains("class=\"sidebar\""));
}

#[tokio::test]
async fn stylesheet_is_css() {
    let mut visitor = Visitor::new();
    let reply = visitor.get("/style.css").await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.content_type.as_deref(), Some("text/css"));
}

#[tokio::test]
async fn unknown_pages_are_404() {
    let mut visitor = Visitor::new();
    assert_eq!(visitor.get("/nowhere").await.status, StatusCode::NOT_FOUND);
    assert_eq!(visitor.get("/profile/999").await.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn profile_search_ignores_case() {
    let mut visitor = Visitor::new();

    let reply = visitor.get("/profiles?q=marcus").await;
    assert_eq!(reply.status, StatusCode::OK);
    assert!(reply.body.contains("Marcus Chen"));
    assert!(!reply.body.contains("Sofia Martinez"));
    assert!(reply.body.contains("1 of 6 members"));

    let reply = visitor.get("/profiles").await;
    assert!(reply.body.contains("6 of 6 members"));

    let reply = visitor.get("/profiles?q=xyz-no-match").await;
    assert!(reply.body.contains("0 of 6 members"));
}

#[tokio::test]
async fn browse_sits_in_the_app_shell() {
    let mut visitor = Visitor::new();
    let reply = visitor.get("/profiles").await;
    assert!(reply.body.contains("class=\"sidebar\""));
    assert!(reply.body.contains("<a href=\"/profiles\" class=\"active\">Browse</a>"));
}

#[tokio::test]
async fn profile_link_follows_the_viewer() {
    let mut visitor = Visitor::new();
    assert_redirect(&visitor.get("/profile").await, "/profile/1");

    let dataset = Dataset::from_json(
        r#"{
            "profiles": [
                { "id": 7, "name": "Noor Haddad", "avatar": "", "bio": "", "location": "",
                  "skillsOffered": [], "skillsWanted": [], "matches": 0, "exchanges": 0, "followers": 0 }
            ],
            "conversations": []
        }"#,
    )
    .unwrap();
    let mut visitor = Visitor::with_dataset(dataset, Config::default());
    assert_redirect(&visitor.get("/profile").await, "/profile/7");
    assert_eq!(visitor.get("/profile/7").await.status, StatusCode::OK);

    let empty = Dataset::from_json(r#"{ "profiles": [], "conversations": [] }"#).unwrap();
    let mut visitor = Visitor::with_dataset(empty, Config::default());
    assert_eq!(visitor.get("/profile").await.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn deck_trades_skips_and_wraps() {
    let mut visitor = Visitor::new();

    let reply = visitor.get("/matches").await;
    assert!(reply.body.contains("1 of 6"));
    assert!(reply.body.contains("Alex Johnson"));
    assert!(!reply.body.contains("It's a Match!"));

    assert_redirect(&visitor.post("/matches/trade", "").await, "/matches");
    let reply = visitor.get("/matches").await;
    assert!(reply.body.contains("2 of 6"));
    assert!(reply.body.contains("It's a Match!"));
    assert!(reply.body.contains("You and Alex Johnson are a great fit."));

    for _ in 0..5 {
        assert_redirect(&visitor.post("/matches/skip", "").await, "/matches");
    }
    let reply = visitor.get("/matches").await;
    assert!(reply.body.contains("1 of 6"));
}

#[tokio::test]
async fn celebration_window_closes() {
    let mut visitor = Visitor::with_config(Config {
        celebration: Duration::ZERO,
        ..Config::default()
    });

    visitor.post("/matches/trade", "").await;
    let reply = visitor.get("/matches").await;
    assert!(!reply.body.contains("It's a Match!"));
    assert!(reply.body.contains("2 of 6"));
}

#[tokio::test]
async fn chat_select_send_and_switch() {
    let mut visitor = Visitor::new();

    let reply = visitor.get("/chat").await;
    assert_eq!(reply.status, StatusCode::OK);
    assert!(reply.body.contains("Pick a conversation"));

    let reply = visitor.get("/chat/2").await;
    assert_eq!(reply.status, StatusCode::OK);
    assert!(reply.body.contains("id=\"message-4\""));
    assert!(reply.body.contains("<a class=\"chat-item selected\" href=\"/chat/2\">"));

    assert_redirect(&visitor.post("/chat/2/send", "text=hello+there").await, "/chat/2");
    let reply = visitor.get("/chat/2").await;
    assert!(reply.body.contains("id=\"message-5\""));
    assert!(reply.body.contains("<p>hello there</p>"));
    assert!(reply.body.contains("message local"));

    let reply = visitor.post("/chat/2/send", "text=+++").await;
    assert_eq!(reply.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(!reply.body.contains("id=\"message-6\""));

    let reply = visitor.get("/chat/99").await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
    let reply = visitor.post("/chat/99/send", "text=hi").await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
    let reply = visitor.get("/chat").await;
    assert!(reply.body.contains("<a class=\"chat-item selected\" href=\"/chat/2\">"));
    assert!(reply.body.contains("<p>hello there</p>"));

    visitor.get("/chat/3").await;
    let reply = visitor.get("/chat/2").await;
    assert!(!reply.body.contains("hello there"));
    assert!(!reply.body.contains("id=\"message-5\""));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_sends_in_one_session_all_land() {
    let mut visitor = Visitor::new();
    visitor.get("/chat/2").await;
    let cookie = visitor.cookie.clone().unwrap();

    let sends: Vec<_> = (0..40)
        .map(|i| {
            let app = visitor.app.clone();
            let request = Request::builder()
                .method("POST")
                .uri("/chat/2/send")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .header(header::COOKIE, &cookie)
                .body(Body::from(format!("text=note+{i}")))
                .unwrap();
            tokio::spawn(async move { app.oneshot(request).await.unwrap().status() })
        })
        .collect();
    for send in sends {
        assert_eq!(send.await.unwrap(), StatusCode::SEE_OTHER);
    }

    let reply = visitor.get("/chat/2").await;
    let kept = (0..40)
        .filter(|i| reply.body.contains(&format!("<p>note {i}</p>")))
        .count();
    assert_eq!(kept, 40);
    assert!(reply.body.contains("id=\"message-44\""));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_skips_in_one_session_all_count() {
    let mut visitor = Visitor::new();
    assert_redirect(&visitor.post("/matches/skip", "").await, "/matches");
    let cookie = visitor.cookie.clone().unwrap();

    let skips: Vec<_> = (0..14)
        .map(|_| {
            let app = visitor.app.clone();
            let request = Request::builder()
                .method("POST")
                .uri("/matches/skip")
                .header(header::COOKIE, &cookie)
                .body(Body::empty())
                .unwrap();
            tokio::spawn(async move { app.oneshot(request).await.unwrap().status() })
        })
        .collect();
    for skip in skips {
        assert_eq!(skip.await.unwrap(), StatusCode::SEE_OTHER);
    }

    // 15 skips over 6 cards
    let reply = visitor.get("/matches").await;
    assert!(reply.body.contains("4 of 6"));
}

#[tokio::test]
async fn conversation_list_filters_by_name() {
    let mut visitor = Visitor::new();
    let reply = visitor.get("/chat?q=SOFIA").await;
    assert!(reply.body.contains("href=\"/chat/3\""));
    assert!(!reply.body.contains("href=\"/chat/2\""));
}

#[tokio::test]
async fn sign_in_always_lands_on_dashboard() {
    let mut visitor = Visitor::new();
    let reply = visitor.post("/login", "email=jo%40example.com&password=x").await;
    assert_redirect(&reply, "/dashboard");

    let reply = visitor.get("/dashboard").await;
    assert_eq!(reply.status, StatusCode::OK);
    assert!(reply.body.contains("Welcome back, jo!"));
    assert!(reply.body.contains("Active Matches"));

    assert_redirect(&visitor.get("/logout").await, "/");
    let reply = visitor.get("/dashboard").await;
    assert!(reply.body.contains("Welcome back, Alex!"));
}

#[tokio::test]
async fn register_checks_passwords() {
    let mut visitor = Visitor::new();

    let reply = visitor
        .post("/register", "name=Jo&email=jo%40example.com&password=a&confirm_password=b")
        .await;
    assert_eq!(reply.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(reply.body.contains("Passwords do not match"));

    let reply = visitor
        .post(
            "/register",
            "name=Jo+Park&email=jo%40example.com&password=a&confirm_password=a&skills_offered=Rust",
        )
        .await;
    assert_redirect(&reply, "/dashboard");
    assert!(visitor.get("/dashboard").await.body.contains("Welcome back, Jo Park!"));
}

#[tokio::test]
async fn settings_save_and_theme() {
    let mut visitor = Visitor::new();

    let reply = visitor.get("/settings").await;
    assert!(reply.body.contains("alex@example.com"));
    assert!(!reply.body.contains("Settings saved"));

    let reply = visitor.post("/settings?tab=appearance", "dark_mode=on").await;
    assert_redirect(&reply, "/settings?tab=appearance");

    let reply = visitor.get("/settings?tab=appearance").await;
    assert!(reply.body.contains("Settings saved"));
    assert!(reply.body.contains("<body class=\"dark\">"));
    assert!(visitor.get("/dashboard").await.body.contains("<body class=\"dark\">"));

    let reply = visitor
        .post("/settings?tab=account", "email=a%40b.c&new_password=x&confirm_password=y")
        .await;
    assert_eq!(reply.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(reply.body.contains("Passwords do not match"));
}

#[tokio::test]
async fn profile_edits_stay_with_the_visitor() {
    let mut visitor = Visitor::new();

    let reply = visitor
        .post("/profile/1/edit", "name=Alex+J.&bio=Teaching+React&location=Oakland")
        .await;
    assert_redirect(&reply, "/profile/1");

    let reply = visitor.get("/profile/1").await;
    assert!(reply.body.contains("<h1>Alex J.</h1>"));
    assert!(reply.body.contains("Oakland"));

    // the dataset is untouched
    assert!(visitor.get("/profiles").await.body.contains("Alex Johnson"));
    let mut stranger = Visitor::new();
    assert!(stranger.get("/profile/1").await.body.contains("<h1>Alex Johnson</h1>"));

    let reply = visitor.post("/profile/1/edit", "name=+&bio=&location=").await;
    assert_eq!(reply.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(reply.body.contains("Name is required"));
}
