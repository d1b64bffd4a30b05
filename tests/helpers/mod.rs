//! Shared setup for the HTTP integration tests

#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use schoolmeal::{
    AppState,
    config::{CalendarConfig, Config, LogConfig, ServerConfig, SourceConfig},
    source::{DirectorySource, FixtureSource, MenuSource},
};
use schoolmeal_calendar::YearMonth;
use tower::ServiceExt;

pub fn may_2025() -> YearMonth {
    YearMonth::new(2025, 4).expect("valid month")
}

pub fn test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
        },
        log: LogConfig::default(),
        source: SourceConfig::default(),
        calendar: CalendarConfig {
            initial_month: Some("2025-05".to_string()),
            school_holidays: Vec::new(),
        },
    }
}

/// App opened on May 2025 with fixture menus for that month loaded
pub async fn test_app() -> (Router, AppState) {
    let source = FixtureSource::new();
    source
        .generate_month(may_2025())
        .await
        .expect("Failed to generate fixture menus");

    let state = AppState::new(test_config(), Arc::new(source), may_2025());
    assert!(state.load_initial_month().await);

    (schoolmeal::routes::router(state.clone()), state)
}

/// App opened on May 2025 reading saved responses from `directory`
pub async fn directory_app(directory: &std::path::Path) -> (Router, AppState) {
    let source = DirectorySource::new(directory);
    let state = AppState::new(test_config(), Arc::new(source), may_2025());
    assert!(state.load_initial_month().await);

    (schoolmeal::routes::router(state.clone()), state)
}

pub struct TestResponse {
    pub status: StatusCode,
    pub location: Option<String>,
    pub cache_control: Option<String>,
    pub body: String,
}

impl TestResponse {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("Response is not JSON")
    }
}

pub async fn send(app: &Router, request: Request<Body>) -> TestResponse {
    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("Request failed");

    let status = response.status();
    let header_value = |name| {
        response
            .headers()
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned)
    };
    let location = header_value(header::LOCATION);
    let cache_control = header_value(header::CACHE_CONTROL);

    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Failed to read body")
        .to_bytes();

    TestResponse {
        status,
        location,
        cache_control,
        body: String::from_utf8(bytes.to_vec()).expect("Body is not UTF-8"),
    }
}

fn empty(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("valid request")
}

pub async fn get(app: &Router, uri: &str) -> TestResponse {
    send(app, empty("GET", uri)).await
}

pub async fn post(app: &Router, uri: &str) -> TestResponse {
    send(app, empty("POST", uri)).await
}

pub async fn put(app: &Router, uri: &str) -> TestResponse {
    send(app, empty("PUT", uri)).await
}

pub async fn delete(app: &Router, uri: &str) -> TestResponse {
    send(app, empty("DELETE", uri)).await
}

pub async fn post_form(app: &Router, uri: &str, form: &str) -> TestResponse {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form.to_owned()))
        .expect("valid request");

    send(app, request).await
}
