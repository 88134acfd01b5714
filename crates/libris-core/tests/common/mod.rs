//! Shared test helpers: fixture loading and a local fixture server

#![allow(dead_code)]

use std::collections::HashMap;
use std::path::PathBuf;

use axum::extract::{Path, Query};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use libris_core::BookRecord;

/// Get the path to a fixture file
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("test_fixtures")
        .join(name)
}

/// Load a fixture file as a string
pub fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(fixture_path(name))
        .unwrap_or_else(|_| panic!("Failed to load fixture: {}", name))
}

/// Load a mock API response fixture
pub fn load_response_fixture(name: &str) -> String {
    load_fixture(&format!("responses/{}", name))
}

/// Route library logs to the test harness output.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("libris_core=debug")
        .with_test_writer()
        .try_init();
}

/// `count` records titled "Book 0", "Book 1", ... by "Author 0", ...
pub fn numbered_books(count: usize) -> Vec<BookRecord> {
    (0..count)
        .map(|i| BookRecord::new(format!("Book {}", i)).with_author(format!("Author {}", i)))
        .collect()
}

/// Serve the subject fixtures on an ephemeral port. Returns the base URL.
///
/// - `/subjects/love.json`: 15 works
/// - `/subjects/empty.json`: `works: []`
/// - `/subjects/no_works.json`: no `works` key
/// - `/subjects/broken.json`: HTML instead of JSON
/// - anything else: 404
///
/// Requests without a `limit` query parameter get a 400.
pub async fn spawn_fixture_server() -> String {
    let app = Router::new().route("/subjects/{file}", get(subject_handler));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

async fn subject_handler(
    Path(file): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if !params.contains_key("limit") {
        return (StatusCode::BAD_REQUEST, "missing limit").into_response();
    }

    let fixture = match file.as_str() {
        "love.json" => "subject_love.json",
        "empty.json" => "subject_empty.json",
        "no_works.json" => "subject_no_works.json",
        "broken.json" => return (StatusCode::OK, "<html>not json</html>").into_response(),
        _ => return StatusCode::NOT_FOUND.into_response(),
    };

    (
        [(header::CONTENT_TYPE, "application/json")],
        load_response_fixture(fixture),
    )
        .into_response()
}
