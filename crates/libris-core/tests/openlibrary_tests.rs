//! Open Library source tests against a local fixture server

mod common;

use common::{init_tracing, load_response_fixture, spawn_fixture_server};
use libris_core::cover::PLACEHOLDER_IMAGE;
use libris_core::domain::{NO_DESCRIPTION, UNKNOWN_AUTHOR};
use libris_core::sources::parse_subject_response;
use libris_core::{DateStyle, OpenLibrarySource, SourceConfig, SourceError, SubjectSource};

fn source_for(base_url: &str) -> OpenLibrarySource {
    let config = SourceConfig {
        base_url: base_url.to_string(),
        timeout_secs: 5,
        ..Default::default()
    };
    OpenLibrarySource::new(&config).unwrap()
}

// === Normalization of the love fixture ===

#[test]
fn test_fixture_normalization() {
    let books = parse_subject_response(
        &load_response_fixture("subject_love.json"),
        "love",
        DateStyle::PublishYear,
    )
    .unwrap();
    assert_eq!(books.len(), 15);

    assert_eq!(books[0].title, "Love Story 1");
    assert_eq!(books[0].author, "Jane Austen, Anonymous");
    assert_eq!(books[0].date, "1800");
    assert_eq!(books[0].genre, "love");
    assert_eq!(
        books[0].image,
        "https://covers.openlibrary.org/b/id/8000000-M.jpg"
    );
    assert_eq!(books[0].description, "Sentence number 1.");

    // created timestamp used when there is no publish year
    assert_eq!(books[3].date, "4/13/2013");
    assert_eq!(books[1].description, NO_DESCRIPTION);
}

#[test]
fn test_works_without_authors_are_unknown() {
    let books = parse_subject_response(
        &load_response_fixture("subject_love.json"),
        "love",
        DateStyle::PublishYear,
    )
    .unwrap();
    let unknown: Vec<&str> = books
        .iter()
        .filter(|b| b.author == UNKNOWN_AUTHOR)
        .map(|b| b.title.as_str())
        .collect();
    assert_eq!(unknown, ["Love Story 5", "Love Story 10", "Love Story 15"]);
}

#[test]
fn test_works_without_cover_use_placeholder() {
    let books = parse_subject_response(
        &load_response_fixture("subject_love.json"),
        "love",
        DateStyle::PublishYear,
    )
    .unwrap();
    let placeholders = books
        .iter()
        .filter(|b| b.image == PLACEHOLDER_IMAGE)
        .count();
    assert_eq!(placeholders, 5);
    assert!(books
        .iter()
        .filter(|b| b.image != PLACEHOLDER_IMAGE)
        .all(|b| b.image.starts_with("https://covers.openlibrary.org/b/id/")));
}

#[test]
fn test_ids_are_unique() {
    let books = parse_subject_response(
        &load_response_fixture("subject_love.json"),
        "love",
        DateStyle::PublishYear,
    )
    .unwrap();
    let mut ids: Vec<_> = books.iter().map(|b| b.id).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), books.len());
}

// === Over HTTP ===

#[tokio::test]
async fn test_fetch_by_subject() {
    init_tracing();
    let base = spawn_fixture_server().await;
    let books = source_for(&base).fetch_by_subject("Love").await;
    assert_eq!(books.len(), 15);
    assert_eq!(books[14].title, "Love Story 15");
}

#[tokio::test]
async fn test_empty_and_missing_works_return_empty() {
    init_tracing();
    let base = spawn_fixture_server().await;
    let source = source_for(&base);

    assert!(source.fetch_by_subject("empty").await.is_empty());
    assert!(source.fetch_by_subject("no works").await.is_empty());
    assert!(source
        .try_fetch_by_subject("no_works")
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_parse_failure_returns_empty() {
    init_tracing();
    let base = spawn_fixture_server().await;
    let source = source_for(&base);

    assert!(source.fetch_by_subject("broken").await.is_empty());
    assert!(matches!(
        source.try_fetch_by_subject("broken").await,
        Err(SourceError::Parse(_))
    ));
}

#[tokio::test]
async fn test_http_error_status_returns_empty() {
    init_tracing();
    let base = spawn_fixture_server().await;
    let source = source_for(&base);

    assert!(source.fetch_by_subject("unheard_of").await.is_empty());
    assert!(matches!(
        source.try_fetch_by_subject("unheard_of").await,
        Err(SourceError::Status(404))
    ));
}

#[tokio::test]
async fn test_unreachable_host_returns_empty() {
    init_tracing();
    let source = source_for("http://127.0.0.1:1");

    assert!(source.fetch_by_subject("love").await.is_empty());
    assert!(matches!(
        source.try_fetch_by_subject("love").await,
        Err(SourceError::Http(_))
    ));
}

#[tokio::test]
async fn test_blank_subject_is_rejected_without_request() {
    let source = source_for("http://127.0.0.1:1");
    assert!(matches!(
        source.try_fetch_by_subject("  ").await,
        Err(SourceError::InvalidQuery(_))
    ));
    assert!(source.fetch_by_subject("").await.is_empty());
}
