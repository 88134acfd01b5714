//! Common traits for catalog sources

use std::future::Future;

use crate::domain::BookRecord;
use crate::http::HttpError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error(transparent)]
    Http(HttpError),
    #[error("Unexpected status {0}")]
    Status(u16),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Rate limited")]
    RateLimit,
    #[error("Invalid query: {0}")]
    InvalidQuery(String),
}

impl From<HttpError> for SourceError {
    fn from(e: HttpError) -> Self {
        match e {
            HttpError::RateLimited => SourceError::RateLimit,
            other => SourceError::Http(other),
        }
    }
}

/// Metadata about a source
#[derive(Debug, Clone)]
pub struct SourceMetadata {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub base_url: &'static str,
    pub rate_limit_per_second: f32,
    pub requires_api_key: bool,
}

/// A catalog that can list books for a subject.
///
/// Implementations never fail: transport and parse problems are logged and
/// surface as an empty list.
pub trait SubjectSource {
    fn fetch_by_subject(&self, subject: &str) -> impl Future<Output = Vec<BookRecord>> + Send;
}
