//! Thin reqwest wrapper used by catalog sources

pub mod native;

pub use native::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HttpError {
    #[error("Request failed: {message}")]
    RequestFailed { message: String },
    #[error("Invalid URL: {url}")]
    InvalidUrl { url: String },
    #[error("Request timed out")]
    Timeout,
    #[error("Rate limited")]
    RateLimited,
    #[error("Could not read response body: {message}")]
    Body { message: String },
}

/// Status and body of a completed request.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
