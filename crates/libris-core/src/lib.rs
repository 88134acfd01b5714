//! libris-core: book catalog core for the libris viewer
//!
//! This library provides:
//! - Book record model with stable ids and sentinel defaults
//! - Open Library subject fetching and normalization
//! - In-memory catalog store with search/genre filtering
//! - Grid pagination and "latest" carousel projections
//! - A session type that orders overlapping fetches (last request wins)
//!
//! Rendering is left to the embedding application, which also installs a
//! `tracing` subscriber if it wants the diagnostics.

pub mod catalog;
pub mod config;
pub mod cover;
pub mod dates;
pub mod domain;
pub mod error;
pub mod filter;
pub mod http;
pub mod projection;
pub mod sources;

// Re-export main types for convenience
pub use catalog::{
    CatalogError, CatalogSession, CatalogSnapshot, CatalogStore, FetchOutcome, FetchTicket,
    PageView,
};
pub use config::{CatalogConfig, ConfigError, LibrisConfig, SourceConfig};
pub use cover::CoverError;
pub use domain::{BookId, BookPatch, BookRecord, NewBook};
pub use error::LibrisError;
pub use filter::CatalogFilter;
pub use projection::{latest, page, PageSlice, LATEST_COUNT};
pub use sources::{DateStyle, OpenLibrarySource, SourceError, SubjectSource};

/// Returns the version of libris-core
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
