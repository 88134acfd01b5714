//! Catalog session: the store plus the source that fills it.
//!
//! Every user action goes through here. Fetches never hold the store lock
//! while waiting on the network, so a second genre change can start before
//! the first one finishes; fetch tickets make sure only the most recent
//! fetch lands.

use std::path::Path;

use serde::Serialize;
use tokio::sync::{Mutex, MutexGuard};

use super::store::{CatalogError, CatalogStore};
use crate::config::{CatalogConfig, LibrisConfig};
use crate::cover::data_uri_from_file;
use crate::domain::{BookId, BookPatch, BookRecord, NewBook};
use crate::error::Result;
use crate::sources::{OpenLibrarySource, SubjectSource};

/// What happened to a fetch's results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The catalog was replaced with `count` books
    Applied { count: usize },
    /// A newer fetch started meanwhile; results were dropped
    Stale,
}

/// Owned copy of everything the presentation layer draws.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogSnapshot {
    /// Current grid page
    pub books: Vec<BookRecord>,
    /// Carousel, newest first
    pub latest: Vec<BookRecord>,
    pub page: usize,
    pub has_more: bool,
    /// Books matching the active filter
    pub total: usize,
}

pub struct CatalogSession<S> {
    store: Mutex<CatalogStore>,
    source: S,
    default_subject: String,
    latest_count: usize,
}

impl CatalogSession<OpenLibrarySource> {
    /// Session backed by Open Library.
    pub fn from_config(config: &LibrisConfig) -> Result<Self> {
        config.validate()?;
        let source = OpenLibrarySource::new(&config.source)?;
        Ok(Self::new(source, &config.catalog))
    }
}

impl<S: SubjectSource> CatalogSession<S> {
    pub fn new(source: S, config: &CatalogConfig) -> Self {
        Self {
            store: Mutex::new(CatalogStore::new(config.page_size)),
            source,
            default_subject: config.default_subject.clone(),
            latest_count: config.latest_count,
        }
    }

    /// Fetch the default subject.
    pub async fn initial_load(&self) -> FetchOutcome {
        let subject = self.default_subject.clone();
        self.fetch_subject(&subject).await
    }

    /// React to the genre selector.
    ///
    /// A non-empty genre fetches that subject and replaces the catalog. An
    /// empty one clears the genre filter, showing the whole catalog again
    /// under the current search text; nothing is fetched and `None` is
    /// returned. Any genre fetch still in flight goes stale.
    pub async fn select_genre(&self, genre: &str) -> Option<FetchOutcome> {
        if genre.trim().is_empty() {
            let mut store = self.store.lock().await;
            store.begin_fetch();
            let query = store.query().to_string();
            store.set_filter(&query, "");
            return None;
        }
        Some(self.fetch_subject(genre).await)
    }

    async fn fetch_subject(&self, subject: &str) -> FetchOutcome {
        let ticket = self.store.lock().await.begin_fetch();

        let records = self.source.fetch_by_subject(subject).await;
        let count = records.len();

        if self.store.lock().await.complete_fetch(ticket, records) {
            tracing::info!("Loaded {} books for {:?}", count, subject);
            FetchOutcome::Applied { count }
        } else {
            FetchOutcome::Stale
        }
    }

    /// React to the search box. Keeps the selected genre.
    pub async fn search(&self, query: &str) {
        let mut store = self.store.lock().await;
        let genre = store.genre().to_string();
        store.set_filter(query, &genre);
    }

    pub async fn add_book(&self, book: NewBook) -> BookId {
        self.store.lock().await.add(book.into_record())
    }

    /// Add a book whose cover is a local image file.
    ///
    /// The file is fully read and encoded before the record is created.
    pub async fn add_book_with_cover(
        &self,
        mut book: NewBook,
        cover: impl AsRef<Path>,
    ) -> Result<BookId> {
        book.image = data_uri_from_file(cover).await?;
        Ok(self.add_book(book).await)
    }

    pub async fn edit(
        &self,
        id: BookId,
        patch: &BookPatch,
    ) -> std::result::Result<(), CatalogError> {
        self.store.lock().await.edit(id, patch)
    }

    pub async fn delete(
        &self,
        id: BookId,
    ) -> std::result::Result<BookRecord, CatalogError> {
        self.store.lock().await.delete(id)
    }

    pub async fn load_more(&self) -> bool {
        self.store.lock().await.load_more()
    }

    pub async fn snapshot(&self) -> CatalogSnapshot {
        let store = self.store.lock().await;
        let view = store.view();
        CatalogSnapshot {
            books: view.books.into_iter().cloned().collect(),
            latest: store
                .latest(self.latest_count)
                .into_iter()
                .cloned()
                .collect(),
            page: view.page,
            has_more: view.has_more,
            total: view.total,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Direct access to the store, for reads the snapshot does not cover.
    pub async fn store(&self) -> MutexGuard<'_, CatalogStore> {
        self.store.lock().await
    }
}
