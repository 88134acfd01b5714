use crate::domain::{BookId, BookPatch, BookRecord};
use crate::filter::CatalogFilter;
use crate::projection::{carousel, pagination};

/// Errors from the catalog store.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Book not found: {0}")]
    NotFound(BookId),

    #[error("Index {index} out of range for {len} visible books")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Identifies one fetch. Only the most recently issued ticket may replace
/// the catalog; results for older tickets are stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
}

/// The grid page currently on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView<'a> {
    pub books: Vec<&'a BookRecord>,
    /// 1-based
    pub page: usize,
    /// Whether "load more" is available
    pub has_more: bool,
    /// Size of the filtered projection
    pub total: usize,
}

/// In-memory book catalog.
///
/// Owns the authoritative list and derives the filtered projection from it.
/// The projection holds positions into the authoritative list and is
/// rebuilt whenever the list or the filter changes, so it can never point at
/// a record that is gone. Callers address records by [`BookId`].
#[derive(Debug, Clone)]
pub struct CatalogStore {
    books: Vec<BookRecord>,
    filtered: Vec<usize>,
    filter: CatalogFilter,
    page_size: usize,
    current_page: usize,
    fetch_generation: u64,
}

impl CatalogStore {
    pub fn new(page_size: usize) -> Self {
        Self {
            books: Vec::new(),
            filtered: Vec::new(),
            filter: CatalogFilter::default(),
            page_size,
            current_page: 1,
            fetch_generation: 0,
        }
    }

    /// Replace the whole catalog. Clears the search and genre filter.
    pub fn load(&mut self, records: Vec<BookRecord>) {
        tracing::debug!("Loading {} books into catalog", records.len());
        self.books = records;
        self.filter = CatalogFilter::default();
        self.refilter();
    }

    /// Insert a record at the front of the catalog.
    pub fn add(&mut self, record: BookRecord) -> BookId {
        let id = record.id;
        tracing::debug!("Adding book {} ({:?})", id, record.title);
        self.books.insert(0, record);
        self.refilter();
        id
    }

    /// Apply the non-empty fields of `patch` to a record in place.
    ///
    /// Filter membership is left alone until the next [`set_filter`], so
    /// the record stays where the user last saw it.
    ///
    /// [`set_filter`]: CatalogStore::set_filter
    pub fn edit(&mut self, id: BookId, patch: &BookPatch) -> Result<(), CatalogError> {
        let book = self
            .books
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or(CatalogError::NotFound(id))?;
        if book.apply(patch) {
            tracing::debug!("Edited book {}", id);
        }
        Ok(())
    }

    /// Edit the record at a position of the filtered projection.
    pub fn edit_at(&mut self, index: usize, patch: &BookPatch) -> Result<BookId, CatalogError> {
        let id = self.id_at(index)?;
        self.edit(id, patch)?;
        Ok(id)
    }

    /// Remove a record from the catalog.
    pub fn delete(&mut self, id: BookId) -> Result<BookRecord, CatalogError> {
        let position = self
            .books
            .iter()
            .position(|b| b.id == id)
            .ok_or(CatalogError::NotFound(id))?;
        let removed = self.books.remove(position);
        tracing::debug!("Deleted book {} ({:?})", id, removed.title);
        self.refilter();
        Ok(removed)
    }

    /// Remove the record at a position of the filtered projection.
    pub fn delete_at(&mut self, index: usize) -> Result<BookRecord, CatalogError> {
        let id = self.id_at(index)?;
        self.delete(id)
    }

    /// Filter by search text (title or author) and genre. Blank values match
    /// everything.
    pub fn set_filter(&mut self, query: &str, genre: &str) {
        self.filter = CatalogFilter::new(query, genre);
        self.refilter();
    }

    fn refilter(&mut self) {
        self.filtered = if self.filter.is_empty() {
            (0..self.books.len()).collect()
        } else {
            self.books
                .iter()
                .enumerate()
                .filter(|(_, book)| self.filter.matches(book))
                .map(|(i, _)| i)
                .collect()
        };
        self.current_page = 1;
    }

    // ===== Reads =====

    /// The authoritative list.
    pub fn records(&self) -> &[BookRecord] {
        &self.books
    }

    /// The filtered projection, in catalog order.
    pub fn filtered(&self) -> impl Iterator<Item = &BookRecord> + '_ {
        self.filtered.iter().map(|&i| &self.books[i])
    }

    pub fn get(&self, id: BookId) -> Option<&BookRecord> {
        self.books.iter().find(|b| b.id == id)
    }

    /// Id of the record at a position of the filtered projection.
    pub fn id_at(&self, index: usize) -> Result<BookId, CatalogError> {
        self.filtered
            .get(index)
            .map(|&i| self.books[i].id)
            .ok_or(CatalogError::IndexOutOfRange {
                index,
                len: self.filtered.len(),
            })
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    pub fn query(&self) -> &str {
        self.filter.query()
    }

    pub fn genre(&self) -> &str {
        self.filter.genre()
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    // ===== Projections =====

    /// The grid page currently shown.
    pub fn view(&self) -> PageView<'_> {
        let slice = pagination::page(&self.filtered, self.current_page, self.page_size);
        PageView {
            books: slice.items.iter().map(|&i| &self.books[i]).collect(),
            page: self.current_page,
            has_more: slice.has_more,
            total: self.filtered.len(),
        }
    }

    /// Advance to the next page. Does nothing when no books remain.
    pub fn load_more(&mut self) -> bool {
        if !self.view().has_more {
            return false;
        }
        self.current_page += 1;
        true
    }

    /// The `n` most recent books of the filtered projection.
    pub fn latest(&self, n: usize) -> Vec<&BookRecord> {
        carousel::latest(self.filtered(), n)
    }

    // ===== Fetch ordering =====

    /// Start a fetch. Any ticket issued earlier becomes stale.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.fetch_generation += 1;
        FetchTicket {
            generation: self.fetch_generation,
        }
    }

    pub fn is_current(&self, ticket: &FetchTicket) -> bool {
        ticket.generation == self.fetch_generation
    }

    /// Load fetched records if `ticket` is still the latest fetch.
    /// Returns false and leaves the catalog untouched otherwise.
    pub fn complete_fetch(&mut self, ticket: FetchTicket, records: Vec<BookRecord>) -> bool {
        if !self.is_current(&ticket) {
            tracing::debug!(
                "Discarding {} books from stale fetch {} (current {})",
                records.len(),
                ticket.generation,
                self.fetch_generation
            );
            return false;
        }
        self.load(records);
        true
    }
}
