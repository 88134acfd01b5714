//! Search and genre filter for the catalog.
//!
//! A book matches when the query is a case-insensitive substring of its
//! title or author AND, if a genre is selected, the genre is a
//! case-insensitive substring of the book's genre. Blank criteria match
//! everything.

use crate::domain::BookRecord;

/// Active search criteria.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogFilter {
    /// Text as typed by the user
    query: String,
    /// Selected genre as chosen by the user
    genre: String,
    query_needle: String,
    genre_needle: String,
}

impl CatalogFilter {
    pub fn new(query: &str, genre: &str) -> Self {
        Self {
            query: query.to_string(),
            genre: genre.to_string(),
            query_needle: needle(query),
            genre_needle: needle(genre),
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn genre(&self) -> &str {
        &self.genre
    }

    /// Whether this filter is empty (matches everything).
    pub fn is_empty(&self) -> bool {
        self.query_needle.is_empty() && self.genre_needle.is_empty()
    }

    pub fn matches(&self, book: &BookRecord) -> bool {
        self.matches_query(book) && self.matches_genre(book)
    }

    fn matches_query(&self, book: &BookRecord) -> bool {
        self.query_needle.is_empty()
            || book.title.to_lowercase().contains(&self.query_needle)
            || book.author.to_lowercase().contains(&self.query_needle)
    }

    fn matches_genre(&self, book: &BookRecord) -> bool {
        self.genre_needle.is_empty() || book.genre.to_lowercase().contains(&self.genre_needle)
    }
}

fn needle(input: &str) -> String {
    input.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(title: &str, author: &str, genre: &str) -> BookRecord {
        BookRecord::new(title).with_author(author).with_genre(genre)
    }

    #[test]
    fn empty_filter_matches_everything() {
        let filter = CatalogFilter::new("", "  ");
        assert!(filter.is_empty());
        assert!(filter.matches(&book("", "", "")));
    }

    #[test]
    fn query_matches_title_or_author() {
        let filter = CatalogFilter::new("AUSTEN", "");
        assert!(filter.matches(&book("Emma", "Jane Austen", "love")));
        assert!(filter.matches(&book("Austenland", "Shannon Hale", "love")));
        assert!(!filter.matches(&book("Dracula", "Bram Stoker", "horror")));
    }

    #[test]
    fn genre_is_intersected_with_query() {
        let filter = CatalogFilter::new("emma", "Love");
        assert!(filter.matches(&book("Emma", "Jane Austen", "love")));
        assert!(!filter.matches(&book("Emma", "Jane Austen", "Satire")));
        assert!(!filter.matches(&book("Dracula", "Bram Stoker", "love")));
    }

    #[test]
    fn genre_uses_substring_match() {
        let filter = CatalogFilter::new("", "fiction");
        assert!(filter.matches(&book("Dune", "Frank Herbert", "Science Fiction")));
        assert!(!filter.matches(&book("Dune", "Frank Herbert", "Poetry")));
    }

    #[test]
    fn keeps_raw_input() {
        let filter = CatalogFilter::new(" Emma ", "Love");
        assert_eq!(filter.query(), " Emma ");
        assert_eq!(filter.genre(), "Love");
    }
}
