//! "Latest books" carousel.

use std::cmp::Reverse;

use crate::dates::parse_date;
use crate::domain::BookRecord;

/// Number of books shown in the carousel.
pub const LATEST_COUNT: usize = 3;

/// The `n` most recent books, newest first.
///
/// Dates are parsed best-effort; books whose date cannot be parsed sort
/// after every dated book and keep their relative order.
pub fn latest<'a, I>(books: I, n: usize) -> Vec<&'a BookRecord>
where
    I: IntoIterator<Item = &'a BookRecord>,
{
    let mut sorted: Vec<&BookRecord> = books.into_iter().collect();
    sorted.sort_by_cached_key(|book| Reverse(parse_date(&book.date)));
    sorted.truncate(n);
    sorted
}
