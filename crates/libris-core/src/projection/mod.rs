//! Views derived from the filtered projection: grid pages and the carousel.

pub mod carousel;
pub mod pagination;

pub use carousel::{latest, LATEST_COUNT};
pub use pagination::{page, page_count, PageSlice};
