//! Grid pagination over the filtered projection.

/// One page of a projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSlice<'a, T> {
    pub items: &'a [T],
    /// True iff this page is full and more items follow it
    pub has_more: bool,
}

/// Slice out page `page_number` (1-based) of `items`.
///
/// Page 0 is treated as page 1. Pages past the end, and a page size of 0,
/// give an empty slice; the slice is never longer than `page_size`.
pub fn page<T>(items: &[T], page_number: usize, page_size: usize) -> PageSlice<'_, T> {
    let start = page_number
        .max(1)
        .saturating_sub(1)
        .saturating_mul(page_size)
        .min(items.len());
    let end = start.saturating_add(page_size).min(items.len());
    let slice = &items[start..end];

    PageSlice {
        items: slice,
        has_more: page_size > 0 && slice.len() == page_size && end < items.len(),
    }
}

/// Number of pages needed for `len` items; at least 1.
pub fn page_count(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 1;
    }
    len.div_ceil(page_size).max(1)
}
