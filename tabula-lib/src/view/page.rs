//! Pagination engine: fixed-size windows over a sorted sequence.

use std::num::NonZeroUsize;
use std::ops::Range;

use serde::Deserialize;
use serde::Serialize;

/// Page size used when none is configured.
pub const DEFAULT_PAGE_SIZE: NonZeroUsize = match NonZeroUsize::new(20) {
    Some(size) => size,
    None => unreachable!(),
};

/// Current page window of a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageState {
    /// Zero-based page index.
    pub page_index: usize,
    pub page_size: NonZeroUsize,
}

impl Default for PageState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl PageState {
    /// First page with the given size.
    pub fn new(page_size: NonZeroUsize) -> Self {
        Self {
            page_index: 0,
            page_size,
        }
    }

    /// Same size, different page.
    pub fn with_page_index(self, page_index: usize) -> Self {
        Self { page_index, ..self }
    }

    /// Changes the page size and returns to the first page.
    pub fn with_page_size(self, page_size: NonZeroUsize) -> Self {
        Self::new(page_size)
    }

    /// Moves the page index back inside a sequence of `len` items.
    pub fn clamp(self, len: usize) -> Self {
        let last = last_page_index(len, self.page_size);
        Self {
            page_index: self.page_index.min(last),
            ..self
        }
    }

    /// Index of the first item on this page.
    pub fn offset(&self) -> usize {
        self.page_index.saturating_mul(self.page_size.get())
    }
}

/// Number of pages needed for `len` items; zero for an empty sequence.
pub fn page_count(len: usize, page_size: NonZeroUsize) -> usize {
    len.div_ceil(page_size.get())
}

/// Highest valid page index for `len` items, never below zero.
pub fn last_page_index(len: usize, page_size: NonZeroUsize) -> usize {
    page_count(len, page_size).saturating_sub(1)
}

/// Item range covered by `state` in a sequence of `len` items.
///
/// The window is `[offset, offset + size)` cut at `len`. A page past the
/// end yields an empty range.
pub fn page_window(len: usize, state: PageState) -> Range<usize> {
    let start = state.offset();
    if start >= len {
        return len..len;
    }
    let end = start.saturating_add(state.page_size.get()).min(len);
    start..end
}

/// One page of an already sorted sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<'a, R> {
    rows: Vec<&'a R>,
    state: PageState,
    start: usize,
    total: usize,
}

impl<'a, R> Page<'a, R> {
    /// Returns the rows on this page.
    pub fn rows(&self) -> &[&'a R] {
        &self.rows
    }

    /// Consumes the page and returns its rows.
    pub fn into_rows(self) -> Vec<&'a R> {
        self.rows
    }

    pub fn page_index(&self) -> usize {
        self.state.page_index
    }

    pub fn page_size(&self) -> NonZeroUsize {
        self.state.page_size
    }

    /// Number of items across all pages.
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn page_count(&self) -> usize {
        page_count(self.total, self.state.page_size)
    }

    /// Returns the number of rows on this page.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if this page has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// One-based positions of the first and last row shown, if any.
    pub fn range(&self) -> Option<(usize, usize)> {
        if self.rows.is_empty() {
            return None;
        }
        Some((self.start + 1, self.start + self.rows.len()))
    }

    pub fn has_previous(&self) -> bool {
        self.state.page_index > 0 && self.total > 0
    }

    pub fn has_next(&self) -> bool {
        self.state.page_index < self.page_count().saturating_sub(1)
    }
}

/// Cuts the page described by `state` out of `sorted`.
pub fn paginate<'a, R>(sorted: &[&'a R], state: PageState) -> Page<'a, R> {
    let window = page_window(sorted.len(), state);
    Page {
        start: window.start,
        rows: sorted[window].to_vec(),
        state,
        total: sorted.len(),
    }
}
