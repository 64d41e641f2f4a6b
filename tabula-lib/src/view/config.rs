//! View configuration

use std::num::NonZeroUsize;

use serde::Deserialize;
use serde::Serialize;

use super::filter::FilterMode;
use super::page::DEFAULT_PAGE_SIZE;
use super::sort::SortState;

/// Defaults a host applies to the views it mounts.
///
/// # Example
///
/// ```
/// use std::num::NonZeroUsize;
/// use tabula_lib::view::{SortState, ViewConfig};
///
/// let config = ViewConfig::default()
///     .with_page_size(NonZeroUsize::new(50).unwrap())
///     .with_initial_sort(SortState::desc("date"));
/// assert_eq!(config.page_size.get(), 50);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Rows per page.
    ///
    /// Default: 20
    pub page_size: NonZeroUsize,

    /// Sort applied when a view mounts.
    ///
    /// Default: none (records keep the order they were fetched in)
    pub initial_sort: Option<SortState>,

    /// How filter queries match rows.
    ///
    /// Default: substring
    pub filter_mode: FilterMode,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            initial_sort: None,
            filter_mode: FilterMode::Contains,
        }
    }
}

impl ViewConfig {
    /// Creates a new view config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the page size.
    pub fn with_page_size(mut self, page_size: NonZeroUsize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Sets the initial sort.
    pub fn with_initial_sort(mut self, sort: SortState) -> Self {
        self.initial_sort = Some(sort);
        self
    }

    /// Sets the filter mode.
    pub fn with_filter_mode(mut self, mode: FilterMode) -> Self {
        self.filter_mode = mode;
        self
    }
}
