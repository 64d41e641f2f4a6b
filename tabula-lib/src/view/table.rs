//! TableView: columns, filter, sort and pagination over one record set.

use std::fmt;
use std::num::NonZeroUsize;

use log::debug;
use log::warn;

use super::column::Column;
use super::column::duplicate_ids;
use super::column::find_column;
use super::config::ViewConfig;
use super::filter::Filter;
use super::filter::filter_indices;
use super::page::Page;
use super::page::PageState;
use super::page::page_window;
use super::page::paginate;
use super::render::RenderedTable;
use super::sort::SortState;
use super::sort::is_valid_sort;
use super::sort::sort_positions;
use crate::model::RowKey;
use crate::model::TableRow;

type RowCallback<R> = Box<dyn FnMut(&R) + Send>;

/// A sortable, paginated view over a record set supplied from outside.
///
/// `TableView<R>` owns:
/// - The record set, replaced wholesale on every fetch
/// - Column definitions
/// - One optional sort key and the current page window
/// - An optional text filter
///
/// Every operation is synchronous and local; the view never fetches or
/// mutates records.
///
/// # Example
///
/// ```
/// use tabula_lib::model::Record;
/// use tabula_lib::view::{Column, SortState, TableView};
///
/// let records = vec![
///     Record::new().set("name", "c").set("amount", 5i64),
///     Record::new().set("name", "a").set("amount", 5i64),
///     Record::new().set("name", "b").set("amount", 1i64),
/// ];
/// let view = TableView::new(vec![Column::field("name", "Name"), Column::field("amount", "Amount")])
///     .with_records(records)
///     .with_initial_sort(SortState::asc("amount"));
///
/// let names: Vec<String> = view.page().rows().iter().filter_map(|r| r.key()).collect();
/// assert_eq!(names, ["b", "c", "a"]);
/// ```
pub struct TableView<R> {
    records: Vec<R>,
    columns: Vec<Column<R>>,
    sort: Option<SortState>,
    page: PageState,
    filter: Option<Filter>,
    on_row_click: Option<RowCallback<R>>,
    /// Positions into `records` after filtering and sorting.
    visible: Vec<usize>,
}

impl<R: TableRow> TableView<R> {
    /// Create an empty view with column definitions.
    pub fn new(columns: Vec<Column<R>>) -> Self {
        let duplicates = duplicate_ids(&columns);
        if !duplicates.is_empty() {
            warn!(
                "Duplicate column ids {:?}; the first column with each id is used for sorting",
                duplicates
            );
        }
        Self {
            records: Vec::new(),
            columns,
            sort: None,
            page: PageState::default(),
            filter: None,
            on_row_click: None,
            visible: Vec::new(),
        }
    }

    /// Create a view from a host's configuration.
    pub fn with_config(columns: Vec<Column<R>>, config: &ViewConfig) -> Self {
        let view = Self::new(columns).with_page_size(config.page_size);
        match &config.initial_sort {
            Some(sort) => view.with_initial_sort(sort.clone()),
            None => view,
        }
    }

    /// Set the initial records.
    pub fn with_records(mut self, records: Vec<R>) -> Self {
        self.set_records(records);
        self
    }

    /// Set the initial sort.
    ///
    /// A sort naming no sortable column is dropped.
    pub fn with_initial_sort(mut self, sort: SortState) -> Self {
        self.set_sort(Some(sort));
        self
    }

    /// Set the page size.
    pub fn with_page_size(mut self, page_size: NonZeroUsize) -> Self {
        self.set_page_size(page_size);
        self
    }

    /// Set the row activation handler.
    pub fn on_row_click(mut self, handler: impl FnMut(&R) + Send + 'static) -> Self {
        self.on_row_click = Some(Box::new(handler));
        self
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn columns(&self) -> &[Column<R>] {
        &self.columns
    }

    /// The record set as supplied, unsorted.
    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn sort_state(&self) -> Option<&SortState> {
        self.sort.as_ref()
    }

    pub fn page_state(&self) -> PageState {
        self.page
    }

    pub fn filter(&self) -> Option<&Filter> {
        self.filter.as_ref()
    }

    /// Number of records supplied.
    pub fn total_len(&self) -> usize {
        self.records.len()
    }

    /// Number of records left after filtering; the paginated total.
    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    /// Every visible record in display order, across all pages.
    pub fn sorted_records(&self) -> Vec<&R> {
        self.visible.iter().map(|&i| &self.records[i]).collect()
    }

    /// The current page.
    pub fn page(&self) -> Page<'_, R> {
        paginate(&self.sorted_records(), self.page)
    }

    /// Identity of the row shown at `position` on the current page.
    pub fn row_key(&self, position: usize) -> Option<RowKey> {
        let index = self.record_index(position)?;
        Some(RowKey::of(&self.records[index], index))
    }

    /// Build the render model of the current page.
    pub fn render(&self) -> RenderedTable {
        RenderedTable::from_view(self)
    }

    // -------------------------------------------------------------------------
    // Transitions
    // -------------------------------------------------------------------------

    /// Replace the record set.
    ///
    /// The sort and filter stay; the page index is clamped to the new count.
    pub fn set_records(&mut self, records: Vec<R>) {
        debug!("Records replaced: {} -> {}", self.records.len(), records.len());
        self.records = records;
        self.refresh();
    }

    /// Handle activation of a column header.
    ///
    /// Activating the sorted column flips its direction and keeps the page.
    /// Activating another sortable column sorts it ascending from the first
    /// page. Unknown or unsortable columns are ignored and return `None`.
    pub fn click_header(&mut self, column_id: &str) -> Option<SortState> {
        if !find_column(&self.columns, column_id).is_some_and(Column::is_sortable) {
            debug!("Header '{}' is not sortable, ignoring", column_id);
            return None;
        }

        let new_sort = match &self.sort {
            Some(sort) if sort.by == column_id => sort.toggled(),
            _ => {
                self.page = self.page.with_page_index(0);
                SortState::asc(column_id)
            }
        };
        debug!("Sort: {:?} {:?}", new_sort.by, new_sort.direction);
        self.sort = Some(new_sort.clone());
        self.refresh();
        Some(new_sort)
    }

    /// Set or clear the sort directly.
    ///
    /// Returns `false` and leaves the view unchanged when `sort` names no
    /// sortable column.
    pub fn set_sort(&mut self, sort: Option<SortState>) -> bool {
        if let Some(requested) = &sort {
            if !is_valid_sort(&self.columns, requested) {
                warn!("Ignoring sort on unknown or unsortable column '{}'", requested.by);
                return false;
            }
        }
        self.sort = sort;
        self.refresh();
        true
    }

    /// Go to a page, clamped to the last page. Returns the page shown.
    pub fn set_page(&mut self, page_index: usize) -> usize {
        self.page = self
            .page
            .with_page_index(page_index)
            .clamp(self.visible.len());
        self.page.page_index
    }

    /// Advance one page. Returns `false` on the last page.
    pub fn next_page(&mut self) -> bool {
        let current = self.page.page_index;
        self.set_page(current.saturating_add(1)) != current
    }

    /// Go back one page. Returns `false` on the first page.
    pub fn previous_page(&mut self) -> bool {
        let current = self.page.page_index;
        current > 0 && self.set_page(current - 1) != current
    }

    /// Change the page size, returning to the first page.
    pub fn set_page_size(&mut self, page_size: NonZeroUsize) {
        self.page = self.page.with_page_size(page_size);
    }

    /// Set or clear the filter. The page index is clamped to the matches.
    pub fn set_filter(&mut self, filter: Option<Filter>) {
        self.filter = filter.filter(|f| !f.is_empty());
        self.refresh();
    }

    /// Activate the row at `position` on the current page.
    ///
    /// Calls the row click handler synchronously. Returns `false` when no
    /// row is shown there.
    pub fn activate_row(&mut self, position: usize) -> bool {
        let Some(index) = self.record_index(position) else {
            return false;
        };
        if let Some(handler) = self.on_row_click.as_mut() {
            handler(&self.records[index]);
        }
        true
    }

    // -------------------------------------------------------------------------
    // Internal
    // -------------------------------------------------------------------------

    fn record_index(&self, position: usize) -> Option<usize> {
        let window = page_window(self.visible.len(), self.page);
        let at = window.start.checked_add(position)?;
        if at >= window.end {
            return None;
        }
        Some(self.visible[at])
    }

    /// Recompute the visible order and pull the page back in range.
    fn refresh(&mut self) {
        let positions = match &self.filter {
            Some(filter) => filter_indices(&self.records, &self.columns, filter),
            None => (0..self.records.len()).collect(),
        };
        self.visible = match &self.sort {
            Some(sort) => sort_positions(&self.records, positions, &self.columns, sort),
            None => positions,
        };
        self.page = self.page.clamp(self.visible.len());
    }
}

impl<R> fmt::Debug for TableView<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableView")
            .field("records", &self.records.len())
            .field("columns", &self.columns)
            .field("sort", &self.sort)
            .field("page", &self.page)
            .field("filter", &self.filter)
            .field("visible", &self.visible.len())
            .finish()
    }
}
