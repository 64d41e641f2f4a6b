//! Tabular view engine.
//!
//! A [`TableView`] derives a filtered, sorted, paginated page from a record
//! set pushed in by its host:
//! - [`Column`] describes what each column shows and whether it sorts
//! - [`sort`] orders the whole set on one raw field, stably
//! - [`page`] windows the ordered set into fixed-size pages
//! - [`filter`] narrows the set on displayed cell text
//! - [`render`] turns the current page into header, row and footer cells
//!
//! Nothing here performs I/O.

mod column;
mod config;
pub mod filter;
pub mod page;
pub mod render;
pub mod sort;
mod table;

pub use column::{Alignment, Column, duplicate_ids, find_column};
pub use config::ViewConfig;
pub use filter::{Filter, FilterMode};
pub use page::{Page, PageState};
pub use render::{HeaderCell, PageFooter, RenderedRow, RenderedTable};
pub use sort::{Direction, SortState};
pub use table::TableView;
