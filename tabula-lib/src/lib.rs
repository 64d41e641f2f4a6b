//! Tabular view engine for admin list pages
//!
//! List pages fetch a whole record set from the backend and hand it to a
//! [`view::TableView`], which sorts, filters and paginates it locally. The
//! [`cache`] keeps fetched sets per query until a write invalidates them,
//! and [`context::SessionContext`] carries session settings to every view.

pub mod cache;
pub mod context;
pub mod error;
pub mod model;
pub mod view;
