//! Error types

mod field;
mod load;

pub use field::*;
pub use load::*;
