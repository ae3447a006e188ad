//! Game catalog construction.
//!
//! Turns the unordered package records of an installation registry into a
//! display-ready [`GameCatalog`]: games only, one entry per product id,
//! ascending by product id.

pub mod builder;
pub mod types;

pub use builder::build;
pub use types::{GameCatalog, GameCatalogEntry};
