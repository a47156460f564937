//! Catalog record: the admin-edited product list that overrides the seed.

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;
