//! Cart record: add, quantity changes and removal under stock limits.

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;
