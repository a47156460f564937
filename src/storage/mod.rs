//! Persistence: a string key-value backend and the typed repository over it.

mod backend;
mod repository;

pub use backend::*;
pub use repository::*;
