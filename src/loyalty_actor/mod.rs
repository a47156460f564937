//! Loyalty profile record: points, tier promotion and reward claims.

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;
