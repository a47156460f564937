//! Order records (current and last order), checkout validation and the
//! forward-only status transitions used by tracking.

mod actions;
pub mod checkout;
pub mod entity;
pub mod error;

pub use actions::*;
pub use checkout::*;
pub use entity::*;
pub use error::*;
