//! Drives an order through its delivery lifecycle on timers.

pub mod error;
pub mod schedule;
pub mod simulator;

pub use error::*;
pub use schedule::*;
pub use simulator::*;
