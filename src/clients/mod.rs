//! Typed clients over the record actors. `OrderClient` orchestrates the others.

#[macro_use]
mod macros;

mod cart_client;
mod catalog_client;
mod loyalty_client;
mod order_client;

pub use cart_client::*;
pub use catalog_client::*;
pub use loyalty_client::*;
pub use order_client::*;
