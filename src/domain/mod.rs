pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod loyalty;
pub mod order;
pub mod pricing;
pub mod product;
pub mod tracking;

pub use cart::*;
pub use catalog::*;
pub use checkout::*;
pub use loyalty::*;
pub use order::*;
pub use pricing::*;
pub use product::*;
pub use tracking::*;
