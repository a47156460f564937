use thiserror::Error;

use crate::error::FrameworkError;

#[derive(Debug, Error)]
pub enum CartError {
    #[error("Product not in cart: {0}")]
    ProductNotFound(String),
    #[error("{0} is out of stock")]
    OutOfStock(String),
    #[error("Cannot add more items. Stock limit reached! ({product_id}: requested {requested}, available {available})")]
    StockLimit {
        product_id: String,
        requested: u32,
        available: u32,
    },
    #[error(transparent)]
    Framework(#[from] FrameworkError),
}
