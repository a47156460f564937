use thiserror::Error;

use crate::error::FrameworkError;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Invalid password!")]
    InvalidPassword,
    #[error("Please fill all required fields: {0}")]
    MissingField(&'static str),
    #[error("Product not found: {0}")]
    ProductNotFound(String),
    #[error("Product already exists: {0}")]
    DuplicateProduct(String),
    #[error(transparent)]
    Framework(#[from] FrameworkError),
}
