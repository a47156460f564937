use crate::domain::Product;

#[derive(Debug, Clone)]
pub enum CatalogAction {
    Add(Product),
    /// Replaces the product carrying the same id.
    Update(Product),
    Delete(String),
}

/// Results from CatalogActions - variants match 1:1 with CatalogAction
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogActionResult {
    Add(Product),
    Update(Product),
    /// The removed product
    Delete(Product),
}
