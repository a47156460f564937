use crate::domain::{CartItem, Product};

/// Custom actions for the cart record.
#[derive(Debug, Clone)]
pub enum CartAction {
    /// Adds one unit of the product, or a new line with quantity 1.
    ///
    /// # Errors
    /// Fails when the product is out of stock or the line is already at stock.
    Add(Product),
    /// Sets a line's quantity. Zero or below removes the line.
    SetQuantity { product_id: String, quantity: i64 },
    /// Drops a line. Absent products are ignored.
    Remove(String),
    /// Replaces every line, used by reorder.
    Restore(Vec<CartItem>),
}

/// Results from CartActions - variants match 1:1 with CartAction
#[derive(Debug, Clone, PartialEq)]
pub enum CartActionResult {
    /// New quantity of the line
    Add(u32),
    SetQuantity(QuantityChange),
    /// Whether a line was removed
    Remove(bool),
    /// Units now in the cart
    Restore(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    Updated(u32),
    Removed,
}
