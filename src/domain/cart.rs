use serde::{Deserialize, Serialize};

use super::pricing::PriceBreakdown;
use super::product::Product;

/// A product snapshot and how many units of it are in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub product: Product,
    pub quantity: u32,
}

impl CartItem {
    pub fn new(product: Product, quantity: u32) -> Self {
        Self { product, quantity }
    }

    pub fn line_total(&self) -> u64 {
        self.product.price * u64::from(self.quantity)
    }
}

/// The active cart, persisted as a plain JSON array of items.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn new(items: Vec<CartItem>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn into_items(self) -> Vec<CartItem> {
        self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Units across all lines, the badge count shown next to the cart.
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    pub fn quantity_of(&self, product_id: &str) -> u32 {
        self.get(product_id).map_or(0, |item| item.quantity)
    }

    pub fn get(&self, product_id: &str) -> Option<&CartItem> {
        self.items.iter().find(|item| item.product.id == product_id)
    }

    pub(crate) fn get_mut(&mut self, product_id: &str) -> Option<&mut CartItem> {
        self.items.iter_mut().find(|item| item.product.id == product_id)
    }

    pub(crate) fn push(&mut self, item: CartItem) {
        self.items.push(item);
    }

    pub(crate) fn remove(&mut self, product_id: &str) -> Option<CartItem> {
        let index = self.items.iter().position(|item| item.product.id == product_id)?;
        Some(self.items.remove(index))
    }

    pub fn subtotal(&self) -> u64 {
        self.items.iter().map(CartItem::line_total).sum()
    }

    pub fn pricing(&self) -> PriceBreakdown {
        PriceBreakdown::for_subtotal(self.subtotal())
    }
}
