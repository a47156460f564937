use tracing::debug;

use super::actions::{CartAction, CartActionResult, QuantityChange};
use super::error::CartError;
use crate::actor_framework::Record;
use crate::domain::{Cart, CartItem, Product};
use crate::error::FrameworkError;
use crate::storage::Repository;

impl Record for Cart {
    const NAME: &'static str = "cart";
    type Action = CartAction;
    type ActionResult = CartActionResult;
    type Error = CartError;

    fn load(repo: &dyn Repository) -> Result<Option<Self>, FrameworkError> {
        Ok(Some(Cart::new(repo.cart()?)))
    }

    fn save(&self, repo: &dyn Repository) -> Result<(), FrameworkError> {
        Ok(repo.save_cart(self.items())?)
    }

    fn clear(repo: &dyn Repository) -> Result<(), FrameworkError> {
        Ok(repo.clear_cart()?)
    }

    fn vacant() -> Option<Self> {
        Some(Cart::default())
    }

    /// Handles cart actions.
    ///
    /// Stock limits are checked against the product snapshot: the one passed
    /// in for `Add`, the stored line's for `SetQuantity`.
    fn handle_action(&mut self, action: CartAction) -> Result<CartActionResult, CartError> {
        match action {
            CartAction::Add(product) => self.add(product).map(CartActionResult::Add),
            CartAction::SetQuantity {
                product_id,
                quantity,
            } => self
                .set_quantity(&product_id, quantity)
                .map(CartActionResult::SetQuantity),
            CartAction::Remove(product_id) => {
                Ok(CartActionResult::Remove(self.remove(&product_id).is_some()))
            }
            CartAction::Restore(items) => {
                *self = Cart::new(items.into_iter().filter(|i| i.quantity > 0).collect());
                Ok(CartActionResult::Restore(self.item_count()))
            }
        }
    }
}

impl Cart {
    fn add(&mut self, product: Product) -> Result<u32, CartError> {
        if product.is_out_of_stock() {
            return Err(CartError::OutOfStock(product.name));
        }
        match self.get_mut(&product.id) {
            Some(item) => {
                if item.quantity >= product.stock {
                    return Err(CartError::StockLimit {
                        product_id: product.id,
                        requested: item.quantity + 1,
                        available: product.stock,
                    });
                }
                item.quantity += 1;
                debug!(product_id = %product.id, quantity = item.quantity, "Incremented cart line");
                Ok(item.quantity)
            }
            None => {
                debug!(product_id = %product.id, "New cart line");
                self.push(CartItem::new(product, 1));
                Ok(1)
            }
        }
    }

    fn set_quantity(&mut self, product_id: &str, quantity: i64) -> Result<QuantityChange, CartError> {
        if quantity <= 0 {
            self.remove(product_id);
            return Ok(QuantityChange::Removed);
        }
        let item = self
            .get_mut(product_id)
            .ok_or_else(|| CartError::ProductNotFound(product_id.to_string()))?;
        let requested = u32::try_from(quantity).unwrap_or(u32::MAX);
        if requested > item.product.stock {
            return Err(CartError::StockLimit {
                product_id: product_id.to_string(),
                requested,
                available: item.product.stock,
            });
        }
        item.quantity = requested;
        Ok(QuantityChange::Updated(requested))
    }
}
