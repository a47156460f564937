use tracing::{debug, instrument};

use crate::actor_framework::{Record, RecordClient};
use crate::cart_actor::{CartAction, CartActionResult, CartError, QuantityChange};
use crate::domain::{Cart, CartItem, Product};
use crate::error::FrameworkError;

/// Client for interacting with the cart actor.
#[derive(Clone)]
pub struct CartClient {
    inner: RecordClient<Cart>,
}

impl_record_client!(CartClient, Cart, CartError, cart, pub);

impl CartClient {
    /// Returns the line's new quantity.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub async fn add_to_cart(&self, product: Product) -> Result<u32, CartError> {
        debug!("Sending request");
        match self.inner.perform_action(CartAction::Add(product)).await? {
            CartActionResult::Add(quantity) => Ok(quantity),
            _ => Err(FrameworkError::UnexpectedResult(Cart::NAME).into()),
        }
    }

    #[instrument(skip(self))]
    pub async fn update_quantity(
        &self,
        product_id: &str,
        quantity: i64,
    ) -> Result<QuantityChange, CartError> {
        debug!("Sending request");
        let action = CartAction::SetQuantity {
            product_id: product_id.to_string(),
            quantity,
        };
        match self.inner.perform_action(action).await? {
            CartActionResult::SetQuantity(change) => Ok(change),
            _ => Err(FrameworkError::UnexpectedResult(Cart::NAME).into()),
        }
    }

    #[instrument(skip(self))]
    pub async fn remove_from_cart(&self, product_id: &str) -> Result<bool, CartError> {
        debug!("Sending request");
        match self
            .inner
            .perform_action(CartAction::Remove(product_id.to_string()))
            .await?
        {
            CartActionResult::Remove(removed) => Ok(removed),
            _ => Err(FrameworkError::UnexpectedResult(Cart::NAME).into()),
        }
    }

    /// Replaces the cart contents. Returns the unit count.
    #[instrument(skip(self, items), fields(lines = items.len()))]
    pub async fn restore(&self, items: Vec<CartItem>) -> Result<u32, CartError> {
        debug!("Sending request");
        match self.inner.perform_action(CartAction::Restore(items)).await? {
            CartActionResult::Restore(count) => Ok(count),
            _ => Err(FrameworkError::UnexpectedResult(Cart::NAME).into()),
        }
    }
}
