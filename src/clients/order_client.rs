use tracing::{debug, error, info, instrument, warn, Span};

use crate::actor_framework::RecordClient;
use crate::clients::{CartClient, LoyaltyClient};
use crate::domain::{generate_order_id, now_millis, CheckoutRequest, Order, OrderStatus};
use crate::error::FrameworkError;
use crate::order_actor::{
    validate_checkout, CurrentOrder, CurrentOrderAction, CurrentOrderActionResult, LastOrder, OrderError,
};

/// Client for the order records.
///
/// Orchestrates checkout across the cart, order and loyalty actors.
#[derive(Clone)]
pub struct OrderClient {
    current: RecordClient<CurrentOrder>,
    last: RecordClient<LastOrder>,
    cart_client: CartClient,
    loyalty_client: LoyaltyClient,
}

impl OrderClient {
    pub fn new(
        current: RecordClient<CurrentOrder>,
        last: RecordClient<LastOrder>,
        cart_client: CartClient,
        loyalty_client: LoyaltyClient,
    ) -> Self {
        Self {
            current,
            last,
            cart_client,
            loyalty_client,
        }
    }

    /// Places an order from the current cart.
    ///
    /// On success the order is stored as both the last and the current order,
    /// loyalty points are credited and the cart is emptied. A rejected
    /// checkout writes nothing.
    #[instrument(skip(self, request), fields(order_id = tracing::field::Empty))]
    pub async fn place_order(&self, request: CheckoutRequest) -> Result<Order, OrderError> {
        info!("Processing place_order request (Client Side)");

        // Step 1: Validate the checkout against the cart
        let cart = self.cart_client.cart().await?;
        let params = validate_checkout(&cart, &request).map_err(|e| {
            warn!(error = %e, "Checkout rejected");
            e
        })?;

        // Step 2: Build the order
        let placed_at = now_millis();
        let id = generate_order_id(placed_at, &mut rand::thread_rng());
        let order = Order::place(id, params, placed_at);
        Span::current().record("order_id", order.id.as_str());
        info!(total = order.total, items = order.items.len(), "Order built");

        // Step 3: Persist as last and current order
        self.last.replace(LastOrder(order.clone())).await?;
        self.current.replace(CurrentOrder(order.clone())).await?;

        // Step 4: Award loyalty points
        let award = self
            .loyalty_client
            .apply_order_completion(order.total)
            .await
            .map_err(|e| {
                error!(error = %e, "Loyalty award failed");
                e
            })?;
        info!(points = award.points, balance = award.balance, "Loyalty points awarded");

        // Step 5: Clear the cart
        self.cart_client.clear_cart().await?;

        info!("Order placed successfully");
        Ok(order)
    }

    #[instrument(skip(self))]
    pub async fn current_order(&self) -> Result<Option<Order>, OrderError> {
        debug!("Sending request");
        Ok(self.current.get().await?.map(|CurrentOrder(order)| order))
    }

    #[instrument(skip(self))]
    pub async fn last_order(&self) -> Result<Option<Order>, OrderError> {
        debug!("Sending request");
        Ok(self.last.get().await?.map(|LastOrder(order)| order))
    }

    /// Puts the last order's items back in the cart. Returns the unit count.
    #[instrument(skip(self))]
    pub async fn reorder(&self) -> Result<u32, OrderError> {
        let Some(order) = self.last_order().await? else {
            warn!("Reorder requested without a previous order");
            return Err(OrderError::NoPreviousOrder);
        };
        let count = self.cart_client.restore(order.items).await?;
        info!(order_id = %order.id, units = count, "Items added to cart from previous order");
        Ok(count)
    }

    /// Writes the next status of the tracked order. Delivery removes the
    /// current-order record; the last order keeps its placement snapshot.
    #[instrument(skip(self))]
    pub async fn advance_current_order(
        &self,
        order_id: &str,
        status: OrderStatus,
    ) -> Result<OrderStatus, OrderError> {
        debug!("Sending request");
        let action = CurrentOrderAction::Advance {
            order_id: order_id.to_string(),
            status,
        };
        match self.current.perform_action(action).await {
            Ok(CurrentOrderActionResult::Advance(status)) => Ok(status),
            Err(OrderError::Framework(FrameworkError::NotFound(_))) => Err(OrderError::NoCurrentOrder),
            Err(e) => Err(e),
        }
    }

    pub async fn shutdown(&self) -> Result<(), OrderError> {
        self.current.shutdown().await?;
        self.last.shutdown().await
    }
}
