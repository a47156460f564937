use crate::domain::OrderStatus;

/// Custom actions for the current-order record.
#[derive(Debug, Clone)]
pub enum CurrentOrderAction {
    /// Moves the order to `status`, which must directly follow the stored one.
    ///
    /// # Errors
    /// Fails on a different order id or a non-successor status.
    Advance { order_id: String, status: OrderStatus },
}

/// Results from CurrentOrderActions - variants match 1:1 with CurrentOrderAction
#[derive(Debug, Clone, PartialEq)]
pub enum CurrentOrderActionResult {
    /// The status now stored
    Advance(OrderStatus),
}
