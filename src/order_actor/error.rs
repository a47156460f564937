use thiserror::Error;

use crate::cart_actor::CartError;
use crate::domain::{CheckoutField, OrderStatus};
use crate::error::FrameworkError;
use crate::loyalty_actor::LoyaltyError;

/// Errors that can occur during order operations.
#[derive(Debug, Error)]
pub enum OrderError {
    #[error("{0}")]
    Validation(CheckoutField),
    #[error("Unknown time slot: {0}")]
    UnknownTimeSlot(String),
    #[error("Time slot {0} is not available")]
    TimeSlotUnavailable(String),
    #[error("Unknown payment method: {0}")]
    UnknownPaymentMethod(String),
    #[error("No previous order found")]
    NoPreviousOrder,
    #[error("No order is being tracked")]
    NoCurrentOrder,
    #[error("Order mismatch: tracking {current}, got {requested}")]
    OrderMismatch { current: String, requested: String },
    #[error("Invalid status transition: {from} -> {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },
    #[error(transparent)]
    Cart(#[from] CartError),
    #[error(transparent)]
    Loyalty(#[from] LoyaltyError),
    #[error(transparent)]
    Framework(#[from] FrameworkError),
}
