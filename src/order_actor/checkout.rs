use std::str::FromStr;

use super::error::OrderError;
use crate::domain::{find_time_slot, Cart, CheckoutField, CheckoutRequest, OrderCreate, PaymentMethod};

/// Checks a checkout against the cart and turns it into order parameters.
///
/// Checks run in a fixed order (cart, address, time slot, payment method) and
/// the first failure is returned.
pub fn validate_checkout(cart: &Cart, request: &CheckoutRequest) -> Result<OrderCreate, OrderError> {
    if cart.is_empty() {
        return Err(OrderError::Validation(CheckoutField::Cart));
    }

    let address = request.address.trim();
    if address.is_empty() {
        return Err(OrderError::Validation(CheckoutField::Address));
    }

    let slot_id = selected(&request.time_slot).ok_or(OrderError::Validation(CheckoutField::TimeSlot))?;
    let slot = find_time_slot(slot_id).ok_or_else(|| OrderError::UnknownTimeSlot(slot_id.to_string()))?;
    if !slot.available {
        return Err(OrderError::TimeSlotUnavailable(slot.label.to_string()));
    }

    let payment_id =
        selected(&request.payment_method).ok_or(OrderError::Validation(CheckoutField::PaymentMethod))?;
    let payment = PaymentMethod::from_str(payment_id).map_err(OrderError::UnknownPaymentMethod)?;

    Ok(OrderCreate {
        items: cart.items().to_vec(),
        total: cart.pricing().total,
        address: address.to_string(),
        time_slot: slot.label.to_string(),
        payment_method: payment.name().to_string(),
    })
}

fn selected(choice: &Option<String>) -> Option<&str> {
    choice.as_deref().map(str::trim).filter(|id| !id.is_empty())
}
