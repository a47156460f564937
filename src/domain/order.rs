use std::fmt;
use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::cart::CartItem;

pub const ORDER_ID_PREFIX: &str = "QC";

/// Promised delivery window, independent of the selected time slot.
pub const ESTIMATED_DELIVERY_OFFSET: Duration = Duration::from_secs(10 * 60);

/// Lifecycle of an order. Variants are declared in lifecycle order, so the
/// derived ordering is the order in which statuses are reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Placed,
    Confirmed,
    Preparing,
    OutForDelivery,
    Delivered,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Placed,
        OrderStatus::Confirmed,
        OrderStatus::Preparing,
        OrderStatus::OutForDelivery,
        OrderStatus::Delivered,
    ];

    /// The only status this one may move to.
    pub fn next(self) -> Option<OrderStatus> {
        match self {
            OrderStatus::Placed => Some(OrderStatus::Confirmed),
            OrderStatus::Confirmed => Some(OrderStatus::Preparing),
            OrderStatus::Preparing => Some(OrderStatus::OutForDelivery),
            OrderStatus::OutForDelivery => Some(OrderStatus::Delivered),
            OrderStatus::Delivered => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        self.next().is_none()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Placed => "placed",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Preparing => "preparing",
            OrderStatus::OutForDelivery => "out_for_delivery",
            OrderStatus::Delivered => "delivered",
        }
    }

    /// Upper-case badge text, e.g. `OUT FOR DELIVERY`.
    pub fn label(self) -> String {
        self.as_str().replace('_', " ").to_uppercase()
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Represents a placed order.
///
/// Timestamps are milliseconds since the Unix epoch. `time_slot` and
/// `payment_method` hold the human-readable labels chosen at checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub items: Vec<CartItem>,
    pub total: u64,
    pub address: String,
    pub time_slot: String,
    pub payment_method: String,
    pub timestamp: i64,
    pub status: OrderStatus,
    pub estimated_delivery: i64,
}

/// Payload for creating a new order from a validated checkout.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub items: Vec<CartItem>,
    pub total: u64,
    pub address: String,
    pub time_slot: String,
    pub payment_method: String,
}

impl Order {
    pub fn place(id: impl Into<String>, params: OrderCreate, placed_at: i64) -> Self {
        Self {
            id: id.into(),
            items: params.items,
            total: params.total,
            address: params.address,
            time_slot: params.time_slot,
            payment_method: params.payment_method,
            timestamp: placed_at,
            status: OrderStatus::Placed,
            estimated_delivery: placed_at + ESTIMATED_DELIVERY_OFFSET.as_millis() as i64,
        }
    }

    /// Time left until the promised delivery, zero once it has passed.
    pub fn remaining_until_delivery(&self, now_ms: i64) -> Duration {
        let remaining = self.estimated_delivery.saturating_sub(now_ms);
        Duration::from_millis(u64::try_from(remaining).unwrap_or(0))
    }
}

/// `QC` + the last six digits of the timestamp + a random three-digit suffix.
///
/// Nothing checks for collisions; there is a single writer.
pub fn generate_order_id(now_ms: i64, rng: &mut impl Rng) -> String {
    let suffix: u32 = rng.gen_range(0..1000);
    format!("{}{:06}{:03}", ORDER_ID_PREFIX, now_ms.rem_euclid(1_000_000), suffix)
}

/// Current wall-clock time in epoch milliseconds.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}


#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn statuses_advance_one_step_at_a_time() {
        let mut walked = vec![OrderStatus::Placed];
        while let Some(next) = walked.last().and_then(|s| s.next()) {
            walked.push(next);
        }
        assert_eq!(walked, OrderStatus::ALL.to_vec());
        assert!(OrderStatus::Delivered.is_terminal());
        assert!(OrderStatus::Placed < OrderStatus::OutForDelivery);
    }

    #[test]
    fn status_wire_names() {
        let json = serde_json::to_string(&OrderStatus::OutForDelivery).unwrap();
        assert_eq!(json, "\"out_for_delivery\"");
        assert_eq!(OrderStatus::OutForDelivery.label(), "OUT FOR DELIVERY");
    }

    #[test]
    fn order_ids_have_prefix_timestamp_and_suffix() {
        let mut rng = StdRng::seed_from_u64(7);
        let id = generate_order_id(1_700_000_012_345, &mut rng);
        assert_eq!(id.len(), 11);
        assert!(id.starts_with("QC012345"));
        assert!(id[2..].chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn placement_sets_status_and_eta() {
        let order = fixtures::sample_order();
        assert_eq!(order.status, OrderStatus::Placed);
        assert_eq!(order.estimated_delivery - order.timestamp, 600_000);
        assert_eq!(
            order.remaining_until_delivery(order.timestamp + 540_000),
            Duration::from_secs(60)
        );
        assert_eq!(order.remaining_until_delivery(order.estimated_delivery + 1), Duration::ZERO);
    }

    #[test]
    fn order_json_uses_web_field_names() {
        let json = serde_json::to_value(fixtures::sample_order()).unwrap();
        assert_eq!(json["timeSlot"], "Next 10 minutes");
        assert_eq!(json["paymentMethod"], "Cash on Delivery");
        assert_eq!(json["status"], "placed");
        assert!(json["estimatedDelivery"].is_i64());
    }
}
