use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::order::OrderStatus;

/// One entry on the tracking timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackingUpdate {
    pub status: OrderStatus,
    pub message: String,
    pub timestamp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl TrackingUpdate {
    /// The canned update announcing `status`.
    pub fn for_status(status: OrderStatus, timestamp: i64) -> Self {
        let (message, location) = match status {
            OrderStatus::Placed => ("Order placed successfully", "QuickCommerce Hub"),
            OrderStatus::Confirmed => ("Order confirmed by store", "Local Store"),
            OrderStatus::Preparing => ("Your order is being prepared", "Local Store"),
            OrderStatus::OutForDelivery => ("Out for delivery", "On the way"),
            OrderStatus::Delivered => ("Order delivered successfully", "Your Address"),
        };
        Self {
            status,
            message: message.to_string(),
            timestamp,
            location: Some(location.to_string()),
        }
    }
}

/// Time left on the delivery countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Countdown {
    Remaining(Duration),
    Arrived,
}

impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Countdown::Remaining(left) => {
                let secs = left.as_secs();
                write!(f, "{}:{:02}", secs / 60, secs % 60)
            }
            Countdown::Arrived => f.write_str("Delivered!"),
        }
    }
}
