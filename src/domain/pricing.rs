use serde::Serialize;

/// GST applied to the subtotal, in percent.
pub const TAX_RATE_PERCENT: u64 = 18;
/// Subtotals strictly above this ship for free.
pub const FREE_DELIVERY_THRESHOLD: u64 = 500;
pub const DELIVERY_FEE: u64 = 25;

/// Checkout arithmetic for a cart subtotal, all in whole currency units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PriceBreakdown {
    pub subtotal: u64,
    pub tax: u64,
    pub delivery_fee: u64,
    pub total: u64,
}

impl PriceBreakdown {
    pub fn for_subtotal(subtotal: u64) -> Self {
        // round(subtotal * 0.18), half away from zero
        let tax = (subtotal * TAX_RATE_PERCENT + 50) / 100;
        let delivery_fee = if subtotal > FREE_DELIVERY_THRESHOLD {
            0
        } else {
            DELIVERY_FEE
        };
        Self {
            subtotal,
            tax,
            delivery_fee,
            total: subtotal + tax + delivery_fee,
        }
    }

    pub fn is_free_delivery(&self) -> bool {
        self.delivery_fee == 0
    }
}

/// Formats an amount in rupees with Indian digit grouping, e.g. `₹1,23,456`.
pub fn format_currency(amount: u64) -> String {
    let digits = amount.to_string();
    if digits.len() <= 3 {
        return format!("₹{}", digits);
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups = Vec::new();
    let mut end = head.len();
    while end > 2 {
        groups.push(&head[end - 2..end]);
        end -= 2;
    }
    groups.push(&head[..end]);
    groups.reverse();

    format!("₹{},{}", groups.join(","), tail)
}
