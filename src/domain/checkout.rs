use std::fmt;
use std::str::FromStr;

/// Delivery window offered at checkout.
///
/// The label is stored on the order for display only; the order's estimated
/// delivery is always placement + 10 minutes regardless of the slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSlot {
    pub id: &'static str,
    pub label: &'static str,
    pub available: bool,
}

pub const TIME_SLOTS: [TimeSlot; 4] = [
    TimeSlot { id: "1", label: "Next 10 minutes", available: true },
    TimeSlot { id: "2", label: "10-20 minutes", available: true },
    TimeSlot { id: "3", label: "20-30 minutes", available: true },
    TimeSlot { id: "4", label: "30-40 minutes", available: false },
];

pub fn find_time_slot(id: &str) -> Option<&'static TimeSlot> {
    TIME_SLOTS.iter().find(|slot| slot.id == id)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentMethod {
    CashOnDelivery,
    Upi,
    Card,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 3] = [
        PaymentMethod::CashOnDelivery,
        PaymentMethod::Upi,
        PaymentMethod::Card,
    ];

    pub fn id(self) -> &'static str {
        match self {
            PaymentMethod::CashOnDelivery => "cod",
            PaymentMethod::Upi => "upi",
            PaymentMethod::Card => "card",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PaymentMethod::CashOnDelivery => "Cash on Delivery",
            PaymentMethod::Upi => "UPI Payment",
            PaymentMethod::Card => "Credit/Debit Card",
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PaymentMethod::ALL
            .into_iter()
            .find(|method| method.id() == s)
            .ok_or_else(|| s.to_string())
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What the checkout form submits. Ids are `None` until the user picks one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckoutRequest {
    pub address: String,
    pub time_slot: Option<String>,
    pub payment_method: Option<String>,
}

impl CheckoutRequest {
    pub fn new(
        address: impl Into<String>,
        time_slot: impl Into<String>,
        payment_method: impl Into<String>,
    ) -> Self {
        Self {
            address: address.into(),
            time_slot: Some(time_slot.into()),
            payment_method: Some(payment_method.into()),
        }
    }
}

/// Checkout input a validation error points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutField {
    Cart,
    Address,
    TimeSlot,
    PaymentMethod,
}

impl fmt::Display for CheckoutField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            CheckoutField::Cart => "Your cart is empty!",
            CheckoutField::Address => "Please enter your delivery address",
            CheckoutField::TimeSlot => "Please select a time slot",
            CheckoutField::PaymentMethod => "Please select a payment method",
        };
        f.write_str(message)
    }
}
