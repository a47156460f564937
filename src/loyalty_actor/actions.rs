use crate::domain::{PointsAward, Reward};

#[derive(Debug, Clone)]
pub enum LoyaltyAction {
    /// Credits an order total: points, order count and tier promotion.
    CompleteOrder { total: u64 },
    /// Spends points on a reward.
    ///
    /// # Errors
    /// Fails without touching the profile when the balance is short.
    ClaimReward(Reward),
}

/// Results from LoyaltyActions - variants match 1:1 with LoyaltyAction
#[derive(Debug, Clone, PartialEq)]
pub enum LoyaltyActionResult {
    CompleteOrder(PointsAward),
    /// Remaining balance
    ClaimReward(u64),
}
