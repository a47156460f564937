use tracing::info;

use super::actions::{LoyaltyAction, LoyaltyActionResult};
use super::error::LoyaltyError;
use crate::actor_framework::Record;
use crate::domain::{points_for, LoyaltyProfile, PointsAward, Reward, Tier};
use crate::error::FrameworkError;
use crate::storage::Repository;

impl Record for LoyaltyProfile {
    const NAME: &'static str = "loyalty";
    type Action = LoyaltyAction;
    type ActionResult = LoyaltyActionResult;
    type Error = LoyaltyError;

    fn load(repo: &dyn Repository) -> Result<Option<Self>, FrameworkError> {
        Ok(Some(repo.user()?))
    }

    fn save(&self, repo: &dyn Repository) -> Result<(), FrameworkError> {
        Ok(repo.save_user(self)?)
    }

    fn clear(repo: &dyn Repository) -> Result<(), FrameworkError> {
        Ok(repo.clear_user()?)
    }

    fn vacant() -> Option<Self> {
        Some(LoyaltyProfile::default())
    }

    fn handle_action(&mut self, action: LoyaltyAction) -> Result<LoyaltyActionResult, LoyaltyError> {
        match action {
            LoyaltyAction::CompleteOrder { total } => Ok(LoyaltyActionResult::CompleteOrder(
                self.apply_order_completion(total),
            )),
            LoyaltyAction::ClaimReward(reward) => {
                self.claim_reward(&reward).map(LoyaltyActionResult::ClaimReward)
            }
        }
    }
}

impl LoyaltyProfile {
    /// Adds `floor(total / 10)` points and one order, then promotes.
    /// Tiers never go down.
    pub fn apply_order_completion(&mut self, total: u64) -> PointsAward {
        let earned = points_for(total);
        self.points += earned;
        self.orders_count += 1;

        let reached = self.tier.max(Tier::for_points(self.points));
        let promoted_to = (reached > self.tier).then_some(reached);
        if let Some(tier) = promoted_to {
            info!(from = %self.tier, to = %tier, points = self.points, "Tier promotion");
        }
        self.tier = reached;

        PointsAward {
            points: earned,
            balance: self.points,
            promoted_to,
        }
    }

    /// Deducts exactly the reward's cost and returns the new balance.
    pub fn claim_reward(&mut self, reward: &Reward) -> Result<u64, LoyaltyError> {
        if self.points < reward.cost {
            return Err(LoyaltyError::InsufficientPoints {
                required: reward.cost,
                available: self.points,
            });
        }
        self.points -= reward.cost;
        Ok(self.points)
    }
}
