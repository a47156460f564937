use tracing::{debug, instrument};

use crate::actor_framework::{Record, RecordClient};
use crate::domain::{find_reward, LoyaltyProfile, PointsAward, TierProgress};
use crate::error::FrameworkError;
use crate::loyalty_actor::{LoyaltyAction, LoyaltyActionResult, LoyaltyError};

/// Client for interacting with the loyalty actor.
#[derive(Clone)]
pub struct LoyaltyClient {
    inner: RecordClient<LoyaltyProfile>,
}

impl_record_client!(LoyaltyClient, LoyaltyProfile, LoyaltyError, profile, pub);

impl LoyaltyClient {
    #[instrument(skip(self))]
    pub async fn apply_order_completion(&self, total: u64) -> Result<PointsAward, LoyaltyError> {
        debug!("Sending request");
        match self
            .inner
            .perform_action(LoyaltyAction::CompleteOrder { total })
            .await?
        {
            LoyaltyActionResult::CompleteOrder(award) => Ok(award),
            _ => Err(FrameworkError::UnexpectedResult(LoyaltyProfile::NAME).into()),
        }
    }

    /// Spends points on the reward with `reward_id`. Returns the remaining balance.
    #[instrument(skip(self))]
    pub async fn claim_reward(&self, reward_id: &str) -> Result<u64, LoyaltyError> {
        debug!("Sending request");
        let reward =
            find_reward(reward_id).ok_or_else(|| LoyaltyError::UnknownReward(reward_id.to_string()))?;
        match self
            .inner
            .perform_action(LoyaltyAction::ClaimReward(*reward))
            .await?
        {
            LoyaltyActionResult::ClaimReward(balance) => Ok(balance),
            _ => Err(FrameworkError::UnexpectedResult(LoyaltyProfile::NAME).into()),
        }
    }

    pub async fn tier_progress(&self) -> Result<TierProgress, LoyaltyError> {
        Ok(TierProgress::for_points(self.profile().await?.points))
    }
}
