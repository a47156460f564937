use thiserror::Error;

use crate::error::FrameworkError;

#[derive(Debug, Error)]
pub enum LoyaltyError {
    #[error("Insufficient points: need {required}, have {available}")]
    InsufficientPoints { required: u64, available: u64 },
    #[error("Unknown reward: {0}")]
    UnknownReward(String),
    #[error(transparent)]
    Framework(#[from] FrameworkError),
}
