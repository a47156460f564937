use thiserror::Error;

use crate::domain::OrderStatus;
use crate::order_actor::OrderError;

#[derive(Debug, Error)]
pub enum TrackingError {
    #[error("Invalid tracking schedule: expected {expected} at stage {index}, found {found}")]
    StageOutOfOrder {
        index: usize,
        expected: OrderStatus,
        found: OrderStatus,
    },
    #[error("Invalid tracking schedule: expected 3 stages, found {0}")]
    StageCount(usize),
    #[error("Invalid tracking schedule: stage {0} fires before the one preceding it")]
    DecreasingDelay(usize),
    #[error("Invalid tracking schedule: time scale must be positive")]
    TimeScale,
    #[error("Tracking task failed: {0}")]
    TaskFailed(#[from] tokio::task::JoinError),
    #[error(transparent)]
    Order(#[from] OrderError),
}
