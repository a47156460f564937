use thiserror::Error;

use crate::error::{FrameworkError, StorageError};
use crate::tracking::TrackingError;

/// Errors raised while starting or stopping the store system.
#[derive(Debug, Error)]
pub enum SystemError {
    #[error("Failed to open store: {0}")]
    Storage(#[from] StorageError),
    #[error("Failed to start actor: {0}")]
    Framework(#[from] FrameworkError),
    #[error(transparent)]
    Tracking(#[from] TrackingError),
    #[error("Actor task failed: {0}")]
    TaskFailed(#[from] tokio::task::JoinError),
}
