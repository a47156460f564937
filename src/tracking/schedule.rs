use std::time::Duration;

use super::error::TrackingError;
use crate::domain::OrderStatus;

/// A status change fired `delay` after tracking starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stage {
    pub delay: Duration,
    pub status: OrderStatus,
}

impl Stage {
    pub const fn new(delay: Duration, status: OrderStatus) -> Self {
        Self { delay, status }
    }
}

/// Statuses the stages must announce, in order. Delivery is driven by the
/// countdown rather than a stage.
const STAGED_STATUSES: [OrderStatus; 3] = [
    OrderStatus::Confirmed,
    OrderStatus::Preparing,
    OrderStatus::OutForDelivery,
];

/// Timing for a tracking run. Every duration except `safety_cutoff` is
/// divided by `time_scale`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackingSchedule {
    pub stages: Vec<Stage>,
    /// Countdown refresh interval.
    pub tick: Duration,
    /// Gap between the countdown reaching zero and delivery.
    pub delivery_delay: Duration,
    /// The run halts this long after it starts, whatever the status. Wall-clock
    /// time, never scaled.
    pub safety_cutoff: Duration,
    pub time_scale: u32,
}

impl Default for TrackingSchedule {
    fn default() -> Self {
        Self {
            stages: vec![
                Stage::new(Duration::from_secs(2), OrderStatus::Confirmed),
                Stage::new(Duration::from_secs(4), OrderStatus::Preparing),
                Stage::new(Duration::from_secs(6), OrderStatus::OutForDelivery),
            ],
            tick: Duration::from_secs(1),
            delivery_delay: Duration::from_secs(2),
            safety_cutoff: Duration::from_secs(15 * 60),
            time_scale: 1,
        }
    }
}

impl TrackingSchedule {
    pub fn with_time_scale(mut self, time_scale: u32) -> Self {
        self.time_scale = time_scale;
        self
    }

    pub fn validate(&self) -> Result<(), TrackingError> {
        if self.time_scale == 0 {
            return Err(TrackingError::TimeScale);
        }
        if self.stages.len() != STAGED_STATUSES.len() {
            return Err(TrackingError::StageCount(self.stages.len()));
        }
        for (index, (stage, expected)) in self.stages.iter().zip(STAGED_STATUSES).enumerate() {
            if stage.status != expected {
                return Err(TrackingError::StageOutOfOrder {
                    index,
                    expected,
                    found: stage.status,
                });
            }
        }
        if let Some(index) = self
            .stages
            .windows(2)
            .position(|pair| pair[1].delay < pair[0].delay)
        {
            return Err(TrackingError::DecreasingDelay(index + 1));
        }
        Ok(())
    }

    /// Real time to wait for `order_time`.
    pub fn scaled(&self, order_time: Duration) -> Duration {
        order_time / self.time_scale.max(1)
    }

    /// Order time represented by `real` time.
    pub fn unscaled(&self, real: Duration) -> Duration {
        real * self.time_scale.max(1)
    }
}
