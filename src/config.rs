use std::{env, fmt::Display, path::PathBuf, str::FromStr};

use tracing::{info, warn};

use crate::tracking::TrackingSchedule;

const DEFAULT_STORE_PATH: &str = "quickcommerce_store.json";
const DEFAULT_TRACKING_SPEED: u32 = 1;
const DEFAULT_CHANNEL_CAPACITY: usize = 32;

/// Runtime settings read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// `QC_STORE_PATH`: file backing the key-value store.
    pub store_path: PathBuf,
    /// `QC_TRACKING_SPEED`: tracking runs this many times faster than real time.
    pub tracking_speed: u32,
    /// `QC_CHANNEL_CAPACITY`: mailbox size of each record actor.
    pub channel_capacity: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            tracking_speed: DEFAULT_TRACKING_SPEED,
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

impl StoreConfig {
    pub fn load() -> Self {
        Self {
            store_path: PathBuf::from(try_load("QC_STORE_PATH", DEFAULT_STORE_PATH.to_string())),
            tracking_speed: non_zero(
                "QC_TRACKING_SPEED",
                try_load("QC_TRACKING_SPEED", DEFAULT_TRACKING_SPEED),
                DEFAULT_TRACKING_SPEED,
            ),
            channel_capacity: non_zero(
                "QC_CHANNEL_CAPACITY",
                try_load("QC_CHANNEL_CAPACITY", DEFAULT_CHANNEL_CAPACITY),
                DEFAULT_CHANNEL_CAPACITY,
            ),
        }
    }

    pub fn tracking_schedule(&self) -> TrackingSchedule {
        TrackingSchedule::default().with_time_scale(self.tracking_speed)
    }
}

fn try_load<T>(key: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|e| {
            warn!("Invalid {key} value {raw:?}: {e}, using default: {default}");
            default
        }),
        Err(_) => {
            info!("{key} not set, using default: {default}");
            default
        }
    }
}

fn non_zero<T: PartialEq + Default + Display>(key: &str, value: T, default: T) -> T {
    if value == T::default() {
        warn!("{key} must be positive, using default: {default}");
        default
    } else {
        value
    }
}
