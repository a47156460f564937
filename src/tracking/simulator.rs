use std::collections::VecDeque;
use std::future::pending;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info, info_span, instrument, warn, Instrument};

use super::error::TrackingError;
use super::schedule::{Stage, TrackingSchedule};
use crate::clients::OrderClient;
use crate::domain::{now_millis, Countdown, Order, OrderStatus, TrackingUpdate};

/// At most one update per status is ever sent.
const UPDATE_BUFFER: usize = 8;

const MIN_TICK: Duration = Duration::from_millis(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HaltReason {
    Delivered,
    SafetyCutoff,
    /// The handle was abandoned or dropped.
    Abandoned,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrackingOutcome {
    pub order_id: String,
    pub timeline: Vec<TrackingUpdate>,
    pub final_status: OrderStatus,
    pub reason: HaltReason,
}

/// Starts tracking runs for the current order.
#[derive(Clone)]
pub struct TrackingSimulator {
    order_client: OrderClient,
    schedule: TrackingSchedule,
}

impl TrackingSimulator {
    pub fn new(order_client: OrderClient, schedule: TrackingSchedule) -> Result<Self, TrackingError> {
        schedule.validate()?;
        Ok(Self {
            order_client,
            schedule,
        })
    }

    /// Opens tracking on the current order. `None` when there is nothing to track.
    #[instrument(skip(self))]
    pub async fn start(&self) -> Result<Option<TrackingHandle>, TrackingError> {
        let Some(order) = self.order_client.current_order().await? else {
            info!("No current order to track");
            return Ok(None);
        };

        let remaining = order.remaining_until_delivery(now_millis());
        let (updates_tx, updates_rx) = mpsc::channel(UPDATE_BUFFER);
        let (countdown_tx, countdown_rx) = watch::channel(Countdown::Remaining(remaining));

        let run = TrackingRun {
            order_client: self.order_client.clone(),
            schedule: self.schedule.clone(),
            order_id: order.id.clone(),
            status: order.status,
            timeline: Vec::new(),
            updates: updates_tx,
            countdown: countdown_tx,
        };
        let span = info_span!("tracking", order_id = %order.id);
        let starting = initial_update(&order);
        let task = tokio::spawn(run.run(starting, remaining).instrument(span));
        info!(order_id = %order.id, status = %order.status, "Tracking started");

        Ok(Some(TrackingHandle {
            order,
            updates: updates_rx,
            countdown: countdown_rx,
            task,
        }))
    }
}

/// The update that opens a timeline: the persisted status, stamped with the
/// placement time for a freshly placed order.
fn initial_update(order: &Order) -> TrackingUpdate {
    let timestamp = match order.status {
        OrderStatus::Placed => order.timestamp,
        _ => now_millis(),
    };
    TrackingUpdate::for_status(order.status, timestamp)
}

/// A running tracking session.
pub struct TrackingHandle {
    order: Order,
    updates: mpsc::Receiver<TrackingUpdate>,
    countdown: watch::Receiver<Countdown>,
    task: JoinHandle<TrackingOutcome>,
}

impl TrackingHandle {
    /// The order as it was when tracking opened.
    pub fn order(&self) -> &Order {
        &self.order
    }

    /// Next timeline entry, `None` once the run has ended.
    pub async fn next_update(&mut self) -> Option<TrackingUpdate> {
        self.updates.recv().await
    }

    pub fn countdown(&self) -> Countdown {
        *self.countdown.borrow()
    }

    /// A receiver that wakes on every countdown change.
    pub fn watch_countdown(&self) -> watch::Receiver<Countdown> {
        self.countdown.clone()
    }

    /// Waits for the run to end.
    pub async fn wait(self) -> Result<TrackingOutcome, TrackingError> {
        let TrackingHandle {
            updates: _updates,
            countdown: _countdown,
            task,
            ..
        } = self;
        Ok(task.await?)
    }

    /// Stops the run and returns what it recorded so far. Pending transitions
    /// never fire and the persisted order keeps its last written status.
    pub async fn abandon(self) -> Result<TrackingOutcome, TrackingError> {
        let TrackingHandle {
            updates,
            countdown: _countdown,
            task,
            ..
        } = self;
        drop(updates);
        Ok(task.await?)
    }
}

struct TrackingRun {
    order_client: OrderClient,
    schedule: TrackingSchedule,
    order_id: String,
    status: OrderStatus,
    timeline: Vec<TrackingUpdate>,
    updates: mpsc::Sender<TrackingUpdate>,
    countdown: watch::Sender<Countdown>,
}

impl TrackingRun {
    /// Single loop owning every timer: stages, countdown, delivery and the
    /// safety cutoff.
    async fn run(mut self, starting: TrackingUpdate, remaining: Duration) -> TrackingOutcome {
        let started = Instant::now();
        let safety_deadline = started + self.schedule.safety_cutoff;
        let arrival = started + self.schedule.scaled(remaining);

        self.record(starting).await;
        if self.status.is_terminal() {
            return self.finish(HaltReason::Delivered);
        }

        let current = self.status;
        let mut stages: VecDeque<Stage> = self
            .schedule
            .stages
            .iter()
            .filter(|stage| stage.status > current)
            .copied()
            .collect();
        let mut arrived = false;
        let mut delivery_at: Option<Instant> = None;

        let mut ticker = time::interval(self.schedule.scaled(self.schedule.tick).max(MIN_TICK));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let listeners = self.updates.clone();

        loop {
            let next_stage = stages
                .front()
                .map(|stage| started + self.schedule.scaled(stage.delay));

            tokio::select! {
                biased;

                _ = time::sleep_until(safety_deadline) => {
                    warn!(status = %self.status, "Safety cutoff reached, halting tracking");
                    return self.finish(HaltReason::SafetyCutoff);
                }
                _ = listeners.closed() => {
                    info!("Tracking abandoned");
                    return self.finish(HaltReason::Abandoned);
                }
                _ = sleep_until_opt(delivery_at) => {
                    self.advance(OrderStatus::Delivered).await;
                    return self.finish(HaltReason::Delivered);
                }
                _ = sleep_until_opt(next_stage) => {
                    if let Some(stage) = stages.pop_front() {
                        self.advance(stage.status).await;
                    }
                }
                _ = ticker.tick(), if !arrived => {
                    let now = Instant::now();
                    if now >= arrival {
                        arrived = true;
                        self.countdown.send_replace(Countdown::Arrived);
                        debug!("Countdown reached zero");
                    } else {
                        let left = self.schedule.unscaled(arrival - now);
                        self.countdown.send_replace(Countdown::Remaining(left));
                    }
                }
            }

            // Delivery follows the countdown, but never before out for delivery.
            if arrived && delivery_at.is_none() && self.status == OrderStatus::OutForDelivery {
                let delay = self.schedule.scaled(self.schedule.delivery_delay);
                debug!(?delay, "Delivery scheduled");
                delivery_at = Some(Instant::now() + delay);
            }
        }
    }

    /// Applies `status` if it is the direct successor of the current one.
    async fn advance(&mut self, status: OrderStatus) {
        if self.status.next() != Some(status) {
            warn!(from = %self.status, to = %status, "Out-of-order transition ignored");
            return;
        }
        self.status = status;
        if let Err(e) = self
            .order_client
            .advance_current_order(&self.order_id, status)
            .await
        {
            warn!(error = %e, %status, "Failed to persist order status");
        }
        info!(%status, "Order status updated");
        self.record(TrackingUpdate::for_status(status, now_millis())).await;
    }

    async fn record(&mut self, update: TrackingUpdate) {
        self.timeline.push(update.clone());
        let _ = self.updates.send(update).await;
    }

    fn finish(self, reason: HaltReason) -> TrackingOutcome {
        info!(status = %self.status, ?reason, "Tracking finished");
        TrackingOutcome {
            order_id: self.order_id,
            timeline: self.timeline,
            final_status: self.status,
            reason,
        }
    }
}

async fn sleep_until_opt(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => time::sleep_until(deadline).await,
        None => pending().await,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::app_system::StoreSystem;
    use crate::config::StoreConfig;
    use crate::domain::order::fixtures::sample_order;
    use crate::storage::{MemoryStore, Repository, StoreRepository};

    fn order_due_in(offset_ms: i64, status: OrderStatus) -> Order {
        let mut order = sample_order();
        order.status = status;
        order.estimated_delivery = now_millis() + offset_ms;
        order
    }

    fn repository_with(order: &Order) -> Arc<dyn Repository> {
        let repo = StoreRepository::new(MemoryStore::new());
        repo.save_last_order(order).unwrap();
        repo.save_current_order(order).unwrap();
        Arc::new(repo)
    }

    fn statuses(timeline: &[TrackingUpdate]) -> Vec<OrderStatus> {
        timeline.iter().map(|u| u.status).collect()
    }

    #[tokio::test(start_paused = true)]
    async fn runs_the_full_lifecycle_in_order() {
        let order = order_due_in(8_000, OrderStatus::Placed);
        let repo = repository_with(&order);
        let system = StoreSystem::new(repo.clone(), &StoreConfig::default()).unwrap();

        let mut handle = system.tracking.start().await.unwrap().expect("current order");
        let mut seen = Vec::new();
        while let Some(update) = handle.next_update().await {
            seen.push(update.status);
            if update.status == OrderStatus::Delivered {
                break;
            }
        }
        assert_eq!(seen, OrderStatus::ALL.to_vec());
        assert_eq!(handle.countdown(), Countdown::Arrived);

        let outcome = handle.wait().await.unwrap();
        assert_eq!(outcome.reason, HaltReason::Delivered);
        assert_eq!(statuses(&outcome.timeline), OrderStatus::ALL.to_vec());
        assert_eq!(outcome.timeline[0].timestamp, order.timestamp);

        assert!(repo.current_order().unwrap().is_none());
        assert_eq!(repo.last_order().unwrap().map(|o| o.status), Some(OrderStatus::Placed));
        system.shutdown().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn persists_each_status_as_it_fires() {
        let order = order_due_in(8_000, OrderStatus::Placed);
        let repo = repository_with(&order);
        let system = StoreSystem::new(repo.clone(), &StoreConfig::default()).unwrap();

        let mut handle = system.tracking.start().await.unwrap().unwrap();
        handle.next_update().await;
        let update = handle.next_update().await.unwrap();
        assert_eq!(update.status, OrderStatus::Confirmed);
        assert_eq!(
            repo.current_order().unwrap().map(|o| o.status),
            Some(OrderStatus::Confirmed)
        );
        assert!(matches!(handle.countdown(), Countdown::Remaining(_)));

        let outcome = handle.abandon().await.unwrap();
        assert_eq!(outcome.reason, HaltReason::Abandoned);
        assert_eq!(outcome.final_status, OrderStatus::Confirmed);
        assert_eq!(
            statuses(&outcome.timeline),
            vec![OrderStatus::Placed, OrderStatus::Confirmed]
        );

        time::sleep(Duration::from_secs(30)).await;
        assert_eq!(
            repo.current_order().unwrap().map(|o| o.status),
            Some(OrderStatus::Confirmed)
        );
        system.shutdown().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn halts_at_the_safety_cutoff() {
        let order = order_due_in(20 * 60 * 1_000, OrderStatus::Placed);
        let repo = repository_with(&order);
        let system = StoreSystem::new(repo.clone(), &StoreConfig::default()).unwrap();

        let began = Instant::now();
        let handle = system.tracking.start().await.unwrap().unwrap();
        let outcome = handle.wait().await.unwrap();

        assert_eq!(outcome.reason, HaltReason::SafetyCutoff);
        assert_eq!(outcome.final_status, OrderStatus::OutForDelivery);
        assert!(began.elapsed() >= Duration::from_secs(15 * 60));
        assert_eq!(
            repo.current_order().unwrap().map(|o| o.status),
            Some(OrderStatus::OutForDelivery)
        );
        system.shutdown().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn safety_cutoff_runs_on_wall_clock_time() {
        let order = order_due_in(30 * 60 * 60 * 1_000, OrderStatus::Placed);
        let repo = repository_with(&order);
        let config = StoreConfig {
            tracking_speed: 60,
            ..StoreConfig::default()
        };
        let system = StoreSystem::new(repo.clone(), &config).unwrap();

        let began = Instant::now();
        let outcome = system.tracking.start().await.unwrap().unwrap().wait().await.unwrap();

        assert_eq!(outcome.reason, HaltReason::SafetyCutoff);
        assert!(began.elapsed() >= Duration::from_secs(15 * 60));
        assert!(began.elapsed() < Duration::from_secs(16 * 60));
        system.shutdown().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn early_countdown_waits_for_out_for_delivery() {
        let order = order_due_in(-1_000, OrderStatus::Placed);
        let repo = repository_with(&order);
        let system = StoreSystem::new(repo.clone(), &StoreConfig::default()).unwrap();

        let began = Instant::now();
        let handle = system.tracking.start().await.unwrap().unwrap();
        let outcome = handle.wait().await.unwrap();

        assert_eq!(outcome.reason, HaltReason::Delivered);
        assert_eq!(statuses(&outcome.timeline), OrderStatus::ALL.to_vec());
        assert!(began.elapsed() >= Duration::from_secs(8));
        system.shutdown().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn resumes_from_the_persisted_status() {
        let order = order_due_in(8_000, OrderStatus::Preparing);
        let repo = repository_with(&order);
        let system = StoreSystem::new(repo.clone(), &StoreConfig::default()).unwrap();

        let outcome = system.tracking.start().await.unwrap().unwrap().wait().await.unwrap();
        assert_eq!(
            statuses(&outcome.timeline),
            vec![OrderStatus::Preparing, OrderStatus::OutForDelivery, OrderStatus::Delivered]
        );
        system.shutdown().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn time_scale_speeds_up_the_run() {
        let order = order_due_in(8 * 60 * 1_000, OrderStatus::Placed);
        let repo = repository_with(&order);
        let config = StoreConfig {
            tracking_speed: 60,
            ..StoreConfig::default()
        };
        let system = StoreSystem::new(repo.clone(), &config).unwrap();

        let began = Instant::now();
        let outcome = system.tracking.start().await.unwrap().unwrap().wait().await.unwrap();
        assert_eq!(outcome.reason, HaltReason::Delivered);
        assert!(began.elapsed() < Duration::from_secs(60));
        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn nothing_to_track_without_a_current_order() {
        let repo: Arc<dyn Repository> = Arc::new(StoreRepository::new(MemoryStore::new()));
        let system = StoreSystem::new(repo, &StoreConfig::default()).unwrap();
        assert!(system.tracking.start().await.unwrap().is_none());
        system.shutdown().await.unwrap();
    }
}
