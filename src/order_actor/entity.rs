use std::convert::Infallible;

use tracing::debug;

use super::actions::{CurrentOrderAction, CurrentOrderActionResult};
use super::error::OrderError;
use crate::actor_framework::Record;
use crate::domain::Order;
use crate::error::FrameworkError;
use crate::storage::Repository;

/// The order being tracked. Removed from the store once delivered.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentOrder(pub Order);

/// Snapshot of the most recent placement, kept for reorder.
#[derive(Debug, Clone, PartialEq)]
pub struct LastOrder(pub Order);

impl Record for CurrentOrder {
    const NAME: &'static str = "current_order";
    type Action = CurrentOrderAction;
    type ActionResult = CurrentOrderActionResult;
    type Error = OrderError;

    fn load(repo: &dyn Repository) -> Result<Option<Self>, FrameworkError> {
        Ok(repo.current_order()?.map(CurrentOrder))
    }

    fn save(&self, repo: &dyn Repository) -> Result<(), FrameworkError> {
        Ok(repo.save_current_order(&self.0)?)
    }

    fn clear(repo: &dyn Repository) -> Result<(), FrameworkError> {
        Ok(repo.clear_current_order()?)
    }

    fn is_retired(&self) -> bool {
        self.0.status.is_terminal()
    }

    fn handle_action(
        &mut self,
        action: CurrentOrderAction,
    ) -> Result<CurrentOrderActionResult, OrderError> {
        match action {
            CurrentOrderAction::Advance { order_id, status } => {
                if order_id != self.0.id {
                    return Err(OrderError::OrderMismatch {
                        current: self.0.id.clone(),
                        requested: order_id,
                    });
                }
                let from = self.0.status;
                if from.next() != Some(status) {
                    return Err(OrderError::InvalidTransition { from, to: status });
                }
                debug!(order_id = %self.0.id, %from, to = %status, "Advancing order");
                self.0.status = status;
                Ok(CurrentOrderActionResult::Advance(status))
            }
        }
    }
}

impl Record for LastOrder {
    const NAME: &'static str = "last_order";
    type Action = Infallible;
    type ActionResult = ();
    type Error = OrderError;

    fn load(repo: &dyn Repository) -> Result<Option<Self>, FrameworkError> {
        Ok(repo.last_order()?.map(LastOrder))
    }

    fn save(&self, repo: &dyn Repository) -> Result<(), FrameworkError> {
        Ok(repo.save_last_order(&self.0)?)
    }

    fn handle_action(&mut self, action: Infallible) -> Result<(), OrderError> {
        match action {}
    }
}
