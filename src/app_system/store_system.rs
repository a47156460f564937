use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{error, info};

use super::error::SystemError;
use crate::actor_framework::{Record, RecordActor};
use crate::clients::{CartClient, CatalogClient, LoyaltyClient, OrderClient};
use crate::config::StoreConfig;
use crate::domain::{Cart, Catalog, LoyaltyProfile};
use crate::error::FrameworkError;
use crate::order_actor::{CurrentOrder, LastOrder};
use crate::storage::Repository;
use crate::tracking::TrackingSimulator;

/// The storefront: one actor per persisted record, the clients wired over
/// them and the tracking simulator.
pub struct StoreSystem {
    pub cart_client: CartClient,
    pub loyalty_client: LoyaltyClient,
    pub catalog_client: CatalogClient,
    pub order_client: OrderClient,
    pub tracking: TrackingSimulator,
    handles: Vec<(&'static str, JoinHandle<()>)>,
}

impl StoreSystem {
    pub fn new(repository: Arc<dyn Repository>, config: &StoreConfig) -> Result<Self, SystemError> {
        let capacity = config.channel_capacity;
        let mut handles = Vec::new();

        // 1. Setup the record actors
        let cart = spawn::<Cart>(capacity, &repository, &mut handles)?;
        let loyalty = spawn::<LoyaltyProfile>(capacity, &repository, &mut handles)?;
        let catalog = spawn::<Catalog>(capacity, &repository, &mut handles)?;
        let current = spawn::<CurrentOrder>(capacity, &repository, &mut handles)?;
        let last = spawn::<LastOrder>(capacity, &repository, &mut handles)?;

        // 2. Wire the clients
        let cart_client = CartClient::new(cart);
        let loyalty_client = LoyaltyClient::new(loyalty);
        let catalog_client = CatalogClient::new(catalog);
        let order_client = OrderClient::new(current, last, cart_client.clone(), loyalty_client.clone());

        // 3. Tracking runs on top of the order client
        let tracking = TrackingSimulator::new(order_client.clone(), config.tracking_schedule())?;

        info!(actors = handles.len(), "Store system started");
        Ok(Self {
            cart_client,
            loyalty_client,
            catalog_client,
            order_client,
            tracking,
            handles,
        })
    }

    /// Signals every actor to stop and waits for them.
    pub async fn shutdown(self) -> Result<(), SystemError> {
        info!("Shutting down system...");

        // A closed mailbox means the actor already stopped.
        let _ = self.cart_client.shutdown().await;
        let _ = self.loyalty_client.shutdown().await;
        let _ = self.catalog_client.shutdown().await;
        let _ = self.order_client.shutdown().await;

        for (name, handle) in self.handles {
            if let Err(e) = handle.await {
                error!(actor = name, error = %e, "Actor task failed");
                return Err(e.into());
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}

fn spawn<R: Record>(
    capacity: usize,
    repository: &Arc<dyn Repository>,
    handles: &mut Vec<(&'static str, JoinHandle<()>)>,
) -> Result<crate::actor_framework::RecordClient<R>, FrameworkError> {
    let (actor, client) = RecordActor::<R>::new(capacity, Arc::clone(repository))?;
    handles.push((R::NAME, tokio::spawn(actor.run())));
    Ok(client)
}
