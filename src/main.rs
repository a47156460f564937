mod domain;
mod clients;
mod config;
mod error;
mod storage;
mod tracking;

mod app_system;

#[cfg(test)]
mod mock_framework;
#[cfg(test)]
mod integration_tests;

mod actor_framework;
mod cart_actor;
mod catalog_actor;
mod loyalty_actor;
mod order_actor;

use std::sync::Arc;

use tracing::{error, info, warn, Instrument};

use crate::app_system::{setup_tracing, StoreSystem};
use crate::config::StoreConfig;
use crate::domain::{format_currency, CheckoutRequest, ProductDraft, ProductFilter, TimeOfDay};
use crate::storage::{JsonFileStore, StoreRepository};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Setup tracing once for the entire application
    setup_tracing();

    let config = StoreConfig::load();
    info!(store = %config.store_path.display(), "Starting QuickCommerce storefront");

    let store = JsonFileStore::open(&config.store_path)?;
    let system = StoreSystem::new(Arc::new(StoreRepository::new(store)), &config)?;

    let time = TimeOfDay::now();
    info!(%time, "{}", time.greeting());

    // Browse and fill the cart
    let span = tracing::info_span!("shopping");
    async {
        let suggestions = system.catalog_client.suggestions(time).await?;
        info!(count = suggestions.len(), "Suggested for right now");

        let filter = ProductFilter {
            category: Some("Beverages".to_string()),
            ..ProductFilter::default()
        };
        let page = system.catalog_client.search(&filter).await?;
        info!(shown = page.products.len(), total = page.total, "Beverages");
        for product in page.products.into_iter().take(2) {
            let name = product.name.clone();
            match system.cart_client.add_to_cart(product).await {
                Ok(quantity) => info!(product = %name, quantity, "Added to cart"),
                Err(e) => warn!(product = %name, error = %e, "Could not add to cart"),
            }
        }
        Ok::<_, Box<dyn std::error::Error>>(())
    }
    .instrument(span)
    .await?;

    let pricing = system.cart_client.cart().await?.pricing();
    info!(
        subtotal = %format_currency(pricing.subtotal),
        tax = %format_currency(pricing.tax),
        delivery = %format_currency(pricing.delivery_fee),
        total = %format_currency(pricing.total),
        "Cart summary"
    );

    // Checkout - this flows through the cart, order and loyalty actors
    let span = tracing::info_span!("checkout");
    let order_result = async {
        info!("Placing order");
        system
            .order_client
            .place_order(CheckoutRequest::new("221B Baker Street", "1", "cod"))
            .await
    }
    .instrument(span)
    .await;

    match order_result {
        Ok(order) => {
            info!(order_id = %order.id, total = %format_currency(order.total), "Order placed successfully");

            if let Some(mut handle) = system.tracking.start().await? {
                while let Some(update) = handle.next_update().await {
                    info!(status = %update.status.label(), countdown = %handle.countdown(), "{}", update.message);
                }
                let outcome = handle.wait().await?;
                info!(status = %outcome.final_status, reason = ?outcome.reason, "Tracking finished");
            }
        }
        Err(e) => error!(error = %e, "Order processing failed"),
    }

    let profile = system.loyalty_client.profile().await?;
    let progress = system.loyalty_client.tier_progress().await?;
    info!(
        points = profile.points,
        tier = %profile.tier,
        orders = profile.orders_count,
        to_next = progress.points_to_next,
        "Loyalty status"
    );

    match system.order_client.reorder().await {
        Ok(units) => info!(units, "Previous order is back in the cart"),
        Err(e) => warn!(error = %e, "Reorder failed"),
    }

    // Admin edit
    let session = system.catalog_client.login("admin123")?;
    let draft = ProductDraft {
        name: "Coconut Water".to_string(),
        price: 40,
        image: "https://images.quickcommerce.example/coconut.jpg".to_string(),
        stock: 15,
        ..ProductDraft::default()
    };
    let added = system.catalog_client.add_product(&session, draft).await?;
    info!(product_id = %added.id, "Admin added product");
    system.catalog_client.delete_product(&session, &added.id).await?;
    system.catalog_client.reset_catalog(&session).await?;

    // Shutdown system gracefully
    system.shutdown().await?;

    info!("Application completed successfully");
    Ok(())
}
