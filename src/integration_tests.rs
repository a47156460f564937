#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::app_system::StoreSystem;
    use crate::catalog_actor::CatalogError;
    use crate::clients::{CartClient, LoyaltyClient, OrderClient};
    use crate::config::StoreConfig;
    use crate::domain::{
        Cart, CartItem, CheckoutField, CheckoutRequest, LoyaltyProfile, OrderStatus, PointsAward, Product,
        ProductDraft, ProductFilter, Tier,
    };
    use crate::loyalty_actor::{LoyaltyAction, LoyaltyActionResult, LoyaltyError};
    use crate::mock_framework::{create_mock_client, expect_action, expect_clear, expect_get, expect_replace};
    use crate::order_actor::{CurrentOrder, LastOrder, OrderError};
    use crate::storage::{JsonFileStore, MemoryStore, Repository, StoreRepository};

    fn hamper() -> Product {
        Product::new("h1", "Festive Hamper", 300, 10)
    }

    fn memory_system() -> (StoreSystem, Arc<dyn Repository>) {
        let repo: Arc<dyn Repository> = Arc::new(StoreRepository::new(MemoryStore::new()));
        let system = StoreSystem::new(repo.clone(), &StoreConfig::default()).unwrap();
        (system, repo)
    }

    #[tokio::test]
    async fn test_place_order_flow() {
        // 1. Setup Mocks
        let (cart_inner, mut cart_rx) = create_mock_client::<Cart>(10);
        let (loyalty_inner, mut loyalty_rx) = create_mock_client::<LoyaltyProfile>(10);
        let (current_inner, mut current_rx) = create_mock_client::<CurrentOrder>(10);
        let (last_inner, mut last_rx) = create_mock_client::<LastOrder>(10);

        let order_client = OrderClient::new(
            current_inner,
            last_inner,
            CartClient::new(cart_inner),
            LoyaltyClient::new(loyalty_inner),
        );

        // 2. Execute checkout in background
        let order_task = tokio::spawn(async move {
            order_client
                .place_order(CheckoutRequest::new("X", "1", "cod"))
                .await
        });

        // 3. Verify Interactions

        // Expect Cart Get
        let responder = expect_get(&mut cart_rx).await.expect("Expected Cart Get");
        let cart = Cart::new(vec![CartItem::new(hamper(), 2)]);
        responder.send(Ok(Some(cart))).unwrap();

        // Expect Last Order Replace
        let (LastOrder(last), responder) = expect_replace(&mut last_rx).await.expect("Expected Last Order Replace");
        assert_eq!(last.total, 708);
        assert_eq!(last.status, OrderStatus::Placed);
        responder.send(Ok(())).unwrap();

        // Expect Current Order Replace
        let (CurrentOrder(current), responder) =
            expect_replace(&mut current_rx).await.expect("Expected Current Order Replace");
        assert_eq!(current, last);
        responder.send(Ok(())).unwrap();

        // Expect Loyalty Award (Action)
        let (action, responder) = expect_action(&mut loyalty_rx).await.expect("Expected Loyalty Action");
        match action {
            LoyaltyAction::CompleteOrder { total } => assert_eq!(total, 708),
            _ => panic!("Unexpected action: {:?}", action),
        }
        let award = PointsAward {
            points: 70,
            balance: 70,
            promoted_to: None,
        };
        responder.send(Ok(LoyaltyActionResult::CompleteOrder(award))).unwrap();

        // Expect Cart Clear
        let responder = expect_clear(&mut cart_rx).await.expect("Expected Cart Clear");
        responder.send(Ok(())).unwrap();

        // 4. Verify Result
        let order = order_task.await.unwrap().unwrap();
        assert_eq!(order, last);
        assert!(order.id.starts_with("QC"));
    }

    #[tokio::test]
    async fn rejected_checkout_touches_nothing_but_the_cart_read() {
        let (cart_inner, mut cart_rx) = create_mock_client::<Cart>(10);
        let (loyalty_inner, mut loyalty_rx) = create_mock_client::<LoyaltyProfile>(10);
        let (current_inner, mut current_rx) = create_mock_client::<CurrentOrder>(10);
        let (last_inner, mut last_rx) = create_mock_client::<LastOrder>(10);
        let order_client = OrderClient::new(
            current_inner,
            last_inner,
            CartClient::new(cart_inner),
            LoyaltyClient::new(loyalty_inner),
        );

        let order_task = tokio::spawn(async move {
            order_client
                .place_order(CheckoutRequest::new("X", "1", "cod"))
                .await
        });

        let responder = expect_get(&mut cart_rx).await.expect("Expected Cart Get");
        responder.send(Ok(Some(Cart::default()))).unwrap();

        let result = order_task.await.unwrap();
        assert!(matches!(result, Err(OrderError::Validation(CheckoutField::Cart))));
        assert!(cart_rx.try_recv().is_err());
        assert!(last_rx.try_recv().is_err());
        assert!(current_rx.try_recv().is_err());
        assert!(loyalty_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn checkout_end_to_end() {
        let (system, repo) = memory_system();
        system.cart_client.add_to_cart(hamper()).await.unwrap();
        system.cart_client.add_to_cart(hamper()).await.unwrap();

        let pricing = system.cart_client.cart().await.unwrap().pricing();
        assert_eq!((pricing.subtotal, pricing.tax, pricing.delivery_fee), (600, 108, 0));

        let order = system
            .order_client
            .place_order(CheckoutRequest::new("X", "1", "cod"))
            .await
            .unwrap();
        assert_eq!(order.total, 708);
        assert_eq!(order.status, OrderStatus::Placed);
        assert_eq!(order.estimated_delivery - order.timestamp, 10 * 60 * 1_000);

        let profile = system.loyalty_client.profile().await.unwrap();
        assert_eq!(profile.points, 70);
        assert_eq!(profile.orders_count, 1);

        assert!(system.cart_client.cart().await.unwrap().is_empty());
        assert!(repo.cart().unwrap().is_empty());
        assert_eq!(repo.last_order().unwrap(), Some(order.clone()));
        assert_eq!(system.order_client.current_order().await.unwrap(), Some(order));

        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn validation_failures_write_nothing() {
        let (system, repo) = memory_system();
        system.cart_client.add_to_cart(hamper()).await.unwrap();

        let cases = [
            (CheckoutRequest::new("   ", "1", "cod"), "address"),
            (CheckoutRequest { address: "X".into(), time_slot: None, payment_method: Some("cod".into()) }, "slot"),
            (CheckoutRequest::new("X", "4", "cod"), "unavailable"),
            (CheckoutRequest::new("X", "1", "bitcoin"), "payment"),
        ];
        for (request, case) in cases {
            let result = system.order_client.place_order(request).await;
            assert!(result.is_err(), "{} should be rejected", case);
        }

        assert_eq!(repo.cart().unwrap().len(), 1);
        assert!(repo.last_order().unwrap().is_none());
        assert!(repo.current_order().unwrap().is_none());
        assert_eq!(repo.user().unwrap(), LoyaltyProfile::default());
        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn rewards_spend_points() {
        let repo = StoreRepository::new(MemoryStore::new());
        repo.save_user(&LoyaltyProfile {
            points: 520,
            tier: Tier::Silver,
            orders_count: 6,
        })
        .unwrap();
        let repo: Arc<dyn Repository> = Arc::new(repo);
        let system = StoreSystem::new(repo.clone(), &StoreConfig::default()).unwrap();

        assert_eq!(system.loyalty_client.claim_reward("discount10").await.unwrap(), 270);
        assert!(matches!(
            system.loyalty_client.claim_reward("premium").await,
            Err(LoyaltyError::InsufficientPoints { required: 500, available: 270 })
        ));
        assert!(matches!(
            system.loyalty_client.claim_reward("free-lunch").await,
            Err(LoyaltyError::UnknownReward(_))
        ));

        let stored = repo.user().unwrap();
        assert_eq!(stored.points, 270);
        assert_eq!(stored.tier, Tier::Silver);
        assert_eq!(stored.orders_count, 6);
        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn reorder_restores_the_last_order() {
        let (system, _repo) = memory_system();
        assert!(matches!(
            system.order_client.reorder().await,
            Err(OrderError::NoPreviousOrder)
        ));

        system.cart_client.add_to_cart(hamper()).await.unwrap();
        system.cart_client.update_quantity("h1", 3).await.unwrap();
        system
            .order_client
            .place_order(CheckoutRequest::new("X", "2", "upi"))
            .await
            .unwrap();
        assert!(system.cart_client.cart().await.unwrap().is_empty());

        assert_eq!(system.order_client.reorder().await.unwrap(), 3);
        assert_eq!(system.cart_client.cart().await.unwrap().quantity_of("h1"), 3);
        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn admin_edits_override_the_seed_catalog() {
        let (system, repo) = memory_system();
        let catalog = &system.catalog_client;

        assert!(matches!(catalog.login("letmein"), Err(CatalogError::InvalidPassword)));
        let session = catalog.login("admin123").unwrap();

        let draft = ProductDraft {
            name: "Coconut Water".to_string(),
            price: 40,
            image: "coconut.jpg".to_string(),
            stock: 15,
            ..ProductDraft::default()
        };
        let added = catalog.add_product(&session, draft).await.unwrap();
        assert!(added.id.chars().all(|c| c.is_ascii_digit()));
        assert_eq!(repo.product_override().unwrap().len(), 13);
        assert_eq!(catalog.product(&added.id).await.unwrap(), Some(added.clone()));
        let page = catalog.search(&ProductFilter::default()).await.unwrap();
        assert_eq!((page.products.len(), page.total), (9, 13));
        assert!(page.has_more());

        let mut cheaper = added.clone();
        cheaper.price = 35;
        catalog.update_product(&session, cheaper).await.unwrap();
        assert_eq!(catalog.product(&added.id).await.unwrap().map(|p| p.price), Some(35));

        catalog.delete_product(&session, "1").await.unwrap();
        assert!(catalog.product("1").await.unwrap().is_none());

        catalog.reset_catalog(&session).await.unwrap();
        assert!(repo.product_override().unwrap().is_empty());
        assert!(catalog.product("1").await.unwrap().is_some());
        assert!(catalog.product(&added.id).await.unwrap().is_none());
        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn state_survives_a_restart_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        let open = || -> Arc<dyn Repository> {
            Arc::new(StoreRepository::new(JsonFileStore::open(&path).unwrap()))
        };

        let system = StoreSystem::new(open(), &StoreConfig::default()).unwrap();
        system.cart_client.add_to_cart(hamper()).await.unwrap();
        system.cart_client.add_to_cart(hamper()).await.unwrap();
        system.shutdown().await.unwrap();

        let system = StoreSystem::new(open(), &StoreConfig::default()).unwrap();
        assert_eq!(system.cart_client.cart().await.unwrap().quantity_of("h1"), 2);
        system.shutdown().await.unwrap();
    }
}
