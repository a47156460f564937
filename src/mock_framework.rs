//! # Mock Framework
//!
//! Utilities for testing clients in isolation.
//!
//! Use [`create_mock_client`] to get a client and a receiver.
//! Then use helpers like [`expect_get`] or [`expect_action`] to answer each
//! request the client sends, in order.

use tokio::sync::mpsc;

use crate::actor_framework::{Record, RecordClient, RecordRequest, Response};

/// Creates a mock client and a receiver for asserting requests.
///
/// The client talks to a channel the test owns instead of a running
/// `RecordActor`, so each request can be inspected and answered with
/// whatever success or failure the test needs.
pub fn create_mock_client<R: Record>(buffer_size: usize) -> (RecordClient<R>, mpsc::Receiver<RecordRequest<R>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (RecordClient::new(sender), receiver)
}

/// Helper to verify that the next message is a Get request
pub async fn expect_get<R: Record>(
    receiver: &mut mpsc::Receiver<RecordRequest<R>>,
) -> Option<Response<Option<R>, R::Error>> {
    match receiver.recv().await {
        Some(RecordRequest::Get { respond_to }) => Some(respond_to),
        _ => None,
    }
}

/// Helper to verify that the next message is a Replace request
pub async fn expect_replace<R: Record>(
    receiver: &mut mpsc::Receiver<RecordRequest<R>>,
) -> Option<(R, Response<(), R::Error>)> {
    match receiver.recv().await {
        Some(RecordRequest::Replace { record, respond_to }) => Some((record, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Clear request
pub async fn expect_clear<R: Record>(
    receiver: &mut mpsc::Receiver<RecordRequest<R>>,
) -> Option<Response<(), R::Error>> {
    match receiver.recv().await {
        Some(RecordRequest::Clear { respond_to }) => Some(respond_to),
        _ => None,
    }
}

/// Helper to verify that the next message is an Action request
pub async fn expect_action<R: Record>(
    receiver: &mut mpsc::Receiver<RecordRequest<R>>,
) -> Option<(R::Action, Response<R::ActionResult, R::Error>)> {
    match receiver.recv().await {
        Some(RecordRequest::Action { action, respond_to }) => Some((action, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::CartClient;
    use crate::domain::{Cart, CartItem, Product};

    #[tokio::test]
    async fn test_mock_client() {
        let (client, mut receiver) = create_mock_client::<Cart>(10);
        let cart_client = CartClient::new(client);

        let read_task = tokio::spawn(async move { cart_client.cart().await });

        let responder = expect_get(&mut receiver).await.expect("Expected Get request");
        let cart = Cart::new(vec![CartItem::new(Product::new("1", "Milk", 60, 10), 2)]);
        responder.send(Ok(Some(cart.clone()))).unwrap();

        let result = read_task.await.unwrap().unwrap();
        assert_eq!(result, cart);
    }

    #[tokio::test]
    async fn unexpected_messages_yield_none() {
        let (client, mut receiver) = create_mock_client::<Cart>(10);
        tokio::spawn(async move { client.clear().await });

        assert!(expect_get(&mut receiver).await.is_none());
    }
}
