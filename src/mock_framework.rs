//! # Mock Framework
//!
//! Utilities for testing code that talks to the ledger through a
//! [`LedgerClient`] without running a [`LedgerService`](crate::actors::LedgerService).
//!
//! Use [`create_mock_client`] to get a client and the receiver its requests
//! land on, then helpers like [`expect_create`] or [`expect_purchase`] to
//! inspect each request and answer it however the test needs.

use tokio::sync::{broadcast, mpsc};

use crate::actors::EVENT_BROADCAST_CAPACITY;
use crate::clients::LedgerClient;
use crate::domain::{AccountId, Amount, Product, ProductCreate, ProductId};
use crate::error::LedgerError;
use crate::ledger::Receipt;
use crate::messages::{LedgerRequest, ServiceResponse};

/// Creates a client whose requests arrive on the returned receiver.
pub fn create_mock_client(buffer_size: usize) -> (LedgerClient, mpsc::Receiver<LedgerRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    let (events, _) = broadcast::channel(EVENT_BROADCAST_CAPACITY);
    (LedgerClient::new(sender, events), receiver)
}

/// Helper to verify that the next message is a CreateProduct request
pub async fn expect_create(
    receiver: &mut mpsc::Receiver<LedgerRequest>,
) -> Option<(ProductCreate, AccountId, ServiceResponse<Receipt<ProductId>, LedgerError>)> {
    match receiver.recv().await {
        Some(LedgerRequest::CreateProduct {
            listing,
            caller,
            respond_to,
        }) => Some((listing, caller, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a PurchaseProduct request
pub async fn expect_purchase(
    receiver: &mut mpsc::Receiver<LedgerRequest>,
) -> Option<(ProductId, Amount, AccountId, ServiceResponse<Receipt<()>, LedgerError>)> {
    match receiver.recv().await {
        Some(LedgerRequest::PurchaseProduct {
            id,
            payment,
            caller,
            respond_to,
        }) => Some((id, payment, caller, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a GetProduct request
pub async fn expect_get(
    receiver: &mut mpsc::Receiver<LedgerRequest>,
) -> Option<(ProductId, ServiceResponse<Option<Product>, LedgerError>)> {
    match receiver.recv().await {
        Some(LedgerRequest::GetProduct { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{LedgerEvent, ETHER};

    #[tokio::test]
    async fn test_mock_client_create() {
        let (client, mut receiver) = create_mock_client(10);

        let create_task = tokio::spawn(async move {
            client
                .create_product(ProductCreate::new("Iphone X", ETHER), AccountId::new("seller"))
                .await
        });

        let (listing, caller, responder) = expect_create(&mut receiver).await.expect("Expected Create request");
        assert_eq!(listing, ProductCreate::new("Iphone X", ETHER));
        assert_eq!(caller, AccountId::new("seller"));

        let product = Product {
            id: ProductId::new(1),
            name: listing.name,
            price: listing.price,
            owner: caller,
            purchased: false,
        };
        let receipt = Receipt {
            value: ProductId::new(1),
            event: LedgerEvent::ProductCreated(product),
        };
        responder.send(Ok(receipt.clone())).unwrap();

        let result = create_task.await.unwrap();
        assert_eq!(result, Ok(receipt));
    }

    #[tokio::test]
    async fn test_mock_client_passes_through_rejections() {
        let (client, mut receiver) = create_mock_client(10);

        let purchase_task = tokio::spawn(async move {
            client
                .purchase_product(ProductId::new(99), ETHER, AccountId::new("buyer"))
                .await
        });

        let (id, payment, caller, responder) = expect_purchase(&mut receiver).await.expect("Expected Purchase request");
        assert_eq!(id, ProductId::new(99));
        assert_eq!(payment, ETHER);
        assert_eq!(caller, AccountId::new("buyer"));
        responder.send(Err(LedgerError::NotFound(id))).unwrap();

        let result = purchase_task.await.unwrap();
        assert_eq!(result, Err(LedgerError::NotFound(ProductId::new(99))));
    }

    #[tokio::test]
    async fn test_dropped_responder_is_a_communication_error() {
        let (client, mut receiver) = create_mock_client(10);

        let get_task = tokio::spawn(async move { client.get_product(ProductId::new(1)).await });

        let (id, responder) = expect_get(&mut receiver).await.expect("Expected Get request");
        assert_eq!(id, ProductId::new(1));
        drop(responder);

        let result = get_task.await.unwrap();
        assert_eq!(
            result,
            Err(LedgerError::ActorCommunicationError("Actor dropped".to_string()))
        );
    }

    #[tokio::test]
    async fn test_closed_mailbox_is_a_communication_error() {
        let (client, receiver) = create_mock_client(10);
        drop(receiver);

        let result = client.product_count().await;
        assert_eq!(
            result,
            Err(LedgerError::ActorCommunicationError("Actor closed".to_string()))
        );
    }
}
