mod actors;
mod app_system;
mod clients;
mod domain;
mod error;
mod ledger;
mod messages;

#[cfg(test)]
mod mock_framework;

use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{info, warn, Instrument};

use crate::app_system::{setup_tracing, MarketplaceConfig, MarketplaceSystem};
use crate::domain::{AccountId, LedgerEvent, ProductCreate, ProductId, ETHER};
use crate::ledger::InMemoryBank;

/// Logs live ledger events until the feed closes. Returns how many events
/// were logged and how many were skipped because this subscriber lagged.
async fn log_events(mut events: broadcast::Receiver<LedgerEvent>) -> (u64, u64) {
    let (mut logged, mut skipped) = (0, 0);
    loop {
        match events.recv().await {
            Ok(event) => {
                let product = event.product();
                info!(event = event.kind(), product_id = %product.id, owner = %product.owner, "Ledger event");
                logged += 1;
            }
            Err(RecvError::Lagged(missed)) => {
                warn!(missed, "Event feed lagged, some events were not logged");
                skipped += missed;
            }
            Err(RecvError::Closed) => break,
        }
    }
    (logged, skipped)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Setup tracing once for the entire application
    setup_tracing();

    let config = MarketplaceConfig::from_env()?;
    info!(marketplace = %config.name, policy = ?config.overpayment_policy, "Starting marketplace");

    let deployer = AccountId::new("deployer");
    let seller = AccountId::new("seller");
    let buyer = AccountId::new("buyer");
    let bank = InMemoryBank::with_balances([(deployer.clone(), 100 * ETHER), (seller.clone(), 100 * ETHER)]);

    let system = MarketplaceSystem::with_settlement(config, bank);
    let client = system.ledger_client.clone();
    let event_log = tokio::spawn(log_events(client.subscribe()));

    // The buyer arrives with an empty account and funds it before shopping.
    client.deposit(buyer.clone(), 100 * ETHER).await?;

    let span = tracing::info_span!("listing");
    let receipt = async {
        info!("Listing product");
        client
            .create_product(ProductCreate::new("Iphone X", ETHER), seller.clone())
            .await
    }
    .instrument(span)
    .await?;
    let id = receipt.value;

    let span = tracing::info_span!("purchase");
    async {
        info!("Buying product");
        client.purchase_product(id, ETHER, buyer.clone()).await
    }
    .instrument(span)
    .await?;

    let seller_balance = client.balance_of(seller.clone()).await?;
    let buyer_balance = client.balance_of(buyer.clone()).await?;
    info!(%seller_balance, %buyer_balance, "Purchase settled");

    // Each of these is rejected and leaves the ledger untouched.
    let attempts = [
        ("unknown product", ProductId::new(99), ETHER, buyer.clone()),
        ("underpaid", id, ETHER / 2, buyer.clone()),
        ("already sold", id, ETHER, deployer.clone()),
        ("owner rebuys", id, ETHER, buyer.clone()),
    ];
    for (label, id, payment, caller) in attempts {
        if let Err(e) = client.purchase_product(id, payment, caller).await {
            warn!(attempt = label, error = %e, "Purchase rejected as expected");
        }
    }

    let name = client.marketplace_name().await?;
    let product_count = client.product_count().await?;
    info!(marketplace = %name, product_count, last_id = id.get(), "Ledger state");
    if let Some(product) = client.get_product(id).await? {
        info!(owner = %product.owner, purchased = product.purchased, "Final product state");
    }

    for event in client.list_events().await? {
        println!("{}", serde_json::to_string(&event)?);
    }

    system.shutdown().await?;
    drop(client);
    // The feed closes once the service and every client handle are gone.
    if let Ok((logged, skipped)) = event_log.await {
        info!(logged, skipped, "Event feed closed");
    }

    info!("Marketplace stopped");
    Ok(())
}
