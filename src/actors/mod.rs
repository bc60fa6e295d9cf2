use tokio::sync::{broadcast, mpsc};
use tracing::{debug, error, info, instrument, warn};

use crate::clients::LedgerClient;
use crate::domain::{AccountId, Amount, LedgerEvent, Product, ProductCreate, ProductId};
use crate::error::LedgerError;
use crate::ledger::{InMemoryBank, ProductLedger, Receipt, Settlement};
use crate::messages::{LedgerRequest, ServiceResponse};

/// Number of events a slow subscriber may fall behind before it starts
/// missing them.
pub const EVENT_BROADCAST_CAPACITY: usize = 64;

// =============================================================================
// LEDGER SERVICE
// =============================================================================

/// Actor that owns the one [`ProductLedger`] of a marketplace.
///
/// Requests are drained from the mailbox one at a time and every handler is
/// synchronous, so each request sees the fully applied result of all earlier
/// ones. Of several concurrent purchases of the same product exactly one can
/// succeed.
pub struct LedgerService<S = InMemoryBank> {
    receiver: mpsc::Receiver<LedgerRequest>,
    ledger: ProductLedger<S>,
    events: broadcast::Sender<LedgerEvent>,
}

impl<S: Settlement> LedgerService<S> {
    pub fn new(buffer_size: usize, ledger: ProductLedger<S>) -> (Self, LedgerClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let (events, _) = broadcast::channel(EVENT_BROADCAST_CAPACITY);
        let service = Self {
            receiver,
            ledger,
            events: events.clone(),
        };
        let client = LedgerClient::new(sender, events);
        (service, client)
    }

    #[instrument(name = "ledger_service", skip(self))]
    pub async fn run(mut self) {
        info!(marketplace = %self.ledger.name(), "LedgerService starting");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                LedgerRequest::CreateProduct {
                    listing,
                    caller,
                    respond_to,
                } => {
                    self.handle_create_product(listing, caller, respond_to);
                }
                LedgerRequest::PurchaseProduct {
                    id,
                    payment,
                    caller,
                    respond_to,
                } => {
                    self.handle_purchase_product(id, payment, caller, respond_to);
                }
                LedgerRequest::GetProduct { id, respond_to } => {
                    self.handle_get_product(id, respond_to);
                }
                LedgerRequest::ProductCount { respond_to } => {
                    let _ = respond_to.send(Ok(self.ledger.product_count()));
                }
                LedgerRequest::MarketplaceName { respond_to } => {
                    let _ = respond_to.send(Ok(self.ledger.name().to_string()));
                }
                LedgerRequest::ListEvents { respond_to } => {
                    let _ = respond_to.send(Ok(self.ledger.events().to_vec()));
                }
                LedgerRequest::Deposit {
                    account,
                    amount,
                    respond_to,
                } => {
                    self.handle_deposit(account, amount, respond_to);
                }
                LedgerRequest::BalanceOf { account, respond_to } => {
                    let _ = respond_to.send(Ok(self.ledger.settlement().balance_of(&account)));
                }
                LedgerRequest::Shutdown => {
                    info!("LedgerService shutting down");
                    break;
                }
            }
        }

        info!("LedgerService stopped");
    }

    #[instrument(
        fields(product_name = %listing.name, price = %listing.price, caller = %caller),
        skip(self, listing, caller, respond_to)
    )]
    fn handle_create_product(
        &mut self,
        listing: ProductCreate,
        caller: AccountId,
        respond_to: ServiceResponse<Receipt<ProductId>, LedgerError>,
    ) {
        debug!("Processing create_product request");

        let result = self.ledger.create_product(listing.name, listing.price, &caller);

        match &result {
            Ok(receipt) => {
                info!(product_id = %receipt.value, "Product listed");
                self.publish(&receipt.event);
            }
            Err(e) => warn!(error = %e, "Product listing rejected"),
        }

        let _ = respond_to.send(result);
    }

    #[instrument(
        fields(product_id = %id, payment = %payment, caller = %caller),
        skip(self, caller, respond_to)
    )]
    fn handle_purchase_product(
        &mut self,
        id: ProductId,
        payment: Amount,
        caller: AccountId,
        respond_to: ServiceResponse<Receipt<()>, LedgerError>,
    ) {
        debug!("Processing purchase_product request");

        let seller = self.ledger.product(id).map(|product| product.owner.clone());
        let result = self.ledger.purchase_product(id, payment, &caller);

        match &result {
            Ok(receipt) => {
                let product = receipt.event.product();
                info!(
                    seller = %seller.as_ref().map(AccountId::as_str).unwrap_or_default(),
                    price = %product.price,
                    "Product sold"
                );
                self.publish(&receipt.event);
            }
            Err(LedgerError::Transfer(e)) => error!(error = %e, "Settlement failed, purchase rolled back"),
            Err(e) => warn!(error = %e, "Purchase rejected"),
        }

        let _ = respond_to.send(result);
    }

    #[instrument(fields(product_id = %id), skip(self, respond_to))]
    fn handle_get_product(&self, id: ProductId, respond_to: ServiceResponse<Option<Product>, LedgerError>) {
        debug!("Processing get_product request");

        let product = self.ledger.product(id).cloned();

        match &product {
            Some(product) => debug!(product_name = %product.name, purchased = product.purchased, "Product found"),
            None => debug!("Product not found"),
        }

        let _ = respond_to.send(Ok(product));
    }

    #[instrument(fields(account = %account, amount = %amount), skip(self, account, respond_to))]
    fn handle_deposit(&mut self, account: AccountId, amount: Amount, respond_to: ServiceResponse<Amount, LedgerError>) {
        debug!("Processing deposit request");

        let result = self
            .ledger
            .settlement_mut()
            .deposit(&account, amount)
            .map_err(LedgerError::from);

        match &result {
            Ok(balance) => info!(balance = %balance, "Account funded"),
            Err(e) => warn!(error = %e, "Deposit rejected"),
        }

        let _ = respond_to.send(result);
    }

    fn publish(&self, event: &LedgerEvent) {
        // No subscribers is not an error; the event is already in the log.
        if self.events.send(event.clone()).is_err() {
            debug!(event = event.kind(), "No event subscribers");
        }
    }
}
