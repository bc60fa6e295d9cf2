use tokio::sync::{broadcast, mpsc};
use tracing::{debug, instrument};

use crate::domain::{AccountId, Amount, LedgerEvent, Product, ProductCreate, ProductId};
use crate::error::LedgerError;
use crate::ledger::Receipt;
use crate::messages::LedgerRequest;

/// Cloneable handle to a running [`LedgerService`](crate::actors::LedgerService).
///
/// Every call is queued on the service mailbox, so calls made through any
/// clone are applied one at a time in arrival order.
#[derive(Clone)]
pub struct LedgerClient {
    sender: mpsc::Sender<LedgerRequest>,
    events: broadcast::Sender<LedgerEvent>,
}

impl LedgerClient {
    pub fn new(sender: mpsc::Sender<LedgerRequest>, events: broadcast::Sender<LedgerEvent>) -> Self {
        Self { sender, events }
    }

    /// Live feed of events emitted after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<LedgerEvent> {
        self.events.subscribe()
    }

    #[instrument(skip(self))]
    pub async fn shutdown(&self) -> Result<(), LedgerError> {
        debug!("Sending shutdown request");
        self.sender
            .send(LedgerRequest::Shutdown)
            .await
            .map_err(|e| LedgerError::ActorCommunicationError(e.to_string()))
    }
}

client_method!(LedgerClient => fn create_product(listing: ProductCreate, caller: AccountId) -> Receipt<ProductId> as LedgerRequest::CreateProduct, Error = LedgerError);
client_method!(LedgerClient => fn purchase_product(id: ProductId, payment: Amount, caller: AccountId) -> Receipt<()> as LedgerRequest::PurchaseProduct, Error = LedgerError);
client_method!(LedgerClient => fn get_product(id: ProductId) -> Option<Product> as LedgerRequest::GetProduct, Error = LedgerError);
client_method!(LedgerClient => fn product_count() -> u64 as LedgerRequest::ProductCount, Error = LedgerError);
client_method!(LedgerClient => fn marketplace_name() -> String as LedgerRequest::MarketplaceName, Error = LedgerError);
client_method!(LedgerClient => fn list_events() -> Vec<LedgerEvent> as LedgerRequest::ListEvents, Error = LedgerError);
client_method!(LedgerClient => fn deposit(account: AccountId, amount: Amount) -> Amount as LedgerRequest::Deposit, Error = LedgerError);
client_method!(LedgerClient => fn balance_of(account: AccountId) -> Amount as LedgerRequest::BalanceOf, Error = LedgerError);
