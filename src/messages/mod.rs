use tokio::sync::oneshot;

use crate::domain::{AccountId, Amount, LedgerEvent, Product, ProductCreate, ProductId};
use crate::error::LedgerError;
use crate::ledger::Receipt;

/// Generic type aliases for service communication
pub type ServiceResult<T, E> = std::result::Result<T, E>;
pub type ServiceResponse<T, E> = oneshot::Sender<ServiceResult<T, E>>;

/// Requests understood by the ledger service. Each variant carries its
/// parameters, the caller identity where one is needed, and a oneshot channel
/// for the response.
#[derive(Debug)]
pub enum LedgerRequest {
    CreateProduct {
        listing: ProductCreate,
        caller: AccountId,
        respond_to: ServiceResponse<Receipt<ProductId>, LedgerError>,
    },
    PurchaseProduct {
        id: ProductId,
        payment: Amount,
        caller: AccountId,
        respond_to: ServiceResponse<Receipt<()>, LedgerError>,
    },
    GetProduct {
        id: ProductId,
        respond_to: ServiceResponse<Option<Product>, LedgerError>,
    },
    ProductCount {
        respond_to: ServiceResponse<u64, LedgerError>,
    },
    MarketplaceName {
        respond_to: ServiceResponse<String, LedgerError>,
    },
    ListEvents {
        respond_to: ServiceResponse<Vec<LedgerEvent>, LedgerError>,
    },
    Deposit {
        account: AccountId,
        amount: Amount,
        respond_to: ServiceResponse<Amount, LedgerError>,
    },
    BalanceOf {
        account: AccountId,
        respond_to: ServiceResponse<Amount, LedgerError>,
    },
    Shutdown,
}
