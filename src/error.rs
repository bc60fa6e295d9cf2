use thiserror::Error;

use crate::domain::{AccountId, Amount, ProductId};

/// Failures raised by the settlement book while moving funds.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransferError {
    #[error("Insufficient funds in {account}: requested {requested}, available {available}")]
    InsufficientFunds {
        account: AccountId,
        requested: Amount,
        available: Amount,
    },
    #[error("Balance overflow for {account}")]
    BalanceOverflow { account: AccountId },
}

/// Every reason a ledger call can be rejected.
///
/// A rejected call leaves the ledger, the balances and the event log exactly
/// as they were before it.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Product not found: {0}")]
    NotFound(ProductId),
    #[error("Insufficient payment: price {price}, paid {payment}")]
    InsufficientPayment { price: Amount, payment: Amount },
    #[error("Product already sold: {0}")]
    AlreadySold(ProductId),
    #[error("Owner cannot purchase their own product: {0}")]
    SelfPurchaseForbidden(ProductId),
    #[error("Exact payment required: price {price}, paid {payment}")]
    ExactPaymentRequired { price: Amount, payment: Amount },
    #[error("Transfer failed: {0}")]
    Transfer(#[from] TransferError),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

pub type LedgerResult<T> = Result<T, LedgerError>;
