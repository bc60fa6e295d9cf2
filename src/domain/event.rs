use serde::{Deserialize, Serialize};

use super::Product;

/// Domain events emitted by successful ledger mutations.
///
/// Each variant carries the full product snapshot as it stands right after
/// the mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "product")]
pub enum LedgerEvent {
    ProductCreated(Product),
    ProductPurchased(Product),
}

impl LedgerEvent {
    pub fn product(&self) -> &Product {
        match self {
            LedgerEvent::ProductCreated(product) | LedgerEvent::ProductPurchased(product) => product,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            LedgerEvent::ProductCreated(_) => "ProductCreated",
            LedgerEvent::ProductPurchased(_) => "ProductPurchased",
        }
    }
}
