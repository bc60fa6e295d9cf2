use std::fmt;

use serde::{Deserialize, Serialize};

use super::{AccountId, Amount};

/// Sequence number assigned to a product when it is listed, starting at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(u64);

impl ProductId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single listed item.
///
/// `owner` starts as the lister and becomes the buyer on purchase, at which
/// point `purchased` flips to `true` and the product never changes again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Amount,
    pub owner: AccountId,
    pub purchased: bool,
}

/// Payload for listing a new product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCreate {
    pub name: String,
    pub price: Amount,
}

impl ProductCreate {
    pub fn new(name: impl Into<String>, price: Amount) -> Self {
        Self {
            name: name.into(),
            price,
        }
    }
}
