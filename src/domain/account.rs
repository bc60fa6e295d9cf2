use std::fmt;

use serde::{Deserialize, Serialize};

/// An amount in the smallest indivisible unit of the settlement currency.
pub type Amount = u128;

/// One whole unit of the settlement currency, expressed in its smallest unit.
pub const ETHER: Amount = 1_000_000_000_000_000_000;

/// Identity of a party calling into the marketplace.
///
/// The hosting environment supplies this with every call; the ledger only
/// compares identities and never authenticates them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(String);

impl AccountId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
