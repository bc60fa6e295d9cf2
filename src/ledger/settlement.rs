//! Balance book the ledger settles purchases through.

use std::collections::HashMap;

use crate::domain::{AccountId, Amount};
use crate::error::TransferError;

/// Moves funds between accounts.
///
/// `transfer` must be all-or-nothing: on `Err` no balance may have changed.
pub trait Settlement: Send + 'static {
    fn balance_of(&self, account: &AccountId) -> Amount;

    /// Credits `amount` to `account`, returning the new balance.
    fn deposit(&mut self, account: &AccountId, amount: Amount) -> Result<Amount, TransferError>;

    fn transfer(&mut self, from: &AccountId, to: &AccountId, amount: Amount) -> Result<(), TransferError>;
}

/// Double-entry, in-memory balance book.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBank {
    balances: HashMap<AccountId, Amount>,
}

impl InMemoryBank {
    pub fn with_balances(balances: impl IntoIterator<Item = (AccountId, Amount)>) -> Self {
        Self {
            balances: balances.into_iter().collect(),
        }
    }

    /// Sum of every balance. Transfers never change it.
    #[cfg(test)]
    pub fn total(&self) -> Amount {
        self.balances.values().sum()
    }
}

impl Settlement for InMemoryBank {
    fn balance_of(&self, account: &AccountId) -> Amount {
        self.balances.get(account).copied().unwrap_or(0)
    }

    fn deposit(&mut self, account: &AccountId, amount: Amount) -> Result<Amount, TransferError> {
        let balance = self
            .balance_of(account)
            .checked_add(amount)
            .ok_or_else(|| TransferError::BalanceOverflow {
                account: account.clone(),
            })?;
        self.balances.insert(account.clone(), balance);
        Ok(balance)
    }

    fn transfer(&mut self, from: &AccountId, to: &AccountId, amount: Amount) -> Result<(), TransferError> {
        let available = self.balance_of(from);
        if available < amount {
            return Err(TransferError::InsufficientFunds {
                account: from.clone(),
                requested: amount,
                available,
            });
        }
        if from == to {
            return Ok(());
        }

        // Both legs are computed before either is written.
        let debited = available - amount;
        let credited = self
            .balance_of(to)
            .checked_add(amount)
            .ok_or_else(|| TransferError::BalanceOverflow { account: to.clone() })?;

        self.balances.insert(from.clone(), debited);
        self.balances.insert(to.clone(), credited);
        Ok(())
    }
}
