//! The product registry and its purchase state machine.
//!
//! [`ProductLedger`] is plain synchronous state. Serializing concurrent
//! callers is the job of whoever hosts it, see
//! [`LedgerService`](crate::actors::LedgerService).

mod settlement;

pub use settlement::*;

use std::collections::BTreeMap;

use crate::domain::{AccountId, Amount, LedgerEvent, Product, ProductId};
use crate::error::{LedgerError, LedgerResult};

/// What happens when a buyer attaches more than the asking price.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OverpaymentPolicy {
    /// Only the price is debited; the excess never leaves the buyer.
    #[default]
    Refund,
    /// Any payment other than the exact price is rejected.
    RequireExact,
}

/// Result of a successful mutation together with the event it emitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt<T> {
    pub value: T,
    pub event: LedgerEvent,
}

/// Append-only store of every product ever listed.
#[derive(Debug)]
pub struct ProductLedger<S = InMemoryBank> {
    name: String,
    products: BTreeMap<ProductId, Product>,
    product_count: u64,
    policy: OverpaymentPolicy,
    settlement: S,
    events: Vec<LedgerEvent>,
}

impl<S: Settlement> ProductLedger<S> {
    pub fn new(name: impl Into<String>, settlement: S) -> Self {
        Self {
            name: name.into(),
            products: BTreeMap::new(),
            product_count: 0,
            policy: OverpaymentPolicy::default(),
            settlement,
            events: Vec::new(),
        }
    }

    pub fn with_policy(mut self, policy: OverpaymentPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Display name of the marketplace.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn product_count(&self) -> u64 {
        self.product_count
    }

    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.products.get(&id)
    }

    /// Every event emitted so far, oldest first.
    pub fn events(&self) -> &[LedgerEvent] {
        &self.events
    }

    pub fn settlement(&self) -> &S {
        &self.settlement
    }

    pub fn settlement_mut(&mut self) -> &mut S {
        &mut self.settlement
    }

    /// Lists a new product owned by `caller`.
    ///
    /// # Errors
    /// [`LedgerError::InvalidInput`] when `name` is empty or `price` is zero.
    /// A rejected call does not consume an id.
    pub fn create_product(
        &mut self,
        name: impl Into<String>,
        price: Amount,
        caller: &AccountId,
    ) -> LedgerResult<Receipt<ProductId>> {
        let name = name.into();
        if name.is_empty() {
            return Err(LedgerError::InvalidInput("product must have a name".to_string()));
        }
        if price == 0 {
            return Err(LedgerError::InvalidInput("product must have a price".to_string()));
        }

        self.product_count += 1;
        let id = ProductId::new(self.product_count);
        let product = Product {
            id,
            name,
            price,
            owner: caller.clone(),
            purchased: false,
        };
        self.products.insert(id, product.clone());

        let event = LedgerEvent::ProductCreated(product);
        self.events.push(event.clone());
        Ok(Receipt { value: id, event })
    }

    /// Sells product `id` to `caller`, paying its owner exactly the price.
    ///
    /// Checks run in order: existence, payment covers the price, not yet
    /// sold, caller is not the owner, then the overpayment policy. The
    /// settlement transfer is the last fallible step; if it fails nothing
    /// has changed.
    ///
    /// # Errors
    /// [`LedgerError::NotFound`], [`LedgerError::InsufficientPayment`],
    /// [`LedgerError::AlreadySold`], [`LedgerError::SelfPurchaseForbidden`],
    /// [`LedgerError::ExactPaymentRequired`] or [`LedgerError::Transfer`].
    pub fn purchase_product(
        &mut self,
        id: ProductId,
        payment: Amount,
        caller: &AccountId,
    ) -> LedgerResult<Receipt<()>> {
        let product = self.products.get_mut(&id).ok_or(LedgerError::NotFound(id))?;

        if payment < product.price {
            return Err(LedgerError::InsufficientPayment {
                price: product.price,
                payment,
            });
        }
        if product.purchased {
            return Err(LedgerError::AlreadySold(id));
        }
        if product.owner == *caller {
            return Err(LedgerError::SelfPurchaseForbidden(id));
        }
        if self.policy == OverpaymentPolicy::RequireExact && payment != product.price {
            return Err(LedgerError::ExactPaymentRequired {
                price: product.price,
                payment,
            });
        }

        self.settlement.transfer(caller, &product.owner, product.price)?;

        product.purchased = true;
        product.owner = caller.clone();

        let event = LedgerEvent::ProductPurchased(product.clone());
        self.events.push(event.clone());
        Ok(Receipt { value: (), event })
    }
}
