//! The persistent, observable cart store.
//!
//! The persisted slot is the single source of truth: every operation reads
//! it, mutates, writes the whole list back, then publishes one snapshot with
//! totals computed once. UI surfaces subscribe instead of re-deriving
//! totals independently.

use crate::cart::{pricing, Cart, CartTotals, DiscountRate, ProductSummary};
use crate::config::CommerceConfig;
use crate::error::CommerceError;
use crate::ids::{ItemKey, ProductId};
use labcart_kv::{KeyValueStore, Kv};
use std::collections::BTreeSet;
use tracing::{debug, warn};

/// What subscribers receive after every mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct CartSnapshot {
    pub cart: Cart,
    pub totals: CartTotals,
}

type Subscriber = Box<dyn Fn(&CartSnapshot) + Send + Sync>;

/// Durable cart store with push-based change notification.
///
/// There is exactly one logical writer (the active session); concurrent
/// writers are not reconciled and the last write wins.
pub struct CartStore<S: KeyValueStore> {
    kv: Kv<S>,
    config: CommerceConfig,
    discount: DiscountRate,
    subscribers: Vec<Subscriber>,
}

impl<S: KeyValueStore> CartStore<S> {
    pub fn new(store: S, config: CommerceConfig) -> Self {
        Self {
            kv: Kv::new(store),
            config,
            discount: DiscountRate::ZERO,
            subscribers: Vec::new(),
        }
    }

    /// Set the discount used for published totals, typically on sign-in.
    pub fn set_discount(&mut self, discount: DiscountRate) {
        self.discount = discount;
    }

    pub fn discount(&self) -> DiscountRate {
        self.discount
    }

    /// Register a subscriber called after every successful mutation.
    pub fn subscribe(&mut self, subscriber: impl Fn(&CartSnapshot) + Send + Sync + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    /// Read the persisted cart.
    ///
    /// A missing slot yields an empty cart. A slot that exists but fails to
    /// decode is logged and recovered as an empty cart rather than
    /// propagating a hard failure into every surface that reads it.
    pub fn load(&self) -> Result<Cart, CommerceError> {
        match self.kv.get::<Cart>(&self.config.cart_key) {
            Ok(Some(cart)) => Ok(cart),
            Ok(None) => Ok(Cart::new(self.config.currency)),
            Err(e) if e.is_corrupt_value() => {
                warn!(key = %self.config.cart_key, error = %e, "persisted cart is corrupt, resetting to empty");
                Ok(Cart::new(self.config.currency))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Totals for the current persisted cart at the configured discount.
    pub fn totals(&self) -> Result<CartTotals, CommerceError> {
        let cart = self.load()?;
        pricing::compute_with_tax(&cart, self.discount, self.config.tax_rate_bps)
    }

    /// Add a catalog product.
    pub fn add(&mut self, summary: ProductSummary) -> Result<(), CommerceError> {
        self.mutate(|cart| cart.add(summary))
    }

    /// Add a bundle with its selected required parts.
    pub fn add_bundle(
        &mut self,
        parent: ProductSummary,
        parts: Vec<ProductSummary>,
    ) -> Result<(), CommerceError> {
        self.mutate(|cart| cart.add_bundle(parent, parts))
    }

    /// Add a bundle keeping only the selected parts from the candidates.
    pub fn add_bundle_selection(
        &mut self,
        parent: ProductSummary,
        candidates: Vec<ProductSummary>,
        selected: &BTreeSet<ProductId>,
    ) -> Result<(), CommerceError> {
        self.mutate(|cart| cart.add_bundle_selection(parent, candidates, selected))
    }

    /// Add selected companion products from a candidate list.
    pub fn add_companions(
        &mut self,
        candidates: Vec<ProductSummary>,
        selected: &BTreeSet<ProductId>,
    ) -> Result<(), CommerceError> {
        self.mutate(|cart| cart.add_companions(candidates, selected))
    }

    /// Set a line's quantity. Unknown keys are a silent no-op.
    pub fn update_quantity(&mut self, key: &ItemKey, quantity: i64) -> Result<bool, CommerceError> {
        let mut found = false;
        self.mutate(|cart| {
            found = cart.update_quantity(key, quantity)?;
            Ok(())
        })?;
        Ok(found)
    }

    /// Remove a line.
    pub fn remove(&mut self, key: &ItemKey) -> Result<bool, CommerceError> {
        let mut removed = false;
        self.mutate(|cart| {
            removed = cart.remove(key);
            Ok(())
        })?;
        Ok(removed)
    }

    /// Remove all lines.
    pub fn clear(&mut self) -> Result<(), CommerceError> {
        self.mutate(|cart| {
            cart.clear();
            Ok(())
        })
    }

    fn mutate(
        &mut self,
        op: impl FnOnce(&mut Cart) -> Result<(), CommerceError>,
    ) -> Result<(), CommerceError> {
        let mut cart = self.load()?;
        op(&mut cart)?;
        self.kv.set(&self.config.cart_key, &cart)?;
        debug!(
            key = %self.config.cart_key,
            items = cart.items.len(),
            units = cart.item_count(),
            "cart persisted"
        );

        let totals = pricing::compute_with_tax(&cart, self.discount, self.config.tax_rate_bps)?;
        let snapshot = CartSnapshot { cart, totals };
        for subscriber in &self.subscribers {
            subscriber(&snapshot);
        }
        Ok(())
    }
}
