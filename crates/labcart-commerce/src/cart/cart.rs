//! The cart: an ordered list of line items with value-compared identities.

use crate::cart::{LineItem, ProductSummary};
use crate::error::CommerceError;
use crate::ids::{ItemKey, ProductId};
use crate::money::Currency;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A shopping cart.
///
/// Pure in-memory operations; persistence and change notification live in
/// [`CartStore`](crate::cart::CartStore).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cart {
    /// Ordered line items, unique by key.
    pub items: Vec<LineItem>,
    /// Cart currency.
    pub currency: Currency,
    /// Unix timestamp of last update.
    pub updated_at: i64,
}

impl Cart {
    pub fn new(currency: Currency) -> Self {
        Self {
            items: Vec::new(),
            currency,
            updated_at: current_timestamp(),
        }
    }

    /// Add a catalog product.
    ///
    /// An existing item with the same key has its quantity incremented by 1;
    /// otherwise the product is appended with quantity 1.
    pub fn add(&mut self, summary: ProductSummary) -> Result<(), CommerceError> {
        let key = ItemKey::Product(summary.id.clone());
        self.add_line(key, || LineItem::from_product(summary))
    }

    /// Add a bundle: a parent product with its selected required parts.
    ///
    /// Bundle identity is the parent id plus the set of part ids, so the
    /// same selection in any order lands on the same line.
    pub fn add_bundle(
        &mut self,
        parent: ProductSummary,
        parts: Vec<ProductSummary>,
    ) -> Result<(), CommerceError> {
        let key = ItemKey::Bundle(crate::ids::BundleKey::new(
            parent.id.clone(),
            parts.iter().map(|p| p.id.clone()),
        ));
        self.add_line(key, || LineItem::from_bundle(parent, parts))
    }

    /// Add a bundle keeping only the selected parts from the candidate
    /// list (the "required sub-parts" path of a confirmed bundle purchase).
    pub fn add_bundle_selection(
        &mut self,
        parent: ProductSummary,
        candidates: Vec<ProductSummary>,
        selected: &BTreeSet<ProductId>,
    ) -> Result<(), CommerceError> {
        let parts = candidates
            .into_iter()
            .filter(|c| selected.contains(&c.id))
            .collect();
        self.add_bundle(parent, parts)
    }

    /// Add the selected companion products from a candidate list.
    ///
    /// The selection is intersected with the candidates; each match becomes
    /// an independent top-level line (the "frequently bought together" path).
    pub fn add_companions(
        &mut self,
        candidates: Vec<ProductSummary>,
        selected: &BTreeSet<ProductId>,
    ) -> Result<(), CommerceError> {
        for candidate in candidates {
            if selected.contains(&candidate.id) {
                self.add(candidate)?;
            }
        }
        Ok(())
    }

    fn add_line(
        &mut self,
        key: ItemKey,
        build: impl FnOnce() -> LineItem,
    ) -> Result<(), CommerceError> {
        if let Some(existing) = self.items.iter_mut().find(|i| i.key == key) {
            existing.increment()?;
        } else {
            self.items.push(build());
        }
        self.updated_at = current_timestamp();
        Ok(())
    }

    /// Set a line's quantity, cascading to its parts.
    ///
    /// A quantity of 0 or less removes the line. Returns `false` as a silent
    /// no-op when the key is not in the cart.
    pub fn update_quantity(&mut self, key: &ItemKey, quantity: i64) -> Result<bool, CommerceError> {
        if quantity <= 0 {
            return Ok(self.remove(key));
        }
        match self.items.iter_mut().find(|i| &i.key == key) {
            Some(item) => {
                item.set_quantity(quantity)?;
                self.updated_at = current_timestamp();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Remove a line. Returns whether anything was removed.
    pub fn remove(&mut self, key: &ItemKey) -> bool {
        let len_before = self.items.len();
        self.items.retain(|i| &i.key != key);
        let removed = self.items.len() < len_before;
        if removed {
            self.updated_at = current_timestamp();
        }
        removed
    }

    /// Remove all lines.
    pub fn clear(&mut self) {
        self.items.clear();
        self.updated_at = current_timestamp();
    }

    /// Total unit count (sum of quantities, parts excluded).
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get a line by key.
    pub fn get(&self, key: &ItemKey) -> Option<&LineItem> {
        self.items.iter().find(|i| &i.key == key)
    }

    /// Flatten the cart into a product manifest for quoting: top-level items
    /// plus every part, aggregated by product id with summed quantities.
    pub fn flatten(&self) -> Vec<ManifestEntry> {
        let mut manifest: Vec<ManifestEntry> = Vec::new();
        let mut push = |product_id: &ProductId, quantity: i64| {
            match manifest.iter_mut().find(|e| &e.product_id == product_id) {
                Some(entry) => entry.quantity += quantity,
                None => manifest.push(ManifestEntry {
                    product_id: product_id.clone(),
                    quantity,
                }),
            }
        };
        for item in &self.items {
            push(item.key.product_id(), item.quantity);
            for part in &item.parts {
                push(&part.product_id, part.quantity);
            }
        }
        manifest
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new(Currency::default())
    }
}

/// One entry of the flattened quoting manifest.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ManifestEntry {
    pub product_id: ProductId,
    pub quantity: i64,
}

fn current_timestamp() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;

    fn summary(id: &str, price: i64) -> ProductSummary {
        ProductSummary {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            slug: format!("product-{id}"),
            image: format!("{id}.png"),
            unit_price: Money::new(price, Currency::MXN),
        }
    }

    #[test]
    fn add_twice_merges_into_one_line() {
        let mut cart = Cart::default();
        cart.add(summary("a", 1000)).unwrap();
        cart.add(summary("a", 1000)).unwrap();

        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].quantity, 2);
    }

    #[test]
    fn add_bundle_twice_merges_regardless_of_part_order() {
        let mut cart = Cart::default();
        cart.add_bundle(summary("parent", 20000), vec![summary("p1", 5000), summary("p2", 3000)])
            .unwrap();
        cart.add_bundle(summary("parent", 20000), vec![summary("p2", 3000), summary("p1", 5000)])
            .unwrap();

        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].quantity, 2);
        assert!(cart.items[0].parts.iter().all(|p| p.quantity == 2));
    }

    #[test]
    fn update_quantity_cascades_to_parts() {
        let mut cart = Cart::default();
        cart.add_bundle(summary("parent", 20000), vec![summary("p1", 5000)])
            .unwrap();
        let key = cart.items[0].key.clone();

        assert!(cart.update_quantity(&key, 7).unwrap());
        assert_eq!(cart.items[0].quantity, 7);
        assert!(cart.items[0].parts.iter().all(|p| p.quantity == 7));
    }

    #[test]
    fn update_quantity_zero_removes() {
        let mut cart = Cart::default();
        cart.add(summary("a", 1000)).unwrap();
        let key = cart.items[0].key.clone();

        assert!(cart.update_quantity(&key, 0).unwrap());
        assert!(cart.is_empty());
    }

    #[test]
    fn update_quantity_unknown_key_is_silent_noop() {
        let mut cart = Cart::default();
        cart.add(summary("a", 1000)).unwrap();

        let missing = ItemKey::Product(ProductId::new("missing"));
        assert!(!cart.update_quantity(&missing, 3).unwrap());
        assert_eq!(cart.items[0].quantity, 1);
    }

    #[test]
    fn remove_only_item_leaves_empty_cart() {
        let mut cart = Cart::default();
        cart.add(summary("a", 1000)).unwrap();
        let key = cart.items[0].key.clone();

        assert!(cart.remove(&key));
        assert!(cart.is_empty());
        assert_eq!(cart.item_count(), 0);
    }

    #[test]
    fn bundle_selection_keeps_only_selected_parts() {
        let mut cart = Cart::default();
        let selected: BTreeSet<ProductId> = [ProductId::new("p2")].into_iter().collect();

        cart.add_bundle_selection(
            summary("parent", 20000),
            vec![summary("p1", 5000), summary("p2", 3000)],
            &selected,
        )
        .unwrap();

        assert_eq!(cart.items[0].parts.len(), 1);
        assert_eq!(cart.items[0].parts[0].product_id, ProductId::new("p2"));
    }

    #[test]
    fn companions_are_intersected_with_selection() {
        let mut cart = Cart::default();
        let selected: BTreeSet<ProductId> =
            [ProductId::new("b"), ProductId::new("absent")].into_iter().collect();

        cart.add_companions(
            vec![summary("a", 1000), summary("b", 2000), summary("c", 3000)],
            &selected,
        )
        .unwrap();

        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].key, ItemKey::Product(ProductId::new("b")));
    }

    #[test]
    fn flatten_includes_parts_and_aggregates_by_product() {
        let mut cart = Cart::default();
        cart.add_bundle(summary("parent", 20000), vec![summary("p1", 5000)])
            .unwrap();
        cart.add(summary("p1", 5000)).unwrap();
        cart.update_quantity(&ItemKey::Product(ProductId::new("p1")), 2)
            .unwrap();

        let manifest = cart.flatten();
        assert_eq!(manifest.len(), 2);

        let p1 = manifest
            .iter()
            .find(|e| e.product_id.as_str() == "p1")
            .unwrap();
        // 1 from the bundle part + 2 as a standalone line
        assert_eq!(p1.quantity, 3);
    }
}
