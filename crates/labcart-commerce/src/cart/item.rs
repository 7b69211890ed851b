//! Cart line items.

use crate::error::CommerceError;
use crate::ids::{BundleKey, ItemKey, ProductId};
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Maximum quantity allowed per line item.
pub const MAX_QUANTITY_PER_ITEM: i64 = 9999;

/// Display and pricing data copied from the catalog at add time.
///
/// Not re-fetched while the item sits in the cart; the server re-derives
/// authoritative prices at quote time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductSummary {
    pub id: ProductId,
    pub name: String,
    pub slug: String,
    pub image: String,
    pub unit_price: Money,
}

/// A bundled sub-component of a line item.
///
/// Parts are priced independently but quantity-locked to their parent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PartItem {
    pub product_id: ProductId,
    pub name: String,
    pub slug: String,
    pub image: String,
    pub unit_price: Money,
    pub quantity: i64,
}

/// One entry in the cart, possibly a bundle with parts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItem {
    /// Value-compared identity; unique within the cart.
    pub key: ItemKey,
    pub name: String,
    pub slug: String,
    pub image: String,
    pub unit_price: Money,
    /// Always >= 1; an item reaching 0 is removed from the cart.
    pub quantity: i64,
    /// Bundle parts, quantity-locked to the parent. Empty for plain items.
    pub parts: Vec<PartItem>,
}

impl LineItem {
    /// Create a plain line item with quantity 1.
    pub fn from_product(summary: ProductSummary) -> Self {
        Self {
            key: ItemKey::Product(summary.id),
            name: summary.name,
            slug: summary.slug,
            image: summary.image,
            unit_price: summary.unit_price,
            quantity: 1,
            parts: Vec::new(),
        }
    }

    /// Create a bundle line item with quantity 1 and the given parts.
    pub fn from_bundle(parent: ProductSummary, parts: Vec<ProductSummary>) -> Self {
        let key = ItemKey::Bundle(BundleKey::new(
            parent.id,
            parts.iter().map(|p| p.id.clone()),
        ));
        let parts = parts
            .into_iter()
            .map(|p| PartItem {
                product_id: p.id,
                name: p.name,
                slug: p.slug,
                image: p.image,
                unit_price: p.unit_price,
                quantity: 1,
            })
            .collect();
        Self {
            key,
            name: parent.name,
            slug: parent.slug,
            image: parent.image,
            unit_price: parent.unit_price,
            quantity: 1,
            parts,
        }
    }

    pub fn has_parts(&self) -> bool {
        !self.parts.is_empty()
    }

    /// Set the quantity, cascading to every part.
    pub fn set_quantity(&mut self, quantity: i64) -> Result<(), CommerceError> {
        if quantity < 1 {
            return Err(CommerceError::InvalidQuantity(quantity));
        }
        if quantity > MAX_QUANTITY_PER_ITEM {
            return Err(CommerceError::QuantityExceedsLimit(
                quantity,
                MAX_QUANTITY_PER_ITEM,
            ));
        }
        self.quantity = quantity;
        for part in &mut self.parts {
            part.quantity = quantity;
        }
        Ok(())
    }

    /// Increment the quantity by 1, cascading to parts.
    pub fn increment(&mut self) -> Result<(), CommerceError> {
        let next = self
            .quantity
            .checked_add(1)
            .ok_or(CommerceError::Overflow)?;
        self.set_quantity(next)
    }

    /// Line contribution to the raw total: own price times quantity plus
    /// every part's price times its quantity.
    pub fn line_total(&self) -> Result<Money, CommerceError> {
        let mut total = self
            .unit_price
            .try_multiply(self.quantity)
            .ok_or(CommerceError::Overflow)?;
        for part in &self.parts {
            let part_total = part
                .unit_price
                .try_multiply(part.quantity)
                .ok_or(CommerceError::Overflow)?;
            total = total.try_add(&part_total).ok_or(CommerceError::Overflow)?;
        }
        Ok(total)
    }
}
