//! Cart pricing aggregation.
//!
//! All arithmetic happens in integer minor units with checked operations.
//! The discount is canonically expressed in basis points (1000 = 10%); call
//! sites holding a 0-1 fraction convert through [`DiscountRate::from_fraction`].

use crate::cart::Cart;
use crate::config::DEFAULT_TAX_RATE_BPS;
use crate::error::CommerceError;
use crate::money::{Money, BPS_SCALE};
use serde::{Deserialize, Serialize};

/// A proportional price reduction in basis points.
///
/// 0 = no discount, 1000 = 10%, 10000 = free. The single canonical unit for
/// discounts throughout the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct DiscountRate(u32);

impl DiscountRate {
    /// No discount.
    pub const ZERO: DiscountRate = DiscountRate(0);

    /// From basis points, clamped to 100%.
    pub fn from_bps(basis_points: u32) -> Self {
        Self(basis_points.min(BPS_SCALE as u32))
    }

    /// From a 0-1 fraction, clamped and rounded to whole basis points.
    pub fn from_fraction(fraction: f64) -> Self {
        let clamped = fraction.clamp(0.0, 1.0);
        Self((clamped * BPS_SCALE as f64).round() as u32)
    }

    pub fn as_bps(&self) -> u32 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

/// Derived monetary figures for the current cart. Never persisted.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CartTotals {
    /// Sum of all lines and parts before any discount.
    pub subtotal: Money,
    /// Amount subtracted by the discount.
    pub discount: Money,
    /// Tax on the discounted subtotal.
    pub tax: Money,
    /// Discounted subtotal plus tax.
    pub total: Money,
}

impl CartTotals {
    /// All-zero totals in the given currency.
    pub fn zero(currency: crate::money::Currency) -> Self {
        Self {
            subtotal: Money::zero(currency),
            discount: Money::zero(currency),
            tax: Money::zero(currency),
            total: Money::zero(currency),
        }
    }

    /// Subtotal after discount.
    pub fn discounted(&self) -> Money {
        // Construction guarantees same currency and no overflow.
        self.subtotal
            .try_subtract(&self.discount)
            .unwrap_or(self.subtotal)
    }
}

/// Compute totals at the default 16% tax rate.
pub fn compute(cart: &Cart, rate: DiscountRate) -> Result<CartTotals, CommerceError> {
    compute_with_tax(cart, rate, DEFAULT_TAX_RATE_BPS)
}

/// Compute totals with an explicit tax rate in basis points.
///
/// An empty cart yields all-zero totals, not an error.
pub fn compute_with_tax(
    cart: &Cart,
    rate: DiscountRate,
    tax_rate_bps: i64,
) -> Result<CartTotals, CommerceError> {
    let mut subtotal = Money::zero(cart.currency);
    for item in &cart.items {
        let line = item.line_total()?;
        subtotal = subtotal.try_add(&line).ok_or(CommerceError::Overflow)?;
    }
    totals_from_subtotal(subtotal, rate, tax_rate_bps)
}

/// Derive discount, tax, and total from an already-summed subtotal.
///
/// Also used by the quotation exporter, where the subtotal comes from
/// server-priced lines rather than the local cart.
pub fn totals_from_subtotal(
    subtotal: Money,
    rate: DiscountRate,
    tax_rate_bps: i64,
) -> Result<CartTotals, CommerceError> {
    let discount = subtotal
        .try_scale_bps(rate.as_bps() as i64)
        .ok_or(CommerceError::Overflow)?;
    let discounted = subtotal
        .try_subtract(&discount)
        .ok_or(CommerceError::Overflow)?;
    let tax = discounted
        .try_scale_bps(tax_rate_bps)
        .ok_or(CommerceError::Overflow)?;
    let total = discounted.try_add(&tax).ok_or(CommerceError::Overflow)?;

    Ok(CartTotals {
        subtotal,
        discount,
        tax,
        total,
    })
}
