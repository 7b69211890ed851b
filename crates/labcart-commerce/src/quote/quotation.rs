//! Quotation records: a server-priced snapshot of the cart.

use crate::cart::{pricing, CartTotals, DiscountRate, ManifestEntry};
use crate::error::CommerceError;
use crate::ids::{ProductId, QuotationId, UserId};
use crate::money::{Currency, Money};
use chrono::{DateTime, Utc};
use labcart_data::PricedQuotation;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// One priced line of a quotation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QuotationLine {
    pub product_id: ProductId,
    pub sku: String,
    pub name: String,
    pub image: String,
    /// Server-authoritative unit price.
    pub unit_price: Money,
    /// User-selected quantity, recovered from the local cart manifest.
    pub quantity: i64,
    /// unit_price * quantity.
    pub amount: Money,
}

/// A priced, dated snapshot of the cart, ready for document rendering.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Quotation {
    pub id: QuotationId,
    pub user: UserId,
    /// Account discount as returned by the server.
    pub discount: DiscountRate,
    pub lines: Vec<QuotationLine>,
    pub totals: CartTotals,
    pub created_at: DateTime<Utc>,
}

impl Quotation {
    /// Join the server's priced products with the local quantity manifest.
    ///
    /// The server is only told which products to price; quantities are
    /// recovered here by product id. A priced product with no local entry
    /// defaults to quantity 1.
    pub fn from_priced(
        priced: &PricedQuotation,
        manifest: &[ManifestEntry],
        currency: Currency,
        tax_rate_bps: i64,
    ) -> Result<Self, CommerceError> {
        if priced.products.is_empty() {
            return Err(CommerceError::EmptyQuotation(priced.id.clone()));
        }

        let discount = DiscountRate::from_bps(priced.discount);
        let mut lines = Vec::with_capacity(priced.products.len());
        let mut subtotal = Money::zero(currency);

        for product in &priced.products {
            let quantity = match manifest
                .iter()
                .find(|e| e.product_id.as_str() == product.id)
            {
                Some(entry) => entry.quantity,
                None => {
                    warn!(product = %product.id, "priced product missing from cart manifest, assuming quantity 1");
                    1
                }
            };

            let unit_price = Money::new(product.price, currency);
            let amount = unit_price
                .try_multiply(quantity)
                .ok_or(CommerceError::Overflow)?;
            subtotal = subtotal.try_add(&amount).ok_or(CommerceError::Overflow)?;

            lines.push(QuotationLine {
                product_id: ProductId::new(product.id.clone()),
                sku: product.sku.clone(),
                name: product.name.clone(),
                image: product.image.clone(),
                unit_price,
                quantity,
                amount,
            });
        }

        let totals = pricing::totals_from_subtotal(subtotal, discount, tax_rate_bps)?;

        Ok(Self {
            id: QuotationId::new(priced.id.clone()),
            user: UserId::new(priced.user.clone()),
            discount,
            lines,
            totals,
            created_at: Utc::now(),
        })
    }

    /// Product ids of every line, in order.
    pub fn product_ids(&self) -> Vec<String> {
        self.lines
            .iter()
            .map(|l| l.product_id.as_str().to_string())
            .collect()
    }
}

/// Seller identity rendered in the document header.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompanyIdentity {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    /// Fiscal registration shown on commercial documents.
    pub tax_id: String,
}

/// Buyer block rendered under the header.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BuyerInfo {
    pub name: String,
    pub company: Option<String>,
    pub email: String,
}
