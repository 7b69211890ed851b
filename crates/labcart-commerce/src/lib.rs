//! Cart, pricing, and quotation export for the labcart storefront.
//!
//! Three cooperating pieces:
//!
//! - **Cart store** ([`cart::CartStore`]): the durable line-item list, read
//!   and written through a key-value slot, with push-based change
//!   notification for every UI surface that shows cart state.
//! - **Pricing aggregator** ([`cart::pricing`]): subtotal, discount, 16%
//!   tax, and total derived from the line items in integer minor units.
//! - **Quotation exporter** ([`quote::QuotationExporter`]): snapshots the
//!   cart, fetches authoritative server prices, renders a printable
//!   document, and persists the quotation record.
//!
//! # Example
//!
//! ```
//! use labcart_commerce::prelude::*;
//! use labcart_kv::MemoryStore;
//!
//! let mut store = CartStore::new(MemoryStore::new(), CommerceConfig::default());
//! store.add(ProductSummary {
//!     id: ProductId::new("ms-40"),
//!     name: "Microscope 40x".to_string(),
//!     slug: "microscope-40x".to_string(),
//!     image: "ms-40.png".to_string(),
//!     unit_price: Money::new(250_000, Currency::MXN),
//! }).unwrap();
//!
//! let totals = store.totals().unwrap();
//! assert_eq!(totals.total.amount_cents, 290_000);
//! ```

pub mod cart;
pub mod config;
pub mod error;
pub mod ids;
pub mod money;
pub mod quote;

pub use config::CommerceConfig;
pub use error::CommerceError;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::config::CommerceConfig;
    pub use crate::error::CommerceError;
    pub use crate::ids::{BundleKey, DocumentId, ItemKey, ProductId, QuotationId, UserId};
    pub use crate::money::{Currency, Money};

    pub use crate::cart::{
        Cart, CartSnapshot, CartStore, CartTotals, DiscountRate, LineItem, ManifestEntry,
        PartItem, ProductSummary,
    };

    pub use crate::quote::{
        BuyerInfo, CompanyIdentity, ExportedQuotation, Quotation, QuotationExporter,
        QuotationLine,
    };
}
