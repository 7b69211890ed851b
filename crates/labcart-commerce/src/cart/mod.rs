//! Cart state, pricing, and the persistent store.

mod cart;
mod item;
pub mod pricing;
mod store;

pub use cart::{Cart, ManifestEntry};
pub use item::{LineItem, PartItem, ProductSummary, MAX_QUANTITY_PER_ITEM};
pub use pricing::{CartTotals, DiscountRate};
pub use store::{CartSnapshot, CartStore};
