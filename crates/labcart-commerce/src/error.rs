//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in cart and quotation operations.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Quantity must be at least 1.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Quantity exceeds the per-line limit.
    #[error("Quantity {0} exceeds maximum allowed ({1})")]
    QuantityExceedsLimit(i64, i64),

    /// Arithmetic overflow or currency mismatch in money math.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// The cart has no items to quote.
    #[error("Cart is empty")]
    EmptyCart,

    /// The pricing endpoint returned no priced products.
    #[error("Quotation {0} contains no priced products")]
    EmptyQuotation(String),

    /// Persistence failure.
    #[error("Storage error: {0}")]
    Storage(#[from] labcart_kv::KvError),

    /// Quotation endpoint failure.
    #[error("Quotation endpoint error: {0}")]
    Api(#[from] labcart_data::ApiError),

    /// Serialization failure.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
