//! Quotation endpoint payloads and client contract for labcart.
//!
//! The storefront never trusts client-held prices at quote time: it sends
//! the server a flat product manifest and receives authoritative prices and
//! the account discount back. This crate defines those wire shapes, the
//! [`QuotationApi`] trait the exporter calls, and a scripted mock for tests.

pub mod client;
pub mod error;
pub mod mock;
pub mod payload;

pub use client::QuotationApi;
pub use error::ApiError;
pub use mock::{FailAt, MockQuotationApi};
pub use payload::{
    DocumentUpload, PricedProduct, PricedQuotation, QuotationRequest, QuotationSaveRequest,
    StoredDocument,
};
