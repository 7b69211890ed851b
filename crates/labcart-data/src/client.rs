//! Client contract for the quotation endpoints.

use crate::payload::{
    DocumentUpload, PricedQuotation, QuotationRequest, QuotationSaveRequest, StoredDocument,
};
use crate::ApiError;
use async_trait::async_trait;

/// The external quotation collaborators, seen from the client side.
///
/// Implementations wrap whatever transport the deployment uses; the
/// exporter only depends on this trait and awaits each call sequentially.
#[async_trait]
pub trait QuotationApi: Send + Sync {
    /// Submit the product manifest and get back authoritative prices plus
    /// the user's discount.
    async fn create_quotation(
        &self,
        request: &QuotationRequest,
    ) -> Result<PricedQuotation, ApiError>;

    /// Fetch an image referenced by a priced line, for embedding into the
    /// rendered document.
    async fn fetch_image(&self, url: &str) -> Result<Vec<u8>, ApiError>;

    /// Upload the rendered document, returning the stored-artifact id.
    async fn upload_document(&self, upload: &DocumentUpload) -> Result<StoredDocument, ApiError>;

    /// Persist the quotation record with its attached document.
    async fn save_quotation(&self, request: &QuotationSaveRequest) -> Result<(), ApiError>;
}
