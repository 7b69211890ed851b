//! The quotation export pipeline.

use crate::cart::Cart;
use crate::config::CommerceConfig;
use crate::error::CommerceError;
use crate::ids::{DocumentId, UserId};
use crate::money::Currency;
use crate::quote::{document, BuyerInfo, CompanyIdentity, Quotation};
use labcart_data::{DocumentUpload, QuotationApi, QuotationRequest, QuotationSaveRequest};
use std::sync::Arc;
use tracing::info;

/// Result of a successful export.
#[derive(Debug, Clone)]
pub struct ExportedQuotation {
    pub quotation: Quotation,
    /// Stored-artifact id the record was saved with.
    pub document_id: DocumentId,
    /// The rendered document, also handed to the caller for download.
    pub document_html: String,
}

/// Snapshots the cart, obtains authoritative server pricing, renders the
/// printable document, and persists the quotation record.
///
/// Every network step is awaited sequentially and attempted once; a failing
/// step aborts the remainder with no compensation. The cart is left intact
/// after a successful export.
pub struct QuotationExporter {
    api: Arc<dyn QuotationApi>,
    company: CompanyIdentity,
    currency: Currency,
    tax_rate_bps: i64,
}

impl QuotationExporter {
    pub fn new(api: Arc<dyn QuotationApi>, company: CompanyIdentity, config: &CommerceConfig) -> Self {
        Self {
            api,
            company,
            currency: config.currency,
            tax_rate_bps: config.tax_rate_bps,
        }
    }

    /// Run the export pipeline for the given cart and user.
    ///
    /// The server receives only the flattened product manifest; local
    /// prices are treated as stale and never reach the quotation.
    pub async fn export(
        &self,
        cart: &Cart,
        user: &UserId,
        buyer: &BuyerInfo,
    ) -> Result<ExportedQuotation, CommerceError> {
        if cart.is_empty() {
            return Err(CommerceError::EmptyCart);
        }

        let manifest = cart.flatten();
        info!(user = %user, products = manifest.len(), "requesting server-priced quotation");

        let request = QuotationRequest {
            user: user.as_str().to_string(),
            products: manifest
                .iter()
                .map(|e| e.product_id.as_str().to_string())
                .collect(),
        };
        let priced = self.api.create_quotation(&request).await?;

        let quotation =
            Quotation::from_priced(&priced, &manifest, self.currency, self.tax_rate_bps)?;

        let mut images = document::LineImages::new();
        for line in &quotation.lines {
            let bytes = self.api.fetch_image(&line.image).await?;
            images.insert(line.product_id.clone(), bytes);
        }

        let html = document::render(&quotation, &self.company, buyer, &images);
        let upload = DocumentUpload {
            path: format!("quotations/{}.html", quotation.id),
            data: document::encode_for_upload(&html),
        };
        let stored = self.api.upload_document(&upload).await?;

        self.api
            .save_quotation(&QuotationSaveRequest {
                user: user.as_str().to_string(),
                products: quotation.product_ids(),
                pdf_id: stored.id.clone(),
                id: quotation.id.as_str().to_string(),
            })
            .await?;

        info!(quotation = %quotation.id, document = %stored.id, "quotation exported");

        Ok(ExportedQuotation {
            quotation,
            document_id: DocumentId::new(stored.id),
            document_html: html,
        })
    }
}
