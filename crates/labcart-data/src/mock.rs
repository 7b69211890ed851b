//! Deterministic in-memory implementation of [`QuotationApi`] for tests.

use crate::client::QuotationApi;
use crate::payload::{
    DocumentUpload, PricedProduct, PricedQuotation, QuotationRequest, QuotationSaveRequest,
    StoredDocument,
};
use crate::ApiError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

/// Which endpoint call the mock should fail at, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailAt {
    CreateQuotation,
    FetchImage,
    UploadDocument,
    SaveQuotation,
}

/// Scripted price entry for a product id.
#[derive(Debug, Clone)]
pub struct MockPrice {
    pub name: String,
    /// Unit price in minor currency units.
    pub price: i64,
    pub sku: String,
    pub image: String,
}

/// A scripted [`QuotationApi`] that prices products from a fixed table,
/// records every call, and can be told to fail at a chosen step.
#[derive(Default)]
pub struct MockQuotationApi {
    prices: HashMap<String, MockPrice>,
    discount: u32,
    fail_at: Option<FailAt>,
    counter: AtomicU64,
    saved: Mutex<Vec<QuotationSaveRequest>>,
    uploads: Mutex<Vec<DocumentUpload>>,
}

impl MockQuotationApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a unit price for a product id.
    pub fn with_price(
        mut self,
        id: impl Into<String>,
        name: impl Into<String>,
        price: i64,
        sku: impl Into<String>,
    ) -> Self {
        let id = id.into();
        self.prices.insert(
            id.clone(),
            MockPrice {
                name: name.into(),
                price,
                sku: sku.into(),
                image: format!("https://img.example/{id}.png"),
            },
        );
        self
    }

    /// Set the discount (basis points) returned with every quotation.
    pub fn with_discount(mut self, basis_points: u32) -> Self {
        self.discount = basis_points;
        self
    }

    /// Make the given step return a transport error.
    pub fn failing_at(mut self, step: FailAt) -> Self {
        self.fail_at = Some(step);
        self
    }

    /// Quotation-save requests received so far.
    pub fn saved(&self) -> Vec<QuotationSaveRequest> {
        self.saved.lock().expect("mock lock").clone()
    }

    /// Document uploads received so far.
    pub fn uploads(&self) -> Vec<DocumentUpload> {
        self.uploads.lock().expect("mock lock").clone()
    }

    fn fail_if(&self, step: FailAt) -> Result<(), ApiError> {
        if self.fail_at == Some(step) {
            return Err(ApiError::Transport(format!("mock failure at {step:?}")));
        }
        Ok(())
    }
}

#[async_trait]
impl QuotationApi for MockQuotationApi {
    async fn create_quotation(
        &self,
        request: &QuotationRequest,
    ) -> Result<PricedQuotation, ApiError> {
        self.fail_if(FailAt::CreateQuotation)?;

        let products = request
            .products
            .iter()
            .filter_map(|id| {
                self.prices.get(id).map(|entry| PricedProduct {
                    id: id.clone(),
                    name: entry.name.clone(),
                    price: entry.price,
                    image: entry.image.clone(),
                    sku: entry.sku.clone(),
                })
            })
            .collect();

        Ok(PricedQuotation {
            id: format!("q-{}", self.counter.fetch_add(1, Ordering::SeqCst) + 1),
            discount: self.discount,
            user: request.user.clone(),
            products,
        })
    }

    async fn fetch_image(&self, url: &str) -> Result<Vec<u8>, ApiError> {
        self.fail_if(FailAt::FetchImage)?;
        Ok(url.as_bytes().to_vec())
    }

    async fn upload_document(&self, upload: &DocumentUpload) -> Result<StoredDocument, ApiError> {
        self.fail_if(FailAt::UploadDocument)?;
        self.uploads.lock().expect("mock lock").push(upload.clone());
        Ok(StoredDocument {
            id: format!("doc-{}", self.counter.fetch_add(1, Ordering::SeqCst) + 1),
        })
    }

    async fn save_quotation(&self, request: &QuotationSaveRequest) -> Result<(), ApiError> {
        self.fail_if(FailAt::SaveQuotation)?;
        self.saved.lock().expect("mock lock").push(request.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_prices_known_products_only() {
        let api = MockQuotationApi::new()
            .with_price("prod-1", "Beaker", 1500, "BK-01")
            .with_discount(500);

        let quotation = api
            .create_quotation(&QuotationRequest {
                user: "user-1".to_string(),
                products: vec!["prod-1".to_string(), "unknown".to_string()],
            })
            .await
            .unwrap();

        assert_eq!(quotation.discount, 500);
        assert_eq!(quotation.products.len(), 1);
        assert_eq!(quotation.products[0].price, 1500);
    }

    #[tokio::test]
    async fn mock_fails_at_requested_step() {
        let api = MockQuotationApi::new().failing_at(FailAt::UploadDocument);

        let upload = DocumentUpload {
            path: "quotes/q-1.html".to_string(),
            data: String::new(),
        };
        assert!(api.upload_document(&upload).await.is_err());
        assert!(api.uploads().is_empty());
    }
}
