//! Wire payloads for the quotation endpoints.
//!
//! Field names follow the server contract exactly, including the
//! upper-case `SKU` key. Prices travel in minor currency units; the
//! discount travels as integer basis points (1000 = 10%).

use serde::{Deserialize, Serialize};

/// Request body for quotation creation: the flat product manifest plus the
/// requesting user. Quantities stay client-side; the server only prices.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QuotationRequest {
    /// Identity of the requesting user.
    pub user: String,
    /// Product ids to price, top-level items and bundle parts flattened.
    pub products: Vec<String>,
}

/// A server-priced product line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PricedProduct {
    pub id: String,
    pub name: String,
    /// Authoritative unit price in minor currency units.
    pub price: i64,
    pub image: String,
    #[serde(rename = "SKU")]
    pub sku: String,
}

/// Server response to quotation creation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PricedQuotation {
    /// Server-assigned quotation id.
    pub id: String,
    /// Account discount in basis points (1000 = 10%).
    pub discount: u32,
    pub user: String,
    pub products: Vec<PricedProduct>,
}

/// Request body persisting the quotation record with its document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QuotationSaveRequest {
    pub user: String,
    pub products: Vec<String>,
    /// Stored-artifact id returned by the document endpoint.
    pub pdf_id: String,
    /// The quotation id being finalized.
    pub id: String,
}

/// Request body for the document artifact endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DocumentUpload {
    /// Storage path for the artifact.
    pub path: String,
    /// Base64-encoded document bytes.
    pub data: String,
}

/// Response from the document artifact endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoredDocument {
    /// Identifier of the stored artifact.
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priced_product_uses_wire_sku_key() {
        let product = PricedProduct {
            id: "prod-1".to_string(),
            name: "Centrifuge".to_string(),
            price: 250_000,
            image: "https://img.example/c.png".to_string(),
            sku: "CF-200".to_string(),
        };

        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json["SKU"], "CF-200");
        assert!(json.get("sku").is_none());
    }

    #[test]
    fn priced_quotation_decodes_server_shape() {
        let body = serde_json::json!({
            "id": "q-77",
            "discount": 1000,
            "user": "user-9",
            "products": [
                { "id": "prod-1", "name": "Beaker", "price": 1500,
                  "image": "b.png", "SKU": "BK-01" }
            ]
        });

        let quotation: PricedQuotation = serde_json::from_value(body).unwrap();
        assert_eq!(quotation.discount, 1000);
        assert_eq!(quotation.products[0].sku, "BK-01");
    }
}
