//! End-to-end exercise of the quotation export pipeline against the
//! scripted endpoint mock.

use labcart_commerce::prelude::*;
use labcart_data::{FailAt, MockQuotationApi};
use std::sync::Arc;

fn summary(id: &str, price: i64) -> ProductSummary {
    ProductSummary {
        id: ProductId::new(id),
        name: format!("Product {id}"),
        slug: format!("product-{id}"),
        image: format!("{id}.png"),
        unit_price: Money::new(price, Currency::MXN),
    }
}

fn company() -> CompanyIdentity {
    CompanyIdentity {
        name: "Equipos Cientificos SA".to_string(),
        address: "Av. Reforma 100, CDMX".to_string(),
        phone: "+52 55 0000 0000".to_string(),
        email: "ventas@example.com".to_string(),
        tax_id: "ECS990101AAA".to_string(),
    }
}

fn buyer() -> BuyerInfo {
    BuyerInfo {
        name: "Dr. Ana Ruiz".to_string(),
        company: None,
        email: "ana@example.com".to_string(),
    }
}

fn cart_with_bundle() -> Cart {
    let mut cart = Cart::new(Currency::MXN);
    // Stale client prices on purpose; the server's table below disagrees.
    cart.add_bundle(summary("scope", 1), vec![summary("stage", 1)])
        .unwrap();
    cart.update_quantity(&cart.items[0].key.clone(), 2).unwrap();
    cart.add(summary("slides", 1)).unwrap();
    cart
}

fn scripted_api() -> MockQuotationApi {
    MockQuotationApi::new()
        .with_price("scope", "Microscope 40x", 250_000, "MS-40")
        .with_price("stage", "Mechanical stage", 30_000, "ST-01")
        .with_price("slides", "Slide kit", 5_000, "SK-10")
        .with_discount(1000)
}

#[tokio::test]
async fn export_uses_server_prices_and_local_quantities() {
    let api = Arc::new(scripted_api());
    let exporter = QuotationExporter::new(
        Arc::clone(&api) as Arc<dyn labcart_data::QuotationApi>,
        company(),
        &CommerceConfig::default(),
    );

    let cart = cart_with_bundle();
    let exported = exporter
        .export(&cart, &UserId::new("user-1"), &buyer())
        .await
        .unwrap();

    // Quantities come from the cart, prices from the server.
    let scope = exported
        .quotation
        .lines
        .iter()
        .find(|l| l.product_id.as_str() == "scope")
        .unwrap();
    assert_eq!(scope.quantity, 2);
    assert_eq!(scope.unit_price.amount_cents, 250_000);

    // Bundle parts are quoted as their own lines with the parent quantity.
    let stage = exported
        .quotation
        .lines
        .iter()
        .find(|l| l.product_id.as_str() == "stage")
        .unwrap();
    assert_eq!(stage.quantity, 2);

    // subtotal = 2*250000 + 2*30000 + 1*5000 = 565000
    // 10% discount -> 508500; tax 81360; total 589860
    assert_eq!(exported.quotation.totals.subtotal.amount_cents, 565_000);
    assert_eq!(exported.quotation.totals.total.amount_cents, 589_860);

    // The record was saved with the stored document attached.
    let saved = api.saved();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].id, exported.quotation.id.as_str());
    assert_eq!(saved[0].pdf_id, exported.document_id.as_str());
    assert_eq!(saved[0].products.len(), 3);

    // One upload, base64-encoded under a quotation path.
    let uploads = api.uploads();
    assert_eq!(uploads.len(), 1);
    assert!(uploads[0].path.starts_with("quotations/"));

    // The document carries the line table and totals.
    assert!(exported.document_html.contains("MS-40"));
    assert!(exported.document_html.contains("MX$5,898.60"));

    // The cart is intentionally left intact after export.
    assert_eq!(cart.item_count(), 3);
}

#[tokio::test]
async fn upload_failure_aborts_before_save() {
    let api = Arc::new(scripted_api().failing_at(FailAt::UploadDocument));
    let exporter = QuotationExporter::new(
        Arc::clone(&api) as Arc<dyn labcart_data::QuotationApi>,
        company(),
        &CommerceConfig::default(),
    );

    let result = exporter
        .export(&cart_with_bundle(), &UserId::new("user-1"), &buyer())
        .await;

    assert!(matches!(result, Err(CommerceError::Api(_))));
    assert!(api.saved().is_empty());
}

#[tokio::test]
async fn pricing_failure_aborts_everything() {
    let api = Arc::new(scripted_api().failing_at(FailAt::CreateQuotation));
    let exporter = QuotationExporter::new(
        Arc::clone(&api) as Arc<dyn labcart_data::QuotationApi>,
        company(),
        &CommerceConfig::default(),
    );

    let result = exporter
        .export(&cart_with_bundle(), &UserId::new("user-1"), &buyer())
        .await;

    assert!(result.is_err());
    assert!(api.uploads().is_empty());
    assert!(api.saved().is_empty());
}

#[tokio::test]
async fn empty_cart_cannot_be_exported() {
    let api = Arc::new(scripted_api());
    let exporter = QuotationExporter::new(
        api as Arc<dyn labcart_data::QuotationApi>,
        company(),
        &CommerceConfig::default(),
    );

    let result = exporter
        .export(&Cart::new(Currency::MXN), &UserId::new("user-1"), &buyer())
        .await;

    assert!(matches!(result, Err(CommerceError::EmptyCart)));
}
