//! Printable quotation document rendering.
//!
//! A pure function from a quotation plus identities to a self-contained
//! HTML document. The resulting bytes are what gets uploaded as the stored
//! artifact.

use crate::ids::ProductId;
use crate::quote::{BuyerInfo, CompanyIdentity, Quotation};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use std::collections::HashMap;

/// Static legal/commercial terms rendered at the foot of every quotation.
pub const COMMERCIAL_TERMS: &str = "\
Prices are quoted in the indicated currency and include the stated tax. \
This quotation is valid for 15 calendar days from its date of issue and \
does not constitute a purchase order. Availability and delivery times are \
confirmed upon order placement. Prices are subject to change without \
notice after the validity period.";

/// Fetched line images, keyed by product id, for inline embedding.
pub type LineImages = HashMap<ProductId, Vec<u8>>;

/// Render the quotation as a printable HTML document.
pub fn render(
    quotation: &Quotation,
    company: &CompanyIdentity,
    buyer: &BuyerInfo,
    images: &LineImages,
) -> String {
    let mut rows = String::new();
    for line in &quotation.lines {
        let image_cell = match images.get(&line.product_id) {
            Some(bytes) => format!(
                "<img src=\"data:image/png;base64,{}\" alt=\"{}\" width=\"48\"/>",
                BASE64.encode(bytes),
                escape(&line.name)
            ),
            None => String::new(),
        };
        rows.push_str(&format!(
            "<tr><td>{image_cell}</td><td>{qty}</td><td>{sku}</td><td>{name}</td>\
             <td class=\"num\">{unit}</td><td class=\"num\">{amount}</td></tr>\n",
            qty = line.quantity,
            sku = escape(&line.sku),
            name = escape(&line.name),
            unit = line.unit_price.display(),
            amount = line.amount.display(),
        ));
    }

    let buyer_company = buyer
        .company
        .as_deref()
        .map(|c| format!("<div>{}</div>", escape(c)))
        .unwrap_or_default();

    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\"/>\n\
         <title>Quotation {id}</title>\n\
         <style>\n\
         body {{ font-family: sans-serif; margin: 2em; }}\n\
         table {{ border-collapse: collapse; width: 100%; }}\n\
         th, td {{ border: 1px solid #ccc; padding: 4px 8px; }}\n\
         td.num, th.num {{ text-align: right; }}\n\
         .totals td {{ border: none; }}\n\
         .terms {{ font-size: 0.8em; color: #555; margin-top: 2em; }}\n\
         </style>\n</head>\n<body>\n\
         <header>\n<h1>{company_name}</h1>\n\
         <div>{company_address}</div>\n\
         <div>{company_phone} &middot; {company_email}</div>\n\
         <div>Tax ID: {company_tax_id}</div>\n</header>\n\
         <h2>Quotation {id}</h2>\n\
         <div>Date: {date}</div>\n\
         <section class=\"buyer\">\n<h3>Prepared for</h3>\n\
         <div>{buyer_name}</div>\n{buyer_company}\
         <div>{buyer_email}</div>\n</section>\n\
         <table>\n<thead><tr>\
         <th></th><th>Qty</th><th>SKU</th><th>Description</th>\
         <th class=\"num\">Unit price</th><th class=\"num\">Amount</th>\
         </tr></thead>\n<tbody>\n{rows}</tbody>\n</table>\n\
         <table class=\"totals\">\n\
         <tr><td class=\"num\">Subtotal</td><td class=\"num\">{subtotal}</td></tr>\n\
         <tr><td class=\"num\">Discount</td><td class=\"num\">-{discount}</td></tr>\n\
         <tr><td class=\"num\">Tax (16%)</td><td class=\"num\">{tax}</td></tr>\n\
         <tr><td class=\"num\"><strong>Total</strong></td>\
         <td class=\"num\"><strong>{total}</strong></td></tr>\n\
         </table>\n\
         <p class=\"terms\">{terms}</p>\n\
         </body>\n</html>\n",
        id = quotation.id,
        company_name = escape(&company.name),
        company_address = escape(&company.address),
        company_phone = escape(&company.phone),
        company_email = escape(&company.email),
        company_tax_id = escape(&company.tax_id),
        date = quotation.created_at.format("%Y-%m-%d"),
        buyer_name = escape(&buyer.name),
        buyer_email = escape(&buyer.email),
        rows = rows,
        subtotal = quotation.totals.subtotal.display(),
        discount = quotation.totals.discount.display(),
        tax = quotation.totals.tax.display(),
        total = quotation.totals.total.display(),
        terms = escape(COMMERCIAL_TERMS),
    )
}

/// Base64-encode rendered document bytes for the upload payload.
pub fn encode_for_upload(document: &str) -> String {
    BASE64.encode(document.as_bytes())
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
