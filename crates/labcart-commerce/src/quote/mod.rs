//! Quotation records, document rendering, and the export pipeline.

pub mod document;
mod exporter;
mod quotation;

pub use exporter::{ExportedQuotation, QuotationExporter};
pub use quotation::{BuyerInfo, CompanyIdentity, Quotation, QuotationLine};
