//! Core library for invoice text extraction.
//!
//! This crate provides:
//! - PDF text extraction (pages joined as plain text)
//! - Regex-driven invoice field extraction with an editable pattern table
//! - Monetary amount normalization for numeric and spelled-out amounts

pub mod error;
pub mod models;
pub mod pdf;
pub mod fields;
pub mod amount;
pub mod invoice;

pub use error::{InvextError, Result};
pub use amount::{
    normalize_amount, AmountMatch, AmountMatcher, AmountNormalizer, AmountRule,
    EnglishNumberWords, ExtractionResult, NumberWords, NOT_AVAILABLE,
};
pub use fields::{ExtractedFields, ExtractionTemplate, FieldOutcome, FieldPattern, FieldPatternTable};
pub use invoice::{ExtractionReport, InvoiceParser, RegexInvoiceParser};
pub use models::config::InvextConfig;
pub use models::invoice::{InvoicePeriod, InvoiceSummary};
pub use pdf::{PdfExtractor, PdfProcessor};
