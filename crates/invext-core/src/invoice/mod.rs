//! Invoice parsing: field table, typed summary and template in one pass.

mod parser;

pub use parser::{ExtractionReport, InvoiceParser, RegexInvoiceParser};

use crate::error::ExtractionError;

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractionError>;
