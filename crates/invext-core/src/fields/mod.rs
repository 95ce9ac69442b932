//! Regex-driven invoice field extraction.
//!
//! A [`FieldPatternTable`] maps field names to independent regex templates.
//! Each template is applied to the whole document text with find-all
//! semantics; a template that fails to compile only affects its own field.

mod extractor;
mod template;

pub use extractor::{ExtractedFields, FieldOutcome};
pub use template::{ExtractionTemplate, FieldRule};

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ExtractionError;

/// Field names of the default table.
pub mod names {
    pub const VAT_NUMBER: &str = "VAT Number";
    pub const INVOICE_NO: &str = "Invoice No";
    pub const CUSTOMER_NAME: &str = "Customer Name";
    pub const CUSTOMER_NUMBER: &str = "Customer Number";
    pub const INVOICE_PERIOD: &str = "Invoice Period";
    pub const DATE: &str = "Date";
    pub const TOTAL_AMOUNT: &str = "Total Amount";
    pub const VAT: &str = "VAT";
    pub const GROSS_AMOUNT: &str = "Gross Amount";
    pub const SERVICE_FEES: &str = "Service Fees";
}

/// A named regex template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldPattern {
    /// Field name used as the key in extracted data.
    pub name: String,
    /// Regex source.
    pub pattern: String,
}

impl FieldPattern {
    pub fn new(name: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pattern: pattern.into(),
        }
    }

    /// Compile the template.
    pub fn compile(&self) -> Result<Regex, ExtractionError> {
        Regex::new(&self.pattern).map_err(|e| ExtractionError::InvalidPattern {
            field: self.name.clone(),
            reason: e.to_string(),
        })
    }
}

/// Ordered list of field patterns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldPatternTable {
    patterns: Vec<FieldPattern>,
}

/// Header line of the customer/period/date block.
const HEADER_ROW: &str = r"Invoice No Customer No Invoice Period Date\n";

impl Default for FieldPatternTable {
    fn default() -> Self {
        use names::*;

        Self::new(vec![
            FieldPattern::new(VAT_NUMBER, r"VAT No\.\s+([A-Z]{2}\d+)"),
            FieldPattern::new(INVOICE_NO, r"Invoice No\s+(\d+)"),
            FieldPattern::new(CUSTOMER_NAME, r"Name:\s+([\w\s]+)"),
            FieldPattern::new(CUSTOMER_NUMBER, format!(r"{HEADER_ROW}\d+\s+(\d+)")),
            FieldPattern::new(
                INVOICE_PERIOD,
                format!(
                    r"{HEADER_ROW}\d+\s+\d+\s+(\d{{1,2}}\.\d{{1,2}}\.\d{{4}}\s+-\s+\d{{1,2}}\.\d{{1,2}}\.\d{{4}})"
                ),
            ),
            FieldPattern::new(
                DATE,
                format!(
                    r"{HEADER_ROW}\d+\s+\d+\s+\d{{1,2}}\.\d{{1,2}}\.\d{{4}}\s+-\s+\d{{1,2}}\.\d{{1,2}}\.\d{{4}}\s+(\d{{1,2}}\.\s\w+\s\d{{4}})"
                ),
            ),
            FieldPattern::new(TOTAL_AMOUNT, r"Total\s+([\d,.]+) €"),
            FieldPattern::new(VAT, r"VAT\s+(\d{1,2}) %"),
            FieldPattern::new(GROSS_AMOUNT, r"Gross Amount incl. VAT\s+([\d,.]+) €"),
            FieldPattern::new(SERVICE_FEES, r"(Basic Fee [\w\s]+[\d,.]+ €)"),
        ])
    }
}

impl FieldPatternTable {
    pub fn new(patterns: Vec<FieldPattern>) -> Self {
        Self { patterns }
    }

    /// Empty table.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Add a field, replacing an existing pattern with the same name in place.
    pub fn with_field(mut self, name: impl Into<String>, pattern: impl Into<String>) -> Self {
        let field = FieldPattern::new(name, pattern);
        match self.patterns.iter_mut().find(|p| p.name == field.name) {
            Some(existing) => *existing = field,
            None => self.patterns.push(field),
        }
        self
    }

    pub fn patterns(&self) -> &[FieldPattern] {
        &self.patterns
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Apply every pattern to `text`.
    pub fn extract(&self, text: &str) -> ExtractedFields {
        extractor::extract_fields(self, text)
    }
}
