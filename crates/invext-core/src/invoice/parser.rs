//! Rule-based invoice parser driven by a field pattern table.

use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info};

use crate::error::ExtractionError;
use crate::fields::{ExtractedFields, ExtractionTemplate, FieldOutcome, FieldPatternTable};
use crate::models::config::ExtractionConfig;
use crate::models::invoice::InvoiceSummary;

use super::Result;

/// Result of invoice extraction.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionReport {
    /// Raw per-field matches.
    pub fields: ExtractedFields,
    /// Typed view of the default fields.
    pub summary: InvoiceSummary,
    /// Rules used for this run.
    pub template: ExtractionTemplate,
    /// Text the fields were extracted from.
    #[serde(skip)]
    pub raw_text: String,
    /// Extraction warnings.
    pub warnings: Vec<String>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Trait for invoice parsing.
pub trait InvoiceParser {
    /// Parse invoice from text.
    fn parse(&self, text: &str) -> Result<ExtractionReport>;
}

/// Parser applying a [`FieldPatternTable`] to plain text.
pub struct RegexInvoiceParser {
    table: FieldPatternTable,
    /// Whether fields without a match produce warnings.
    warn_on_missing: bool,
}

impl RegexInvoiceParser {
    /// Create a parser with the default field table.
    pub fn new() -> Self {
        Self {
            table: FieldPatternTable::default(),
            warn_on_missing: true,
        }
    }

    /// Create a parser from configuration.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self {
            table: config.fields.clone(),
            warn_on_missing: config.warn_on_missing,
        }
    }

    /// Replace the field table.
    pub fn with_table(mut self, table: FieldPatternTable) -> Self {
        self.table = table;
        self
    }

    /// Set missing-field warnings.
    pub fn with_missing_warnings(mut self, warn: bool) -> Self {
        self.warn_on_missing = warn;
        self
    }

    pub fn table(&self) -> &FieldPatternTable {
        &self.table
    }

    /// Template describing the active table.
    pub fn template(&self) -> ExtractionTemplate {
        ExtractionTemplate::from_table(&self.table)
    }

    fn collect_warnings(&self, fields: &ExtractedFields, problems: Vec<ExtractionError>) -> Vec<String> {
        let mut warnings = Vec::new();

        for (name, outcome) in fields.iter() {
            match outcome {
                FieldOutcome::InvalidPattern(message) => warnings.push(message.clone()),
                FieldOutcome::NotFound if self.warn_on_missing => {
                    warnings.push(format!("no match for {}", name));
                }
                _ => {}
            }
        }

        warnings.extend(problems.into_iter().map(|p| p.to_string()));
        warnings
    }
}

impl Default for RegexInvoiceParser {
    fn default() -> Self {
        Self::new()
    }
}

impl InvoiceParser for RegexInvoiceParser {
    fn parse(&self, text: &str) -> Result<ExtractionReport> {
        let start = Instant::now();

        if text.trim().is_empty() {
            return Err(ExtractionError::NoData);
        }

        let fields = self.table.extract(text);
        let (summary, problems) = InvoiceSummary::from_fields(&fields);
        let warnings = self.collect_warnings(&fields, problems);

        debug!("{} warning(s) during extraction", warnings.len());
        info!(
            "Extracted {}/{} fields",
            fields.found_count(),
            fields.len()
        );

        Ok(ExtractionReport {
            template: self.template(),
            fields,
            summary,
            raw_text: text.to_string(),
            warnings,
            processing_time_ms: start.elapsed().as_millis() as u64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::names;
    use pretty_assertions::assert_eq;

    const INVOICE: &str = "Invoice No 1001\nVAT No. AT987654\nTotal 50,00 €\n";

    #[test]
    fn test_parse_default_table() {
        let report = RegexInvoiceParser::new().parse(INVOICE).unwrap();

        assert_eq!(report.fields.first(names::INVOICE_NO), Some("1001"));
        assert_eq!(report.summary.vat_number.as_deref(), Some("AT987654"));
        assert_eq!(report.template.len(), 10);
        assert_eq!(report.raw_text, INVOICE);
        assert!(report.warnings.contains(&"no match for Date".to_string()));
    }

    #[test]
    fn test_blank_text_is_no_data() {
        let result = RegexInvoiceParser::new().parse("  \n ");
        assert!(matches!(result, Err(ExtractionError::NoData)));
    }

    #[test]
    fn test_invalid_pattern_becomes_warning() {
        let parser = RegexInvoiceParser::new()
            .with_table(FieldPatternTable::empty().with_field("Broken", "[z-a]"))
            .with_missing_warnings(false);

        let report = parser.parse(INVOICE).unwrap();

        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].starts_with("invalid pattern for Broken"));
    }

    #[test]
    fn test_from_config() {
        let mut config = ExtractionConfig::default();
        config.fields = FieldPatternTable::empty().with_field("Order", r"Order\s+(\d+)");
        config.warn_on_missing = false;

        let report = RegexInvoiceParser::from_config(&config)
            .parse("no orders today")
            .unwrap();

        assert!(report.warnings.is_empty());
        assert_eq!(report.fields.get("Order"), Some(&FieldOutcome::NotFound));
    }

    #[test]
    fn test_report_json_hides_raw_text() {
        let report = RegexInvoiceParser::new().parse(INVOICE).unwrap();
        let json = serde_json::to_value(&report).unwrap();

        assert!(json.get("raw_text").is_none());
        assert_eq!(json["fields"]["Invoice No"], serde_json::json!(["1001"]));
    }
}
