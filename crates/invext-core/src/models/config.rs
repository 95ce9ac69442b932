//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::error::{InvextError, Result};
use crate::fields::FieldPatternTable;

/// Main configuration for invext.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvextConfig {
    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// PDF processing configuration.
    pub pdf: PdfConfig,

    /// Output file configuration.
    pub output: OutputConfig,
}

/// Invoice field extraction configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Field pattern table, applied in order.
    pub fields: FieldPatternTable,

    /// Report fields without a match as warnings.
    pub warn_on_missing: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            fields: FieldPatternTable::default(),
            warn_on_missing: true,
        }
    }
}

/// PDF processing configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Maximum pages to read (0 = unlimited).
    pub max_pages: usize,

    /// Minimum extracted text length to accept a PDF as text-based.
    pub min_text_length: usize,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            max_pages: 0,
            min_text_length: 1,
        }
    }
}

/// Where and how extraction results are written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// File name for extracted data.
    pub data_file: String,

    /// File name for the extraction template.
    pub template_file: String,

    /// Pretty-print JSON output.
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            data_file: "extracted_data.json".to_string(),
            template_file: "extraction_template.json".to_string(),
            pretty: true,
        }
    }
}

impl InvextConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Field names must be non-empty and unique, since they key the output.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for field in self.extraction.fields.patterns() {
            if field.name.trim().is_empty() {
                return Err(InvextError::Config("field with empty name".to_string()));
            }
            if !seen.insert(field.name.as_str()) {
                return Err(InvextError::Config(format!(
                    "duplicate field name: {}",
                    field.name
                )));
            }
        }
        Ok(())
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = InvextConfig::default();
        config.output.pretty = false;
        config.extraction.fields = FieldPatternTable::empty().with_field("Order", r"Order\s+(\d+)");
        config.save(&path).unwrap();

        assert_eq!(InvextConfig::from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config: InvextConfig = serde_json::from_str(r#"{"pdf": {"max_pages": 2}}"#).unwrap();

        assert_eq!(config.pdf.max_pages, 2);
        assert_eq!(config.pdf.min_text_length, 1);
        assert_eq!(config.extraction.fields, FieldPatternTable::default());
        assert_eq!(config.output.data_file, "extracted_data.json");
    }

    #[test]
    fn test_duplicate_field_names_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{"extraction": {"fields": [
                {"name": "Total", "pattern": "a"},
                {"name": "Total", "pattern": "b"}
            ]}}"#,
        )
        .unwrap();

        match InvextConfig::from_file(&path) {
            Err(InvextError::Config(message)) => assert_eq!(message, "duplicate field name: Total"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(InvextConfig::default().validate().is_ok());
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            InvextConfig::from_file(&path),
            Err(InvextError::Json(_))
        ));
    }
}
