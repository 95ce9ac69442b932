//! Per-field find-all extraction.

use regex::Regex;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use tracing::{debug, warn};

use super::FieldPatternTable;

/// What a single field pattern produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldOutcome {
    /// One entry per match, in document order.
    Matches(Vec<String>),
    /// The pattern compiled but did not match.
    NotFound,
    /// The pattern did not compile.
    InvalidPattern(String),
}

impl FieldOutcome {
    pub fn matches(&self) -> &[String] {
        match self {
            FieldOutcome::Matches(values) => values,
            _ => &[],
        }
    }

    pub fn first(&self) -> Option<&str> {
        self.matches().first().map(String::as_str)
    }
}

impl Serialize for FieldOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FieldOutcome::Matches(values) => values.serialize(serializer),
            FieldOutcome::NotFound => serializer.serialize_none(),
            FieldOutcome::InvalidPattern(message) => serializer.serialize_str(message),
        }
    }
}

/// Extracted data keyed by field name, in table order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedFields {
    fields: Vec<(String, FieldOutcome)>,
}

impl ExtractedFields {
    pub fn get(&self, name: &str) -> Option<&FieldOutcome> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, outcome)| outcome)
    }

    /// First match of a field, if any.
    pub fn first(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(FieldOutcome::first)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldOutcome)> {
        self.fields.iter().map(|(name, outcome)| (name.as_str(), outcome))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Number of fields with at least one match.
    pub fn found_count(&self) -> usize {
        self.fields
            .iter()
            .filter(|(_, outcome)| matches!(outcome, FieldOutcome::Matches(_)))
            .count()
    }
}

impl Serialize for ExtractedFields {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, outcome) in &self.fields {
            map.serialize_entry(name, outcome)?;
        }
        map.end()
    }
}

pub(super) fn extract_fields(table: &FieldPatternTable, text: &str) -> ExtractedFields {
    let mut fields = Vec::with_capacity(table.len());

    for field in table.patterns() {
        let outcome = match field.compile() {
            Ok(regex) => {
                let values = find_all(&regex, text);
                debug!("field {:?}: {} match(es)", field.name, values.len());
                if values.is_empty() {
                    FieldOutcome::NotFound
                } else {
                    FieldOutcome::Matches(values)
                }
            }
            Err(e) => {
                warn!("{}", e);
                FieldOutcome::InvalidPattern(e.to_string())
            }
        };
        fields.push((field.name.clone(), outcome));
    }

    ExtractedFields { fields }
}

/// Whole match when the regex has no groups, otherwise the participating
/// groups joined by a space.
fn find_all(regex: &Regex, text: &str) -> Vec<String> {
    let group_count = regex.captures_len() - 1;

    regex
        .captures_iter(text)
        .map(|caps| {
            if group_count == 0 {
                caps[0].to_string()
            } else {
                caps.iter()
                    .skip(1)
                    .flatten()
                    .map(|m| m.as_str())
                    .collect::<Vec<_>>()
                    .join(" ")
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::names;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = "Energy Supply Ltd.\n\
        VAT No. DE123456789\n\
        Invoice No 4711\n\
        Name: Jane Doe\n\
        Invoice No Customer No Invoice Period Date\n\
        4711 99001 01.01.2024 - 31.01.2024 5. February 2024\n\
        Basic Fee Electricity 12,50 €\n\
        Basic Fee Gas 8,00 €\n\
        Total 120,00 €\n\
        VAT 19 %\n\
        Gross Amount incl. VAT 142,80 €\n";

    #[test]
    fn test_default_table_on_sample() {
        let fields = FieldPatternTable::default().extract(SAMPLE);

        assert_eq!(fields.len(), 10);
        assert_eq!(fields.first(names::VAT_NUMBER), Some("DE123456789"));
        assert_eq!(fields.first(names::INVOICE_NO), Some("4711"));
        assert_eq!(fields.first(names::CUSTOMER_NUMBER), Some("99001"));
        assert_eq!(
            fields.first(names::INVOICE_PERIOD),
            Some("01.01.2024 - 31.01.2024")
        );
        assert_eq!(fields.first(names::DATE), Some("5. February 2024"));
        assert_eq!(fields.first(names::TOTAL_AMOUNT), Some("120,00"));
        assert_eq!(fields.first(names::VAT), Some("19"));
        assert_eq!(fields.first(names::GROSS_AMOUNT), Some("142,80"));
        assert_eq!(
            fields.get(names::SERVICE_FEES).unwrap().matches(),
            &[
                "Basic Fee Electricity 12,50 €".to_string(),
                "Basic Fee Gas 8,00 €".to_string(),
            ]
        );
    }

    #[test]
    fn test_missing_field_is_null() {
        let fields = FieldPatternTable::default().extract("nothing to see here");
        assert_eq!(fields.get(names::INVOICE_NO), Some(&FieldOutcome::NotFound));
        assert_eq!(fields.found_count(), 0);

        let json = serde_json::to_value(&fields).unwrap();
        assert!(json["Invoice No"].is_null());
    }

    #[test]
    fn test_invalid_pattern_is_isolated() {
        let table = FieldPatternTable::empty()
            .with_field("Broken", r"(unclosed")
            .with_field("Order", r"Order\s+(\d+)");

        let fields = table.extract("Order 42");

        match fields.get("Broken") {
            Some(FieldOutcome::InvalidPattern(message)) => {
                assert!(message.starts_with("invalid pattern for Broken:"));
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert_eq!(fields.first("Order"), Some("42"));
    }

    #[test]
    fn test_group_handling() {
        let table = FieldPatternTable::empty()
            .with_field("Whole", r"\d+ EUR")
            .with_field("Pair", r"(\d+)-(\d+)")
            .with_field("Optional", r"x(\d)?y");

        let fields = table.extract("10 EUR 3-4 xy x5y");

        assert_eq!(fields.first("Whole"), Some("10 EUR"));
        assert_eq!(fields.first("Pair"), Some("3 4"));
        assert_eq!(
            fields.get("Optional").unwrap().matches(),
            &["".to_string(), "5".to_string()]
        );
    }

    #[test]
    fn test_serialization_keeps_table_order() {
        let table = FieldPatternTable::empty()
            .with_field("Zulu", r"z")
            .with_field("Alpha", r"a");

        let json = serde_json::to_string(&table.extract("za")).unwrap();
        assert_eq!(json, r#"{"Zulu":["z"],"Alpha":["a"]}"#);
    }

    #[test]
    fn test_with_field_replaces_in_place() {
        let table = FieldPatternTable::default().with_field(names::VAT, r"Tax\s+(\d+)");
        assert_eq!(table.len(), 10);
        assert_eq!(table.patterns()[7].pattern, r"Tax\s+(\d+)");
    }
}
