//! Human-readable description of a pattern table.

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use super::FieldPatternTable;

/// Rule text for one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldRule {
    pub rule: String,
}

/// Field name to rule mapping, in table order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionTemplate {
    rules: Vec<(String, FieldRule)>,
}

impl ExtractionTemplate {
    pub fn from_table(table: &FieldPatternTable) -> Self {
        let rules = table
            .patterns()
            .iter()
            .map(|field| {
                let rule = format!("Extract using pattern: '{}'", field.pattern);
                (field.name.clone(), FieldRule { rule })
            })
            .collect();

        Self { rules }
    }

    pub fn get(&self, name: &str) -> Option<&FieldRule> {
        self.rules
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, rule)| rule)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldRule)> {
        self.rules.iter().map(|(name, rule)| (name.as_str(), rule))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Serialize for ExtractionTemplate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.rules.len()))?;
        for (name, rule) in &self.rules {
            map.serialize_entry(name, rule)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::names;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_template_from_default_table() {
        let template = ExtractionTemplate::from_table(&FieldPatternTable::default());

        assert_eq!(template.len(), 10);
        assert_eq!(
            template.get(names::VAT).map(|r| r.rule.as_str()),
            Some(r"Extract using pattern: 'VAT\s+(\d{1,2}) %'")
        );
        assert_eq!(template.iter().next().map(|(name, _)| name), Some(names::VAT_NUMBER));
    }

    #[test]
    fn test_template_json_shape() {
        let table = FieldPatternTable::empty().with_field("Invoice No", r"Invoice No\s+(\d+)");
        let json = serde_json::to_value(ExtractionTemplate::from_table(&table)).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "Invoice No": { "rule": r"Extract using pattern: 'Invoice No\s+(\d+)'" }
            })
        );
    }
}
