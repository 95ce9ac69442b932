//! Typed view of the fields extracted from an invoice.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::amount::parse_amount;
use crate::error::ExtractionError;
use crate::fields::{names, ExtractedFields};

/// Billing period covered by the invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoicePeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Invoice summary built from the first match of each default field.
///
/// Every field is optional: a field that did not match, or whose match
/// could not be parsed, stays `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InvoiceSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vat_number: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_number: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_number: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<InvoicePeriod>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_amount: Option<Decimal>,

    /// VAT rate in percent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vat_percent: Option<u8>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub gross_amount: Option<Decimal>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub service_fees: Vec<String>,
}

impl InvoiceSummary {
    /// Build a summary, returning parse failures alongside it.
    pub fn from_fields(fields: &ExtractedFields) -> (Self, Vec<ExtractionError>) {
        let mut problems = Vec::new();

        let text = |name: &str| fields.first(name).map(|v| v.trim().to_string());

        let period = parse_field(fields, names::INVOICE_PERIOD, parse_period, &mut problems);
        let date = parse_field(fields, names::DATE, parse_date, &mut problems);
        let total_amount = parse_field(fields, names::TOTAL_AMOUNT, parse_amount, &mut problems);
        let vat_percent = parse_field(
            fields,
            names::VAT,
            |v| v.trim().parse::<u8>().ok(),
            &mut problems,
        );
        let gross_amount = parse_field(fields, names::GROSS_AMOUNT, parse_amount, &mut problems);

        let summary = Self {
            vat_number: text(names::VAT_NUMBER),
            invoice_number: text(names::INVOICE_NO),
            customer_name: fields.first(names::CUSTOMER_NAME).and_then(first_line),
            customer_number: text(names::CUSTOMER_NUMBER),
            period,
            date,
            total_amount,
            vat_percent,
            gross_amount,
            service_fees: fields
                .get(names::SERVICE_FEES)
                .map(|outcome| outcome.matches().to_vec())
                .unwrap_or_default(),
        };

        (summary, problems)
    }
}

fn parse_field<T>(
    fields: &ExtractedFields,
    name: &str,
    parse: impl Fn(&str) -> Option<T>,
    problems: &mut Vec<ExtractionError>,
) -> Option<T> {
    let value = fields.first(name)?;
    let parsed = parse(value);
    if parsed.is_none() {
        problems.push(ExtractionError::Parse {
            field: name.to_string(),
            value: value.to_string(),
        });
    }
    parsed
}

/// The customer name pattern may run across lines; keep the first one.
fn first_line(value: &str) -> Option<String> {
    value
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(str::to_string)
}

/// Parse `d.m.yyyy` or `d. Month yyyy`.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%d.%m.%Y")
        .or_else(|_| NaiveDate::parse_from_str(s, "%d. %B %Y"))
        .ok()
}

/// Parse `d.m.yyyy - d.m.yyyy`.
pub fn parse_period(s: &str) -> Option<InvoicePeriod> {
    let (start, end) = s.split_once('-')?;
    let start = parse_date(start)?;
    let end = parse_date(end)?;
    Some(InvoicePeriod { start, end })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::FieldPatternTable;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    const SAMPLE: &str = "VAT No. DE123456789\n\
        Invoice No 4711\n\
        Name: Jane Doe\n\
        Invoice No Customer No Invoice Period Date\n\
        4711 99001 01.01.2024 - 31.01.2024 5. February 2024\n\
        Basic Fee Electricity 12,50 €\n\
        Total 1.120,00 €\n\
        VAT 19 %\n\
        Gross Amount incl. VAT 1.332,80 €\n";

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_summary_from_sample() {
        let fields = FieldPatternTable::default().extract(SAMPLE);
        let (summary, problems) = InvoiceSummary::from_fields(&fields);

        assert!(problems.is_empty(), "{:?}", problems);
        assert_eq!(summary.vat_number.as_deref(), Some("DE123456789"));
        assert_eq!(summary.invoice_number.as_deref(), Some("4711"));
        assert_eq!(summary.customer_name.as_deref(), Some("Jane Doe"));
        assert_eq!(summary.customer_number.as_deref(), Some("99001"));
        assert_eq!(
            summary.period,
            Some(InvoicePeriod {
                start: date(2024, 1, 1),
                end: date(2024, 1, 31),
            })
        );
        assert_eq!(summary.date, Some(date(2024, 2, 5)));
        assert_eq!(summary.total_amount, Some(Decimal::from_str("1120.00").unwrap()));
        assert_eq!(summary.vat_percent, Some(19));
        assert_eq!(summary.gross_amount, Some(Decimal::from_str("1332.80").unwrap()));
        assert_eq!(summary.service_fees, vec!["Basic Fee Electricity 12,50 €".to_string()]);
    }

    #[test]
    fn test_unparseable_values_are_reported() {
        let table = FieldPatternTable::empty()
            .with_field(names::DATE, r"Date:\s+(\S+)")
            .with_field(names::VAT, r"VAT\s+(\d+)");
        let fields = table.extract("Date: 31.02.2024 VAT 500");
        let (summary, problems) = InvoiceSummary::from_fields(&fields);

        assert_eq!(summary.date, None);
        assert_eq!(summary.vat_percent, None);
        assert_eq!(problems.len(), 2);
        assert_eq!(problems[0].to_string(), "failed to parse Date: 31.02.2024");
    }

    #[test]
    fn test_parse_date_formats() {
        assert_eq!(parse_date("1.3.2024"), Some(date(2024, 3, 1)));
        assert_eq!(parse_date(" 15. March 2024 "), Some(date(2024, 3, 15)));
        assert_eq!(parse_date("March 2024"), None);
    }

    #[test]
    fn test_serialized_summary_skips_empty_fields() {
        let json = serde_json::to_value(InvoiceSummary::default()).unwrap();
        assert_eq!(json, serde_json::json!({}));
    }
}
