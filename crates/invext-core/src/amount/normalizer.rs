//! Amount normalization with sentinel-based failure reporting.

use std::fmt;
use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};
use tracing::debug;

use super::matcher::AmountMatcher;
use super::words::{EnglishNumberWords, NumberWords};

/// Marker returned when no amount can be recovered.
pub const NOT_AVAILABLE: &str = "N/A";

lazy_static! {
    static ref PURE_NUMERAL: Regex = Regex::new(r"^\d+(?:[,.]\d+)*$").unwrap();
}

/// Outcome of normalizing one fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionResult {
    /// Canonical decimal string.
    Amount(String),
    /// No recoverable amount.
    NotAvailable,
}

impl ExtractionResult {
    /// The value, or [`NOT_AVAILABLE`].
    pub fn as_str(&self) -> &str {
        match self {
            ExtractionResult::Amount(value) => value,
            ExtractionResult::NotAvailable => NOT_AVAILABLE,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, ExtractionResult::Amount(_))
    }

    /// Parse the value as a decimal number.
    pub fn to_decimal(&self) -> Option<Decimal> {
        match self {
            ExtractionResult::Amount(value) => parse_amount(value),
            ExtractionResult::NotAvailable => None,
        }
    }

    pub fn into_string(self) -> String {
        match self {
            ExtractionResult::Amount(value) => value,
            ExtractionResult::NotAvailable => NOT_AVAILABLE.to_string(),
        }
    }
}

impl fmt::Display for ExtractionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ExtractionResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Locates an amount in a fragment and turns it into a canonical string.
#[derive(Debug, Clone)]
pub struct AmountNormalizer<W = EnglishNumberWords> {
    matcher: AmountMatcher,
    words: W,
}

impl AmountNormalizer {
    /// Create a normalizer using English number words.
    pub fn new() -> Self {
        Self::with_words(EnglishNumberWords::new())
    }
}

impl Default for AmountNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: NumberWords> AmountNormalizer<W> {
    /// Create a normalizer with a custom word-to-number grammar.
    pub fn with_words(words: W) -> Self {
        Self {
            matcher: AmountMatcher::new(),
            words,
        }
    }

    /// Normalize the first amount found in `fragment`.
    pub fn normalize(&self, fragment: &str) -> ExtractionResult {
        match self.matcher.find(fragment) {
            Some(found) => {
                if !found.rule.is_labelled() {
                    debug!("no amount label, trying words {:?}", found.value);
                }
                self.normalize_value(found.value)
            }
            None => {
                debug!("no amount in fragment {:?}", fragment);
                ExtractionResult::NotAvailable
            }
        }
    }

    /// Normalize an already captured value.
    ///
    /// Numerals are returned verbatim, separators included. Anything else is
    /// handed to the word grammar.
    pub fn normalize_value(&self, value: &str) -> ExtractionResult {
        if PURE_NUMERAL.is_match(value) {
            return ExtractionResult::Amount(value.to_string());
        }

        match self.words.to_number(value) {
            Some(number) => ExtractionResult::Amount(number.to_string()),
            None => {
                debug!("{:?} is not a number phrase", value);
                ExtractionResult::NotAvailable
            }
        }
    }
}

/// Normalize the amount in `fragment` to a decimal string or `"N/A"`.
pub fn normalize_amount(fragment: &str) -> String {
    AmountNormalizer::new().normalize(fragment).into_string()
}

/// Parse a numeral with optional grouping (e.g. "1,234.56", "1.234,56", "500").
///
/// When both `,` and `.` appear, the one occurring last is the decimal
/// separator. A lone separator followed by exactly three digits is grouping.
pub fn parse_amount(s: &str) -> Option<Decimal> {
    let cleaned: String = s
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ',' || *c == '.')
        .collect();

    let comma_pos = cleaned.rfind(',');
    let dot_pos = cleaned.rfind('.');

    let normalized = match (comma_pos, dot_pos) {
        (Some(c), Some(d)) if c > d => cleaned.replace('.', "").replace(',', "."),
        (Some(_), Some(_)) => cleaned.replace(',', ""),
        (Some(sep), None) | (None, Some(sep)) => {
            let separator = &cleaned[sep..=sep];
            let repeated = cleaned.matches(separator).count() > 1;
            if repeated || cleaned.len() - sep - 1 == 3 {
                cleaned.replace(separator, "")
            } else {
                cleaned.replace(',', ".")
            }
        }
        (None, None) => cleaned,
    };

    Decimal::from_str(&normalized).ok()
}
