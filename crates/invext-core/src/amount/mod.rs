//! Monetary amount normalization.
//!
//! A fragment of invoice text is searched with an ordered list of
//! [`AmountRule`]s. The first rule that matches supplies the captured value,
//! which is either returned as-is (numerals) or converted from words through
//! a [`NumberWords`] implementation. Every failure path ends in the
//! [`NOT_AVAILABLE`] sentinel.

mod matcher;
mod normalizer;
pub mod words;

pub use matcher::{AmountMatch, AmountMatcher, AmountRule};
pub use normalizer::{normalize_amount, parse_amount, AmountNormalizer, ExtractionResult, NOT_AVAILABLE};
pub use words::{EnglishNumberWords, NumberWords};
