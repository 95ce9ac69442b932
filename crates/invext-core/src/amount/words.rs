//! Conversion of spelled-out quantities ("five hundred") to integers.

use std::collections::HashMap;

use lazy_static::lazy_static;
use tracing::trace;

/// Word-to-number capability used by the amount normalizer.
///
/// Implementations return `None` when the phrase is not a number expression
/// in their grammar. They must not panic on arbitrary input.
pub trait NumberWords: Send + Sync {
    /// Convert a word-form quantity phrase to an integer.
    fn to_number(&self, phrase: &str) -> Option<u64>;
}

lazy_static! {
    static ref SMALL_NUMBERS: HashMap<&'static str, u64> = {
        let mut m = HashMap::new();
        for (i, word) in [
            "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine",
            "ten", "eleven", "twelve", "thirteen", "fourteen", "fifteen", "sixteen",
            "seventeen", "eighteen", "nineteen",
        ]
        .iter()
        .enumerate()
        {
            m.insert(*word, i as u64);
        }
        m.insert("twenty", 20);
        m.insert("thirty", 30);
        m.insert("forty", 40);
        m.insert("fifty", 50);
        m.insert("sixty", 60);
        m.insert("seventy", 70);
        m.insert("eighty", 80);
        m.insert("ninety", 90);
        m
    };

    static ref SCALES: HashMap<&'static str, u64> = {
        let mut m = HashMap::new();
        m.insert("thousand", 1_000);
        m.insert("million", 1_000_000);
        m.insert("billion", 1_000_000_000);
        m.insert("trillion", 1_000_000_000_000);
        m
    };
}

/// American short-scale English number words.
///
/// Tokens are split on whitespace and hyphens and compared case-insensitively.
/// Words outside the grammar (e.g. "and", "dollars") and digit tokens are
/// skipped. A scale word with no count before it counts once ("thousand",
/// "a hundred"). A phrase is rejected when it has no number word at all,
/// repeats a scale word or lists scales in ascending order, or contains a
/// fractional part ("point").
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishNumberWords;

impl EnglishNumberWords {
    pub fn new() -> Self {
        Self
    }
}

impl NumberWords for EnglishNumberWords {
    fn to_number(&self, phrase: &str) -> Option<u64> {
        let lower = phrase.to_lowercase();

        let mut total: u64 = 0;
        let mut current: u64 = 0;
        let mut last_scale: Option<u64> = None;
        let mut has_count = false;
        let mut found = false;

        let tokens = lower
            .split(|c: char| c.is_whitespace() || c == '-')
            .map(|t| t.trim_matches(|c: char| !c.is_alphanumeric()))
            .filter(|t| !t.is_empty());

        for token in tokens {
            if token == "point" {
                trace!("fractional number phrase rejected: {:?}", phrase);
                return None;
            }

            if let Some(&value) = SMALL_NUMBERS.get(token) {
                current = current.checked_add(value)?;
                has_count = true;
                found = true;
            } else if token == "hundred" {
                let count = if has_count { current } else { 1 };
                current = count.checked_mul(100)?;
                has_count = true;
                found = true;
            } else if let Some(&scale) = SCALES.get(token) {
                if last_scale.is_some_and(|prev| scale >= prev) {
                    trace!("scale word {:?} out of order in {:?}", token, phrase);
                    return None;
                }
                let count = if has_count { current } else { 1 };
                total = total.checked_add(count.checked_mul(scale)?)?;
                current = 0;
                has_count = false;
                last_scale = Some(scale);
                found = true;
            }
        }

        if !found {
            return None;
        }

        total.checked_add(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn convert(phrase: &str) -> Option<u64> {
        EnglishNumberWords::new().to_number(phrase)
    }

    #[test]
    fn test_simple_words() {
        assert_eq!(convert("zero"), Some(0));
        assert_eq!(convert("Seven"), Some(7));
        assert_eq!(convert("nineteen"), Some(19));
        assert_eq!(convert("twenty-three"), Some(23));
        assert_eq!(convert("Ninety Nine"), Some(99));
    }

    #[test]
    fn test_hundreds_and_scales() {
        assert_eq!(convert("Five Hundred"), Some(500));
        assert_eq!(convert("one thousand two hundred and thirty four"), Some(1234));
        assert_eq!(convert("two million three thousand"), Some(2_003_000));
        assert_eq!(convert("thousand"), Some(1000));
        assert_eq!(convert("a hundred"), Some(100));
    }

    #[test]
    fn test_filler_words_are_skipped() {
        assert_eq!(convert("fifty dollars"), Some(50));
        assert_eq!(convert("five hundred thousand"), Some(500_000));
    }

    #[test]
    fn test_digit_tokens_are_not_number_words() {
        assert_eq!(convert("Invoice 12345"), None);
        assert_eq!(convert("Page 1"), None);
    }

    #[test]
    fn test_explicit_zero_count() {
        assert_eq!(convert("zero thousand"), Some(0));
        assert_eq!(convert("zero hundred"), Some(0));
        assert_eq!(convert("one thousand zero hundred"), Some(1000));
    }

    #[test]
    fn test_rejected_phrases() {
        assert_eq!(convert("Thank you"), None);
        assert_eq!(convert(""), None);
        assert_eq!(convert("one thousand two thousand"), None);
        assert_eq!(convert("five thousand one million"), None);
        assert_eq!(convert("two point five"), None);
    }

    #[test]
    fn test_overflow_is_rejected() {
        assert_eq!(
            convert("one hundred hundred hundred hundred hundred hundred hundred hundred hundred hundred"),
            None
        );
        assert_eq!(convert("nine hundred hundred hundred hundred trillion"), None);
    }
}
