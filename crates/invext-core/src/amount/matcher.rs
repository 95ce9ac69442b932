//! Ordered surface patterns for locating an amount in a text fragment.

use lazy_static::lazy_static;
use regex::Regex;
use tracing::trace;

lazy_static! {
    // Numeral: digits, optionally followed by `,`/`.` separated digit groups.
    static ref TOTAL_AMOUNT: Regex = Regex::new(
        r"Total Amount:\s*\$?(\d+(?:[,.]\d+)*)"
    ).unwrap();

    static ref AMOUNT_DUE: Regex = Regex::new(
        r"Amount Due:\s*\$?(\d+(?:[,.]\d+)*)"
    ).unwrap();

    static ref AMOUNT_LABEL: Regex = Regex::new(
        r"Amount:\s*\$?(\d+(?:[,.]\d+)*)"
    ).unwrap();

    // Last resort for spelled-out amounts such as "Five Hundred".
    static ref WORD_PHRASE: Regex = Regex::new(
        r"(\w+\s+\w+)"
    ).unwrap();
}

/// A single surface pattern in the amount priority list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountRule {
    /// `Total Amount: $500`
    TotalAmount,
    /// `Amount Due: 500.00`
    AmountDue,
    /// `Amount: 1000`
    Amount,
    /// Any two consecutive words, e.g. `Five Hundred`.
    WordPhrase,
}

impl AmountRule {
    /// Rules in evaluation order. The first match wins.
    pub const PRIORITY: [AmountRule; 4] = [
        AmountRule::TotalAmount,
        AmountRule::AmountDue,
        AmountRule::Amount,
        AmountRule::WordPhrase,
    ];

    fn regex(self) -> &'static Regex {
        match self {
            AmountRule::TotalAmount => &*TOTAL_AMOUNT,
            AmountRule::AmountDue => &*AMOUNT_DUE,
            AmountRule::Amount => &*AMOUNT_LABEL,
            AmountRule::WordPhrase => &*WORD_PHRASE,
        }
    }

    /// Whether the rule is anchored on an amount label.
    pub fn is_labelled(self) -> bool {
        !matches!(self, AmountRule::WordPhrase)
    }

    /// Try this rule alone against a fragment.
    pub fn capture<'t>(self, fragment: &'t str) -> Option<&'t str> {
        self.regex()
            .captures(fragment)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }
}

/// Value captured by the first matching rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmountMatch<'t> {
    /// Rule that produced the match.
    pub rule: AmountRule,
    /// Captured text.
    pub value: &'t str,
}

/// Evaluates [`AmountRule::PRIORITY`] in sequence and stops at the first hit.
#[derive(Debug, Clone, Copy, Default)]
pub struct AmountMatcher;

impl AmountMatcher {
    pub fn new() -> Self {
        Self
    }

    /// Find the highest-priority amount in `fragment`, or `None` when no rule matches.
    pub fn find<'t>(&self, fragment: &'t str) -> Option<AmountMatch<'t>> {
        for rule in AmountRule::PRIORITY {
            if let Some(value) = rule.capture(fragment) {
                trace!("amount rule {:?} captured {:?}", rule, value);
                return Some(AmountMatch { rule, value });
            }
        }

        trace!("no amount rule matched {:?}", fragment);
        None
    }
}
