//! Number formatting for Unit tokens
//!
//! A Unit stores its canonical value (no separators). The display form groups
//! the integer part in thousands and keeps the fraction verbatim, so stripping
//! the separators always gives back the canonical string.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Thousands separator used by the display form (locale-fixed)
pub const GROUP_SEPARATOR: char = ',';

/// Complete numeric literal as understood by the grammar
static NUMBER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-?\d+(\.\d+)?$").unwrap());

/// Partially typed numeric content a Unit may hold while the user is typing
static PARTIAL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-?\d*\.?\d*$").unwrap());

/// Display text of a numeric value (same output as `toDecimal` + split)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayNumber {
    /// Sign and grouped integer digits, e.g. `-1,000,000`
    pub integer: String,
    /// Decimal point and fraction digits, e.g. `.0214`; None without a point
    pub fraction: Option<String>,
}

impl DisplayNumber {
    /// Full display text
    pub fn text(&self) -> String {
        match &self.fraction {
            Some(fraction) => format!("{}{}", self.integer, fraction),
            None => self.integer.clone(),
        }
    }
}

/// Strip everything that is not a digit, sign or decimal point.
pub fn to_canonical(display: &str) -> String {
    display
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '-' || *c == '.')
        .collect()
}

/// Format a canonical numeric string for display.
pub fn format_number(value: &str) -> DisplayNumber {
    let canonical = to_canonical(value);
    let (integer, fraction) = match canonical.split_once('.') {
        Some((integer, fraction)) => (integer, Some(format!(".{}", fraction))),
        None => (canonical.as_str(), None),
    };

    DisplayNumber {
        integer: group_thousands(integer),
        fraction,
    }
}

/// Insert separators between every three integer digits, counted from the right.
fn group_thousands(integer: &str) -> String {
    let (sign, digits) = match integer.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", integer),
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    grouped.push_str(sign);
    for (i, ch) in digits.chars().enumerate() {
        let remaining = digits.len() - i;
        if i > 0 && remaining % 3 == 0 && ch.is_ascii_digit() {
            grouped.push(GROUP_SEPARATOR);
        }
        grouped.push(ch);
    }
    grouped
}

/// True for a complete number: `-?\d+(\.\d+)?`
pub fn is_number(value: &str) -> bool {
    NUMBER_RE.is_match(value)
}

/// True for content a Unit token may hold (complete or still being typed)
pub fn is_partial_number(value: &str) -> bool {
    !value.is_empty() && PARTIAL_RE.is_match(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_groups_integer_and_keeps_fraction() {
        let display = format_number("1000000.0214");
        assert_eq!(display.integer, "1,000,000");
        assert_eq!(display.fraction.as_deref(), Some(".0214"));
        assert_eq!(display.text(), "1,000,000.0214");
    }

    #[test]
    fn test_format_small_and_negative() {
        assert_eq!(format_number("100").text(), "100");
        assert_eq!(format_number("1000").text(), "1,000");
        assert_eq!(format_number("-1234567").text(), "-1,234,567");
        assert_eq!(format_number("-123").text(), "-123");
    }

    #[test]
    fn test_format_partial_values() {
        assert_eq!(format_number("1.").text(), "1.");
        assert_eq!(format_number(".5").text(), ".5");
        assert_eq!(format_number("-").text(), "-");
    }

    #[test]
    fn test_canonical_strips_separators() {
        assert_eq!(to_canonical("1,000,000.0214"), "1000000.0214");
        assert_eq!(to_canonical(",000"), "000");
    }

    #[test]
    fn test_partial_number() {
        assert!(is_partial_number("12"));
        assert!(is_partial_number("1."));
        assert!(is_partial_number("-"));
        assert!(is_partial_number("."));
        assert!(!is_partial_number("1.2.3"));
        assert!(!is_partial_number("5-3"));
        assert!(!is_partial_number(""));
    }

    #[test]
    fn test_complete_number() {
        assert!(is_number("-12.5"));
        assert!(!is_number("12."));
        assert!(!is_number("-"));
    }
}
