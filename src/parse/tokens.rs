//! Token recognition and validation
//!
//! Classifies a raw input string as a numeric continuation, a bracket, a
//! comma or a supported operator symbol. Anything else is not a token.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Operator symbols accepted by the editor (brackets and comma included)
pub const SUPPORTED_CHARACTERS: &[&str] = &["+", "-", "x", "*", "/", "%", "(", ")", ","];

/// Anything carrying a digit or a decimal point continues a number
static NUMERIC_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9.]").unwrap());

/// Classification of raw input
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenClass {
    Numeric,
    Bracket,
    Comma,
    Operator,
}

/// Classify a raw value; None means the input is not a token and is ignored.
pub fn classify(value: &str) -> Option<TokenClass> {
    if is_numeric(value) {
        Some(TokenClass::Numeric)
    } else if is_bracket(value) {
        Some(TokenClass::Bracket)
    } else if is_comma(value) {
        Some(TokenClass::Comma)
    } else if is_supported(value) {
        Some(TokenClass::Operator)
    } else {
        None
    }
}

pub fn is_valid(value: &str) -> bool {
    classify(value).is_some()
}

pub fn is_numeric(value: &str) -> bool {
    NUMERIC_RE.is_match(value)
}

pub fn is_bracket(value: &str) -> bool {
    matches!(value, "(" | ")")
}

pub fn is_comma(value: &str) -> bool {
    value == ","
}

pub fn is_supported(value: &str) -> bool {
    SUPPORTED_CHARACTERS.contains(&value)
}
