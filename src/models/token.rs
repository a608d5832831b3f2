//! Token model
//!
//! The editor content is an ordered list of tokens. A Unit is a numeric
//! fragment stored in canonical form; an Operator is a single supported
//! symbol; an Element is a host-provided item that carries node data.

use serde::{Deserialize, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};

use crate::parse::number::{format_number, DisplayNumber};
use crate::parse::tokens::is_bracket;

/// Identity of a token within one editor (never reused)
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TokenId(pub u64);

/// Semantic kind of a token
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize_repr, Deserialize_repr)]
pub enum TokenKind {
    /// Numeric fragment
    Unit = 0,
    /// Operator, bracket, comma or percent
    Operator = 1,
    /// Host-provided item
    Element = 2,
}

/// A single element of the token sequence
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Token {
    pub id: TokenId,
    pub kind: TokenKind,
    /// Canonical value for Units, the symbol for Operators, the label for Elements
    pub value: String,
    /// Operator sub-kind for `(` and `)`
    pub bracket: bool,
}

impl Token {
    pub fn unit(id: TokenId, canonical: &str) -> Self {
        Self {
            id,
            kind: TokenKind::Unit,
            value: canonical.to_string(),
            bracket: false,
        }
    }

    pub fn operator(id: TokenId, symbol: &str) -> Self {
        let symbol = symbol.to_lowercase();
        Self {
            id,
            kind: TokenKind::Operator,
            bracket: is_bracket(&symbol),
            value: symbol,
        }
    }

    pub fn element(id: TokenId, label: &str) -> Self {
        Self {
            id,
            kind: TokenKind::Element,
            value: label.to_string(),
            bracket: false,
        }
    }

    pub fn is_unit(&self) -> bool {
        self.kind == TokenKind::Unit
    }

    pub fn is_operator(&self) -> bool {
        self.kind == TokenKind::Operator
    }

    /// Formatted number, only for Units
    pub fn display_number(&self) -> Option<DisplayNumber> {
        self.is_unit().then(|| format_number(&self.value))
    }

    /// Text shown on screen
    pub fn display(&self) -> String {
        match self.display_number() {
            Some(number) => number.text(),
            None => self.value.clone(),
        }
    }

    /// Number of characters shown on screen
    pub fn display_len(&self) -> usize {
        self.display().chars().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_display() {
        let token = Token::unit(TokenId(1), "1000000.0214");
        assert_eq!(token.display(), "1,000,000.0214");
        assert_eq!(token.display_len(), 14);
    }

    #[test]
    fn test_operator_bracket_tag() {
        assert!(Token::operator(TokenId(1), "(").bracket);
        assert!(!Token::operator(TokenId(2), "+").bracket);
        assert_eq!(Token::operator(TokenId(3), "X").value, "x");
    }

    #[test]
    fn test_kind_serializes_as_number() {
        assert_eq!(serde_json::to_string(&TokenKind::Operator).unwrap(), "1");
    }
}
