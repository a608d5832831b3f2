//! Error types for the formula editor
//!
//! Grammar failures are values, never panics: a failed load is abandoned and a
//! failed extraction simply yields no tree. `EditorError` is only used at the
//! host boundary where payloads arrive untyped.

use thiserror::Error;

/// Failure reported by a grammar engine while converting between the flat
/// item list and the expression tree.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GrammarError {
    /// Nothing to convert
    #[error("empty expression")]
    Empty,

    /// An item that is neither an operand, an operator nor a bracket
    #[error("unexpected item `{0}`")]
    UnexpectedItem(String),

    /// Two operands or two operators in a row, or a dangling operator
    #[error("malformed expression at item {0}")]
    Malformed(usize),

    /// Brackets do not pair up
    #[error("unbalanced brackets")]
    UnbalancedBrackets,

    /// Operator in the tree that the grammar does not know
    #[error("unsupported operator `{0}`")]
    UnsupportedOperator(String),
}

impl GrammarError {
    /// Numeric result code, non-zero for every failure.
    pub fn code(&self) -> u32 {
        match self {
            GrammarError::Empty => 1,
            GrammarError::UnexpectedItem(_) => 2,
            GrammarError::Malformed(_) => 3,
            GrammarError::UnbalancedBrackets => 4,
            GrammarError::UnsupportedOperator(_) => 5,
        }
    }
}

/// Errors surfaced to the host page
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("load rejected: {0}")]
    LoadRejected(#[from] GrammarError),

    #[error("invalid payload: {0}")]
    InvalidPayload(String),

    #[error("invalid options: {0}")]
    InvalidOptions(String),
}
