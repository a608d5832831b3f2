//! Parsing module for the formula editor
//!
//! Token classification, number formatting and the grammar engine that
//! converts the flat token list to and from an expression tree.

pub mod grammar;
pub mod number;
pub mod tokens;

// Re-export commonly used types
pub use grammar::{ArithmeticGrammar, Grammar};
pub use number::{format_number, to_canonical, DisplayNumber};
pub use tokens::*;
