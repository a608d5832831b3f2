//! Data models for the formula editor
//!
//! Tokens, geometry and the external expression tree shape.

pub mod geometry;
pub mod token;
pub mod tree;

// Re-export commonly used types
pub use geometry::{Point, Rect};
pub use token::{Token, TokenId, TokenKind};
pub use tree::{FlatItem, Operand, Tree, UnitValue};
