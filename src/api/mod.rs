//! Formula Editor WASM API
//!
//! The JavaScript-facing surface of the crate.
//!
//! # Module Structure
//!
//! - `helpers`: logging macros, serialization at the JS boundary, DOM status writer
//! - `editor`: the `FormulaEditor` class

pub mod helpers;
pub mod editor;

pub use editor::FormulaEditor;
