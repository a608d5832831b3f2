//! Formula Editor WASM Module
//!
//! Expression editing engine for composing arithmetic formulas as a flat
//! sequence of numeric units and operators, converted to and from a binary
//! expression tree.

pub mod api;
pub mod editor;
pub mod error;
pub mod input;
pub mod models;
pub mod options;
pub mod parse;

// Re-export commonly used types
pub use editor::{DragGroup, Editor, Status};
pub use error::{EditorError, GrammarError};
pub use input::{EditorBehavior, KeyInput, KeyOutcome};
pub use models::*;
pub use options::{EditorHooks, EditorOptions, InsertData};
pub use parse::{ArithmeticGrammar, Grammar};

use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    init_logger();
    log::info!("Formula Editor WASM module initialized");
}

#[cfg(feature = "console_log")]
fn init_logger() {
    if console_log::init_with_level(log::Level::Debug).is_err() {
        web_sys::console::warn_1(&"logger already initialized".into());
    }
}

#[cfg(not(feature = "console_log"))]
fn init_logger() {}
