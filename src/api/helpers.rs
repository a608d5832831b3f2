//! Shared helpers for the WASM API
//!
//! Console logging macros, serde conversions across the JS boundary and
//! the DOM status writer.

use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::editor::Status;
use crate::error::EditorError;
use crate::input::keys::Platform;
use crate::options::EditorOptions;

// ============================================================================
// Console Logging Functions
// ============================================================================

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    fn log(s: &str);

    #[wasm_bindgen(js_namespace = console)]
    fn warn(s: &str);

    #[wasm_bindgen(js_namespace = console)]
    fn error(s: &str);
}

// ============================================================================
// Logging Macros
// ============================================================================

/// Log a debug message with [WASM] prefix
#[macro_export]
macro_rules! wasm_log {
    ($($arg:tt)*) => {
        $crate::api::helpers::log_debug(&format!($($arg)*))
    };
}

/// Log a warning message with [WASM] prefix
#[macro_export]
macro_rules! wasm_warn {
    ($($arg:tt)*) => {
        $crate::api::helpers::log_warn(&format!($($arg)*))
    };
}

/// Log an error message with [WASM] prefix
#[macro_export]
macro_rules! wasm_error {
    ($($arg:tt)*) => {
        $crate::api::helpers::log_error(&format!($($arg)*))
    };
}

pub fn log_debug(msg: &str) {
    log(&format!("[WASM] {}", msg));
}

pub fn log_warn(msg: &str) {
    warn(&format!("[WASM] ⚠️ {}", msg));
}

pub fn log_error(msg: &str) {
    error(&format!("[WASM] ❌ {}", msg));
}

// ============================================================================
// Serialization/Deserialization Helpers
// ============================================================================

/// Deserialize a value from JavaScript with automatic error handling
pub fn deserialize<T: DeserializeOwned>(
    value: JsValue,
    error_context: &str,
) -> Result<T, JsValue> {
    serde_wasm_bindgen::from_value(value).map_err(|e| {
        let msg = format!("{}: {}", error_context, e);
        js_error(EditorError::InvalidPayload(msg))
    })
}

/// Serialize a value to JavaScript with automatic error handling
///
/// Maps become plain objects and `None` becomes `null`, so host data reads
/// back the way it was handed in.
pub fn serialize<T: Serialize>(value: &T, error_context: &str) -> Result<JsValue, JsValue> {
    value.serialize(&serde_wasm_bindgen::Serializer::json_compatible()).map_err(|e| {
        let msg = format!("{}: {}", error_context, e);
        log_error(&msg);
        JsValue::from_str(&msg)
    })
}

/// Convert any displayable error to a JsValue
pub fn js_error(e: impl std::fmt::Display) -> JsValue {
    let msg = e.to_string();
    log_error(&msg);
    JsValue::from_str(&msg)
}

/// Validate a gap index against the sequence length
pub fn validate_gap(gap: usize, len: usize, context: &str) -> Result<(), String> {
    if gap > len {
        return Err(format!("{} gap {} out of bounds (max: {})", context, gap, len));
    }
    Ok(())
}

/// Platform of the running browser, from `navigator.userAgent`
pub fn detect_platform() -> Option<Platform> {
    let user_agent = web_sys::window()?.navigator().user_agent().ok()?;
    Some(Platform::from_user_agent(&user_agent))
}

// ============================================================================
// DOM Status Writer
// ============================================================================

/// Mirror the status onto the page: alert classes on `#{id}` and the
/// message in `#{id}-status`. Missing elements are skipped.
pub fn write_status(status: &Status, options: &EditorOptions) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };

    if let (Some(container), Some((add, remove))) = (
        document.get_element_by_id(&options.id),
        status.alert_classes(options),
    ) {
        let classes = container.class_list();
        if let Err(e) = classes.remove_1(&remove).and_then(|_| classes.add_1(&add)) {
            log_warn(&format!("status classes not updated: {:?}", e));
        }
    }

    if let Some(label) = document.get_element_by_id(&options.class_name("status")) {
        label.set_text_content(status.message.as_deref());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_gap() {
        assert!(validate_gap(3, 3, "cursor").is_ok());
        assert_eq!(
            validate_gap(4, 3, "cursor"),
            Err("cursor gap 4 out of bounds (max: 3)".to_string())
        );
    }
}
