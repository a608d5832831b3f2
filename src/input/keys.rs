//! Keyboard decoding
//!
//! Maps a `KeyboardEvent.key` value plus modifier flags to an editing intent
//! or to a literal character to insert.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::parse::tokens::is_supported;

/// `KeyboardEvent.key` values the editor reacts to
pub mod codes {
    pub const BACKSPACE: &str = "Backspace";
    pub const DELETE: &str = "Delete";
    pub const HOME: &str = "Home";
    pub const END: &str = "End";
    pub const LEFT_ARROW: &str = "ArrowLeft";
    pub const UP_ARROW: &str = "ArrowUp";
    pub const RIGHT_ARROW: &str = "ArrowRight";
    pub const DOWN_ARROW: &str = "ArrowDown";
    pub const F5: &str = "F5";
    pub const ASTERISK: &str = "*";
    pub const PLUS: &str = "+";
    pub const EQUALS: &str = "=";
    pub const PLUS_MINUS: &str = "±";
    pub const SUBTRACT: &str = "-";
    pub const LONG_MINUS: &str = "–";
    pub const PERIOD: &str = ".";
    pub const DIVIDE: &str = "/";
    /// Option + / on mac
    pub const DIVIDE_ALT: &str = "÷";
}

static NUMBER_KEY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+").unwrap());

/// Host platform, decides which modifier acts as the command key
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Mac,
    #[default]
    Other,
}

impl Platform {
    pub fn from_user_agent(user_agent: &str) -> Self {
        if user_agent.contains("Mac OS X") {
            Platform::Mac
        } else {
            Platform::Other
        }
    }
}

/// A key press as delivered by the host
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyInput {
    pub key: String,
    #[serde(default)]
    pub ctrl: bool,
    #[serde(default)]
    pub shift: bool,
    #[serde(default)]
    pub meta: bool,
}

impl KeyInput {
    pub fn new(key: &str) -> Self {
        Self {
            key: key.to_string(),
            ..Self::default()
        }
    }

    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }

    pub fn with_meta(mut self) -> Self {
        self.meta = true;
        self
    }
}

/// Editing intent decoded from a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyIntent {
    Reload,
    SelectAll,
    Backspace,
    Delete,
    Up,
    Down,
    Home,
    End,
    Left,
    Right,
}

pub fn is_reload(input: &KeyInput, platform: Platform) -> bool {
    match platform {
        Platform::Mac => input.shift && input.meta && input.key == "r",
        Platform::Other => input.key == codes::F5 || (input.ctrl && input.key == "r"),
    }
}

pub fn is_select_all(input: &KeyInput, platform: Platform) -> bool {
    let modifier = match platform {
        Platform::Mac => input.meta,
        Platform::Other => input.ctrl,
    };
    modifier && input.key == "a"
}

/// Home key, or Meta + Left on mac keyboards without one
pub fn is_home(input: &KeyInput, platform: Platform) -> bool {
    input.key == codes::HOME
        || (platform == Platform::Mac && input.meta && input.key == codes::LEFT_ARROW)
}

/// End key, or Meta + Right on mac keyboards without one
pub fn is_end(input: &KeyInput, platform: Platform) -> bool {
    input.key == codes::END
        || (platform == Platform::Mac && input.meta && input.key == codes::RIGHT_ARROW)
}

/// Decode the intent of a key press; first match wins.
pub fn analyze(input: &KeyInput, platform: Platform) -> Option<KeyIntent> {
    if is_reload(input, platform) {
        return Some(KeyIntent::Reload);
    }
    if is_select_all(input, platform) {
        return Some(KeyIntent::SelectAll);
    }

    match input.key.as_str() {
        codes::BACKSPACE => return Some(KeyIntent::Backspace),
        codes::DELETE => return Some(KeyIntent::Delete),
        codes::UP_ARROW => return Some(KeyIntent::Up),
        codes::DOWN_ARROW => return Some(KeyIntent::Down),
        _ => {}
    }

    if is_home(input, platform) {
        return Some(KeyIntent::Home);
    }
    if is_end(input, platform) {
        return Some(KeyIntent::End);
    }

    match input.key.as_str() {
        codes::LEFT_ARROW => Some(KeyIntent::Left),
        codes::RIGHT_ARROW => Some(KeyIntent::Right),
        _ => None,
    }
}

/// Symbol produced by shift + digit on a US layout
fn shifted_digit(key: &str) -> Option<&'static str> {
    let symbol = match key {
        "1" => "!",
        "2" => "@",
        "3" => "#",
        "4" => "$",
        "5" => "%",
        "6" => "^",
        "7" => "&",
        "8" => "*",
        "9" => "(",
        "0" => ")",
        _ => return None,
    };
    Some(symbol)
}

/// Literal character to insert for a key, if any.
pub fn key_value(key: &str, shift: bool) -> Option<String> {
    if key == codes::ASTERISK {
        return Some("x".to_string());
    }

    if ((key == codes::PLUS_MINUS || key == codes::EQUALS) && shift) || key == codes::PLUS {
        return Some("+".to_string());
    }

    if key == codes::SUBTRACT || key == codes::LONG_MINUS {
        return Some("-".to_string());
    }

    if key == codes::PERIOD {
        return Some(".".to_string());
    }

    if key == codes::DIVIDE || key == codes::DIVIDE_ALT {
        return Some("/".to_string());
    }

    let is_number = NUMBER_KEY_RE.is_match(key);
    if is_number && shift {
        return shifted_digit(key).map(str::to_string);
    }

    if is_number || is_supported(key) {
        return Some(key.to_string());
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_from_user_agent() {
        assert_eq!(
            Platform::from_user_agent("Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7)"),
            Platform::Mac
        );
        assert_eq!(Platform::from_user_agent("Windows"), Platform::Other);
    }

    #[test]
    fn test_reload() {
        assert!(is_reload(&KeyInput::new("F5"), Platform::Other));
        assert!(!is_reload(&KeyInput::new("F5"), Platform::Mac));
        assert!(is_reload(&KeyInput::new("r").with_ctrl(), Platform::Other));
        assert!(!is_reload(&KeyInput::new("r").with_ctrl(), Platform::Mac));
        assert!(is_reload(&KeyInput::new("r").with_shift().with_meta(), Platform::Mac));
        assert!(!is_reload(&KeyInput::new("r").with_shift().with_meta(), Platform::Other));
    }

    #[test]
    fn test_select_all() {
        assert!(is_select_all(&KeyInput::new("a").with_ctrl(), Platform::Other));
        assert!(!is_select_all(&KeyInput::new("a").with_ctrl(), Platform::Mac));
        assert!(is_select_all(&KeyInput::new("a").with_meta(), Platform::Mac));
        assert!(!is_select_all(&KeyInput::new("a").with_meta(), Platform::Other));
    }

    #[test]
    fn test_mac_home_end_take_priority_over_arrows() {
        let home = KeyInput::new(codes::LEFT_ARROW).with_meta();
        assert_eq!(analyze(&home, Platform::Mac), Some(KeyIntent::Home));
        assert_eq!(analyze(&home, Platform::Other), Some(KeyIntent::Left));

        let end = KeyInput::new(codes::RIGHT_ARROW).with_meta();
        assert_eq!(analyze(&end, Platform::Mac), Some(KeyIntent::End));
    }

    #[test]
    fn test_analyze_ignores_literals() {
        assert_eq!(analyze(&KeyInput::new("7"), Platform::Other), None);
        assert_eq!(
            analyze(&KeyInput::new(codes::BACKSPACE), Platform::Other),
            Some(KeyIntent::Backspace)
        );
    }
}
