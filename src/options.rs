//! Editor configuration
//!
//! `EditorOptions` is plain data (deserializable from JSON or YAML, every
//! field defaulted). The interception hooks are closures and live in
//! `EditorHooks` beside it.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::EditorError;
use crate::input::keys::Platform;
use crate::models::{FlatItem, Token, Tree};

/// Namespace used when none is configured
pub const DEFAULT_ID: &str = "formulize";

/// Pointer travel (either axis) that turns a click into a drag
pub const DEFAULT_DRAG_THRESHOLD: f64 = 5.0;

/// Construction-time options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorOptions {
    /// Namespace for generated structural markers (`{id}-cursor`, `{id}-unit`, ...)
    pub id: String,
    pub text: StatusText,
    /// Maintain the valid/invalid status indicator
    pub status: bool,
    /// How node data set twice on the same token is combined
    pub merge_strategy: MergeStrategy,
    pub layout: LayoutOptions,
    pub drag_threshold: f64,
    /// Keyboard convention; the browser wrapper fills it from the user agent when unset
    pub platform: Option<Platform>,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            id: DEFAULT_ID.to_string(),
            text: StatusText::default(),
            status: true,
            merge_strategy: MergeStrategy::default(),
            layout: LayoutOptions::default(),
            drag_threshold: DEFAULT_DRAG_THRESHOLD,
            platform: None,
        }
    }
}

impl EditorOptions {
    pub fn with_id(id: &str) -> Self {
        Self {
            id: id.to_string(),
            ..Self::default()
        }
    }

    /// Configured platform, `Other` when unset
    pub fn platform(&self) -> Platform {
        self.platform.unwrap_or_default()
    }

    /// Scoped marker name, e.g. `formulize-cursor`
    pub fn class_name(&self, suffix: &str) -> String {
        format!("{}-{}", self.id, suffix)
    }

    pub fn from_json_str(source: &str) -> Result<Self, EditorError> {
        serde_json::from_str(source).map_err(|e| EditorError::InvalidOptions(e.to_string()))
    }

    pub fn from_yaml_str(source: &str) -> Result<Self, EditorError> {
        serde_yaml::from_str(source).map_err(|e| EditorError::InvalidOptions(e.to_string()))
    }
}

/// Status messages
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusText {
    /// Placeholder shown before anything was validated
    pub formula: Option<String>,
    /// Shown while the expression is well-formed
    pub pass: Option<String>,
    /// Shown while the expression is not well-formed
    pub error: Option<String>,
}

/// Node data merge strategy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MergeStrategy {
    Replace,
    #[default]
    Shallow,
    Deep,
}

/// Geometry of the built-in flow layout
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutOptions {
    pub char_width: f64,
    pub line_height: f64,
    /// Row width before wrapping; None never wraps
    pub max_width: Option<f64>,
    /// Horizontal gap between tokens
    pub spacing: f64,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            char_width: 10.0,
            line_height: 20.0,
            max_width: None,
            spacing: 4.0,
        }
    }
}

/// Data handed to `insert`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InsertData {
    Number(f64),
    Text(String),
    /// Host item: becomes an Element token carrying `data` as node data
    Node { label: String, data: serde_json::Value },
}

impl InsertData {
    pub fn is_empty(&self) -> bool {
        match self {
            InsertData::Text(text) => text.is_empty(),
            InsertData::Number(_) => false,
            InsertData::Node { .. } => false,
        }
    }
}

impl From<&str> for InsertData {
    fn from(value: &str) -> Self {
        InsertData::Text(value.to_string())
    }
}

impl From<String> for InsertData {
    fn from(value: String) -> Self {
        InsertData::Text(value)
    }
}

impl From<f64> for InsertData {
    fn from(value: f64) -> Self {
        InsertData::Number(value)
    }
}

impl From<FlatItem> for InsertData {
    fn from(item: FlatItem) -> Self {
        match item {
            FlatItem::Value(value) => InsertData::Text(value),
            FlatItem::Data(data) => InsertData::Node {
                label: node_label(&data),
                data,
            },
        }
    }
}

/// Label shown for host data: its `label` field if present, the JSON text otherwise
pub fn node_label(data: &serde_json::Value) -> String {
    data.get("label")
        .and_then(|label| label.as_str())
        .map(str::to_string)
        .unwrap_or_else(|| data.to_string())
}

/// Transforms data before it is inserted
pub type InsertHook = Box<dyn Fn(InsertData) -> InsertData>;

/// Transforms a token (and its node data) into the item used for extraction
pub type ParseHook = Box<dyn Fn(&Token, Option<&serde_json::Value>) -> FlatItem>;

/// Observer invoked with the extracted tree after every change
pub type InputHook = Box<dyn FnMut(Option<&Tree>)>;

/// Interception hooks and the value observer
#[derive(Default)]
pub struct EditorHooks {
    pub insert: Option<InsertHook>,
    pub parse: Option<ParseHook>,
    pub input: Option<InputHook>,
}

impl EditorHooks {
    pub fn on_input(mut self, hook: impl FnMut(Option<&Tree>) + 'static) -> Self {
        self.input = Some(Box::new(hook));
        self
    }

    pub fn on_insert(mut self, hook: impl Fn(InsertData) -> InsertData + 'static) -> Self {
        self.insert = Some(Box::new(hook));
        self
    }

    pub fn on_parse(
        mut self,
        hook: impl Fn(&Token, Option<&serde_json::Value>) -> FlatItem + 'static,
    ) -> Self {
        self.parse = Some(Box::new(hook));
        self
    }
}

impl fmt::Debug for EditorHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditorHooks")
            .field("insert", &self.insert.is_some())
            .field("parse", &self.parse.is_some())
            .field("input", &self.input.is_some())
            .finish()
    }
}
