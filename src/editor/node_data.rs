//! Host data attached to tokens
//!
//! Data lives beside the token sequence, keyed by token id, and is dropped
//! together with the token. Setting data twice combines the two values
//! according to the configured [`MergeStrategy`].

use std::collections::HashMap;

use serde_json::Value;

use crate::models::TokenId;
use crate::options::MergeStrategy;

#[derive(Debug, Clone, Default)]
pub struct NodeData {
    entries: HashMap<TokenId, Value>,
    strategy: MergeStrategy,
}

impl NodeData {
    pub fn new(strategy: MergeStrategy) -> Self {
        Self {
            entries: HashMap::new(),
            strategy,
        }
    }

    pub fn get(&self, id: TokenId) -> Option<&Value> {
        self.entries.get(&id)
    }

    pub fn set(&mut self, id: TokenId, data: Value) {
        match self.entries.get_mut(&id) {
            Some(existing) => merge(existing, data, self.strategy),
            None => {
                self.entries.insert(id, data);
            }
        }
    }

    pub fn remove(&mut self, id: TokenId) -> Option<Value> {
        self.entries.remove(&id)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Combine `incoming` into `target`.
///
/// Non-object values always replace. Deep merge recurses into objects and
/// concatenates arrays.
pub fn merge(target: &mut Value, incoming: Value, strategy: MergeStrategy) {
    match (strategy, target, incoming) {
        (MergeStrategy::Replace, target, incoming) => *target = incoming,
        (MergeStrategy::Shallow, Value::Object(existing), Value::Object(incoming)) => {
            existing.extend(incoming);
        }
        (MergeStrategy::Deep, Value::Object(existing), Value::Object(incoming)) => {
            for (key, value) in incoming {
                match existing.get_mut(&key) {
                    Some(slot) => merge(slot, value, MergeStrategy::Deep),
                    None => {
                        existing.insert(key, value);
                    }
                }
            }
        }
        (MergeStrategy::Deep, Value::Array(existing), Value::Array(incoming)) => {
            existing.extend(incoming);
        }
        (_, target, incoming) => *target = incoming,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_replace() {
        let mut data = NodeData::new(MergeStrategy::Replace);
        data.set(TokenId(1), json!({ "a": 1 }));
        data.set(TokenId(1), json!({ "b": 2 }));
        assert_eq!(data.get(TokenId(1)), Some(&json!({ "b": 2 })));
    }

    #[test]
    fn test_shallow_keeps_top_level_keys() {
        let mut data = NodeData::new(MergeStrategy::Shallow);
        data.set(TokenId(1), json!({ "a": 1, "nested": { "x": 1 } }));
        data.set(TokenId(1), json!({ "nested": { "y": 2 } }));
        assert_eq!(data.get(TokenId(1)), Some(&json!({ "a": 1, "nested": { "y": 2 } })));
    }

    #[test]
    fn test_deep_merges_nested() {
        let mut data = NodeData::new(MergeStrategy::Deep);
        data.set(TokenId(1), json!({ "nested": { "x": 1 }, "tags": ["a"] }));
        data.set(TokenId(1), json!({ "nested": { "y": 2 }, "tags": ["b"] }));
        assert_eq!(
            data.get(TokenId(1)),
            Some(&json!({ "nested": { "x": 1, "y": 2 }, "tags": ["a", "b"] }))
        );
    }

    #[test]
    fn test_scalar_replaces() {
        let mut data = NodeData::new(MergeStrategy::Deep);
        data.set(TokenId(1), json!({ "a": 1 }));
        data.set(TokenId(1), json!(5));
        assert_eq!(data.get(TokenId(1)), Some(&json!(5)));
        assert_eq!(data.remove(TokenId(1)), Some(json!(5)));
        assert!(data.is_empty());
    }
}
