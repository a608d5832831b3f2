//! Tree bridge and update pipeline
//!
//! Loading flattens a tree through the grammar and replays it as ordinary
//! insertions. Extraction reads the sequence back into flat items and asks
//! the grammar for a tree. Every content change ends in `trigger_update`:
//! extract, refresh the status, then notify the input observer.

use serde::{Deserialize, Serialize};

use crate::editor::state::Editor;
use crate::error::GrammarError;
use crate::models::{FlatItem, Token, TokenKind, Tree};
use crate::options::{EditorOptions, InsertData, StatusText};

/// Valid/invalid indicator
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Status {
    /// None until the first validation
    pub valid: Option<bool>,
    pub message: Option<String>,
}

impl Status {
    pub fn initial(text: &StatusText) -> Self {
        Self {
            valid: None,
            message: text.formula.clone(),
        }
    }

    fn checked(valid: bool, text: &StatusText) -> Self {
        let message = if valid { text.pass.clone() } else { text.error.clone() };
        Self {
            valid: Some(valid),
            message,
        }
    }

    /// Marker class to add, and the one to remove, e.g. `formulize-alert-good`
    pub fn alert_classes(&self, options: &EditorOptions) -> Option<(String, String)> {
        let good = options.class_name("alert-good");
        let error = options.class_name("alert-error");
        match self.valid? {
            true => Some((good, error)),
            false => Some((error, good)),
        }
    }
}

impl Editor {
    /// Replace the content with `tree`.
    ///
    /// The editor is cleared first. If the grammar cannot flatten the tree
    /// nothing is inserted and the error is returned.
    pub fn load(&mut self, tree: &Tree) -> Result<(), GrammarError> {
        self.clear();

        let items = self.grammar.to_items(tree).map_err(|e| {
            log::warn!("rejecting load: {}", e);
            e
        })?;

        log::info!("loading {} items ({} operands)", items.len(), tree.leaf_count());
        self.insert_sequence(items.into_iter().map(InsertData::from));
        Ok(())
    }

    /// Flat items for the current sequence
    pub fn extract_items(&self) -> Vec<FlatItem> {
        self.tokens.iter().map(|token| self.item_for(token)).collect()
    }

    fn item_for(&self, token: &Token) -> FlatItem {
        let data = self.node_data.get(token.id);
        if let Some(hook) = &self.hooks.parse {
            return hook(token, data);
        }

        match (data, token.kind) {
            (Some(data), _) => FlatItem::Data(data.clone()),
            (None, TokenKind::Element) => {
                FlatItem::Data(serde_json::Value::String(token.value.clone()))
            }
            (None, _) => FlatItem::Value(token.value.clone()),
        }
    }

    /// Current tree, None when the sequence is empty or not well-formed
    pub fn extract(&self) -> Option<Tree> {
        match self.grammar.to_tree(&self.extract_items()) {
            Ok(tree) => Some(tree),
            Err(GrammarError::Empty) => None,
            Err(e) => {
                log::trace!("extract failed: {}", e);
                None
            }
        }
    }

    /// Extract and hand the result to `on_extract`.
    pub fn extract_with<R>(&self, on_extract: impl FnOnce(Option<Tree>) -> R) -> R {
        on_extract(self.extract())
    }

    /// Check the expression and refresh the status indicator.
    pub fn validate(&mut self) -> bool {
        let tree = self.extract();
        self.check(tree.as_ref())
    }

    /// Like [`validate`](Self::validate), also handing the result to `on_validate`.
    pub fn validate_with(&mut self, on_validate: impl FnOnce(bool)) -> bool {
        let valid = self.validate();
        on_validate(valid);
        valid
    }

    fn check(&mut self, tree: Option<&Tree>) -> bool {
        let valid = tree.is_some_and(|tree| self.grammar.is_valid(tree));
        if self.options.status {
            self.status = Some(Status::checked(valid, &self.options.text));
        }
        valid
    }

    /// Extract, validate, then notify the input observer.
    pub(crate) fn trigger_update(&mut self) {
        let tree = self.extract();
        self.check(tree.as_ref());

        if let Some(hook) = self.hooks.input.as_mut() {
            hook(tree.as_ref());
        }
        self.value = tree;
    }
}
