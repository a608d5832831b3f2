//! Editor state: the token sequence, the cursor gap and the drag group
//!
//! The cursor is a gap index in `0..=tokens.len()`. The drag group is a
//! non-empty `start..end` range of token indices. Selecting leaves the
//! cursor on one of the group's boundaries; keyboard extension only works
//! from there.

use serde::{Deserialize, Serialize};

use crate::editor::layout::{FlowLayout, Layout, MeasuredLayout};
use crate::editor::node_data::NodeData;
use crate::editor::bridge::Status;
use crate::input::events::EventRegistry;
use crate::models::{Point, Rect, Token, TokenId, Tree};
use crate::options::{EditorHooks, EditorOptions};
use crate::parse::grammar::{ArithmeticGrammar, Grammar};

/// Contiguous selected run of tokens
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct DragGroup {
    pub start: usize,
    pub end: usize,
}

impl DragGroup {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    pub fn contains(&self, index: usize) -> bool {
        index >= self.start && index < self.end
    }
}

/// Pointer drag bookkeeping between mouse-down and mouse-up
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerState {
    /// Mouse button is down
    pub dragging: bool,
    /// Pointer travelled past the threshold since mouse-down
    pub moved: bool,
    /// Where mouse-down happened
    pub origin: Point,
    /// Cursor gap picked at mouse-down
    pub anchor: usize,
}

/// Expression editing engine for one widget instance
pub struct Editor {
    pub(crate) options: EditorOptions,
    pub(crate) hooks: EditorHooks,
    pub(crate) grammar: Box<dyn Grammar>,
    pub(crate) layout: Box<dyn Layout>,
    pub(crate) tokens: Vec<Token>,
    pub(crate) cursor: Option<usize>,
    pub(crate) drag: Option<DragGroup>,
    pub(crate) pointer: PointerState,
    pub(crate) node_data: NodeData,
    pub(crate) events: EventRegistry,
    pub(crate) status: Option<Status>,
    pub(crate) value: Option<Tree>,
    next_id: u64,
}

impl Editor {
    pub fn new(options: EditorOptions) -> Self {
        Self::with_hooks(options, EditorHooks::default())
    }

    pub fn with_hooks(options: EditorOptions, hooks: EditorHooks) -> Self {
        let layout = FlowLayout::new(options.layout);
        let node_data = NodeData::new(options.merge_strategy);
        let status = options.status.then(|| Status::initial(&options.text));

        let mut editor = Self {
            options,
            hooks,
            grammar: Box::new(ArithmeticGrammar::new()),
            layout: Box::new(layout),
            tokens: Vec::new(),
            cursor: None,
            drag: None,
            pointer: PointerState::default(),
            node_data,
            events: EventRegistry::new(),
            status,
            value: None,
            next_id: 0,
        };

        let text_box = editor.options.class_name("text");
        crate::input::dispatch::EditorBehavior::attach_events(&mut editor, &text_box);
        log::debug!("editor `{}` initialized", editor.options.id);
        editor
    }

    /// Replace the grammar engine
    pub fn with_grammar(mut self, grammar: impl Grammar + 'static) -> Self {
        self.grammar = Box::new(grammar);
        self
    }

    /// Replace the layout used for pointer picking and vertical movement
    pub fn set_layout(&mut self, layout: impl Layout + 'static) {
        self.layout = Box::new(layout);
    }

    /// Use host-measured token boxes (in sequence order) for picking
    pub fn set_token_rects(&mut self, rects: Vec<Rect>) {
        let fallback = FlowLayout::new(self.options.layout);
        self.layout = Box::new(MeasuredLayout::new(rects, fallback));
    }

    pub fn options(&self) -> &EditorOptions {
        &self.options
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Cursor gap, None while blurred
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn drag(&self) -> Option<DragGroup> {
        self.drag
    }

    /// Tokens inside the drag group
    pub fn dragged_tokens(&self) -> &[Token] {
        match self.drag {
            Some(group) => &self.tokens[group.start..group.end],
            None => &[],
        }
    }

    /// Stored value of every token (canonical for Units), in order
    pub fn values(&self) -> Vec<&str> {
        self.tokens.iter().map(|token| token.value.as_str()).collect()
    }

    /// Display text of every token, in order
    pub fn display_values(&self) -> Vec<String> {
        self.tokens.iter().map(Token::display).collect()
    }

    pub fn status(&self) -> Option<&Status> {
        self.status.as_ref()
    }

    /// Tree emitted by the most recent update
    pub fn value(&self) -> Option<&Tree> {
        self.value.as_ref()
    }

    pub fn node_data(&self, id: TokenId) -> Option<&serde_json::Value> {
        self.node_data.get(id)
    }

    /// Attach host data to a token; it takes precedence over the token text on extraction.
    pub fn set_node_data(&mut self, id: TokenId, data: serde_json::Value) {
        if self.tokens.iter().any(|token| token.id == id) {
            self.node_data.set(id, data);
        }
    }

    pub(crate) fn alloc_id(&mut self) -> TokenId {
        self.next_id += 1;
        TokenId(self.next_id)
    }

    /// Gap where the next insertion lands
    pub(crate) fn insertion_gap(&self) -> usize {
        self.cursor.unwrap_or(self.tokens.len())
    }

    /// Insert at `index`, keeping the cursor and drag group on the same tokens.
    /// Inserting at the cursor gap places the token before the cursor.
    pub(crate) fn insert_token_at(&mut self, index: usize, token: Token) {
        let index = index.min(self.tokens.len());
        self.tokens.insert(index, token);

        if let Some(cursor) = self.cursor.as_mut() {
            if *cursor >= index {
                *cursor += 1;
            }
        }
        if let Some(group) = self.drag.as_mut() {
            if index <= group.start {
                group.start += 1;
                group.end += 1;
            } else if index < group.end {
                group.end += 1;
            }
        }
    }

    /// Remove `start..end`, collapsing the cursor onto `start` if it was inside.
    pub(crate) fn remove_tokens(&mut self, start: usize, end: usize) -> Vec<Token> {
        let end = end.min(self.tokens.len());
        if start >= end {
            return Vec::new();
        }

        let removed: Vec<Token> = self.tokens.drain(start..end).collect();
        for token in &removed {
            self.node_data.remove(token.id);
        }

        let count = end - start;
        if let Some(cursor) = self.cursor.as_mut() {
            if *cursor >= end {
                *cursor -= count;
            } else if *cursor > start {
                *cursor = start;
            }
        }
        removed
    }
}

impl std::fmt::Debug for Editor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Editor")
            .field("id", &self.options.id)
            .field("tokens", &self.display_values())
            .field("cursor", &self.cursor)
            .field("drag", &self.drag)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editor_with(values: &[&str]) -> Editor {
        let mut editor = Editor::new(EditorOptions::default());
        for value in values {
            let id = editor.alloc_id();
            let at = editor.tokens.len();
            editor.insert_token_at(at, Token::operator(id, value));
        }
        editor
    }

    #[test]
    fn test_insert_before_cursor_moves_cursor() {
        let mut editor = editor_with(&["+", "-"]);
        editor.cursor = Some(1);
        let id = editor.alloc_id();
        editor.insert_token_at(1, Token::operator(id, "x"));
        assert_eq!(editor.display_values(), vec!["+", "x", "-"]);
        assert_eq!(editor.cursor, Some(2));
    }

    #[test]
    fn test_insert_shifts_group_after_gap() {
        let mut editor = editor_with(&["+", "-", "/"]);
        editor.drag = Some(DragGroup::new(1, 3));
        let id = editor.alloc_id();
        editor.insert_token_at(1, Token::operator(id, "x"));
        assert_eq!(editor.drag, Some(DragGroup::new(2, 4)));

        let id = editor.alloc_id();
        editor.insert_token_at(4, Token::operator(id, "%"));
        assert_eq!(editor.drag, Some(DragGroup::new(2, 4)));
    }

    #[test]
    fn test_remove_collapses_cursor() {
        let mut editor = editor_with(&["+", "-", "/", "x"]);
        editor.cursor = Some(2);
        editor.remove_tokens(1, 3);
        assert_eq!(editor.display_values(), vec!["+", "x"]);
        assert_eq!(editor.cursor, Some(1));

        editor.cursor = Some(2);
        editor.remove_tokens(0, 1);
        assert_eq!(editor.cursor, Some(1));
    }

    #[test]
    fn test_token_ids_are_unique() {
        let editor = editor_with(&["+", "+", "+"]);
        let mut ids: Vec<_> = editor.tokens.iter().map(|t| t.id).collect();
        ids.dedup();
        assert_eq!(ids.len(), 3);
    }
}
