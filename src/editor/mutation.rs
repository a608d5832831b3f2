//! Content mutation: insertion, unit merging, deletion
//!
//! Every public operation leaves the sequence without two adjacent Units:
//! numeric input is merged into its neighbours, and a deletion that would
//! bring two Units together joins them. Inputs that would break a Unit's
//! numeric shape are refused as a whole.

use serde_json::Value;

use crate::editor::state::{DragGroup, Editor};
use crate::models::{Point, Token};
use crate::options::InsertData;
use crate::parse::number::{format_number, is_partial_number, to_canonical};
use crate::parse::tokens::{classify, TokenClass};

/// Which side of the cursor a deletion works on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Before,
    After,
}

impl Editor {
    /// Insert host data, routing through the insert hook.
    ///
    /// Without a cursor, or when `position` is given, the cursor is first
    /// placed by picking at `position` (the origin if none).
    pub fn insert(&mut self, data: impl Into<InsertData>, position: Option<Point>) {
        let data = data.into();
        if data.is_empty() {
            return;
        }

        let data = match &self.hooks.insert {
            Some(hook) => hook(data),
            None => data,
        };

        if self.cursor.is_none() || position.is_some() {
            self.pick(position.unwrap_or_default());
        }

        match data {
            InsertData::Text(text) => self.insert_value(&text),
            InsertData::Number(number) => self.insert_value(&number.to_string()),
            InsertData::Node { label, data } => self.insert_node(&label, data),
        }
    }

    /// Insert every item in order, then emit one more update.
    ///
    /// Each item already triggers its own update, so the observer also sees
    /// the intermediate values.
    pub fn insert_sequence<I, D>(&mut self, items: I)
    where
        I: IntoIterator<Item = D>,
        D: Into<InsertData>,
    {
        for item in items {
            self.insert(item, None);
        }
        self.trigger_update();
    }

    /// Insert a string one character at a time.
    pub fn insert_text(&mut self, text: &str) {
        self.insert_sequence(text.chars().map(String::from));
    }

    /// Insert a single raw value at the cursor.
    ///
    /// Both go before the cursor. Numeric input first removes the drag group
    /// and merges with neighbouring Units; operators leave the group alone.
    /// Anything that is not a recognized token is ignored.
    pub fn insert_value(&mut self, value: &str) {
        let Some(class) = classify(value) else {
            log::debug!("ignoring invalid input `{}`", value);
            return;
        };

        match class {
            TokenClass::Numeric => self.insert_numeric(&to_canonical(value)),
            TokenClass::Bracket | TokenClass::Comma | TokenClass::Operator => {
                let id = self.alloc_id();
                let gap = self.insertion_gap();
                self.insert_token_at(gap, Token::operator(id, value));
                self.trigger_update();
            }
        }
    }

    fn insert_numeric(&mut self, canonical: &str) {
        let group = self.drag;
        let gap = match group {
            Some(group) => gap_without(self.insertion_gap(), group),
            None => self.insertion_gap(),
        };

        // Neighbours as they will be once the group is gone
        let remaining = |index: usize| {
            let index = match group {
                Some(group) if index >= group.start => index + group.len(),
                _ => index,
            };
            self.tokens.get(index).filter(|t| t.is_unit())
        };
        let prev = gap.checked_sub(1).and_then(&remaining);
        let next = remaining(gap);
        let merged = format!(
            "{}{}{}",
            prev.map(|t| t.value.as_str()).unwrap_or(""),
            canonical,
            next.map(|t| t.value.as_str()).unwrap_or("")
        );
        if !is_partial_number(&merged) {
            log::debug!("refusing `{}`: would form `{}`", canonical, merged);
            return;
        }

        if let Some(group) = self.drag.take() {
            self.remove_tokens(group.start, group.end);
        }

        let id = self.alloc_id();
        self.insert_token_at(gap, Token::unit(id, canonical));
        self.merge_unit(gap);
        self.trigger_update();
    }

    fn insert_node(&mut self, label: &str, data: Value) {
        let id = self.alloc_id();
        let gap = self.insertion_gap();
        self.insert_token_at(gap, Token::element(id, label));
        self.node_data.set(id, data);
        self.trigger_update();
    }

    /// Fold the Unit at `index` into its Unit neighbours.
    ///
    /// The neighbour keeps its identity. The cursor stays on the side of the
    /// merged token it was inserted from.
    pub(crate) fn merge_unit(&mut self, index: usize) {
        let prev = index.checked_sub(1).filter(|&i| self.tokens[i].is_unit());
        let next = Some(index + 1).filter(|&i| self.tokens.get(i).is_some_and(Token::is_unit));

        match (prev, next) {
            (Some(prev), next) => {
                let mut text = self.tokens[index].value.clone();
                if next.is_some() {
                    text.push_str(&self.tokens[index + 1].value);
                    self.remove_tokens(index + 1, index + 2);
                }
                self.tokens[prev].value.push_str(&text);
                self.remove_tokens(index, index + 1);
            }
            (None, Some(next)) => {
                let text = self.tokens[index].value.clone();
                self.tokens[next].value.insert_str(0, &text);
                self.remove_tokens(index, index + 1);
            }
            (None, None) => {}
        }
    }

    /// Backspace: delete the drag group, or one displayed character before the cursor.
    pub fn remove_before(&mut self) {
        self.remove(Side::Before);
    }

    /// Delete: delete the drag group, or one displayed character after the cursor.
    pub fn remove_after(&mut self) {
        self.remove(Side::After);
    }

    fn remove(&mut self, side: Side) {
        if let Some(group) = self.drag {
            if self.delete_range(group) {
                self.drag = None;
                self.trigger_update();
            }
            return;
        }

        let Some(cursor) = self.cursor else {
            return;
        };
        let index = match side {
            Side::Before => match cursor.checked_sub(1) {
                Some(index) => index,
                None => return,
            },
            Side::After if cursor < self.tokens.len() => cursor,
            Side::After => return,
        };

        if !self.truncate_unit(index, side)
            && !self.delete_range(DragGroup::new(index, index + 1))
        {
            return;
        }
        self.trigger_update();
    }

    /// Drop one displayed character from a multi-character Unit.
    fn truncate_unit(&mut self, index: usize, side: Side) -> bool {
        let token = &self.tokens[index];
        if !token.is_unit() || token.display_len() <= 1 {
            return false;
        }

        let mut display: Vec<char> = token.display().chars().collect();
        match side {
            Side::Before => display.pop(),
            Side::After => Some(display.remove(0)),
        };

        let canonical = to_canonical(&display.into_iter().collect::<String>());
        if canonical.is_empty() {
            return false;
        }

        log::trace!(
            "truncate unit {} -> {}",
            self.tokens[index].value,
            format_number(&canonical).text()
        );
        self.tokens[index].value = canonical;
        true
    }

    /// Remove `range` and join the Units it separated.
    ///
    /// Returns false without touching anything when the join would not be a
    /// number.
    fn delete_range(&mut self, range: DragGroup) -> bool {
        let prev = range
            .start
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .filter(|t| t.is_unit());
        let next = self.tokens.get(range.end).filter(|t| t.is_unit());

        if let (Some(prev), Some(next)) = (prev, next) {
            let joined = format!("{}{}", prev.value, next.value);
            if !is_partial_number(&joined) {
                log::debug!("refusing delete: would join into `{}`", joined);
                return false;
            }
        }

        self.remove_tokens(range.start, range.end);
        self.join_at(range.start);
        true
    }

    /// Join the Units on both sides of `gap`; the cursor lands after the result.
    fn join_at(&mut self, gap: usize) {
        let Some(prev) = gap.checked_sub(1) else {
            return;
        };
        let joinable =
            self.tokens[prev].is_unit() && self.tokens.get(gap).is_some_and(Token::is_unit);
        if !joinable {
            return;
        }

        let text = self.tokens[gap].value.clone();
        self.tokens[prev].value.push_str(&text);
        self.remove_tokens(gap, gap + 1);
        if self.cursor.is_some() {
            self.cursor = Some(gap);
        }
    }

    /// Remove every token and the cursor.
    pub fn clear(&mut self) {
        log::info!("clearing {} tokens", self.tokens.len());
        self.tokens.clear();
        self.node_data.clear();
        self.cursor = None;
        self.drag = None;
        self.trigger_update();
    }

    /// Drop focus: the cursor and any drag group go away, content stays.
    pub fn blur(&mut self) {
        self.pointer.dragging = false;
        self.remove_drag();
        self.cursor = None;
    }
}

/// Where `gap` ends up once `group` is removed
fn gap_without(gap: usize, group: DragGroup) -> usize {
    if gap >= group.end {
        gap - group.len()
    } else {
        gap.min(group.start)
    }
}
