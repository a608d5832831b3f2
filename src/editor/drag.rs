//! Drag group management
//!
//! Pointer dragging selects the range between the mouse-down gap and the
//! gap under the pointer. Keyboard extension keeps the cursor fixed and
//! moves the group's far boundary.

use crate::editor::state::{DragGroup, Editor};
use crate::models::Point;

impl Editor {
    /// Mouse-down: place the cursor and remember where the drag started.
    pub fn start_drag(&mut self, point: Point) {
        self.pointer.dragging = true;
        self.pointer.moved = false;
        self.pointer.origin = point;
        self.pick(point);
        self.pointer.anchor = self.cursor.unwrap_or(0);
    }

    /// Mouse-move: once past the threshold, select from the anchor to the pointer.
    pub fn move_drag(&mut self, point: Point) {
        if !self.pointer.dragging {
            return;
        }

        if !self.pointer.moved {
            self.pointer.moved = self
                .pointer
                .origin
                .is_over_distance(&point, self.options.drag_threshold);
            return;
        }

        self.pick(point);
        let Some(current) = self.cursor else {
            return;
        };
        if current == self.pointer.anchor {
            return;
        }

        self.select_range(self.pointer.anchor, current);
    }

    /// Mouse-up: a press that never moved is a plain click.
    pub fn end_drag(&mut self, point: Point) {
        self.pointer.dragging = false;
        if self.pointer.moved {
            return;
        }
        self.pick(point);
    }

    /// Select the tokens between two gaps; the cursor ends at `head`.
    pub fn select_range(&mut self, anchor: usize, head: usize) {
        let len = self.tokens.len();
        let (anchor, head) = (anchor.min(len), head.min(len));

        self.remove_drag();
        if anchor == head {
            return;
        }

        self.drag = Some(DragGroup::new(anchor.min(head), anchor.max(head)));
        log::debug!("select {}..{}", anchor.min(head), anchor.max(head));
        if self.cursor.is_some() {
            self.cursor = Some(head);
        }
    }

    /// Select every token; the cursor, if any, moves to the end.
    pub fn select_all(&mut self) {
        self.remove_drag();
        if self.tokens.is_empty() {
            return;
        }

        self.drag = Some(DragGroup::new(0, self.tokens.len()));
        if self.cursor.is_some() {
            self.cursor = Some(self.tokens.len());
        }
    }

    /// Dissolve the drag group, leaving its tokens in place.
    pub fn remove_drag(&mut self) {
        if self.drag.take().is_some() {
            self.trigger_update();
        }
    }

    pub fn remove_selection(&mut self) {
        self.remove_drag();
    }

    /// Shift+Left with a group present
    pub(crate) fn drag_left(&mut self) {
        let (Some(cursor), Some(group)) = (self.cursor, self.drag) else {
            return;
        };

        if cursor == group.end {
            if group.start > 0 {
                self.drag = Some(DragGroup::new(group.start - 1, group.end));
            }
        } else if cursor == group.start {
            self.shrink_to(DragGroup::new(group.start, group.end - 1));
        }
    }

    /// Shift+Right with a group present
    pub(crate) fn drag_right(&mut self) {
        let (Some(cursor), Some(group)) = (self.cursor, self.drag) else {
            return;
        };

        if cursor == group.start {
            if group.end < self.tokens.len() {
                self.drag = Some(DragGroup::new(group.start, group.end + 1));
            }
        } else if cursor == group.end {
            self.shrink_to(DragGroup::new(group.start + 1, group.end));
        }
    }

    /// Shift+Home: extend the group to the first token.
    pub(crate) fn drag_first(&mut self) {
        let Some(cursor) = self.cursor else {
            return;
        };

        let end = self.drag.map_or(cursor, |group| group.end.max(cursor));
        self.cursor = Some(0);
        self.shrink_to(DragGroup::new(0, end));
    }

    /// Shift+End: extend the group to the last token.
    pub(crate) fn drag_last(&mut self) {
        let Some(cursor) = self.cursor else {
            return;
        };

        let start = self.drag.map_or(cursor, |group| group.start.min(cursor));
        self.cursor = Some(start);
        self.shrink_to(DragGroup::new(start, self.tokens.len()));
    }

    fn shrink_to(&mut self, group: DragGroup) {
        if group.is_empty() {
            self.remove_drag();
        } else {
            self.drag = Some(group);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::EditorOptions;

    fn filled(text: &str) -> Editor {
        let mut editor = Editor::new(EditorOptions::default());
        editor.pick(Point::origin());
        editor.insert_text(text);
        editor
    }

    #[test]
    fn test_select_all() {
        let mut editor = filled("1+2+3");
        editor.select_all();
        assert_eq!(editor.dragged_tokens().len(), 5);
        assert_eq!(editor.cursor(), Some(5));
    }

    #[test]
    fn test_select_all_on_empty_makes_no_group() {
        let mut editor = Editor::new(EditorOptions::default());
        editor.select_all();
        assert_eq!(editor.drag(), None);
    }

    #[test]
    fn test_remove_drag_is_idempotent() {
        let mut editor = filled("1+2");
        editor.select_all();
        editor.remove_drag();
        editor.remove_drag();
        assert_eq!(editor.drag(), None);
        assert_eq!(editor.display_values(), vec!["1", "+", "2"]);
    }

    #[test]
    fn test_select_range_normalizes() {
        let mut editor = filled("1+2");
        editor.select_range(3, 1);
        assert_eq!(editor.drag(), Some(DragGroup::new(1, 3)));
        assert_eq!(editor.cursor(), Some(1));

        editor.select_range(2, 2);
        assert_eq!(editor.drag(), None);
    }

    #[test]
    fn test_pointer_drag_respects_threshold() {
        // "1", "+", "2" at x = 0, 14, 28 with width 10
        let mut editor = filled("1+2");
        editor.start_drag(Point::new(1.0, 5.0));
        assert_eq!(editor.cursor(), Some(0));

        editor.move_drag(Point::new(40.0, 5.0));
        assert_eq!(editor.drag(), None);

        editor.move_drag(Point::new(40.0, 5.0));
        assert_eq!(editor.drag(), Some(DragGroup::new(0, 3)));
        assert_eq!(editor.cursor(), Some(3));

        editor.end_drag(Point::new(40.0, 5.0));
        assert_eq!(editor.drag(), Some(DragGroup::new(0, 3)));
    }

    #[test]
    fn test_small_movement_is_a_click() {
        let mut editor = filled("1+2");
        editor.start_drag(Point::new(1.0, 5.0));
        editor.move_drag(Point::new(5.0, 5.0));
        assert_eq!(editor.drag(), None);

        editor.end_drag(Point::new(25.0, 5.0));
        assert_eq!(editor.cursor(), Some(2));
    }

    #[test]
    fn test_move_without_press_is_ignored() {
        let mut editor = filled("1+2");
        editor.move_drag(Point::new(40.0, 5.0));
        editor.move_drag(Point::new(1.0, 5.0));
        assert_eq!(editor.drag(), None);
        assert_eq!(editor.cursor(), Some(3));
    }

    #[test]
    fn test_keyboard_extension_moves_far_edge() {
        let mut editor = filled("1+2");
        editor.drag = Some(DragGroup::new(2, 3));

        editor.drag_left();
        assert_eq!(editor.drag(), Some(DragGroup::new(1, 3)));
        editor.drag_right();
        assert_eq!(editor.drag(), Some(DragGroup::new(2, 3)));
        editor.drag_right();
        assert_eq!(editor.drag(), None);
        assert_eq!(editor.cursor(), Some(3));
    }

    #[test]
    fn test_drag_first_and_last() {
        let mut editor = filled("1+2");
        editor.cursor = Some(2);
        editor.drag_first();
        assert_eq!(editor.drag(), Some(DragGroup::new(0, 2)));
        assert_eq!(editor.cursor(), Some(0));

        editor.drag_last();
        assert_eq!(editor.drag(), Some(DragGroup::new(0, 3)));
        assert_eq!(editor.cursor(), Some(0));
    }
}
