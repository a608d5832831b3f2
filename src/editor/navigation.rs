//! Cursor movement
//!
//! With `drag_mode` set (Shift held) horizontal and Home/End movement extend
//! the drag group instead of moving the cursor.

use crate::editor::state::{DragGroup, Editor};
use crate::models::Point;

impl Editor {
    pub fn move_left_cursor(&mut self, drag_mode: bool) {
        let Some(cursor) = self.cursor else {
            return;
        };

        if !drag_mode {
            let target = match self.drag {
                Some(group) if group.end == cursor => group.start,
                _ => cursor.saturating_sub(1),
            };
            self.cursor = Some(target);
            self.remove_drag();
            return;
        }

        match self.drag {
            Some(_) => self.drag_left(),
            None if cursor > 0 => self.drag = Some(DragGroup::new(cursor - 1, cursor)),
            None => {}
        }
    }

    pub fn move_right_cursor(&mut self, drag_mode: bool) {
        let Some(cursor) = self.cursor else {
            return;
        };
        let len = self.tokens.len();

        if !drag_mode {
            let target = match self.drag {
                Some(group) if group.start == cursor => group.end,
                _ => (cursor + 1).min(len),
            };
            self.cursor = Some(target);
            self.remove_drag();
            return;
        }

        match self.drag {
            Some(_) => self.drag_right(),
            None if cursor < len => self.drag = Some(DragGroup::new(cursor, cursor + 1)),
            None => {}
        }
    }

    pub fn move_first_cursor(&mut self, drag_mode: bool) {
        if self.cursor.is_none() {
            return;
        }
        if drag_mode && !self.tokens.is_empty() {
            self.drag_first();
            return;
        }
        self.remove_drag();
        self.cursor = Some(0);
    }

    pub fn move_last_cursor(&mut self, drag_mode: bool) {
        if self.cursor.is_none() {
            return;
        }
        if drag_mode && !self.tokens.is_empty() {
            self.drag_last();
            return;
        }
        self.remove_drag();
        self.cursor = Some(self.tokens.len());
    }

    /// Re-pick half a row above the cursor.
    pub fn move_up_cursor(&mut self) {
        let Some(cursor) = self.cursor else {
            return;
        };
        let rect = self.layout.cursor_rect(&self.tokens, cursor);
        self.pick(Point::new(rect.right(), rect.top - rect.height / 2.0));
    }

    /// Re-pick half a row below the cursor's row.
    pub fn move_down_cursor(&mut self) {
        let Some(cursor) = self.cursor else {
            return;
        };
        let rect = self.layout.cursor_rect(&self.tokens, cursor);
        self.pick(Point::new(rect.right(), rect.top + rect.height * 1.5));
    }
}
