//! Input dispatch
//!
//! Host events reach the editor through the registry wired up by
//! [`EditorBehavior::attach_events`]. Key presses are decoded once: an
//! editing intent is applied first, then any literal character is inserted.

use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::editor::Editor;
use crate::input::events::{Action, EventType, Handler, InputEvent, ListenerOptions};
use crate::input::keys::{self, KeyInput, KeyIntent};

/// Result of feeding a key press to the editor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyOutcome {
    /// Not for the editor (no cursor, or an unknown key)
    Ignored,
    /// The host should reload the page
    Reload,
    /// An editing intent was applied
    Handled,
    /// A literal value was inserted
    Inserted,
}

/// Behaviour an editor widget plugs in: key decoding and event wiring.
pub trait EditorBehavior {
    /// Decode and apply an editing intent; None when the key carries none.
    fn analyze_key(&mut self, input: &KeyInput) -> Option<KeyIntent>;

    /// Register the widget's listeners on `target`.
    fn attach_events(&mut self, target: &str);
}

impl EditorBehavior for Editor {
    fn analyze_key(&mut self, input: &KeyInput) -> Option<KeyIntent> {
        let intent = keys::analyze(input, self.options.platform())?;
        let drag_mode = input.shift;

        match intent {
            KeyIntent::Reload => {}
            KeyIntent::SelectAll => self.select_all(),
            KeyIntent::Backspace => self.remove_before(),
            KeyIntent::Delete => self.remove_after(),
            KeyIntent::Up => self.move_up_cursor(),
            KeyIntent::Down => self.move_down_cursor(),
            KeyIntent::Home => self.move_first_cursor(drag_mode),
            KeyIntent::End => self.move_last_cursor(drag_mode),
            KeyIntent::Left => self.move_left_cursor(drag_mode),
            KeyIntent::Right => self.move_right_cursor(drag_mode),
        }
        Some(intent)
    }

    fn attach_events(&mut self, target: &str) {
        let wiring = [
            (EventType::Blur, handler(|_| Some(Action::Blur))),
            (EventType::DoubleClick, handler(|_| Some(Action::SelectAll))),
            (
                EventType::MouseDown,
                handler(|event| match event {
                    InputEvent::Pointer(point) => Some(Action::StartDrag(*point)),
                    _ => None,
                }),
            ),
            (
                EventType::MouseUp,
                handler(|event| match event {
                    InputEvent::Pointer(point) => Some(Action::EndDrag(*point)),
                    _ => None,
                }),
            ),
            (
                EventType::MouseMove,
                handler(|event| match event {
                    InputEvent::Pointer(point) => Some(Action::MoveDrag(*point)),
                    _ => None,
                }),
            ),
            (
                EventType::KeyDown,
                handler(|event| match event {
                    InputEvent::Key(input) => Some(Action::KeyDown(input.clone())),
                    _ => None,
                }),
            ),
        ];

        for (event_type, handler) in wiring {
            let id = self.events.handler_id();
            self.events.on(target, event_type, id, handler, ListenerOptions::default());
        }
        log::debug!("attached listeners to `{}` ({} total)", target, self.events.len());
    }
}

fn handler(f: impl Fn(&InputEvent) -> Option<Action> + 'static) -> Handler {
    Rc::new(f)
}

impl Editor {
    /// Key-down entry point. Ignored while no cursor is placed.
    pub fn hook_key_down(&mut self, input: &KeyInput) -> KeyOutcome {
        if self.cursor.is_none() {
            return KeyOutcome::Ignored;
        }

        let intent = self.analyze_key(input);
        if intent == Some(KeyIntent::Reload) {
            return KeyOutcome::Reload;
        }

        match keys::key_value(&input.key, input.shift) {
            Some(value) => {
                self.insert_value(&value);
                self.validate();
                KeyOutcome::Inserted
            }
            None if intent.is_some() => KeyOutcome::Handled,
            None => KeyOutcome::Ignored,
        }
    }

    /// Dispatch a host event through the registry and apply the resulting actions.
    pub fn handle_event(
        &mut self,
        element: &str,
        event_type: EventType,
        event: &InputEvent,
    ) -> KeyOutcome {
        let actions = self.events.dispatch(element, event_type, event);
        let mut outcome = KeyOutcome::Ignored;

        for action in actions {
            let result = self.apply(action);
            if outcome != KeyOutcome::Reload && result != KeyOutcome::Ignored {
                outcome = result;
            }
        }
        outcome
    }

    fn apply(&mut self, action: Action) -> KeyOutcome {
        match action {
            Action::Blur => self.blur(),
            Action::SelectAll => self.select_all(),
            Action::StartDrag(point) => self.start_drag(point),
            Action::MoveDrag(point) => self.move_drag(point),
            Action::EndDrag(point) => self.end_drag(point),
            Action::KeyDown(input) => return self.hook_key_down(&input),
        }
        KeyOutcome::Handled
    }

    /// Remove every listener the editor registered on `target`.
    pub fn detach_events(&mut self, target: &str) -> usize {
        [
            EventType::Blur,
            EventType::DoubleClick,
            EventType::MouseDown,
            EventType::MouseUp,
            EventType::MouseMove,
            EventType::KeyDown,
        ]
        .into_iter()
        .map(|event_type| self.events.off(target, event_type, None))
        .sum()
    }
}
