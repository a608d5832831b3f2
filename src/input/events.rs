//! Event registry
//!
//! Listeners are scoped to one editor instance and keyed by
//! (element, event type, handler, listener options). Registering the same
//! key twice is a no-op. Handlers translate host events into [`Action`]s
//! that the editor then applies; they never touch editor state directly.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::input::keys::KeyInput;
use crate::models::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Blur,
    #[serde(rename = "dblclick")]
    DoubleClick,
    MouseDown,
    MouseUp,
    MouseMove,
    KeyDown,
}

impl EventType {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "blur" => Some(EventType::Blur),
            "dblclick" => Some(EventType::DoubleClick),
            "mousedown" => Some(EventType::MouseDown),
            "mouseup" => Some(EventType::MouseUp),
            "mousemove" => Some(EventType::MouseMove),
            "keydown" => Some(EventType::KeyDown),
            _ => None,
        }
    }
}

/// Identity of a handler within one registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HandlerId(pub u64);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListenerOptions {
    pub capture: bool,
    pub once: bool,
    pub passive: bool,
}

/// Host event payload
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Blur,
    DoubleClick,
    Pointer(Point),
    Key(KeyInput),
}

/// What the editor should do in response to an event
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Blur,
    SelectAll,
    StartDrag(Point),
    MoveDrag(Point),
    EndDrag(Point),
    KeyDown(KeyInput),
}

pub type Handler = Rc<dyn Fn(&InputEvent) -> Option<Action>>;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct Target {
    element: String,
    event_type: EventType,
}

#[derive(Clone)]
struct Listener {
    handler_id: HandlerId,
    options: ListenerOptions,
    handler: Handler,
}

#[derive(Default, Clone)]
pub struct EventRegistry {
    listeners: HashMap<Target, Vec<Listener>>,
    next_id: u64,
}

impl EventRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh handler id, unique within this registry
    pub fn handler_id(&mut self) -> HandlerId {
        self.next_id += 1;
        HandlerId(self.next_id)
    }

    /// Register a handler; returns false if the same key is already registered.
    pub fn on(
        &mut self,
        element: &str,
        event_type: EventType,
        handler_id: HandlerId,
        handler: Handler,
        options: ListenerOptions,
    ) -> bool {
        let target = Target {
            element: element.to_string(),
            event_type,
        };
        let listeners = self.listeners.entry(target).or_default();
        if listeners
            .iter()
            .any(|l| l.handler_id == handler_id && l.options == options)
        {
            return false;
        }

        listeners.push(Listener {
            handler_id,
            options,
            handler,
        });
        true
    }

    /// Register a handler that is removed after its first dispatch.
    pub fn once(
        &mut self,
        element: &str,
        event_type: EventType,
        handler_id: HandlerId,
        handler: Handler,
    ) -> bool {
        let options = ListenerOptions {
            once: true,
            ..ListenerOptions::default()
        };
        self.on(element, event_type, handler_id, handler, options)
    }

    /// Remove one handler, or every handler for the event type when `handler_id` is None.
    ///
    /// Returns how many listeners were removed.
    pub fn off(
        &mut self,
        element: &str,
        event_type: EventType,
        handler_id: Option<HandlerId>,
    ) -> usize {
        let target = Target {
            element: element.to_string(),
            event_type,
        };
        let Some(listeners) = self.listeners.get_mut(&target) else {
            return 0;
        };

        let before = listeners.len();
        match handler_id {
            Some(id) => listeners.retain(|l| l.handler_id != id),
            None => listeners.clear(),
        }
        let removed = before - listeners.len();

        if listeners.is_empty() {
            self.listeners.remove(&target);
        }
        removed
    }

    /// Run every handler for the target in registration order.
    pub fn dispatch(
        &mut self,
        element: &str,
        event_type: EventType,
        event: &InputEvent,
    ) -> Vec<Action> {
        let target = Target {
            element: element.to_string(),
            event_type,
        };
        let Some(listeners) = self.listeners.get(&target) else {
            return Vec::new();
        };

        let actions: Vec<Action> = listeners.iter().filter_map(|l| (l.handler)(event)).collect();

        if listeners.iter().any(|l| l.options.once) {
            if let Some(listeners) = self.listeners.get_mut(&target) {
                listeners.retain(|l| !l.options.once);
                if listeners.is_empty() {
                    self.listeners.remove(&target);
                }
            }
        }
        actions
    }

    pub fn count(&self, element: &str, event_type: EventType) -> usize {
        let target = Target {
            element: element.to_string(),
            event_type,
        };
        self.listeners.get(&target).map_or(0, Vec::len)
    }

    /// Total number of registered listeners
    pub fn len(&self) -> usize {
        self.listeners.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl fmt::Debug for EventRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventRegistry").field("listeners", &self.len()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn select_all() -> Handler {
        Rc::new(|_: &InputEvent| Some(Action::SelectAll))
    }

    #[test]
    fn test_on_is_idempotent() {
        let mut registry = EventRegistry::new();
        let id = registry.handler_id();
        let options = ListenerOptions::default();
        assert!(registry.on("box", EventType::DoubleClick, id, select_all(), options));
        assert!(!registry.on("box", EventType::DoubleClick, id, select_all(), options));
        assert_eq!(registry.count("box", EventType::DoubleClick), 1);

        let capture = ListenerOptions {
            capture: true,
            ..ListenerOptions::default()
        };
        assert!(registry.on("box", EventType::DoubleClick, id, select_all(), capture));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_off_single_and_all() {
        let mut registry = EventRegistry::new();
        let first = registry.handler_id();
        let second = registry.handler_id();
        registry.on("box", EventType::Blur, first, select_all(), ListenerOptions::default());
        registry.on("box", EventType::Blur, second, select_all(), ListenerOptions::default());
        registry.on("other", EventType::Blur, first, select_all(), ListenerOptions::default());

        assert_eq!(registry.off("box", EventType::Blur, Some(first)), 1);
        assert_eq!(registry.count("box", EventType::Blur), 1);
        assert_eq!(registry.count("other", EventType::Blur), 1);

        assert_eq!(registry.off("box", EventType::Blur, None), 1);
        assert_eq!(registry.off("box", EventType::Blur, None), 0);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_once_runs_a_single_time() {
        let mut registry = EventRegistry::new();
        let id = registry.handler_id();
        registry.once("box", EventType::DoubleClick, id, select_all());

        assert_eq!(
            registry.dispatch("box", EventType::DoubleClick, &InputEvent::DoubleClick),
            vec![Action::SelectAll]
        );
        assert!(registry
            .dispatch("box", EventType::DoubleClick, &InputEvent::DoubleClick)
            .is_empty());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_event_names() {
        assert_eq!(EventType::from_name("dblclick"), Some(EventType::DoubleClick));
        assert_eq!(EventType::from_name("scroll"), None);
    }
}
