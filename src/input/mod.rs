//! Input handling: key decoding, the event registry and dispatch into the editor.

pub mod dispatch;
pub mod events;
pub mod keys;

pub use dispatch::{EditorBehavior, KeyOutcome};
pub use events::{Action, EventRegistry, EventType, HandlerId, InputEvent, ListenerOptions};
pub use keys::{KeyInput, KeyIntent, Platform};
