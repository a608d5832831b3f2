//! Expression editing engine
//!
//! [`Editor`] owns the token sequence, the cursor and the drag group. The
//! operations are split by concern:
//!
//! - `mutation`: insertion, unit merging, deletion, clear and blur
//! - `navigation`: arrow/Home/End/vertical cursor movement
//! - `drag`: pointer and keyboard drag groups
//! - `pick`: pointer hit-testing against a [`Layout`]
//! - `bridge`: tree load/extract, validation and the update pipeline

pub mod bridge;
pub mod drag;
pub mod layout;
pub mod mutation;
pub mod navigation;
pub mod node_data;
pub mod pick;
pub mod state;

pub use bridge::Status;
pub use layout::{FlowLayout, Layout, MeasuredLayout};
pub use node_data::NodeData;
pub use state::{DragGroup, Editor, PointerState};
