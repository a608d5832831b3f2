//! `FormulaEditor`: the JavaScript-facing editor handle
//!
//! Wraps one [`Editor`] per widget. Payloads cross the boundary through
//! serde-wasm-bindgen; the input observer is a plain JS function.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;

use crate::api::helpers::{
    deserialize, detect_platform, js_error, log_warn, serialize, validate_gap, write_status,
};
use crate::editor::Editor;
use crate::error::EditorError;
use crate::input::{EventType, InputEvent, KeyInput};
use crate::models::{Point, Rect, Tree};
use crate::options::{EditorHooks, EditorOptions, InsertData};
use crate::{wasm_log, wasm_warn};

type Observer = Rc<RefCell<Option<js_sys::Function>>>;

#[wasm_bindgen]
pub struct FormulaEditor {
    editor: Editor,
    observer: Observer,
}

#[wasm_bindgen]
impl FormulaEditor {
    /// Create an editor; `options` may be undefined for defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(options: JsValue) -> Result<FormulaEditor, JsValue> {
        let mut options: EditorOptions = if options.is_undefined() || options.is_null() {
            EditorOptions::default()
        } else {
            deserialize(options, "Invalid editor options")?
        };
        if options.platform.is_none() {
            options.platform = detect_platform();
        }

        let observer: Observer = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&observer);
        let hooks = EditorHooks::default().on_input(move |tree| notify(&sink, tree));

        wasm_log!("FormulaEditor created: id={} platform={:?}", options.id, options.platform());
        Ok(FormulaEditor {
            editor: Editor::with_hooks(options, hooks),
            observer,
        })
    }

    /// Replace the content with an expression tree.
    #[wasm_bindgen(js_name = setData)]
    pub fn set_data(&mut self, tree: JsValue) -> Result<(), JsValue> {
        let tree: Tree = deserialize(tree, "Invalid expression tree")?;
        let result = self.editor.load(&tree);
        self.sync_status();
        result.map_err(EditorError::from).map_err(js_error)
    }

    /// Current tree, or null when the expression is empty or not well-formed.
    #[wasm_bindgen(js_name = getData)]
    pub fn get_data(&self) -> Result<JsValue, JsValue> {
        serialize(&self.editor.extract(), "Failed to serialize tree")
    }

    pub fn pick(&mut self, x: f64, y: f64) {
        self.editor.pick(Point::new(x, y));
        self.sync_status();
    }

    #[wasm_bindgen(js_name = selectAll)]
    pub fn select_all(&mut self) {
        self.editor.select_all();
        self.sync_status();
    }

    #[wasm_bindgen(js_name = selectRange)]
    pub fn select_range(&mut self, anchor: usize, head: usize) -> Result<(), JsValue> {
        let len = self.editor.len();
        validate_gap(anchor, len, "anchor").map_err(js_error)?;
        validate_gap(head, len, "head").map_err(js_error)?;
        self.editor.select_range(anchor, head);
        self.sync_status();
        Ok(())
    }

    #[wasm_bindgen(js_name = removeDrag)]
    pub fn remove_drag(&mut self) {
        self.editor.remove_drag();
        self.sync_status();
    }

    #[wasm_bindgen(js_name = removeSelection)]
    pub fn remove_selection(&mut self) {
        self.remove_drag();
    }

    pub fn clear(&mut self) {
        self.editor.clear();
        self.sync_status();
    }

    pub fn blur(&mut self) {
        self.editor.blur();
        self.sync_status();
    }

    /// Insert a number, a string or `{ label, data }` at the cursor, or at `(x, y)` when given.
    pub fn insert(&mut self, data: JsValue, x: Option<f64>, y: Option<f64>) -> Result<(), JsValue> {
        let data: InsertData = deserialize(data, "Invalid insert payload")?;
        let position = match (x, y) {
            (Some(x), Some(y)) => Some(Point::new(x, y)),
            _ => None,
        };
        self.editor.insert(data, position);
        self.sync_status();
        Ok(())
    }

    #[wasm_bindgen(js_name = insertValue)]
    pub fn insert_value(&mut self, value: &str) {
        self.editor.insert_value(value);
        self.sync_status();
    }

    /// Insert a string character by character, or a list item by item.
    #[wasm_bindgen(js_name = insertData)]
    pub fn insert_data(&mut self, data: JsValue) -> Result<(), JsValue> {
        if let Some(text) = data.as_string() {
            self.editor.insert_text(&text);
        } else {
            let items: Vec<InsertData> = deserialize(data, "Invalid insert list")?;
            self.editor.insert_sequence(items);
        }
        self.sync_status();
        Ok(())
    }

    pub fn validate(&mut self) -> bool {
        let valid = self.editor.validate();
        self.sync_status();
        valid
    }

    /// Feed a `{ key, ctrl, shift, meta }` key press; returns the outcome name.
    #[wasm_bindgen(js_name = keyDown)]
    pub fn key_down(&mut self, input: JsValue) -> Result<JsValue, JsValue> {
        let input: KeyInput = deserialize(input, "Invalid key event")?;
        let outcome = self.dispatch(EventType::KeyDown, InputEvent::Key(input));
        serialize(&outcome, "Failed to serialize key outcome")
    }

    #[wasm_bindgen(js_name = mouseDown)]
    pub fn mouse_down(&mut self, x: f64, y: f64) {
        self.dispatch(EventType::MouseDown, InputEvent::Pointer(Point::new(x, y)));
    }

    #[wasm_bindgen(js_name = mouseMove)]
    pub fn mouse_move(&mut self, x: f64, y: f64) {
        self.dispatch(EventType::MouseMove, InputEvent::Pointer(Point::new(x, y)));
    }

    #[wasm_bindgen(js_name = mouseUp)]
    pub fn mouse_up(&mut self, x: f64, y: f64) {
        self.dispatch(EventType::MouseUp, InputEvent::Pointer(Point::new(x, y)));
    }

    #[wasm_bindgen(js_name = doubleClick)]
    pub fn double_click(&mut self) {
        self.dispatch(EventType::DoubleClick, InputEvent::DoubleClick);
    }

    /// Report rendered token boxes (`[{ left, top, width, height }]`, sequence order).
    #[wasm_bindgen(js_name = setTokenRects)]
    pub fn set_token_rects(&mut self, rects: JsValue) -> Result<(), JsValue> {
        let rects: Vec<Rect> = deserialize(rects, "Invalid token rects")?;
        self.editor.set_token_rects(rects);
        Ok(())
    }

    /// Register the observer called with the tree (or null) after every change.
    #[wasm_bindgen(js_name = onInput)]
    pub fn on_input(&mut self, callback: js_sys::Function) {
        *self.observer.borrow_mut() = Some(callback);
    }

    pub fn status(&self) -> Result<JsValue, JsValue> {
        serialize(&self.editor.status(), "Failed to serialize status")
    }

    /// Tokens with their kinds, for rendering
    pub fn tokens(&self) -> Result<JsValue, JsValue> {
        serialize(&self.editor.tokens(), "Failed to serialize tokens")
    }

    /// Display text of each token
    #[wasm_bindgen(js_name = displayValues)]
    pub fn display_values(&self) -> Result<JsValue, JsValue> {
        serialize(&self.editor.display_values(), "Failed to serialize display values")
    }

    pub fn cursor(&self) -> Option<usize> {
        self.editor.cursor()
    }

    /// Drag group as `{ start, end }`, or null
    pub fn drag(&self) -> Result<JsValue, JsValue> {
        serialize(&self.editor.drag(), "Failed to serialize drag group")
    }
}

impl FormulaEditor {
    fn dispatch(&mut self, event_type: EventType, event: InputEvent) -> crate::input::KeyOutcome {
        let target = self.editor.options().class_name("text");
        let outcome = self.editor.handle_event(&target, event_type, &event);
        self.sync_status();
        outcome
    }

    fn sync_status(&self) {
        if let Some(status) = self.editor.status() {
            write_status(status, self.editor.options());
        }
    }
}

fn notify(observer: &Observer, tree: Option<&Tree>) {
    let observer = observer.borrow();
    let Some(callback) = observer.as_ref() else {
        return;
    };

    let value = serialize(&tree, "Failed to serialize tree").unwrap_or_else(|_| {
        wasm_warn!("input observer notified without a tree");
        JsValue::NULL
    });

    if let Err(e) = callback.call1(&JsValue::NULL, &value) {
        log_warn(&format!("input observer threw: {:?}", e));
    }
}
