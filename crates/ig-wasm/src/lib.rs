//! WASM bridge for the infographic editor: exposes the Rust editor
//! session to the web canvas.
//!
//! Compiled via `wasm-pack build --target web`. Structured values cross the
//! boundary as JSON strings (`TextStyles`, patches, toolbar actions, view
//! state); scalars cross as numbers and booleans.

mod bridge;
mod listener;

use bridge::Bridge;
use ig_core::{FONT_FAMILIES, KeyInput, ObjectId, Point, Vec2};
use listener::KeyListener;
use std::rc::Rc;
use wasm_bindgen::prelude::*;

/// The JS-facing editor handle.
///
/// Owns the session (through the shared bridge) and, while attached, the
/// window key listener.
#[wasm_bindgen]
pub struct IgEditor {
    bridge: Rc<Bridge>,
    listener: Option<KeyListener>,
}

#[wasm_bindgen]
impl IgEditor {
    /// Create an editor. `config_json` is an optional `EditorConfig`.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<IgEditor, JsValue> {
        console_error_panic_hook_setup();
        let bridge = Bridge::from_json(config_json.as_deref()).map_err(|e| JsValue::from_str(&e))?;
        Ok(Self {
            bridge: Rc::new(bridge),
            listener: None,
        })
    }

    // ─── Keyboard ────────────────────────────────────────────────────────

    /// Start listening for shortcuts on `window`. Idempotent.
    pub fn attach_keyboard(&mut self) -> Result<(), JsValue> {
        if self.listener.is_none() {
            self.listener = Some(KeyListener::attach(Rc::clone(&self.bridge))?);
        }
        Ok(())
    }

    /// Stop listening. Call on unmount.
    pub fn detach_keyboard(&mut self) {
        self.listener = None;
    }

    /// Feed a key press by hand (for hosts that own their own listener).
    ///
    /// Returns JSON:
    /// `{"handled":bool,"preventDefault":bool,"action":string,"changed":bool,"zoom":number,"label":string}`.
    pub fn handle_key(&self, key: &str, ctrl: bool, shift: bool, alt: bool, meta: bool) -> String {
        let input = KeyInput {
            key: key.to_string(),
            ctrl,
            shift,
            alt,
            meta,
        };
        let outcome = self.bridge.handle_key(&input);
        self.bridge.key_reply(&outcome)
    }

    /// Called with no arguments when the user presses ⌘S.
    pub fn set_save_callback(&self, callback: js_sys::Function) {
        self.bridge.set_save_callback(callback);
    }

    /// Called with the view state JSON after every zoom/pan change.
    pub fn set_view_callback(&self, callback: js_sys::Function) {
        self.bridge.set_view_callback(callback);
    }

    // ─── View ────────────────────────────────────────────────────────────

    pub fn zoom(&self) -> f64 {
        self.bridge.session.borrow().view().zoom()
    }

    /// e.g. `"130%"`.
    pub fn zoom_label(&self) -> String {
        self.bridge.session.borrow().zoom().label()
    }

    pub fn zoom_presets(&self) -> Vec<u32> {
        self.bridge.session.borrow().config().zoom_presets.clone()
    }

    /// Enabled state of the `+` button.
    pub fn can_zoom_in(&self) -> bool {
        self.bridge.session.borrow().zoom().can_zoom_in()
    }

    /// Enabled state of the `-` button.
    pub fn can_zoom_out(&self) -> bool {
        self.bridge.session.borrow().zoom().can_zoom_out()
    }

    pub fn zoom_in(&self) -> bool {
        self.bridge.with_session(|s| s.zoom().zoom_in())
    }

    pub fn zoom_out(&self) -> bool {
        self.bridge.with_session(|s| s.zoom().zoom_out())
    }

    pub fn zoom_to(&self, percentage: f64) -> bool {
        self.bridge.with_session(|s| s.zoom().zoom_to(percentage))
    }

    /// Free-text entry from the zoom box. Invalid text is ignored.
    pub fn zoom_to_entry(&self, text: &str) -> bool {
        self.bridge.with_session(|s| s.zoom().zoom_to_entry(text))
    }

    pub fn fit_to_screen(&self) -> bool {
        self.bridge.with_session(|s| s.zoom().fit_to_screen())
    }

    /// Wheel/pinch zoom around the cursor.
    pub fn zoom_about(&self, zoom: f64, x: f64, y: f64) -> bool {
        self.bridge
            .with_session(|s| s.view().zoom_about(zoom, Point::new(x, y)))
    }

    pub fn pan_by(&self, dx: f64, dy: f64) -> bool {
        self.bridge
            .with_session(|s| s.view().pan_by(Vec2::new(dx, dy)))
    }

    /// `{"zoom":number,"pan":{"x":number,"y":number}}`.
    pub fn view_state(&self) -> String {
        self.bridge.view_state_json()
    }

    // ─── Text objects & styles ───────────────────────────────────────────

    /// Add (or replace) a text object. `styles_json` defaults to the stock
    /// text style.
    pub fn add_text(&self, id: &str, content: &str, styles_json: Option<String>) -> Result<(), JsValue> {
        self.bridge
            .add_text(id, content, styles_json.as_deref())
            .map_err(|e| JsValue::from_str(&e))
    }

    /// Add a text object under a generated id (`text_{n}`) and return it.
    pub fn create_text(&self, content: &str, styles_json: Option<String>) -> Result<String, JsValue> {
        self.bridge
            .create_text(content, styles_json.as_deref())
            .map_err(|e| JsValue::from_str(&e))
    }

    /// Remove a text object. Returns `false` if it did not exist.
    pub fn remove_text(&self, id: &str) -> bool {
        self.bridge
            .session
            .borrow_mut()
            .remove_text(ObjectId::intern(id))
            .is_some()
    }

    pub fn select(&self, ids: Vec<String>) {
        let ids: Vec<ObjectId> = ids.iter().map(|id| ObjectId::intern(id)).collect();
        self.bridge.session.borrow_mut().select(&ids);
    }

    /// Shift+click selection.
    pub fn toggle_selected(&self, id: &str) {
        self.bridge
            .session
            .borrow_mut()
            .toggle_selected(ObjectId::intern(id));
    }

    /// Active object's `TextStyles` as JSON, or `undefined` with no selection.
    pub fn text_styles(&self) -> Option<String> {
        self.bridge.text_styles_json()
    }

    /// Merge a partial `TextStyles` JSON into the selection.
    pub fn apply_patch(&self, patch_json: &str) -> Result<bool, JsValue> {
        self.bridge
            .apply_patch(patch_json)
            .map_err(|e| JsValue::from_str(&e))
    }

    /// Apply a toolbar interaction, e.g. `{"control":"toggleList","value":"bullet"}`.
    pub fn toolbar(&self, action_json: &str) -> Result<bool, JsValue> {
        self.bridge
            .toolbar(action_json)
            .map_err(|e| JsValue::from_str(&e))
    }

    /// Whether a toolbar control renders as pressed, given the same JSON
    /// `toolbar` accepts.
    pub fn toolbar_active(&self, action_json: &str) -> Result<bool, JsValue> {
        self.bridge
            .toolbar_active(action_json)
            .map_err(|e| JsValue::from_str(&e))
    }

    /// Group the following style changes into one undo step (color drags).
    pub fn begin_gesture(&self) {
        self.bridge.session.borrow_mut().begin_gesture();
    }

    pub fn end_gesture(&self, description: &str) {
        self.bridge.session.borrow_mut().end_gesture(description);
    }

    pub fn undo(&self) -> Option<String> {
        self.bridge.session.borrow_mut().undo()
    }

    pub fn redo(&self) -> Option<String> {
        self.bridge.session.borrow_mut().redo()
    }

    pub fn can_undo(&self) -> bool {
        self.bridge.session.borrow().can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.bridge.session.borrow().can_redo()
    }

    /// End the editing session: detach the keyboard and discard view state
    /// and history.
    pub fn close(&mut self) {
        self.listener = None;
        self.bridge.close();
    }
}

/// Families listed in the font picker.
#[wasm_bindgen]
pub fn font_families() -> Vec<String> {
    FONT_FAMILIES.iter().map(|f| f.to_string()).collect()
}

fn console_error_panic_hook_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("IG WASM panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
}
