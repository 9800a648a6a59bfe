//! Shared state behind the `IgEditor` handle and the window key listener.
//!
//! JS callbacks are never invoked while the session is borrowed: view
//! changes are parked in `pending_view` by the store subscription and
//! delivered by `flush_view` once the borrow is released, so a callback can
//! safely call back into the editor.

use ig_core::{KeyInput, ObjectId, TextStylePatch, TextStyles, ViewState};
use ig_editor::{
    EditorConfig, EditorSession, KeyOutcome, ShortcutAction, SubscriptionId, TextObject,
    ToolbarAction,
};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::JsValue;

pub(crate) struct Bridge {
    pub(crate) session: RefCell<EditorSession>,
    save_callback: RefCell<Option<js_sys::Function>>,
    view_callback: RefCell<Option<js_sys::Function>>,
    pending_view: Rc<Cell<Option<ViewState>>>,
    /// The store listener feeding `pending_view`; at most one at a time.
    view_subscription: Cell<Option<SubscriptionId>>,
}

impl Bridge {
    pub(crate) fn new(config: EditorConfig) -> Self {
        Self {
            session: RefCell::new(EditorSession::new(config)),
            save_callback: RefCell::new(None),
            view_callback: RefCell::new(None),
            pending_view: Rc::new(Cell::new(None)),
            view_subscription: Cell::new(None),
        }
    }

    pub(crate) fn from_json(config_json: Option<&str>) -> Result<Self, String> {
        let config = match config_json {
            Some(json) => EditorConfig::from_json(json)?,
            None => EditorConfig::default(),
        };
        Ok(Self::new(config))
    }

    /// Route store notifications into `pending_view`, replacing any earlier
    /// subscription.
    pub(crate) fn watch_view(&self) {
        let session = self.session.borrow();
        let view = session.view();
        if let Some(id) = self.view_subscription.take() {
            view.unsubscribe(id);
        }
        let pending = Rc::clone(&self.pending_view);
        let id = view.subscribe(move |state| pending.set(Some(*state)));
        self.view_subscription.set(Some(id));
    }

    pub(crate) fn set_save_callback(&self, callback: js_sys::Function) {
        *self.save_callback.borrow_mut() = Some(callback);
    }

    pub(crate) fn set_view_callback(&self, callback: js_sys::Function) {
        *self.view_callback.borrow_mut() = Some(callback);
        self.watch_view();
    }

    pub(crate) fn handle_key(&self, input: &KeyInput) -> KeyOutcome {
        let outcome = self.session.borrow_mut().handle_key(input);
        if outcome.action == Some(ShortcutAction::Save) {
            self.fire_save();
        }
        self.flush_view();
        outcome
    }

    /// Run `f` against the session, then deliver any view change.
    pub(crate) fn with_session<R>(&self, f: impl FnOnce(&mut EditorSession) -> R) -> R {
        let result = f(&mut self.session.borrow_mut());
        self.flush_view();
        result
    }

    pub(crate) fn add_text(&self, id: &str, content: &str, styles_json: Option<&str>) -> Result<(), String> {
        let styles = decode_styles(styles_json)?;
        let object = TextObject::new(ObjectId::intern(id), content).with_styles(styles);
        self.session.borrow_mut().insert_text(object);
        Ok(())
    }

    /// Add a text object under a generated id and return the id.
    pub(crate) fn create_text(&self, content: &str, styles_json: Option<&str>) -> Result<String, String> {
        let styles = decode_styles(styles_json)?;
        let id = self.session.borrow_mut().create_text(content, styles);
        Ok(id.to_string())
    }

    /// Whether a toolbar control renders as pressed for the active object.
    pub(crate) fn toolbar_active(&self, json: &str) -> Result<bool, String> {
        let action = decode_action(json)?;
        Ok(self
            .session
            .borrow()
            .text_styles()
            .is_some_and(|styles| action.is_active(&styles)))
    }

    pub(crate) fn apply_patch(&self, json: &str) -> Result<bool, String> {
        let patch: TextStylePatch =
            serde_json::from_str(json).map_err(|e| format!("Patch parse error: {e}"))?;
        Ok(self.session.borrow_mut().apply_patch(&patch))
    }

    pub(crate) fn toolbar(&self, json: &str) -> Result<bool, String> {
        let action = decode_action(json)?;
        Ok(self.session.borrow_mut().apply(&action))
    }

    pub(crate) fn text_styles_json(&self) -> Option<String> {
        let styles = self.session.borrow().text_styles()?;
        serde_json::to_string(&styles).ok()
    }

    pub(crate) fn view_state_json(&self) -> String {
        let state = self.session.borrow().view().state();
        serde_json::to_string(&state).unwrap_or_default()
    }

    /// JSON reply for `IgEditor::handle_key`.
    pub(crate) fn key_reply(&self, outcome: &KeyOutcome) -> String {
        let session = self.session.borrow();
        let zoom = session.zoom();
        serde_json::json!({
            "handled": outcome.consumed,
            "preventDefault": outcome.prevent_default,
            "action": outcome.action.map_or("none", ShortcutAction::name),
            "changed": outcome.changed,
            "zoom": session.view().zoom(),
            "label": zoom.label(),
        })
        .to_string()
    }

    pub(crate) fn close(&self) {
        self.session.borrow_mut().close();
        // The old store went away with its listeners.
        self.view_subscription.set(None);
        self.pending_view.set(None);
        if self.view_callback.borrow().is_some() {
            self.watch_view();
        }
    }

    fn fire_save(&self) {
        let callback = self.save_callback.borrow().clone();
        match callback {
            Some(callback) => {
                if let Err(e) = callback.call0(&JsValue::NULL) {
                    log::warn!("save callback threw: {e:?}");
                }
            }
            None => log::debug!("save shortcut with no save callback"),
        }
    }

    fn flush_view(&self) {
        let Some(state) = self.pending_view.take() else {
            return;
        };
        let callback = self.view_callback.borrow().clone();
        let Some(callback) = callback else {
            return;
        };
        match serde_json::to_string(&state) {
            Ok(json) => {
                if let Err(e) = callback.call1(&JsValue::NULL, &JsValue::from_str(&json)) {
                    log::warn!("view callback threw: {e:?}");
                }
            }
            Err(e) => log::warn!("view state not serializable: {e}"),
        }
    }
}

fn decode_styles(json: Option<&str>) -> Result<TextStyles, String> {
    match json {
        Some(json) => {
            serde_json::from_str(json).map_err(|e| format!("Text style parse error: {e}"))
        }
        None => Ok(TextStyles::default()),
    }
}

fn decode_action(json: &str) -> Result<ToolbarAction, String> {
    serde_json::from_str(json).map_err(|e| format!("Toolbar action parse error: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn bridge_with_headline() -> Bridge {
        let bridge = Bridge::new(EditorConfig::default());
        bridge
            .add_text("headline", "Just Sold!", Some(r##"{
                "fontFamily": "Montserrat", "fontSize": 48, "color": "#ffffff",
                "bold": true, "italic": false, "underline": false, "strikethrough": false,
                "textTransform": "uppercase", "align": "center", "listStyle": "none"
            }"##))
            .unwrap();
        bridge
            .session
            .borrow_mut()
            .select(&[ObjectId::intern("headline")]);
        bridge
    }

    #[test]
    fn key_reply_reports_zoom() {
        let bridge = Bridge::new(EditorConfig::default());
        let outcome = bridge.handle_key(&KeyInput::new("=").with_primary());
        let reply: serde_json::Value = serde_json::from_str(&bridge.key_reply(&outcome)).unwrap();
        assert_eq!(reply["handled"], true);
        assert_eq!(reply["preventDefault"], true);
        assert_eq!(reply["action"], "zoomIn");
        assert_eq!(reply["label"], "110%");
    }

    #[test]
    fn unbound_key_reply() {
        let bridge = Bridge::new(EditorConfig::default());
        let outcome = bridge.handle_key(&KeyInput::new("k"));
        let reply: serde_json::Value = serde_json::from_str(&bridge.key_reply(&outcome)).unwrap();
        assert_eq!(reply["handled"], false);
        assert_eq!(reply["action"], "none");
    }

    #[test]
    fn toolbar_json_roundtrip() {
        let bridge = bridge_with_headline();
        assert!(bridge.toolbar(r#"{"control":"toggleCase"}"#).unwrap());
        let styles: TextStyles =
            serde_json::from_str(&bridge.text_styles_json().unwrap()).unwrap();
        assert_eq!(styles.text_transform, ig_core::TextTransform::Lowercase);
        assert!(bridge.toolbar(r#"{"control":"explode"}"#).is_err());
    }

    #[test]
    fn patch_json_is_merged() {
        let bridge = bridge_with_headline();
        assert!(bridge.apply_patch(r#"{"fontSize": 900, "italic": true}"#).unwrap());
        let styles = bridge.session.borrow().text_styles().unwrap();
        assert_eq!(styles.font_size, 500);
        assert!(styles.italic);
        assert!(styles.bold, "untouched field kept");
    }

    #[test]
    fn pending_view_without_callback_is_dropped() {
        let bridge = Bridge::new(EditorConfig::default());
        bridge.watch_view();
        bridge.with_session(|s| s.zoom().zoom_to(200.0));
        assert_eq!(bridge.pending_view.get(), None);
        let state: ViewState = serde_json::from_str(&bridge.view_state_json()).unwrap();
        assert_eq!(state.zoom_percentage(), 200);
    }

    #[test]
    fn bad_config_is_error() {
        assert!(Bridge::from_json(Some("not json")).is_err());
        assert!(Bridge::from_json(None).is_ok());
    }

    #[test]
    fn rewatching_keeps_one_listener() {
        let bridge = Bridge::new(EditorConfig::default());
        for _ in 0..5 {
            bridge.watch_view();
        }
        assert_eq!(bridge.session.borrow().view().subscriber_count(), 1);

        bridge.watch_view();
        bridge.close();
        bridge.watch_view();
        assert_eq!(bridge.session.borrow().view().subscriber_count(), 1);
    }

    #[test]
    fn added_text_font_size_is_clamped() {
        let bridge = Bridge::new(EditorConfig::default());
        bridge
            .add_text("open_house", "Open House", Some(r##"{
                "fontFamily": "Lato", "fontSize": 0, "color": "#222222",
                "bold": false, "italic": false, "underline": false, "strikethrough": false,
                "textTransform": "none", "align": "left", "listStyle": "none"
            }"##))
            .unwrap();
        bridge
            .session
            .borrow_mut()
            .select(&[ObjectId::intern("open_house")]);
        let styles: TextStyles =
            serde_json::from_str(&bridge.text_styles_json().unwrap()).unwrap();
        assert_eq!(styles.font_size, 1);
    }

    #[test]
    fn created_text_and_active_controls() {
        let bridge = Bridge::new(EditorConfig::default());
        let id = bridge.create_text("Price Reduced", None).unwrap();
        assert!(id.starts_with("text_"));
        bridge.session.borrow_mut().select(&[ObjectId::intern(&id)]);

        let bold = r#"{"control":"toggleBold"}"#;
        assert!(!bridge.toolbar_active(bold).unwrap());
        bridge.toolbar(bold).unwrap();
        assert!(bridge.toolbar_active(bold).unwrap());
        assert!(bridge.toolbar_active(r#"{"control":"setAlign","value":"left"}"#).unwrap());
        assert!(bridge.toolbar_active("{").is_err());
    }
}
