//! One editing session: what lives while the editor view is open.
//!
//! The view store is created the first time anything asks for it and
//! dropped by `close()` (or with the session), so state never leaks from
//! one opened design into the next.

use crate::commands::CommandStack;
use crate::config::EditorConfig;
use crate::selection::{TextLayer, TextObject};
use crate::shortcuts::{KeyOutcome, ShortcutAction, ShortcutMap};
use crate::store::ViewStore;
use crate::toolbar::ToolbarAction;
use crate::zoom::ZoomControls;
use ig_core::{KeyInput, ObjectId, TextStylePatch, TextStyles};
use std::cell::OnceCell;

pub struct EditorSession {
    config: EditorConfig,
    view: OnceCell<ViewStore>,
    shortcuts: ShortcutMap,
    /// Text objects and selection. Style writes go through `history`.
    layer: TextLayer,
    history: CommandStack,
    /// Host callback for ⌘S.
    save_hook: Option<Box<dyn FnMut()>>,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl EditorSession {
    pub fn new(config: EditorConfig) -> Self {
        let shortcuts = config.shortcut_map();
        let history = CommandStack::new(config.history_depth);
        Self {
            config,
            view: OnceCell::new(),
            shortcuts,
            layer: TextLayer::new(),
            history,
            save_hook: None,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// The session's view store, created on first access.
    pub fn view(&self) -> &ViewStore {
        self.view.get_or_init(|| {
            log::debug!("view store created");
            ViewStore::new()
        })
    }

    /// Whether the view store has been created yet.
    pub fn has_view(&self) -> bool {
        self.view.get().is_some()
    }

    pub fn zoom(&self) -> ZoomControls<'_> {
        ZoomControls::from_config(self.view(), &self.config)
    }

    pub fn set_save_hook(&mut self, hook: impl FnMut() + 'static) {
        self.save_hook = Some(Box::new(hook));
    }

    /// Translate a key press into an editor action.
    ///
    /// Matched shortcuts are always consumed with the browser default
    /// suppressed, even when they change nothing (zoom-in at 400% must not
    /// fall through to the browser's own zoom).
    pub fn handle_key(&mut self, input: &KeyInput) -> KeyOutcome {
        match self.shortcuts.resolve(input) {
            Some(action) => {
                let changed = self.dispatch(action);
                KeyOutcome::handled(action, changed)
            }
            None => KeyOutcome::ignored(),
        }
    }

    /// Run a shortcut action. Returns `true` if editor state changed.
    pub fn dispatch(&mut self, action: ShortcutAction) -> bool {
        match action {
            ShortcutAction::ZoomIn => self.zoom().zoom_in(),
            ShortcutAction::ZoomOut => self.zoom().zoom_out(),
            ShortcutAction::FitToScreen => self.zoom().fit_to_screen(),
            ShortcutAction::Save => {
                match self.save_hook.as_mut() {
                    Some(hook) => hook(),
                    None => log::debug!("save requested with no save hook installed"),
                }
                false
            }
            ShortcutAction::Undo => self.undo().is_some(),
            ShortcutAction::Redo => self.redo().is_some(),
        }
    }

    /// Read-only view of the text objects and selection.
    pub fn layer(&self) -> &TextLayer {
        &self.layer
    }

    /// Add (or replace) a text object.
    pub fn insert_text(&mut self, object: TextObject) {
        self.layer.insert(object);
    }

    /// Add a text object under a fresh `text_{n}` id.
    pub fn create_text(&mut self, content: &str, styles: TextStyles) -> ObjectId {
        let id = ObjectId::next("text");
        self.layer
            .insert(TextObject::new(id, content).with_styles(styles));
        id
    }

    pub fn remove_text(&mut self, id: ObjectId) -> Option<TextObject> {
        self.layer.remove(id)
    }

    /// Replace the selection. Unknown ids are dropped.
    pub fn select(&mut self, ids: &[ObjectId]) {
        self.layer.select(ids);
    }

    /// Shift+click on a text object.
    pub fn toggle_selected(&mut self, id: ObjectId) {
        self.layer.toggle_selected(id);
    }

    /// Styles of the active text object, as the toolbar should show them.
    pub fn text_styles(&self) -> Option<TextStyles> {
        self.layer.active_styles()
    }

    /// Apply a toolbar interaction to the selection. Returns `true` if any
    /// selected object changed.
    pub fn apply(&mut self, action: &ToolbarAction) -> bool {
        let Some(current) = self.layer.active_styles() else {
            return false;
        };
        match action.patch(&current) {
            Some(patch) => {
                self.history
                    .execute(&mut self.layer, &patch, &action.describe())
            }
            None => false,
        }
    }

    /// Commit a raw patch (e.g. from the properties panel).
    pub fn apply_patch(&mut self, patch: &TextStylePatch) -> bool {
        self.history.execute(&mut self.layer, patch, "Edit text style")
    }

    pub fn begin_gesture(&mut self) {
        self.history.begin_batch();
    }

    pub fn end_gesture(&mut self, description: &str) {
        self.history.end_batch(description);
    }

    pub fn undo(&mut self) -> Option<String> {
        self.history.undo(&mut self.layer)
    }

    pub fn redo(&mut self) -> Option<String> {
        self.history.redo(&mut self.layer)
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Tear down the view store and history. The next `view()` starts
    /// fresh at 100%.
    pub fn close(&mut self) {
        self.view.take();
        self.history = CommandStack::new(self.config.history_depth);
        self.layer.clear_selection();
        log::debug!("session closed");
    }
}
