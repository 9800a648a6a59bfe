//! Keyboard shortcut mapping.
//!
//! Maps key + modifier combos to semantic `ShortcutAction`s. Bindings are an
//! ordered table: the first matching row wins and the key press is consumed,
//! so no later row (or page handler) sees it.
//!
//! Default table, in priority order:
//!
//! | Chord              | Action        |
//! |--------------------|---------------|
//! | ⌘ `+` / ⌘ `=`      | Zoom in       |
//! | ⌘ `-`              | Zoom out      |
//! | Shift `1`          | Fit to screen |
//! | ⌘ `s`              | Save          |
//! | ⌘ `z`              | Undo          |
//! | ⌘ Shift `z`, ⌘ `y` | Redo          |
//!
//! ⌘ is the primary modifier: Cmd on macOS, Ctrl elsewhere.

use ig_core::{KeyChord, KeyInput, parse_chord};
use serde::Serialize;

/// Actions that keyboard shortcuts can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ShortcutAction {
    ZoomIn,
    ZoomOut,
    FitToScreen,
    /// Routed to the host's save hook.
    Save,
    Undo,
    Redo,
}

impl ShortcutAction {
    pub fn name(self) -> &'static str {
        match self {
            Self::ZoomIn => "zoomIn",
            Self::ZoomOut => "zoomOut",
            Self::FitToScreen => "fitToScreen",
            Self::Save => "save",
            Self::Undo => "undo",
            Self::Redo => "redo",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "zoomIn" => Some(Self::ZoomIn),
            "zoomOut" => Some(Self::ZoomOut),
            "fitToScreen" => Some(Self::FitToScreen),
            "save" => Some(Self::Save),
            "undo" => Some(Self::Undo),
            "redo" => Some(Self::Redo),
            _ => None,
        }
    }
}

/// What happened to a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyOutcome {
    pub action: Option<ShortcutAction>,
    /// The host must call `preventDefault()` (browser zoom, "Save page as").
    pub prevent_default: bool,
    /// No further handler should see this key press.
    pub consumed: bool,
    /// Editor state changed as a result.
    pub changed: bool,
}

impl KeyOutcome {
    pub fn ignored() -> Self {
        Self::default()
    }

    pub fn handled(action: ShortcutAction, changed: bool) -> Self {
        Self {
            action: Some(action),
            prevent_default: true,
            consumed: true,
            changed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Binding {
    chord: KeyChord,
    action: ShortcutAction,
}

/// Ordered shortcut table.
#[derive(Debug, Clone)]
pub struct ShortcutMap {
    bindings: Vec<Binding>,
}

impl Default for ShortcutMap {
    fn default() -> Self {
        let mut map = Self::empty();
        // Shift is a wildcard for glyph keys: `+` needs it on most layouts.
        map.push(KeyChord::new("+", true, None), ShortcutAction::ZoomIn);
        map.push(KeyChord::new("=", true, None), ShortcutAction::ZoomIn);
        map.push(KeyChord::new("-", true, None), ShortcutAction::ZoomOut);
        map.push(KeyChord::new("1", false, Some(true)), ShortcutAction::FitToScreen);
        // With Shift held, US layouts report "!" for the 1 key.
        map.push(KeyChord::new("!", false, Some(true)), ShortcutAction::FitToScreen);
        map.push(KeyChord::new("s", true, None), ShortcutAction::Save);
        map.push(KeyChord::new("z", true, Some(false)), ShortcutAction::Undo);
        map.push(KeyChord::new("z", true, Some(true)), ShortcutAction::Redo);
        map.push(KeyChord::new("y", true, Some(false)), ShortcutAction::Redo);
        map
    }
}

impl ShortcutMap {
    /// A table with no bindings.
    pub fn empty() -> Self {
        Self {
            bindings: Vec::new(),
        }
    }

    fn push(&mut self, chord: KeyChord, action: ShortcutAction) {
        self.bindings.push(Binding { chord, action });
    }

    /// Append a binding parsed from a chord string like `"Mod+Shift+0"`.
    /// It ranks below every existing row.
    pub fn bind(&mut self, chord: &str, action: ShortcutAction) -> Result<(), String> {
        let chord = parse_chord(chord)?;
        self.push(chord, action);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// First action whose chord matches `input`, or `None`.
    pub fn resolve(&self, input: &KeyInput) -> Option<ShortcutAction> {
        let action = self
            .bindings
            .iter()
            .find(|b| b.chord.matches(input))
            .map(|b| b.action);
        log::trace!("key {input:?} -> {action:?}");
        action
    }
}
