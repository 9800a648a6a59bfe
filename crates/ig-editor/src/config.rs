//! Editor configuration.
//!
//! Everything has a default matching the stock editor; hosts override
//! fields by passing JSON, e.g.
//!
//! ```json
//! { "zoomStep": 0.25, "bindings": [{ "chord": "Mod+0", "action": "fitToScreen" }] }
//! ```

use crate::shortcuts::{ShortcutAction, ShortcutMap};
use ig_core::{ZOOM_PRESETS, ZOOM_STEP};
use serde::{Deserialize, Serialize};

/// A user-defined shortcut, appended after the built-in table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BindingConfig {
    pub chord: String,
    pub action: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorConfig {
    /// Zoom change per zoom-in / zoom-out. Kept within `(0, 1]`.
    pub zoom_step: f64,
    /// Percentages listed in the zoom dropdown.
    pub zoom_presets: Vec<u32>,
    /// Maximum undo depth.
    pub history_depth: usize,
    pub bindings: Vec<BindingConfig>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            zoom_step: ZOOM_STEP,
            zoom_presets: ZOOM_PRESETS.to_vec(),
            history_depth: 200,
            bindings: Vec::new(),
        }
    }
}

impl EditorConfig {
    /// Parse a JSON config. Missing fields take their defaults; an
    /// out-of-range zoom step falls back to the default step.
    pub fn from_json(json: &str) -> Result<Self, String> {
        let mut config: EditorConfig =
            serde_json::from_str(json).map_err(|e| format!("Config parse error: {e}"))?;
        if !(config.zoom_step > 0.0 && config.zoom_step <= 1.0) {
            log::warn!(
                "zoomStep {} out of range (0, 1], using {ZOOM_STEP}",
                config.zoom_step
            );
            config.zoom_step = ZOOM_STEP;
        }
        Ok(config)
    }

    /// Built-in shortcuts followed by the configured ones. Entries with an
    /// unknown action or a malformed chord are skipped with a warning.
    pub fn shortcut_map(&self) -> ShortcutMap {
        let mut map = ShortcutMap::default();
        for binding in &self.bindings {
            let Some(action) = ShortcutAction::from_name(&binding.action) else {
                log::warn!("unknown shortcut action {:?}, skipped", binding.action);
                continue;
            };
            if let Err(e) = map.bind(&binding.chord, action) {
                log::warn!("{e}, skipped");
            }
        }
        map
    }
}
