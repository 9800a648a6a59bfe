//! Keyboard input as seen by the editor.

use serde::{Deserialize, Serialize};

/// A normalized key press, mirroring the DOM `KeyboardEvent` fields the
/// editor looks at.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyInput {
    /// `KeyboardEvent.key` (e.g. `"="`, `"s"`, `"!"`).
    pub key: String,
    #[serde(default)]
    pub ctrl: bool,
    #[serde(default)]
    pub shift: bool,
    #[serde(default)]
    pub alt: bool,
    #[serde(default)]
    pub meta: bool,
}

impl KeyInput {
    pub fn new(key: &str) -> Self {
        Self {
            key: key.to_string(),
            ..Self::default()
        }
    }

    /// Same key with the primary modifier (Ctrl, or ⌘ on macOS) held.
    pub fn with_primary(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }

    /// Platform-conventional command modifier: `ctrl || meta`.
    pub fn primary(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// A key combination a shortcut is bound to.
///
/// `primary` must match exactly. `shift: None` accepts either state, which
/// is what glyph keys like `+` need (Shift is physically held to type them
/// on most layouts).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyChord {
    pub key: String,
    pub primary: bool,
    pub shift: Option<bool>,
}

impl KeyChord {
    pub fn new(key: &str, primary: bool, shift: Option<bool>) -> Self {
        Self {
            key: key.to_string(),
            primary,
            shift,
        }
    }

    pub fn matches(&self, input: &KeyInput) -> bool {
        input.key.eq_ignore_ascii_case(&self.key)
            && input.primary() == self.primary
            && self.shift.is_none_or(|shift| shift == input.shift)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meta_counts_as_primary() {
        let mut input = KeyInput::new("s");
        input.meta = true;
        assert!(input.primary());
        assert!(KeyChord::new("s", true, Some(false)).matches(&input));
    }

    #[test]
    fn letter_match_ignores_case() {
        let input = KeyInput::new("S").with_primary();
        assert!(KeyChord::new("s", true, None).matches(&input));
    }

    #[test]
    fn shift_wildcard() {
        let chord = KeyChord::new("+", true, None);
        assert!(chord.matches(&KeyInput::new("+").with_primary()));
        assert!(chord.matches(&KeyInput::new("+").with_primary().with_shift()));
        assert!(!chord.matches(&KeyInput::new("+")));
    }

    #[test]
    fn exact_shift() {
        let chord = KeyChord::new("z", true, Some(false));
        assert!(!chord.matches(&KeyInput::new("z").with_primary().with_shift()));
    }
}
