//! Text toolbar controls.
//!
//! Each control reads the current `TextStyles` and answers with a
//! `TextStylePatch` holding only the fields it owns; the selection owner
//! merges it. A control never writes a field outside [`ToolbarAction::writes`].
//!
//! | Control          | Writes            | Behavior                              |
//! |------------------|-------------------|---------------------------------------|
//! | Font picker      | `fontFamily`      | set                                   |
//! | Size box         | `fontSize`        | parse, clamp to 1..=500, junk ignored |
//! | Size stepper     | `fontSize`        | add delta, clamp                      |
//! | Color swatch     | `color`           | set                                   |
//! | B / I / U / S    | one flag each     | flip                                  |
//! | Aa               | `textTransform`   | none → upper → lower → capitalize     |
//! | Align buttons    | `align`           | set (no toggle-off)                   |
//! | List buttons     | `listStyle`       | exclusive, toggle-off when active     |

use ig_core::{
    ListStyle, StyleField, TextAlign, TextStylePatch, TextStyles, clamp_font_size,
    parse_font_size,
};
use serde::Deserialize;

/// A press, pick or entry on one toolbar control.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "control", content = "value", rename_all = "camelCase")]
pub enum ToolbarAction {
    SetFontFamily(String),
    /// Raw text from the font-size box.
    FontSizeInput(String),
    /// Size stepper arrows (±1, or ±10 with Shift).
    StepFontSize(i32),
    SetColor(String),
    ToggleBold,
    ToggleItalic,
    ToggleUnderline,
    ToggleStrikethrough,
    ToggleCase,
    SetAlign(TextAlign),
    ToggleList(ListStyle),
}

impl ToolbarAction {
    /// The fields this control is allowed to write.
    pub fn writes(&self) -> &'static [StyleField] {
        match self {
            Self::SetFontFamily(_) => &[StyleField::FontFamily],
            Self::FontSizeInput(_) | Self::StepFontSize(_) => &[StyleField::FontSize],
            Self::SetColor(_) => &[StyleField::Color],
            Self::ToggleBold => &[StyleField::Bold],
            Self::ToggleItalic => &[StyleField::Italic],
            Self::ToggleUnderline => &[StyleField::Underline],
            Self::ToggleStrikethrough => &[StyleField::Strikethrough],
            Self::ToggleCase => &[StyleField::TextTransform],
            Self::SetAlign(_) => &[StyleField::Align],
            Self::ToggleList(_) => &[StyleField::ListStyle],
        }
    }

    /// Patch requested by this control given the current styles.
    ///
    /// `None` means the input is dropped: unparseable font-size text.
    pub fn patch(&self, current: &TextStyles) -> Option<TextStylePatch> {
        let patch = match self {
            Self::SetFontFamily(family) => TextStylePatch::font_family(family.as_str()),
            Self::FontSizeInput(text) => {
                let size = parse_font_size(text)?;
                TextStylePatch::font_size(clamp_font_size(size))
            }
            Self::StepFontSize(delta) => {
                let size = i64::from(current.font_size) + i64::from(*delta);
                TextStylePatch::font_size(clamp_font_size(size))
            }
            Self::SetColor(color) => TextStylePatch::color(color.as_str()),
            Self::ToggleBold => TextStylePatch {
                bold: Some(!current.bold),
                ..TextStylePatch::default()
            },
            Self::ToggleItalic => TextStylePatch {
                italic: Some(!current.italic),
                ..TextStylePatch::default()
            },
            Self::ToggleUnderline => TextStylePatch {
                underline: Some(!current.underline),
                ..TextStylePatch::default()
            },
            Self::ToggleStrikethrough => TextStylePatch {
                strikethrough: Some(!current.strikethrough),
                ..TextStylePatch::default()
            },
            Self::ToggleCase => TextStylePatch::text_transform(current.text_transform.next()),
            Self::SetAlign(align) => TextStylePatch::align(*align),
            Self::ToggleList(target) => {
                TextStylePatch::list_style(current.list_style.toggled(*target))
            }
        };
        Some(patch)
    }

    /// Whether the control renders as pressed for `current`.
    pub fn is_active(&self, current: &TextStyles) -> bool {
        match self {
            Self::ToggleBold => current.bold,
            Self::ToggleItalic => current.italic,
            Self::ToggleUnderline => current.underline,
            Self::ToggleStrikethrough => current.strikethrough,
            Self::SetAlign(align) => current.align == *align,
            Self::ToggleList(list) => *list != ListStyle::None && current.list_style == *list,
            Self::SetFontFamily(family) => current.font_family == *family,
            Self::SetColor(color) => current.color.eq_ignore_ascii_case(color),
            Self::ToggleCase => current.text_transform != ig_core::TextTransform::None,
            Self::FontSizeInput(_) | Self::StepFontSize(_) => false,
        }
    }

    /// Short label used for undo history entries.
    pub fn describe(&self) -> String {
        match self {
            Self::SetFontFamily(family) => format!("Font {family}"),
            Self::FontSizeInput(_) | Self::StepFontSize(_) => "Font size".to_string(),
            Self::SetColor(_) => "Text color".to_string(),
            Self::ToggleBold => "Bold".to_string(),
            Self::ToggleItalic => "Italic".to_string(),
            Self::ToggleUnderline => "Underline".to_string(),
            Self::ToggleStrikethrough => "Strikethrough".to_string(),
            Self::ToggleCase => "Change case".to_string(),
            Self::SetAlign(align) => format!("Align {align:?}").to_lowercase(),
            Self::ToggleList(_) => "List style".to_string(),
        }
    }
}
