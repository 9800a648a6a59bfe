//! Text styling of canvas objects and the partial-patch contract used to
//! change it.
//!
//! Toolbar controls never mutate a `TextStyles` in place. They emit a
//! `TextStylePatch` carrying only the fields they changed, and the owner of
//! the selection merges it with [`merge`]. Merging is total: any patch
//! applied to any valid `TextStyles` yields a valid `TextStyles`.

use serde::{Deserialize, Deserializer, Serialize};
use smallvec::SmallVec;

// ─── Constants ───────────────────────────────────────────────────────────

pub const FONT_SIZE_MIN: u32 = 1;
pub const FONT_SIZE_MAX: u32 = 500;

/// Families offered by the font picker. Not a validation list:
/// `TextStyles::font_family` accepts any string.
pub const FONT_FAMILIES: [&str; 9] = [
    "Inter",
    "Roboto",
    "Open Sans",
    "Lato",
    "Montserrat",
    "Georgia",
    "Times New Roman",
    "Poppins",
    "Playfair Display",
];

/// Clamp an entered font size into `[FONT_SIZE_MIN, FONT_SIZE_MAX]`.
pub fn clamp_font_size(size: i64) -> u32 {
    size.clamp(i64::from(FONT_SIZE_MIN), i64::from(FONT_SIZE_MAX)) as u32
}

fn deserialize_font_size<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    i64::deserialize(deserializer).map(clamp_font_size)
}

fn deserialize_patch_font_size<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<u32>, D::Error> {
    Ok(Option::<i64>::deserialize(deserializer)?.map(clamp_font_size))
}

// ─── Enumerations ────────────────────────────────────────────────────────

/// Letter-case transform, cycled by the "toggle case" button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TextTransform {
    #[default]
    None,
    Uppercase,
    Lowercase,
    Capitalize,
}

impl TextTransform {
    /// Cycle order of the "toggle case" button.
    pub const CYCLE: [TextTransform; 4] = [
        TextTransform::None,
        TextTransform::Uppercase,
        TextTransform::Lowercase,
        TextTransform::Capitalize,
    ];

    /// The next transform in `CYCLE`, wrapping after `Capitalize`.
    pub fn next(self) -> Self {
        let index = Self::CYCLE.iter().position(|t| *t == self).unwrap_or(0);
        Self::CYCLE[(index + 1) % Self::CYCLE.len()]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Uppercase => "uppercase",
            Self::Lowercase => "lowercase",
            Self::Capitalize => "capitalize",
        }
    }

    /// Parse a CSS `text-transform` keyword. Anything unrecognized is
    /// treated as `None`, so cycling from a foreign value starts over.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "uppercase" => Self::Uppercase,
            "lowercase" => Self::Lowercase,
            "capitalize" => Self::Capitalize,
            _ => Self::None,
        }
    }
}

impl From<String> for TextTransform {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl From<TextTransform> for String {
    fn from(transform: TextTransform) -> Self {
        transform.as_str().to_string()
    }
}

/// Horizontal alignment. Exactly one is always active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// List marker. A three-way exclusive choice, not two booleans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListStyle {
    #[default]
    None,
    Bullet,
    Numbered,
}

impl ListStyle {
    /// Result of pressing the `target` list button while `self` is active.
    ///
    /// ```text
    /// none     --bullet-->   bullet   --bullet-->   none
    /// none     --numbered--> numbered --numbered--> none
    /// bullet   --numbered--> numbered
    /// numbered --bullet-->   bullet
    /// ```
    pub fn toggled(self, target: ListStyle) -> ListStyle {
        if self == target {
            ListStyle::None
        } else {
            target
        }
    }
}

// ─── TextStyles ──────────────────────────────────────────────────────────

/// Full styling of one text object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyles {
    pub font_family: String,
    /// Always within `[FONT_SIZE_MIN, FONT_SIZE_MAX]`, decoded values included.
    #[serde(deserialize_with = "deserialize_font_size")]
    pub font_size: u32,
    /// CSS color (hex or named). Not validated.
    pub color: String,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strikethrough: bool,
    pub text_transform: TextTransform,
    pub align: TextAlign,
    pub list_style: ListStyle,
}

impl Default for TextStyles {
    fn default() -> Self {
        Self {
            font_family: "Inter".into(),
            font_size: 16,
            color: "#000000".into(),
            bold: false,
            italic: false,
            underline: false,
            strikethrough: false,
            text_transform: TextTransform::None,
            align: TextAlign::Left,
            list_style: ListStyle::None,
        }
    }
}

impl TextStyles {
    /// Return a copy with `patch` merged in. See [`merge`].
    pub fn merged(&self, patch: &TextStylePatch) -> TextStyles {
        merge(self, patch)
    }

    /// Minimal patch that turns `self` into `other`.
    pub fn diff(&self, other: &TextStyles) -> TextStylePatch {
        fn changed<T: PartialEq + Clone>(a: &T, b: &T) -> Option<T> {
            (a != b).then(|| b.clone())
        }
        TextStylePatch {
            font_family: changed(&self.font_family, &other.font_family),
            font_size: changed(&self.font_size, &other.font_size),
            color: changed(&self.color, &other.color),
            bold: changed(&self.bold, &other.bold),
            italic: changed(&self.italic, &other.italic),
            underline: changed(&self.underline, &other.underline),
            strikethrough: changed(&self.strikethrough, &other.strikethrough),
            text_transform: changed(&self.text_transform, &other.text_transform),
            align: changed(&self.align, &other.align),
            list_style: changed(&self.list_style, &other.list_style),
        }
    }
}

// ─── Patches ─────────────────────────────────────────────────────────────

/// Names of the `TextStyles` fields, used to declare and check which
/// fields a patch (or a toolbar control) touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StyleField {
    FontFamily,
    FontSize,
    Color,
    Bold,
    Italic,
    Underline,
    Strikethrough,
    TextTransform,
    Align,
    ListStyle,
}

/// A partial update of `TextStyles`: only the `Some` fields change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextStylePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_patch_font_size"
    )]
    pub font_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub underline: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strikethrough: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_transform: Option<TextTransform>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align: Option<TextAlign>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list_style: Option<ListStyle>,
}

impl TextStylePatch {
    pub fn font_family(family: impl Into<String>) -> Self {
        Self {
            font_family: Some(family.into()),
            ..Self::default()
        }
    }

    pub fn font_size(size: u32) -> Self {
        Self {
            font_size: Some(size),
            ..Self::default()
        }
    }

    pub fn color(color: impl Into<String>) -> Self {
        Self {
            color: Some(color.into()),
            ..Self::default()
        }
    }

    pub fn align(align: TextAlign) -> Self {
        Self {
            align: Some(align),
            ..Self::default()
        }
    }

    pub fn list_style(list_style: ListStyle) -> Self {
        Self {
            list_style: Some(list_style),
            ..Self::default()
        }
    }

    pub fn text_transform(transform: TextTransform) -> Self {
        Self {
            text_transform: Some(transform),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fields().is_empty()
    }

    /// Fields this patch sets, in declaration order.
    pub fn fields(&self) -> SmallVec<[StyleField; 4]> {
        let mut fields = SmallVec::new();
        let mut mark = |set: bool, field: StyleField| {
            if set {
                fields.push(field);
            }
        };
        mark(self.font_family.is_some(), StyleField::FontFamily);
        mark(self.font_size.is_some(), StyleField::FontSize);
        mark(self.color.is_some(), StyleField::Color);
        mark(self.bold.is_some(), StyleField::Bold);
        mark(self.italic.is_some(), StyleField::Italic);
        mark(self.underline.is_some(), StyleField::Underline);
        mark(self.strikethrough.is_some(), StyleField::Strikethrough);
        mark(self.text_transform.is_some(), StyleField::TextTransform);
        mark(self.align.is_some(), StyleField::Align);
        mark(self.list_style.is_some(), StyleField::ListStyle);
        fields
    }
}

/// Merge `patch` into `current`, producing the next value.
///
/// Unset fields keep their current value. `font_size` is re-clamped, so a
/// patch decoded from untrusted JSON cannot push it out of range.
pub fn merge(current: &TextStyles, patch: &TextStylePatch) -> TextStyles {
    let font_size = patch.font_size.unwrap_or(current.font_size);
    TextStyles {
        font_family: patch
            .font_family
            .clone()
            .unwrap_or_else(|| current.font_family.clone()),
        font_size: clamp_font_size(i64::from(font_size)),
        color: patch.color.clone().unwrap_or_else(|| current.color.clone()),
        bold: patch.bold.unwrap_or(current.bold),
        italic: patch.italic.unwrap_or(current.italic),
        underline: patch.underline.unwrap_or(current.underline),
        strikethrough: patch.strikethrough.unwrap_or(current.strikethrough),
        text_transform: patch.text_transform.unwrap_or(current.text_transform),
        align: patch.align.unwrap_or(current.align),
        list_style: patch.list_style.unwrap_or(current.list_style),
    }
}
