//! Parsers for text the user types into editor chrome: the font-size box,
//! the zoom box, and shortcut chords in editor config.
//!
//! Built on `winnow` 0.7.

use crate::keys::KeyChord;
use winnow::ascii::{Caseless, digit0, digit1, multispace0};
use winnow::combinator::{alt, opt, repeat, terminated};
use winnow::error::{ContextError, ErrMode};
use winnow::prelude::*;
use winnow::token::{one_of, rest};

/// Parse font-size entry the way a browser's `parseInt` would: leading
/// whitespace, optional sign, then digits. Anything after the digits is
/// ignored (`"12px"` → 12, `"12.5"` → 12). Returns `None` if no digits
/// lead the input.
pub fn parse_font_size(text: &str) -> Option<i64> {
    let mut input = text;
    leading_integer.parse_next(&mut input).ok()
}

fn leading_integer(input: &mut &str) -> ModalResult<i64> {
    multispace0.parse_next(input)?;
    let sign = opt(one_of(['+', '-'])).parse_next(input)?;
    let digits: &str = digit1.parse_next(input)?;
    // Overlong digit runs saturate; the caller clamps anyway.
    let magnitude = digits.parse::<i64>().unwrap_or(i64::MAX);
    Ok(if sign == Some('-') {
        -magnitude
    } else {
        magnitude
    })
}

/// Parse free-text zoom entry (`"150"`, `"150%"`, `" 75.5 % "`) into a
/// percentage. Unlike font size, trailing junk rejects the whole entry.
pub fn parse_zoom_entry(text: &str) -> Option<f64> {
    zoom_entry.parse(text).ok()
}

fn zoom_entry(input: &mut &str) -> ModalResult<f64> {
    multispace0.parse_next(input)?;
    let number = decimal.parse_next(input)?;
    multispace0.parse_next(input)?;
    opt('%').parse_next(input)?;
    multispace0.parse_next(input)?;
    Ok(number)
}

fn decimal(input: &mut &str) -> ModalResult<f64> {
    let text: &str = (digit1, opt(('.', digit0))).take().parse_next(input)?;
    text.parse::<f64>()
        .map_err(|_| ErrMode::Backtrack(ContextError::new()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Modifier {
    Primary,
    Shift,
    Alt,
}

fn modifier(input: &mut &str) -> ModalResult<Modifier> {
    alt((
        alt((Caseless("mod"), Caseless("cmd"), Caseless("ctrl"), Caseless("meta")))
            .value(Modifier::Primary),
        Caseless("shift").value(Modifier::Shift),
        Caseless("alt").value(Modifier::Alt),
    ))
    .parse_next(input)
}

fn chord(input: &mut &str) -> ModalResult<(Vec<Modifier>, String)> {
    let modifiers: Vec<Modifier> = repeat(0.., terminated(modifier, '+')).parse_next(input)?;
    let key: &str = rest.parse_next(input)?;
    Ok((modifiers, key.trim().to_string()))
}

/// Parse a binding string such as `"Mod+Shift+1"` or `"Mod++"`.
///
/// `Mod`, `Cmd`, `Ctrl` and `Meta` all mean the primary modifier. A chord
/// without `Shift` requires Shift to be released. `Alt` is accepted but
/// bindings never distinguish it.
pub fn parse_chord(text: &str) -> Result<KeyChord, String> {
    let (modifiers, key) = chord
        .parse(text.trim())
        .map_err(|e| format!("Chord parse error in {text:?}: {e}"))?;
    if key.is_empty() {
        return Err(format!("Chord {text:?} has no key"));
    }
    if modifier.parse(key.as_str()).is_ok() {
        return Err(format!("Chord {text:?} ends in a modifier, not a key"));
    }
    if modifiers.contains(&Modifier::Alt) {
        log::warn!("chord {text:?}: Alt is ignored when matching shortcuts");
    }
    let shift = modifiers.contains(&Modifier::Shift);
    Ok(KeyChord {
        key,
        primary: modifiers.contains(&Modifier::Primary),
        shift: Some(shift),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn font_size_plain() {
        assert_eq!(parse_font_size("24"), Some(24));
        assert_eq!(parse_font_size("  36 "), Some(36));
    }

    #[test]
    fn font_size_trailing_junk_ignored() {
        assert_eq!(parse_font_size("12px"), Some(12));
        assert_eq!(parse_font_size("12.7"), Some(12));
    }

    #[test]
    fn font_size_signed() {
        assert_eq!(parse_font_size("-4"), Some(-4));
        assert_eq!(parse_font_size("+8"), Some(8));
    }

    #[test]
    fn font_size_rejects_non_numeric() {
        assert_eq!(parse_font_size(""), None);
        assert_eq!(parse_font_size("abc"), None);
        assert_eq!(parse_font_size("px12"), None);
        assert_eq!(parse_font_size("-"), None);
    }

    #[test]
    fn font_size_overflow_saturates() {
        assert_eq!(parse_font_size("99999999999999999999999"), Some(i64::MAX));
    }

    #[test]
    fn zoom_entry_forms() {
        assert_eq!(parse_zoom_entry("150"), Some(150.0));
        assert_eq!(parse_zoom_entry("150%"), Some(150.0));
        assert_eq!(parse_zoom_entry(" 75.5 % "), Some(75.5));
    }

    #[test]
    fn zoom_entry_rejects_junk() {
        assert_eq!(parse_zoom_entry("big"), None);
        assert_eq!(parse_zoom_entry("150%%"), None);
        assert_eq!(parse_zoom_entry("1 50"), None);
        assert_eq!(parse_zoom_entry(""), None);
    }

    #[test]
    fn chord_with_modifiers() {
        let chord = parse_chord("Mod+Shift+1").unwrap();
        assert_eq!(chord, KeyChord::new("1", true, Some(true)));
    }

    #[test]
    fn chord_plus_key() {
        let chord = parse_chord("Ctrl++").unwrap();
        assert_eq!(chord, KeyChord::new("+", true, Some(false)));
    }

    #[test]
    fn chord_modifier_aliases_are_caseless() {
        assert!(parse_chord("cmd+s").unwrap().primary);
        assert!(parse_chord("META+s").unwrap().primary);
        assert!(!parse_chord("s").unwrap().primary);
    }

    #[test]
    fn chord_errors() {
        assert!(parse_chord("").is_err());
        assert!(parse_chord("Mod+").is_err());
        assert!(parse_chord("Mod+Shift").is_err());
    }
}
