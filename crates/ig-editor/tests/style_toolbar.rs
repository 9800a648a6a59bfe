//! Integration tests: toolbar controls → patches → selection → history.

use ig_core::{ListStyle, ObjectId, StyleField, TextAlign, TextStyles, TextTransform};
use ig_editor::{EditorSession, TextObject, ToolbarAction};
use pretty_assertions::assert_eq;

fn session_with(id: &str, styles: TextStyles) -> (EditorSession, ObjectId) {
    let mut session = EditorSession::default();
    let id = ObjectId::intern(id);
    session.insert_text(TextObject::new(id, "3 Bed · 2 Bath · 1,850 sq ft").with_styles(styles));
    session.select(&[id]);
    (session, id)
}

fn every_action() -> Vec<ToolbarAction> {
    vec![
        ToolbarAction::SetFontFamily("Poppins".into()),
        ToolbarAction::FontSizeInput("44".into()),
        ToolbarAction::FontSizeInput("nope".into()),
        ToolbarAction::StepFontSize(-3),
        ToolbarAction::SetColor("#2e86de".into()),
        ToolbarAction::ToggleBold,
        ToolbarAction::ToggleItalic,
        ToolbarAction::ToggleUnderline,
        ToolbarAction::ToggleStrikethrough,
        ToolbarAction::ToggleCase,
        ToolbarAction::SetAlign(TextAlign::Left),
        ToolbarAction::SetAlign(TextAlign::Center),
        ToolbarAction::SetAlign(TextAlign::Right),
        ToolbarAction::ToggleList(ListStyle::Bullet),
        ToolbarAction::ToggleList(ListStyle::Numbered),
    ]
}

// ─── Layering discipline ────────────────────────────────────────────────

#[test]
fn controls_only_write_declared_fields() {
    let starts = [
        TextStyles::default(),
        TextStyles {
            bold: true,
            font_size: 500,
            text_transform: TextTransform::Capitalize,
            list_style: ListStyle::Bullet,
            align: TextAlign::Right,
            ..TextStyles::default()
        },
    ];
    for current in &starts {
        for action in every_action() {
            let Some(patch) = action.patch(current) else {
                continue;
            };
            for field in patch.fields() {
                assert!(
                    action.writes().contains(&field),
                    "{action:?} wrote undeclared field {field:?}"
                );
            }
            let next = current.merged(&patch);
            let diff: Vec<StyleField> = current.diff(&next).fields().into_vec();
            assert!(diff.iter().all(|f| action.writes().contains(f)));
        }
    }
}

// ─── Scenarios ──────────────────────────────────────────────────────────

#[test]
fn align_right_changes_nothing_else() {
    let start = TextStyles {
        align: TextAlign::Left,
        bold: true,
        color: "#1b1b1b".into(),
        ..TextStyles::default()
    };
    let (mut session, id) = session_with("listing_address", start.clone());

    assert!(session.apply(&ToolbarAction::SetAlign(TextAlign::Right)));

    let styles = &session.layer().get(id).unwrap().styles;
    assert_eq!(
        *styles,
        TextStyles {
            align: TextAlign::Right,
            ..start
        }
    );
}

#[test]
fn font_size_entry_scenarios() {
    let (mut session, id) = session_with("price_banner", TextStyles::default());
    let size = |s: &EditorSession| s.layer().get(id).unwrap().styles.font_size;

    assert!(!session.apply(&ToolbarAction::FontSizeInput("twelve".into())));
    assert_eq!(size(&session), 16);

    session.apply(&ToolbarAction::FontSizeInput("1000".into()));
    assert_eq!(size(&session), 500);

    session.apply(&ToolbarAction::FontSizeInput("0".into()));
    assert_eq!(size(&session), 1);
}

#[test]
fn list_buttons_scenarios() {
    let (mut session, _) = session_with("features", TextStyles::default());

    session.apply(&ToolbarAction::ToggleList(ListStyle::Bullet));
    session.apply(&ToolbarAction::ToggleList(ListStyle::Numbered));
    assert_eq!(session.text_styles().unwrap().list_style, ListStyle::Numbered);

    session.apply(&ToolbarAction::ToggleList(ListStyle::Bullet));
    session.apply(&ToolbarAction::ToggleList(ListStyle::Bullet));
    assert_eq!(session.text_styles().unwrap().list_style, ListStyle::None);
}

#[test]
fn case_button_four_presses_round_trip() {
    let start = TextStyles {
        text_transform: TextTransform::Lowercase,
        ..TextStyles::default()
    };
    let (mut session, _) = session_with("tagline", start);
    for _ in 0..4 {
        session.apply(&ToolbarAction::ToggleCase);
    }
    assert_eq!(
        session.text_styles().unwrap().text_transform,
        TextTransform::Lowercase
    );
}

// ─── Multi-select & history ─────────────────────────────────────────────

#[test]
fn patch_applies_to_every_selected_object() {
    let mut session = EditorSession::default();
    let a = ObjectId::intern("beds");
    let b = ObjectId::intern("baths");
    session.insert_text(TextObject::new(a, "3 Beds"));
    session.insert_text(TextObject::new(b, "2 Baths"));
    session.select(&[a, b]);

    assert!(session.apply(&ToolbarAction::ToggleBold));
    assert!(session.layer().get(a).unwrap().styles.bold);
    assert!(session.layer().get(b).unwrap().styles.bold);

    // One undo reverts both objects.
    assert_eq!(session.undo(), Some("Bold".to_string()));
    assert!(!session.layer().get(a).unwrap().styles.bold);
    assert!(!session.layer().get(b).unwrap().styles.bold);
}

#[test]
fn color_drag_is_one_undo_step() {
    let (mut session, _) = session_with("headline", TextStyles::default());

    session.begin_gesture();
    for color in ["#ff0000", "#ff4400", "#ff8800"] {
        session.apply(&ToolbarAction::SetColor(color.into()));
    }
    session.end_gesture("Text color");

    assert_eq!(session.text_styles().unwrap().color, "#ff8800");
    assert_eq!(session.undo(), Some("Text color".to_string()));
    assert_eq!(session.text_styles().unwrap().color, "#000000");
    assert!(!session.can_undo());
    assert!(session.can_redo());
}
