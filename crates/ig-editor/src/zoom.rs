//! Zoom controls built on the view store: the `-` / `+` buttons, the
//! percentage dropdown and its free-text entry, and "fit to screen".

use crate::config::EditorConfig;
use crate::store::ViewStore;
use ig_core::{MAX_ZOOM, MIN_ZOOM, ZOOM_PRESETS, ZOOM_STEP};
use ig_core::{parse_zoom_entry, step_zoom};

/// Zoom operations over a borrowed store.
///
/// Holds no state of its own; any number of controls can drive the same
/// store and they all observe the same value.
#[derive(Debug, Clone, Copy)]
pub struct ZoomControls<'a> {
    store: &'a ViewStore,
    step: f64,
    presets: &'a [u32],
}

impl<'a> ZoomControls<'a> {
    pub fn new(store: &'a ViewStore) -> Self {
        Self {
            store,
            step: ZOOM_STEP,
            presets: &ZOOM_PRESETS,
        }
    }

    /// Controls using the configured step and dropdown presets.
    pub fn from_config(store: &'a ViewStore, config: &'a EditorConfig) -> Self {
        Self {
            store,
            step: config.zoom_step,
            presets: &config.zoom_presets,
        }
    }

    /// `min(MAX_ZOOM, zoom + step)`. No-op at 400%.
    pub fn zoom_in(&self) -> bool {
        let next = step_zoom(self.store.zoom(), self.step).min(MAX_ZOOM);
        self.store.set_zoom(next)
    }

    /// `max(MIN_ZOOM, zoom - step)`. No-op at 10%.
    pub fn zoom_out(&self) -> bool {
        let next = step_zoom(self.store.zoom(), -self.step).max(MIN_ZOOM);
        self.store.set_zoom(next)
    }

    /// Jump to a percentage, e.g. a dropdown preset.
    pub fn zoom_to(&self, percentage: f64) -> bool {
        self.store.set_zoom(percentage / 100.0)
    }

    /// Apply typed zoom entry. Unparseable text is ignored.
    pub fn zoom_to_entry(&self, text: &str) -> bool {
        match parse_zoom_entry(text) {
            Some(percentage) => self.zoom_to(percentage),
            None => {
                log::debug!("zoom entry {text:?} ignored");
                false
            }
        }
    }

    /// Reset to 100% and recenter.
    // TODO: measure the artboard against the viewport instead of snapping to 100%.
    pub fn fit_to_screen(&self) -> bool {
        self.store.reset()
    }

    pub fn presets(&self) -> &'a [u32] {
        self.presets
    }

    pub fn percentage(&self) -> u32 {
        self.store.zoom_percentage()
    }

    /// Text shown between the zoom buttons, e.g. `"130%"`.
    pub fn label(&self) -> String {
        format!("{}%", self.percentage())
    }

    pub fn can_zoom_in(&self) -> bool {
        self.store.zoom() < MAX_ZOOM
    }

    pub fn can_zoom_out(&self) -> bool {
        self.store.zoom() > MIN_ZOOM
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ig_core::{Vec2, ViewState};
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn zoom_in_three_times() {
        let store = ViewStore::new();
        let zoom = ZoomControls::new(&store);
        for _ in 0..3 {
            zoom.zoom_in();
        }
        assert_eq!(store.zoom(), 1.3);
        assert_eq!(zoom.label(), "130%");
    }

    #[test]
    fn saturates_at_bounds() {
        let store = ViewStore::new();
        let zoom = ZoomControls::new(&store);

        store.set_zoom(MAX_ZOOM);
        assert!(!zoom.zoom_in());
        assert!(!zoom.can_zoom_in());
        assert_eq!(store.zoom(), MAX_ZOOM);

        store.set_zoom(MIN_ZOOM);
        assert!(!zoom.zoom_out());
        assert!(!zoom.can_zoom_out());
        assert_eq!(store.zoom(), MIN_ZOOM);
    }

    #[test]
    fn presets_and_entry() {
        let store = ViewStore::new();
        let zoom = ZoomControls::new(&store);

        for preset in zoom.presets() {
            zoom.zoom_to(f64::from(*preset));
            assert_eq!(zoom.percentage(), *preset);
        }

        assert!(zoom.zoom_to_entry("75%"));
        assert_eq!(zoom.label(), "75%");
        assert!(!zoom.zoom_to_entry("huge"));
        assert_eq!(zoom.label(), "75%");

        zoom.zoom_to_entry("1000");
        assert_eq!(zoom.label(), "400%");
    }

    #[test]
    fn fit_resets_zoom_and_pan() {
        let store = ViewStore::new();
        store.set_zoom(2.4);
        store.set_pan(Vec2::new(120.0, -40.0));

        let zoom = ZoomControls::new(&store);
        assert!(zoom.fit_to_screen());
        assert_eq!(store.zoom(), 1.0);
        assert_eq!(store.state().pan(), Vec2::ZERO);
        assert!(!zoom.fit_to_screen());
    }

    #[test]
    fn fit_notifies_once_with_final_state() {
        let store = ViewStore::new();
        store.set_zoom(3.0);
        store.set_pan(Vec2::new(-60.0, 25.0));

        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        store.subscribe(move |state| sink.borrow_mut().push(*state));

        ZoomControls::new(&store).fit_to_screen();
        assert_eq!(*seen.borrow(), vec![ViewState::default()]);
    }

    #[test]
    fn configured_step_and_presets() {
        let store = ViewStore::new();
        let config = EditorConfig {
            zoom_step: 0.25,
            zoom_presets: vec![25, 75, 300],
            ..EditorConfig::default()
        };
        let zoom = ZoomControls::from_config(&store, &config);
        zoom.zoom_in();
        zoom.zoom_in();
        assert_eq!(zoom.label(), "150%");
        assert_eq!(zoom.presets(), &[25, 75, 300]);
    }
}
