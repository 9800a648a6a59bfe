//! Canvas view state: zoom factor and pan offset.
//!
//! Zoom is a ratio constrained to `[MIN_ZOOM, MAX_ZOOM]` (10%–400%).
//! Every mutator funnels through `clamp_zoom`, so a `ViewState` can never
//! hold an out-of-range zoom, including one built by deserialization.

use kurbo::{Affine, Point, Vec2};
use serde::{Deserialize, Serialize};

pub const MIN_ZOOM: f64 = 0.1;
pub const MAX_ZOOM: f64 = 4.0;
pub const DEFAULT_ZOOM: f64 = 1.0;
/// Increment applied by a single zoom-in / zoom-out.
pub const ZOOM_STEP: f64 = 0.1;
/// Percentages offered by the zoom dropdown.
pub const ZOOM_PRESETS: [u32; 3] = [50, 100, 200];

/// Clamp a zoom ratio into `[MIN_ZOOM, MAX_ZOOM]`.
///
/// NaN is returned unchanged; `ViewState::set_zoom` rejects it.
pub fn clamp_zoom(zoom: f64) -> f64 {
    zoom.clamp(MIN_ZOOM, MAX_ZOOM)
}

/// Strip floating-point noise from accumulated steps (1.1 + 0.1 → 1.2, not
/// 1.2000000000000002).
fn snap(zoom: f64) -> f64 {
    (zoom * 1e9).round() / 1e9
}

/// `current + delta`, snapped and clamped. Used by zoom-in (positive delta)
/// and zoom-out (negative delta).
pub fn step_zoom(current: f64, delta: f64) -> f64 {
    clamp_zoom(snap(current + delta))
}

/// Display percentage for a zoom ratio: `round(zoom * 100)`.
pub fn zoom_percentage(zoom: f64) -> u32 {
    (clamp_zoom(zoom) * 100.0).round() as u32
}

/// Zoom and pan of the canvas viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawViewState")]
pub struct ViewState {
    zoom: f64,
    /// Offset of the canvas origin in screen pixels.
    pan: Vec2,
}

/// Unchecked wire shape; converted through `From` so that deserialized
/// state is clamped like any other mutation.
#[derive(Deserialize)]
struct RawViewState {
    zoom: f64,
    #[serde(default)]
    pan: Vec2,
}

impl From<RawViewState> for ViewState {
    fn from(raw: RawViewState) -> Self {
        let mut state = Self::default();
        state.set_zoom(raw.zoom);
        state.set_pan(raw.pan);
        state
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            zoom: DEFAULT_ZOOM,
            pan: Vec2::ZERO,
        }
    }
}

impl ViewState {
    pub fn new(zoom: f64) -> Self {
        let mut state = Self::default();
        state.set_zoom(zoom);
        state
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn pan(&self) -> Vec2 {
        self.pan
    }

    pub fn zoom_percentage(&self) -> u32 {
        zoom_percentage(self.zoom)
    }

    /// Set the zoom ratio, clamping into range. NaN is ignored.
    /// Returns `true` if the stored value changed.
    pub fn set_zoom(&mut self, zoom: f64) -> bool {
        if zoom.is_nan() {
            return false;
        }
        let next = clamp_zoom(zoom);
        if next == self.zoom {
            return false;
        }
        self.zoom = next;
        true
    }

    /// Set the pan offset. Non-finite offsets are ignored.
    pub fn set_pan(&mut self, pan: Vec2) -> bool {
        if !pan.is_finite() || pan == self.pan {
            return false;
        }
        self.pan = pan;
        true
    }

    /// Zoom to `zoom` while keeping the canvas point under `anchor`
    /// (a screen position, e.g. the cursor) fixed on screen.
    pub fn zoom_about(&mut self, zoom: f64, anchor: Point) -> bool {
        let pinned = self.screen_to_canvas(anchor);
        if !self.set_zoom(zoom) {
            return false;
        }
        self.pan = anchor.to_vec2() - pinned.to_vec2() * self.zoom;
        true
    }

    /// Canvas → screen transform: scale by zoom, then translate by pan.
    pub fn view_transform(&self) -> Affine {
        Affine::translate(self.pan) * Affine::scale(self.zoom)
    }

    pub fn canvas_to_screen(&self, point: Point) -> Point {
        self.view_transform() * point
    }

    pub fn screen_to_canvas(&self, point: Point) -> Point {
        self.view_transform().inverse() * point
    }
}
