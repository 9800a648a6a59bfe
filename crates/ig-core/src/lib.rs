pub mod id;
pub mod keys;
pub mod parse;
pub mod style;
pub mod view;

pub use id::ObjectId;
pub use keys::{KeyChord, KeyInput};
pub use parse::{parse_chord, parse_font_size, parse_zoom_entry};
pub use style::*;
pub use view::*;

// Re-export kurbo geometry so downstream crates don't need a direct dependency
pub use kurbo::{Affine, Point, Vec2};
