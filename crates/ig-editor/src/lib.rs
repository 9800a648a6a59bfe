pub mod commands;
pub mod config;
pub mod selection;
pub mod session;
pub mod shortcuts;
pub mod store;
pub mod toolbar;
pub mod zoom;

pub use commands::CommandStack;
pub use config::EditorConfig;
pub use selection::{StyleChange, TextLayer, TextObject};
pub use session::EditorSession;
pub use shortcuts::{KeyOutcome, ShortcutAction, ShortcutMap};
pub use store::{SubscriptionId, ViewStore};
pub use toolbar::ToolbarAction;
pub use zoom::ZoomControls;
