//! # Hearth Shell
//!
//! Editor screen orchestration on top of `hearth-editor`.
//!
//! The shell holds no tree logic of its own. Every document change is an
//! [`hearth_editor::Action`] dispatched through [`EditorSession`], and every
//! panel (palette, layers, property form, context menu, header) is a view
//! model computed from the current [`hearth_editor::EditorState`].
//!
//! ## Example
//!
//! ```ignore
//! let service = Arc::new(PageService::new(BundledPages::builtin(), MemoryStore::new()));
//! let mut session = EditorSession::new(Arc::new(bakery_registry()), service);
//! session.open("home").await?;
//! session.add_from_palette("Title");
//! session.save().await?;
//! ```

mod canvas;
mod context_menu;
mod errors;
mod header;
mod keymap;
mod layers;
mod palette;
mod property_panel;
mod session;

pub use canvas::{compose_canvas, AutoScroller, CanvasView, Viewport, ROOT_ZONE_CLASS};
pub use context_menu::{command_action, context_menu_items, paste_position, MenuCommand, MenuItem};
pub use errors::{Result, ShellError};
pub use header::HeaderView;
pub use keymap::{Command, KeyChord, Keymap};
pub use layers::{layer_rows, LayerRow};
pub use palette::{click_to_add, palette_groups, PaletteGroup, PaletteItem};
pub use property_panel::{
    parse_field_input, property_form, rebalance_ratio, update_field, FieldControl, FormField,
    PropertyForm,
};
pub use session::{CanvasEvent, EditorSession, ExitDecision, KeyOutcome, LoadStatus};
