//! # Hearth Editor
//!
//! Editing engine for Hearth pages.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ shell: pointer/keyboard input               │
//! └─────────────────────────────────────────────┘
//!            ↓ DragEvent            ↓ Action
//! ┌──────────────────────┐   ┌──────────────────┐
//! │ DragMachine          │──▶│ Reducer / Store  │
//! │  - hover + intent    │   │  - tree edits    │
//! │  - commit on drop    │   │  - history       │
//! └──────────────────────┘   │  - clipboard     │
//!                            └──────────────────┘
//!                                    ↓
//! ┌─────────────────────────────────────────────┐
//! │ EditorState (page, selection, history, ...) │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Total reducer**: a rejected action returns the input state
//! 2. **Snapshots**: the page is replaced wholesale, never edited in place
//! 3. **Explicit registry**: the component registry is injected, not global
//!
//! ## Usage
//!
//! ```rust,ignore
//! use hearth_components::bakery_registry;
//! use hearth_editor::{Action, EditorState, Reducer, Store};
//! use std::sync::Arc;
//!
//! let reducer = Reducer::new(Arc::new(bakery_registry()));
//! let mut store = Store::with_state(reducer, EditorState::with_page(page));
//!
//! store.dispatch(Action::AddComponent {
//!     parent_id: None,
//!     component_type: "Title".to_string(),
//!     index: 0,
//! });
//! store.dispatch(Action::Undo);
//! ```

pub mod actions;
pub mod dragdrop;
pub mod history;
pub mod reducer;
pub mod state;
pub mod validation;

pub use actions::Action;
pub use dragdrop::{
    resolve_intent, DragEvent, DragMachine, DragSource, DragState, DropCommit, DropIntent,
    DropTarget, Rect,
};
pub use history::{History, MAX_HISTORY};
pub use reducer::{DispatchOutcome, Reducer, Store};
pub use state::{ClipboardEntry, ClipboardMode, ContextMenuState, EditorState, SidebarTab};
pub use validation::{validate_instance, validate_page, ValidationError};
