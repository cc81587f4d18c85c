//! # Hearth Components
//!
//! The component registry: which component types exist, how each renders to
//! a virtual DOM node, and which props it accepts.
//!
//! The registry is an immutable value constructed at startup and handed to
//! whoever needs it:
//!
//! ```rust,ignore
//! use hearth_components::{bakery_registry, Category};
//! use std::sync::Arc;
//!
//! let registry = Arc::new(bakery_registry());
//! for category in registry.get_categories() {
//!     println!("{}: {}", category.label(), registry.get_by_category(category).len());
//! }
//! ```

mod library;
mod registry;
pub mod schema;
pub mod vdom;

pub use library::{bakery_entries, bakery_registry, format_ratio, parse_ratio, try_bakery_registry};
pub use registry::{
    Category, ComponentRegistry, ComponentView, RegistryBuilder, RegistryEntry, RegistryError,
    ViewError,
};
pub use schema::{EditorHint, PropConstraints, PropDefinition, PropKind, SelectOption, VisibleWhen};
pub use vdom::{DomEvent, Listener, VNode};
