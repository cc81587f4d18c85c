//! # Hearth Document
//!
//! Serializable page model for the Hearth page builder.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ PageDocument                                │
//! │  - metadata (title, description, ...)       │
//! │  - settings (layout, background, spacing)   │
//! │  - components: Vec<ComponentInstance>       │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ ComponentInstance                           │
//! │  - id (unique across the whole tree)        │
//! │  - componentType (registry key)             │
//! │  - props (open JSON object)                 │
//! │  - children (containers only)               │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! All structural edits go through [`tree`], which addresses nodes by path
//! (index sequence from the root list) so that lookup, removal, insertion and
//! the cycle check share one traversal.

mod id_generator;
mod instance;
mod page;
pub mod tree;
mod visitor;

pub use id_generator::{IdGenerator, SequentialIds, UuidGenerator};
pub use instance::{create_component_instance, ComponentInstance, Props};
pub use page::{
    create_page, Background, BackgroundKind, LayoutVariant, PageDocument, PageDraft, PageMetadata,
    PageSettings, SpacingVariant,
};
pub use tree::{TreeError, TreePath};
pub use visitor::{walk_instance, walk_page, Visitor};
