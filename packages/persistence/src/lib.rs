//! # Hearth Persistence
//!
//! Loading and saving pages.
//!
//! Pages come from two places: a read-only set of bundled defaults and a
//! writable [`OverrideStore`]. [`PageService`] merges them, with stored
//! pages shadowing bundled ones that share an id. Deleting an override
//! brings the bundled default back.

mod bundled;
mod error;
mod service;
mod store;
mod transfer;

pub use bundled::BundledPages;
pub use error::{ImportIssue, PersistenceError, Result};
pub use service::PageService;
pub use store::{FileStore, MemoryStore, NullStore, OverrideStore};
pub use transfer::{export_page_as_json, import_page_from_json};
