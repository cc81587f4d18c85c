use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Page not found: {0}")]
    NotFound(String),

    #[error("No client context: the override store is not writable")]
    NoClientContext,

    #[error("Slug '{slug}' is already used by page {page_id}")]
    SlugTaken { slug: String, page_id: String },

    #[error("Invalid page id: {0:?}")]
    InvalidId(String),

    #[error("Invalid page file {path}: {message}")]
    InvalidPage { path: PathBuf, message: String },

    #[error("Import failed with {} issue(s)", .0.len())]
    Import(Vec<ImportIssue>),
}

impl PersistenceError {
    /// Issues reported by a failed import, empty for other errors
    pub fn import_issues(&self) -> &[ImportIssue] {
        match self {
            PersistenceError::Import(issues) => issues,
            _ => &[],
        }
    }
}

/// One problem found while importing a page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportIssue {
    /// JSON path, e.g. `$.components[2].componentType`
    pub path: String,
    pub message: String,
}

impl ImportIssue {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ImportIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

pub type Result<T> = std::result::Result<T, PersistenceError>;
