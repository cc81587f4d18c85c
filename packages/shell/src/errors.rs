use hearth_persistence::PersistenceError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShellError {
    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),

    #[error("Page not found: {0}")]
    PageNotFound(String),

    #[error("Editor is not ready")]
    NotReady,

    #[error("Cannot save while {0} validation error(s) remain")]
    ValidationBlocked(usize),

    #[error("A save is already in progress")]
    AlreadySaving,

    #[error("No unsaved changes")]
    NothingToSave,

    #[error("No component selected")]
    NoSelection,

    #[error("{field}: {message}")]
    InvalidField { field: String, message: String },
}

pub type Result<T> = std::result::Result<T, ShellError>;
