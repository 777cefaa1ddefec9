use std::path::PathBuf;

/// Failures surfaced by the document model. All of them leave the model usable.
#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    /// Not JSON, or JSON without the lore-book shape.
    #[error("malformed document: {0}")]
    MalformedDocument(String),
    /// An identifier or position that does not exist.
    #[error("not found: {0}")]
    NotFound(String),
    /// Disallowed in the current mode; callers report it and carry on.
    #[error("{0}")]
    InvalidOperation(String),
    #[error("cannot access {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl EditorError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        EditorError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, EditorError>;
