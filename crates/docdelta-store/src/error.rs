use std::path::PathBuf;

/// Errors from diff store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No stored diff covers the requested version pair.
    #[error("no diff stored for {from}__{to}")]
    DiffNotFound { from: String, to: String },

    /// A named entry does not exist.
    #[error("diff not found: {0}")]
    NotFound(String),

    /// The store directory is missing or not a directory.
    #[error("diff directory unavailable: {}", .0.display())]
    MissingDirectory(PathBuf),

    /// I/O error from the underlying storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
