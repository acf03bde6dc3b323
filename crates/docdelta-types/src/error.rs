use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid version {name:?}: {reason}")]
    InvalidVersion { name: String, reason: String },

    #[error("invalid heading level: {0} (expected 1..=6)")]
    InvalidHeadingLevel(u8),

    #[error("unknown action: {0}")]
    UnknownAction(String),
}
