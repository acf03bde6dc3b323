//! Error types for the diff crate.

use docdelta_render::RenderError;

/// Errors that can occur while turning a diff block into a [`FileDiff`](docdelta_types::FileDiff).
#[derive(Debug, thiserror::Error)]
pub enum DiffError {
    /// The markdown renderer failed on part of the block.
    #[error("render error: {0}")]
    Render(#[from] RenderError),

    /// The block's path does not produce a display title.
    #[error("no display title for path {0:?}")]
    EmptyTitle(String),
}

/// Convenience alias for diff results.
pub type DiffResult<T> = Result<T, DiffError>;
