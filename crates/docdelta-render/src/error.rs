//! Error types for the render crate.

/// Errors that can occur while rendering markdown.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The underlying engine rejected the input.
    #[error("markdown engine error: {0}")]
    Engine(String),

    /// The input exceeded the configured size limit.
    #[error("input too large: {size} bytes (limit {limit})")]
    InputTooLarge { size: usize, limit: usize },
}

/// Convenience alias for render results.
pub type RenderResult<T> = Result<T, RenderError>;
