use docdelta_types::TypeError;
use thiserror::Error;

/// Errors produced while filtering versions.
#[derive(Debug, Error)]
pub enum VersionError {
    #[error("unparsable {side} version: {source}")]
    Unparsable {
        side: &'static str,
        #[source]
        source: TypeError,
    },
}

pub type VersionResult<T> = Result<T, VersionError>;
