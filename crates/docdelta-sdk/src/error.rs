use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SdkError {
    #[error("no versions available")]
    NoVersions,

    #[error("failed to read config {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid environment override {name}: {reason}")]
    InvalidEnv { name: &'static str, reason: String },

    #[error("store error: {0}")]
    Store(#[from] docdelta_store::StoreError),

    #[error("version error: {0}")]
    Version(#[from] docdelta_versions::VersionError),
}

pub type SdkResult<T> = Result<T, SdkError>;
