//! High-level docdelta API.
//!
//! [`DocDelta`] wires configuration, the diff stores and the parsing pipeline
//! together. It is the entry point for the HTTP server and the CLI.

pub mod config;
pub mod error;
pub mod service;

pub use config::{DocdeltaConfig, ServerConfig};
pub use error::{SdkError, SdkResult};
pub use service::{DiffKind, DiffRequest, DocDelta};

// Re-export key types
pub use docdelta_diff::{OutlineOptions, TitleRules};
pub use docdelta_render::RenderOptions;
pub use docdelta_types::{Action, DiffResponse, FileDiff, HeadingNode, HeadingType, VersionTag};
pub use docdelta_versions::AllowedVersions;
