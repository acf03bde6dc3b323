//! HTTP API for docdelta.
//!
//! Serves the version list, the allowed version ranges for a selection and
//! rendered diffs with their heading outline as JSON.

pub mod error;
pub mod handler;
pub mod router;
pub mod server;

pub use docdelta_sdk::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use router::{build_router, AppState};
pub use server::DocdeltaServer;
