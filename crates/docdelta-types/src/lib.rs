//! Foundation types for docdelta.
//!
//! This crate provides the value types shared by every other docdelta crate.
//! All of them are plain data: they are built once per request and never
//! mutated afterwards.
//!
//! # Key Types
//!
//! - [`FileDiff`] / [`Action`]: One rendered document diff and its change kind
//! - [`HeadingNode`] / [`HeadingType`]: Change-aware outline of document headings
//! - [`VersionTag`] / [`SemVer`]: Document versions and their comparable form
//! - [`DiffResponse`]: The payload handed to the rendering layer

pub mod error;
pub mod file_diff;
pub mod heading;
pub mod response;
pub mod version;

pub use error::TypeError;
pub use file_diff::{Action, FileDiff};
pub use heading::{HeadingNode, HeadingType};
pub use response::DiffResponse;
pub use version::{SemVer, VersionTag};
