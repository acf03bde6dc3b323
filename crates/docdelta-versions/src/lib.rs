//! Version range filtering.
//!
//! A comparison runs from an older `source` version to a newer `target`
//! version. [`allowed_range`] narrows the selectable options on each side so
//! a user can never pick a source newer than the target or a target older
//! than the source.

pub mod error;
pub mod range;

pub use error::{VersionError, VersionResult};
pub use range::{allowed_range, AllowedVersions};
