//! Stored word-diff lookup.
//!
//! Precomputed diffs are stored one file per version pair, named
//! `<source>__<target>` plus an arbitrary suffix (typically `.diff`). This
//! crate finds and reads them and derives the list of known versions from
//! the stored names.
//!
//! # Storage Backends
//!
//! All backends implement the [`DiffStore`] trait:
//!
//! - [`FsDiffStore`]: a directory of diff files
//! - [`InMemoryDiffStore`]: `BTreeMap`-based store for tests and embedding

pub mod catalog;
pub mod error;
pub mod fs;
pub mod memory;
pub mod traits;

pub use catalog::{list_versions, PAIR_SEPARATOR};
pub use error::{StoreError, StoreResult};
pub use fs::FsDiffStore;
pub use memory::InMemoryDiffStore;
pub use traits::DiffStore;
