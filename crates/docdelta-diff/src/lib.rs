//! Word-diff parsing for docdelta.
//!
//! Turns a `git diff --word-diff` style text of markdown documents, where
//! changed spans are marked `{+inserted+}` and `[-deleted-]`, into rendered
//! HTML per document plus a change-aware heading outline.
//!
//! Stages, in pipeline order:
//!
//! - [`splitter`]: per-file blocks, their path and [`Action`](docdelta_types::Action)
//! - [`markup`]: regroups diffed table rows and list items into HTML containers
//! - [`inline`]: resolves the remaining annotations and renders the document
//! - [`title`]: turns a document path into a breadcrumb title
//! - [`outline`]: builds the heading forest from rendered documents
//!
//! [`DiffParser`] runs the per-file stages with block-level isolation: a
//! block that fails to render is logged and skipped, never aborting its
//! siblings.

pub mod error;
pub mod inline;
pub mod markup;
pub mod outline;
pub mod parser;
pub mod splitter;
pub mod title;

pub use error::{DiffError, DiffResult};
pub use inline::SpanKind;
pub use outline::{build_outline, extract_headings, OutlineBuilder, OutlineOptions};
pub use parser::DiffParser;
pub use splitter::{split_blocks, DiffBlock};
pub use title::{beautify_filename, TitleRules};
