//! Markdown rendering for docdelta.
//!
//! The diff pipeline never talks to a markdown engine directly. It receives a
//! [`MarkdownRenderer`] value at construction time and calls it for every
//! fragment it needs rendered: table cells, list items, annotated spans and
//! finally each whole document.
//!
//! [`CmarkRenderer`] is the default implementation, backed by
//! `pulldown-cmark`. It assigns every heading a deterministic id made of a
//! fixed prefix and a GitHub-style slug of the heading text, so later stages
//! can match headings by id.

pub mod error;
pub mod renderer;
pub mod slug;

pub use error::{RenderError, RenderResult};
pub use renderer::{CmarkRenderer, MarkdownRenderer, RenderOptions, DEFAULT_HEADING_PREFIX};
pub use slug::Slugger;
