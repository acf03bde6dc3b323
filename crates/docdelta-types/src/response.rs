use serde::{Deserialize, Serialize};

use crate::file_diff::FileDiff;
use crate::heading::HeadingNode;

/// Parsed diffs plus their heading outline, as served to the rendering layer.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffResponse {
    pub diff: Vec<FileDiff>,
    pub headings: Vec<HeadingNode>,
}

impl DiffResponse {
    pub fn new(diff: Vec<FileDiff>, headings: Vec<HeadingNode>) -> Self {
        Self { diff, headings }
    }

    /// The fallback shown when no diff could be produced.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.diff.is_empty() && self.headings.is_empty()
    }
}
