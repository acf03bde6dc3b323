//! Per-file diff parsing with block-level isolation.

use std::sync::Arc;

use docdelta_render::MarkdownRenderer;
use docdelta_types::FileDiff;

use crate::error::{DiffError, DiffResult};
use crate::inline::render_document;
use crate::markup::reconstruct;
use crate::splitter::{split_blocks, DiffBlock};
use crate::title::{beautify_filename, TitleRules};

/// Turns word-diff text into rendered [`FileDiff`]s.
///
/// The parser holds no mutable state; one value can serve any number of
/// requests, including concurrently.
#[derive(Clone)]
pub struct DiffParser {
    renderer: Arc<dyn MarkdownRenderer>,
    title_rules: TitleRules,
}

impl DiffParser {
    pub fn new(renderer: Arc<dyn MarkdownRenderer>) -> Self {
        Self {
            renderer,
            title_rules: TitleRules::default(),
        }
    }

    pub fn with_title_rules(mut self, rules: TitleRules) -> Self {
        self.title_rules = rules;
        self
    }

    pub fn title_rules(&self) -> &TitleRules {
        &self.title_rules
    }

    /// Parse every file block of `text`, in input order.
    ///
    /// A block that fails to render is logged and left out; the remaining
    /// blocks are still parsed.
    pub fn parse(&self, text: &str) -> Vec<FileDiff> {
        split_blocks(text)
            .iter()
            .enumerate()
            .filter_map(|(index, block)| match self.parse_block(block) {
                Ok(diff) => Some(diff),
                Err(e) => {
                    tracing::warn!(index, path = %block.path, error = %e, "skipping diff block");
                    None
                }
            })
            .collect()
    }

    /// Render a single block.
    pub fn parse_block(&self, block: &DiffBlock) -> DiffResult<FileDiff> {
        let title = beautify_filename(&block.path, &self.title_rules);
        if title.is_empty() {
            return Err(DiffError::EmptyTitle(block.path.clone()));
        }

        let renderer = self.renderer.as_ref();
        let regrouped = reconstruct(&block.body, renderer)?;
        let content = render_document(&regrouped, renderer)?;

        tracing::debug!(path = %block.path, action = %block.action, bytes = content.len(), "parsed diff block");
        Ok(FileDiff {
            title,
            action: block.action,
            content,
        })
    }
}

impl std::fmt::Debug for DiffParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiffParser")
            .field("title_rules", &self.title_rules)
            .finish_non_exhaustive()
    }
}
