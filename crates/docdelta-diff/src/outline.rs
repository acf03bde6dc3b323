//! Change-aware heading outline.
//!
//! Scans rendered documents for headings that carry an `id`, classifies each
//! one by its `<ins>`/`<del>` markup, and nests them into a forest with an
//! explicit depth stack.

use docdelta_types::{FileDiff, HeadingNode, HeadingType};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::inline::SpanKind;

static HEADING_OPEN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?:<(ins|del)>\s*)?<h([1-6])[^>]*?\sid="([^"]+)"[^>]*>"#).expect("heading pattern")
});
static DEL_TEXT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<del>(.*?)</del>").expect("del pattern"));
static INS_TEXT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<ins>(.*?)</ins>").expect("ins pattern"));

/// Outline scanning options.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutlineOptions {
    /// Deepest heading level included in the outline.
    pub max_level: u8,
}

impl Default for OutlineOptions {
    fn default() -> Self {
        Self { max_level: 4 }
    }
}

/// Build the heading forest for a sequence of rendered documents.
///
/// Nesting runs across document boundaries: a level-2 heading at the top of
/// one document nests under the last level-1 heading of the previous one.
pub fn build_outline(diffs: &[FileDiff], options: &OutlineOptions) -> Vec<HeadingNode> {
    let mut builder = OutlineBuilder::new();
    for diff in diffs {
        for heading in extract_headings(&diff.content, options) {
            builder.push(heading);
        }
    }
    builder.finish()
}

/// Extract headings from one rendered document, flat and in source order.
pub fn extract_headings(html: &str, options: &OutlineOptions) -> Vec<HeadingNode> {
    let mut headings = Vec::new();
    let mut pos = 0;

    while let Some(caps) = HEADING_OPEN_RE.captures_at(html, pos) {
        let Some(open) = caps.get(0) else { break };
        pos = open.end();

        let Some(level) = caps.get(2).and_then(|m| m.as_str().parse::<u8>().ok()) else {
            continue;
        };
        let close = format!("</h{level}>");
        let Some(inner_len) = html[open.end()..].find(&close) else {
            continue;
        };
        let inner = &html[open.end()..open.end() + inner_len];
        let after = open.end() + inner_len + close.len();
        pos = after;

        if level > options.max_level {
            continue;
        }

        // A wrapper only counts when its closing tag follows the heading.
        let wrapper = caps
            .get(1)
            .and_then(|m| SpanKind::from_tag(m.as_str()))
            .filter(|kind| html[after..].trim_start().starts_with(&format!("</{}>", kind.tag())));

        let kind = classify(wrapper, inner);
        let id = caps.get(3).map(|m| m.as_str()).unwrap_or_default();
        match HeadingNode::new(id, clean_title(kind, inner), kind, level) {
            Ok(node) => headings.push(node),
            Err(e) => tracing::debug!(%id, error = %e, "skipping heading"),
        }
    }

    headings
}

/// Classify a heading; an outer wrapper takes precedence over its content.
pub fn classify(wrapper: Option<SpanKind>, inner: &str) -> HeadingType {
    match wrapper {
        Some(SpanKind::Inserted) => HeadingType::Inserted,
        Some(SpanKind::Deleted) => HeadingType::Deleted,
        None => match (inner.contains("<del>"), inner.contains("<ins>")) {
            (true, true) => HeadingType::Replaced,
            (true, false) => HeadingType::Deleted,
            (false, true) => HeadingType::Inserted,
            (false, false) => HeadingType::Normal,
        },
    }
}

/// Display title for a heading of the given type.
pub fn clean_title(kind: HeadingType, inner: &str) -> String {
    let inner = inner.trim();
    match kind {
        HeadingType::Replaced => {
            let first = |re: &Regex| {
                re.captures(inner)
                    .and_then(|c| c.get(1))
                    .map(|m| m.as_str().trim().to_string())
                    .unwrap_or_default()
            };
            format!("{} → {}", first(&DEL_TEXT_RE), first(&INS_TEXT_RE))
        }
        HeadingType::Deleted => inner.replace("<del>", "").replace("</del>", "").trim().to_string(),
        HeadingType::Inserted => inner.replace("<ins>", "").replace("</ins>", "").trim().to_string(),
        HeadingType::Normal => inner.to_string(),
    }
}

/// Stack-based forest assembly.
///
/// Pushing a heading first closes every open heading at the same or a deeper
/// level; the heading then becomes a child of the remaining top, or a new
/// root when nothing remains open.
#[derive(Debug, Default)]
pub struct OutlineBuilder {
    roots: Vec<HeadingNode>,
    stack: Vec<HeadingNode>,
}

impl OutlineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, heading: HeadingNode) {
        while self.stack.last().is_some_and(|top| top.level >= heading.level) {
            self.close_top();
        }
        self.stack.push(heading);
    }

    pub fn finish(mut self) -> Vec<HeadingNode> {
        while !self.stack.is_empty() {
            self.close_top();
        }
        self.roots
    }

    fn close_top(&mut self) {
        let Some(node) = self.stack.pop() else { return };
        match self.stack.last_mut() {
            Some(parent) => parent.children.push(node),
            None => self.roots.push(node),
        }
    }
}
