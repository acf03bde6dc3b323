//! Per-file splitting of a word-diff text.
//!
//! A diff is a sequence of file blocks, each starting with a line
//! `diff --git a/<path> b/<path>`. The line after the header tells what kind
//! of change the block is, and the document body starts after the first
//! `@@` hunk line.

use docdelta_types::Action;

/// Token that starts every file block.
pub const FILE_SEPARATOR: &str = "diff --git";

/// Prefix of the hunk header line; the body starts on the line after it.
pub const HUNK_MARKER: &str = "@@";

/// Files that only exist to keep a directory in version control.
pub const PLACEHOLDER_MARKERS: &[&str] = &[".gitkeep"];

/// One file's segment of the diff.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiffBlock {
    /// Repository-relative path, taken from the `a/` side of the header.
    pub path: String,
    /// Change kind, read from the line after the header.
    pub action: Action,
    /// Annotated markdown following the hunk header.
    pub body: String,
}

/// Split `text` into file blocks, in input order.
///
/// Text before the first separator is not a file block and is ignored.
/// Blocks that are too short, have no usable path, or are placeholder
/// files are dropped.
pub fn split_blocks(text: &str) -> Vec<DiffBlock> {
    let mut blocks = Vec::new();
    let mut current: Option<Vec<&str>> = None;

    for line in text.split('\n') {
        if let Some(header) = line.strip_prefix(FILE_SEPARATOR) {
            if let Some(segment) = current.take() {
                blocks.extend(parse_block(&segment));
            }
            current = Some(vec![header]);
        } else if let Some(segment) = current.as_mut() {
            segment.push(line);
        }
    }
    if let Some(segment) = current.take() {
        blocks.extend(parse_block(&segment));
    }

    blocks
}

/// Parse one segment; `lines[0]` is the header with the separator removed.
fn parse_block(lines: &[&str]) -> Option<DiffBlock> {
    if lines.len() < 2 {
        tracing::debug!(header = lines.first().copied().unwrap_or(""), "dropping short diff block");
        return None;
    }

    let Some(path) = header_path(lines[0]) else {
        tracing::debug!(header = lines[0], "dropping diff block without a path");
        return None;
    };

    if is_placeholder(&path) {
        tracing::debug!(%path, "dropping placeholder file");
        return None;
    }

    let action = classify_action(lines[1]);

    let body = lines
        .iter()
        .position(|line| line.starts_with(HUNK_MARKER))
        .map(|hunk| lines[hunk + 1..].join("\n"))
        .unwrap_or_default();

    Some(DiffBlock { path, action, body })
}

/// Extract the `a/`-side path from a header line.
///
/// Falls back to the first token when no token carries the `a/` prefix.
pub fn header_path(header: &str) -> Option<String> {
    let mut tokens = header.split_whitespace();
    let first = tokens.next()?;
    let token = std::iter::once(first)
        .chain(tokens)
        .find(|t| t.starts_with("a/"))
        .unwrap_or(first);
    let path = token.strip_prefix("a/").unwrap_or(token);
    (!path.is_empty()).then(|| path.to_string())
}

/// Classify a block by the line that follows its header.
pub fn classify_action(line: &str) -> Action {
    if line.starts_with("new file mode") {
        Action::Add
    } else if line.starts_with("deleted file mode") {
        Action::Delete
    } else if line.starts_with("similarity index") {
        Action::Rename
    } else {
        Action::Change
    }
}

fn is_placeholder(path: &str) -> bool {
    PLACEHOLDER_MARKERS.iter().any(|marker| path.contains(marker))
}
