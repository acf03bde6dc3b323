//! Reconstruction of tables and lists broken up by line-level diffing.
//!
//! Word diffs annotate each changed table row or list item separately, which
//! leaves markdown that no longer parses as a table or list. Two passes, run
//! in order, regroup contiguous rows and items into ready HTML containers:
//!
//! 1. [`group_tables`]: rows wrapped whole in a marker become `<table>` rows
//! 2. [`group_lists`]: bullet or numbered items become `<ul>`/`<ol>` items
//!
//! Every emitted container is followed by a blank line so the final markdown
//! render ends its HTML block there. Other lines pass through unchanged,
//! including any inline annotations they carry. Unmarked table rows and rows
//! with edits inside their cells are left to the inline pass and the final
//! markdown render.

use docdelta_render::{MarkdownRenderer, RenderResult};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::inline::{DEL_CLOSE, DEL_OPEN, INS_CLOSE, INS_OPEN};

static TABLE_ROW_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?:\{\+|\[-)\|.*\|(?:\+\}|-\])\s*$").expect("table row pattern")
});
static TABLE_SEPARATOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\s|:-]*-[\s|:-]*$").expect("table separator pattern"));
static LIST_ITEM_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?:\{\+|\[-)?\s*(?:[*+-]|\d+[.)])\s+").expect("list item pattern")
});
static LIST_MARKER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(?:[*+-]|\d+[.)])\s+").expect("list marker pattern"));
static ORDERED_MARKER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*\d+[.)]").expect("ordered marker pattern"));

/// Change state of a reconstructed row or item.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RowState {
    Added,
    Deleted,
}

impl RowState {
    /// A line is deleted when it opens with a deletion marker; anything else
    /// counts as added.
    pub fn of(line: &str) -> Self {
        if line.trim_start().starts_with(DEL_OPEN) {
            Self::Deleted
        } else {
            Self::Added
        }
    }

    pub fn class(&self) -> &'static str {
        match self {
            Self::Added => "added-row",
            Self::Deleted => "deleted-row",
        }
    }
}

/// Container type of a list run, fixed by its first item.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListKind {
    Unordered,
    Ordered,
}

impl ListKind {
    fn of(item: &str) -> Self {
        if ORDERED_MARKER_RE.is_match(item) {
            Self::Ordered
        } else {
            Self::Unordered
        }
    }

    fn tag(&self) -> &'static str {
        match self {
            Self::Unordered => "ul",
            Self::Ordered => "ol",
        }
    }
}

/// Run both passes: tables first, then lists.
pub fn reconstruct(text: &str, renderer: &dyn MarkdownRenderer) -> RenderResult<String> {
    let tables = group_tables(text, renderer)?;
    group_lists(&tables, renderer)
}

/// Remove every insertion and deletion token from `line`.
pub fn strip_markers(line: &str) -> String {
    line.replace(INS_OPEN, "")
        .replace(INS_CLOSE, "")
        .replace(DEL_OPEN, "")
        .replace(DEL_CLOSE, "")
}

/// Group contiguous inserted or deleted table rows into `<table>` containers.
///
/// A row counts only when a single marker wraps it from its first pipe to its
/// last, as in `{+| a | b |+}`.
pub fn group_tables(text: &str, renderer: &dyn MarkdownRenderer) -> RenderResult<String> {
    let mut out: Vec<String> = Vec::new();
    let mut rows: Vec<String> = Vec::new();

    for line in text.split('\n') {
        if TABLE_ROW_RE.is_match(line) {
            let stripped = strip_markers(line);
            if !TABLE_SEPARATOR_RE.is_match(&stripped) {
                rows.push(render_row(RowState::of(line), &stripped, renderer)?);
            }
            continue;
        }
        flush_table(&mut rows, &mut out);
        out.push(line.to_string());
    }
    flush_table(&mut rows, &mut out);

    Ok(out.join("\n"))
}

fn render_row(state: RowState, row: &str, renderer: &dyn MarkdownRenderer) -> RenderResult<String> {
    let row = row.trim();
    let inner = row.strip_prefix('|').unwrap_or(row);
    let inner = inner.strip_suffix('|').unwrap_or(inner);

    let mut html = format!("<tr class=\"{}\">", state.class());
    for cell in inner.split('|') {
        html.push_str("<td>");
        html.push_str(&renderer.render(cell.trim())?);
        html.push_str("</td>");
    }
    html.push_str("</tr>");
    Ok(html)
}

fn flush_table(rows: &mut Vec<String>, out: &mut Vec<String>) {
    if rows.is_empty() {
        return;
    }
    let mut block = String::from("<div><table>\n");
    for row in rows.drain(..) {
        block.push_str(&row);
        block.push('\n');
    }
    block.push_str("</table></div>");
    out.push(block);
    out.push(String::new());
}

struct ListRun {
    kind: ListKind,
    items: Vec<String>,
}

impl ListRun {
    fn finish(self) -> String {
        let tag = self.kind.tag();
        let mut block = format!("<div><{tag}>\n");
        for item in self.items {
            block.push_str(&item);
            block.push('\n');
        }
        block.push_str(&format!("</{tag}></div>"));
        block
    }
}

/// Group contiguous list items into `<ul>`/`<ol>` containers.
///
/// The first item of a run decides whether the whole run is ordered.
pub fn group_lists(text: &str, renderer: &dyn MarkdownRenderer) -> RenderResult<String> {
    let mut out: Vec<String> = Vec::new();
    let mut run: Option<ListRun> = None;

    for line in text.split('\n') {
        if LIST_ITEM_RE.is_match(line) {
            let state = RowState::of(line);
            let stripped = strip_markers(line);
            let body = LIST_MARKER_RE.replace(&stripped, "");
            let item = format!("<li class=\"{}\">{}</li>", state.class(), renderer.render(&body)?);

            run.get_or_insert_with(|| ListRun {
                kind: ListKind::of(&stripped),
                items: Vec::new(),
            })
            .items
            .push(item);
            continue;
        }
        if let Some(done) = run.take() {
            out.push(done.finish());
            out.push(String::new());
        }
        out.push(line.to_string());
    }
    if let Some(done) = run.take() {
        out.push(done.finish());
        out.push(String::new());
    }

    Ok(out.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inline::render_document;
    use docdelta_render::CmarkRenderer;

    fn tables(text: &str) -> String {
        group_tables(text, &CmarkRenderer::new()).unwrap()
    }

    fn lists(text: &str) -> String {
        group_lists(text, &CmarkRenderer::new()).unwrap()
    }

    #[test]
    fn strip_markers_removes_all_tokens() {
        assert_eq!(strip_markers("{+| a |+}"), "| a |");
        assert_eq!(strip_markers("[-- b-]"), "- b");
        assert_eq!(strip_markers("plain"), "plain");
    }

    #[test]
    fn table_rows_are_grouped_with_state_classes() {
        let out = tables("{+| Name | Wert |+}\n{+|------|------|+}\n[-| a | b |-]\ntext after");
        assert!(out.starts_with("<div><table>\n<tr class=\"added-row\"><td><p>Name</p>\n</td><td><p>Wert</p>\n</td></tr>\n"));
        assert!(out.contains("<tr class=\"deleted-row\"><td><p>a</p>\n</td><td><p>b</p>\n</td></tr>\n</table></div>"));
        assert!(out.ends_with("</table></div>\n\ntext after"));
        assert!(!out.contains("---"));
    }

    #[test]
    fn separator_rows_with_alignment_are_dropped() {
        let out = tables("{+| a | b |+}\n{+| :--- | ---: |+}\n{+| c | d |+}");
        assert_eq!(out.matches("<tr ").count(), 2);
    }

    #[test]
    fn non_table_lines_pass_through() {
        let text = "# Title\n\nJust a paragraph with a | pipe.";
        assert_eq!(tables(text), text);
    }

    #[test]
    fn empty_cells_are_kept() {
        let out = tables("{+| a || c |+}");
        assert_eq!(out.matches("<td>").count(), 3);
        assert!(out.contains("<td></td>"));
    }

    #[test]
    fn separate_tables_stay_separate() {
        let out = tables("{+| a |+}\n\n[-| b |-]");
        assert_eq!(out.matches("<table>").count(), 2);
    }

    #[test]
    fn unmarked_rows_pass_through() {
        let out = tables("| Name | Wert |\n|---|---|\n{+| a | 1 |+}");
        assert!(out.starts_with("| Name | Wert |\n|---|---|\n<div><table>\n"));
        assert_eq!(out.matches("added-row").count(), 1);
    }

    #[test]
    fn edits_inside_a_row_are_kept_for_the_inline_pass() {
        let text = "| Name | Wert |\n|---|---|\n| a | [-alt-]{+neu+} |";
        assert_eq!(tables(text), text);

        let renderer = CmarkRenderer::new();
        let html = render_document(&reconstruct(text, &renderer).unwrap(), &renderer).unwrap();
        assert!(html.contains("<del>alt</del>"));
        assert!(html.contains("<ins>neu</ins>"));
        assert!(!html.contains("added-row"));
    }

    #[test]
    fn row_needs_marker_on_both_ends() {
        let text = "{+| a | b |+} trailing\n[-| c |";
        assert_eq!(tables(text), text);
    }

    #[test]
    fn ordered_run_takes_kind_from_first_item() {
        let out = lists("{+1. first+}\n{+- second+}\nplain");
        assert!(out.starts_with("<div><ol>\n"));
        assert!(out.contains("<li class=\"added-row\"><p>first</p>\n</li>"));
        assert!(out.contains("<li class=\"added-row\"><p>second</p>\n</li>"));
        assert!(out.ends_with("</ol></div>\n\nplain"));
    }

    #[test]
    fn unordered_run_with_deleted_item() {
        let out = lists("- a\n[-- b-]");
        assert!(out.starts_with("<div><ul>\n<li class=\"added-row\"><p>a</p>\n</li>\n"));
        assert!(out.contains("<li class=\"deleted-row\"><p>b</p>\n</li>\n</ul></div>"));
    }

    #[test]
    fn numbered_parenthesis_and_plus_bullets() {
        assert!(lists("1) one").starts_with("<div><ol>"));
        assert!(lists("+ one").starts_with("<div><ul>"));
    }

    #[test]
    fn item_markdown_is_rendered() {
        let out = lists("* **bold** item");
        assert!(out.contains("<p><strong>bold</strong> item</p>"));
    }

    #[test]
    fn non_list_lines_pass_through() {
        let text = "---\nplain text\n## heading";
        assert_eq!(lists(text), text);
    }

    #[test]
    fn reconstruct_runs_tables_then_lists() {
        let out = reconstruct("{+| x |+}\n\n{+- y+}", &CmarkRenderer::new()).unwrap();
        assert!(out.contains("<table>"));
        assert!(out.contains("<ul>"));
        assert!(out.find("<table>").unwrap() < out.find("<ul>").unwrap());
    }
}
