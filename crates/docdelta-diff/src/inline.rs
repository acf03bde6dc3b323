//! Inline annotation resolution and final document rendering.
//!
//! After markup reconstruction, the remaining `{+...+}` and `[-...-]` spans
//! are replaced with `<ins>`/`<del>` HTML. A span whose content is a heading
//! is rendered first and wrapped at block level, since the rendered heading
//! is a block element; a span containing emphasis is rendered first and
//! wrapped inline; anything else is wrapped as-is.

use docdelta_render::{MarkdownRenderer, RenderResult, Slugger};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

pub const INS_OPEN: &str = "{+";
pub const INS_CLOSE: &str = "+}";
pub const DEL_OPEN: &str = "[-";
pub const DEL_CLOSE: &str = "-]";

static SPAN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\{\+(.*?)\+\}|\[-(.*?)-\]").expect("annotation pattern"));
static FOOTNOTE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[\^([^\]]+)\]").expect("footnote pattern"));
static ATTRIBUTE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{[^}\n]*\}").expect("attribute pattern"));
static COMMENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<!--.*?-->").expect("comment pattern"));
static HEADING_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(<h[1-6][^>]*?\sid=")([^"]*)(")"#).expect("heading id pattern"));

/// Which side of the diff a span belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpanKind {
    Inserted,
    Deleted,
}

impl SpanKind {
    /// The HTML element used to mark this kind of span.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Inserted => "ins",
            Self::Deleted => "del",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "ins" => Some(Self::Inserted),
            "del" => Some(Self::Deleted),
            _ => None,
        }
    }
}

/// Resolve annotations, clean residual syntax, and render the document.
pub fn render_document(text: &str, renderer: &dyn MarkdownRenderer) -> RenderResult<String> {
    let resolved = resolve_spans(text, renderer)?;
    let cleaned = clean_residue(&resolved);
    let html = renderer.render(&cleaned)?;
    Ok(unique_heading_ids(&html))
}

/// Make heading ids unique across the document.
///
/// Headings inside annotated spans are rendered on their own, so their ids
/// can repeat ids from the surrounding document. Later repeats get `-1`,
/// `-2`, ... appended, in document order.
pub fn unique_heading_ids(html: &str) -> String {
    let mut slugger = Slugger::new();
    HEADING_ID_RE
        .replace_all(html, |caps: &Captures<'_>| {
            format!("{}{}{}", &caps[1], slugger.claim(&caps[2]), &caps[3])
        })
        .into_owned()
}

/// Replace every non-empty annotation span with `<ins>`/`<del>` HTML.
///
/// Empty spans (`{++}`, `[--]`) and unmatched openers are left as they are.
pub fn resolve_spans(text: &str, renderer: &dyn MarkdownRenderer) -> RenderResult<String> {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;

    for caps in SPAN_RE.captures_iter(text) {
        let Some(whole) = caps.get(0) else { continue };
        out.push_str(&text[last..whole.start()]);

        let span = match (caps.get(1), caps.get(2)) {
            (Some(ins), _) if !ins.as_str().is_empty() => Some((SpanKind::Inserted, ins.as_str())),
            (_, Some(del)) if !del.as_str().is_empty() => Some((SpanKind::Deleted, del.as_str())),
            _ => None,
        };
        match span {
            Some((kind, content)) => out.push_str(&annotate(kind, content, renderer)?),
            None => out.push_str(whole.as_str()),
        }

        last = whole.end();
    }
    out.push_str(&text[last..]);

    Ok(out)
}

/// Wrap one span's content.
pub fn annotate(kind: SpanKind, content: &str, renderer: &dyn MarkdownRenderer) -> RenderResult<String> {
    let tag = kind.tag();
    if content.starts_with('#') {
        Ok(format!("<div><{tag}>{}</{tag}></div>", renderer.render(content)?))
    } else if content.contains('*') {
        Ok(format!("<{tag}>{}</{tag}>", renderer.render(content)?))
    } else {
        Ok(format!("<{tag}>{content}</{tag}>"))
    }
}

/// Rewrite footnote references, strip attribute blocks and HTML comments.
pub fn clean_residue(text: &str) -> String {
    let text = FOOTNOTE_RE.replace_all(text, "<sup>$1</sup>");
    let text = ATTRIBUTE_RE.replace_all(&text, "");
    COMMENT_RE.replace_all(&text, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use docdelta_render::CmarkRenderer;

    fn resolve(text: &str) -> String {
        resolve_spans(text, &CmarkRenderer::new()).unwrap()
    }

    #[test]
    fn plain_spans_are_wrapped_raw() {
        assert_eq!(resolve("a [-old-]{+new+} b"), "a <del>old</del><ins>new</ins> b");
    }

    #[test]
    fn heading_spans_are_rendered_and_block_wrapped() {
        assert_eq!(
            resolve("{+## Neu+}"),
            "<div><ins><h2 id=\"heading-neu\">Neu</h2>\n</ins></div>"
        );
        assert_eq!(
            resolve("[-# Alt-]"),
            "<div><del><h1 id=\"heading-alt\">Alt</h1>\n</del></div>"
        );
    }

    #[test]
    fn emphasis_spans_are_rendered_inline() {
        assert_eq!(
            resolve("{+**Bund**+}"),
            "<ins><p><strong>Bund</strong></p>\n</ins>"
        );
    }

    #[test]
    fn spans_may_cross_lines() {
        assert_eq!(resolve("{+one\ntwo+}"), "<ins>one\ntwo</ins>");
    }

    #[test]
    fn empty_spans_stay_verbatim() {
        assert_eq!(resolve("a {++} b [--] c"), "a {++} b [--] c");
    }

    #[test]
    fn unbalanced_opener_passes_through() {
        assert_eq!(resolve("{+unclosed text"), "{+unclosed text");
        assert_eq!(resolve("[-unclosed"), "[-unclosed");
    }

    #[test]
    fn footnotes_become_superscripts() {
        assert_eq!(clean_residue("Text[^12] more"), "Text<sup>12</sup> more");
    }

    #[test]
    fn attributes_and_comments_are_stripped() {
        assert_eq!(clean_residue("## Title {#custom-id}"), "## Title ");
        assert_eq!(clean_residue("a<!-- note\nspanning -->b"), "ab");
    }

    #[test]
    fn unbalanced_opener_with_later_brace_is_stripped() {
        assert_eq!(clean_residue("{+never closed} tail"), " tail");
    }

    #[test]
    fn render_document_end_to_end() {
        let html = render_document("Die Regel[-alt-]{+neu+} gilt.[^1]", &CmarkRenderer::new()).unwrap();
        assert_eq!(html, "<p>Die Regel<del>alt</del><ins>neu</ins> gilt.<sup>1</sup></p>\n");
    }

    #[test]
    fn heading_ids_stay_unique_across_spans() {
        let html = render_document("## Ziele\n\ntext\n\n{+## Ziele+}", &CmarkRenderer::new()).unwrap();
        assert_eq!(html.matches("id=\"heading-ziele\"").count(), 1);
        assert!(html.contains("<ins><h2 id=\"heading-ziele-1\">Ziele</h2>"));
    }

    #[test]
    fn unique_heading_ids_leaves_distinct_ids_alone() {
        let html = "<h1 id=\"a\">A</h1><h2 class=\"x\" id=\"b\">B</h2><p id=\"a\">p</p>";
        assert_eq!(unique_heading_ids(html), html);
    }

    #[test]
    fn span_kind_tags() {
        assert_eq!(SpanKind::from_tag("ins"), Some(SpanKind::Inserted));
        assert_eq!(SpanKind::from_tag("del"), Some(SpanKind::Deleted));
        assert_eq!(SpanKind::from_tag("em"), None);
        assert_eq!(SpanKind::Deleted.tag(), "del");
    }
}
