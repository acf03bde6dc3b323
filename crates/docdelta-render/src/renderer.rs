use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag, TagEnd};
use serde::{Deserialize, Serialize};

use crate::error::{RenderError, RenderResult};
use crate::slug::Slugger;

/// Prefix prepended to every generated heading id.
pub const DEFAULT_HEADING_PREFIX: &str = "heading-";

/// Markdown-to-HTML rendering.
///
/// Implementations must be deterministic: the same input always yields the
/// same output, including heading ids. Inline HTML in the input must be
/// passed through untouched.
pub trait MarkdownRenderer: Send + Sync {
    /// Render a markdown fragment or document to HTML.
    fn render(&self, markdown: &str) -> RenderResult<String>;
}

/// Engine options for [`CmarkRenderer`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// GitHub-flavoured pipe tables.
    pub tables: bool,
    /// `~~strikethrough~~`.
    pub strikethrough: bool,
    /// `- [x]` task list markers.
    pub tasklists: bool,
    /// Prefix of generated heading ids.
    pub heading_prefix: String,
    /// Reject inputs larger than this many bytes.
    pub max_input_bytes: Option<usize>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            tables: true,
            strikethrough: true,
            tasklists: false,
            heading_prefix: DEFAULT_HEADING_PREFIX.into(),
            max_input_bytes: None,
        }
    }
}

/// `pulldown-cmark` backed renderer with slug-based heading ids.
///
/// Each heading receives `id="<prefix><slug>"`, where the slug is computed
/// from the heading's text with a slugger that is fresh for every call to
/// [`render`](MarkdownRenderer::render).
#[derive(Clone, Debug, Default)]
pub struct CmarkRenderer {
    options: RenderOptions,
}

impl CmarkRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: RenderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    fn parser_options(&self) -> Options {
        let mut options = Options::empty();
        if self.options.tables {
            options.insert(Options::ENABLE_TABLES);
        }
        if self.options.strikethrough {
            options.insert(Options::ENABLE_STRIKETHROUGH);
        }
        if self.options.tasklists {
            options.insert(Options::ENABLE_TASKLISTS);
        }
        options
    }

    /// Compute one id per heading, in document order.
    fn heading_ids(&self, events: &[Event<'_>]) -> Vec<String> {
        let mut slugger = Slugger::new();
        let mut ids = Vec::new();
        let mut text: Option<String> = None;

        for event in events {
            match event {
                Event::Start(Tag::Heading { .. }) => text = Some(String::new()),
                Event::Text(t) | Event::Code(t) => {
                    if let Some(buf) = text.as_mut() {
                        buf.push_str(t);
                    }
                }
                Event::End(TagEnd::Heading(_)) => {
                    if let Some(buf) = text.take() {
                        ids.push(format!("{}{}", self.options.heading_prefix, slugger.slug(&buf)));
                    }
                }
                _ => {}
            }
        }

        ids
    }
}

impl MarkdownRenderer for CmarkRenderer {
    fn render(&self, markdown: &str) -> RenderResult<String> {
        if let Some(limit) = self.options.max_input_bytes {
            if markdown.len() > limit {
                return Err(RenderError::InputTooLarge {
                    size: markdown.len(),
                    limit,
                });
            }
        }

        let events: Vec<Event<'_>> = Parser::new_ext(markdown, self.parser_options()).collect();
        let mut ids = self.heading_ids(&events).into_iter();

        let events = events.into_iter().map(|event| match event {
            Event::Start(Tag::Heading {
                level,
                id: _,
                classes,
                attrs,
            }) => Event::Start(Tag::Heading {
                level,
                id: ids.next().map(CowStr::from),
                classes,
                attrs,
            }),
            other => other,
        });

        let mut out = String::with_capacity(markdown.len() + markdown.len() / 2);
        html::push_html(&mut out, events);
        Ok(out)
    }
}
