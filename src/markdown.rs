//! Markdown to HTML conversion for post bodies.

use pulldown_cmark::{html, Event, Options, Parser};

/// Renders post content with the GFM extensions the reader supports.
///
/// Raw HTML in the source is passed through untouched: post content is
/// authored by the blog owner and injected into the reader as-is.
#[derive(Debug, Clone)]
pub struct MarkdownRenderer {
    options: Options,
    hard_breaks: bool,
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new(false)
    }
}

impl MarkdownRenderer {
    pub fn new(hard_breaks: bool) -> Self {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_TASKLISTS);
        options.insert(Options::ENABLE_FOOTNOTES);

        Self {
            options,
            hard_breaks,
        }
    }

    pub fn render(&self, source: &str) -> String {
        let hard_breaks = self.hard_breaks;
        let parser = Parser::new_ext(source, self.options).map(move |event| match event {
            Event::SoftBreak if hard_breaks => Event::HardBreak,
            _ => event,
        });

        let mut body_html = String::new();
        html::push_html(&mut body_html, parser);
        body_html
    }
}
