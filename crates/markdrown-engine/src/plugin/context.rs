//! Context handed to block plugins during a parse.

use super::Plugin;
use crate::dispatch;
use crate::meta::MetaHeader;

/// Access to the engine from inside a block plugin.
///
/// Provides the inline renderer, recursive parsing for nested bodies
/// (blockquotes, grid cells) and the document meta header.
pub struct ParseContext<'a> {
    plugins: &'a [Plugin],
    meta: &'a mut MetaHeader,
    depth: usize,
}

impl<'a> ParseContext<'a> {
    pub(crate) fn new(plugins: &'a [Plugin], meta: &'a mut MetaHeader, depth: usize) -> Self {
        Self {
            plugins,
            meta,
            depth,
        }
    }

    /// Render lines through the inline pipeline, joined by single spaces.
    #[must_use]
    pub fn inline(&self, lines: &[&str]) -> String {
        dispatch::render_inline(self.plugins, &lines.join(" "))
    }

    /// Render a single piece of text through the inline pipeline.
    #[must_use]
    pub fn inline_text(&self, text: &str) -> String {
        dispatch::render_inline(self.plugins, text)
    }

    /// Parse a nested body with the full block pipeline.
    ///
    /// Section wrapping is never applied to nested bodies.
    pub fn parse_nested(&mut self, text: &str) -> String {
        dispatch::parse_document(self.plugins, self.meta, text, false, self.depth + 1)
    }

    /// Nesting depth: 0 for the top-level document.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Whether `index` is the absolute start of the top-level document.
    #[must_use]
    pub fn is_document_start(&self, index: usize) -> bool {
        self.depth == 0 && index == 0
    }

    #[must_use]
    pub fn meta(&self) -> &MetaHeader {
        self.meta
    }

    pub fn meta_mut(&mut self) -> &mut MetaHeader {
        self.meta
    }
}
