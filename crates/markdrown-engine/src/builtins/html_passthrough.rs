//! Raw HTML passthrough.

use std::sync::LazyLock;

use regex::Regex;

use crate::plugin::{BlockMatch, BlockPlugin, ParseContext};

static HTML_START: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*<(?:[a-z][a-z0-9]*(?:\s+[^>]*)?/?>|/[a-z][a-z0-9]*\s*>|!(?:--.*?--|DOCTYPE\s))")
        .unwrap()
});

/// Emits lines starting with a tag, closing tag, comment or doctype verbatim,
/// up to the next blank line. The content is trusted.
#[derive(Clone, Copy, Debug, Default)]
pub struct HtmlPassthrough;

impl BlockPlugin for HtmlPassthrough {
    fn name(&self) -> &str {
        "html-passthrough"
    }

    fn priority(&self) -> i32 {
        1
    }

    fn parse(&self, lines: &[&str], index: usize, _cx: &mut ParseContext<'_>) -> Option<BlockMatch> {
        if !HTML_START.is_match(lines[index]) {
            return None;
        }
        let end = lines[index..]
            .iter()
            .position(|l| l.trim().is_empty())
            .map_or(lines.len(), |p| index + p);
        Some(BlockMatch::new(lines[index..end].join("\n"), end - index))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::Markdrown;

    fn parse(text: &str) -> String {
        let mut engine = Markdrown::new();
        engine.register_all_builtins();
        engine.parse_with(text, false)
    }

    #[test]
    fn test_block_verbatim_until_blank() {
        assert_eq!(
            parse("<div class=\"x\">\n**not bold**\n</div>\n\ntext"),
            "<div class=\"x\">\n**not bold**\n</div>\n<p>text</p>"
        );
    }

    #[test]
    fn test_comment_and_doctype() {
        assert_eq!(parse("<!-- note -->"), "<!-- note -->");
        assert_eq!(parse("<!DOCTYPE html>"), "<!DOCTYPE html>");
    }

    #[test]
    fn test_closing_and_self_closing() {
        assert_eq!(parse("</section>"), "</section>");
        assert_eq!(parse("<br/>"), "<br/>");
    }

    #[test]
    fn test_not_html() {
        assert_eq!(parse("a < b"), "<p>a < b</p>");
    }
}
