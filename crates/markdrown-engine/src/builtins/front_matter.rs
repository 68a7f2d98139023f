//! Front matter: `key: value` lines between `---` fences at document start.

use std::sync::LazyLock;

use regex::Regex;

use crate::plugin::{BlockMatch, BlockPlugin, ParseContext};

static FENCE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^---\s*$").unwrap());
static ENTRY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^([^:#]+):\s*(.*)$").unwrap());

/// Collects front matter into the engine's meta header. Emits no markup.
///
/// Only matches at the absolute start of the top-level document, so nested
/// bodies can never declare meta. Without a closing fence the opening line
/// is left to other plugins.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrontMatter;

impl BlockPlugin for FrontMatter {
    fn name(&self) -> &str {
        "front-matter"
    }

    fn priority(&self) -> i32 {
        0
    }

    fn parse(&self, lines: &[&str], index: usize, cx: &mut ParseContext<'_>) -> Option<BlockMatch> {
        if !cx.is_document_start(index) || !FENCE.is_match(lines[index]) {
            return None;
        }
        let close = index + 1 + lines[index + 1..].iter().position(|l| FENCE.is_match(l))?;

        for line in &lines[index + 1..close] {
            if let Some(caps) = ENTRY.captures(line) {
                cx.meta_mut().insert(caps[1].trim(), caps[2].trim());
            }
        }
        Some(BlockMatch::empty(close - index + 1))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::Markdrown;

    #[test]
    fn test_collects_entries() {
        let mut engine = Markdrown::new();
        let html = engine.parse("---\ntitle: Hello World \nauthor:Jane\n# comment\nurl: http://x.y/z\n---\nBody");
        assert_eq!(html, "<p>Body</p>");
        assert_eq!(engine.meta().get("title"), Some("Hello World"));
        assert_eq!(engine.meta().get("author"), Some("Jane"));
        assert_eq!(engine.meta().get("url"), Some("http://x.y/z"));
        assert_eq!(engine.meta().len(), 3);
    }

    #[test]
    fn test_unterminated_is_not_front_matter() {
        let mut engine = Markdrown::new();
        let html = engine.parse("---\ntitle: Hi");
        assert!(engine.meta().is_empty());
        assert_eq!(html, "<p>--- title: Hi</p>");
    }

    #[test]
    fn test_only_at_document_start() {
        let mut engine = Markdrown::new();
        engine.parse("text\n---\ntitle: Hi\n---");
        assert!(engine.meta().is_empty());
    }

    #[test]
    fn test_ignored_in_nested_body() {
        let mut engine = Markdrown::new();
        engine.register_all_builtins();
        engine.parse("> ---\n> title: Nested\n> ---");
        assert!(engine.meta().is_empty());
    }

    #[test]
    fn test_empty_front_matter() {
        let mut engine = Markdrown::new();
        assert_eq!(engine.parse("---\n---\nBody"), "<p>Body</p>");
    }
}
