//! ATX headings with optional explicit anchor id.

use std::sync::LazyLock;

use regex::Regex;

use crate::plugin::{BlockMatch, BlockPlugin, ParseContext};

static HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,6})\s+(#([A-Za-z][\w\-]*))?\s*(.*)$").unwrap());

/// `## #id Title` renders `<h2 id="id">Title</h2>`. The id is optional.
#[derive(Clone, Copy, Debug, Default)]
pub struct Heading;

impl BlockPlugin for Heading {
    fn name(&self) -> &str {
        "heading"
    }

    fn priority(&self) -> i32 {
        10
    }

    fn parse(&self, lines: &[&str], index: usize, cx: &mut ParseContext<'_>) -> Option<BlockMatch> {
        let caps = HEADING.captures(lines[index])?;
        let level = caps[1].len();
        let id = caps.get(3).map(|m| m.as_str());
        // A bare `#id` with no title text shows the id itself.
        let title = caps
            .get(4)
            .map(|m| m.as_str())
            .filter(|t| !t.is_empty())
            .or_else(|| caps.get(2).map(|m| m.as_str()))
            .unwrap_or_default();

        let id_attr = id.map(|id| format!(" id=\"{id}\"")).unwrap_or_default();
        let html = format!("<h{level}{id_attr}>{}</h{level}>", cx.inline(&[title.trim()]));
        Some(BlockMatch::new(html, 1))
    }
}
