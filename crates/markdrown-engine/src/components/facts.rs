//! Static fact cards.

use std::sync::LazyLock;

use regex::Regex;

use super::{COMPONENT_PRIORITY, delimited_block};
use crate::escape::escape_html;
use crate::plugin::{BlockMatch, BlockPlugin, ParseContext};

static FACT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\*\s+([a-z0-9-]+)\s*\|\s*([a-z0-9-]+)\s*\|\s*([a-z0-9-]+)\s*\|\s*(.+)$").unwrap()
});

const DEFAULT_ID: &str = "facts";

struct Fact<'a> {
    icon: &'a str,
    color: &'a str,
    title: &'a str,
    content: Vec<&'a str>,
}

/// `!facts [id]` with `* id | icon | color-class | Title` cards. Card text
/// is escaped, not inline-rendered.
#[derive(Clone, Copy, Debug, Default)]
pub struct Facts;

impl BlockPlugin for Facts {
    fn name(&self) -> &str {
        "facts"
    }

    fn priority(&self) -> i32 {
        COMPONENT_PRIORITY
    }

    fn parse(&self, lines: &[&str], index: usize, _cx: &mut ParseContext<'_>) -> Option<BlockMatch> {
        let block = delimited_block(lines, index, "facts")?;
        let id = if block.argument.is_empty() {
            DEFAULT_ID
        } else {
            block.argument
        };

        let mut facts: Vec<Fact<'_>> = Vec::new();
        for &line in block.body {
            if let Some(caps) = FACT.captures(line) {
                let field = |n| caps.get(n).map_or("", |m| m.as_str().trim());
                facts.push(Fact {
                    icon: field(2),
                    color: field(3),
                    title: field(4),
                    content: Vec::new(),
                });
            } else if let Some(fact) = facts.last_mut() {
                let trimmed = line.trim();
                if !trimmed.is_empty() {
                    fact.content.push(trimmed);
                }
            }
        }

        let mut html = format!("<div class=\"facts-grid\" id=\"{}\">", escape_html(id));
        for fact in &facts {
            html.push_str(&format!(
                "<div class=\"facts-card {}\"><div class=\"facts-icon\"><i data-lucide=\"{}\"></i></div>\
                 <h4>{}</h4><p>{}</p></div>",
                escape_html(fact.color),
                escape_html(fact.icon),
                escape_html(fact.title),
                escape_html(&fact.content.join(" "))
            ));
        }
        html.push_str("</div>");

        Some(BlockMatch::new(html, block.lines_used))
    }
}
