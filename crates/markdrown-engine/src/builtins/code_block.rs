//! Fenced code blocks.

use std::sync::LazyLock;

use regex::Regex;

use crate::escape::{escape_code, escape_html};
use crate::plugin::{BlockMatch, BlockPlugin, ParseContext};

static FENCE_INFO: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^```(\S*)\s*(.+)?$").unwrap());

/// Triple-backtick fences with optional language and filename:
///
/// ````text
/// ```rust src/main.rs
/// fn main() {}
/// ```
/// ````
///
/// An unterminated fence runs to the end of input.
#[derive(Clone, Copy, Debug, Default)]
pub struct CodeBlock;

impl BlockPlugin for CodeBlock {
    fn name(&self) -> &str {
        "code-block"
    }

    fn priority(&self) -> i32 {
        20
    }

    fn parse(&self, lines: &[&str], index: usize, _cx: &mut ParseContext<'_>) -> Option<BlockMatch> {
        let line = lines[index];
        if !line.starts_with("```") {
            return None;
        }
        let caps = FENCE_INFO.captures(line);
        let field = |n: usize| {
            caps.as_ref()
                .and_then(|c| c.get(n))
                .map_or("", |m| m.as_str().trim())
        };
        let lang = field(1);
        let filename = field(2);

        let body_start = index + 1;
        let close = lines[body_start..]
            .iter()
            .position(|l| l.starts_with("```"))
            .map_or(lines.len(), |p| body_start + p);
        let code = escape_code(&lines[body_start..close].join("\n"));

        let mut attrs = String::new();
        if !lang.is_empty() {
            attrs.push_str(&format!(" data-lang=\"{}\"", escape_html(lang)));
        }
        if !filename.is_empty() {
            attrs.push_str(&format!(" data-filename=\"{}\"", escape_html(filename)));
        }
        let class = if lang.is_empty() {
            String::new()
        } else {
            format!(" class=\"language-{}\"", escape_html(lang))
        };

        let html = format!("<pre{attrs}><code{attrs}{class}>{code}</code></pre>");
        // The closing fence counts even when it is missing.
        Some(BlockMatch::new(html, (close - index + 1).min(lines.len() - index)))
    }
}
