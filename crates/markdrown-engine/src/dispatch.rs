//! Block dispatcher and inline pipeline.
//!
//! The dispatcher walks the document line by line. A blank line flushes the
//! paragraph buffer; otherwise the first block plugin (in priority order) that
//! accepts the line wins and the cursor advances past the lines it consumed.
//! Lines no plugin accepts are buffered as paragraph text.

use std::sync::LazyLock;

use regex::Regex;

use crate::meta::MetaHeader;
use crate::plugin::{ParseContext, Plugin};
use crate::sections::wrap_sections;

static EXCESS_NEWLINES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());

/// Split text into lines after normalizing `\r\n` and lone `\r` to `\n`.
pub(crate) fn normalize_newlines(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Apply every inline plugin to `text`, chaining outputs in priority order.
pub(crate) fn render_inline(plugins: &[Plugin], text: &str) -> String {
    let mut result = text.to_owned();
    for plugin in plugins {
        if let Plugin::Inline(inline) = plugin {
            result = inline.apply(&result);
        }
    }
    result
}

fn flush_paragraph(plugins: &[Plugin], buffer: &mut Vec<&str>, out: &mut Vec<String>) {
    if buffer.is_empty() {
        return;
    }
    let text = render_inline(plugins, &buffer.join(" "));
    out.push(format!("<p>{text}</p>"));
    buffer.clear();
}

/// Parse a whole document (or nested body) into HTML.
pub(crate) fn parse_document(
    plugins: &[Plugin],
    meta: &mut MetaHeader,
    text: &str,
    wrap: bool,
    depth: usize,
) -> String {
    let normalized = normalize_newlines(text);
    let lines: Vec<&str> = normalized.split('\n').collect();
    let mut cx = ParseContext::new(plugins, meta, depth);

    let mut out: Vec<String> = Vec::new();
    let mut buffer: Vec<&str> = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];
        if line.trim().is_empty() {
            flush_paragraph(plugins, &mut buffer, &mut out);
            i += 1;
            continue;
        }

        let matched = plugins.iter().find_map(|plugin| match plugin {
            Plugin::Block(block) => block
                .parse(&lines, i, &mut cx)
                .map(|m| (block.name(), m)),
            Plugin::Inline(_) => None,
        });

        match matched {
            Some((name, m)) => {
                flush_paragraph(plugins, &mut buffer, &mut out);
                if m.lines_used == 0 {
                    tracing::warn!(plugin = name, line = i, "block plugin consumed no lines");
                }
                tracing::trace!(plugin = name, line = i, lines = m.lines_used, "block matched");
                if !m.html.is_empty() {
                    out.push(m.html);
                }
                i += m.lines_used.max(1);
            }
            None => {
                buffer.push(line);
                i += 1;
            }
        }
    }
    flush_paragraph(plugins, &mut buffer, &mut out);

    let html = EXCESS_NEWLINES
        .replace_all(&out.join("\n"), "\n\n")
        .into_owned();
    if wrap { wrap_sections(&html) } else { html }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::plugin::{BlockMatch, BlockPlugin, InlinePlugin};

    struct Fixed {
        name: &'static str,
        priority: i32,
        prefix: &'static str,
        lines: usize,
    }

    impl BlockPlugin for Fixed {
        fn name(&self) -> &str {
            self.name
        }

        fn priority(&self) -> i32 {
            self.priority
        }

        fn parse(&self, lines: &[&str], index: usize, _cx: &mut ParseContext<'_>) -> Option<BlockMatch> {
            lines[index]
                .starts_with(self.prefix)
                .then(|| BlockMatch::new(format!("<{}>", self.name), self.lines))
        }
    }

    struct Upper;

    impl InlinePlugin for Upper {
        fn name(&self) -> &str {
            "upper"
        }

        fn priority(&self) -> i32 {
            1
        }

        fn apply(&self, text: &str) -> String {
            text.to_uppercase()
        }
    }

    fn parse(plugins: &[Plugin], text: &str) -> String {
        let mut meta = MetaHeader::new();
        parse_document(plugins, &mut meta, text, false, 0)
    }

    #[test]
    fn test_paragraph_joins_lines() {
        assert_eq!(parse(&[], "a\nb\n\nc"), "<p>a b</p>\n<p>c</p>");
    }

    #[test]
    fn test_crlf_normalized() {
        assert_eq!(parse(&[], "a\r\nb\rc"), "<p>a b c</p>");
    }

    #[test]
    fn test_block_flushes_buffer() {
        let plugins = vec![Plugin::block(Fixed {
            name: "x",
            priority: 1,
            prefix: "!",
            lines: 1,
        })];
        assert_eq!(parse(&plugins, "text\n!\nmore"), "<p>text</p>\n<x>\n<p>more</p>");
    }

    #[test]
    fn test_lines_used_advances_cursor() {
        let plugins = vec![Plugin::block(Fixed {
            name: "x",
            priority: 1,
            prefix: "!",
            lines: 2,
        })];
        assert_eq!(parse(&plugins, "!\nswallowed\nkept"), "<x>\n<p>kept</p>");
    }

    #[test]
    fn test_zero_lines_used_still_terminates() {
        let plugins = vec![Plugin::block(Fixed {
            name: "x",
            priority: 1,
            prefix: "!",
            lines: 0,
        })];
        assert_eq!(parse(&plugins, "!\n!"), "<x>\n<x>");
    }

    #[test]
    fn test_first_plugin_in_slice_wins() {
        let plugins = vec![
            Plugin::block(Fixed {
                name: "a",
                priority: 1,
                prefix: "!",
                lines: 1,
            }),
            Plugin::block(Fixed {
                name: "b",
                priority: 1,
                prefix: "!",
                lines: 1,
            }),
        ];
        assert_eq!(parse(&plugins, "!"), "<a>");
    }

    #[test]
    fn test_inline_applied_to_paragraphs() {
        let plugins = vec![Plugin::inline(Upper)];
        assert_eq!(parse(&plugins, "hi there"), "<p>HI THERE</p>");
    }

    #[test]
    fn test_empty_block_output_skipped() {
        struct Silent;

        impl BlockPlugin for Silent {
            fn name(&self) -> &str {
                "silent"
            }

            fn priority(&self) -> i32 {
                0
            }

            fn parse(&self, lines: &[&str], index: usize, _cx: &mut ParseContext<'_>) -> Option<BlockMatch> {
                (lines[index] == "~").then(|| BlockMatch::empty(1))
            }
        }

        let plugins = vec![Plugin::block(Silent)];
        assert_eq!(parse(&plugins, "~\nBody"), "<p>Body</p>");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(parse(&[], ""), "");
    }
}
