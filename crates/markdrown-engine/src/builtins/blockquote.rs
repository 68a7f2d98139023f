//! Blockquotes with an optional class and title header.

use std::sync::LazyLock;

use regex::Regex;

use crate::escape::escape_html;
use crate::plugin::{BlockMatch, BlockPlugin, ParseContext};

static QUOTE_LINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*>\s?(.*)$").unwrap());
static HEADER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^!(\S*)\s*(.*)$").unwrap());

/// Contiguous `>` lines. The first body line starting with `!` is a header:
///
/// ```text
/// > !warning Careful
/// > The body is parsed as a nested document.
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct Blockquote;

impl BlockPlugin for Blockquote {
    fn name(&self) -> &str {
        "blockquote"
    }

    fn priority(&self) -> i32 {
        15
    }

    fn parse(&self, lines: &[&str], index: usize, cx: &mut ParseContext<'_>) -> Option<BlockMatch> {
        let mut j = index;
        let mut header: Option<(&str, &str)> = None;
        let mut body: Vec<&str> = Vec::new();

        while let Some(caps) = lines.get(j).and_then(|l| QUOTE_LINE.captures(l)) {
            let content = caps.get(1).map_or("", |m| m.as_str());
            match HEADER.captures(content) {
                Some(h) if header.is_none() => {
                    let class = h.get(1).map_or("", |m| m.as_str());
                    let title = h.get(2).map_or("", |m| m.as_str());
                    header = Some((class, title));
                }
                _ => body.push(content),
            }
            j += 1;
        }
        if j == index {
            return None;
        }

        let (class, title) = header.unwrap_or_default();
        let mut html = String::from("<blockquote");
        if !class.is_empty() {
            html.push_str(&format!(" class=\"{}\"", escape_html(class)));
        }
        html.push('>');
        if !title.is_empty() {
            html.push_str(&format!("<div class=\"title\">{}</div>", escape_html(title)));
        }
        html.push_str(&cx.parse_nested(&body.join("\n")));
        html.push_str("</blockquote>");

        Some(BlockMatch::new(html, j - index))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::Markdrown;

    fn parse(text: &str) -> String {
        let mut engine = Markdrown::new();
        engine.register_all_builtins();
        engine.parse(text)
    }

    #[test]
    fn test_plain_quote() {
        assert_eq!(parse("> hello\n> world"), "<blockquote><p>hello world</p></blockquote>");
    }

    #[test]
    fn test_class_and_title() {
        assert_eq!(
            parse("> !warning Mind <this>\n> body"),
            "<blockquote class=\"warning\"><div class=\"title\">Mind &lt;this&gt;</div><p>body</p></blockquote>"
        );
    }

    #[test]
    fn test_class_only() {
        assert_eq!(parse("> !note\n> x"), "<blockquote class=\"note\"><p>x</p></blockquote>");
    }

    #[test]
    fn test_second_bang_line_is_body() {
        assert_eq!(
            parse("> !a A\n> !b B"),
            "<blockquote class=\"a\"><div class=\"title\">A</div><p>!b B</p></blockquote>"
        );
    }

    #[test]
    fn test_nested_body_is_not_section_wrapped() {
        let html = parse("> ### #inner Inner\n> text");
        assert!(html.contains("<blockquote><h3 id=\"inner\">Inner</h3>\n<p>text</p></blockquote>"));
    }

    #[test]
    fn test_nested_list_in_quote() {
        assert_eq!(parse("> - a\n> - b"), "<blockquote><ul><li>a</li><li>b</li></ul></blockquote>");
    }
}
