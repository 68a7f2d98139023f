//! Pipe tables.

use std::sync::LazyLock;

use regex::Regex;

use crate::plugin::{BlockMatch, BlockPlugin, ParseContext};

static SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^ *\|? *[:-]+[-| :]*\|? *$").unwrap());
static CENTER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r":-+:").unwrap());
static LEFT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r":-+").unwrap());
static RIGHT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-+:").unwrap());

/// Split a row into trimmed cells, ignoring one leading and one trailing pipe.
fn cells(row: &str) -> Vec<&str> {
    let row = row.trim();
    let row = row.strip_prefix('|').unwrap_or(row);
    let row = row.strip_suffix('|').unwrap_or(row);
    row.split('|').map(str::trim).collect()
}

fn alignment(spec: &str) -> Option<&'static str> {
    if CENTER.is_match(spec) {
        Some("center")
    } else if LEFT.is_match(spec) {
        Some("left")
    } else if RIGHT.is_match(spec) {
        Some("right")
    } else {
        None
    }
}

fn style(aligns: &[Option<&str>], column: usize) -> String {
    match aligns.get(column).copied().flatten() {
        Some(a) => format!(" style=\"text-align:{a}\""),
        None => String::new(),
    }
}

/// A `|` header row, a separator row, then contiguous `|` body rows.
///
/// Separator cells set column alignment: `:--:` center, `:--` left,
/// `--:` right.
#[derive(Clone, Copy, Debug, Default)]
pub struct Table;

impl BlockPlugin for Table {
    fn name(&self) -> &str {
        "table"
    }

    fn priority(&self) -> i32 {
        50
    }

    fn parse(&self, lines: &[&str], index: usize, cx: &mut ParseContext<'_>) -> Option<BlockMatch> {
        if !lines[index].contains('|') {
            return None;
        }
        let separator = lines.get(index + 1).filter(|l| SEPARATOR.is_match(l))?;
        let body_end = lines[index + 2..]
            .iter()
            .position(|l| !l.contains('|'))
            .map_or(lines.len(), |p| index + 2 + p);

        let aligns: Vec<Option<&str>> = cells(separator).into_iter().map(alignment).collect();

        let mut html = String::from("<table><thead><tr>");
        for (k, cell) in cells(lines[index]).into_iter().enumerate() {
            html.push_str(&format!("<th{}>{}</th>", style(&aligns, k), cx.inline(&[cell])));
        }
        html.push_str("</tr></thead><tbody>");
        for row in &lines[index + 2..body_end] {
            html.push_str("<tr>");
            for (k, cell) in cells(row).into_iter().enumerate() {
                html.push_str(&format!("<td{}>{}</td>", style(&aligns, k), cx.inline(&[cell])));
            }
            html.push_str("</tr>");
        }
        html.push_str("</tbody></table>");

        Some(BlockMatch::new(html, body_end - index))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::Markdrown;

    fn parse(text: &str) -> String {
        let mut engine = Markdrown::new();
        engine.register_all_builtins();
        engine.parse_with(text, false)
    }

    #[test]
    fn test_cells_strip_outer_pipes() {
        assert_eq!(cells("| a | b |"), vec!["a", "b"]);
        assert_eq!(cells("a|b"), vec!["a", "b"]);
    }

    #[test]
    fn test_alignment() {
        assert_eq!(alignment(":---:"), Some("center"));
        assert_eq!(alignment(":---"), Some("left"));
        assert_eq!(alignment("---:"), Some("right"));
        assert_eq!(alignment("---"), None);
    }

    #[test]
    fn test_table() {
        assert_eq!(
            parse("| Name | Qty |\n|:-----|----:|\n| **a** | 1 |\n| b | 2 |\n\nafter"),
            "<table><thead><tr><th style=\"text-align:left\">Name</th>\
             <th style=\"text-align:right\">Qty</th></tr></thead><tbody>\
             <tr><td style=\"text-align:left\"><strong>a</strong></td><td style=\"text-align:right\">1</td></tr>\
             <tr><td style=\"text-align:left\">b</td><td style=\"text-align:right\">2</td></tr>\
             </tbody></table>\n<p>after</p>"
        );
    }

    #[test]
    fn test_header_only() {
        assert_eq!(
            parse("a | b\n--- | ---"),
            "<table><thead><tr><th>a</th><th>b</th></tr></thead><tbody></tbody></table>"
        );
    }

    #[test]
    fn test_pipe_without_separator_is_paragraph() {
        assert_eq!(parse("a | b\nc"), "<p>a | b c</p>");
    }
}
