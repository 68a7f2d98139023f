//! Twelve-column grid layout blocks.

use crate::escape::escape_html;
use crate::plugin::{BlockMatch, BlockPlugin, ParseContext};

fn is_close(line: &str) -> bool {
    line.strip_prefix("#!~").is_some_and(|rest| rest.trim().is_empty())
}

/// Split tokens into `!class` names and the remaining words.
fn split_classes<'a>(tokens: &[&'a str]) -> (Vec<&'a str>, Vec<&'a str>) {
    let mut classes = Vec::new();
    let mut rest = Vec::new();
    for token in tokens {
        match token.strip_prefix('!') {
            Some(class) if !class.is_empty() && rest.is_empty() => classes.push(class),
            _ => rest.push(*token),
        }
    }
    (classes, rest)
}

#[derive(Debug, PartialEq, Eq)]
struct CellHeader<'a> {
    width: u8,
    classes: Vec<&'a str>,
    justify: Option<&'static str>,
}

/// `#N [!class ...] [left|center|right|start|end]` with `N` in `1..=12`.
fn cell_header(line: &str) -> Option<CellHeader<'_>> {
    let mut tokens = line.split_whitespace();
    let width: u8 = tokens.next()?.strip_prefix('#')?.parse().ok()?;
    if !(1..=12).contains(&width) {
        return None;
    }
    let tokens: Vec<&str> = tokens.collect();
    let (classes, rest) = split_classes(&tokens);
    let justify = match rest.as_slice() {
        [] => None,
        ["left" | "start"] => Some("start"),
        ["center"] => Some("center"),
        ["right" | "end"] => Some("end"),
        _ => return None,
    };
    Some(CellHeader {
        width,
        classes,
        justify,
    })
}

struct Cell<'a> {
    header: CellHeader<'a>,
    body: Vec<&'a str>,
}

/// A grid opened by `#~ [!class ...] [Title]` and closed by `#!~`. Cell
/// headers `#1` to `#12` start columns whose bodies are parsed as nested
/// documents. Without a closing line the opener is left to other plugins.
#[derive(Clone, Copy, Debug, Default)]
pub struct Grid;

impl BlockPlugin for Grid {
    fn name(&self) -> &str {
        "grid"
    }

    fn priority(&self) -> i32 {
        13
    }

    fn parse(&self, lines: &[&str], index: usize, cx: &mut ParseContext<'_>) -> Option<BlockMatch> {
        let opener = lines[index].strip_prefix("#~")?;
        let close = index + 1 + lines[index + 1..].iter().position(|l| is_close(l))?;

        let tokens: Vec<&str> = opener.split_whitespace().collect();
        let (classes, title) = split_classes(&tokens);
        let title = title.join(" ");

        let mut cells: Vec<Cell<'_>> = Vec::new();
        for &line in &lines[index + 1..close] {
            if let Some(header) = cell_header(line) {
                cells.push(Cell {
                    header,
                    body: Vec::new(),
                });
            } else if let Some(cell) = cells.last_mut() {
                cell.body.push(line);
            }
        }

        let mut html = String::from("<div class=\"grid-container");
        for class in &classes {
            html.push(' ');
            html.push_str(class);
        }
        html.push_str("\">");
        if !title.is_empty() {
            html.push_str(&format!("<div class=\"grid-title\">{}</div>", escape_html(&title)));
        }
        for cell in &cells {
            let mut class = format!("col-{}", cell.header.width);
            for custom in &cell.header.classes {
                class.push(' ');
                class.push_str(custom);
            }
            if let Some(justify) = cell.header.justify {
                class.push_str(" justify-");
                class.push_str(justify);
            }
            let body = if cell.body.is_empty() {
                String::new()
            } else {
                cx.parse_nested(&cell.body.join("\n"))
            };
            html.push_str(&format!("<div class=\"{class}\">{body}</div>"));
        }
        html.push_str("</div>");

        Some(BlockMatch::new(html, close - index + 1))
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
    fn test_cell_header() {
        assert_eq!(
            cell_header("#4 !card !wide right"),
            Some(CellHeader {
                width: 4,
                classes: vec!["card", "wide"],
                justify: Some("end"),
            })
        );
        assert_eq!(
            cell_header("#12"),
            Some(CellHeader {
                width: 12,
                classes: vec![],
                justify: None,
            })
        );
        assert_eq!(cell_header("#13"), None);
        assert_eq!(cell_header("#0"), None);
        assert_eq!(cell_header("#3 some words"), None);
        assert_eq!(cell_header("# Heading"), None);
    }

    #[test]
    fn test_grid() {
        assert_eq!(
            parse("#~ !cards Our Team\n#6 center\n**Alice**\n#6 !muted\n- x\n#!~\nafter"),
            "<div class=\"grid-container cards\"><div class=\"grid-title\">Our Team</div>\
             <div class=\"col-6 justify-center\"><p><strong>Alice</strong></p></div>\
             <div class=\"col-6 muted\"><ul><li>x</li></ul></div></div>\n<p>after</p>"
        );
    }

    #[test]
    fn test_empty_cell() {
        assert_eq!(
            parse("#~\n#12\n#!~"),
            "<div class=\"grid-container\"><div class=\"col-12\"></div></div>"
        );
    }

    #[test]
    fn test_unterminated_declines() {
        assert_eq!(parse("#~ Title\n#6\ntext"), "<p>#~ Title #6 text</p>");
    }

    #[test]
    fn test_nested_grid_cell_parses_headings() {
        let html = parse("#~\n#6\n## Inside\n#!~");
        assert_eq!(html, "<div class=\"grid-container\"><div class=\"col-6\"><h2>Inside</h2></div></div>");
    }
}
