//! Nested bullet, numbered and alphabetic lists.

use std::sync::LazyLock;

use regex::Regex;

use crate::plugin::{BlockMatch, BlockPlugin, ParseContext};

static LIST_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\s*)([*+-]|\d+\.|[a-zA-Z]\.)(\s+)(.+)$").unwrap());

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ListKind {
    Bullet,
    Numbered,
    /// `a.` or `A.` markers, carrying the case for `<ol type>`.
    Alpha(char),
}

impl ListKind {
    fn from_marker(marker: &str) -> Self {
        match marker.chars().next() {
            Some('*' | '+' | '-') => Self::Bullet,
            Some(c) if c.is_ascii_digit() => Self::Numbered,
            Some(c) if c.is_ascii_lowercase() => Self::Alpha('a'),
            Some(_) => Self::Alpha('A'),
            None => Self::Bullet,
        }
    }

    fn wrap(self, items: &str) -> String {
        match self {
            Self::Bullet => format!("<ul>{items}</ul>"),
            Self::Numbered => format!("<ol>{items}</ol>"),
            Self::Alpha(case) => format!("<ol type=\"{case}\">{items}</ol>"),
        }
    }
}

/// Indentation width with tabs counted as two columns.
fn indent_width(indent: &str) -> usize {
    indent.chars().map(|c| if c == '\t' { 2 } else { 1 }).sum()
}

fn item_indent(line: &str) -> Option<usize> {
    LIST_ITEM.captures(line).map(|caps| indent_width(&caps[1]))
}

/// Parse items indented at least `base_indent`, returning the HTML and the
/// number of lines consumed.
fn parse_list(lines: &[&str], start: usize, base_indent: usize, cx: &ParseContext<'_>) -> (String, usize) {
    let mut items: Vec<(ListKind, String)> = Vec::new();
    let mut i = start;

    while let Some(caps) = lines.get(i).and_then(|l| LIST_ITEM.captures(l)) {
        let indent = indent_width(&caps[1]);
        if indent < base_indent {
            break;
        }

        let mut j = i + 1;
        while lines.get(j).and_then(|l| item_indent(l)).is_some_and(|sub| sub > indent) {
            j += 1;
        }

        let mut html = format!("<li>{}", cx.inline(&[&caps[4]]));
        if j > i + 1 {
            let (sub, _) = parse_list(&lines[i + 1..j], 0, indent + 1, cx);
            html.push_str(&sub);
        }
        html.push_str("</li>");
        items.push((ListKind::from_marker(&caps[2]), html));
        i = j;
    }

    // A change of list kind or alpha case starts a sibling list.
    let mut html = String::new();
    let mut run: Option<(ListKind, String)> = None;
    for (kind, item) in items {
        if let Some((current, buf)) = run.as_mut()
            && *current == kind
        {
            buf.push_str(&item);
            continue;
        }
        if let Some((current, buf)) = run.replace((kind, item)) {
            html.push_str(&current.wrap(&buf));
        }
    }
    if let Some((current, buf)) = run {
        html.push_str(&current.wrap(&buf));
    }

    (html, i - start)
}

/// Bullet (`-`, `*`, `+`), numbered (`1.`) and alphabetic (`a.`, `A.`) lists.
/// Deeper indentation nests; tabs count as two spaces.
#[derive(Clone, Copy, Debug, Default)]
pub struct NestedList;

impl BlockPlugin for NestedList {
    fn name(&self) -> &str {
        "nested-list"
    }

    fn priority(&self) -> i32 {
        30
    }

    fn parse(&self, lines: &[&str], index: usize, cx: &mut ParseContext<'_>) -> Option<BlockMatch> {
        if !LIST_ITEM.is_match(lines[index]) {
            return None;
        }
        let (html, used) = parse_list(lines, index, 0, cx);
        Some(BlockMatch::new(html, used))
    }
}
