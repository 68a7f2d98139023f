//! Task lists with checked, unchecked and partial states.

use std::sync::LazyLock;

use regex::Regex;

use crate::plugin::{BlockMatch, BlockPlugin, ParseContext};

static TASK_ITEM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\s*)(?:[*+-]|\d+\.)?\s*\[\s*([ xX-]?)\s*\]\s+(.+)$").unwrap()
});

fn indent_width(indent: &str) -> usize {
    indent.chars().map(|c| if c == '\t' { 4 } else { 1 }).sum()
}

fn state_class(mark: &str) -> &'static str {
    match mark {
        "x" | "X" => "task-checkbox task-checked",
        "-" => "task-checkbox task-partial",
        _ => "task-checkbox task-unchecked",
    }
}

fn parse_tasks(lines: &[&str], start: usize, base_indent: usize, cx: &ParseContext<'_>) -> (String, usize) {
    let mut items = String::new();
    let mut j = start;

    while let Some(caps) = lines.get(j).and_then(|l| TASK_ITEM.captures(l)) {
        let indent = indent_width(&caps[1]);
        if indent < base_indent {
            break;
        }

        let mut sub_start = j + 1;
        let mut children = String::new();
        while let Some(sub) = lines.get(sub_start).and_then(|l| TASK_ITEM.captures(l)) {
            let sub_indent = indent_width(&sub[1]);
            if sub_indent <= indent {
                break;
            }
            let (html, used) = parse_tasks(lines, sub_start, sub_indent, cx);
            children.push_str(&html);
            sub_start += used;
        }

        items.push_str(&format!(
            "<li class=\"task-item\"><span class=\"{}\"></span>{}{children}</li>",
            state_class(&caps[2]),
            cx.inline(&[&caps[3]]),
        ));
        j = sub_start;
    }

    (format!("<ul class=\"task-list\">{items}</ul>"), j - start)
}

/// `- [ ] todo`, `- [x] done`, `- [-] partial`. The list marker is optional
/// and deeper indentation nests; tabs count as four spaces.
#[derive(Clone, Copy, Debug, Default)]
pub struct TaskList;

impl BlockPlugin for TaskList {
    fn name(&self) -> &str {
        "task-list"
    }

    fn priority(&self) -> i32 {
        5
    }

    fn parse(&self, lines: &[&str], index: usize, cx: &mut ParseContext<'_>) -> Option<BlockMatch> {
        if !TASK_ITEM.is_match(lines[index]) {
            return None;
        }
        let (html, used) = parse_tasks(lines, index, 0, cx);
        Some(BlockMatch::new(html, used))
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
    fn test_three_states_one_list() {
        assert_eq!(
            parse("- [ ] a\n- [x] b\n- [-] c"),
            "<ul class=\"task-list\">\
             <li class=\"task-item\"><span class=\"task-checkbox task-unchecked\"></span>a</li>\
             <li class=\"task-item\"><span class=\"task-checkbox task-checked\"></span>b</li>\
             <li class=\"task-item\"><span class=\"task-checkbox task-partial\"></span>c</li>\
             </ul>"
        );
    }

    #[test]
    fn test_marker_optional_and_uppercase() {
        assert_eq!(
            parse("[X] done"),
            "<ul class=\"task-list\"><li class=\"task-item\">\
             <span class=\"task-checkbox task-checked\"></span>done</li></ul>"
        );
    }

    #[test]
    fn test_nested_tasks() {
        assert_eq!(
            parse("- [ ] parent\n    - [x] child\n- [ ] sibling"),
            "<ul class=\"task-list\">\
             <li class=\"task-item\"><span class=\"task-checkbox task-unchecked\"></span>parent\
             <ul class=\"task-list\"><li class=\"task-item\"><span class=\"task-checkbox task-checked\"></span>child</li></ul>\
             </li>\
             <li class=\"task-item\"><span class=\"task-checkbox task-unchecked\"></span>sibling</li>\
             </ul>"
        );
    }

    #[test]
    fn test_consumes_only_task_lines() {
        let html = parse("- [ ] a\n- plain");
        assert!(html.ends_with("</ul>\n<ul><li>plain</li></ul>"));
    }
}
