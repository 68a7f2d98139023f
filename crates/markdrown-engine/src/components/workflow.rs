//! Numbered workflow step cards.

use std::sync::LazyLock;

use regex::Regex;

use super::{COMPONENT_PRIORITY, delimited_block};
use crate::escape::escape_html;
use crate::plugin::{BlockMatch, BlockPlugin, ParseContext};

static STEP: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\d+)\.\s*(.+)$").unwrap());

struct Step<'a> {
    number: &'a str,
    title: &'a str,
    content: Vec<&'a str>,
}

/// `!workflow [Title]` with `N. Step title` lines followed by step content.
#[derive(Clone, Copy, Debug, Default)]
pub struct Workflow;

impl BlockPlugin for Workflow {
    fn name(&self) -> &str {
        "workflow"
    }

    fn priority(&self) -> i32 {
        COMPONENT_PRIORITY
    }

    fn parse(&self, lines: &[&str], index: usize, cx: &mut ParseContext<'_>) -> Option<BlockMatch> {
        let block = delimited_block(lines, index, "workflow")?;

        let mut steps: Vec<Step<'_>> = Vec::new();
        for &line in block.body {
            if let Some(caps) = STEP.captures(line) {
                steps.push(Step {
                    number: caps.get(1).map_or("", |m| m.as_str()),
                    title: caps.get(2).map_or("", |m| m.as_str().trim()),
                    content: Vec::new(),
                });
            } else if let Some(step) = steps.last_mut() {
                let trimmed = line.trim();
                if !trimmed.is_empty() {
                    step.content.push(trimmed);
                }
            }
        }

        let mut html = String::from("<div class=\"workflow-steps\"");
        if !block.argument.is_empty() {
            html.push_str(&format!(" data-title=\"{}\"", escape_html(block.argument)));
        }
        html.push('>');
        for step in &steps {
            let number = escape_html(step.number);
            html.push_str(&format!(
                "<div class=\"workflow-step\" data-step=\"{number}\"><div class=\"step-header\">\
                 <div class=\"step-number\">{number}</div><h4 class=\"step-title\">{}</h4></div>",
                escape_html(step.title)
            ));
            if !step.content.is_empty() {
                html.push_str(&format!("<div class=\"step-content\">{}</div>", cx.inline(&step.content)));
            }
            html.push_str("</div>");
        }
        html.push_str("</div>");

        Some(BlockMatch::new(html, block.lines_used))
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
    fn test_workflow() {
        assert_eq!(
            parse("!workflow Release\n1. Build\nRun `make`.\n\n2. Ship\n!/workflow"),
            "<div class=\"workflow-steps\" data-title=\"Release\">\
             <div class=\"workflow-step\" data-step=\"1\"><div class=\"step-header\">\
             <div class=\"step-number\">1</div><h4 class=\"step-title\">Build</h4></div>\
             <div class=\"step-content\">Run <code>make</code>.</div></div>\
             <div class=\"workflow-step\" data-step=\"2\"><div class=\"step-header\">\
             <div class=\"step-number\">2</div><h4 class=\"step-title\">Ship</h4></div></div>\
             </div>"
        );
    }

    #[test]
    fn test_lines_before_first_step_ignored() {
        let html = parse("!workflow\nintro\n1. Only\n!/workflow");
        assert!(!html.contains("intro"));
        assert!(html.starts_with("<div class=\"workflow-steps\">"));
    }

    #[test]
    fn test_unterminated_declines() {
        assert_eq!(parse("!workflow\nnotes"), "<p>!workflow notes</p>");
    }
}
