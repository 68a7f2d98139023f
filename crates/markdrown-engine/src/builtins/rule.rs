//! Horizontal rules.

use crate::plugin::{BlockMatch, BlockPlugin, ParseContext};

/// Up to three leading spaces, then three or more of the same `-`, `*` or
/// `_`, optionally separated by whitespace.
fn is_rule(line: &str) -> bool {
    let indent = line.len() - line.trim_start_matches(' ').len();
    if indent > 3 {
        return false;
    }
    let mut marks = line[indent..].chars().filter(|c| !c.is_whitespace());
    let Some(first) = marks.next() else {
        return false;
    };
    if !matches!(first, '-' | '*' | '_') {
        return false;
    }
    let mut count = 1;
    for c in marks {
        if c != first {
            return false;
        }
        count += 1;
    }
    count >= 3
}

#[derive(Clone, Copy, Debug, Default)]
pub struct HorizontalRule;

impl BlockPlugin for HorizontalRule {
    fn name(&self) -> &str {
        "horizontal-rule"
    }

    fn priority(&self) -> i32 {
        25
    }

    fn parse(&self, lines: &[&str], index: usize, _cx: &mut ParseContext<'_>) -> Option<BlockMatch> {
        is_rule(lines[index]).then(|| BlockMatch::new("<hr>", 1))
    }
}
