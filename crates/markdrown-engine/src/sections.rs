//! Section wrapping.
//!
//! Groups every `<h3` line and the lines following it into
//! `<div class="section">` until the next `<h3` line or a line that opens an
//! existing `class="section` div. Existing section divs pass through unchanged,
//! matched to their closing tag by div depth.

use std::sync::LazyLock;

use regex::Regex;

static DIV_OPEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<div[^>]*>").unwrap());

fn opens_section(line: &str) -> bool {
    let line = line.trim();
    line.contains("<div") && line.contains("class=\"section")
}

fn starts_heading(line: &str) -> bool {
    line.trim().contains("<h3")
}

fn div_balance(line: &str) -> isize {
    let opens = DIV_OPEN.find_iter(line).count();
    let closes = line.matches("</div>").count();
    opens.cast_signed() - closes.cast_signed()
}

/// Wrap `h3`-led runs of lines into section divs.
///
/// # Examples
///
/// ```
/// use markdrown_engine::wrap_sections;
///
/// assert_eq!(wrap_sections("<p>x</p>"), "<p>x</p>");
/// assert_eq!(
///     wrap_sections("<h3>A</h3>\n<p>a</p>"),
///     "<div class=\"section\">\n<h3>A</h3>\n<p>a</p>\n</div>"
/// );
/// ```
#[must_use]
pub fn wrap_sections(html: &str) -> String {
    let lines: Vec<&str> = html.split('\n').collect();
    let mut result: Vec<&str> = Vec::with_capacity(lines.len());
    let mut i = 0;

    while i < lines.len() {
        if opens_section(lines[i]) {
            let mut depth = 0;
            while i < lines.len() {
                result.push(lines[i]);
                depth += div_balance(lines[i]);
                i += 1;
                if depth == 0 {
                    break;
                }
            }
        } else if starts_heading(lines[i]) {
            result.push("<div class=\"section\">");
            result.push(lines[i]);
            i += 1;
            while i < lines.len() && !starts_heading(lines[i]) && !opens_section(lines[i]) {
                result.push(lines[i]);
                i += 1;
            }
            result.push("</div>");
        } else {
            result.push(lines[i]);
            i += 1;
        }
    }

    result.join("\n")
}
