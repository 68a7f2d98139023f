//! Builtin inline plugins.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::escape::{escape_code, escape_html};
use crate::plugin::InlinePlugin;

static ICON: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"&([a-zA-Z0-9_-]+)&").unwrap());
static ICON_SEPARATORS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[_\s]+").unwrap());
static LINKED_IMAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[!\[([^\]]*)\]\(([^)]+)\)(?:\[(.*?)\])?\]\(([^)]+)\)").unwrap()
});
static IMAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[([^\]]*)\]\(([^)]+)\)(?:\[(.*?)\])?").unwrap());
static STRIKE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"~~(.*?)~~").unwrap());
static CODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`([^`]+?)`").unwrap());
static LINK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").unwrap());

/// Emphasis passes in the order they must run: combined markers before the
/// single markers they contain.
static EMPHASIS: LazyLock<Vec<(Regex, &'static str, &'static str)>> = LazyLock::new(|| {
    [
        (r"\*\*\*\+\+(.+?)\+\+\*\*\*", "<u><strong><em>", "</em></strong></u>"),
        (r"\*\*\*(.+?)\*\*\*", "<strong><em>", "</em></strong>"),
        (r"___(.+?)___", "<strong><em>", "</em></strong>"),
        (r"\*\*_(.+?)_\*\*", "<strong><em>", "</em></strong>"),
        (r"\*__(.+?)__\*", "<strong><em>", "</em></strong>"),
        (r"\*\*\+\+(.+?)\+\+\*\*", "<u><strong>", "</strong></u>"),
        (r"\+\+\*\*(.+?)\*\*\+\+", "<u><strong>", "</strong></u>"),
        (r"\*\+\+(.+?)\+\+\*", "<u><em>", "</em></u>"),
        (r"\+\+\*(.+?)\*\+\+", "<u><em>", "</em></u>"),
        (r"\+\+(.+?)\+\+", "<u>", "</u>"),
        (r"\*\*(.+?)\*\*", "<strong>", "</strong>"),
        (r"__(.+?)__", "<strong>", "</strong>"),
        (r"\*(.+?)\*", "<em>", "</em>"),
        (r"_(.+?)_", "<em>", "</em>"),
    ]
    .into_iter()
    .map(|(pattern, open, close)| (Regex::new(&format!("(?s){pattern}")).unwrap(), open, close))
    .collect()
});

fn figure(alt: &str, src: &str, caption: Option<&str>) -> String {
    let img = format!("<img src=\"{}\" alt=\"{}\">", escape_html(src), escape_html(alt));
    match caption.filter(|c| !c.is_empty()) {
        Some(caption) => format!("<figure>{img}<figcaption>{}</figcaption></figure>", escape_html(caption)),
        None => format!("<figure>{img}</figure>"),
    }
}

/// `&name&` renders a `data-lucide` icon. Names are lowercased with `_` and
/// whitespace runs turned into `-`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Icon;

impl InlinePlugin for Icon {
    fn name(&self) -> &str {
        "icon"
    }

    fn priority(&self) -> i32 {
        2
    }

    fn apply(&self, text: &str) -> String {
        ICON.replace_all(text, |caps: &Captures<'_>| {
            let lowered = caps[1].trim().to_lowercase();
            let name = ICON_SEPARATORS.replace_all(&lowered, "-");
            format!("<i data-lucide=\"{}\"></i>", escape_html(&name))
        })
        .into_owned()
    }
}

/// A double backslash `\\` renders `<br>`.
#[derive(Clone, Copy, Debug, Default)]
pub struct LineBreak;

impl InlinePlugin for LineBreak {
    fn name(&self) -> &str {
        "line-break"
    }

    fn priority(&self) -> i32 {
        3
    }

    fn apply(&self, text: &str) -> String {
        text.replace("\\\\", "<br>")
    }
}

/// `![alt](src)` with an optional `[caption]`, and the linked form
/// `[![alt](src)](href)`. Runs before [`Link`].
#[derive(Clone, Copy, Debug, Default)]
pub struct Image;

impl InlinePlugin for Image {
    fn name(&self) -> &str {
        "image"
    }

    fn priority(&self) -> i32 {
        5
    }

    fn apply(&self, text: &str) -> String {
        let linked = LINKED_IMAGE.replace_all(text, |caps: &Captures<'_>| {
            let caption = caps.get(3).map(|m| m.as_str());
            format!(
                "<a href=\"{}\">{}</a>",
                escape_html(&caps[4]),
                figure(&caps[1], &caps[2], caption)
            )
        });
        IMAGE
            .replace_all(&linked, |caps: &Captures<'_>| {
                figure(&caps[1], &caps[2], caps.get(3).map(|m| m.as_str()))
            })
            .into_owned()
    }
}

/// Bold, italic and underline (`++`) markers and their combinations.
#[derive(Clone, Copy, Debug, Default)]
pub struct Emphasis;

impl InlinePlugin for Emphasis {
    fn name(&self) -> &str {
        "emphasis"
    }

    fn priority(&self) -> i32 {
        10
    }

    fn apply(&self, text: &str) -> String {
        let mut result = text.to_owned();
        for (pattern, open, close) in EMPHASIS.iter() {
            result = pattern
                .replace_all(&result, |caps: &Captures<'_>| {
                    format!("{open}{}{close}", escape_html(&caps[1]))
                })
                .into_owned();
        }
        result
    }
}

/// `~~text~~` renders `<del>`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Strikethrough;

impl InlinePlugin for Strikethrough {
    fn name(&self) -> &str {
        "strikethrough"
    }

    fn priority(&self) -> i32 {
        12
    }

    fn apply(&self, text: &str) -> String {
        STRIKE
            .replace_all(text, |caps: &Captures<'_>| format!("<del>{}</del>", escape_html(&caps[1])))
            .into_owned()
    }
}

/// `` `code` `` renders `<code>` with escaped content.
#[derive(Clone, Copy, Debug, Default)]
pub struct InlineCode;

impl InlinePlugin for InlineCode {
    fn name(&self) -> &str {
        "inline-code"
    }

    fn priority(&self) -> i32 {
        30
    }

    fn apply(&self, text: &str) -> String {
        CODE.replace_all(text, |caps: &Captures<'_>| format!("<code>{}</code>", escape_code(&caps[1])))
            .into_owned()
    }
}

/// `[text](url)` renders an anchor; both parts are escaped.
#[derive(Clone, Copy, Debug, Default)]
pub struct Link;

impl InlinePlugin for Link {
    fn name(&self) -> &str {
        "link"
    }

    fn priority(&self) -> i32 {
        40
    }

    fn apply(&self, text: &str) -> String {
        LINK.replace_all(text, |caps: &Captures<'_>| {
            format!("<a href=\"{}\">{}</a>", escape_html(&caps[2]), escape_html(&caps[1]))
        })
        .into_owned()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_icon_normalized() {
        assert_eq!(Icon.apply("&Arrow_Right&"), "<i data-lucide=\"arrow-right\"></i>");
        assert_eq!(Icon.apply("a & b & c"), "a & b & c");
    }

    #[test]
    fn test_line_break() {
        assert_eq!(LineBreak.apply(r"one\\two"), "one<br>two");
        assert_eq!(LineBreak.apply(r"single\ slash"), r"single\ slash");
    }

    #[test]
    fn test_image_forms() {
        assert_eq!(Image.apply("![Logo](logo.png)"), "<figure><img src=\"logo.png\" alt=\"Logo\"></figure>");
        assert_eq!(
            Image.apply("![Logo](logo.png)[The logo]"),
            "<figure><img src=\"logo.png\" alt=\"Logo\"><figcaption>The logo</figcaption></figure>"
        );
        assert_eq!(
            Image.apply("[![Logo](logo.png)](https://example.com)"),
            "<a href=\"https://example.com\"><figure><img src=\"logo.png\" alt=\"Logo\"></figure></a>"
        );
    }

    #[test]
    fn test_emphasis_precedence() {
        assert_eq!(Emphasis.apply("***++all++***"), "<u><strong><em>all</em></strong></u>");
        assert_eq!(Emphasis.apply("***both***"), "<strong><em>both</em></strong>");
        assert_eq!(Emphasis.apply("**_both_**"), "<strong><em>both</em></strong>");
        assert_eq!(Emphasis.apply("++**ub**++"), "<u><strong>ub</strong></u>");
        assert_eq!(Emphasis.apply("*++ui++*"), "<u><em>ui</em></u>");
        assert_eq!(Emphasis.apply("++u++"), "<u>u</u>");
        assert_eq!(Emphasis.apply("**b** and __b__"), "<strong>b</strong> and <strong>b</strong>");
        assert_eq!(Emphasis.apply("*i* and _i_"), "<em>i</em> and <em>i</em>");
    }

    #[test]
    fn test_emphasis_escapes_content() {
        assert_eq!(Emphasis.apply("**a<b**"), "<strong>a&lt;b</strong>");
    }

    #[test]
    fn test_escaped_entities_not_escaped_again() {
        assert_eq!(Emphasis.apply("**a &amp; b**"), "<strong>a &amp; b</strong>");
        assert_eq!(
            Link.apply("[x](/?a=1&amp;b=2)"),
            "<a href=\"/?a=1&amp;b=2\">x</a>"
        );
        assert_eq!(Link.apply("[R&D;](x)"), "<a href=\"x\">R&amp;D;</a>");

        let mut engine = crate::Markdrown::new();
        engine.register_all_builtins();
        let once = engine.parse("**Tom & Jerry**");
        assert_eq!(once, "<p><strong>Tom &amp; Jerry</strong></p>");
        assert_eq!(engine.parse(&once), once);
    }

    #[test]
    fn test_unmatched_markers_stay_literal() {
        assert_eq!(Emphasis.apply("2 * 3"), "2 * 3");
        assert_eq!(Strikethrough.apply("~~open"), "~~open");
        assert_eq!(InlineCode.apply("`open"), "`open");
        assert_eq!(Link.apply("[text](broken"), "[text](broken");
    }

    #[test]
    fn test_strikethrough_and_code() {
        assert_eq!(Strikethrough.apply("~~gone~~"), "<del>gone</del>");
        assert_eq!(InlineCode.apply("run `a < b`"), "run <code>a &lt; b</code>");
    }

    #[test]
    fn test_link_escapes() {
        assert_eq!(
            Link.apply("[a \"q\"](http://x.y/?a=1&b=2)"),
            "<a href=\"http://x.y/?a=1&amp;b=2\">a &quot;q&quot;</a>"
        );
    }

    #[test]
    fn test_pipeline_order_through_engine() {
        let mut engine = crate::Markdrown::new();
        engine.register_all_builtins();
        assert_eq!(
            engine.parse("See [docs](/docs) and ![pic](p.png)"),
            "<p>See <a href=\"/docs\">docs</a> and <figure><img src=\"p.png\" alt=\"pic\"></figure></p>"
        );
    }
}
