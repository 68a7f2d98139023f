//! Constellation: a central node with satellites on a circle and a details
//! panel per node.
//!
//! ```text
//! !constellation team
//! * lead | crown | Ada | Ada Lovelace, Lead
//! Sets direction.
//! %Since 2019, [profile](https://example.com/ada)
//! * dev | ![](img/grace.png) | Grace
//! Ships things.
//! !/constellation
//! ```

use std::cell::RefCell;
use std::f64::consts::PI;
use std::rc::Rc;
use std::sync::LazyLock;

use lol_html::{RewriteStrSettings, element};
use regex::Regex;

use super::{COMPONENT_PRIORITY, delimited_block};
use crate::escape::escape_html;
use crate::plugin::{BlockMatch, BlockPlugin, ParseContext};
use crate::post_render::{
    PostRenderCallbacks, PostRenderContext, PostRenderError, RenderRoot, SingleSelection,
};

static NODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\*\s+([a-z0-9-]+)\s*\|\s*([^|]+?)\s*\|\s*(.+?)(?:\s*\|\s*(.+))?$").unwrap()
});
static IMAGE_ICON: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^!\[.*?\]\((.+?)\)$").unwrap());
static META: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^%\s*(.+)$").unwrap());
static META_LINK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[(.+?)\]\((.+?)\)").unwrap());

const DEFAULT_ID: &str = "Constellation";

/// Attribute set on frames once initialized.
pub const INITIALIZED_ATTR: &str = "data-constellation-initialized";

/// Circle geometry in percent of the container.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ConstellationLayout {
    pub center_x: f64,
    pub center_y: f64,
    pub radius: f64,
}

impl Default for ConstellationLayout {
    fn default() -> Self {
        Self {
            center_x: 50.0,
            center_y: 45.0,
            radius: 35.0,
        }
    }
}

/// Node position in percent, rounded to two decimals.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodePosition {
    pub left: f64,
    pub top: f64,
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

impl ConstellationLayout {
    /// Positions for `count` nodes.
    ///
    /// Node 0 sits at the center. The remaining `count - 1` satellites are
    /// spread evenly clockwise starting at 12 o'clock:
    /// `angle_k = 2πk / (count - 1) - π/2`.
    ///
    /// # Examples
    ///
    /// ```
    /// use markdrown_engine::{ConstellationLayout, NodePosition};
    ///
    /// let layout = ConstellationLayout::default();
    /// let positions = layout.positions(3);
    /// assert_eq!(positions[0], NodePosition { left: 50.0, top: 45.0 });
    /// assert_eq!(positions[1], NodePosition { left: 50.0, top: 10.0 });
    /// assert_eq!(positions[2], NodePosition { left: 50.0, top: 80.0 });
    /// ```
    #[must_use]
    pub fn positions(&self, count: usize) -> Vec<NodePosition> {
        if count == 0 {
            return Vec::new();
        }
        let mut positions = vec![NodePosition {
            left: self.center_x,
            top: self.center_y,
        }];
        let satellites = count - 1;
        for k in 0..satellites {
            #[allow(clippy::cast_precision_loss)]
            let angle = (k as f64 * 2.0 * PI) / satellites as f64 - PI / 2.0;
            positions.push(NodePosition {
                left: round2(self.center_x + self.radius * angle.cos()),
                top: round2(self.center_y + self.radius * angle.sin()),
            });
        }
        positions
    }
}

enum NodeIcon<'a> {
    Icon(&'a str),
    Image(&'a str),
}

struct Node<'a> {
    id: &'a str,
    icon: NodeIcon<'a>,
    title: &'a str,
    long_title: &'a str,
    meta: String,
    content: Vec<&'a str>,
}

fn render_meta_part(part: &str) -> String {
    let Some(caps) = META_LINK.captures(part) else {
        return format!("<span class=\"stat-item\">{}</span>", escape_html(part));
    };
    let Some(whole) = caps.get(0) else {
        return String::new();
    };
    let before = part[..whole.start()].trim();
    let after = part[whole.end()..].trim();

    let mut html = String::from("<span class=\"stat-item\">");
    if !before.is_empty() {
        html.push_str(&escape_html(before));
        html.push(' ');
    }
    html.push_str(&format!(
        "<a href=\"{}\">{}<i data-lucide=\"external-link\"></i></a>",
        escape_html(&caps[2]),
        escape_html(&caps[1])
    ));
    if !after.is_empty() {
        html.push(' ');
        html.push_str(&escape_html(after));
    }
    html.push_str("</span>");
    html
}

/// `!constellation [panel-id]` block. Declines when it has no nodes.
#[derive(Clone, Debug, Default)]
pub struct Constellation {
    layout: ConstellationLayout,
}

impl Constellation {
    #[must_use]
    pub fn new(layout: ConstellationLayout) -> Self {
        Self { layout }
    }
}

impl BlockPlugin for Constellation {
    fn name(&self) -> &str {
        "constellation"
    }

    fn priority(&self) -> i32 {
        COMPONENT_PRIORITY
    }

    fn parse(&self, lines: &[&str], index: usize, cx: &mut ParseContext<'_>) -> Option<BlockMatch> {
        let block = delimited_block(lines, index, "constellation")?;
        let section_id = if block.argument.is_empty() {
            DEFAULT_ID
        } else {
            block.argument
        };

        let mut nodes: Vec<Node<'_>> = Vec::new();
        // Meta declared before the first node applies to the next node.
        let mut pending_meta = String::new();
        for &line in block.body {
            if let Some(caps) = NODE.captures(line) {
                let field = |n| caps.get(n).map(|m| m.as_str().trim());
                let icon_field = field(2).unwrap_or_default();
                let icon = match IMAGE_ICON.captures(icon_field).and_then(|c| c.get(1)) {
                    Some(src) => NodeIcon::Image(src.as_str()),
                    None => NodeIcon::Icon(icon_field),
                };
                let title = field(3).unwrap_or_default();
                nodes.push(Node {
                    id: field(1).unwrap_or_default(),
                    icon,
                    title,
                    long_title: field(4).unwrap_or(title),
                    meta: std::mem::take(&mut pending_meta),
                    content: Vec::new(),
                });
                continue;
            }
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            if let Some(caps) = META.captures(line) {
                let text = caps.get(1).map_or("", |m| m.as_str().trim());
                match nodes.last_mut() {
                    Some(node) if node.meta.is_empty() => node.meta = text.to_owned(),
                    Some(node) => {
                        node.meta.push(' ');
                        node.meta.push_str(text);
                    }
                    None => text.clone_into(&mut pending_meta),
                }
            } else if let Some(node) = nodes.last_mut() {
                node.content.push(trimmed);
            }
        }
        if nodes.is_empty() {
            return None;
        }

        let positions = self.layout.positions(nodes.len());
        let mut html = String::from("<div class=\"constellation frame\"><div class=\"constellation-container\">");
        for (i, (node, position)) in nodes.iter().zip(&positions).enumerate() {
            let class = if i == 0 {
                "node-btn central"
            } else {
                "node-btn satellite"
            };
            let core = match node.icon {
                NodeIcon::Icon(name) => format!("<i data-lucide=\"{}\"></i>", escape_html(name)),
                NodeIcon::Image(src) => format!(
                    "<img src=\"{}\" alt=\"{}\" style=\"width: 100%; height: 100%; object-fit: cover; border-radius: 50%;\">",
                    escape_html(src),
                    escape_html(node.title)
                ),
            };
            html.push_str(&format!(
                "<div class=\"{class}\" data-constellation=\"{}\" style=\"left: {}%; top: {}%;\">\
                 <div class=\"core\">{core}</div><div class=\"label\">{}</div></div>",
                escape_html(node.id),
                position.left,
                position.top,
                escape_html(node.title)
            ));
        }
        html.push_str("</div><hr />");

        html.push_str(&format!(
            "<div class=\"constellation-details\" data-constellation=\"{}\">",
            escape_html(section_id)
        ));
        for (i, node) in nodes.iter().enumerate() {
            let display = if i == 0 { "block" } else { "none" };
            let icon = match node.icon {
                NodeIcon::Icon(name) => format!("<i data-lucide=\"{}\" class=\"lucide\"></i>", escape_html(name)),
                NodeIcon::Image(src) => format!(
                    "<img src=\"{}\" alt=\"{} profile photo\" width=\"34\" height=\"34\">",
                    escape_html(src),
                    escape_html(node.title)
                ),
            };
            html.push_str(&format!(
                "<div class=\"constellation-content\" data-constellation=\"{}\" style=\"display: {display};\">\
                 <div class=\"panel-icon\">{icon}</div><div class=\"panel-text\"><h4>{}</h4>",
                escape_html(node.id),
                escape_html(node.long_title)
            ));
            if !node.content.is_empty() {
                html.push_str(&format!("<p>{}</p>", cx.inline(&node.content)));
            }
            let parts: Vec<&str> = node
                .meta
                .split(',')
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .collect();
            if !parts.is_empty() {
                html.push_str("<div class=\"stats\">");
                for part in parts {
                    html.push_str(&render_meta_part(part));
                }
                html.push_str("</div>");
            }
            html.push_str("</div></div>");
        }
        html.push_str("</div></div>");

        Some(BlockMatch::new(html, block.lines_used))
    }

    fn post_render(&self, callbacks: &mut PostRenderCallbacks) {
        callbacks.register(select_first_nodes);
    }
}

/// Initialize each constellation frame once: mark it and select its first
/// node. Selection is scoped to the frame it belongs to.
pub(crate) fn select_first_nodes(
    root: &mut RenderRoot,
    _context: &PostRenderContext,
) -> Result<(), PostRenderError> {
    // Selection of the frame being rewritten; `None` inside initialized frames.
    let current: Rc<RefCell<Option<SingleSelection>>> = Rc::new(RefCell::new(None));
    root.rewrite(RewriteStrSettings {
        element_content_handlers: vec![
            element!(".constellation.frame", {
                let current = Rc::clone(&current);
                move |el| {
                    if el.get_attribute(INITIALIZED_ATTR).is_some() {
                        *current.borrow_mut() = None;
                        return Ok(());
                    }
                    el.set_attribute(INITIALIZED_ATTR, "true")?;
                    *current.borrow_mut() = Some(SingleSelection::new());
                    Ok(())
                }
            }),
            element!(".constellation.frame .node-btn", {
                let current = Rc::clone(&current);
                move |el| {
                    let mut current = current.borrow_mut();
                    let Some(selection) = current.as_mut() else {
                        return Ok(());
                    };
                    if selection.active().is_none() {
                        selection.select(&el.get_attribute("data-constellation").unwrap_or_default());
                        let class = el.get_attribute("class").unwrap_or_default();
                        el.set_attribute("class", &format!("{class} selected"))?;
                    }
                    Ok(())
                }
            }),
        ],
        ..RewriteStrSettings::default()
    })
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
    fn test_positions_four_nodes() {
        let p = ConstellationLayout::default().positions(4);
        assert_eq!(p.len(), 4);
        assert_eq!(p[0], NodePosition { left: 50.0, top: 45.0 });
        // -90°, 30°, 150° on a radius of 35.
        assert_eq!(p[1], NodePosition { left: 50.0, top: 10.0 });
        assert_eq!(p[2], NodePosition { left: 80.31, top: 62.5 });
        assert_eq!(p[3], NodePosition { left: 19.69, top: 62.5 });
    }

    #[test]
    fn test_positions_edge_counts() {
        let layout = ConstellationLayout::default();
        assert!(layout.positions(0).is_empty());
        assert_eq!(layout.positions(1), vec![NodePosition { left: 50.0, top: 45.0 }]);
    }

    #[test]
    fn test_custom_layout() {
        let layout = ConstellationLayout {
            center_x: 0.0,
            center_y: 0.0,
            radius: 10.0,
        };
        assert_eq!(layout.positions(2)[1], NodePosition { left: 0.0, top: -10.0 });
    }

    #[test]
    fn test_constellation() {
        let html = parse(
            "!constellation team\n%Founder\n* lead | crown | Ada | Ada Lovelace\nSets **direction**.\n\
             %Since 2019, see [profile](https://x.io/ada) here\n* dev | ![](g.png) | Grace\n!/constellation",
        );
        assert_eq!(
            html,
            "<div class=\"constellation frame\"><div class=\"constellation-container\">\
             <div class=\"node-btn central\" data-constellation=\"lead\" style=\"left: 50%; top: 45%;\">\
             <div class=\"core\"><i data-lucide=\"crown\"></i></div><div class=\"label\">Ada</div></div>\
             <div class=\"node-btn satellite\" data-constellation=\"dev\" style=\"left: 50%; top: 10%;\">\
             <div class=\"core\"><img src=\"g.png\" alt=\"Grace\" style=\"width: 100%; height: 100%; object-fit: cover; border-radius: 50%;\"></div>\
             <div class=\"label\">Grace</div></div>\
             </div><hr />\
             <div class=\"constellation-details\" data-constellation=\"team\">\
             <div class=\"constellation-content\" data-constellation=\"lead\" style=\"display: block;\">\
             <div class=\"panel-icon\"><i data-lucide=\"crown\" class=\"lucide\"></i></div>\
             <div class=\"panel-text\"><h4>Ada Lovelace</h4><p>Sets <strong>direction</strong>.</p>\
             <div class=\"stats\"><span class=\"stat-item\">Founder Since 2019</span>\
             <span class=\"stat-item\">see <a href=\"https://x.io/ada\">profile<i data-lucide=\"external-link\"></i></a> here</span>\
             </div></div></div>\
             <div class=\"constellation-content\" data-constellation=\"dev\" style=\"display: none;\">\
             <div class=\"panel-icon\"><img src=\"g.png\" alt=\"Grace profile photo\" width=\"34\" height=\"34\"></div>\
             <div class=\"panel-text\"><h4>Grace</h4></div></div>\
             </div></div>"
        );
    }

    #[test]
    fn test_no_nodes_declines() {
        assert_eq!(parse("!constellation\n!/constellation"), "<p>!constellation !/constellation</p>");
    }

    #[test]
    fn test_select_first_node_once_per_frame() {
        let html = parse("!constellation\n* a | star | A\n* b | moon | B\n!/constellation");
        let two = format!("{html}\n{html}");
        let mut root = RenderRoot::new(two);
        select_first_nodes(&mut root, &PostRenderContext::default()).unwrap();
        let out = root.html().to_owned();
        assert_eq!(out.matches("node-btn central selected").count(), 2);
        assert_eq!(out.matches("node-btn satellite selected").count(), 0);
        assert_eq!(out.matches("data-constellation-initialized=\"true\"").count(), 2);

        select_first_nodes(&mut root, &PostRenderContext::default()).unwrap();
        assert_eq!(root.html(), out);
    }
}
