//! Features list: selectable items with expandable description panels.
//!
//! ```text
//! !features Highlights
//! * fast | zap | Fast
//! /Under a millisecond
//! Renders **quickly**.
//! * safe | shield | Safe
//! Memory safe by default.
//! %rust, [docs](https://example.com)
//! !/features
//! ```

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::LazyLock;

use lol_html::html_content::Element;
use lol_html::{RewriteStrSettings, element};
use regex::Regex;

use super::{COMPONENT_PRIORITY, delimited_block};
use crate::escape::escape_html;
use crate::plugin::{BlockMatch, BlockPlugin, ParseContext};
use crate::post_render::{
    PostRenderCallbacks, PostRenderContext, PostRenderError, RenderRoot, SingleSelection,
};

type HandlerError = Box<dyn std::error::Error + Send + Sync>;

static ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\*\s+([a-z0-9-]+)\s*\|\s*([a-z0-9-]+)\s*\|\s*(.+)$").unwrap());
static TAGS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^%\s*(.+)$").unwrap());
static TAG_LINK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[(.+)\]\((.+)\)").unwrap());

/// Expansion mode written on initialized lists.
pub const EXPANSION_MODE: &str = "single";

#[derive(Debug, Default)]
struct Feature<'a> {
    id: &'a str,
    icon: &'a str,
    title: &'a str,
    meta: Option<&'a str>,
    content: Vec<&'a str>,
}

fn render_tag(tag: &str, cx: &ParseContext<'_>) -> String {
    match TAG_LINK.captures(tag) {
        Some(caps) => format!(
            "<span class=\"tag\"><a href=\"{}\">{}<i data-lucide=\"external-link\"></i></a></span>",
            escape_html(&caps[2]),
            escape_html(&caps[1])
        ),
        None => format!("<span class=\"tag\">{}</span>", cx.inline(&[tag])),
    }
}

/// `!features` block. The last `%` line sets tags shown on every panel.
#[derive(Clone, Copy, Debug, Default)]
pub struct Features;

impl BlockPlugin for Features {
    fn name(&self) -> &str {
        "features"
    }

    fn priority(&self) -> i32 {
        COMPONENT_PRIORITY
    }

    fn parse(&self, lines: &[&str], index: usize, cx: &mut ParseContext<'_>) -> Option<BlockMatch> {
        let block = delimited_block(lines, index, "features")?;
        let title = if block.argument.is_empty() {
            "Features"
        } else {
            block.argument
        };

        let mut features: Vec<Feature<'_>> = Vec::new();
        let mut tags: Vec<&str> = Vec::new();
        for &line in block.body {
            if let Some(caps) = TAGS.captures(line) {
                let parsed: Vec<&str> = caps
                    .get(1)
                    .map_or("", |m| m.as_str())
                    .split(',')
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .collect();
                if !parsed.is_empty() {
                    tags = parsed;
                }
                continue;
            }
            if let Some(caps) = ITEM.captures(line) {
                let field = |n| caps.get(n).map_or("", |m| m.as_str().trim());
                features.push(Feature {
                    id: field(1),
                    icon: field(2),
                    title: field(3),
                    ..Feature::default()
                });
                continue;
            }
            let Some(feature) = features.last_mut() else {
                continue;
            };
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            match trimmed.strip_prefix('/') {
                Some(meta) if feature.meta.is_none() => feature.meta = Some(meta.trim()),
                _ => feature.content.push(trimmed),
            }
        }

        let mut html = format!(
            "<div class=\"feature-list\" data-title=\"{}\"><ul>",
            escape_html(title)
        );
        for feature in &features {
            html.push_str(&format!(
                "<li data-feature=\"{}\"><i data-lucide=\"{}\" class=\"lucide\"></i> {}</li>",
                escape_html(feature.id),
                escape_html(feature.icon),
                escape_html(feature.title)
            ));
        }
        html.push_str("</ul><div class=\"feature-descriptions\">");
        for feature in &features {
            html.push_str(&format!(
                "<div class=\"feature-description\" data-feature=\"{}\"><h4><i data-lucide=\"{}\" class=\"lucide\"></i> {}</h4>",
                escape_html(feature.id),
                escape_html(feature.icon),
                escape_html(feature.title)
            ));
            if let Some(meta) = feature.meta.filter(|m| !m.is_empty()) {
                html.push_str(&format!("<div class=\"feature-meta\">{}</div>", escape_html(meta)));
            }
            if !feature.content.is_empty() {
                html.push_str(&format!(
                    "<div class=\"feature-content\">{}</div>",
                    cx.inline(&feature.content)
                ));
            }
            if !tags.is_empty() {
                html.push_str("<div class=\"feature-tags\">");
                for tag in &tags {
                    html.push_str(&render_tag(tag, cx));
                }
                html.push_str("</div>");
            }
            html.push_str("</div>");
        }
        html.push_str("</div></div>");

        Some(BlockMatch::new(html, block.lines_used))
    }

    fn post_render(&self, callbacks: &mut PostRenderCallbacks) {
        callbacks.register(prepare_feature_lists);
    }
}

/// [`PostRenderContext::extra`] key naming the feature to expand initially.
pub const ACTIVE_FEATURE_KEY: &str = "active-feature";

fn add_class(el: &mut Element<'_, '_>, class: &str) -> Result<(), HandlerError> {
    let classes = el.get_attribute("class").unwrap_or_default();
    if !classes.split_whitespace().any(|c| c == class) {
        let joined = if classes.is_empty() {
            class.to_owned()
        } else {
            format!("{classes} {class}")
        };
        el.set_attribute("class", &joined)?;
    }
    Ok(())
}

/// Mark uninitialized feature lists for single-selection expansion and make
/// their items focusable. When the context names an active feature, its item
/// and description panel get the `active` class. Lists already marked are
/// left alone.
pub(crate) fn prepare_feature_lists(
    root: &mut RenderRoot,
    context: &PostRenderContext,
) -> Result<(), PostRenderError> {
    let requested = context.extra.get(ACTIVE_FEATURE_KEY).cloned();
    // Selection of the list being rewritten; `None` inside initialized lists.
    let current: Rc<RefCell<Option<SingleSelection>>> = Rc::new(RefCell::new(None));

    root.rewrite(RewriteStrSettings {
        element_content_handlers: vec![
            element!(".feature-list", {
                let current = Rc::clone(&current);
                move |el| {
                    if el.get_attribute("data-feature-expansion").is_some() {
                        *current.borrow_mut() = None;
                        return Ok(());
                    }
                    el.set_attribute("data-feature-expansion", EXPANSION_MODE)?;
                    let mut selection = SingleSelection::new();
                    if let Some(id) = &requested {
                        selection.toggle(id);
                    }
                    *current.borrow_mut() = Some(selection);
                    Ok(())
                }
            }),
            element!(".feature-list li[data-feature]", {
                let current = Rc::clone(&current);
                move |el| {
                    let current = current.borrow();
                    let Some(selection) = current.as_ref() else {
                        return Ok(());
                    };
                    let active = el
                        .get_attribute("data-feature")
                        .is_some_and(|id| selection.is_active(&id));
                    el.set_attribute("role", "button")?;
                    el.set_attribute("tabindex", "0")?;
                    el.set_attribute("aria-expanded", if active { "true" } else { "false" })?;
                    if active {
                        add_class(el, "active")?;
                    }
                    Ok(())
                }
            }),
            element!(".feature-list .feature-description[data-feature]", {
                let current = Rc::clone(&current);
                move |el| {
                    let active = current.borrow().as_ref().is_some_and(|selection| {
                        el.get_attribute("data-feature")
                            .is_some_and(|id| selection.is_active(&id))
                    });
                    if active {
                        add_class(el, "active")?;
                    }
                    Ok(())
                }
            }),
        ],
        ..RewriteStrSettings::default()
    })
}
