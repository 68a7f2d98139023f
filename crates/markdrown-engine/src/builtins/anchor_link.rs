//! Copy-link controls on headings with ids.

use std::cell::RefCell;
use std::rc::Rc;

use lol_html::html_content::{ContentType, EndTag};
use lol_html::{EndTagHandler, RewriteStrSettings, element};

use crate::escape::escape_html;
use crate::plugin::{BlockMatch, BlockPlugin, ParseContext};
use crate::post_render::{PostRenderCallbacks, PostRenderContext, PostRenderError, RenderRoot};

type HandlerError = Box<dyn std::error::Error + Send + Sync>;

const LABEL: &str = "Copy link to this section";

/// Heading levels that receive a copy-link control.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnchorLinkOptions {
    pub levels: Vec<u8>,
}

impl Default for AnchorLinkOptions {
    fn default() -> Self {
        Self { levels: vec![3, 4] }
    }
}

/// Never matches while parsing. After render it appends a copy-link button
/// to every heading of the configured levels that has an `id`, skipping
/// headings that already contain one.
#[derive(Clone, Debug, Default)]
pub struct AnchorLink {
    options: AnchorLinkOptions,
}

impl AnchorLink {
    #[must_use]
    pub fn new(options: AnchorLinkOptions) -> Self {
        Self { options }
    }
}

fn control(id: &str, page_url: Option<&str>) -> String {
    let id = escape_html(id);
    let href = page_url
        .map(|url| format!(" data-href=\"{}#{id}\"", escape_html(url)))
        .unwrap_or_default();
    format!(
        " <button class=\"anchor-link\" aria-label=\"{LABEL}\" title=\"{LABEL}\" \
         data-anchor=\"#{id}\"{href}><i data-lucide=\"link\"></i></button>"
    )
}

/// Append controls to `h{level}[id]` headings in `root`.
pub(crate) fn add_anchor_links(
    root: &mut RenderRoot,
    levels: &[u8],
    context: &PostRenderContext,
) -> Result<(), PostRenderError> {
    if levels.is_empty() {
        return Ok(());
    }
    let headings = levels
        .iter()
        .map(|level| format!("h{level}[id]"))
        .collect::<Vec<_>>()
        .join(", ");
    let nested = levels
        .iter()
        .map(|level| format!("h{level}[id] .anchor-link"))
        .collect::<Vec<_>>()
        .join(", ");

    // One entry per open heading: whether a control was seen inside it.
    let open: Rc<RefCell<Vec<bool>>> = Rc::new(RefCell::new(Vec::new()));
    let page_url = context.page_url.clone();

    root.rewrite(RewriteStrSettings {
        element_content_handlers: vec![
            element!(headings, {
                let open = Rc::clone(&open);
                move |el| {
                    let Some(id) = el.get_attribute("id") else {
                        return Ok(());
                    };
                    let markup = control(&id, page_url.as_deref());
                    let Some(end_handlers) = el.end_tag_handlers() else {
                        return Ok(());
                    };
                    open.borrow_mut().push(false);
                    let open = Rc::clone(&open);
                    let handler: EndTagHandler<'static> = Box::new(move |end: &mut EndTag<'_>| {
                        let seen = open.borrow_mut().pop().unwrap_or(false);
                        if !seen {
                            end.before(&markup, ContentType::Html);
                        }
                        Ok::<_, HandlerError>(())
                    });
                    end_handlers.push(handler);
                    Ok(())
                }
            }),
            element!(nested, {
                let open = Rc::clone(&open);
                move |_el| {
                    if let Some(seen) = open.borrow_mut().last_mut() {
                        *seen = true;
                    }
                    Ok(())
                }
            }),
        ],
        ..RewriteStrSettings::default()
    })
}

impl BlockPlugin for AnchorLink {
    fn name(&self) -> &str {
        "anchor-link"
    }

    fn priority(&self) -> i32 {
        1000
    }

    fn parse(&self, _lines: &[&str], _index: usize, _cx: &mut ParseContext<'_>) -> Option<BlockMatch> {
        None
    }

    fn post_render(&self, callbacks: &mut PostRenderCallbacks) {
        let levels = self.options.levels.clone();
        callbacks.register(move |root, context| add_anchor_links(root, &levels, context));
    }
}
