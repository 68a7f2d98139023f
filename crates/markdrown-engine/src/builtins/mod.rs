//! Builtin block and inline plugins.
//!
//! | Plugin | Kind | Priority |
//! |---|---|---|
//! | [`FrontMatter`] | block | 0 |
//! | [`HtmlPassthrough`] | block | 1 |
//! | [`TaskList`] | block | 5 |
//! | [`Heading`] | block | 10 |
//! | [`Grid`] | block | 13 |
//! | components | block | 14 |
//! | [`Blockquote`] | block | 15 |
//! | [`CodeBlock`] | block | 20 |
//! | [`HorizontalRule`] | block | 25 |
//! | [`NestedList`] | block | 30 |
//! | [`Table`] | block | 50 |
//! | [`AnchorLink`] | block | 1000 |
//! | [`Icon`] | inline | 2 |
//! | [`LineBreak`] | inline | 3 |
//! | [`Image`] | inline | 5 |
//! | [`Emphasis`] | inline | 10 |
//! | [`Strikethrough`] | inline | 12 |
//! | [`InlineCode`] | inline | 30 |
//! | [`Link`] | inline | 40 |

mod anchor_link;
mod blockquote;
mod code_block;
mod front_matter;
mod grid;
mod heading;
mod html_passthrough;
mod inline;
mod list;
mod rule;
mod table;
mod task_list;

pub use anchor_link::{AnchorLink, AnchorLinkOptions};
pub use blockquote::Blockquote;
pub use code_block::CodeBlock;
pub use front_matter::FrontMatter;
pub use grid::Grid;
pub use heading::Heading;
pub use html_passthrough::HtmlPassthrough;
pub use inline::{Emphasis, Icon, Image, InlineCode, LineBreak, Link, Strikethrough};
pub use list::NestedList;
pub use rule::HorizontalRule;
pub use table::Table;
pub use task_list::TaskList;

use crate::components::{self, Component, ConstellationLayout};
use crate::plugin::Plugin;

/// Selects which builtins [`Markdrown::register_builtins`](crate::Markdrown::register_builtins)
/// installs. The front-matter plugin is always present.
#[derive(Clone, Debug, PartialEq)]
pub struct BuiltinOptions {
    /// Pass raw HTML lines through untouched.
    pub html_passthrough: bool,
    /// Component plugins to register.
    pub components: Vec<Component>,
    /// Copy-link controls on headings. `None` disables them.
    pub anchor_links: Option<AnchorLinkOptions>,
    /// Node placement for constellations.
    pub constellation_layout: ConstellationLayout,
}

impl Default for BuiltinOptions {
    fn default() -> Self {
        Self {
            html_passthrough: true,
            components: Component::ALL.to_vec(),
            anchor_links: Some(AnchorLinkOptions::default()),
            constellation_layout: ConstellationLayout::default(),
        }
    }
}

/// Build the builtin plugin set described by `options`.
pub(crate) fn plugins(options: &BuiltinOptions) -> Vec<Plugin> {
    let mut plugins = vec![
        Plugin::inline(Link),
        Plugin::block(TaskList),
        Plugin::block(Table),
        Plugin::inline(Image),
        Plugin::block(Heading),
        Plugin::block(NestedList),
        Plugin::block(CodeBlock),
        Plugin::inline(Emphasis),
        Plugin::inline(Icon),
        Plugin::inline(InlineCode),
        Plugin::block(Blockquote),
        Plugin::block(Grid),
        Plugin::block(HorizontalRule),
        Plugin::inline(Strikethrough),
        Plugin::inline(LineBreak),
    ];
    if options.html_passthrough {
        plugins.push(Plugin::block(HtmlPassthrough));
    }
    if let Some(anchor) = &options.anchor_links {
        plugins.push(Plugin::block(AnchorLink::new(anchor.clone())));
    }
    for component in &options.components {
        plugins.push(components::plugin(*component, &options.constellation_layout));
    }
    plugins
}
