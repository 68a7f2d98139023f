//! Plugin contract for the markup engine.
//!
//! Every construct the engine understands is contributed by a plugin. Plugins
//! come in two kinds:
//!
//! - **Block** ([`BlockPlugin`]): inspects the line at the cursor and either
//!   declines or consumes one or more whole lines, producing HTML.
//! - **Inline** ([`InlinePlugin`]): a pure text transform applied to paragraph
//!   and title text.
//!
//! Plugins run in ascending [`priority`](Plugin::priority) order. Plugins with
//! equal priority run in registration order.
//!
//! Either kind may contribute post-render callbacks through
//! [`BlockPlugin::post_render`] / [`InlinePlugin::post_render`], which are
//! invoked once when the plugin is registered.
//!
//! # Example
//!
//! ```
//! use markdrown_engine::{BlockMatch, BlockPlugin, Markdrown, ParseContext};
//!
//! struct Shout;
//!
//! impl BlockPlugin for Shout {
//!     fn name(&self) -> &str { "shout" }
//!     fn priority(&self) -> i32 { 7 }
//!
//!     fn parse(&self, lines: &[&str], index: usize, cx: &mut ParseContext<'_>) -> Option<BlockMatch> {
//!         let rest = lines[index].strip_prefix("!! ")?;
//!         Some(BlockMatch::new(format!("<strong>{}</strong>", cx.inline(&[rest])), 1))
//!     }
//! }
//!
//! let mut engine = Markdrown::new().with_block(Shout);
//! assert_eq!(engine.parse("!! hey"), "<strong>hey</strong>");
//! ```

mod block;
mod context;
mod inline;
mod output;

pub use block::BlockPlugin;
pub use context::ParseContext;
pub use inline::InlinePlugin;
pub use output::BlockMatch;

use crate::post_render::PostRenderCallbacks;

/// A registered plugin, tagged by kind.
pub enum Plugin {
    Block(Box<dyn BlockPlugin>),
    Inline(Box<dyn InlinePlugin>),
}

impl Plugin {
    /// Wrap a block plugin.
    pub fn block(plugin: impl BlockPlugin + 'static) -> Self {
        Self::Block(Box::new(plugin))
    }

    /// Wrap an inline plugin.
    pub fn inline(plugin: impl InlinePlugin + 'static) -> Self {
        Self::Inline(Box::new(plugin))
    }

    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Block(p) => p.name(),
            Self::Inline(p) => p.name(),
        }
    }

    #[must_use]
    pub fn priority(&self) -> i32 {
        match self {
            Self::Block(p) => p.priority(),
            Self::Inline(p) => p.priority(),
        }
    }

    #[must_use]
    pub fn is_block(&self) -> bool {
        matches!(self, Self::Block(_))
    }

    pub(crate) fn post_render(&self, callbacks: &mut PostRenderCallbacks) {
        match self {
            Self::Block(p) => p.post_render(callbacks),
            Self::Inline(p) => p.post_render(callbacks),
        }
    }
}

impl std::fmt::Debug for Plugin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = if self.is_block() { "Block" } else { "Inline" };
        f.debug_struct(kind)
            .field("name", &self.name())
            .field("priority", &self.priority())
            .finish()
    }
}
