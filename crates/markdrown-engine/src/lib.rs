//! Plugin-driven markup to HTML engine.
//!
//! Converts a markdown-like text format into HTML. Every construct is a
//! plugin: block plugins consume whole lines, inline plugins transform text,
//! and both run in ascending priority order.
//!
//! # Quick Start
//!
//! ```
//! use markdrown_engine::Markdrown;
//!
//! let mut engine = Markdrown::new();
//! engine.register_all_builtins();
//!
//! let html = engine.parse("## #intro Hello\n\nSome **bold** text.");
//! assert_eq!(html, "<h2 id=\"intro\">Hello</h2>\n<p>Some <strong>bold</strong> text.</p>");
//! ```
//!
//! # Post-render
//!
//! Some plugins finish their work on the realized output: anchor buttons on
//! headings, initial selection in features lists and constellations. After
//! parsing, wrap the HTML in a [`RenderRoot`] and run the callbacks:
//!
//! ```
//! use markdrown_engine::{Markdrown, PostRenderContext, RenderRoot};
//!
//! let mut engine = Markdrown::new();
//! engine.register_all_builtins();
//!
//! let mut root = RenderRoot::new(engine.parse("### #usage Usage"));
//! engine.run_post_render_callbacks(&mut root, &PostRenderContext::default());
//! assert!(root.html().contains("class=\"anchor-link\""));
//! ```
//!
//! # Features
//!
//! - `serde`: `Serialize` for [`MetaHeader`].

pub mod builtins;
pub mod components;
mod dispatch;
mod engine;
mod escape;
mod meta;
pub mod plugin;
pub mod post_render;
mod sections;

pub use builtins::BuiltinOptions;
pub use components::{Component, ConstellationLayout, NodePosition};
pub use engine::Markdrown;
pub use escape::escape_html;
pub use meta::MetaHeader;
pub use plugin::{BlockMatch, BlockPlugin, InlinePlugin, ParseContext, Plugin};
pub use post_render::{
    PostRenderCallback, PostRenderCallbacks, PostRenderContext, PostRenderError, RenderRoot,
    SingleSelection,
};
pub use sections::wrap_sections;
