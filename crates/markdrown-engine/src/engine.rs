//! The engine value: plugin registry, meta header and post-render callbacks.

use crate::builtins::{self, BuiltinOptions, FrontMatter};
use crate::dispatch;
use crate::meta::MetaHeader;
use crate::plugin::{BlockPlugin, InlinePlugin, Plugin};
use crate::post_render::{PostRenderCallbacks, PostRenderContext, PostRenderError, RenderRoot};

/// Markup to HTML engine.
///
/// Owns the priority-ordered plugin list, the meta header collected from front
/// matter, and the post-render callbacks contributed by plugins. One engine
/// serves one document session; top-level parses on an instance are
/// sequential.
///
/// # Example
///
/// ```
/// use markdrown_engine::Markdrown;
///
/// let mut engine = Markdrown::new();
/// engine.register_all_builtins();
///
/// let html = engine.parse("---\ntitle: Hi\n---\nBody");
/// assert_eq!(html, "<p>Body</p>");
/// assert_eq!(engine.meta().get("title"), Some("Hi"));
/// ```
#[derive(Debug)]
pub struct Markdrown {
    plugins: Vec<Plugin>,
    meta: MetaHeader,
    callbacks: PostRenderCallbacks,
}

impl Default for Markdrown {
    fn default() -> Self {
        Self::new()
    }
}

impl Markdrown {
    /// Create an engine with only the front-matter plugin registered.
    #[must_use]
    pub fn new() -> Self {
        let mut engine = Self {
            plugins: Vec::new(),
            meta: MetaHeader::new(),
            callbacks: PostRenderCallbacks::new(),
        };
        engine.register(Plugin::block(FrontMatter));
        engine
    }

    /// Register a plugin.
    ///
    /// The plugin list is re-sorted by priority; plugins with equal priority
    /// keep registration order. The plugin's post-render callbacks are
    /// collected immediately.
    pub fn register(&mut self, plugin: Plugin) {
        tracing::debug!(
            plugin = plugin.name(),
            priority = plugin.priority(),
            block = plugin.is_block(),
            "registering plugin"
        );
        plugin.post_render(&mut self.callbacks);
        self.plugins.push(plugin);
        self.plugins.sort_by_key(Plugin::priority);
    }

    /// Builder form of [`register`](Self::register) for block plugins.
    #[must_use]
    pub fn with_block(mut self, plugin: impl BlockPlugin + 'static) -> Self {
        self.register(Plugin::block(plugin));
        self
    }

    /// Builder form of [`register`](Self::register) for inline plugins.
    #[must_use]
    pub fn with_inline(mut self, plugin: impl InlinePlugin + 'static) -> Self {
        self.register(Plugin::inline(plugin));
        self
    }

    /// Register every builtin plugin with default options.
    pub fn register_all_builtins(&mut self) {
        self.register_builtins(&BuiltinOptions::default());
    }

    /// Register the builtin plugins enabled in `options`.
    pub fn register_builtins(&mut self, options: &BuiltinOptions) {
        for plugin in builtins::plugins(options) {
            self.register(plugin);
        }
    }

    /// Registered plugins in dispatch order.
    #[must_use]
    pub fn plugins(&self) -> &[Plugin] {
        &self.plugins
    }

    /// Parse a document, wrapping `h3`-led sections.
    pub fn parse(&mut self, text: &str) -> String {
        self.parse_with(text, true)
    }

    /// Parse a document, optionally wrapping `h3`-led sections.
    pub fn parse_with(&mut self, text: &str, wrap_sections: bool) -> String {
        let Self { plugins, meta, .. } = self;
        dispatch::parse_document(plugins, meta, text, wrap_sections, 0)
    }

    /// Render text through the inline pipeline only.
    #[must_use]
    pub fn render_inline(&self, text: &str) -> String {
        dispatch::render_inline(&self.plugins, text)
    }

    /// Meta header collected from front matter so far.
    #[must_use]
    pub fn meta(&self) -> &MetaHeader {
        &self.meta
    }

    pub fn reset_meta(&mut self) {
        self.meta.clear();
    }

    /// Append a post-render callback.
    pub fn register_post_render_callback<F>(&mut self, callback: F)
    where
        F: FnMut(&mut RenderRoot, &PostRenderContext) -> Result<(), PostRenderError>
            + Send
            + 'static,
    {
        self.callbacks.register(callback);
    }

    /// Run every post-render callback against the realized output.
    pub fn run_post_render_callbacks(&mut self, root: &mut RenderRoot, context: &PostRenderContext) {
        tracing::debug!(callbacks = self.callbacks.len(), "running post-render callbacks");
        self.callbacks.run(root, context);
    }

    pub fn clear_post_render_callbacks(&mut self) {
        self.callbacks.clear();
    }

    #[must_use]
    pub fn post_render_callback_count(&self) -> usize {
        self.callbacks.len()
    }

    /// Post-render failures recorded so far.
    #[must_use]
    pub fn warnings(&self) -> &[String] {
        self.callbacks.warnings()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::plugin::{BlockMatch, ParseContext};

    struct Tag {
        name: &'static str,
        priority: i32,
    }

    impl BlockPlugin for Tag {
        fn name(&self) -> &str {
            self.name
        }

        fn priority(&self) -> i32 {
            self.priority
        }

        fn parse(&self, lines: &[&str], index: usize, _cx: &mut ParseContext<'_>) -> Option<BlockMatch> {
            lines[index]
                .starts_with('@')
                .then(|| BlockMatch::new(self.name, 1))
        }
    }

    struct Counter;

    impl BlockPlugin for Counter {
        fn name(&self) -> &str {
            "counter"
        }

        fn priority(&self) -> i32 {
            99
        }

        fn parse(&self, _lines: &[&str], _index: usize, _cx: &mut ParseContext<'_>) -> Option<BlockMatch> {
            None
        }

        fn post_render(&self, callbacks: &mut PostRenderCallbacks) {
            callbacks.register(|root, _| {
                let html = format!("{}!", root.html());
                root.set_html(html);
                Ok(())
            });
        }
    }

    #[test]
    fn test_lower_priority_wins() {
        let mut engine = Markdrown::new()
            .with_block(Tag {
                name: "late",
                priority: 20,
            })
            .with_block(Tag {
                name: "early",
                priority: 10,
            });
        assert_eq!(engine.parse("@"), "early");
    }

    #[test]
    fn test_equal_priority_keeps_registration_order() {
        let mut engine = Markdrown::new()
            .with_block(Tag {
                name: "first",
                priority: 10,
            })
            .with_block(Tag {
                name: "second",
                priority: 10,
            });
        assert_eq!(engine.parse("@"), "first");
    }

    #[test]
    fn test_plugins_sorted() {
        let mut engine = Markdrown::new();
        engine.register_all_builtins();
        let priorities: Vec<i32> = engine.plugins().iter().map(Plugin::priority).collect();
        let mut sorted = priorities.clone();
        sorted.sort_unstable();
        assert_eq!(priorities, sorted);
    }

    #[test]
    fn test_front_matter_sets_meta() {
        let mut engine = Markdrown::new();
        engine.register_all_builtins();
        assert_eq!(engine.parse("---\ntitle: Hi\n---\nBody"), "<p>Body</p>");
        assert_eq!(engine.meta().get("title"), Some("Hi"));
        assert_eq!(engine.meta().len(), 1);
    }

    #[test]
    fn test_meta_overwritten_not_cleared() {
        let mut engine = Markdrown::new();
        engine.parse("---\na: 1\nb: 2\n---");
        engine.parse("---\na: 3\n---");
        assert_eq!(engine.meta().get("a"), Some("3"));
        assert_eq!(engine.meta().get("b"), Some("2"));
        engine.reset_meta();
        assert!(engine.meta().is_empty());
    }

    #[test]
    fn test_post_render_collected_at_registration() {
        let mut engine = Markdrown::new().with_block(Counter);
        assert_eq!(engine.post_render_callback_count(), 1);
        engine.register_post_render_callback(|root, _| {
            let html = format!("{}?", root.html());
            root.set_html(html);
            Ok(())
        });

        let mut root = RenderRoot::new("x");
        engine.run_post_render_callbacks(&mut root, &PostRenderContext::default());
        assert_eq!(root.html(), "x!?");

        engine.clear_post_render_callbacks();
        engine.run_post_render_callbacks(&mut root, &PostRenderContext::default());
        assert_eq!(root.html(), "x!?");
    }

    #[test]
    fn test_failing_callback_recorded() {
        let mut engine = Markdrown::new();
        engine.register_post_render_callback(|_, _| {
            Err(PostRenderError::Callback {
                message: "nope".to_owned(),
            })
        });
        engine.run_post_render_callbacks(&mut RenderRoot::default(), &PostRenderContext::default());
        assert_eq!(engine.warnings().len(), 1);
    }

    #[test]
    fn test_sections_wrapped_at_top_level_only() {
        let mut engine = Markdrown::new();
        engine.register_all_builtins();
        let html = engine.parse("### A\ntext\n### B\nmore");
        assert_eq!(html.matches("<div class=\"section\">").count(), 2);
        assert!(!engine.parse_with("### A\ntext", false).contains("section"));
    }

    #[test]
    fn test_no_h3_not_wrapped() {
        let mut engine = Markdrown::new();
        engine.register_all_builtins();
        assert!(!engine.parse("## Only h2\ntext").contains("section"));
    }
}
