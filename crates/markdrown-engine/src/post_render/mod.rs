//! Post-render callbacks.
//!
//! Plugins that need to touch the realized output (anchor buttons, initial
//! selection of interactive components) register callbacks when they are
//! added to the engine. The caller realizes the parsed HTML into a
//! [`RenderRoot`] and runs the callbacks once.
//!
//! Callback failures never propagate: each failure is logged, recorded as a
//! warning, and the remaining callbacks still run.

mod selection;

pub use selection::SingleSelection;

use std::collections::BTreeMap;

use lol_html::{RewriteStrSettings, rewrite_str};

/// Error raised by a post-render callback.
#[derive(Debug, thiserror::Error)]
pub enum PostRenderError {
    #[error("rewrite failed: {message}")]
    Rewrite { message: String },

    #[error("{message}")]
    Callback { message: String },
}

/// Realized output root that callbacks operate on.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderRoot {
    html: String,
}

impl RenderRoot {
    #[must_use]
    pub fn new(html: impl Into<String>) -> Self {
        Self { html: html.into() }
    }

    #[must_use]
    pub fn html(&self) -> &str {
        &self.html
    }

    #[must_use]
    pub fn into_html(self) -> String {
        self.html
    }

    /// Replace the content wholesale.
    pub fn set_html(&mut self, html: impl Into<String>) {
        self.html = html.into();
    }

    /// Rewrite the content in place with CSS-selector element handlers.
    ///
    /// On error the content is left untouched.
    pub fn rewrite(&mut self, settings: RewriteStrSettings<'_, '_>) -> Result<(), PostRenderError> {
        let rewritten = rewrite_str(&self.html, settings).map_err(|err| PostRenderError::Rewrite {
            message: err.to_string(),
        })?;
        self.html = rewritten;
        Ok(())
    }
}

/// Information about the page the output is mounted on.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PostRenderContext {
    /// Absolute or site-relative URL of the page, without fragment.
    pub page_url: Option<String>,
    /// Application-defined values.
    pub extra: BTreeMap<String, String>,
}

impl PostRenderContext {
    #[must_use]
    pub fn with_page_url(page_url: impl Into<String>) -> Self {
        Self {
            page_url: Some(page_url.into()),
            ..Self::default()
        }
    }
}

/// Boxed post-render callback.
pub type PostRenderCallback =
    Box<dyn FnMut(&mut RenderRoot, &PostRenderContext) -> Result<(), PostRenderError> + Send>;

/// Ordered post-render callback registry.
#[derive(Default)]
pub struct PostRenderCallbacks {
    callbacks: Vec<PostRenderCallback>,
    warnings: Vec<String>,
}

impl PostRenderCallbacks {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a callback. Registering the same behavior twice runs it twice.
    pub fn register<F>(&mut self, callback: F)
    where
        F: FnMut(&mut RenderRoot, &PostRenderContext) -> Result<(), PostRenderError>
            + Send
            + 'static,
    {
        self.callbacks.push(Box::new(callback));
    }

    /// Run every callback in registration order.
    pub fn run(&mut self, root: &mut RenderRoot, context: &PostRenderContext) {
        for (index, callback) in self.callbacks.iter_mut().enumerate() {
            if let Err(err) = callback(root, context) {
                tracing::warn!(callback = index, error = %err, "post-render callback failed");
                self.warnings
                    .push(format!("post-render callback {index} failed: {err}"));
            }
        }
    }

    /// Drop every callback and the warnings recorded so far.
    pub fn clear(&mut self) {
        self.callbacks.clear();
        self.warnings.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }

    /// Failures recorded by [`run`](Self::run).
    #[must_use]
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }
}

impl std::fmt::Debug for PostRenderCallbacks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostRenderCallbacks")
            .field("len", &self.callbacks.len())
            .field("warnings", &self.warnings)
            .finish()
    }
}
