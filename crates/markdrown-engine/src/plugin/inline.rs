//! Inline plugin trait.

use crate::post_render::PostRenderCallbacks;

/// Pure string transform applied to inline text.
///
/// Inline plugins are chained: each receives the output of the previous one,
/// so a plugin must leave markup produced by earlier plugins intact.
pub trait InlinePlugin: Send {
    /// Plugin name, used in logs.
    fn name(&self) -> &str;

    /// Pipeline priority. Lower runs first.
    fn priority(&self) -> i32;

    /// Transform the text.
    fn apply(&self, text: &str) -> String;

    /// Contribute post-render callbacks.
    fn post_render(&self, _callbacks: &mut PostRenderCallbacks) {}
}
