//! Block plugin trait.

use super::{BlockMatch, ParseContext};
use crate::post_render::PostRenderCallbacks;

/// Handler for constructs spanning one or more whole lines.
///
/// `parse` is called with the full line slice of the document being parsed
/// and the cursor position. Returning `None` declines the line and lets the
/// next plugin try. A returned [`BlockMatch`] must consume at least one line.
pub trait BlockPlugin: Send {
    /// Plugin name, used in logs.
    fn name(&self) -> &str;

    /// Dispatch priority. Lower runs first.
    fn priority(&self) -> i32;

    /// Try to consume lines starting at `index`.
    fn parse(&self, lines: &[&str], index: usize, cx: &mut ParseContext<'_>)
    -> Option<BlockMatch>;

    /// Contribute post-render callbacks.
    ///
    /// Called once when the plugin is registered.
    fn post_render(&self, _callbacks: &mut PostRenderCallbacks) {}
}
