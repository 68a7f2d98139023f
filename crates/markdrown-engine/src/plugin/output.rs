//! Block plugin output.

/// Successful block match: the HTML produced and how many lines it consumed.
///
/// # Example
///
/// ```
/// use markdrown_engine::BlockMatch;
///
/// let m = BlockMatch::new("<hr>", 1);
/// assert_eq!(m.html, "<hr>");
///
/// // Consumes lines without emitting markup (front matter).
/// let m = BlockMatch::empty(3);
/// assert!(m.html.is_empty());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockMatch {
    /// Rendered HTML for the consumed lines.
    pub html: String,
    /// Number of lines consumed, counted from the cursor.
    pub lines_used: usize,
}

impl BlockMatch {
    #[must_use]
    pub fn new(html: impl Into<String>, lines_used: usize) -> Self {
        Self {
            html: html.into(),
            lines_used,
        }
    }

    /// A match that consumes lines and emits nothing.
    #[must_use]
    pub fn empty(lines_used: usize) -> Self {
        Self::new(String::new(), lines_used)
    }
}
