//! Single-selection state for interactive components.

/// At most one active item within a component instance.
///
/// Features lists use [`toggle`](Self::toggle): activating the open item
/// collapses it. Constellations use [`select`](Self::select): some node is
/// always selected once the component is initialized.
///
/// # Example
///
/// ```
/// use markdrown_engine::SingleSelection;
///
/// let mut features = SingleSelection::new();
/// assert!(features.toggle("a"));
/// assert!(features.toggle("b"));
/// assert!(!features.toggle("b"));
/// assert_eq!(features.active(), None);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SingleSelection {
    active: Option<String>,
}

impl SingleSelection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Selection with `id` already active.
    #[must_use]
    pub fn with_active(id: impl Into<String>) -> Self {
        Self {
            active: Some(id.into()),
        }
    }

    #[must_use]
    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    #[must_use]
    pub fn is_active(&self, id: &str) -> bool {
        self.active.as_deref() == Some(id)
    }

    /// Activate `id`, or collapse it if it is already active.
    ///
    /// Returns whether `id` is active afterwards.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.is_active(id) {
            self.active = None;
            false
        } else {
            self.active = Some(id.to_owned());
            true
        }
    }

    /// Activate `id` unconditionally.
    pub fn select(&mut self, id: &str) {
        self.active = Some(id.to_owned());
    }

    pub fn clear(&mut self) {
        self.active = None;
    }
}
