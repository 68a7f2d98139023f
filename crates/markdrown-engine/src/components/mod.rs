//! Component plugins built on the delimited-block idiom.
//!
//! Each component opens with `!name [argument]` on its own line and closes
//! with `!/name`. Without the closing line the component declines and its
//! lines fall through to other plugins as ordinary text.

mod constellation;
mod facts;
mod features;
mod workflow;

pub use constellation::{Constellation, ConstellationLayout, INITIALIZED_ATTR, NodePosition};
pub use facts::Facts;
pub use features::{ACTIVE_FEATURE_KEY, EXPANSION_MODE, Features};
pub use workflow::Workflow;

use crate::plugin::Plugin;

/// Priority shared by all component plugins.
pub const COMPONENT_PRIORITY: i32 = 14;

/// Builtin component kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Component {
    Features,
    Workflow,
    Facts,
    Constellation,
}

impl Component {
    pub const ALL: [Self; 4] = [
        Self::Features,
        Self::Workflow,
        Self::Facts,
        Self::Constellation,
    ];

    /// Directive name, as written after `!`.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Features => "features",
            Self::Workflow => "workflow",
            Self::Facts => "facts",
            Self::Constellation => "constellation",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }
}

pub(crate) fn plugin(component: Component, layout: &ConstellationLayout) -> Plugin {
    match component {
        Component::Features => Plugin::block(Features),
        Component::Workflow => Plugin::block(Workflow),
        Component::Facts => Plugin::block(Facts),
        Component::Constellation => Plugin::block(Constellation::new(layout.clone())),
    }
}

/// A located `!name ... !/name` block.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct DelimitedBlock<'a, 'b> {
    /// Trimmed text after the opening directive.
    pub(crate) argument: &'b str,
    /// Lines between the directives.
    pub(crate) body: &'a [&'b str],
    /// Lines consumed, both directives included.
    pub(crate) lines_used: usize,
}

fn is_closing(line: &str, name: &str) -> bool {
    line.strip_prefix("!/")
        .and_then(|rest| rest.strip_prefix(name))
        .is_some_and(|rest| rest.trim().is_empty())
}

/// Locate a delimited block for `name` starting at `index`.
pub(crate) fn delimited_block<'a, 'b>(
    lines: &'a [&'b str],
    index: usize,
    name: &str,
) -> Option<DelimitedBlock<'a, 'b>> {
    let rest = lines[index].strip_prefix('!')?.strip_prefix(name)?;
    if !rest.is_empty() && !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let close = index + 1 + lines[index + 1..].iter().position(|l| is_closing(l, name))?;
    Some(DelimitedBlock {
        argument: rest.trim(),
        body: &lines[index + 1..close],
        lines_used: close - index + 1,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delimited_block() {
        let lines = ["!facts Team Facts", "a", "b", "!/facts  ", "after"];
        let block = delimited_block(&lines, 0, "facts").unwrap();
        assert_eq!(block.argument, "Team Facts");
        assert_eq!(block.body, &["a", "b"]);
        assert_eq!(block.lines_used, 4);
    }

    #[test]
    fn test_unterminated() {
        let lines = ["!facts", "a"];
        assert_eq!(delimited_block(&lines, 0, "facts"), None);
    }

    #[test]
    fn test_name_boundary() {
        let lines = ["!factsheet", "!/factsheet"];
        assert_eq!(delimited_block(&lines, 0, "facts"), None);
    }

    #[test]
    fn test_component_names() {
        for component in Component::ALL {
            assert_eq!(Component::from_name(component.name()), Some(component));
        }
        assert_eq!(Component::from_name("tabs"), None);
    }
}
