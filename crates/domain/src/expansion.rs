//! Per-event description expansion and the truncation rule.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::id::EventId;

/// Characters of description shown while an event is collapsed.
pub const DESCRIPTION_PREVIEW_CHARS: usize = 200;

/// Set of event ids whose description is expanded. Absent means collapsed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expansions {
    expanded: HashSet<EventId>,
}

impl Expansions {
    /// Flip the expansion of `id` and return the new value.
    pub fn toggle(&mut self, id: &EventId) -> bool {
        if self.expanded.remove(id) {
            false
        } else {
            self.expanded.insert(id.clone());
            true
        }
    }

    #[must_use]
    pub fn is_expanded(&self, id: &EventId) -> bool {
        self.expanded.contains(id)
    }

    /// Collapse everything.
    pub fn clear(&mut self) {
        self.expanded.clear();
    }
}

/// Control shown after a description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpandControl {
    ReadMore,
    ShowLess,
}

impl ExpandControl {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::ReadMore => "Read More",
            Self::ShowLess => "Show Less",
        }
    }
}

/// What to display for one description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DescriptionView<'a> {
    pub text: &'a str,
    pub control: Option<ExpandControl>,
}

impl<'a> DescriptionView<'a> {
    /// Apply the truncation rule to `description`.
    ///
    /// Short descriptions (at most [`DESCRIPTION_PREVIEW_CHARS`] characters)
    /// are shown whole with no control, whatever `expanded` says.
    #[must_use]
    pub fn new(description: &'a str, expanded: bool) -> Self {
        let cut = description
            .char_indices()
            .nth(DESCRIPTION_PREVIEW_CHARS)
            .map(|(idx, _)| idx);
        match (cut, expanded) {
            (None, _) => Self {
                text: description,
                control: None,
            },
            (Some(_), true) => Self {
                text: description,
                control: Some(ExpandControl::ShowLess),
            },
            (Some(idx), false) => Self {
                text: &description[..idx],
                control: Some(ExpandControl::ReadMore),
            },
        }
    }
}
