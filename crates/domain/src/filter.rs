//! Search filter: the location and keyword the user searches with.

use serde::{Deserialize, Serialize};

/// Location searched on first activation of the discovery view.
pub const DEFAULT_LOCATION: &str = "Nairobi";

/// User-editable search parameters.
///
/// No validation is applied: empty strings are valid and forwarded to the
/// events API unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchFilter {
    pub location: String,
    pub keyword: String,
}

impl Default for SearchFilter {
    fn default() -> Self {
        Self {
            location: DEFAULT_LOCATION.to_string(),
            keyword: String::new(),
        }
    }
}

impl SearchFilter {
    pub fn set_location(&mut self, value: impl Into<String>) {
        self.location = value.into();
    }

    pub fn set_keyword(&mut self, value: impl Into<String>) {
        self.keyword = value.into();
    }
}
