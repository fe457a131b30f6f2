//! One page of an event search: the request sent upstream and what came back.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::event::EventRecord;
use crate::filter::SearchFilter;

/// Number of events requested per page.
pub const PAGE_SIZE: u32 = 10;

/// Ordering requested from the events API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Date,
}

impl SortOrder {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Date => "date",
        }
    }
}

/// Parameters of a single page query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub location: String,
    pub keyword: String,
    pub page: u32,
    pub page_size: u32,
    pub sort_by: SortOrder,
}

impl PageRequest {
    /// Build a request for `page` of the search described by `filter`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidPageNumber`] when `page` is 0.
    pub fn new(filter: &SearchFilter, page: u32) -> Result<Self, ValidationError> {
        if page == 0 {
            return Err(ValidationError::InvalidPageNumber);
        }
        Ok(Self {
            location: filter.location.clone(),
            keyword: filter.keyword.clone(),
            page,
            page_size: PAGE_SIZE,
            sort_by: SortOrder::Date,
        })
    }
}

/// A page of results and the upstream pagination signal.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Page {
    pub events: Vec<EventRecord>,
    pub has_more: bool,
}
