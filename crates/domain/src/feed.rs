//! Discovery feed: the paginated, accumulating list of search results.
//!
//! [`Feed`] is a pure state machine. A query is split into two halves so the
//! caller can await the network in between without holding any lock:
//!
//! 1. [`Feed::start_query`] (or [`Feed::start_search`] /
//!    [`Feed::start_load_more`]) validates the action, moves the status to a
//!    loading variant, and returns the [`PageRequest`] to send upstream.
//! 2. [`Feed::complete`] or [`Feed::fail`] applies the outcome and leaves the
//!    loading status.
//!
//! While a query is in flight every new query is rejected with
//! [`QueryRejected::Busy`]. That gate is the only overlap protection: there is
//! no cancellation, so a query that never resolves keeps the feed loading.

use serde::Serialize;

use crate::error::ValidationError;
use crate::event::EventRecord;
use crate::expansion::Expansions;
use crate::filter::SearchFilter;
use crate::id::EventId;
use crate::page::{Page, PageRequest};

/// Message shown for every failed query, whatever went wrong upstream.
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load events";

/// Where the feed is in its query lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", content = "message", rename_all = "snake_case")]
pub enum FeedStatus {
    /// Nothing in flight; more pages may be available.
    #[default]
    Idle,
    /// Fetching the first page of a new search.
    SearchingFirstPage,
    /// Fetching a continuation page.
    LoadingNextPage,
    /// The last query failed.
    Failed(String),
    /// The last page said there is nothing more to load.
    Exhausted,
}

impl FeedStatus {
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::SearchingFirstPage | Self::LoadingNextPage)
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Why a query was not started.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryRejected {
    /// Another query is still in flight.
    #[error("a query is already in flight")]
    Busy,
    /// The last page reported no more results.
    #[error("no more results to load")]
    NothingMore,
    /// The requested page number is invalid.
    #[error("invalid query")]
    Invalid(#[from] ValidationError),
}

#[derive(Debug, Clone)]
struct InFlight {
    request: PageRequest,
    filter: SearchFilter,
    is_new_search: bool,
}

/// State of the discovery view.
#[derive(Debug, Clone, Serialize)]
pub struct Feed {
    /// Filter as currently edited by the user.
    filter: SearchFilter,
    /// Filter snapshot the current result list was searched with.
    active_filter: SearchFilter,
    page_number: u32,
    has_more: bool,
    status: FeedStatus,
    events: Vec<EventRecord>,
    expansions: Expansions,
    #[serde(skip)]
    in_flight: Option<InFlight>,
}

impl Default for Feed {
    fn default() -> Self {
        Self {
            filter: SearchFilter::default(),
            active_filter: SearchFilter::default(),
            page_number: 1,
            has_more: true,
            status: FeedStatus::Idle,
            events: Vec::new(),
            expansions: Expansions::default(),
            in_flight: None,
        }
    }
}

impl Feed {
    #[must_use]
    pub fn filter(&self) -> &SearchFilter {
        &self.filter
    }

    #[must_use]
    pub fn active_filter(&self) -> &SearchFilter {
        &self.active_filter
    }

    #[must_use]
    pub fn page_number(&self) -> u32 {
        self.page_number
    }

    #[must_use]
    pub fn has_more(&self) -> bool {
        self.has_more
    }

    #[must_use]
    pub fn status(&self) -> &FeedStatus {
        &self.status
    }

    #[must_use]
    pub fn events(&self) -> &[EventRecord] {
        &self.events
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.status.is_loading()
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.status.error()
    }

    #[must_use]
    pub fn is_expanded(&self, id: &EventId) -> bool {
        self.expansions.is_expanded(id)
    }

    /// Whether the load-more control is enabled.
    #[must_use]
    pub fn can_load_more(&self) -> bool {
        self.has_more && !self.is_loading()
    }

    pub fn set_location(&mut self, value: impl Into<String>) {
        self.filter.set_location(value);
    }

    pub fn set_keyword(&mut self, value: impl Into<String>) {
        self.filter.set_keyword(value);
    }

    /// Start fetching `page`.
    ///
    /// A new search snapshots the edited filter; a continuation reuses the
    /// filter of the search that produced the current list.
    ///
    /// # Errors
    ///
    /// [`QueryRejected::Busy`] while another query is in flight,
    /// [`QueryRejected::Invalid`] when `page` is 0. State is untouched in
    /// both cases.
    pub fn start_query(
        &mut self,
        page: u32,
        is_new_search: bool,
    ) -> Result<PageRequest, QueryRejected> {
        if self.is_loading() {
            return Err(QueryRejected::Busy);
        }
        let filter = if is_new_search {
            self.filter.clone()
        } else {
            self.active_filter.clone()
        };
        let request = PageRequest::new(&filter, page)?;
        self.status = if is_new_search || page == 1 {
            FeedStatus::SearchingFirstPage
        } else {
            FeedStatus::LoadingNextPage
        };
        self.in_flight = Some(InFlight {
            request: request.clone(),
            filter,
            is_new_search,
        });
        Ok(request)
    }

    /// Start a new search from page 1 with the edited filter.
    ///
    /// # Errors
    ///
    /// [`QueryRejected::Busy`] while another query is in flight.
    pub fn start_search(&mut self) -> Result<PageRequest, QueryRejected> {
        self.start_query(1, true)
    }

    /// Start fetching the page after the current one.
    ///
    /// # Errors
    ///
    /// [`QueryRejected::Busy`] while another query is in flight,
    /// [`QueryRejected::NothingMore`] once the last page said so or the
    /// page number cannot grow any further.
    pub fn start_load_more(&mut self) -> Result<PageRequest, QueryRejected> {
        if self.is_loading() {
            return Err(QueryRejected::Busy);
        }
        if !self.has_more {
            return Err(QueryRejected::NothingMore);
        }
        let Some(next) = self.page_number.checked_add(1) else {
            return Err(QueryRejected::NothingMore);
        };
        self.start_query(next, false)
    }

    /// Apply a successful response to the in-flight query.
    ///
    /// The first page of a search replaces the list and collapses every
    /// description; any later page is appended as-is, duplicates included.
    /// Returns `false` (and changes nothing) when no query is in flight.
    pub fn complete(&mut self, page: Page) -> bool {
        let Some(in_flight) = self.in_flight.take() else {
            return false;
        };
        if in_flight.is_new_search || in_flight.request.page == 1 {
            self.events = page.events;
            self.expansions.clear();
            self.active_filter = in_flight.filter;
        } else {
            self.events.extend(page.events);
        }
        self.page_number = in_flight.request.page;
        self.has_more = page.has_more;
        self.status = if self.has_more {
            FeedStatus::Idle
        } else {
            FeedStatus::Exhausted
        };
        true
    }

    /// Record a failure of the in-flight query.
    ///
    /// Results, `has_more` and the page number keep their pre-query values.
    /// Returns `false` (and changes nothing) when no query is in flight.
    pub fn fail(&mut self) -> bool {
        if self.in_flight.take().is_none() {
            return false;
        }
        self.status = FeedStatus::Failed(LOAD_FAILED_MESSAGE.to_string());
        true
    }

    /// Flip the description expansion of every listed event with `id`.
    ///
    /// Returns the new expansion, or `None` when no listed event has `id`.
    pub fn toggle_expanded(&mut self, id: &EventId) -> Option<bool> {
        if !self.events.iter().any(|event| &event.id == id) {
            return None;
        }
        Some(self.expansions.toggle(id))
    }
}
