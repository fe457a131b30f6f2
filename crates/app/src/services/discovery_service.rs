//! Discovery service: search, load more, and expand event descriptions.
//!
//! Owns the single discovery [`Feed`] and drives the [`EventQuery`] port.
//! The feed lock is only held for short synchronous transitions, never
//! across the upstream call, so concurrent requests observe the loading
//! status and are turned away as [`ActionOutcome::Rejected`].

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use eventscout_domain::error::{NotFoundError, ScoutError};
use eventscout_domain::feed::{Feed, QueryRejected};
use eventscout_domain::id::EventId;
use eventscout_domain::page::PageRequest;

use crate::ports::EventQuery;

/// Result of a search or load-more action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// A page arrived and was applied.
    Loaded {
        /// Number of events on the page.
        received: usize,
    },
    /// The query failed; the feed shows the generic error.
    Failed,
    /// The action was a no-op.
    Rejected(QueryRejected),
}

/// Application service for the event discovery view.
pub struct DiscoveryService<Q> {
    query: Q,
    feed: Mutex<Feed>,
    activated: AtomicBool,
}

impl<Q: EventQuery> DiscoveryService<Q> {
    /// Create a new service backed by the given query port.
    pub fn new(query: Q) -> Self {
        Self {
            query,
            feed: Mutex::new(Feed::default()),
            activated: AtomicBool::new(false),
        }
    }

    fn feed(&self) -> MutexGuard<'_, Feed> {
        self.feed.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Copy of the current feed, for rendering.
    pub fn snapshot(&self) -> Feed {
        self.feed().clone()
    }

    pub fn set_location(&self, value: impl Into<String>) {
        self.feed().set_location(value);
    }

    pub fn set_keyword(&self, value: impl Into<String>) {
        self.feed().set_keyword(value);
    }

    /// Run the first search of the view, at most once per service.
    ///
    /// Returns `None` when the view was already activated, either by an
    /// earlier call or by an explicit search.
    pub async fn initial_load(&self) -> Option<ActionOutcome> {
        if self.activated.swap(true, Ordering::SeqCst) {
            return None;
        }
        tracing::info!("initial discovery load");
        let request = self.feed().start_search();
        Some(self.dispatch(request).await)
    }

    /// Search from page 1 with the current filter, replacing the results.
    pub async fn search(&self) -> ActionOutcome {
        self.activated.store(true, Ordering::SeqCst);
        let request = self.feed().start_search();
        self.dispatch(request).await
    }

    /// Fetch the next page and append it to the results.
    pub async fn load_more(&self) -> ActionOutcome {
        let request = self.feed().start_load_more();
        self.dispatch(request).await
    }

    /// Fetch `page`, replacing the results for a new search or page 1 and
    /// appending otherwise.
    pub async fn run_query(&self, page: u32, is_new_search: bool) -> ActionOutcome {
        let request = self.feed().start_query(page, is_new_search);
        self.dispatch(request).await
    }

    /// Flip the description expansion of event `id`.
    ///
    /// # Errors
    ///
    /// Returns [`ScoutError::NotFound`] when no listed event has `id`.
    pub fn toggle_expanded(&self, id: &EventId) -> Result<bool, ScoutError> {
        self.feed().toggle_expanded(id).ok_or_else(|| {
            NotFoundError {
                entity: "Event",
                id: id.to_string(),
            }
            .into()
        })
    }

    async fn dispatch(&self, request: Result<PageRequest, QueryRejected>) -> ActionOutcome {
        let request = match request {
            Ok(request) => request,
            Err(rejected) => {
                tracing::debug!(reason = %rejected, "discovery action ignored");
                return ActionOutcome::Rejected(rejected);
            }
        };

        tracing::info!(
            location = %request.location,
            keyword = %request.keyword,
            page = request.page,
            "querying events"
        );
        let mut guard = InFlightGuard {
            feed: &self.feed,
            armed: true,
        };
        let result = self.query.search(request).await;
        guard.armed = false;

        match result {
            Ok(page) => {
                let received = page.events.len();
                let has_more = page.has_more;
                self.feed().complete(page);
                tracing::info!(received, has_more, "events page loaded");
                ActionOutcome::Loaded { received }
            }
            Err(err) => {
                tracing::warn!(error = ?err, "event query failed");
                self.feed().fail();
                ActionOutcome::Failed
            }
        }
    }
}

/// Fails the in-flight query if the dispatching future is dropped before
/// the upstream call resolves, so the feed never stays loading.
struct InFlightGuard<'a> {
    feed: &'a Mutex<Feed>,
    armed: bool,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            tracing::warn!("event query abandoned before completion");
            self.feed
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .fail();
        }
    }
}
