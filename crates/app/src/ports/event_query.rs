//! Event query port: the remote events search endpoint.

use std::future::Future;

use eventscout_domain::error::ScoutError;
use eventscout_domain::page::{Page, PageRequest};

/// Source of paginated event search results.
pub trait EventQuery {
    /// Fetch one page of events matching `request`.
    ///
    /// Implementations report every failure (transport, authorization,
    /// undecodable response) as [`ScoutError::Upstream`]; callers do not
    /// distinguish between them.
    fn search(
        &self,
        request: PageRequest,
    ) -> impl Future<Output = Result<Page, ScoutError>> + Send;
}
