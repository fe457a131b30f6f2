//! # eventscout-adapter-eventbrite
//!
//! Event query adapter for the [Eventbrite](https://www.eventbrite.com/platform/api)
//! search endpoint, built on `reqwest`.
//!
//! ## How it works
//!
//! Each [`PageRequest`] becomes one authenticated
//! `GET /v3/events/search/` with venue and ticket classes expanded inline.
//! Transport failures, non-success statuses and undecodable bodies all
//! surface as [`ScoutError::Upstream`]; the core does not tell them apart.
//!
//! No request timeout is configured: a stalled upstream keeps the query
//! pending until the connection drops.
//!
//! ## Dependency rule
//!
//! Same as other adapters: depends on `eventscout-app` and `eventscout-domain`.

mod config;
mod dto;
mod error;

pub use config::EventbriteConfig;
pub use error::EventbriteError;

use eventscout_app::ports::EventQuery;
use eventscout_domain::error::ScoutError;
use eventscout_domain::page::{Page, PageRequest};

use crate::dto::SearchResponse;

/// Related objects expanded inline in search results.
const EXPAND: &str = "venue,ticket_classes";

/// [`EventQuery`] backed by the Eventbrite REST API.
#[derive(Debug, Clone)]
pub struct EventbriteClient {
    http: reqwest::Client,
    config: EventbriteConfig,
}

impl EventbriteClient {
    /// Create a client sharing the given `reqwest` connection pool.
    #[must_use]
    pub fn new(http: reqwest::Client, config: EventbriteConfig) -> Self {
        Self { http, config }
    }

    async fn fetch(&self, request: &PageRequest) -> Result<Page, EventbriteError> {
        let response = self
            .http
            .get(self.config.search_url())
            .bearer_auth(&self.config.api_token)
            .query(&[
                ("location.address", request.location.clone()),
                ("q", request.keyword.clone()),
                ("expand", EXPAND.to_string()),
                ("sort_by", request.sort_by.as_str().to_string()),
                ("page", request.page.to_string()),
                ("page_size", request.page_size.to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(EventbriteError::Status(status));
        }

        let body: SearchResponse = response.json().await?;
        Ok(body.into_page()?)
    }
}

impl EventQuery for EventbriteClient {
    async fn search(&self, request: PageRequest) -> Result<Page, ScoutError> {
        tracing::debug!(page = request.page, "eventbrite search");
        self.fetch(&request).await.map_err(|err| {
            tracing::error!(error = %err, page = request.page, "eventbrite search failed");
            err.into()
        })
    }
}
