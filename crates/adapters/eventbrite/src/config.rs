//! Eventbrite client configuration.

use serde::Deserialize;

/// Public Eventbrite API host.
pub const DEFAULT_BASE_URL: &str = "https://www.eventbriteapi.com";

/// Configuration for the Eventbrite events API.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EventbriteConfig {
    /// API root, without the `/v3` path.
    pub base_url: String,
    /// Private OAuth token sent as a bearer token.
    pub api_token: String,
}

impl Default for EventbriteConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_token: String::new(),
        }
    }
}

impl EventbriteConfig {
    /// Full URL of the event search endpoint.
    #[must_use]
    pub fn search_url(&self) -> String {
        format!(
            "{}/v3/events/search/",
            self.base_url.trim_end_matches('/')
        )
    }
}
