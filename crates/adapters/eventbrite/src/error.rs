//! Eventbrite adapter error types.

use eventscout_domain::error::{ScoutError, ValidationError};

/// Errors specific to the Eventbrite adapter.
#[derive(Debug, thiserror::Error)]
pub enum EventbriteError {
    /// The request could not be sent or the body could not be read/decoded.
    #[error("events API request failed")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status (e.g. 401 for a bad token).
    #[error("events API answered {0}")]
    Status(reqwest::StatusCode),

    /// An event in the response could not be mapped to a record.
    #[error("malformed event in response")]
    Malformed(#[from] ValidationError),
}

impl From<EventbriteError> for ScoutError {
    fn from(err: EventbriteError) -> Self {
        ScoutError::Upstream(Box::new(err))
    }
}
