//! Auth backend adapter error types.

use eventscout_app::ports::AuthRejection;
use eventscout_domain::error::ScoutError;

/// Transport-level failures talking to the auth backend.
#[derive(Debug, thiserror::Error)]
pub enum AuthHttpError {
    /// The request could not be sent or its body could not be read.
    #[error("auth backend request failed")]
    Http(#[from] reqwest::Error),

    /// A success response did not have the expected shape.
    #[error("auth backend sent an unexpected response")]
    UnexpectedBody(#[from] serde_json::Error),
}

impl From<AuthHttpError> for ScoutError {
    fn from(err: AuthHttpError) -> Self {
        ScoutError::Upstream(Box::new(err))
    }
}

impl From<AuthHttpError> for AuthRejection {
    fn from(err: AuthHttpError) -> Self {
        AuthRejection::Transport(err.into())
    }
}
