//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use eventscout_domain::error::ScoutError;

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps [`ScoutError`] to an HTTP response with appropriate status code.
#[derive(Debug)]
pub struct ApiError(ScoutError);

impl<E> From<E> for ApiError
where
    E: Into<ScoutError>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            ScoutError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            ScoutError::NotFound(err) => (StatusCode::NOT_FOUND, err.to_string()),
            ScoutError::Upstream(err) => {
                tracing::error!(error = %err, "upstream error");
                (StatusCode::BAD_GATEWAY, "upstream service error".to_string())
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
