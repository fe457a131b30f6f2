//! JSON handlers over the discovery feed.

use std::str::FromStr;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use eventscout_app::ports::{AuthGateway, EventQuery};
use eventscout_app::services::discovery_service::ActionOutcome;
use eventscout_domain::feed::{Feed, QueryRejected};
use eventscout_domain::id::EventId;

use crate::error::ApiError;
use crate::state::AppState;

/// Feed snapshot plus derived view flags.
#[derive(Serialize)]
pub struct FeedBody {
    #[serde(flatten)]
    feed: Feed,
    can_load_more: bool,
}

impl From<Feed> for FeedBody {
    fn from(feed: Feed) -> Self {
        Self {
            can_load_more: feed.can_load_more(),
            feed,
        }
    }
}

/// Result of a search or load-more call.
#[derive(Serialize)]
pub struct ActionBody {
    outcome: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    received: Option<usize>,
    feed: FeedBody,
}

/// Request body for a search. Absent fields keep the current filter value.
#[derive(Default, Deserialize)]
pub struct SearchRequest {
    pub location: Option<String>,
    pub keyword: Option<String>,
}

/// Response body for a description toggle.
#[derive(Serialize)]
pub struct ToggleBody {
    id: EventId,
    expanded: bool,
}

/// Possible responses from the search and load-more endpoints.
pub enum ActionResponse {
    /// A page was applied.
    Ok(Json<ActionBody>),
    /// The upstream query failed; the feed carries the error.
    BadGateway(Json<ActionBody>),
    /// Busy, or nothing more to load.
    Conflict(Json<ActionBody>),
    /// The requested page was invalid.
    BadRequest(Json<ActionBody>),
}

impl ActionResponse {
    fn new(outcome: ActionOutcome, feed: Feed) -> Self {
        let body = |outcome, received| {
            Json(ActionBody {
                outcome,
                received,
                feed: feed.into(),
            })
        };
        match outcome {
            ActionOutcome::Loaded { received } => Self::Ok(body("loaded", Some(received))),
            ActionOutcome::Failed => Self::BadGateway(body("failed", None)),
            ActionOutcome::Rejected(QueryRejected::Busy) => Self::Conflict(body("busy", None)),
            ActionOutcome::Rejected(QueryRejected::NothingMore) => {
                Self::Conflict(body("nothing_more", None))
            }
            ActionOutcome::Rejected(QueryRejected::Invalid(_)) => {
                Self::BadRequest(body("invalid", None))
            }
        }
    }
}

impl IntoResponse for ActionResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
            Self::BadGateway(json) => (StatusCode::BAD_GATEWAY, json).into_response(),
            Self::Conflict(json) => (StatusCode::CONFLICT, json).into_response(),
            Self::BadRequest(json) => (StatusCode::BAD_REQUEST, json).into_response(),
        }
    }
}

/// `GET /api/feed`: current feed without triggering any query.
pub async fn get<Q, G>(State(state): State<AppState<Q, G>>) -> Json<FeedBody>
where
    Q: EventQuery + Send + Sync + 'static,
    G: AuthGateway + Send + Sync + 'static,
{
    Json(state.discovery.snapshot().into())
}

/// `POST /api/feed/search`: update the filter and search from page 1.
pub async fn search<Q, G>(
    State(state): State<AppState<Q, G>>,
    Json(req): Json<SearchRequest>,
) -> ActionResponse
where
    Q: EventQuery + Send + Sync + 'static,
    G: AuthGateway + Send + Sync + 'static,
{
    if let Some(location) = req.location {
        state.discovery.set_location(location);
    }
    if let Some(keyword) = req.keyword {
        state.discovery.set_keyword(keyword);
    }
    let outcome = state.discovery.search().await;
    ActionResponse::new(outcome, state.discovery.snapshot())
}

/// `POST /api/feed/more`: append the next page.
pub async fn load_more<Q, G>(State(state): State<AppState<Q, G>>) -> ActionResponse
where
    Q: EventQuery + Send + Sync + 'static,
    G: AuthGateway + Send + Sync + 'static,
{
    let outcome = state.discovery.load_more().await;
    ActionResponse::new(outcome, state.discovery.snapshot())
}

/// `POST /api/feed/events/{id}/toggle`: flip one description.
pub async fn toggle<Q, G>(
    State(state): State<AppState<Q, G>>,
    Path(id): Path<String>,
) -> Result<Json<ToggleBody>, ApiError>
where
    Q: EventQuery + Send + Sync + 'static,
    G: AuthGateway + Send + Sync + 'static,
{
    let id = EventId::from_str(&id)?;
    let expanded = state.discovery.toggle_expanded(&id)?;
    Ok(Json(ToggleBody { id, expanded }))
}
