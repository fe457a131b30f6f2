//! JSON API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod feed;

use axum::Router;
use axum::routing::{get, post};

use eventscout_app::ports::{AuthGateway, EventQuery};

use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes<Q, G>() -> Router<AppState<Q, G>>
where
    Q: EventQuery + Send + Sync + 'static,
    G: AuthGateway + Send + Sync + 'static,
{
    Router::new()
        .route("/feed", get(feed::get::<Q, G>))
        .route("/feed/search", post(feed::search::<Q, G>))
        .route("/feed/more", post(feed::load_more::<Q, G>))
        .route("/feed/events/{id}/toggle", post(feed::toggle::<Q, G>))
}
