//! Server-side rendered HTML pages (no JavaScript of our own).

pub mod account;
pub mod discovery;

use axum::Router;
use axum::routing::{get, post};

use eventscout_app::ports::{AuthGateway, EventQuery};

use crate::state::AppState;

/// Build the dashboard sub-router for SSR HTML pages.
pub fn routes<Q, G>() -> Router<AppState<Q, G>>
where
    Q: EventQuery + Send + Sync + 'static,
    G: AuthGateway + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(discovery::index::<Q, G>))
        .route("/search", post(discovery::search::<Q, G>))
        .route("/more", post(discovery::load_more::<Q, G>))
        .route("/events/{id}/toggle", post(discovery::toggle::<Q, G>))
        .route(
            "/login",
            get(account::login_form).post(account::login::<Q, G>),
        )
        .route(
            "/register",
            get(account::register_form::<Q, G>).post(account::register::<Q, G>),
        )
        .route("/register/otp", post(account::verify_otp::<Q, G>))
        .route("/register/google", post(account::google::<Q, G>))
}
