//! Discovery page: search form, event cards and pagination.

use std::str::FromStr;

use askama::Template;
use axum::extract::{Form, Path, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use serde::Deserialize;

use eventscout_app::ports::{AuthGateway, EventQuery};
use eventscout_domain::event::EventRecord;
use eventscout_domain::expansion::DescriptionView;
use eventscout_domain::error::ScoutError;
use eventscout_domain::feed::Feed;
use eventscout_domain::id::EventId;
use eventscout_domain::time::display_local;

use crate::state::AppState;

/// Seconds between reloads while a query is still in flight.
const LOADING_REFRESH_SECONDS: u32 = 2;

/// Discovery page template, rendered from a feed snapshot.
#[derive(Template)]
#[template(path = "discovery.html")]
pub struct DiscoveryTemplate {
    refresh_seconds: u32,
    location: String,
    keyword: String,
    loading: bool,
    error: Option<String>,
    cards: Vec<EventCard>,
    has_more: bool,
}

impl From<&Feed> for DiscoveryTemplate {
    fn from(feed: &Feed) -> Self {
        Self {
            refresh_seconds: LOADING_REFRESH_SECONDS,
            location: feed.filter().location.clone(),
            keyword: feed.filter().keyword.clone(),
            loading: feed.is_loading(),
            error: feed.error().map(ToString::to_string),
            cards: feed
                .events()
                .iter()
                .map(|event| EventCard::new(event, feed.is_expanded(&event.id)))
                .collect(),
            has_more: feed.has_more(),
        }
    }
}

impl IntoResponse for DiscoveryTemplate {
    fn into_response(self) -> Response {
        Html(self.to_string()).into_response()
    }
}

/// One event card, with every display rule already applied.
struct EventCard {
    id: String,
    title: String,
    image_url: String,
    url: String,
    description: String,
    toggle_label: Option<&'static str>,
    date: String,
    venue: String,
    tickets: String,
    status: String,
}

impl EventCard {
    fn new(event: &EventRecord, expanded: bool) -> Self {
        let description = DescriptionView::new(&event.description, expanded);
        Self {
            id: event.id.to_string(),
            title: event.title.clone(),
            image_url: event.image_or_placeholder().to_string(),
            url: event.url.clone(),
            description: description.text.to_string(),
            toggle_label: description.control.map(|control| control.label()),
            date: display_local(&event.start),
            venue: event.venue_display().to_string(),
            tickets: event
                .ticket_summary()
                .unwrap_or_else(|| "Not available".to_string()),
            status: event.status.to_string(),
        }
    }
}

/// Form data for the search bar.
#[derive(Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub keyword: String,
}

/// `GET /`: discovery page; the first visit runs the initial search.
pub async fn index<Q, G>(State(state): State<AppState<Q, G>>) -> DiscoveryTemplate
where
    Q: EventQuery + Send + Sync + 'static,
    G: AuthGateway + Send + Sync + 'static,
{
    state.discovery.initial_load().await;
    DiscoveryTemplate::from(&state.discovery.snapshot())
}

/// `POST /search`: store the filter and search from page 1 (PRG).
pub async fn search<Q, G>(
    State(state): State<AppState<Q, G>>,
    Form(form): Form<SearchForm>,
) -> Redirect
where
    Q: EventQuery + Send + Sync + 'static,
    G: AuthGateway + Send + Sync + 'static,
{
    state.discovery.set_location(form.location);
    state.discovery.set_keyword(form.keyword);
    state.discovery.search().await;
    Redirect::to("/")
}

/// `POST /more`: append the next page (PRG).
pub async fn load_more<Q, G>(State(state): State<AppState<Q, G>>) -> Redirect
where
    Q: EventQuery + Send + Sync + 'static,
    G: AuthGateway + Send + Sync + 'static,
{
    state.discovery.load_more().await;
    Redirect::to("/")
}

/// `POST /events/{id}/toggle`: flip "Read More" / "Show Less" (PRG).
///
/// An unknown or malformed id leaves the feed alone and still lands back on
/// the discovery page.
pub async fn toggle<Q, G>(
    State(state): State<AppState<Q, G>>,
    Path(id): Path<String>,
) -> Redirect
where
    Q: EventQuery + Send + Sync + 'static,
    G: AuthGateway + Send + Sync + 'static,
{
    let toggled = EventId::from_str(&id)
        .map_err(ScoutError::from)
        .and_then(|id| state.discovery.toggle_expanded(&id));
    if let Err(err) = toggled {
        tracing::debug!(id = %id, error = %err, "ignoring toggle request");
    }
    Redirect::to("/")
}
