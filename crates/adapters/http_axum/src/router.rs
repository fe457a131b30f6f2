//! Axum router assembly.

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use eventscout_app::ports::{AuthGateway, EventQuery};

use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Nests the JSON API under `/api` and merges the HTML pages at `/`.
/// Includes a [`TraceLayer`] that logs each HTTP request/response at the
/// `DEBUG` level using the `tracing` ecosystem.
pub fn build<Q, G>(state: AppState<Q, G>) -> Router
where
    Q: EventQuery + Send + Sync + 'static,
    G: AuthGateway + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .nest("/api", crate::api::routes())
        .merge(crate::dashboard::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AppState;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use eventscout_app::ports::AuthRejection;
    use eventscout_app::services::auth_service::AuthService;
    use eventscout_app::services::discovery_service::DiscoveryService;
    use eventscout_app::services::identity_bootstrap::IdentityBootstrap;
    use eventscout_domain::auth::{PendingVerification, SessionToken};
    use eventscout_domain::error::ScoutError;
    use eventscout_domain::event::EventRecord;
    use eventscout_domain::id::EventId;
    use eventscout_domain::page::{Page, PageRequest};
    use http_body_util::BodyExt;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, Mutex};
    use tokio::sync::Notify;
    use tower::ServiceExt;

    /// Holds a query open until the test releases it.
    #[derive(Default)]
    struct QueryGate {
        entered: Notify,
        release: Notify,
    }

    /// Serves `pages` pages of two events each and records every request.
    ///
    /// With `pages == 0` every page comes back empty.
    #[derive(Clone)]
    struct StubQuery {
        requests: Arc<Mutex<Vec<PageRequest>>>,
        failing: Arc<AtomicBool>,
        gate: Option<Arc<QueryGate>>,
        pages: u32,
    }

    impl StubQuery {
        fn new(pages: u32) -> Self {
            Self {
                requests: Arc::default(),
                failing: Arc::default(),
                gate: None,
                pages,
            }
        }

        fn gated(pages: u32) -> (Self, Arc<QueryGate>) {
            let gate = Arc::new(QueryGate::default());
            let query = Self {
                gate: Some(gate.clone()),
                ..Self::new(pages)
            };
            (query, gate)
        }
    }

    impl EventQuery for StubQuery {
        async fn search(&self, request: PageRequest) -> Result<Page, ScoutError> {
            self.requests.lock().unwrap().push(request.clone());
            if let Some(gate) = &self.gate {
                gate.entered.notify_one();
                gate.release.notified().await;
            }
            if self.failing.load(Ordering::SeqCst) {
                return Err(ScoutError::Upstream("connection reset".into()));
            }
            if self.pages == 0 {
                return Ok(Page {
                    events: Vec::new(),
                    has_more: false,
                });
            }
            let first = (request.page - 1) * 2;
            let events = (first..first + 2)
                .map(|i| {
                    EventRecord::builder()
                        .id(EventId::new(format!("evt-{i}")).unwrap())
                        .title(format!("Event {i} & friends"))
                        .description("x".repeat(250))
                        .build()
                        .unwrap()
                })
                .collect();
            Ok(Page {
                events,
                has_more: request.page < self.pages,
            })
        }
    }

    struct StubGateway;

    impl AuthGateway for StubGateway {
        async fn login(
            &self,
            _email: &str,
            password: &str,
        ) -> Result<Option<SessionToken>, AuthRejection> {
            if password == "right" {
                Ok(Some(SessionToken::new("tok")))
            } else {
                Err(AuthRejection::Rejected {
                    detail: Some("Invalid credentials".to_string()),
                    body: None,
                })
            }
        }

        async fn register(
            &self,
            _username: &str,
            email: &str,
            _password: &str,
        ) -> Result<PendingVerification, AuthRejection> {
            Ok(PendingVerification {
                email: email.to_string(),
            })
        }

        async fn verify_otp(&self, _email: &str, otp: &str) -> Result<(), AuthRejection> {
            if otp == "123456" {
                Ok(())
            } else {
                Err(AuthRejection::Rejected {
                    detail: Some("Invalid OTP".to_string()),
                    body: None,
                })
            }
        }

        async fn exchange_google_credential(
            &self,
            _credential: &str,
        ) -> Result<PendingVerification, AuthRejection> {
            Err(AuthRejection::Transport(ScoutError::Upstream("down".into())))
        }
    }

    fn test_app(query: StubQuery, identity: IdentityBootstrap) -> Router {
        build(AppState::new(
            DiscoveryService::new(query),
            AuthService::new(StubGateway),
            identity,
        ))
    }

    fn get_req(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn form_req(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn json_req(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_text(response: axum::response::Response) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn should_return_ok_when_health_check_called() {
        let app = test_app(StubQuery::new(1), IdentityBootstrap::disabled());

        let response = app.oneshot(get_req("/health")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn should_run_initial_load_once_when_index_visited() {
        let query = StubQuery::new(3);
        let app = test_app(query.clone(), IdentityBootstrap::disabled());

        let response = app.clone().oneshot(get_req("/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("Event 0 &amp; friends"));
        assert!(html.contains("Read More"));
        assert!(html.contains("Load More Events"));

        app.oneshot(get_req("/")).await.unwrap();
        let requests = query.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].location, "Nairobi");
        assert_eq!(requests[0].keyword, "");
    }

    #[tokio::test]
    async fn should_redirect_and_search_when_search_form_posted() {
        let query = StubQuery::new(3);
        let app = test_app(query.clone(), IdentityBootstrap::disabled());

        let response = app
            .clone()
            .oneshot(form_req("/search", "location=Mombasa&keyword=jazz+night"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/");

        let html = body_text(app.oneshot(get_req("/")).await.unwrap()).await;
        assert!(html.contains("value=\"Mombasa\""));
        let requests = query.requests.lock().unwrap();
        assert_eq!(requests.len(), 1, "explicit search replaces the initial load");
        assert_eq!(requests[0].keyword, "jazz night");
    }

    #[tokio::test]
    async fn should_append_page_when_more_posted() {
        let query = StubQuery::new(2);
        let app = test_app(query.clone(), IdentityBootstrap::disabled());
        app.clone().oneshot(get_req("/")).await.unwrap();

        let response = app.clone().oneshot(form_req("/more", "")).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let html = body_text(app.oneshot(get_req("/")).await.unwrap()).await;
        assert!(html.contains("Event 3 &amp; friends"));
        assert!(!html.contains("Load More Events"));
        assert_eq!(query.requests.lock().unwrap()[1].page, 2);
    }

    #[tokio::test]
    async fn should_expand_description_when_toggle_posted() {
        let app = test_app(StubQuery::new(1), IdentityBootstrap::disabled());
        app.clone().oneshot(get_req("/")).await.unwrap();

        let response = app
            .clone()
            .oneshot(form_req("/events/evt-1/toggle", ""))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let html = body_text(app.oneshot(get_req("/")).await.unwrap()).await;
        assert!(html.contains("Show Less"));
        assert!(html.contains(&"x".repeat(250)));
    }

    #[tokio::test]
    async fn should_redirect_home_when_toggling_unknown_event_from_page() {
        let query = StubQuery::new(1);
        let app = test_app(query.clone(), IdentityBootstrap::disabled());
        app.clone().oneshot(get_req("/")).await.unwrap();

        let response = app
            .clone()
            .oneshot(form_req("/events/nope/toggle", ""))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/");
        let html = body_text(app.oneshot(get_req("/")).await.unwrap()).await;
        assert!(!html.contains("Show Less"));
        assert_eq!(query.requests.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn should_render_loading_page_while_search_is_in_flight() {
        let (query, gate) = StubQuery::gated(2);
        let app = test_app(query.clone(), IdentityBootstrap::disabled());

        let pending = tokio::spawn(
            app.clone()
                .oneshot(form_req("/search", "location=Mombasa&keyword=")),
        );
        gate.entered.notified().await;

        let html = body_text(app.clone().oneshot(get_req("/")).await.unwrap()).await;
        assert!(html.contains("Loading events..."));
        assert!(html.contains("<meta http-equiv=\"refresh\" content=\"2\">"));
        assert!(html.contains("<button type=\"submit\" disabled>Search</button>"));
        assert!(html.contains("<button type=\"submit\" disabled>Loading...</button>"));
        assert!(!html.contains("No upcoming events found."));

        gate.release.notify_one();
        let response = pending.await.unwrap().unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let html = body_text(app.oneshot(get_req("/")).await.unwrap()).await;
        assert!(!html.contains("Loading events..."));
        assert!(!html.contains("http-equiv=\"refresh\""));
        assert!(html.contains("Load More Events"));
        assert_eq!(query.requests.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn should_render_empty_message_when_search_finds_nothing() {
        let app = test_app(StubQuery::new(0), IdentityBootstrap::disabled());

        let response = app.oneshot(get_req("/")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("No upcoming events found."));
        assert!(!html.contains("Loading events..."));
        assert!(!html.contains("Load More Events"));
    }

    #[tokio::test]
    async fn should_render_not_available_when_event_has_no_ticket_classes() {
        let app = test_app(StubQuery::new(1), IdentityBootstrap::disabled());

        let html = body_text(app.oneshot(get_req("/")).await.unwrap()).await;

        assert_eq!(html.matches("<strong>Tickets:</strong> Not available").count(), 2);
    }

    #[tokio::test]
    async fn should_return_404_when_toggling_unknown_event() {
        let app = test_app(StubQuery::new(1), IdentityBootstrap::disabled());

        let response = app
            .oneshot(json_req("/api/feed/events/nope/toggle", ""))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn should_return_feed_json_without_querying() {
        let query = StubQuery::new(1);
        let app = test_app(query.clone(), IdentityBootstrap::disabled());

        let response = app.oneshot(get_req("/api/feed")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();

        assert_eq!(json["page_number"], 1);
        assert_eq!(json["status"]["state"], "idle");
        assert_eq!(json["can_load_more"], true);
        assert!(query.requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_report_bad_gateway_and_keep_events_when_load_more_fails() {
        let query = StubQuery::new(3);
        let app = test_app(query.clone(), IdentityBootstrap::disabled());
        let response = app
            .clone()
            .oneshot(json_req("/api/feed/search", "{\"keyword\":\"music\"}"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        query.failing.store(true, Ordering::SeqCst);
        let response = app.oneshot(json_req("/api/feed/more", "")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();

        assert_eq!(json["outcome"], "failed");
        assert_eq!(json["feed"]["status"]["message"], "Failed to load events");
        assert_eq!(json["feed"]["page_number"], 1);
        assert_eq!(json["feed"]["events"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn should_reject_load_more_when_exhausted() {
        let app = test_app(StubQuery::new(1), IdentityBootstrap::disabled());
        app.clone()
            .oneshot(json_req("/api/feed/search", "{}"))
            .await
            .unwrap();

        let response = app.oneshot(json_req("/api/feed/more", "")).await.unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);
        let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(json["outcome"], "nothing_more");
    }

    #[tokio::test]
    async fn should_show_error_when_login_rejected() {
        let app = test_app(StubQuery::new(1), IdentityBootstrap::disabled());

        let response = app
            .oneshot(form_req("/login", "email=a%40example.com&password=wrong"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("Invalid credentials"));
        assert!(html.contains("value=\"a@example.com\""));
    }

    #[tokio::test]
    async fn should_redirect_home_when_login_succeeds() {
        let app = test_app(StubQuery::new(1), IdentityBootstrap::disabled());

        let response = app
            .oneshot(form_req("/login", "email=a%40example.com&password=right"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/");
    }

    #[tokio::test]
    async fn should_ask_for_otp_when_registration_accepted() {
        let app = test_app(StubQuery::new(1), IdentityBootstrap::disabled());

        let response = app
            .oneshot(form_req(
                "/register",
                "username=amina&email=a%40example.com&password=pw&confirm_password=pw",
            ))
            .await
            .unwrap();

        let html = body_text(response).await;
        assert!(html.contains("Enter OTP sent to: <strong>a@example.com</strong>"));
        assert!(html.contains("OTP sent to your email. Please verify."));
    }

    #[tokio::test]
    async fn should_keep_form_when_passwords_differ() {
        let app = test_app(StubQuery::new(1), IdentityBootstrap::disabled());

        let response = app
            .oneshot(form_req(
                "/register",
                "username=amina&email=a%40example.com&password=pw&confirm_password=other",
            ))
            .await
            .unwrap();

        let html = body_text(response).await;
        assert!(html.contains("Passwords do not match"));
        assert!(html.contains("value=\"amina\""));
    }

    #[tokio::test]
    async fn should_refresh_to_login_when_otp_verified() {
        let app = test_app(StubQuery::new(1), IdentityBootstrap::disabled());

        let response = app
            .oneshot(form_req("/register/otp", "email=a%40example.com&otp=123456"))
            .await
            .unwrap();

        let html = body_text(response).await;
        assert!(html.contains("OTP verified. Redirecting to login..."));
        assert!(html.contains("url=/login"));
    }

    #[tokio::test]
    async fn should_report_google_failure_on_register_page() {
        let app = test_app(StubQuery::new(1), IdentityBootstrap::disabled());

        let response = app
            .oneshot(form_req(
                "/register/google",
                "credential=jwt&g_csrf_token=abc",
            ))
            .await
            .unwrap();

        assert!(body_text(response).await.contains("Google sign-in failed."));
    }

    #[tokio::test]
    async fn should_render_google_widget_only_when_configured() {
        let disabled = test_app(StubQuery::new(1), IdentityBootstrap::disabled());
        let html = body_text(disabled.oneshot(get_req("/register")).await.unwrap()).await;
        assert!(!html.contains("g_id_onload"));

        let identity = IdentityBootstrap::new(
            Some("client-123".to_string()),
            "/register/google",
            |_| {},
        );
        let enabled = test_app(StubQuery::new(1), identity);
        let html = body_text(enabled.oneshot(get_req("/register")).await.unwrap()).await;
        assert!(html.contains("data-client_id=\"client-123\""));
        assert!(html.contains("data-login_uri=\"/register/google\""));
    }
}
