//! # eventscout-adapter-auth-http
//!
//! Auth gateway adapter for the first-party account backend, built on
//! `reqwest`.
//!
//! ## Routes
//!
//! | Operation | Route | Body |
//! |-----------|-------|------|
//! | login | `POST /api/auth/login/` | `{email, password}` → `{token}` |
//! | register | `POST /api/auth/register/` | `{username, email, password}` |
//! | verify OTP | `POST /api/auth/verify-otp/` | `{email, otp}` |
//! | Google | `POST /api/auth/google/` | `{token}` → `{email}` |
//!
//! Error statuses become [`AuthRejection::Rejected`] carrying the body's
//! `detail` field and the raw JSON body; everything else is
//! [`AuthRejection::Transport`].
//!
//! ## Dependency rule
//!
//! Same as other adapters: depends on `eventscout-app` and `eventscout-domain`.

mod config;
mod error;

pub use config::AuthBackendConfig;
pub use error::AuthHttpError;

use serde::Deserialize;
use serde_json::{Value, json};

use eventscout_app::ports::{AuthGateway, AuthRejection};
use eventscout_domain::auth::{PendingVerification, SessionToken};

#[derive(Deserialize)]
struct EmailBody {
    email: String,
}

/// [`AuthGateway`] backed by the auth backend's REST API.
#[derive(Debug, Clone)]
pub struct HttpAuthGateway {
    http: reqwest::Client,
    config: AuthBackendConfig,
}

impl HttpAuthGateway {
    /// Create a gateway sharing the given `reqwest` connection pool.
    #[must_use]
    pub fn new(http: reqwest::Client, config: AuthBackendConfig) -> Self {
        Self { http, config }
    }

    /// POST `body` to auth route `route` and return the decoded success body
    /// (`null` when empty or not JSON).
    async fn post(&self, route: &str, body: Value) -> Result<Value, AuthRejection> {
        let response = self
            .http
            .post(self.config.endpoint(route))
            .json(&body)
            .send()
            .await
            .map_err(AuthHttpError::from)?;
        let status = response.status();
        let text = response.text().await.map_err(AuthHttpError::from)?;

        if status.is_success() {
            return Ok(serde_json::from_str(&text).unwrap_or(Value::Null));
        }

        let parsed = serde_json::from_str::<Value>(&text).ok();
        let detail = parsed
            .as_ref()
            .and_then(|v| v.get("detail"))
            .and_then(Value::as_str)
            .map(str::to_string);
        tracing::debug!(%status, route, "auth backend rejected request");
        Err(AuthRejection::Rejected {
            detail,
            body: parsed.map(|v| v.to_string()),
        })
    }
}

impl AuthGateway for HttpAuthGateway {
    async fn login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<SessionToken>, AuthRejection> {
        let body = self
            .post("login", json!({"email": email, "password": password}))
            .await?;
        Ok(body
            .get("token")
            .and_then(Value::as_str)
            .filter(|token| !token.is_empty())
            .map(SessionToken::new))
    }

    async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<PendingVerification, AuthRejection> {
        self.post(
            "register",
            json!({"username": username, "email": email, "password": password}),
        )
        .await?;
        Ok(PendingVerification {
            email: email.to_string(),
        })
    }

    async fn verify_otp(&self, email: &str, otp: &str) -> Result<(), AuthRejection> {
        self.post("verify-otp", json!({"email": email, "otp": otp}))
            .await?;
        Ok(())
    }

    async fn exchange_google_credential(
        &self,
        credential: &str,
    ) -> Result<PendingVerification, AuthRejection> {
        let body = self.post("google", json!({"token": credential})).await?;
        let EmailBody { email } =
            serde_json::from_value::<EmailBody>(body).map_err(AuthHttpError::from)?;
        Ok(PendingVerification { email })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::Json;
    use axum::Router;
    use axum::extract::State;
    use axum::http::StatusCode;
    use axum::routing::post;

    use eventscout_domain::error::ScoutError;

    use super::*;

    type Bodies = Arc<Mutex<Vec<Value>>>;

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    async fn backend() -> (HttpAuthGateway, Bodies) {
        let bodies = Bodies::default();
        let router = Router::new()
            .route(
                "/api/auth/login/",
                post(|State(b): State<Bodies>, Json(body): Json<Value>| async move {
                    let ok = body["password"] == "right";
                    b.lock().unwrap().push(body);
                    if ok {
                        (StatusCode::OK, Json(json!({"token": "tok-1"})))
                    } else {
                        (
                            StatusCode::UNAUTHORIZED,
                            Json(json!({"detail": "Invalid credentials"})),
                        )
                    }
                }),
            )
            .route(
                "/api/auth/register/",
                post(|State(b): State<Bodies>, Json(body): Json<Value>| async move {
                    b.lock().unwrap().push(body);
                    (
                        StatusCode::BAD_REQUEST,
                        Json(json!({"email": ["user with this email already exists."]})),
                    )
                }),
            )
            .route(
                "/api/auth/verify-otp/",
                post(|State(b): State<Bodies>, Json(body): Json<Value>| async move {
                    b.lock().unwrap().push(body);
                    StatusCode::OK
                }),
            )
            .route(
                "/api/auth/google/",
                post(|State(b): State<Bodies>, Json(body): Json<Value>| async move {
                    b.lock().unwrap().push(body);
                    Json(json!({"email": "google.user@example.com"}))
                }),
            )
            .with_state(Arc::clone(&bodies));
        let base_url = serve(router).await;
        let gateway = HttpAuthGateway::new(reqwest::Client::new(), AuthBackendConfig { base_url });
        (gateway, bodies)
    }

    #[tokio::test]
    async fn should_return_token_for_valid_login() {
        let (gateway, bodies) = backend().await;
        let token = gateway.login("a@example.com", "right").await.unwrap();
        assert_eq!(token.unwrap().as_str(), "tok-1");
        assert_eq!(
            bodies.lock().unwrap()[0],
            json!({"email": "a@example.com", "password": "right"})
        );
    }

    #[tokio::test]
    async fn should_carry_detail_for_rejected_login() {
        let (gateway, _) = backend().await;
        let err = gateway.login("a@example.com", "wrong").await.unwrap_err();
        match err {
            AuthRejection::Rejected { detail, body } => {
                assert_eq!(detail.as_deref(), Some("Invalid credentials"));
                assert!(body.unwrap().contains("Invalid credentials"));
            }
            AuthRejection::Transport(err) => panic!("unexpected transport error: {err:?}"),
        }
    }

    #[tokio::test]
    async fn should_carry_raw_body_without_detail() {
        let (gateway, _) = backend().await;
        let err = gateway
            .register("amina", "a@example.com", "pw")
            .await
            .unwrap_err();
        match err {
            AuthRejection::Rejected { detail, body } => {
                assert_eq!(detail, None);
                assert!(body.unwrap().contains("already exists"));
            }
            AuthRejection::Transport(err) => panic!("unexpected transport error: {err:?}"),
        }
    }

    #[tokio::test]
    async fn should_accept_empty_success_body_for_otp() {
        let (gateway, bodies) = backend().await;
        gateway.verify_otp("a@example.com", "123456").await.unwrap();
        assert_eq!(
            bodies.lock().unwrap()[0],
            json!({"email": "a@example.com", "otp": "123456"})
        );
    }

    #[tokio::test]
    async fn should_return_pending_email_from_google_exchange() {
        let (gateway, bodies) = backend().await;
        let pending = gateway.exchange_google_credential("jwt").await.unwrap();
        assert_eq!(pending.email, "google.user@example.com");
        assert_eq!(bodies.lock().unwrap()[0], json!({"token": "jwt"}));
    }

    #[tokio::test]
    async fn should_report_unreachable_backend_as_transport() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let gateway = HttpAuthGateway::new(
            reqwest::Client::new(),
            AuthBackendConfig {
                base_url: format!("http://{addr}"),
            },
        );

        let err = gateway.verify_otp("a@example.com", "1").await.unwrap_err();
        assert!(matches!(
            err,
            AuthRejection::Transport(ScoutError::Upstream(_))
        ));
    }
}
