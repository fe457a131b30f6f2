//! Login and registration pages.
//!
//! Messages come straight from [`AuthService`](eventscout_app::services::auth_service::AuthService).
//! The session token from a successful login is not kept.

use askama::Template;
use axum::extract::{Form, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use serde::Deserialize;

use eventscout_app::ports::{AuthGateway, EventQuery};
use eventscout_app::services::identity_bootstrap::SignInWidget;
use eventscout_domain::auth::Registration;

use crate::state::AppState;

/// Seconds before the verified page moves on to the login form.
const VERIFIED_REDIRECT_SECONDS: u32 = 2;

/// Login form page template.
#[derive(Default, Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    email: String,
    error: Option<String>,
}

impl IntoResponse for LoginTemplate {
    fn into_response(self) -> Response {
        Html(self.to_string()).into_response()
    }
}

/// Which part of the registration flow is shown.
pub enum RegisterStep {
    /// Sign-up form, prefilled after a failed attempt.
    Details { username: String, email: String },
    /// OTP entry for `email`.
    Otp { email: String },
    /// Account verified; the page moves on to `/login`.
    Verified,
}

/// Registration page template.
///
/// Exactly one of the sign-up form, the OTP form or the verified notice is
/// shown, picked from the [`RegisterStep`] it was built with.
#[derive(Template)]
#[template(path = "register.html")]
pub struct RegisterTemplate {
    redirect_seconds: u32,
    username: String,
    email: String,
    otp_email: Option<String>,
    verified: bool,
    widget: Option<SignInWidget>,
    error: Option<String>,
    success: Option<String>,
}

impl RegisterTemplate {
    fn new(step: RegisterStep, widget: Option<&SignInWidget>) -> Self {
        let mut page = Self {
            redirect_seconds: VERIFIED_REDIRECT_SECONDS,
            username: String::new(),
            email: String::new(),
            otp_email: None,
            verified: false,
            widget: widget.cloned(),
            error: None,
            success: None,
        };
        match step {
            RegisterStep::Details { username, email } => {
                page.username = username;
                page.email = email;
            }
            RegisterStep::Otp { email } => page.otp_email = Some(email),
            RegisterStep::Verified => page.verified = true,
        }
        page
    }

    fn with_error(mut self, message: String) -> Self {
        self.error = Some(message);
        self
    }

    fn with_success(mut self, message: &str) -> Self {
        self.success = Some(message.to_string());
        self
    }
}

impl IntoResponse for RegisterTemplate {
    fn into_response(self) -> Response {
        Html(self.to_string()).into_response()
    }
}

/// Form data for the login page.
#[derive(Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Form data for OTP verification.
#[derive(Deserialize)]
pub struct OtpForm {
    pub email: String,
    pub otp: String,
}

/// Credential posted back by the Google sign-in widget.
#[derive(Deserialize)]
pub struct GoogleCredentialForm {
    pub credential: String,
}

/// Possible responses from the login form handler.
pub enum LoginResponse {
    /// Logged in; back to the discovery page.
    Redirect(Redirect),
    /// Login failed; show the form with the message.
    Failed(LoginTemplate),
}

impl IntoResponse for LoginResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Redirect(redirect) => redirect.into_response(),
            Self::Failed(page) => page.into_response(),
        }
    }
}

/// `GET /login`
pub async fn login_form() -> LoginTemplate {
    LoginTemplate::default()
}

/// `POST /login`: authenticate and redirect (PRG), or re-render with the error.
pub async fn login<Q, G>(
    State(state): State<AppState<Q, G>>,
    Form(form): Form<LoginForm>,
) -> LoginResponse
where
    Q: EventQuery + Send + Sync + 'static,
    G: AuthGateway + Send + Sync + 'static,
{
    match state.auth.login(&form.email, &form.password).await {
        Ok(_token) => LoginResponse::Redirect(Redirect::to("/")),
        Err(err) => LoginResponse::Failed(LoginTemplate {
            email: form.email,
            error: Some(err.message),
        }),
    }
}

/// `GET /register`
pub async fn register_form<Q, G>(State(state): State<AppState<Q, G>>) -> RegisterTemplate
where
    Q: EventQuery + Send + Sync + 'static,
    G: AuthGateway + Send + Sync + 'static,
{
    let step = RegisterStep::Details {
        username: String::new(),
        email: String::new(),
    };
    RegisterTemplate::new(step, state.identity.activate())
}

/// `POST /register`: create the account and ask for the emailed OTP.
pub async fn register<Q, G>(
    State(state): State<AppState<Q, G>>,
    Form(form): Form<Registration>,
) -> RegisterTemplate
where
    Q: EventQuery + Send + Sync + 'static,
    G: AuthGateway + Send + Sync + 'static,
{
    let widget = state.identity.activate();
    match state.auth.register(&form).await {
        Ok(pending) => RegisterTemplate::new(
            RegisterStep::Otp {
                email: pending.email,
            },
            widget,
        )
        .with_success("OTP sent to your email. Please verify."),
        Err(err) => RegisterTemplate::new(
            RegisterStep::Details {
                username: form.username,
                email: form.email,
            },
            widget,
        )
        .with_error(err.message),
    }
}

/// `POST /register/otp`: confirm the account.
pub async fn verify_otp<Q, G>(
    State(state): State<AppState<Q, G>>,
    Form(form): Form<OtpForm>,
) -> RegisterTemplate
where
    Q: EventQuery + Send + Sync + 'static,
    G: AuthGateway + Send + Sync + 'static,
{
    let widget = state.identity.activate();
    match state.auth.verify_otp(&form.email, &form.otp).await {
        Ok(()) => RegisterTemplate::new(RegisterStep::Verified, widget)
            .with_success("OTP verified. Redirecting to login..."),
        Err(err) => RegisterTemplate::new(RegisterStep::Otp { email: form.email }, widget)
            .with_error(err.message),
    }
}

/// `POST /register/google`: credential callback from the Google widget.
pub async fn google<Q, G>(
    State(state): State<AppState<Q, G>>,
    Form(form): Form<GoogleCredentialForm>,
) -> RegisterTemplate
where
    Q: EventQuery + Send + Sync + 'static,
    G: AuthGateway + Send + Sync + 'static,
{
    let widget = state.identity.activate();
    match state.auth.google_sign_in(&form.credential).await {
        Ok(pending) => RegisterTemplate::new(
            RegisterStep::Otp {
                email: pending.email,
            },
            widget,
        )
        .with_success("OTP sent to your email from Google sign-in."),
        Err(err) => RegisterTemplate::new(
            RegisterStep::Details {
                username: String::new(),
                email: String::new(),
            },
            widget,
        )
        .with_error(err.message),
    }
}
