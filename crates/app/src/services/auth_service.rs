//! Auth service: login, registration and OTP verification.
//!
//! Thin request/response glue over [`AuthGateway`]: each operation turns the
//! backend outcome into the message shown to the user.

use eventscout_domain::auth::{PendingVerification, Registration, SessionToken};

use crate::ports::{AuthGateway, AuthRejection};

/// A user-facing auth failure message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct AuthError {
    pub message: String,
}

impl AuthError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Prefer the backend `detail`, then (optionally) the raw body, then
    /// `fallback`.
    fn from_rejection(rejection: AuthRejection, use_body: bool, fallback: &str) -> Self {
        match rejection {
            AuthRejection::Rejected { detail, body } => {
                let message = detail
                    .or_else(|| body.filter(|_| use_body))
                    .unwrap_or_else(|| fallback.to_string());
                Self::new(message)
            }
            AuthRejection::Transport(err) => {
                tracing::warn!(error = ?err, "auth backend unreachable");
                Self::new(fallback)
            }
        }
    }
}

/// Application service for account operations.
pub struct AuthService<G> {
    gateway: G,
}

impl<G: AuthGateway> AuthService<G> {
    /// Create a new service backed by the given gateway.
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    /// Log in with email and password.
    ///
    /// # Errors
    ///
    /// Returns the backend `detail`, `Login failed: Check your credentials`,
    /// or `Login failed: Invalid response` when no token came back.
    pub async fn login(&self, email: &str, password: &str) -> Result<SessionToken, AuthError> {
        match self.gateway.login(email, password).await {
            Ok(Some(token)) => {
                tracing::info!(email, "login succeeded");
                Ok(token)
            }
            Ok(None) => Err(AuthError::new("Login failed: Invalid response")),
            Err(rejection) => Err(AuthError::from_rejection(
                rejection,
                false,
                "Login failed: Check your credentials",
            )),
        }
    }

    /// Register a new account; on success an OTP is emailed.
    ///
    /// # Errors
    ///
    /// Returns `Passwords do not match` without calling the backend when the
    /// confirmation differs, otherwise the backend `detail`, its raw body, or
    /// `Registration failed.`.
    pub async fn register(
        &self,
        registration: &Registration,
    ) -> Result<PendingVerification, AuthError> {
        if !registration.passwords_match() {
            return Err(AuthError::new("Passwords do not match"));
        }
        let pending = self
            .gateway
            .register(
                &registration.username,
                &registration.email,
                &registration.password,
            )
            .await
            .map_err(|rejection| {
                AuthError::from_rejection(rejection, true, "Registration failed.")
            })?;
        tracing::info!(email = %pending.email, "registration pending verification");
        Ok(pending)
    }

    /// Confirm an account with the emailed OTP.
    ///
    /// # Errors
    ///
    /// Returns the backend `detail`, its raw body, or
    /// `OTP verification failed.`.
    pub async fn verify_otp(&self, email: &str, otp: &str) -> Result<(), AuthError> {
        self.gateway.verify_otp(email, otp).await.map_err(|rejection| {
            AuthError::from_rejection(rejection, true, "OTP verification failed.")
        })?;
        tracing::info!(email, "account verified");
        Ok(())
    }

    /// Exchange a Google sign-in credential for a pending account.
    ///
    /// # Errors
    ///
    /// Returns `Google sign-in failed.` for any backend failure.
    pub async fn google_sign_in(&self, credential: &str) -> Result<PendingVerification, AuthError> {
        match self.gateway.exchange_google_credential(credential).await {
            Ok(pending) => Ok(pending),
            Err(rejection) => {
                tracing::warn!(?rejection, "google credential exchange failed");
                Err(AuthError::new("Google sign-in failed."))
            }
        }
    }
}
