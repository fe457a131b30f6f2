//! Auth gateway port: the first-party account backend.

use std::future::Future;

use eventscout_domain::auth::{PendingVerification, SessionToken};
use eventscout_domain::error::ScoutError;

/// Why the auth backend did not accept a request.
#[derive(Debug)]
pub enum AuthRejection {
    /// The backend answered with an error status.
    Rejected {
        /// The `detail` field of the error body, when present.
        detail: Option<String>,
        /// The raw error body, when it was JSON.
        body: Option<String>,
    },
    /// The backend could not be reached or answered with garbage.
    Transport(ScoutError),
}

/// One-shot account operations against the auth backend.
pub trait AuthGateway {
    /// Exchange credentials for a session token.
    ///
    /// `Ok(None)` means the backend answered successfully but sent no token.
    fn login(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<Option<SessionToken>, AuthRejection>> + Send;

    /// Create an account; the backend emails a one-time password.
    fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<PendingVerification, AuthRejection>> + Send;

    /// Confirm an account with its one-time password.
    fn verify_otp(
        &self,
        email: &str,
        otp: &str,
    ) -> impl Future<Output = Result<(), AuthRejection>> + Send;

    /// Exchange an identity provider credential for a pending account.
    fn exchange_google_credential(
        &self,
        credential: &str,
    ) -> impl Future<Output = Result<PendingVerification, AuthRejection>> + Send;
}
