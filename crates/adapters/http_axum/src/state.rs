//! Shared application state for axum handlers.

use std::sync::Arc;

use eventscout_app::ports::{AuthGateway, EventQuery};
use eventscout_app::services::auth_service::AuthService;
use eventscout_app::services::discovery_service::DiscoveryService;
use eventscout_app::services::identity_bootstrap::IdentityBootstrap;

/// Application state shared across all axum handlers.
///
/// Generic over the event query port and the auth gateway to avoid dynamic
/// dispatch. `Clone` is implemented manually so only the `Arc` wrappers are
/// cloned.
pub struct AppState<Q, G> {
    /// Discovery feed service.
    pub discovery: Arc<DiscoveryService<Q>>,
    /// Login / registration service.
    pub auth: Arc<AuthService<G>>,
    /// Google sign-in widget registration.
    pub identity: Arc<IdentityBootstrap>,
}

impl<Q, G> Clone for AppState<Q, G> {
    fn clone(&self) -> Self {
        Self {
            discovery: Arc::clone(&self.discovery),
            auth: Arc::clone(&self.auth),
            identity: Arc::clone(&self.identity),
        }
    }
}

impl<Q, G> AppState<Q, G>
where
    Q: EventQuery + Send + Sync + 'static,
    G: AuthGateway + Send + Sync + 'static,
{
    /// Create a new application state from service instances.
    pub fn new(
        discovery: DiscoveryService<Q>,
        auth: AuthService<G>,
        identity: IdentityBootstrap,
    ) -> Self {
        Self {
            discovery: Arc::new(discovery),
            auth: Arc::new(auth),
            identity: Arc::new(identity),
        }
    }
}
