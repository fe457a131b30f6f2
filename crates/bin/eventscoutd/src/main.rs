//! # eventscoutd: eventscout daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Parse configuration (config file, env vars)
//! - Initialise logging
//! - Construct the Eventbrite client and the auth backend gateway over one
//!   shared HTTP connection pool
//! - Construct application services, injecting adapters via port traits
//! - Build the axum router, injecting application services
//! - Bind to a TCP port and serve
//! - Handle graceful shutdown (SIGTERM/SIGINT)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer: no domain logic belongs here.

mod config;

use anyhow::Context;
use tokio::net::TcpListener;
use tokio::signal;
use tracing_subscriber::EnvFilter;

use eventscout_adapter_auth_http::HttpAuthGateway;
use eventscout_adapter_eventbrite::EventbriteClient;
use eventscout_adapter_http_axum::router;
use eventscout_adapter_http_axum::state::AppState;
use eventscout_app::services::auth_service::AuthService;
use eventscout_app::services::discovery_service::DiscoveryService;
use eventscout_app::services::identity_bootstrap::IdentityBootstrap;

use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&config.logging.filter).context("invalid log filter")?,
        )
        .init();

    let bind_addr = config.bind_addr();
    if config.eventbrite.api_token.is_empty() {
        tracing::warn!("no Eventbrite API token configured, searches will fail upstream");
    }

    // Outbound HTTP
    let http = reqwest::Client::builder()
        .user_agent(concat!("eventscoutd/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("failed to build HTTP client")?;
    let events = EventbriteClient::new(http.clone(), config.eventbrite);
    let gateway = HttpAuthGateway::new(http, config.backend);

    // Services
    let identity = IdentityBootstrap::new(
        config.google.client_id,
        config.google.login_uri,
        |widget| {
            let problems = crate::config::sign_in_widget_problems(widget);
            if problems.is_empty() {
                tracing::info!(client_id = %widget.client_id, "google sign-in enabled");
            }
            for problem in problems {
                tracing::warn!(%problem, "google sign-in is misconfigured");
            }
        },
    );
    let state = AppState::new(
        DiscoveryService::new(events),
        AuthService::new(gateway),
        identity,
    );
    let app = router::build(state);

    // HTTP
    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;
    tracing::info!(%bind_addr, "eventscoutd listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("eventscoutd stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => tracing::info!("received Ctrl+C, shutting down"),
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for Ctrl+C");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                tracing::info!("received terminate signal, shutting down");
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
