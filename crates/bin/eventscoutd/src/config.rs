//! Configuration loading: TOML file with environment variable overrides.
//!
//! Looks for `eventscout.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use serde::Deserialize;

use eventscout_adapter_auth_http::AuthBackendConfig;
use eventscout_adapter_eventbrite::EventbriteConfig;
use eventscout_app::services::identity_bootstrap::SignInWidget;

/// Every Google OAuth web client id ends with this.
const GOOGLE_CLIENT_ID_SUFFIX: &str = ".apps.googleusercontent.com";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Eventbrite API settings.
    pub eventbrite: EventbriteConfig,
    /// Auth backend settings.
    pub backend: AuthBackendConfig,
    /// Google sign-in settings.
    pub google: GoogleConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
}

/// Google Identity Services configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct GoogleConfig {
    /// OAuth client id; Google sign-in is off when unset or empty.
    pub client_id: Option<String>,
    /// Where the widget posts the credential.
    pub login_uri: String,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from `eventscout.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("eventscout.toml")?;
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    /// Apply overrides read through `var` (the process environment in
    /// production).
    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("EVENTSCOUT_HOST") {
            self.server.host = val;
        }
        if let Some(port) = var("EVENTSCOUT_PORT").and_then(|val| val.parse().ok()) {
            self.server.port = port;
        }
        if let Some(val) = var("EVENTSCOUT_BIND")
            && let Some((host, port)) = val.rsplit_once(':')
        {
            self.server.host = host.to_string();
            if let Ok(port) = port.parse() {
                self.server.port = port;
            }
        }
        if let Some(val) = var("EVENTBRITE_API_URL") {
            self.eventbrite.base_url = val;
        }
        if let Some(val) = var("EVENTBRITE_API_TOKEN") {
            self.eventbrite.api_token = val;
        }
        if let Some(val) = var("EVENTSCOUT_BACKEND_URL") {
            self.backend.base_url = val;
        }
        if let Some(val) = var("GOOGLE_CLIENT_ID") {
            self.google.client_id = Some(val);
        }
        if let Some(val) = var("EVENTSCOUT_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        if self.eventbrite.base_url.trim().is_empty() {
            return Err(ConfigError::Validation(
                "eventbrite.base_url must not be empty".to_string(),
            ));
        }
        if self.backend.base_url.trim().is_empty() {
            return Err(ConfigError::Validation(
                "backend.base_url must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for GoogleConfig {
    fn default() -> Self {
        Self {
            client_id: None,
            login_uri: "/register/google".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "eventscoutd=info,eventscout=info,tower_http=debug".to_string(),
        }
    }
}

/// Settings of the Google sign-in widget that Google would reject once the
/// button loads in a browser. Empty when the widget looks usable.
///
/// Google only posts credentials over HTTPS, except to `localhost`.
#[must_use]
pub fn sign_in_widget_problems(widget: &SignInWidget) -> Vec<String> {
    let mut problems = Vec::new();
    if !widget.client_id.ends_with(GOOGLE_CLIENT_ID_SUFFIX) {
        problems.push(format!(
            "client id {} does not end with {GOOGLE_CLIENT_ID_SUFFIX}",
            widget.client_id
        ));
    }
    let uri = widget.login_uri.as_str();
    if let Some(rest) = uri.strip_prefix("http://") {
        let host = rest.split(['/', ':']).next().unwrap_or_default();
        if host != "localhost" && host != "127.0.0.1" {
            problems.push(format!("login_uri {uri} must use https"));
        }
    } else if !uri.starts_with('/') && !uri.starts_with("https://") {
        problems.push(format!(
            "login_uri {uri:?} must be an absolute path or an https URL"
        ));
    }
    problems
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
