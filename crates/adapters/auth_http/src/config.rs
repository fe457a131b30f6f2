//! Auth backend configuration.

use serde::Deserialize;

/// Location of the first-party auth backend.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuthBackendConfig {
    /// Backend root URL; routes live under `/api/auth/`.
    pub base_url: String,
}

impl Default for AuthBackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
        }
    }
}

impl AuthBackendConfig {
    /// URL of the auth route `name` (e.g. `login` → `/api/auth/login/`).
    #[must_use]
    pub fn endpoint(&self, name: &str) -> String {
        format!("{}/api/auth/{name}/", self.base_url.trim_end_matches('/'))
    }
}
