//! Identity provider bootstrap: one-time registration of the sign-in widget.

use std::sync::{Mutex, OnceLock, PoisonError};

/// Configuration of the identity provider's sign-in control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignInWidget {
    /// OAuth client id issued by the identity provider.
    pub client_id: String,
    /// Local route the provider posts the credential to.
    pub login_uri: String,
}

type RegisterFn = Box<dyn FnOnce(&SignInWidget) + Send>;

/// Registers the sign-in widget with the identity provider at most once.
///
/// The first [`activate`](Self::activate) builds the widget and runs the
/// registration callback; later calls return the same widget without
/// re-registering.
pub struct IdentityBootstrap {
    client_id: Option<String>,
    login_uri: String,
    on_register: Mutex<Option<RegisterFn>>,
    widget: OnceLock<Option<SignInWidget>>,
}

impl IdentityBootstrap {
    /// Create a bootstrap. With no `client_id` the provider is disabled and
    /// the callback never runs.
    pub fn new(
        client_id: Option<String>,
        login_uri: impl Into<String>,
        on_register: impl FnOnce(&SignInWidget) + Send + 'static,
    ) -> Self {
        Self {
            client_id: client_id.filter(|id| !id.is_empty()),
            login_uri: login_uri.into(),
            on_register: Mutex::new(Some(Box::new(on_register))),
            widget: OnceLock::new(),
        }
    }

    /// A bootstrap with no identity provider configured.
    #[must_use]
    pub fn disabled() -> Self {
        Self::new(None, String::new(), |_| {})
    }

    /// Activate the sign-in widget, registering it on first use.
    pub fn activate(&self) -> Option<&SignInWidget> {
        self.widget
            .get_or_init(|| {
                let widget = SignInWidget {
                    client_id: self.client_id.clone()?,
                    login_uri: self.login_uri.clone(),
                };
                let callback = self
                    .on_register
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .take();
                if let Some(callback) = callback {
                    callback(&widget);
                }
                tracing::info!(login_uri = %widget.login_uri, "identity provider registered");
                Some(widget)
            })
            .as_ref()
    }
}
