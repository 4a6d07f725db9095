use serde::{Deserialize, Serialize};
use tokio::sync::watch;

/// Authentication status reported by the identity collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthStatus {
    pub is_authenticated: bool,
    pub is_loading: bool,
}

impl AuthStatus {
    pub fn loading() -> Self {
        Self {
            is_authenticated: false,
            is_loading: true,
        }
    }

    pub fn guest() -> Self {
        Self {
            is_authenticated: false,
            is_loading: false,
        }
    }

    pub fn authenticated() -> Self {
        Self {
            is_authenticated: true,
            is_loading: false,
        }
    }

    /// Resolved and not signed in
    pub fn is_guest(&self) -> bool {
        !self.is_loading && !self.is_authenticated
    }

    /// Resolved and signed in
    pub fn is_member(&self) -> bool {
        !self.is_loading && self.is_authenticated
    }

    pub fn label(&self) -> &'static str {
        if self.is_loading {
            "loading"
        } else if self.is_authenticated {
            "member"
        } else {
            "guest"
        }
    }
}

/// An unresolved status is a loading status
impl Default for AuthStatus {
    fn default() -> Self {
        Self::loading()
    }
}

impl std::str::FromStr for AuthStatus {
    type Err = crate::error::GateError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "loading" => Ok(Self::loading()),
            "guest" | "anonymous" => Ok(Self::guest()),
            "member" | "authenticated" => Ok(Self::authenticated()),
            other => Err(crate::error::GateError::InvalidAuthState(other.to_string())),
        }
    }
}

/// Read-only, always-current view of the authentication status
#[derive(Debug, Clone)]
pub struct AuthView {
    rx: watch::Receiver<AuthStatus>,
}

impl AuthView {
    pub fn current(&self) -> AuthStatus {
        *self.rx.borrow()
    }

    /// Wait for the next status change. Returns the new status, or `None`
    /// once the identity provider has been dropped.
    pub async fn changed(&mut self) -> Option<AuthStatus> {
        self.rx.changed().await.ok()?;
        Some(*self.rx.borrow_and_update())
    }

    /// A view pinned to a single status, for callers without a provider
    pub fn fixed(status: AuthStatus) -> Self {
        let (_tx, rx) = watch::channel(status);
        Self { rx }
    }
}

/// Owning side of the authentication status
#[derive(Debug)]
pub struct IdentityProvider {
    tx: watch::Sender<AuthStatus>,
}

impl IdentityProvider {
    /// Create a provider that starts in the loading state
    pub fn new() -> Self {
        Self::with_status(AuthStatus::loading())
    }

    pub fn with_status(status: AuthStatus) -> Self {
        let (tx, _rx) = watch::channel(status);
        Self { tx }
    }

    pub fn view(&self) -> AuthView {
        AuthView {
            rx: self.tx.subscribe(),
        }
    }

    pub fn status(&self) -> AuthStatus {
        *self.tx.borrow()
    }

    /// Publish a new status; views only wake when it actually changed
    pub fn set(&self, status: AuthStatus) {
        let changed = self.tx.send_if_modified(|current| {
            if *current == status {
                false
            } else {
                *current = status;
                true
            }
        });
        if changed {
            tracing::debug!(status = status.label(), "auth status changed");
        }
    }
}

impl Default for IdentityProvider {
    fn default() -> Self {
        Self::new()
    }
}

/// Starts the external sign-in flow. The gate never authenticates itself.
pub trait SignIn: Send + Sync {
    fn begin_sign_in(&self);
}

impl<F> SignIn for F
where
    F: Fn() + Send + Sync,
{
    fn begin_sign_in(&self) {
        self()
    }
}
