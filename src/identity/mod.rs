//! Identity collaborators backed by the platform API.
//!
//! The gate only ever sees an [`AuthView`](crate::auth::AuthView). These types
//! sit on the owning side: they resolve the status over HTTP and publish it
//! through an [`IdentityProvider`], and they start the login flow.

use async_trait::async_trait;
use serde_json::Value;
use url::Url;

use crate::api::ApiClient;
use crate::auth::{AuthStatus, IdentityProvider, SignIn};
use crate::config::IdentityConfig;
use crate::error::GateResult;

/// Anything able to resolve the current authentication status
#[async_trait]
pub trait IdentitySource: Send + Sync {
    async fn resolve(&self) -> AuthStatus;
}

/// Resolves the status from `GET {base}{user_path}`
#[derive(Debug, Clone)]
pub struct HttpIdentity {
    client: ApiClient,
    user_path: String,
}

impl HttpIdentity {
    pub fn new(client: ApiClient, user_path: impl Into<String>) -> Self {
        Self {
            client,
            user_path: user_path.into(),
        }
    }

    pub fn from_config(config: &IdentityConfig) -> GateResult<Self> {
        let base = Url::parse(&config.base_url)?;
        Ok(Self::new(ApiClient::new(base), config.user_path.clone()))
    }
}

#[async_trait]
impl IdentitySource for HttpIdentity {
    async fn resolve(&self) -> AuthStatus {
        match self.client.get_json::<Value>(&self.user_path).await {
            Ok(Value::Null) => AuthStatus::guest(),
            Ok(_) => AuthStatus::authenticated(),
            Err(e) if e.is_unauthorized() => {
                tracing::debug!("identity lookup: not signed in");
                AuthStatus::guest()
            }
            Err(e) => {
                tracing::warn!(error = %e, "identity lookup failed, treating visitor as guest");
                AuthStatus::guest()
            }
        }
    }
}

/// Resolve the status once and publish it
pub async fn refresh(provider: &IdentityProvider, source: &dyn IdentitySource) -> AuthStatus {
    let status = source.resolve().await;
    provider.set(status);
    status
}

type Navigator = Box<dyn Fn(&Url) + Send + Sync>;

/// Sign-in that navigates the host surface to the platform login route
pub struct LoginRedirect {
    login_url: Url,
    navigate: Navigator,
}

impl LoginRedirect {
    pub fn new(login_url: Url, navigate: impl Fn(&Url) + Send + Sync + 'static) -> Self {
        Self {
            login_url,
            navigate: Box::new(navigate),
        }
    }

    pub fn from_config(
        config: &IdentityConfig,
        navigate: impl Fn(&Url) + Send + Sync + 'static,
    ) -> GateResult<Self> {
        let login_url = Url::parse(&config.base_url)?.join(&config.login_path)?;
        Ok(Self::new(login_url, navigate))
    }

    pub fn login_url(&self) -> &Url {
        &self.login_url
    }
}

impl SignIn for LoginRedirect {
    fn begin_sign_in(&self) {
        tracing::info!(url = %self.login_url, "starting sign-in");
        (self.navigate)(&self.login_url);
    }
}

impl std::fmt::Debug for LoginRedirect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRedirect")
            .field("login_url", &self.login_url.as_str())
            .finish()
    }
}
