use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use lastos_core::context::SessionContext;

use crate::config::ApiConfig;
use crate::error::AuthError;

const DEFAULT_PLAYER_NAME: &str = "Player";

/// The signed-in account as reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityUser {
    pub uid: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
}

// Port for the third-party identity provider (popup sign-in, ID tokens).
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn sign_in_popup(&self) -> Result<IdentityUser, AuthError>;
    /// The current user's ID token, minted anew when `force_refresh` is set.
    async fn id_token(&self, force_refresh: bool) -> Result<String, AuthError>;
    fn current_user(&self) -> Option<IdentityUser>;
    async fn sign_out(&self) -> Result<(), AuthError>;
}

/// Sign-in flow restricted to one email domain, caching the ID token and
/// display name in the session context.
pub struct Authenticator {
    provider: Arc<dyn IdentityProvider>,
    context: SessionContext,
    allowed_domain: String,
}

impl Authenticator {
    pub fn new(
        provider: Arc<dyn IdentityProvider>,
        context: SessionContext,
        config: &ApiConfig,
    ) -> Self {
        Self {
            provider,
            context,
            allowed_domain: config.allowed_email_domain.clone(),
        }
    }

    pub fn context(&self) -> &SessionContext {
        &self.context
    }

    /// Whether `email` belongs to the allowed domain.
    pub fn is_allowed(&self, email: &str) -> bool {
        email.ends_with(&format!("@{}", self.allowed_domain))
    }

    /// Popup sign-in. An account outside the allowed domain is signed out
    /// again, its token dropped, and the call fails.
    pub async fn sign_in(&self) -> Result<IdentityUser, AuthError> {
        let user = self.provider.sign_in_popup().await?;
        let email = user.email.clone().unwrap_or_default();
        if !self.is_allowed(&email) {
            tracing::warn!(email, domain = %self.allowed_domain, "Sign-in outside allowed domain");
            if let Err(e) = self.provider.sign_out().await {
                tracing::warn!(error = %e, "Sign-out after rejected sign-in failed");
            }
            self.context.clear_token()?;
            return Err(AuthError::DomainRestricted {
                email,
                domain: self.allowed_domain.clone(),
            });
        }

        let token = self.provider.id_token(false).await?;
        let name = user
            .display_name
            .as_deref()
            .unwrap_or(DEFAULT_PLAYER_NAME);
        self.context.set_auth(&token, name)?;
        tracing::info!(uid = %user.uid, "Signed in");
        Ok(user)
    }

    /// Sign out and clear every cached identifier. The context is cleared
    /// even when the provider call fails.
    pub async fn sign_out(&self) -> Result<(), AuthError> {
        let provider_result = self.provider.sign_out().await;
        self.context.clear()?;
        tracing::info!("Signed out");
        provider_result
    }

    /// Force a fresh ID token for the current user and cache it.
    /// `None` when nobody is signed in.
    pub async fn refresh_token(&self) -> Result<Option<String>, AuthError> {
        if self.provider.current_user().is_none() {
            return Ok(None);
        }
        let token = self.provider.id_token(true).await?;
        self.context.set_token(&token)?;
        tracing::debug!("ID token refreshed");
        Ok(Some(token))
    }

    /// Refresh the token every `every`, starting one period from now.
    pub fn spawn_token_refresh(self: Arc<Self>, every: Duration) -> TokenRefreshHandle {
        let task = tokio::spawn(async move {
            let start = tokio::time::Instant::now() + every;
            let mut ticker = tokio::time::interval_at(start, every);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if let Err(e) = self.refresh_token().await {
                    tracing::warn!(error = %e, "Token refresh failed");
                }
            }
        });
        TokenRefreshHandle { task }
    }
}

/// Running token-refresh task; aborted on drop.
pub struct TokenRefreshHandle {
    task: JoinHandle<()>,
}

impl TokenRefreshHandle {
    pub fn stop(&self) {
        self.task.abort();
    }
}

impl Drop for TokenRefreshHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
