use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_API_BASE: &str = "https://yantra-game-server-79752798341.us-central1.run.app";

/// Configuration for the backend client, poller and sign-in flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Backend origin, without a trailing slash.
    pub api_base: String,
    /// Game-state polling interval in seconds.
    pub poll_interval_secs: u64,
    /// ID-token refresh interval in seconds. Tokens expire after an hour.
    pub token_refresh_secs: u64,
    /// Only emails ending in `@<domain>` may sign in.
    pub allowed_email_domain: String,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            poll_interval_secs: 3,
            token_refresh_secs: 50 * 60,
            allowed_email_domain: "vitstudent.ac.in".to_string(),
            request_timeout_secs: 10,
        }
    }
}

impl ApiConfig {
    /// Load from `LASTOS_API_CONFIG` (default `config/api.toml`), falling back
    /// to defaults. `LASTOS_API_URL` overrides the backend origin either way.
    pub fn load() -> Self {
        let path =
            std::env::var("LASTOS_API_CONFIG").unwrap_or_else(|_| "config/api.toml".to_string());
        let mut config = match std::fs::read_to_string(&path) {
            Ok(content) => match toml::from_str::<ApiConfig>(&content) {
                Ok(cfg) => cfg,
                Err(e) => {
                    tracing::warn!("Failed to parse {path}: {e}, using defaults");
                    ApiConfig::default()
                },
            },
            Err(_) => ApiConfig::default(),
        };
        if let Ok(url) = std::env::var("LASTOS_API_URL") {
            config.api_base = url;
        }
        config.api_base = config.api_base.trim_end_matches('/').to_string();
        config
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs.max(1))
    }

    pub fn token_refresh_interval(&self) -> Duration {
        Duration::from_secs(self.token_refresh_secs.max(1))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    /// Config pointing at `api_base` with every other field defaulted.
    pub fn with_base(api_base: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into(),
            ..Self::default()
        }
    }
}
