use serde::{Deserialize, Serialize};

/// Data-driven configuration for the typing test.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TypingConfig {
    /// Round length in seconds.
    pub duration_secs: u32,
    /// How long a pressed key stays lit on the on-screen keyboard (ms).
    pub key_highlight_ms: u64,
}

impl Default for TypingConfig {
    fn default() -> Self {
        Self {
            duration_secs: 60,
            key_highlight_ms: 200,
        }
    }
}

impl TypingConfig {
    /// Load config from a TOML file. Falls back to defaults if the file is missing
    /// or unparseable.
    pub fn load() -> Self {
        let path = std::env::var("LASTOS_TYPING_CONFIG")
            .unwrap_or_else(|_| "config/typing.toml".to_string());
        match std::fs::read_to_string(&path) {
            Ok(content) => match toml::from_str::<TypingConfig>(&content) {
                Ok(cfg) => cfg,
                Err(e) => {
                    tracing::warn!("Failed to parse {path}: {e}, using defaults");
                    TypingConfig::default()
                },
            },
            Err(_) => TypingConfig::default(),
        }
    }
}
