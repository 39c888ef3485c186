use serde::{Deserialize, Serialize};

/// Data-driven configuration for the inventory word-recall game.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InventoryConfig {
    /// Round length in seconds.
    pub duration_secs: u32,
    /// Wrong answers allowed per run.
    pub lives: u32,
    /// Probability of showing an already-seen word once one exists.
    pub seen_chance: f64,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            duration_secs: 60,
            lives: 3,
            seen_chance: 0.4,
        }
    }
}

impl InventoryConfig {
    /// Load config from a TOML file. Falls back to defaults if the file is missing
    /// or unparseable, and to the default `seen_chance` if that is not finite.
    pub fn load() -> Self {
        let path = std::env::var("LASTOS_INVENTORY_CONFIG")
            .unwrap_or_else(|_| "config/inventory.toml".to_string());
        match std::fs::read_to_string(&path) {
            Ok(content) => Self::from_toml(&path, &content),
            Err(_) => InventoryConfig::default(),
        }
    }

    fn from_toml(path: &str, content: &str) -> Self {
        match toml::from_str::<InventoryConfig>(content) {
            Ok(mut cfg) => {
                if !cfg.seen_chance.is_finite() {
                    tracing::warn!("Invalid seen_chance in {path}, using default");
                    cfg.seen_chance = InventoryConfig::default().seen_chance;
                }
                cfg
            },
            Err(e) => {
                tracing::warn!("Failed to parse {path}: {e}, using defaults");
                InventoryConfig::default()
            },
        }
    }

    /// Repeat probability in [0, 1]; a non-finite value means the default.
    pub fn seen_probability(&self) -> f64 {
        if self.seen_chance.is_finite() {
            self.seen_chance.clamp(0.0, 1.0)
        } else {
            InventoryConfig::default().seen_chance
        }
    }
}
