use serde::{Deserialize, Serialize};

/// Data-driven configuration for the aim trainer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AimConfig {
    /// Round length in seconds.
    pub duration_secs: u32,
    /// Side length of the square target grid.
    pub grid_size: u8,
    /// Ammo at the start of a run.
    pub ammo: u32,
    /// Shield at the start of a run.
    pub shield: u32,
    /// Every n-th shot (hit or miss) drains the shield.
    pub shield_drain_every: u32,
    /// Shield lost on each drain.
    pub shield_drain: u32,
    /// Hits needed for the maximum display score.
    pub hits_for_max: u32,
}

impl Default for AimConfig {
    fn default() -> Self {
        Self {
            duration_secs: 45,
            grid_size: 5,
            ammo: 1000,
            shield: 200,
            shield_drain_every: 13,
            shield_drain: 10,
            hits_for_max: 60,
        }
    }
}

impl AimConfig {
    /// Load config from a TOML file. Falls back to defaults if the file is missing
    /// or unparseable.
    pub fn load() -> Self {
        let path =
            std::env::var("LASTOS_AIM_CONFIG").unwrap_or_else(|_| "config/aim.toml".to_string());
        match std::fs::read_to_string(&path) {
            Ok(content) => match toml::from_str::<AimConfig>(&content) {
                Ok(cfg) => cfg,
                Err(e) => {
                    tracing::warn!("Failed to parse {path}: {e}, using defaults");
                    AimConfig::default()
                },
            },
            Err(_) => AimConfig::default(),
        }
    }
}
