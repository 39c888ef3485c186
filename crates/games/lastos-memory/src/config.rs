use serde::{Deserialize, Serialize};

/// Data-driven configuration for the visual memory game.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryConfig {
    /// Round length in seconds. The countdown also runs while watching.
    pub duration_secs: u32,
    /// How long the targets are shown before input opens (ms).
    pub watch_ms: u64,
    /// Wrong clicks allowed per run.
    pub lives: u32,
    /// Grid side length at level 1.
    pub base_grid: u8,
    /// Largest grid side length.
    pub max_grid: u8,
    /// Levels per one-cell growth of the grid.
    pub levels_per_grid_step: u32,
    /// Targets at level 0; each level adds one.
    pub base_targets: u32,
    /// Display points per level reached.
    pub points_per_level: i64,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            duration_secs: 60,
            watch_ms: 2250,
            lives: 3,
            base_grid: 3,
            max_grid: 6,
            levels_per_grid_step: 3,
            base_targets: 2,
            points_per_level: 4,
        }
    }
}

impl MemoryConfig {
    /// Load config from a TOML file. Falls back to defaults if the file is missing
    /// or unparseable.
    pub fn load() -> Self {
        let path = std::env::var("LASTOS_MEMORY_CONFIG")
            .unwrap_or_else(|_| "config/memory.toml".to_string());
        match std::fs::read_to_string(&path) {
            Ok(content) => match toml::from_str::<MemoryConfig>(&content) {
                Ok(cfg) => cfg,
                Err(e) => {
                    tracing::warn!("Failed to parse {path}: {e}, using defaults");
                    MemoryConfig::default()
                },
            },
            Err(_) => MemoryConfig::default(),
        }
    }
}
