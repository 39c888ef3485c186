use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::arena::Hitbox;

/// Data-driven configuration for civilian movement.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    /// Distance moved per tick, in viewport-% (base speed 4 scaled by 0.15).
    pub speed: f32,
    /// Hitbox width in viewport-%.
    pub hitbox_width: f32,
    /// Hitbox height in viewport-%.
    pub hitbox_height: f32,
    /// Allowed x range for the character centre.
    pub min_x: f32,
    pub max_x: f32,
    /// Allowed y range for the character centre.
    pub min_y: f32,
    pub max_y: f32,
    /// Walk animation frame period (ms).
    pub walk_frame_ms: u64,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            speed: 4.0 * 0.15,
            hitbox_width: 3.0,
            hitbox_height: 4.0,
            min_x: 2.0,
            max_x: 98.0,
            min_y: 5.0,
            max_y: 98.0,
            walk_frame_ms: 200,
        }
    }
}

impl MovementConfig {
    /// Load config from a TOML file. Falls back to defaults if the file is missing,
    /// unparseable, or has unusable clamp bounds.
    pub fn load() -> Self {
        let path = std::env::var("LASTOS_CIVILIAN_CONFIG")
            .unwrap_or_else(|_| "config/civilian.toml".to_string());
        match std::fs::read_to_string(&path) {
            Ok(content) => Self::from_toml(&path, &content),
            Err(_) => MovementConfig::default(),
        }
    }

    fn from_toml(path: &str, content: &str) -> Self {
        match toml::from_str::<MovementConfig>(content) {
            Ok(cfg) if cfg.bounds_are_valid() => cfg,
            Ok(_) => {
                tracing::warn!("Invalid clamp bounds in {path}, using defaults");
                MovementConfig::default()
            },
            Err(e) => {
                tracing::warn!("Failed to parse {path}: {e}, using defaults");
                MovementConfig::default()
            },
        }
    }

    /// Finite bounds with `min <= max` on both axes.
    pub fn bounds_are_valid(&self) -> bool {
        [self.min_x, self.max_x, self.min_y, self.max_y]
            .iter()
            .all(|v| v.is_finite())
            && self.min_x <= self.max_x
            && self.min_y <= self.max_y
    }

    pub fn hitbox(&self) -> Hitbox {
        Hitbox {
            width: self.hitbox_width,
            height: self.hitbox_height,
        }
    }

    /// Keep the sprite's visual footprint inside the viewport.
    ///
    /// Never panics: with inverted bounds the upper bound wins.
    pub fn clamp(&self, p: Vec2) -> Vec2 {
        Vec2::new(
            p.x.max(self.min_x).min(self.max_x),
            p.y.max(self.min_y).min(self.max_y),
        )
    }
}
