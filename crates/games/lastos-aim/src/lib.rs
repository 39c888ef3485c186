pub mod config;
pub mod hud;
pub mod scoring;

use std::time::Duration;

use lastos_core::game_registry::GameId;
use lastos_core::game_trait::{GameMetadata, InputOutcome, MiniGame, SessionConfig};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use config::AimConfig;

/// A grid cell, row-major from the top-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub row: u8,
    pub col: u8,
}

/// A shot fired by the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Shot {
    /// Click on a grid cell.
    Cell(Cell),
    /// Click on the background outside the grid.
    Background,
}

/// The aim trainer: shoot the glitch as it hops around a square grid.
pub struct AimTrainer {
    config: AimConfig,
    rng: StdRng,
    target: Cell,
    ammo: u32,
    shield: u32,
    shots: u32,
    hits: u32,
}

impl AimTrainer {
    pub fn new() -> Self {
        Self::with_config(AimConfig::load())
    }

    pub fn with_config(config: AimConfig) -> Self {
        Self::from_rng(config, StdRng::from_os_rng())
    }

    /// Deterministic target placement for tests and replays.
    pub fn with_seed(config: AimConfig, seed: u64) -> Self {
        Self::from_rng(config, StdRng::seed_from_u64(seed))
    }

    fn from_rng(config: AimConfig, mut rng: StdRng) -> Self {
        let target = random_cell(&mut rng, config.grid_size);
        Self {
            ammo: config.ammo,
            shield: config.shield,
            config,
            rng,
            target,
            shots: 0,
            hits: 0,
        }
    }

    pub fn config(&self) -> &AimConfig {
        &self.config
    }

    pub fn target(&self) -> Cell {
        self.target
    }

    pub fn ammo(&self) -> u32 {
        self.ammo
    }

    pub fn shield(&self) -> u32 {
        self.shield
    }

    /// Glitches eliminated this run.
    pub fn hits(&self) -> u32 {
        self.hits
    }

    /// Shots that counted toward the shield drain (hits and misses with ammo).
    pub fn shots(&self) -> u32 {
        self.shots
    }

    fn count_shot(&mut self) {
        self.shots += 1;
        let every = self.config.shield_drain_every;
        if every > 0 && self.shots % every == 0 {
            self.shield = self.shield.saturating_sub(self.config.shield_drain);
        }
    }
}

impl Default for AimTrainer {
    fn default() -> Self {
        Self::new()
    }
}

fn random_cell(rng: &mut StdRng, grid_size: u8) -> Cell {
    let n = grid_size.max(1);
    Cell {
        row: rng.random_range(0..n),
        col: rng.random_range(0..n),
    }
}

impl MiniGame for AimTrainer {
    type Input = Shot;

    fn metadata(&self) -> GameMetadata {
        GameMetadata {
            id: GameId::AimTrainer,
            name: "Aim Trainer".to_string(),
            description: "Eliminate glitches as they appear across the grid".to_string(),
            duration: Duration::from_secs(self.config.duration_secs as u64),
            has_watch_phase: false,
        }
    }

    fn session_config(&self) -> SessionConfig {
        SessionConfig::timed(self.config.duration_secs)
    }

    fn reset(&mut self) {
        self.ammo = self.config.ammo;
        self.shield = self.config.shield;
        self.shots = 0;
        self.hits = 0;
        self.target = random_cell(&mut self.rng, self.config.grid_size);
    }

    fn apply_input(&mut self, shot: Shot) -> InputOutcome {
        match shot {
            Shot::Cell(cell) if cell == self.target => {
                self.hits += 1;
                self.ammo = self.ammo.saturating_sub(1);
                self.count_shot();
                self.target = random_cell(&mut self.rng, self.config.grid_size);
                InputOutcome::Applied
            },
            // Anything but the target is a miss.
            _ => {
                if self.ammo == 0 {
                    return InputOutcome::Ignored;
                }
                self.ammo -= 1;
                self.count_shot();
                InputOutcome::Applied
            },
        }
    }

    fn raw_score(&self) -> i64 {
        self.hits as i64
    }

    fn display_score(&self) -> u8 {
        scoring::calc_score(self.hits, self.config.hits_for_max)
    }

    fn finish(&mut self, elapsed: Duration) {
        tracing::debug!(
            hits = self.hits,
            shots = self.shots,
            shield = self.shield,
            elapsed_ms = elapsed.as_millis() as u64,
            "aim trainer run finished"
        );
    }
}
