pub mod config;
pub mod grid;
pub mod scoring;

use std::collections::BTreeSet;
use std::time::Duration;

use lastos_core::game_registry::GameId;
use lastos_core::game_trait::{GameMetadata, InputOutcome, MiniGame, SessionConfig};
use rand::SeedableRng;
use rand::rngs::StdRng;

use config::MemoryConfig;
use grid::{Cell, LevelLayout, TileState};

/// Visual memory: memorise the highlighted tiles, then click them back.
pub struct VisualMemory {
    config: MemoryConfig,
    rng: StdRng,
    level: u32,
    lives: u32,
    layout: LevelLayout,
    targets: BTreeSet<Cell>,
    revealed: BTreeSet<Cell>,
    wrong: BTreeSet<Cell>,
    /// Correct reveals across every level of the run.
    total_revealed: u32,
}

impl VisualMemory {
    pub fn new() -> Self {
        Self::with_config(MemoryConfig::load())
    }

    pub fn with_config(config: MemoryConfig) -> Self {
        Self::from_rng(config, StdRng::from_os_rng())
    }

    pub fn with_seed(config: MemoryConfig, seed: u64) -> Self {
        Self::from_rng(config, StdRng::seed_from_u64(seed))
    }

    fn from_rng(config: MemoryConfig, rng: StdRng) -> Self {
        let mut game = Self {
            lives: config.lives,
            layout: grid::level_layout(1, &config),
            config,
            rng,
            level: 1,
            targets: BTreeSet::new(),
            revealed: BTreeSet::new(),
            wrong: BTreeSet::new(),
            total_revealed: 0,
        };
        game.generate_level(1);
        game
    }

    fn generate_level(&mut self, level: u32) {
        self.level = level;
        self.layout = grid::level_layout(level, &self.config);
        self.targets = grid::generate_targets(&mut self.rng, self.layout);
        self.revealed.clear();
        self.wrong.clear();
    }

    pub fn config(&self) -> &MemoryConfig {
        &self.config
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn grid_size(&self) -> u8 {
        self.layout.grid_size
    }

    pub fn targets(&self) -> &BTreeSet<Cell> {
        &self.targets
    }

    /// First target not yet revealed on the current level.
    pub fn next_hidden_target(&self) -> Option<Cell> {
        self.targets.difference(&self.revealed).next().copied()
    }

    /// First non-target cell that has not been clicked yet.
    pub fn next_untouched_blank(&self) -> Option<Cell> {
        let n = self.layout.grid_size;
        (0..n)
            .flat_map(|row| (0..n).map(move |col| Cell { row, col }))
            .find(|c| !self.targets.contains(c) && !self.wrong.contains(c))
    }

    /// Render state of a tile. Targets show only while `watching`.
    pub fn tile_state(&self, cell: Cell, watching: bool) -> TileState {
        if watching && self.targets.contains(&cell) {
            TileState::Target
        } else if self.revealed.contains(&cell) {
            TileState::Correct
        } else if self.wrong.contains(&cell) {
            TileState::Wrong
        } else {
            TileState::Default
        }
    }

    /// Whether clicking `cell` would have any effect while playing.
    pub fn is_clickable(&self, cell: Cell) -> bool {
        cell.row < self.layout.grid_size
            && cell.col < self.layout.grid_size
            && !self.revealed.contains(&cell)
            && !self.wrong.contains(&cell)
    }
}

impl Default for VisualMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl MiniGame for VisualMemory {
    type Input = Cell;

    fn metadata(&self) -> GameMetadata {
        GameMetadata {
            id: GameId::VisualMemory,
            name: "Visual Memory".to_string(),
            description: "Memorise the highlighted tiles and click them back".to_string(),
            duration: Duration::from_secs(self.config.duration_secs as u64),
            has_watch_phase: true,
        }
    }

    fn session_config(&self) -> SessionConfig {
        SessionConfig::timed(self.config.duration_secs).with_watch(self.config.watch_ms)
    }

    fn reset(&mut self) {
        self.lives = self.config.lives;
        self.total_revealed = 0;
        self.generate_level(1);
    }

    fn apply_input(&mut self, cell: Cell) -> InputOutcome {
        if !self.is_clickable(cell) {
            return InputOutcome::Ignored;
        }

        if self.targets.contains(&cell) {
            self.revealed.insert(cell);
            self.total_revealed += 1;
            if self.revealed.len() == self.targets.len() {
                let next = self.level + 1;
                self.generate_level(next);
                tracing::debug!(level = next, lives = self.lives, "visual memory level up");
                return InputOutcome::Advanced;
            }
            InputOutcome::Applied
        } else {
            self.wrong.insert(cell);
            self.lives = self.lives.saturating_sub(1);
            if self.lives == 0 {
                InputOutcome::Failed
            } else {
                InputOutcome::Applied
            }
        }
    }

    /// Correct reveals across the run. The level, and so the display score,
    /// never decreases as this grows.
    fn raw_score(&self) -> i64 {
        self.total_revealed as i64
    }

    fn display_score(&self) -> u8 {
        scoring::calc_score(self.level, self.config.points_per_level)
    }
}
