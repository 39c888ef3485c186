use std::collections::BTreeSet;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::MemoryConfig;

/// A tile position, row-major from the top-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub row: u8,
    pub col: u8,
}

/// How a tile should be rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TileState {
    Default,
    /// Shown only during the watch phase.
    Target,
    Correct,
    Wrong,
}

/// Grid size and target count for a level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelLayout {
    pub grid_size: u8,
    pub targets: usize,
}

/// The grid grows by one every `levels_per_grid_step` levels up to
/// `max_grid`; the target count grows by one per level but always leaves
/// at least one non-target tile.
pub fn level_layout(level: u32, config: &MemoryConfig) -> LevelLayout {
    let step = config.levels_per_grid_step.max(1);
    let grow = (level / step).min(u8::MAX as u32) as u8;
    let grid_size = config
        .base_grid
        .saturating_add(grow)
        .min(config.max_grid)
        .max(2);
    let cells = grid_size as usize * grid_size as usize;
    let targets = (config.base_targets as usize + level as usize).min(cells - 1);
    LevelLayout { grid_size, targets }
}

/// Pick `layout.targets` distinct cells uniformly at random.
pub fn generate_targets(rng: &mut impl Rng, layout: LevelLayout) -> BTreeSet<Cell> {
    let mut targets = BTreeSet::new();
    while targets.len() < layout.targets {
        targets.insert(Cell {
            row: rng.random_range(0..layout.grid_size),
            col: rng.random_range(0..layout.grid_size),
        });
    }
    targets
}
