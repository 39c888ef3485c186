use glam::Vec2;
use lastos_core::input::MoveInput;
use serde::{Deserialize, Serialize};

use crate::arena::Arena;
use crate::config::MovementConfig;

/// Horizontal direction the sprite faces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

/// Per-tick state of the civilian character.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CivilianState {
    /// Hitbox centre in viewport-%.
    pub position: Vec2,
    pub facing: Facing,
    /// Whether any movement key was held this tick.
    pub moving: bool,
}

impl CivilianState {
    pub fn new(spawn: Vec2) -> Self {
        Self {
            position: spawn,
            facing: Facing::Right,
            moving: false,
        }
    }
}

/// Advance one simulation tick.
///
/// Pure: the next state depends only on the previous state, the input
/// snapshot, the arena and the tuning. Facing follows the horizontal input
/// even when the move itself is blocked.
pub fn step(
    prev: &CivilianState,
    input: MoveInput,
    arena: &Arena,
    config: &MovementConfig,
) -> CivilianState {
    let (dx, dy) = input.axis();
    if dx == 0 && dy == 0 {
        return CivilianState {
            moving: false,
            ..*prev
        };
    }

    let facing = match dx.signum() {
        -1 => Facing::Left,
        1 => Facing::Right,
        _ => prev.facing,
    };

    let delta = Vec2::new(dx as f32, dy as f32).normalize() * config.speed;
    CivilianState {
        position: resolve(prev.position, delta, arena, config),
        facing,
        moving: true,
    }
}

/// Axis-separated sliding resolution of a single displacement.
///
/// Tries the full (clamped) move, then the X component alone, then the Y
/// component alone, and stays put if all three collide. Concave corners can
/// catch the character when both single-axis slides are blocked.
pub fn resolve(from: Vec2, delta: Vec2, arena: &Arena, config: &MovementConfig) -> Vec2 {
    let hitbox = config.hitbox();
    let candidate = config.clamp(from + delta);

    [
        candidate,
        Vec2::new(candidate.x, from.y),
        Vec2::new(from.x, candidate.y),
    ]
    .into_iter()
    .find(|p| !arena.collides(*p, hitbox))
    .unwrap_or(from)
}
