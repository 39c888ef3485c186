use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Collision rectangle centred on the character, in viewport-%.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hitbox {
    pub width: f32,
    pub height: f32,
}

impl Hitbox {
    pub fn half_extents(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// A static obstacle in viewport-% coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum Obstacle {
    /// Axis-aligned rectangle from (x1, y1) to (x2, y2).
    Rect { x1: f32, y1: f32, x2: f32, y2: f32 },
    /// Ellipse centred on (cx, cy) with radii (rx, ry).
    Ellipse { cx: f32, cy: f32, rx: f32, ry: f32 },
}

impl Obstacle {
    /// Whether a hitbox centred on `center` overlaps this obstacle.
    ///
    /// Rectangles use open-interval overlap, so touching edges do not collide.
    /// Ellipses grow each radius by the matching hitbox half-extent and test
    /// the normalised distance squared against 1.
    pub fn overlaps(&self, center: Vec2, hitbox: Hitbox) -> bool {
        let half = hitbox.half_extents();
        match *self {
            Obstacle::Rect { x1, y1, x2, y2 } => {
                center.x + half.x > x1
                    && center.x - half.x < x2
                    && center.y + half.y > y1
                    && center.y - half.y < y2
            },
            Obstacle::Ellipse { cx, cy, rx, ry } => {
                let ex = (center.x - cx) / (rx + half.x);
                let ey = (center.y - cy) / (ry + half.y);
                ex * ex + ey * ey < 1.0
            },
        }
    }
}

/// Static obstacle map the civilian walks around.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Arena {
    pub name: String,
    /// Starting position of the character centre.
    pub spawn: Vec2,
    pub obstacles: Vec<Obstacle>,
}

impl Arena {
    pub fn collides(&self, center: Vec2, hitbox: Hitbox) -> bool {
        self.obstacles.iter().any(|o| o.overlaps(center, hitbox))
    }

    /// Arena with no obstacles.
    pub fn open(spawn: Vec2) -> Self {
        Self {
            name: "open".to_string(),
            spawn,
            obstacles: Vec::new(),
        }
    }

    /// The control room: consoles, battery banks, pipes, and the central portal.
    pub fn control_room() -> Self {
        let rect = |x1, y1, x2, y2| Obstacle::Rect { x1, y1, x2, y2 };
        Self {
            name: "control-room".to_string(),
            // Just below the door, clear of the top wall and the portal.
            spawn: Vec2::new(50.0, 12.0),
            obstacles: vec![
                // Top wall / health bar
                rect(0.0, 0.0, 100.0, 8.0),
                // Upper-left console
                rect(0.0, 8.0, 35.0, 38.0),
                // Upper-right panels and pipes
                rect(62.0, 8.0, 100.0, 30.0),
                // Battery banks
                rect(7.0, 55.0, 26.0, 77.0),
                rect(78.0, 55.0, 97.0, 77.0),
                // Bottom pipes
                rect(0.0, 76.0, 8.0, 100.0),
                rect(68.0, 85.0, 100.0, 100.0),
                // Bottom edge
                rect(0.0, 97.0, 100.0, 100.0),
                Obstacle::Ellipse {
                    cx: 50.0,
                    cy: 50.0,
                    rx: 26.0,
                    ry: 32.0,
                },
            ],
        }
    }
}

/// Load an arena from a JSON file, returning `None` if the file is missing or invalid.
pub fn load_arena_from_file(path: &str) -> Option<Arena> {
    match std::fs::read_to_string(path) {
        Ok(content) => match serde_json::from_str::<Arena>(&content) {
            Ok(arena) => Some(arena),
            Err(e) => {
                tracing::warn!("Failed to parse {path}: {e}");
                None
            },
        },
        Err(_) => None,
    }
}

/// Load the arena named by `LASTOS_ARENA_FILE` (default
/// `config/arenas/control_room.json`), falling back to [`Arena::control_room`].
pub fn load_arena() -> Arena {
    let path = std::env::var("LASTOS_ARENA_FILE")
        .unwrap_or_else(|_| "config/arenas/control_room.json".to_string());
    load_arena_from_file(&path).unwrap_or_else(Arena::control_room)
}
