use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier for each mini-game in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameId {
    AimTrainer,
    VisualMemory,
    TypingTest,
    InventoryManagement,
}

impl GameId {
    pub const ALL: [GameId; 4] = [
        GameId::AimTrainer,
        GameId::VisualMemory,
        GameId::TypingTest,
        GameId::InventoryManagement,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            GameId::AimTrainer => "aim-trainer",
            GameId::VisualMemory => "visual-memory",
            GameId::TypingTest => "typing-test",
            GameId::InventoryManagement => "inventory-management",
        }
    }

    /// Parse from the kebab-case route name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.as_str() == name)
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
