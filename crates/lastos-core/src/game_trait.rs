use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::game_registry::GameId;

/// Core trait that every mini-game implements.
///
/// The [`Session`](crate::session::Session) owns the phase machine, the
/// countdown, and the watch-phase timer; the game only owns its accumulators,
/// generated content, and input rules.
pub trait MiniGame {
    /// Game-specific player input (a shot, a tile click, typed text, ...).
    type Input;

    /// Catalog metadata.
    fn metadata(&self) -> GameMetadata;

    /// Timing parameters for the shared state machine.
    fn session_config(&self) -> SessionConfig;

    /// Discard all per-run state and generate fresh content. Called on every
    /// start and restart, before the first phase of the run is entered.
    fn reset(&mut self);

    /// Apply one input while the session is playing.
    fn apply_input(&mut self, input: Self::Input) -> InputOutcome;

    /// The raw accumulator (hits, correct answers, level, ...).
    fn raw_score(&self) -> i64;

    /// Display score in [60, 100], a monotonic function of the raw accumulator.
    fn display_score(&self) -> u8;

    /// Called once when the run ends, with the active time of the run.
    fn finish(&mut self, _elapsed: Duration) {}
}

/// Catalog metadata for a mini-game.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameMetadata {
    pub id: GameId,
    pub name: String,
    pub description: String,
    pub duration: Duration,
    pub has_watch_phase: bool,
}

/// Timing parameters for the generic session state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Countdown length in whole seconds.
    pub duration_secs: u32,
    /// Length of the read-only watch phase; `None` skips it.
    pub watch_ms: Option<u64>,
    /// Countdown tick period.
    pub tick_ms: u64,
}

impl SessionConfig {
    pub fn timed(duration_secs: u32) -> Self {
        Self {
            duration_secs,
            watch_ms: None,
            tick_ms: 1000,
        }
    }

    pub fn with_watch(mut self, watch_ms: u64) -> Self {
        self.watch_ms = Some(watch_ms);
        self
    }
}

/// Result of applying one input to a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOutcome {
    /// The input had no effect (duplicate click, empty ammo, ...).
    Ignored,
    /// The input changed game state.
    Applied,
    /// The player cleared a level; new content is ready to be shown.
    Advanced,
    /// A game-specific failure condition ended the run.
    Failed,
}

/// Session lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Start,
    Watching,
    Playing,
    Over,
}

impl Phase {
    /// Whether the countdown runs in this phase.
    pub fn is_active(self) -> bool {
        matches!(self, Phase::Watching | Phase::Playing)
    }
}

/// Why a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    TimeUp,
    Failed,
}

/// Events emitted by a session (phase changes, timer ticks, scoring, run end).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    PhaseChanged { from: Phase, to: Phase },
    TimerTick { remaining_secs: u32 },
    ScoreUpdate { raw: i64, display: u8 },
    LevelAdvanced,
    RoundComplete { reason: EndReason, display: u8 },
}

/// Final result of a run, produced once the session reaches `over`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundResult {
    pub game: GameId,
    pub raw_score: i64,
    pub display_score: u8,
    pub reason: EndReason,
    pub elapsed: Duration,
}
