pub mod arena;
pub mod config;
pub mod physics;

use lastos_core::input::InputState;
use lastos_core::timer::{TimerId, TimerQueue};
use serde::{Deserialize, Serialize};

use arena::Arena;
use config::MovementConfig;
use physics::{CivilianState, Facing};

/// Spritesheet dimensions in pixels.
pub const SHEET_WIDTH: u32 = 853;
pub const SHEET_HEIGHT: u32 = 1280;

/// Pixel rectangle of one frame on the spritesheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpriteRect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl SpriteRect {
    /// CSS `background-size` percentages that scale the sheet so this frame
    /// fills the element.
    pub fn background_size(&self) -> (f32, f32) {
        (
            SHEET_WIDTH as f32 / self.w as f32 * 100.0,
            SHEET_HEIGHT as f32 / self.h as f32 * 100.0,
        )
    }

    /// CSS `background-position` percentages that crop the sheet to this frame.
    pub fn background_position(&self) -> (f32, f32) {
        (
            self.x as f32 / (SHEET_WIDTH - self.w) as f32 * 100.0,
            self.y as f32 / (SHEET_HEIGHT - self.h) as f32 * 100.0,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpriteFrame {
    Standing,
    Walk1,
    Walk2,
}

impl SpriteFrame {
    pub fn rect(self) -> SpriteRect {
        match self {
            SpriteFrame::Standing => SpriteRect {
                x: 624,
                y: 0,
                w: 217,
                h: 267,
            },
            SpriteFrame::Walk1 => SpriteRect {
                x: 25,
                y: 6,
                w: 224,
                h: 267,
            },
            SpriteFrame::Walk2 => SpriteRect {
                x: 230,
                y: 0,
                w: 209,
                h: 270,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AnimTimer {
    WalkFrame,
}

/// What the renderer needs to draw the character this frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CivilianView {
    pub state: CivilianState,
    pub frame: SpriteFrame,
    /// The sheet art faces left; mirror it when facing right.
    pub mirrored: bool,
}

/// Frame-driven shell around the pure [`physics::step`].
///
/// Key events update the held-key set between frames; each display frame
/// takes one snapshot, runs one tick, and drives the walk-cycle interval.
pub struct CivilianController {
    arena: Arena,
    config: MovementConfig,
    input: InputState,
    state: CivilianState,
    /// 0 = first walk frame, 1 = second.
    walk_phase: u8,
    walk_timer: Option<TimerId>,
    timers: TimerQueue<AnimTimer>,
    running: bool,
}

impl CivilianController {
    pub fn new(arena: Arena, config: MovementConfig) -> Self {
        let state = CivilianState::new(arena.spawn);
        Self {
            arena,
            config,
            input: InputState::new(),
            state,
            walk_phase: 0,
            walk_timer: None,
            timers: TimerQueue::new(),
            running: true,
        }
    }

    /// Controller for the control room using config and arena files when present.
    pub fn load() -> Self {
        Self::new(arena::load_arena(), MovementConfig::load())
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn state(&self) -> &CivilianState {
        &self.state
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Returns true when the key is a movement key and its default action
    /// should be suppressed.
    pub fn on_key_down(&mut self, key: &str) -> bool {
        self.input.on_key_down(key)
    }

    pub fn on_key_up(&mut self, key: &str) {
        self.input.on_key_up(key);
    }

    /// Focus loss: drop every held key so none stays stuck.
    pub fn on_blur(&mut self) {
        self.input.on_blur();
    }

    /// Run one display frame `dt_ms` after the previous one.
    ///
    /// Movement runs once per frame regardless of `dt_ms`; the clock only
    /// drives the walk animation. Does nothing after [`teardown`](Self::teardown).
    pub fn frame(&mut self, dt_ms: u64) -> CivilianView {
        if self.running {
            let snapshot = self.input.snapshot();
            let was_moving = self.state.moving;
            self.state = physics::step(&self.state, snapshot, &self.arena, &self.config);

            match (was_moving, self.state.moving) {
                (false, true) => self.start_walk_cycle(),
                (true, false) => self.stop_walk_cycle(),
                _ => {},
            }

            for (_, tag) in self.timers.advance(dt_ms) {
                match tag {
                    AnimTimer::WalkFrame => self.walk_phase ^= 1,
                }
            }
        }
        self.view()
    }

    pub fn view(&self) -> CivilianView {
        let frame = match (self.state.moving, self.walk_phase) {
            (false, _) => SpriteFrame::Standing,
            (true, 0) => SpriteFrame::Walk1,
            (true, _) => SpriteFrame::Walk2,
        };
        CivilianView {
            state: self.state,
            frame,
            mirrored: self.state.facing == Facing::Right,
        }
    }

    /// Stop the frame loop and cancel every animation timer. Later frames
    /// and key events leave the state untouched.
    pub fn teardown(&mut self) {
        self.running = false;
        self.timers.cancel_all();
        self.walk_timer = None;
        self.input.on_blur();
        tracing::debug!(
            x = self.state.position.x,
            y = self.state.position.y,
            "civilian controller torn down"
        );
    }

    /// Number of animation timers still scheduled.
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    fn start_walk_cycle(&mut self) {
        if let Some(id) = self.walk_timer.take() {
            self.timers.cancel(id);
        }
        self.walk_phase = 0;
        self.walk_timer = Some(self.timers.every(self.config.walk_frame_ms, AnimTimer::WalkFrame));
    }

    fn stop_walk_cycle(&mut self) {
        if let Some(id) = self.walk_timer.take() {
            self.timers.cancel(id);
        }
        self.walk_phase = 0;
    }
}
