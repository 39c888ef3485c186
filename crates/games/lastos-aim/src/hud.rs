use lastos_core::timer::TimerQueue;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Radar sweep step per tick, in degrees.
pub const SWEEP_STEP_DEG: u16 = 3;
pub const SWEEP_PERIOD_MS: u64 = 30;
pub const BAR_COUNT: usize = 9;
pub const BAR_PERIOD_MS: u64 = 2000;
pub const RADIO_PERIOD_MS: u64 = 5000;
/// Gap between radio messages.
pub const RADIO_BLACKOUT_MS: u64 = 800;
pub const FLASH_MIN_PERIOD_MS: u64 = 3000;
pub const FLASH_MAX_PERIOD_MS: u64 = 5000;
pub const FLASH_ON_MS: u64 = 600;

pub const RADIO_MESSAGES: [&str; 3] = [
    "SECURE THE FRONTLINE",
    "NEXT WAVE OF GLITCHES INCOMING",
    "LEAVE NO GLITCH ALIVE",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HudTimer {
    Sweep,
    Bars,
    RadioCut,
    RadioNext,
    FlashOn,
    FlashOff,
}

/// Cosmetic HUD animation state for the aim trainer screen.
///
/// Runs independently of the round: the timers start when the HUD is
/// created and stop only on [`teardown`](AimHud::teardown).
pub struct AimHud {
    timers: TimerQueue<HudTimer>,
    rng: StdRng,
    sweep_deg: u16,
    bars: [f32; BAR_COUNT],
    radio_idx: usize,
    radio_active: bool,
    flash_bright: bool,
    flash_period_ms: u64,
}

impl AimHud {
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_os_rng())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(mut rng: StdRng) -> Self {
        let bars = std::array::from_fn(|_| rng.random_range(20.0..80.0));
        let flash_period_ms = rng.random_range(FLASH_MIN_PERIOD_MS..FLASH_MAX_PERIOD_MS);
        let mut timers = TimerQueue::new();
        timers.every(SWEEP_PERIOD_MS, HudTimer::Sweep);
        timers.every(BAR_PERIOD_MS, HudTimer::Bars);
        timers.every(RADIO_PERIOD_MS, HudTimer::RadioCut);
        timers.every(flash_period_ms, HudTimer::FlashOn);
        Self {
            timers,
            rng,
            sweep_deg: 0,
            bars,
            radio_idx: 0,
            radio_active: true,
            flash_bright: false,
            flash_period_ms,
        }
    }

    /// Advance the HUD clock by `dt_ms`. One-shots scheduled by a handler are
    /// timed from the moment that handler fired.
    pub fn advance(&mut self, dt_ms: u64) {
        let target = self.timers.now_ms().saturating_add(dt_ms);
        while let Some((_, timer)) = self.timers.pop_due(target) {
            match timer {
                HudTimer::Sweep => {
                    self.sweep_deg = (self.sweep_deg + SWEEP_STEP_DEG) % 360;
                },
                HudTimer::Bars => self.shuffle_bars(),
                HudTimer::RadioCut => {
                    self.radio_active = false;
                    self.timers.after(RADIO_BLACKOUT_MS, HudTimer::RadioNext);
                },
                HudTimer::RadioNext => {
                    self.radio_idx = (self.radio_idx + 1) % RADIO_MESSAGES.len();
                    self.radio_active = true;
                },
                HudTimer::FlashOn => {
                    self.flash_bright = true;
                    self.timers.after(FLASH_ON_MS, HudTimer::FlashOff);
                },
                HudTimer::FlashOff => self.flash_bright = false,
            }
        }
        self.timers.settle(target);
    }

    /// Re-randomise two to four bars (repeats allowed) into [10, 80).
    fn shuffle_bars(&mut self) {
        let count = self.rng.random_range(2..=4);
        for _ in 0..count {
            let idx = self.rng.random_range(0..BAR_COUNT);
            self.bars[idx] = self.rng.random_range(10.0..80.0);
        }
    }

    /// Cancel every HUD timer.
    pub fn teardown(&mut self) {
        self.timers.cancel_all();
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn sweep_deg(&self) -> u16 {
        self.sweep_deg
    }

    pub fn bars(&self) -> &[f32; BAR_COUNT] {
        &self.bars
    }

    /// Current radio message, or `None` during the blackout between messages.
    pub fn radio(&self) -> Option<&'static str> {
        self.radio_active.then(|| RADIO_MESSAGES[self.radio_idx])
    }

    pub fn flash_bright(&self) -> bool {
        self.flash_bright
    }

    pub fn flash_period_ms(&self) -> u64 {
        self.flash_period_ms
    }
}

impl Default for AimHud {
    fn default() -> Self {
        Self::new()
    }
}

/// Cursor position inside a container as whole percentages, for the
/// coordinate readout.
pub fn cursor_percent(client: (f64, f64), origin: (f64, f64), size: (f64, f64)) -> (i32, i32) {
    let pct = |c: f64, o: f64, s: f64| {
        if s <= 0.0 {
            0
        } else {
            ((c - o) / s * 100.0).round() as i32
        }
    };
    (
        pct(client.0, origin.0, size.0),
        pct(client.1, origin.1, size.1),
    )
}
