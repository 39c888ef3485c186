use lastos_core::timer::{TimerId, TimerQueue};

/// On-screen keyboard rows: primary label and the symbol printed under it.
pub const ROWS: [&[(char, char)]; 3] = [
    &[
        ('q', '1'),
        ('w', '2'),
        ('e', '3'),
        ('r', '4'),
        ('t', '5'),
        ('y', '6'),
        ('u', '7'),
        ('i', '8'),
        ('o', '9'),
        ('p', '0'),
    ],
    &[
        ('a', '@'),
        ('s', '#'),
        ('d', '€'),
        ('f', '&'),
        ('g', '*'),
        ('h', '('),
        ('j', ')'),
        ('k', '`'),
        ('l', '"'),
    ],
    &[
        ('z', '%'),
        ('x', '-'),
        ('c', '+'),
        ('v', '='),
        ('b', '/'),
        ('n', ';'),
        ('m', ':'),
        (',', '!'),
        ('.', '?'),
    ],
];

/// Lights the most recently typed key for a short time.
///
/// Each press replaces the previous highlight and restarts its one-shot.
pub struct KeyHighlight {
    timers: TimerQueue<()>,
    pending: Option<TimerId>,
    active: Option<char>,
    hold_ms: u64,
}

impl KeyHighlight {
    pub fn new(hold_ms: u64) -> Self {
        Self {
            timers: TimerQueue::new(),
            pending: None,
            active: None,
            hold_ms,
        }
    }

    /// Highlight `ch` (lowercased).
    pub fn press(&mut self, ch: char) {
        if let Some(id) = self.pending.take() {
            self.timers.cancel(id);
        }
        self.active = ch.to_lowercase().next();
        self.pending = Some(self.timers.after(self.hold_ms, ()));
    }

    pub fn advance(&mut self, dt_ms: u64) {
        if !self.timers.advance(dt_ms).is_empty() {
            self.pending = None;
            self.active = None;
        }
    }

    pub fn active(&self) -> Option<char> {
        self.active
    }

    /// Whether the key labelled `label` is lit.
    pub fn is_lit(&self, label: char) -> bool {
        self.active.is_some() && self.active == label.to_lowercase().next()
    }

    pub fn teardown(&mut self) {
        self.timers.cancel_all();
        self.pending = None;
        self.active = None;
    }
}
