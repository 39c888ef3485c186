use std::time::Duration;

use crate::game_trait::{
    EndReason, GameEvent, InputOutcome, MiniGame, Phase, RoundResult, SessionConfig,
};
use crate::time::format_clock;
use crate::timer::{TimerId, TimerQueue};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionTimer {
    Countdown,
    WatchElapsed,
}

/// Generic mini-game session: `start -> [watching] -> playing -> over`.
///
/// Owns the countdown and the one-shot watch timer on a deterministic clock.
/// The owner feeds it frame deltas through [`Session::advance`] and player
/// input through [`Session::input`]; every call returns the events it produced.
///
/// Entering `over` cancels every timer, so nothing scheduled during the run
/// can touch the game afterwards. A restart resets the game and the countdown
/// before the first phase of the new run is entered.
pub struct Session<G: MiniGame> {
    game: G,
    config: SessionConfig,
    phase: Phase,
    time_left: u32,
    timers: TimerQueue<SessionTimer>,
    watch: Option<TimerId>,
    run_started_ms: u64,
    result: Option<RoundResult>,
    runs: u32,
}

impl<G: MiniGame> Session<G> {
    pub fn new(game: G) -> Self {
        let config = game.session_config();
        Self {
            game,
            config,
            phase: Phase::Start,
            time_left: config.duration_secs,
            timers: TimerQueue::new(),
            watch: None,
            run_started_ms: 0,
            result: None,
            runs: 0,
        }
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Seconds left on the countdown.
    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    /// Countdown formatted as `MM:SS`.
    pub fn clock(&self) -> String {
        format_clock(self.time_left)
    }

    pub fn config(&self) -> SessionConfig {
        self.config
    }

    pub fn display_score(&self) -> u8 {
        self.game.display_score()
    }

    /// Number of runs started so far (including the current one).
    pub fn runs(&self) -> u32 {
        self.runs
    }

    /// Result of the last finished run; cleared when a new run starts.
    pub fn result(&self) -> Option<&RoundResult> {
        self.result.as_ref()
    }

    /// Number of timers still scheduled.
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Start a run from `start`, or restart one from `over`. Ignored while a
    /// run is in progress.
    pub fn start(&mut self) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if self.phase.is_active() {
            return events;
        }

        self.cancel_timers();
        self.game.reset();
        self.config = self.game.session_config();
        self.time_left = self.config.duration_secs;
        self.result = None;
        self.runs += 1;
        self.run_started_ms = self.timers.now_ms();

        if self.time_left == 0 {
            self.end(EndReason::TimeUp, &mut events);
            return events;
        }

        self.timers
            .every(self.config.tick_ms, SessionTimer::Countdown);
        let first = if self.config.watch_ms.is_some() {
            Phase::Watching
        } else {
            Phase::Playing
        };
        self.enter(first, &mut events);
        events
    }

    /// Advance the session clock by `dt_ms`, firing due timers in order.
    pub fn advance(&mut self, dt_ms: u64) -> Vec<GameEvent> {
        let mut events = Vec::new();
        let target = self.timers.now_ms().saturating_add(dt_ms);
        while let Some((id, timer)) = self.timers.pop_due(target) {
            match timer {
                SessionTimer::Countdown => self.on_countdown(&mut events),
                SessionTimer::WatchElapsed => {
                    if self.watch == Some(id) && self.phase == Phase::Watching {
                        self.watch = None;
                        self.enter(Phase::Playing, &mut events);
                    }
                },
            }
        }
        self.timers.settle(target);
        events
    }

    /// Apply player input. Only accepted while `playing`.
    pub fn input(&mut self, input: G::Input) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if self.phase != Phase::Playing {
            return events;
        }

        let outcome = self.game.apply_input(input);
        if outcome == InputOutcome::Ignored {
            return events;
        }

        events.push(GameEvent::ScoreUpdate {
            raw: self.game.raw_score(),
            display: self.game.display_score(),
        });

        match outcome {
            InputOutcome::Advanced => {
                events.push(GameEvent::LevelAdvanced);
                if self.config.watch_ms.is_some() {
                    self.enter(Phase::Watching, &mut events);
                }
            },
            InputOutcome::Failed => self.end(EndReason::Failed, &mut events),
            InputOutcome::Applied | InputOutcome::Ignored => {},
        }
        events
    }

    /// Abandon the current run without producing a result, cancelling all
    /// timers. The session returns to `start`.
    pub fn teardown(&mut self) {
        self.cancel_timers();
        self.phase = Phase::Start;
    }

    fn on_countdown(&mut self, events: &mut Vec<GameEvent>) {
        if !self.phase.is_active() {
            return;
        }
        if self.time_left <= 1 {
            self.time_left = 0;
            events.push(GameEvent::TimerTick { remaining_secs: 0 });
            self.end(EndReason::TimeUp, events);
        } else {
            self.time_left -= 1;
            events.push(GameEvent::TimerTick {
                remaining_secs: self.time_left,
            });
        }
    }

    fn end(&mut self, reason: EndReason, events: &mut Vec<GameEvent>) {
        self.cancel_timers();
        let elapsed =
            Duration::from_millis(self.timers.now_ms().saturating_sub(self.run_started_ms));
        self.game.finish(elapsed);

        let display_score = self.game.display_score();
        let metadata = self.game.metadata();
        tracing::info!(
            game = %metadata.id,
            ?reason,
            raw = self.game.raw_score(),
            display = display_score,
            "Mini-game run finished"
        );
        self.result = Some(RoundResult {
            game: metadata.id,
            raw_score: self.game.raw_score(),
            display_score,
            reason,
            elapsed,
        });
        self.enter(Phase::Over, events);
        events.push(GameEvent::RoundComplete {
            reason,
            display: display_score,
        });
    }

    fn enter(&mut self, to: Phase, events: &mut Vec<GameEvent>) {
        if to == Phase::Watching {
            if let Some(old) = self.watch.take() {
                self.timers.cancel(old);
            }
            if let Some(ms) = self.config.watch_ms {
                self.watch = Some(self.timers.after(ms, SessionTimer::WatchElapsed));
            }
        }

        let from = self.phase;
        self.phase = to;
        if from != to {
            tracing::debug!(?from, ?to, "Session phase changed");
            events.push(GameEvent::PhaseChanged { from, to });
        }
    }

    fn cancel_timers(&mut self) {
        self.timers.cancel_all();
        self.watch = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_registry::GameId;
    use crate::game_trait::GameMetadata;
    use crate::scoring::stepped_display;

    /// Counter game: `true` scores, `false` costs a life, 3 points clear a level.
    struct Counter {
        watch: bool,
        points: i64,
        lives: u8,
        resets: u32,
        finished_after: Option<Duration>,
    }

    impl Counter {
        fn new(watch: bool) -> Self {
            Self {
                watch,
                points: 0,
                lives: 2,
                resets: 0,
                finished_after: None,
            }
        }
    }

    impl MiniGame for Counter {
        type Input = bool;

        fn metadata(&self) -> GameMetadata {
            GameMetadata {
                id: GameId::VisualMemory,
                name: "Counter".to_string(),
                description: "test".to_string(),
                duration: Duration::from_secs(5),
                has_watch_phase: self.watch,
            }
        }

        fn session_config(&self) -> SessionConfig {
            let cfg = SessionConfig::timed(5);
            if self.watch { cfg.with_watch(1500) } else { cfg }
        }

        fn reset(&mut self) {
            self.points = 0;
            self.lives = 2;
            self.resets += 1;
            self.finished_after = None;
        }

        fn apply_input(&mut self, input: bool) -> InputOutcome {
            if input {
                self.points += 1;
                if self.points % 3 == 0 {
                    InputOutcome::Advanced
                } else {
                    InputOutcome::Applied
                }
            } else {
                self.lives -= 1;
                if self.lives == 0 {
                    InputOutcome::Failed
                } else {
                    InputOutcome::Applied
                }
            }
        }

        fn raw_score(&self) -> i64 {
            self.points
        }

        fn display_score(&self) -> u8 {
            stepped_display(self.points, 5)
        }

        fn finish(&mut self, elapsed: Duration) {
            self.finished_after = Some(elapsed);
        }
    }

    fn count_round_complete(events: &[GameEvent]) -> usize {
        events
            .iter()
            .filter(|e| matches!(e, GameEvent::RoundComplete { .. }))
            .count()
    }

    #[test]
    fn starts_idle_and_ignores_input() {
        let mut s = Session::new(Counter::new(false));
        assert_eq!(s.phase(), Phase::Start);
        assert!(s.input(true).is_empty());
        assert!(s.advance(10_000).is_empty());
        assert_eq!(s.time_left(), 5);
    }

    #[test]
    fn start_enters_playing_without_watch() {
        let mut s = Session::new(Counter::new(false));
        let events = s.start();
        assert_eq!(s.phase(), Phase::Playing);
        assert_eq!(
            events,
            vec![GameEvent::PhaseChanged {
                from: Phase::Start,
                to: Phase::Playing
            }]
        );
    }

    #[test]
    fn countdown_reaches_over_exactly_once() {
        let mut s = Session::new(Counter::new(false));
        s.start();
        let mut completes = 0;
        for _ in 0..5 {
            completes += count_round_complete(&s.advance(1000));
        }
        assert_eq!(s.phase(), Phase::Over);
        assert_eq!(s.time_left(), 0);
        assert_eq!(completes, 1);
        assert_eq!(s.pending_timers(), 0);

        // Further time changes nothing.
        assert!(s.advance(60_000).is_empty());
        assert_eq!(s.time_left(), 0);
        assert_eq!(s.result().unwrap().reason, EndReason::TimeUp);
    }

    #[test]
    fn countdown_in_one_large_step_fires_once() {
        let mut s = Session::new(Counter::new(false));
        s.start();
        let events = s.advance(3_600_000);
        assert_eq!(count_round_complete(&events), 1);
        let ticks = events
            .iter()
            .filter(|e| matches!(e, GameEvent::TimerTick { .. }))
            .count();
        assert_eq!(ticks, 5);
    }

    #[test]
    fn round_complete_reports_final_display_score() {
        let mut s = Session::new(Counter::new(false));
        s.start();
        s.input(true);
        s.input(true);
        let events = s.advance(5000);
        assert!(events.contains(&GameEvent::RoundComplete {
            reason: EndReason::TimeUp,
            display: 70,
        }));
        let result = s.result().unwrap();
        assert_eq!(result.display_score, 70);
        assert_eq!(result.raw_score, 2);
    }

    #[test]
    fn watch_phase_elapses_into_playing() {
        let mut s = Session::new(Counter::new(true));
        s.start();
        assert_eq!(s.phase(), Phase::Watching);
        assert!(s.input(true).is_empty(), "input ignored while watching");

        s.advance(1499);
        assert_eq!(s.phase(), Phase::Watching);
        let events = s.advance(1);
        assert_eq!(s.phase(), Phase::Playing);
        assert!(events.contains(&GameEvent::PhaseChanged {
            from: Phase::Watching,
            to: Phase::Playing
        }));
        // Countdown ran during watching.
        assert_eq!(s.time_left(), 4);
    }

    #[test]
    fn level_advance_reenters_watching() {
        let mut s = Session::new(Counter::new(true));
        s.start();
        s.advance(1500);
        s.input(true);
        s.input(true);
        let events = s.input(true);
        assert!(events.contains(&GameEvent::LevelAdvanced));
        assert_eq!(s.phase(), Phase::Watching);
        s.advance(1500);
        assert_eq!(s.phase(), Phase::Playing);
    }

    #[test]
    fn failure_ends_run() {
        let mut s = Session::new(Counter::new(false));
        s.start();
        s.input(false);
        let events = s.input(false);
        assert_eq!(s.phase(), Phase::Over);
        assert_eq!(count_round_complete(&events), 1);
        assert_eq!(s.result().unwrap().reason, EndReason::Failed);
        assert_eq!(s.pending_timers(), 0);
    }

    #[test]
    fn stale_watch_timer_does_not_fire_after_restart() {
        let mut s = Session::new(Counter::new(true));
        s.start();
        s.advance(1500);
        // Fail during playing, then restart mid-way.
        s.input(false);
        s.input(false);
        assert_eq!(s.phase(), Phase::Over);

        s.start();
        assert_eq!(s.phase(), Phase::Watching);
        s.advance(1000);
        assert_eq!(s.phase(), Phase::Watching, "old watch timer must not fire");
        s.advance(500);
        assert_eq!(s.phase(), Phase::Playing);
    }

    #[test]
    fn restart_resets_timer_and_accumulators() {
        let mut s = Session::new(Counter::new(false));
        s.start();
        s.input(true);
        s.advance(5000);
        assert_eq!(s.phase(), Phase::Over);
        assert_eq!(s.game().points, 1);

        s.start();
        assert_eq!(s.phase(), Phase::Playing);
        assert_eq!(s.time_left(), 5);
        assert_eq!(s.game().points, 0);
        assert_eq!(s.game().resets, 2);
        assert!(s.result().is_none());
        assert_eq!(s.runs(), 2);
    }

    #[test]
    fn start_ignored_while_running() {
        let mut s = Session::new(Counter::new(false));
        s.start();
        s.input(true);
        assert!(s.start().is_empty());
        assert_eq!(s.game().points, 1);
    }

    #[test]
    fn finish_receives_elapsed_time() {
        let mut s = Session::new(Counter::new(false));
        s.advance(12_345);
        s.start();
        s.advance(5000);
        assert_eq!(s.game().finished_after, Some(Duration::from_secs(5)));
        assert_eq!(s.result().unwrap().elapsed, Duration::from_secs(5));
    }

    #[test]
    fn teardown_cancels_everything() {
        let mut s = Session::new(Counter::new(true));
        s.start();
        s.teardown();
        assert_eq!(s.pending_timers(), 0);
        assert_eq!(s.phase(), Phase::Start);
        assert!(s.advance(100_000).is_empty());
    }

    #[test]
    fn clock_formats_remaining_time() {
        let mut s = Session::new(Counter::new(false));
        assert_eq!(s.clock(), "00:05");
        s.start();
        s.advance(2000);
        assert_eq!(s.clock(), "00:03");
    }
}
