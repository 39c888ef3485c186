pub mod context;
pub mod game_registry;
pub mod game_trait;
pub mod input;
pub mod scoring;
pub mod session;
pub mod time;
pub mod timer;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use crate::game_trait::{GameEvent, MiniGame, Phase};
    use crate::scoring::{MAX_DISPLAY_SCORE, MIN_DISPLAY_SCORE};
    use crate::session::Session;

    /// Advance `session` by `secs` whole seconds, one second at a time,
    /// returning all accumulated events.
    pub fn run_seconds<G: MiniGame>(session: &mut Session<G>, secs: u32) -> Vec<GameEvent> {
        let mut all_events = Vec::new();
        for _ in 0..secs {
            all_events.extend(session.advance(1000));
        }
        all_events
    }

    /// If the session is in its watch phase, advance exactly until it ends.
    pub fn skip_watch<G: MiniGame>(session: &mut Session<G>) -> Vec<GameEvent> {
        match (session.phase(), session.config().watch_ms) {
            (Phase::Watching, Some(ms)) => session.advance(ms),
            _ => Vec::new(),
        }
    }

    // ================================================================
    // MiniGame Contract Tests
    // ================================================================
    // Every MiniGame implementation runs these from its own #[cfg(test)]
    // module with a concrete game and a closure producing a scoring input.

    /// Inputs before `start`, during the watch phase, and after `over` must
    /// not change the score.
    pub fn contract_inputs_ignored_outside_playing<G: MiniGame>(
        game: G,
        scoring_input: impl Fn(&G) -> G::Input,
    ) {
        let mut session = Session::new(game);
        let input = scoring_input(session.game());
        assert!(
            session.input(input).is_empty(),
            "input before start must be ignored"
        );

        session.start();
        if session.phase() == Phase::Watching {
            let input = scoring_input(session.game());
            assert!(
                session.input(input).is_empty(),
                "input while watching must be ignored"
            );
        }

        let secs = session.time_left();
        run_seconds(&mut session, secs);
        assert_eq!(session.phase(), Phase::Over);
        let raw = session.game().raw_score();
        let input = scoring_input(session.game());
        assert!(
            session.input(input).is_empty(),
            "input after over must be ignored"
        );
        assert_eq!(session.game().raw_score(), raw);
    }

    /// The countdown must end the run exactly once and leave no timers behind.
    pub fn contract_timer_expires_once<G: MiniGame>(game: G) {
        let mut session = Session::new(game);
        session.start();
        let duration = session.config().duration_secs;
        let events = run_seconds(&mut session, duration + 10);
        let completes = events
            .iter()
            .filter(|e| matches!(e, GameEvent::RoundComplete { .. }))
            .count();
        assert_eq!(completes, 1, "round must complete exactly once");
        assert_eq!(session.phase(), Phase::Over);
        assert_eq!(session.time_left(), 0);
        assert_eq!(session.pending_timers(), 0);
    }

    /// A restart after `over` must restore the countdown and every accumulator.
    pub fn contract_restart_resets<G: MiniGame>(
        game: G,
        scoring_input: impl Fn(&G) -> G::Input,
    ) {
        let mut session = Session::new(game);
        session.start();
        let initial_raw = session.game().raw_score();
        let initial_display = session.display_score();
        skip_watch(&mut session);

        let input = scoring_input(session.game());
        session.input(input);
        assert_ne!(
            session.game().raw_score(),
            initial_raw,
            "scoring input must change the raw score"
        );

        let secs = session.time_left();
        run_seconds(&mut session, secs);
        assert_eq!(session.phase(), Phase::Over);

        session.start();
        assert!(session.phase().is_active());
        assert_eq!(session.time_left(), session.config().duration_secs);
        assert_eq!(session.game().raw_score(), initial_raw);
        assert_eq!(session.display_score(), initial_display);
        assert!(session.result().is_none());
    }

    /// The display score must stay within [60, 100] through a run.
    pub fn contract_display_score_in_range<G: MiniGame>(
        game: G,
        scoring_input: impl Fn(&G) -> G::Input,
        inputs: usize,
    ) {
        let mut session = Session::new(game);
        session.start();
        for _ in 0..inputs {
            skip_watch(&mut session);
            if session.phase() != Phase::Playing {
                break;
            }
            let input = scoring_input(session.game());
            session.input(input);
            let score = session.display_score();
            assert!(
                (MIN_DISPLAY_SCORE..=MAX_DISPLAY_SCORE).contains(&score),
                "display score {score} out of range"
            );
        }
    }
}
