pub mod config;
pub mod scoring;
pub mod words;

use std::time::Duration;

use lastos_core::game_registry::GameId;
use lastos_core::game_trait::{GameMetadata, InputOutcome, MiniGame, SessionConfig};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use config::InventoryConfig;

/// The player's classification of the current word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    New,
    Seen,
}

/// Inventory word recall: say whether each word has been shown before.
pub struct InventoryManagement {
    config: InventoryConfig,
    rng: StdRng,
    /// Words shown so far this run, in first-shown order.
    seen: Vec<&'static str>,
    current: &'static str,
    current_is_new: bool,
    lives: u32,
    correct: u32,
}

impl InventoryManagement {
    pub fn new() -> Self {
        Self::with_config(InventoryConfig::load())
    }

    pub fn with_config(config: InventoryConfig) -> Self {
        Self::from_rng(config, StdRng::from_os_rng())
    }

    pub fn with_seed(config: InventoryConfig, seed: u64) -> Self {
        Self::from_rng(config, StdRng::seed_from_u64(seed))
    }

    fn from_rng(config: InventoryConfig, rng: StdRng) -> Self {
        let mut game = Self {
            lives: config.lives,
            config,
            rng,
            seen: Vec::new(),
            current: words::TERMS[0],
            current_is_new: true,
            correct: 0,
        };
        game.next_word();
        game
    }

    pub fn current_word(&self) -> &'static str {
        self.current
    }

    /// The answer that scores for the current word.
    pub fn expected_verdict(&self) -> Verdict {
        if self.current_is_new {
            Verdict::New
        } else {
            Verdict::Seen
        }
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn correct(&self) -> u32 {
        self.correct
    }

    pub fn seen_words(&self) -> &[&'static str] {
        &self.seen
    }

    /// The first draw of a run is always new; after that a seen word is
    /// repeated with probability `seen_chance`.
    fn next_word(&mut self) {
        let repeat = !self.seen.is_empty()
            && self.rng.random_bool(self.config.seen_probability());
        if repeat {
            self.current = self.seen[self.rng.random_range(0..self.seen.len())];
            self.current_is_new = false;
            return;
        }
        let word = words::pick_new_word(&mut self.rng, &self.seen);
        if !self.seen.contains(&word) {
            self.seen.push(word);
        }
        self.current = word;
        self.current_is_new = true;
    }
}

impl Default for InventoryManagement {
    fn default() -> Self {
        Self::new()
    }
}

impl MiniGame for InventoryManagement {
    type Input = Verdict;

    fn metadata(&self) -> GameMetadata {
        GameMetadata {
            id: GameId::InventoryManagement,
            name: "Inventory Management".to_string(),
            description: "Sort each component: new to the inventory, or already logged".to_string(),
            duration: Duration::from_secs(self.config.duration_secs as u64),
            has_watch_phase: false,
        }
    }

    fn session_config(&self) -> SessionConfig {
        SessionConfig::timed(self.config.duration_secs)
    }

    fn reset(&mut self) {
        self.seen.clear();
        self.lives = self.config.lives;
        self.correct = 0;
        self.next_word();
    }

    fn apply_input(&mut self, verdict: Verdict) -> InputOutcome {
        if verdict == self.expected_verdict() {
            self.correct += 1;
        } else {
            self.lives = self.lives.saturating_sub(1);
            if self.lives == 0 {
                return InputOutcome::Failed;
            }
        }
        self.next_word();
        InputOutcome::Applied
    }

    fn raw_score(&self) -> i64 {
        self.correct as i64
    }

    fn display_score(&self) -> u8 {
        scoring::calc_score(self.correct)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lastos_core::game_trait::{EndReason, Phase};
    use lastos_core::session::Session;

    fn game() -> InventoryManagement {
        InventoryManagement::with_seed(InventoryConfig::default(), 21)
    }

    fn right(g: &InventoryManagement) -> Verdict {
        g.expected_verdict()
    }

    fn wrong(g: &InventoryManagement) -> Verdict {
        match g.expected_verdict() {
            Verdict::New => Verdict::Seen,
            Verdict::Seen => Verdict::New,
        }
    }

    #[test]
    fn first_word_is_new() {
        for seed in 0..20 {
            let g = InventoryManagement::with_seed(InventoryConfig::default(), seed);
            assert_eq!(g.expected_verdict(), Verdict::New);
            assert_eq!(g.seen_words(), &[g.current_word()]);
        }
    }

    #[test]
    fn seen_words_are_repeated_sometimes() {
        let mut g = game();
        let mut repeats = 0;
        for _ in 0..200 {
            let v = right(&g);
            g.apply_input(v);
            if g.expected_verdict() == Verdict::Seen {
                assert!(g.seen_words().contains(&g.current_word()));
                repeats += 1;
            }
        }
        // 40 % nominal; allow generous slack for the fixed seed.
        assert!((40..=120).contains(&repeats), "repeats = {repeats}");
    }

    #[test]
    fn new_words_are_unseen_until_pool_exhausted() {
        let mut g = game();
        for _ in 0..40 {
            let before: Vec<&str> = g.seen_words().to_vec();
            let v = right(&g);
            g.apply_input(v);
            if g.expected_verdict() == Verdict::New {
                assert!(!before.contains(&g.current_word()));
            }
        }
    }

    #[test]
    fn correct_answers_score() {
        let mut g = game();
        for _ in 0..5 {
            let v = right(&g);
            assert_eq!(g.apply_input(v), InputOutcome::Applied);
        }
        assert_eq!(g.correct(), 5);
        assert_eq!(g.display_score(), 65);
    }

    #[test]
    fn three_wrong_answers_end_the_run() {
        let mut session = Session::new(game());
        session.start();
        for _ in 0..3 {
            let v = wrong(session.game());
            session.input(v);
        }
        assert_eq!(session.phase(), Phase::Over);
        assert_eq!(session.game().lives(), 0);
        assert_eq!(session.result().unwrap().reason, EndReason::Failed);
    }

    #[test]
    fn losing_answer_does_not_draw_a_word() {
        let cfg = InventoryConfig {
            lives: 1,
            ..InventoryConfig::default()
        };
        let mut g = InventoryManagement::with_seed(cfg, 2);
        let word = g.current_word();
        let v = wrong(&g);
        assert_eq!(g.apply_input(v), InputOutcome::Failed);
        assert_eq!(g.current_word(), word);
        assert_eq!(g.seen_words().len(), 1);
    }

    #[test]
    fn nan_seen_chance_keeps_drawing_words() {
        let cfg = InventoryConfig {
            seen_chance: f64::NAN,
            ..InventoryConfig::default()
        };
        let mut g = InventoryManagement::with_seed(cfg, 8);
        for _ in 0..20 {
            let v = right(&g);
            assert_eq!(g.apply_input(v), InputOutcome::Applied);
        }
        assert_eq!(g.correct(), 20);
    }

    #[test]
    fn restart_forgets_seen_words() {
        let mut session = Session::new(game());
        session.start();
        for _ in 0..10 {
            let v = right(session.game());
            session.input(v);
        }
        lastos_core::test_helpers::run_seconds(&mut session, 60);
        session.start();
        assert_eq!(session.game().seen_words().len(), 1);
        assert_eq!(session.game().correct(), 0);
        assert_eq!(session.game().lives(), 3);
    }

    // ================================================================
    // MiniGame contract tests
    // ================================================================

    #[test]
    fn contract_inputs_ignored_outside_playing() {
        lastos_core::test_helpers::contract_inputs_ignored_outside_playing(game(), right);
    }

    #[test]
    fn contract_timer_expires_once() {
        lastos_core::test_helpers::contract_timer_expires_once(game());
    }

    #[test]
    fn contract_restart_resets() {
        lastos_core::test_helpers::contract_restart_resets(game(), right);
    }

    #[test]
    fn contract_display_score_in_range() {
        lastos_core::test_helpers::contract_display_score_in_range(game(), right, 100);
    }
}
