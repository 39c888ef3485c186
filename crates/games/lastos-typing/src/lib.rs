pub mod config;
pub mod keyboard;
pub mod paragraphs;
pub mod scoring;
pub mod similarity;

use std::time::Duration;

use lastos_core::game_registry::GameId;
use lastos_core::game_trait::{GameMetadata, InputOutcome, MiniGame, SessionConfig};
use lastos_core::scoring::MIN_DISPLAY_SCORE;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use config::TypingConfig;
use paragraphs::PARAGRAPHS;

/// An edit to the typed buffer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypingInput {
    /// The whole text-area value changed.
    Replace(String),
    Append(char),
    Backspace,
}

/// Highlight state of one reference character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CharState {
    Correct,
    Incorrect,
    Untyped,
}

/// Figures computed when the run ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypingStats {
    pub wpm: u32,
    pub accuracy: u32,
    pub score: u8,
}

/// Typing test: reproduce a paragraph as fast and accurately as possible.
pub struct TypingTest {
    config: TypingConfig,
    rng: StdRng,
    paragraph: &'static str,
    typed: String,
    stats: Option<TypingStats>,
}

impl TypingTest {
    pub fn new() -> Self {
        Self::with_config(TypingConfig::load())
    }

    pub fn with_config(config: TypingConfig) -> Self {
        Self::from_rng(config, StdRng::from_os_rng())
    }

    pub fn with_seed(config: TypingConfig, seed: u64) -> Self {
        Self::from_rng(config, StdRng::seed_from_u64(seed))
    }

    fn from_rng(config: TypingConfig, mut rng: StdRng) -> Self {
        let paragraph = PARAGRAPHS[rng.random_range(0..PARAGRAPHS.len())];
        Self {
            config,
            rng,
            paragraph,
            typed: String::new(),
            stats: None,
        }
    }

    pub fn config(&self) -> &TypingConfig {
        &self.config
    }

    pub fn paragraph(&self) -> &str {
        self.paragraph
    }

    pub fn typed(&self) -> &str {
        &self.typed
    }

    /// Final WPM, accuracy and score, once the run has ended.
    pub fn stats(&self) -> Option<TypingStats> {
        self.stats
    }

    /// Last character of the buffer, for the on-screen keyboard highlight.
    pub fn last_char(&self) -> Option<char> {
        self.typed.chars().last()
    }

    /// Per-character highlight of the paragraph against the typed buffer.
    pub fn char_states(&self) -> Vec<CharState> {
        let mut typed = self.typed.chars();
        self.paragraph
            .chars()
            .map(|expected| match typed.next() {
                Some(got) if got == expected => CharState::Correct,
                Some(_) => CharState::Incorrect,
                None => CharState::Untyped,
            })
            .collect()
    }
}

impl Default for TypingTest {
    fn default() -> Self {
        Self::new()
    }
}

impl MiniGame for TypingTest {
    type Input = TypingInput;

    fn metadata(&self) -> GameMetadata {
        GameMetadata {
            id: GameId::TypingTest,
            name: "Typing Test".to_string(),
            description: "Type the transmission before the link drops".to_string(),
            duration: Duration::from_secs(self.config.duration_secs as u64),
            has_watch_phase: false,
        }
    }

    fn session_config(&self) -> SessionConfig {
        SessionConfig::timed(self.config.duration_secs)
    }

    fn reset(&mut self) {
        self.paragraph = PARAGRAPHS[self.rng.random_range(0..PARAGRAPHS.len())];
        self.typed.clear();
        self.stats = None;
    }

    fn apply_input(&mut self, input: TypingInput) -> InputOutcome {
        match input {
            TypingInput::Replace(text) => {
                if text == self.typed {
                    return InputOutcome::Ignored;
                }
                self.typed = text;
            },
            TypingInput::Append(ch) => self.typed.push(ch),
            TypingInput::Backspace => {
                if self.typed.pop().is_none() {
                    return InputOutcome::Ignored;
                }
            },
        }
        InputOutcome::Applied
    }

    /// Characters in the typed buffer.
    fn raw_score(&self) -> i64 {
        self.typed.chars().count() as i64
    }

    /// 60 until the run ends, then the WPM and accuracy score.
    fn display_score(&self) -> u8 {
        self.stats.map_or(MIN_DISPLAY_SCORE, |s| s.score)
    }

    fn finish(&mut self, elapsed: Duration) {
        let wpm = scoring::words_per_minute(self.typed.chars().count(), elapsed);
        let accuracy = scoring::accuracy_percent(&self.typed, self.paragraph);
        let score = scoring::calc_typing_score(wpm, accuracy);
        tracing::debug!(wpm, accuracy, score, "typing test finished");
        self.stats = Some(TypingStats {
            wpm,
            accuracy,
            score,
        });
    }
}
