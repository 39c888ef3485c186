use std::time::Duration;

use lastos_core::scoring::clamp_display;

use crate::similarity::sequence_match_ratio;

/// Characters per word for WPM.
pub const CHARS_PER_WORD: f64 = 5.0;
/// WPM at or below which no bonus is earned.
pub const WPM_FLOOR: f64 = 20.0;
/// WPM at or above which the full bonus is earned.
pub const WPM_CEILING: f64 = 80.0;
const MAX_BONUS: f64 = 40.0;

/// Words per minute over `elapsed`, rounded. Zero when no time has elapsed.
pub fn words_per_minute(chars: usize, elapsed: Duration) -> u32 {
    let minutes = elapsed.as_secs_f64() / 60.0;
    if minutes <= 0.0 {
        return 0;
    }
    ((chars as f64 / CHARS_PER_WORD) / minutes).round() as u32
}

/// Accuracy of `typed` against `reference` as a rounded percentage.
pub fn accuracy_percent(typed: &str, reference: &str) -> u32 {
    (sequence_match_ratio(typed, reference) * 100.0).round() as u32
}

/// Display score: up to 40 bonus points interpolated between 20 and 80 WPM,
/// scaled by accuracy, on top of 60.
pub fn calc_typing_score(wpm: u32, accuracy: u32) -> u8 {
    let span = WPM_CEILING - WPM_FLOOR;
    let wpm_bonus = ((wpm as f64 - WPM_FLOOR) / span * MAX_BONUS).clamp(0.0, MAX_BONUS);
    clamp_display(60.0 + wpm_bonus * (accuracy as f64 / 100.0))
}
