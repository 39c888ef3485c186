/// Lowest score shown to a player, even for a run with no progress.
pub const MIN_DISPLAY_SCORE: u8 = 60;
/// Highest score shown to a player.
pub const MAX_DISPLAY_SCORE: u8 = 100;

/// Clamp an already-derived score into the display range and round it.
///
/// Non-finite input (NaN) maps to the floor.
pub fn clamp_display(score: f64) -> u8 {
    if score.is_nan() {
        return MIN_DISPLAY_SCORE;
    }
    score
        .round()
        .clamp(MIN_DISPLAY_SCORE as f64, MAX_DISPLAY_SCORE as f64) as u8
}

/// Map a raw metric linearly onto the display range: `raw_for_max` earns the
/// full 40 bonus points. The bonus is floored before clamping.
pub fn linear_display(raw: f64, raw_for_max: f64) -> u8 {
    let span = (MAX_DISPLAY_SCORE - MIN_DISPLAY_SCORE) as f64;
    let bonus = (raw / raw_for_max) * span;
    clamp_display(MIN_DISPLAY_SCORE as f64 + bonus.floor())
}

/// `60 + raw * per_step`, saturating and clamped. Used by the games whose
/// raw accumulator maps to whole points (word recall, memory level).
pub fn stepped_display(raw: i64, per_step: i64) -> u8 {
    let score = (MIN_DISPLAY_SCORE as i64).saturating_add(raw.saturating_mul(per_step));
    score.clamp(MIN_DISPLAY_SCORE as i64, MAX_DISPLAY_SCORE as i64) as u8
}
