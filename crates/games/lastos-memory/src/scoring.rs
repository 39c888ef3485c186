use lastos_core::scoring::stepped_display;

/// Display score for the level reached: `60 + points_per_level * level`, clamped.
pub fn calc_score(level: u32, points_per_level: i64) -> u8 {
    stepped_display(level as i64, points_per_level)
}
