use lastos_core::scoring::linear_display;

/// Display score for a run: 0 hits is 60, `hits_for_max` or more is 100,
/// with the bonus floored in between.
pub fn calc_score(hits: u32, hits_for_max: u32) -> u8 {
    linear_display(hits as f64, hits_for_max.max(1) as f64)
}
