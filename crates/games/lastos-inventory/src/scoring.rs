use lastos_core::scoring::stepped_display;

/// Display score: one point per correct answer on top of 60, clamped.
pub fn calc_score(correct: u32) -> u8 {
    stepped_display(correct as i64, 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_point_per_answer() {
        assert_eq!(calc_score(0), 60);
        assert_eq!(calc_score(17), 77);
        assert_eq!(calc_score(40), 100);
        assert_eq!(calc_score(u32::MAX), 100);
    }
}
