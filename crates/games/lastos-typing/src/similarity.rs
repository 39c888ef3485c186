/// How far either side of position `i` an unmatched character may drift.
pub const DRIFT_WINDOW: usize = 5;

/// Approximate similarity of two strings in [0, 1], tolerant of local drift.
///
/// Greedy and linear: each character of the shorter string claims either the
/// same position in the longer string or the first unclaimed equal character
/// within [`DRIFT_WINDOW`] positions. The ratio is `2 * matches / (len_a + len_b)`.
///
/// Strings of equal length are ordered lexicographically to pick the
/// "shorter" side, which makes the ratio symmetric.
pub fn sequence_match_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    match (a.is_empty(), b.is_empty()) {
        (true, true) => return 1.0,
        (true, false) | (false, true) => return 0.0,
        (false, false) => {},
    }

    let (shorter, longer) = if (a.len(), &a) <= (b.len(), &b) {
        (&a, &b)
    } else {
        (&b, &a)
    };
    let matches = greedy_matches(shorter, longer);
    (2 * matches) as f64 / (a.len() + b.len()) as f64
}

fn greedy_matches(shorter: &[char], longer: &[char]) -> usize {
    let mut claimed = vec![false; longer.len()];
    let mut matches = 0;
    for (i, &ch) in shorter.iter().enumerate() {
        if i < longer.len() && !claimed[i] && longer[i] == ch {
            claimed[i] = true;
            matches += 1;
            continue;
        }
        let lo = i.saturating_sub(DRIFT_WINDOW);
        let hi = longer.len().min(i + DRIFT_WINDOW + 1);
        if let Some(j) = (lo..hi).find(|&j| !claimed[j] && longer[j] == ch) {
            claimed[j] = true;
            matches += 1;
        }
    }
    matches
}
