//! Integrity score: `max(0, 100 − 10×|actual−expected| − 15×corrupted)`.

use vigil_core::constants::{COUNT_MISMATCH_PENALTY, CORRUPTION_PENALTY};

pub const MAX_SCORE: u32 = 100;

pub fn integrity_score(expected: usize, actual: usize, corrupted: usize) -> u32 {
    let diff = expected.abs_diff(actual) as u64;
    let penalty = diff
        .saturating_mul(u64::from(COUNT_MISMATCH_PENALTY))
        .saturating_add((corrupted as u64).saturating_mul(u64::from(CORRUPTION_PENALTY)));
    u64::from(MAX_SCORE).saturating_sub(penalty) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perfect_match_scores_100() {
        assert_eq!(integrity_score(10, 10, 0), 100);
        assert_eq!(integrity_score(0, 0, 0), 100);
    }

    #[test]
    fn penalties_apply_and_floor_at_zero() {
        assert_eq!(integrity_score(10, 8, 0), 80);
        assert_eq!(integrity_score(10, 10, 2), 70);
        assert_eq!(integrity_score(10, 9, 1), 75);
        assert_eq!(integrity_score(100, 0, 0), 0);
        assert_eq!(integrity_score(usize::MAX, 0, usize::MAX), 0);
    }
}
