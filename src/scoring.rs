//! Scoring for successive matches.
//!
//! Every match in a combo chain is worth more than the last: the base score
//! is multiplied by `COMBO_MULTIPLIER` once per match beyond the first.

use crate::config::COMBO_MULTIPLIER;

/// Combo value after the idle window expires.
pub const COMBO_RESET_VALUE: u32 = 0;

/// Points awarded for a match at position `combo` in a chain.
///
/// `combo` counts the current match, so the first match of a chain is `1`.
/// A combo of 0 or 1 applies no multiplier. `time_bonus` is added before
/// flooring to an integer. Awards past `u64::MAX` saturate.
///
/// # Examples
/// ```
/// use tilelink::scoring::calculate_score;
/// assert_eq!(calculate_score(10, 1, 0), 10);
/// assert_eq!(calculate_score(10, 2, 0), 15);
/// assert_eq!(calculate_score(10, 3, 0), 22);
/// ```
pub fn calculate_score(base: u32, combo: u32, time_bonus: u32) -> u64 {
    let multiplier = if combo > 1 {
        COMBO_MULTIPLIER.powi((combo - 1) as i32)
    } else {
        1.0
    };
    let points = (base as f64 * multiplier + time_bonus as f64).floor();
    if points >= u64::MAX as f64 {
        u64::MAX
    } else {
        points as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_combo_scores_base() {
        assert_eq!(calculate_score(10, 0, 0), 10);
        assert_eq!(calculate_score(10, 1, 0), 10);
    }

    #[test]
    fn test_combo_multiplier_grows_geometrically() {
        assert_eq!(calculate_score(10, 2, 0), 15);
        assert_eq!(calculate_score(10, 3, 0), 22);
        assert_eq!(calculate_score(10, 4, 0), 33);
        assert_eq!(calculate_score(10, 5, 0), 50);
    }

    #[test]
    fn test_time_bonus_is_added_before_flooring() {
        assert_eq!(calculate_score(10, 1, 5), 15);
        assert_eq!(calculate_score(10, 3, 1), 23);
    }

    #[test]
    fn test_huge_combo_saturates() {
        assert_eq!(calculate_score(10, 200, 0), u64::MAX);
    }

    #[test]
    fn test_long_chain_award_exceeds_u32() {
        // The 60th match of a chain, the most a hard board can hold.
        let award = calculate_score(10, 60, 0);
        assert!(award > u64::from(u32::MAX));
        assert!(award < u64::MAX);
    }
}
