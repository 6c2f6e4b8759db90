//! Grade-driven stability and difficulty updates.

use crate::error::{RetentionError, Result};

use super::curve::{retrievability, MAX_INTERVAL_DAYS};
use super::grade::Grade;

// ============================================================================
// POLICY CONSTANTS
// ============================================================================

/// Stability never collapses below this floor, in days.
pub const MIN_STABILITY: f64 = 0.5;

/// Easiest difficulty on the 1-10 scale.
pub const MIN_DIFFICULTY: f64 = 1.0;

/// Hardest difficulty on the 1-10 scale.
pub const MAX_DIFFICULTY: f64 = 10.0;

/// Below this pre-review retrievability the update earns a rescue bonus.
pub const LOW_RETENTION_THRESHOLD: f64 = 0.8;

/// Weight of the rescue bonus.
pub const LOW_RETENTION_WEIGHT: f64 = 0.3;

// ============================================================================
// UPDATE RULE
// ============================================================================

/// Result of applying a recall grade to the memory state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StabilityUpdate {
    /// Revised stability, in days
    pub stability: f64,
    /// Revised difficulty, clamped to the 1-10 scale
    pub difficulty: f64,
    /// Retrievability computed just before the update was applied
    pub retrievability_before: f64,
}

/// Apply a recall grade to the current memory state.
///
/// - `Again` resets stability hard toward the floor, ignoring difficulty,
///   and bumps difficulty up.
/// - Passing grades multiply stability by the grade's factor scaled by a
///   difficulty modifier in `[0.1, 1.0]`. Reviewing a topic that has already
///   decayed below [`LOW_RETENTION_THRESHOLD`] earns an extra rescue bonus:
///   saving a nearly forgotten topic is rewarded more than reviewing just in
///   time.
/// - `Easy` also nudges difficulty down.
///
/// Stability is capped at the one-year interval limit. Grade-shaped noise is
/// handled upstream by [`Grade::from_value`]; corrupted numeric state here
/// means a caller bypassed the lifecycle, so it is rejected rather than
/// clamped.
///
/// # Errors
///
/// `InvalidInput` when stability is non-positive or non-finite, difficulty is
/// non-finite, or elapsed days are negative or non-finite.
pub fn update_on_grade(
    stability: f64,
    difficulty: f64,
    grade: Grade,
    days_elapsed: f64,
) -> Result<StabilityUpdate> {
    if !stability.is_finite() || stability <= 0.0 {
        return Err(RetentionError::InvalidInput(format!(
            "stability must be a positive finite number, got {stability}"
        )));
    }
    if !difficulty.is_finite() {
        return Err(RetentionError::InvalidInput(format!(
            "difficulty must be finite, got {difficulty}"
        )));
    }
    if !days_elapsed.is_finite() || days_elapsed < 0.0 {
        return Err(RetentionError::InvalidInput(format!(
            "days_elapsed must be non-negative and finite, got {days_elapsed}"
        )));
    }

    let difficulty = difficulty.clamp(MIN_DIFFICULTY, MAX_DIFFICULTY);
    let retrievability_before = retrievability(stability, days_elapsed);

    let (new_stability, new_difficulty) = if grade == Grade::Again {
        // Hard reset toward the floor; difficulty does not soften the lapse
        let reset = (stability * grade.multiplier()).max(MIN_STABILITY);
        (reset, (difficulty + 0.5).min(MAX_DIFFICULTY))
    } else {
        let mut multiplier = grade.multiplier();
        if retrievability_before < LOW_RETENTION_THRESHOLD {
            multiplier *= 1.0 + (1.0 - retrievability_before) * LOW_RETENTION_WEIGHT;
        }
        let difficulty_modifier = (11.0 - difficulty) / 10.0;
        let grown = stability * multiplier * difficulty_modifier;

        let next_difficulty = if grade == Grade::Easy {
            (difficulty - 0.3).max(MIN_DIFFICULTY)
        } else {
            difficulty
        };
        (grown, next_difficulty)
    };

    Ok(StabilityUpdate {
        stability: new_stability.min(MAX_INTERVAL_DAYS as f64),
        difficulty: new_difficulty,
        retrievability_before,
    })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_encoding_then_easy_recall_walkthrough() {
        // New topic encoded at 0.9 -> stability 1.85; Easy recall 2 days later
        let update = update_on_grade(1.85, 5.0, Grade::Easy, 2.0).unwrap();

        // R = e^(-2/1.85) ~= 0.333, below 0.8, so the rescue bonus applies:
        // 1.85 * (3.5 * (1 + 0.667 * 0.3)) * 0.6 ~= 4.66
        assert!((update.retrievability_before - 0.333).abs() < 1e-3);
        assert!((update.stability - 4.66).abs() < 0.01, "got {}", update.stability);
        assert!((update.difficulty - 4.7).abs() < 1e-9);
    }

    #[test]
    fn test_again_resets_toward_floor() {
        let update = update_on_grade(10.0, 5.0, Grade::Again, 3.0).unwrap();
        assert!((update.stability - 2.0).abs() < 1e-9);
        assert!((update.difficulty - 5.5).abs() < 1e-9);

        // Small stability bottoms out at the floor
        let update = update_on_grade(1.0, 5.0, Grade::Again, 3.0).unwrap();
        assert_eq!(update.stability, MIN_STABILITY);
    }

    #[test]
    fn test_no_rescue_bonus_at_threshold() {
        // Elapsed time chosen so R is exactly at the 0.8 threshold:
        // t = -S * ln(0.8)
        let stability = 10.0;
        let at_threshold = -stability * LOW_RETENTION_THRESHOLD.ln();
        let update = update_on_grade(stability, 5.0, Grade::Good, at_threshold).unwrap();

        // No bonus: 10.0 * 2.5 * 0.6 = 15.0
        assert!((update.stability - 15.0).abs() < 1e-6, "got {}", update.stability);
    }

    #[test]
    fn test_difficulty_clamps_at_extremes() {
        // Again at maximum difficulty stays at 10
        let update = update_on_grade(5.0, 10.0, Grade::Again, 1.0).unwrap();
        assert_eq!(update.difficulty, MAX_DIFFICULTY);

        // Easy at minimum difficulty stays at 1
        let update = update_on_grade(5.0, 1.0, Grade::Easy, 1.0).unwrap();
        assert_eq!(update.difficulty, MIN_DIFFICULTY);
    }

    #[test]
    fn test_stability_caps_at_max_interval() {
        let update = update_on_grade(300.0, 1.0, Grade::Easy, 100.0).unwrap();
        assert_eq!(update.stability, MAX_INTERVAL_DAYS as f64);
    }

    #[test]
    fn test_out_of_range_difficulty_is_clamped_in() {
        // A caller handing in difficulty 0 gets the same result as 1
        let from_zero = update_on_grade(5.0, 0.0, Grade::Good, 1.0).unwrap();
        let from_one = update_on_grade(5.0, 1.0, Grade::Good, 1.0).unwrap();
        assert_eq!(from_zero.stability, from_one.stability);
    }

    #[test]
    fn test_corrupted_state_is_rejected() {
        assert!(update_on_grade(0.0, 5.0, Grade::Good, 1.0).is_err());
        assert!(update_on_grade(-1.0, 5.0, Grade::Good, 1.0).is_err());
        assert!(update_on_grade(f64::NAN, 5.0, Grade::Good, 1.0).is_err());
        assert!(update_on_grade(5.0, f64::NAN, Grade::Good, 1.0).is_err());
        assert!(update_on_grade(5.0, 5.0, Grade::Good, -1.0).is_err());
        assert!(update_on_grade(5.0, 5.0, Grade::Good, f64::INFINITY).is_err());
    }

    proptest! {
        #[test]
        fn prop_again_never_grows_stability(
            stability in MIN_STABILITY..365.0,
            difficulty in 1.0f64..10.0,
            days in 0.0f64..365.0,
        ) {
            let update = update_on_grade(stability, difficulty, Grade::Again, days).unwrap();
            prop_assert!(update.stability <= stability);
            prop_assert!(update.stability >= MIN_STABILITY);
        }

        #[test]
        fn prop_difficulty_stays_in_bounds(
            stability in MIN_STABILITY..365.0,
            difficulty in 1.0f64..10.0,
            days in 0.0f64..365.0,
            grade_value in 1i64..=4,
        ) {
            let grade = Grade::from_value(grade_value);
            let update = update_on_grade(stability, difficulty, grade, days).unwrap();
            prop_assert!(update.difficulty >= MIN_DIFFICULTY);
            prop_assert!(update.difficulty <= MAX_DIFFICULTY);
            prop_assert!(update.stability > 0.0);
            prop_assert!(update.stability <= MAX_INTERVAL_DAYS as f64);
        }
    }
}
