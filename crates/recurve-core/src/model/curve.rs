//! Forgetting-curve primitives.
//!
//! Retrievability follows an exponential decay over elapsed days,
//! parameterized by a single stability value. The inverse solves for the
//! interval after which retrievability crosses a target threshold.

// ============================================================================
// POLICY CONSTANTS
// ============================================================================

/// Review scheduling targets this retention level by default.
pub const TARGET_RETENTION: f64 = 0.9;

/// Reviews are never scheduled more than a year out.
pub const MAX_INTERVAL_DAYS: i64 = 365;

/// Shortest allowed review interval.
pub const MIN_INTERVAL_DAYS: i64 = 1;

// ============================================================================
// DECAY FUNCTIONS
// ============================================================================

/// Current recall probability after `days_elapsed` days without review.
///
/// Forgetting curve: `R(t) = e^(-t/S)`.
///
/// Returns `0.0` for non-positive stability, negative elapsed time, or
/// non-finite inputs rather than letting NaN escape into scheduling.
pub fn retrievability(stability: f64, days_elapsed: f64) -> f64 {
    if !stability.is_finite() || !days_elapsed.is_finite() {
        return 0.0;
    }
    if stability <= 0.0 || days_elapsed < 0.0 {
        return 0.0;
    }
    (-days_elapsed / stability).exp()
}

/// Days until retrievability decays to [`TARGET_RETENTION`].
pub fn next_interval(stability: f64) -> i64 {
    next_interval_with_retention(stability, TARGET_RETENTION)
}

/// Days until retrievability decays to `target_retention`.
///
/// Solves `target = e^(-t/S)` for `t = -S * ln(target)`, truncated to whole
/// days and clamped to `[MIN_INTERVAL_DAYS, MAX_INTERVAL_DAYS]`.
pub fn next_interval_with_retention(stability: f64, target_retention: f64) -> i64 {
    if !stability.is_finite() || stability <= 0.0 {
        return MIN_INTERVAL_DAYS;
    }
    let interval = (-stability * target_retention.ln()) as i64;
    interval.clamp(MIN_INTERVAL_DAYS, MAX_INTERVAL_DAYS)
}

// ============================================================================
// TESTS
// ============================================================================
