//! Decay-curve projection for visualization.

use serde::{Deserialize, Serialize};

use super::curve::retrievability;

// ============================================================================
// CURVE TYPES
// ============================================================================

/// A single day's sample on a projected decay curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurvePoint {
    /// Days from now (day 0 = the moment of projection)
    pub day: u32,
    /// Projected recall probability at that day
    pub retention: f64,
    /// Whether a scheduled review resets the curve at this day
    pub reviewed: bool,
}

/// A hypothetical future review used to shape a projection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ScheduledReview {
    /// Day offset at which the review happens
    pub day: u32,
    /// Stability the review is assumed to produce
    pub stability: f64,
}

// ============================================================================
// PROJECTION
// ============================================================================

/// Project retrievability over `0..=days`.
///
/// A scheduled review resets the working stability and pins that day's
/// sample to full retention; subsequent days decay from the new stability.
/// When two reviews land on the same day, the last one in input order wins.
/// Elapsed time is measured from day 0 throughout, so the curve shows
/// apparent retention relative to the projection start.
///
/// With no scheduled reviews this is pure decay from the given stability.
pub fn project_decay_curve(
    stability: f64,
    days: u32,
    reviews: &[ScheduledReview],
) -> Vec<CurvePoint> {
    let mut points = Vec::with_capacity(days as usize + 1);
    let mut current_stability = stability;

    for day in 0..=days {
        let mut reviewed = false;
        for review in reviews {
            if review.day == day {
                current_stability = review.stability;
                reviewed = true;
            }
        }

        let retention = if reviewed {
            1.0
        } else {
            retrievability(current_stability, f64::from(day))
        };
        points.push(CurvePoint {
            day,
            retention,
            reviewed,
        });
    }

    points
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pure_decay_curve() {
        let points = project_decay_curve(2.0, 5, &[]);

        assert_eq!(points.len(), 6);
        assert_eq!(points[0].retention, 1.0);
        assert!(!points[0].reviewed);
        for pair in points.windows(2) {
            assert!(pair[0].retention >= pair[1].retention);
        }
        assert!((points[2].retention - (-1.0f64).exp()).abs() < 1e-9);
    }

    #[test]
    fn test_review_resets_curve() {
        let points = project_decay_curve(2.0, 5, &[ScheduledReview { day: 3, stability: 4.0 }]);

        assert_eq!(points[3], CurvePoint { day: 3, retention: 1.0, reviewed: true });
        // Day 4 decays from the reset stability, not the starting one
        assert!((points[4].retention - (-4.0f64 / 4.0).exp()).abs() < 1e-9);
        assert!(!points[4].reviewed);
    }

    #[test]
    fn test_same_day_reviews_last_wins() {
        let reviews = [
            ScheduledReview { day: 2, stability: 3.0 },
            ScheduledReview { day: 2, stability: 8.0 },
        ];
        let points = project_decay_curve(2.0, 4, &reviews);

        assert_eq!(points[2].retention, 1.0);
        assert!(points[2].reviewed);
        // The later event's stability shapes the rest of the curve
        assert!((points[3].retention - (-3.0f64 / 8.0).exp()).abs() < 1e-9);
    }

    #[test]
    fn test_multiple_reviews_on_distinct_days() {
        let reviews = [
            ScheduledReview { day: 1, stability: 3.0 },
            ScheduledReview { day: 4, stability: 6.0 },
        ];
        let points = project_decay_curve(1.0, 6, &reviews);

        assert!(points[1].reviewed);
        assert!(points[4].reviewed);
        assert!((points[2].retention - (-2.0f64 / 3.0).exp()).abs() < 1e-9);
        assert!((points[5].retention - (-5.0f64 / 6.0).exp()).abs() < 1e-9);
    }

    #[test]
    fn test_zero_day_projection() {
        let points = project_decay_curve(2.0, 0, &[]);
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].retention, 1.0);
    }
}
