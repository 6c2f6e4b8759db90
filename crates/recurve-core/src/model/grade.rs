//! Recall grades and score conversions.

use serde::{Deserialize, Serialize};

/// Base stability, in days, for a freshly encoded topic.
pub const BASE_STABILITY: f64 = 1.0;

// ============================================================================
// GRADE
// ============================================================================

/// Recall quality reported for a review.
///
/// The four-point scale drives the stability update: `Again` is a failed
/// recall, `Easy` a perfect one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Grade {
    /// Failed to recall
    Again = 1,
    /// Recalled with significant difficulty
    Hard = 2,
    /// Recalled correctly
    Good = 3,
    /// Recalled perfectly
    Easy = 4,
}

impl Grade {
    /// Numeric value on the 1-4 scale.
    pub fn value(self) -> u8 {
        self as u8
    }

    /// Parse a numeric grade.
    ///
    /// Out-of-range values degrade to `Good` instead of failing, so one
    /// malformed upstream signal can never take down a scheduling update.
    pub fn from_value(value: i64) -> Self {
        match value {
            1 => Grade::Again,
            2 => Grade::Hard,
            3 => Grade::Good,
            4 => Grade::Easy,
            _ => {
                tracing::warn!(grade = value, "out-of-range grade, defaulting to Good");
                Grade::Good
            }
        }
    }

    /// Stability multiplier applied by the update rule.
    pub(crate) fn multiplier(self) -> f64 {
        match self {
            Grade::Again => 0.2,
            Grade::Hard => 1.2,
            Grade::Good => 2.5,
            Grade::Easy => 3.5,
        }
    }

    /// A grade of Good or better counts as a successful recall.
    pub fn is_successful(self) -> bool {
        matches!(self, Grade::Good | Grade::Easy)
    }

    /// Feedback line shown to the learner after a graded recall.
    pub fn feedback(self) -> &'static str {
        match self {
            Grade::Again => "Don't worry! Review the material again and try the test tomorrow.",
            Grade::Hard => "Good effort! You recalled most of it. A quick review will help.",
            Grade::Good => "Great job! Your memory is solidifying. Keep it up!",
            Grade::Easy => "Excellent! Perfect recall. This topic is becoming mastered!",
        }
    }

    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::Again => "again",
            Grade::Hard => "hard",
            Grade::Good => "good",
            Grade::Easy => "easy",
        }
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// SCORE CONVERSIONS
// ============================================================================

/// Normalize a score to the unit interval's scale.
///
/// Scores above 1 are treated as percentages and divided by 100.
pub fn normalize_score(score: f64) -> f64 {
    if score > 1.0 {
        score / 100.0
    } else {
        score
    }
}

/// Convert a comprehension or recall score to a discrete grade.
///
/// Bands: `< 0.4` Again, `< 0.6` Hard, `< 0.85` Good, otherwise Easy.
/// Exactly 0.4 is Hard, exactly 0.6 is Good, exactly 0.85 is Easy.
/// Non-finite scores grade as Again.
pub fn score_to_grade(score: f64) -> Grade {
    if !score.is_finite() {
        tracing::warn!("non-finite score, grading as Again");
        return Grade::Again;
    }
    let score = normalize_score(score);

    if score < 0.4 {
        Grade::Again
    } else if score < 0.6 {
        Grade::Hard
    } else if score < 0.85 {
        Grade::Good
    } else {
        Grade::Easy
    }
}

/// Initial stability for a first encoding, from [`BASE_STABILITY`].
pub fn initial_stability(encoding_score: f64) -> f64 {
    initial_stability_with_base(encoding_score, BASE_STABILITY)
}

/// Initial stability for a first encoding, from an explicit base.
///
/// Better comprehension earns a longer first interval: scores in `[0, 1]`
/// scale the base by `0.5 + score * 1.5`, so the multiplier ranges from
/// half the base up to twice it. Non-positive or non-finite scores get the
/// floor.
pub fn initial_stability_with_base(encoding_score: f64, base: f64) -> f64 {
    if !encoding_score.is_finite() || encoding_score <= 0.0 {
        return base * 0.5;
    }
    let multiplier = 0.5 + encoding_score * 1.5;
    base * multiplier
}

// ============================================================================
// TESTS
// ============================================================================
