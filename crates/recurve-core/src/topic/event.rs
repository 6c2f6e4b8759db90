//! Review Events - append-only audit trail.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::Grade;

// ============================================================================
// REVIEW KIND
// ============================================================================

/// What kind of touch produced a review event.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewKind {
    /// First exposure (or deliberate re-encoding), scored for comprehension
    Encoding,
    /// A graded recall test
    RecallTest,
    /// Manual schedule override
    ManualOverride,
}

impl ReviewKind {
    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewKind::Encoding => "encoding",
            ReviewKind::RecallTest => "recall_test",
            ReviewKind::ManualOverride => "manual_override",
        }
    }
}

impl std::fmt::Display for ReviewKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// REVIEW EVENT
// ============================================================================

/// Immutable record of one touch of a topic log.
///
/// Never updated or deleted by normal operation. The stream of events is the
/// audit trail from which a log's status and aggregate counters can be
/// reconstructed if the log itself were lost.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewEvent {
    /// Unique identifier (UUID v4)
    pub id: String,
    /// The log this event touched
    pub topic_log_id: String,
    /// Owning learner
    pub user_id: String,
    /// What produced this event
    pub kind: ReviewKind,
    /// Recall grade, absent for encodings and overrides
    pub grade: Option<Grade>,
    /// Raw 0-1 score, absent when only a grade was supplied
    pub score: Option<f64>,
    /// Stability before the event was applied
    pub stability_before: f64,
    /// Stability after the event was applied
    pub stability_after: f64,
    /// Retrievability computed just before this event updated the state
    pub retrievability_at_review: f64,
    /// Learner's summary or answer text, opaque to the engine
    pub user_input: Option<String>,
    /// Scorer or grade feedback text, opaque to the engine
    pub feedback: Option<String>,
    /// When the event happened
    pub reviewed_at: DateTime<Utc>,
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_serde_names() {
        assert_eq!(
            serde_json::to_string(&ReviewKind::RecallTest).unwrap(),
            "\"recall_test\""
        );
        let kind: ReviewKind = serde_json::from_str("\"manual_override\"").unwrap();
        assert_eq!(kind, ReviewKind::ManualOverride);
    }

    #[test]
    fn test_event_roundtrip() {
        let event = ReviewEvent {
            id: "e1".to_string(),
            topic_log_id: "l1".to_string(),
            user_id: "u1".to_string(),
            kind: ReviewKind::RecallTest,
            grade: Some(Grade::Good),
            score: Some(0.72),
            stability_before: 1.85,
            stability_after: 4.655142,
            retrievability_at_review: 0.339215,
            user_input: Some("the light reactions split water".to_string()),
            feedback: None,
            reviewed_at: Utc::now(),
        };

        let json = serde_json::to_string(&event).unwrap();
        let back: ReviewEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back.stability_after, event.stability_after);
        assert_eq!(back.retrievability_at_review, event.retrievability_at_review);
        assert_eq!(back.grade, Some(Grade::Good));
    }
}
