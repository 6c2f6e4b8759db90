//! Topic Log - per-learner retention record
//!
//! One log per (user, topic, kind) tuple, tracking forgetting-curve state,
//! scoring history, and schedule. The lifecycle engine exclusively owns
//! mutation of the memory-state fields; everything else reads them or hands
//! computed values back to the engine to apply.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::{retrievability, Grade};

// ============================================================================
// TOPIC STATUS
// ============================================================================

/// Lifecycle status stored on the log for fast querying.
///
/// Always re-derivable from the numeric state and review history; there is
/// no terminal state, mastered and forgotten both return to reviewing on the
/// next event.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TopicStatus {
    /// Created but not yet encoded
    #[default]
    New,
    /// First encoding scored at or above the learned threshold
    Learned,
    /// First encoding scored below the learned threshold
    WeakEncoding,
    /// In the regular review cycle
    Reviewing,
    /// Last recall failed outright
    Forgotten,
    /// High stability with a track record of successful recalls
    Mastered,
}

impl TopicStatus {
    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            TopicStatus::New => "new",
            TopicStatus::Learned => "learned",
            TopicStatus::WeakEncoding => "weak_encoding",
            TopicStatus::Reviewing => "reviewing",
            TopicStatus::Forgotten => "forgotten",
            TopicStatus::Mastered => "mastered",
        }
    }

    /// Parse from string name
    pub fn parse_name(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "learned" => TopicStatus::Learned,
            "weak_encoding" => TopicStatus::WeakEncoding,
            "reviewing" => TopicStatus::Reviewing,
            "forgotten" => TopicStatus::Forgotten,
            "mastered" => TopicStatus::Mastered,
            _ => TopicStatus::New,
        }
    }
}

impl std::fmt::Display for TopicStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// TOPIC LOG
// ============================================================================

/// Per-user retention record for a single studied topic.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicLog {
    /// Unique identifier (UUID v4)
    pub id: String,
    /// Owning learner
    pub user_id: String,
    /// Studied topic
    pub topic_id: String,
    /// Open content-kind tag, e.g. "video" or "lesson"
    pub topic_kind: String,
    /// Optional display name
    pub topic_name: Option<String>,

    // ========== Memory state ==========
    /// Days until retrievability decays to the target threshold
    pub stability: f64,
    /// Intrinsic hardness on the 1-10 scale
    pub difficulty: f64,
    /// Recall probability as of the last computed snapshot
    pub retrievability: f64,

    // ========== Scoring history ==========
    /// Comprehension score from the latest graded encoding
    pub initial_encoding_score: Option<f64>,
    /// Grade from the latest recall test
    pub last_recall_grade: Option<Grade>,
    /// Number of recall tests taken
    pub total_reviews: i32,
    /// Recall tests graded Good or better
    pub successful_recalls: i32,

    // ========== Timestamps ==========
    /// First successful encoding
    pub learned_at: Option<DateTime<Utc>>,
    /// Latest review of any kind
    pub last_review_at: Option<DateTime<Utc>>,
    /// Scheduled next recall test
    pub next_due_at: Option<DateTime<Utc>>,
    /// When the log was created
    pub created_at: DateTime<Utc>,
    /// When the log was last modified
    pub updated_at: DateTime<Utc>,

    // ========== Classification ==========
    /// Stored lifecycle status
    pub status: TopicStatus,
    /// Inactive logs are kept for audit but excluded from dashboards
    pub is_active: bool,
}

impl TopicLog {
    /// Create a fresh, not-yet-encoded log.
    pub fn new(
        user_id: impl Into<String>,
        topic_id: impl Into<String>,
        topic_kind: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.into(),
            topic_id: topic_id.into(),
            topic_kind: topic_kind.into(),
            topic_name: None,
            stability: 1.0,
            difficulty: 5.0,
            retrievability: 1.0,
            initial_encoding_score: None,
            last_recall_grade: None,
            total_reviews: 0,
            successful_recalls: 0,
            learned_at: None,
            last_review_at: None,
            next_due_at: None,
            created_at: now,
            updated_at: now,
            status: TopicStatus::New,
            is_active: true,
        }
    }

    /// Recall probability right now, recomputed from elapsed time.
    ///
    /// Returns `0.0` when the topic was never reviewed; the stored
    /// `retrievability` snapshot is not consulted.
    pub fn current_retrievability(&self, now: DateTime<Utc>) -> f64 {
        let Some(last_review) = self.last_review_at else {
            return 0.0;
        };
        retrievability(self.stability, days_between(last_review, now))
    }

    /// Whole days until the next scheduled review, floored at zero.
    pub fn days_until_due(&self, now: DateTime<Utc>) -> i64 {
        self.next_due_at
            .map(|due| (due - now).num_days().max(0))
            .unwrap_or(0)
    }

    /// Whether the topic is due for a recall test.
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.next_due_at.map(|due| due <= now).unwrap_or(true)
    }

    /// Display name, falling back to the topic id.
    pub fn display_name(&self) -> String {
        self.topic_name
            .clone()
            .unwrap_or_else(|| format!("Topic {}", self.topic_id))
    }
}

/// Fractional days between two instants.
pub fn days_between(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    (to - from).num_seconds() as f64 / 86_400.0
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_status_roundtrip() {
        for status in [
            TopicStatus::New,
            TopicStatus::Learned,
            TopicStatus::WeakEncoding,
            TopicStatus::Reviewing,
            TopicStatus::Forgotten,
            TopicStatus::Mastered,
        ] {
            assert_eq!(TopicStatus::parse_name(status.as_str()), status);
        }
        assert_eq!(TopicStatus::parse_name("garbage"), TopicStatus::New);
    }

    #[test]
    fn test_new_log_defaults() {
        let now = Utc::now();
        let log = TopicLog::new("u1", "t1", "video", now);

        assert_eq!(log.status, TopicStatus::New);
        assert!(log.is_active);
        assert_eq!(log.total_reviews, 0);
        assert!(log.is_due(now));
        assert_eq!(log.current_retrievability(now), 0.0);
    }

    #[test]
    fn test_current_retrievability_decays() {
        let now = Utc::now();
        let mut log = TopicLog::new("u1", "t1", "video", now);
        log.stability = 2.0;
        log.last_review_at = Some(now - Duration::days(2));

        let r = log.current_retrievability(now);
        assert!((r - (-1.0f64).exp()).abs() < 1e-6);
    }

    #[test]
    fn test_due_accounting() {
        let now = Utc::now();
        let mut log = TopicLog::new("u1", "t1", "video", now);

        log.next_due_at = Some(now + Duration::days(3));
        assert!(!log.is_due(now));
        assert_eq!(log.days_until_due(now), 3);

        // Partial days truncate toward zero
        log.next_due_at = Some(now + Duration::hours(60));
        assert_eq!(log.days_until_due(now), 2);

        log.next_due_at = Some(now - Duration::hours(1));
        assert!(log.is_due(now));
        assert_eq!(log.days_until_due(now), 0);
    }

    #[test]
    fn test_serde_roundtrip_preserves_state() {
        let now = Utc::now();
        let mut log = TopicLog::new("u1", "t1", "video", now);
        log.stability = 4.655142857;
        log.difficulty = 4.7;
        log.last_recall_grade = Some(Grade::Easy);

        let json = serde_json::to_string(&log).unwrap();
        let back: TopicLog = serde_json::from_str(&json).unwrap();

        // Floats must round-trip exactly; the decay exponentials are
        // sensitive to truncation near the interval caps
        assert_eq!(back.stability, log.stability);
        assert_eq!(back.difficulty, log.difficulty);
        assert_eq!(back.last_recall_grade, Some(Grade::Easy));
        assert!(json.contains("\"topicKind\":\"video\""));
    }
}
