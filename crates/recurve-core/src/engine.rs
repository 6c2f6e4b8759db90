//! Topic Log Lifecycle
//!
//! Orchestrates the retention model over a storage collaborator:
//! - Encoding creates or re-initializes a log (idempotent re-initialization,
//!   not a graded review)
//! - Recall tests run the update rule, advance counters, and reschedule
//! - Dashboards, due queues, and decay curves are read-only views
//!
//! Every read-modify-write sequence runs behind an internal writer gate, so
//! at most one writer touches the store at a time and concurrent recall
//! submissions for the same topic cannot lose updates. Embeddings that share
//! one store across several engines must provide their own per-(user, topic,
//! kind) serialization.

use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{RetentionError, Result};
use crate::model::{
    initial_stability, next_interval, normalize_score, project_decay_curve, score_to_grade,
    update_on_grade, CurvePoint, Grade, MAX_INTERVAL_DAYS, MIN_STABILITY,
};
use crate::status::{RetentionBand, RetentionColor};
use crate::storage::TopicStore;
use crate::topic::{days_between, ReviewEvent, ReviewKind, TopicLog, TopicStatus};

// ============================================================================
// POLICY CONSTANTS
// ============================================================================

/// Encoding quality at or above this marks the first exposure as learned.
pub const LEARNED_THRESHOLD: f64 = 0.6;

/// Stability, in days, required before a topic can be mastered.
pub const MASTERY_STABILITY: f64 = 30.0;

/// Successful recalls required before a topic can be mastered.
pub const MASTERY_RECALLS: i32 = 3;

/// Default intrinsic difficulty for new topics.
pub const DEFAULT_DIFFICULTY: f64 = 5.0;

/// Word count at which the fallback answer heuristic reaches full marks.
const HEURISTIC_FULL_MARKS_WORDS: usize = 50;

// ============================================================================
// INPUTS
// ============================================================================

/// Encoding submission: first exposure (or deliberate re-encoding) of a
/// topic, already scored by the external comprehension scorer.
///
/// Uses `deny_unknown_fields` to prevent field injection attacks.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct EncodingInput {
    /// Owning learner
    pub user_id: String,
    /// Studied topic
    pub topic_id: String,
    /// Open content-kind tag
    #[serde(default = "default_topic_kind")]
    pub topic_kind: String,
    /// Optional display name
    #[serde(default)]
    pub topic_name: Option<String>,
    /// Comprehension score from the external text scorer (0-1, or a
    /// percentage above 1)
    pub comprehension_score: f64,
    /// The learner's summary text, kept verbatim on the audit event
    pub summary_text: String,
    /// Scorer feedback, kept verbatim on the audit event
    #[serde(default)]
    pub feedback: Option<String>,
}

fn default_topic_kind() -> String {
    "video".to_string()
}

impl Default for EncodingInput {
    fn default() -> Self {
        Self {
            user_id: String::new(),
            topic_id: String::new(),
            topic_kind: default_topic_kind(),
            topic_name: None,
            comprehension_score: 0.0,
            summary_text: String::new(),
            feedback: None,
        }
    }
}

/// Recall-quality signal attached to a recall submission.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RecallSignal {
    /// Raw 0-1 (or percentage) score from the external scorer
    Score(f64),
    /// Explicit 1-4 grade
    Grade(i64),
}

/// Recall test submission.
///
/// Uses `deny_unknown_fields` to prevent field injection attacks.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RecallInput {
    /// Owning learner
    pub user_id: String,
    /// Studied topic
    pub topic_id: String,
    /// The learner's answer text, kept verbatim on the audit event
    pub answer_text: String,
    /// External score or explicit grade; when absent the answer is scored
    /// by a word-count heuristic
    #[serde(default)]
    pub signal: Option<RecallSignal>,
}

impl Default for RecallInput {
    fn default() -> Self {
        Self {
            user_id: String::new(),
            topic_id: String::new(),
            answer_text: String::new(),
            signal: None,
        }
    }
}

// ============================================================================
// OUTPUTS
// ============================================================================

/// Result of an encoding submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncodingOutcome {
    /// Studied topic
    pub topic_id: String,
    /// Normalized comprehension score applied to the log
    pub comprehension_score: f64,
    /// Initial stability derived from the score
    pub stability: f64,
    /// Learned or weak_encoding
    pub status: TopicStatus,
    /// Scheduled first recall test
    pub next_due_at: DateTime<Utc>,
}

/// Result of a recall submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecallOutcome {
    /// Studied topic
    pub topic_id: String,
    /// Grade applied to the update rule
    pub grade: Grade,
    /// Normalized score, absent when an explicit grade was supplied
    pub score: Option<f64>,
    /// Revised stability
    pub new_stability: f64,
    /// Stored lifecycle status after the update
    pub status: TopicStatus,
    /// Scheduled next recall test
    pub next_due_at: DateTime<Utc>,
    /// Per-grade feedback line for the learner
    pub feedback: String,
}

/// One dashboard row.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicRetentionStatus {
    /// Studied topic
    pub topic_id: String,
    /// Display name, falling back to the topic id
    pub topic_name: String,
    /// Open content-kind tag
    pub topic_kind: String,
    /// Current stability in days
    pub stability: f64,
    /// Retrievability recomputed at dashboard time
    pub retrievability: f64,
    /// Stored lifecycle status
    pub status: TopicStatus,
    /// Display band from current retrievability
    pub band: RetentionBand,
    /// Heatmap color from current retrievability
    pub color: RetentionColor,
    /// Whole days until the next scheduled review
    pub days_until_review: i64,
    /// Scheduled next recall test
    pub next_due_at: Option<DateTime<Utc>>,
    /// Latest review of any kind
    pub last_review_at: Option<DateTime<Utc>>,
}

/// Dashboard aggregates over a user's active topics.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    /// Per-topic rows
    pub topics: Vec<TopicRetentionStatus>,
    /// Topics whose next review is due now
    pub due_today: usize,
    /// Topics in the critical or forgotten band
    pub critical_count: usize,
    /// Mean current retrievability, 0 when there are no topics
    pub average_retention: f64,
}

/// Decay-curve response for one topic.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecayCurve {
    /// Studied topic
    pub topic_id: String,
    /// Display name, falling back to the topic id
    pub topic_name: String,
    /// Stability the projection starts from
    pub stability: f64,
    /// One sample per day from day 0
    pub points: Vec<CurvePoint>,
}

// ============================================================================
// ENGINE
// ============================================================================

/// Lifecycle orchestrator over a storage collaborator.
///
/// Exclusively owns mutation of `TopicLog` memory state. Public operations
/// come in pairs: the plain form stamps `Utc::now()`, the `*_at` form takes
/// an explicit clock for deterministic embedding tests.
pub struct RetentionEngine<S> {
    store: S,
    // At most one concurrent writer: read-modify-write sequences on the
    // store must not interleave
    write_gate: Mutex<()>,
}

impl<S: TopicStore> RetentionEngine<S> {
    /// Create an engine over a store.
    pub fn new(store: S) -> Self {
        Self {
            store,
            write_gate: Mutex::new(()),
        }
    }

    /// Borrow the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    fn gate(&self) -> Result<std::sync::MutexGuard<'_, ()>> {
        self.write_gate
            .lock()
            .map_err(|_| RetentionError::Store("writer gate poisoned".to_string()))
    }

    // ========================================================================
    // ENCODING
    // ========================================================================

    /// Record a scored first exposure to a topic.
    ///
    /// Creates the log, or re-initializes an existing one: submitting the
    /// same encoding twice yields the same state as submitting it once.
    pub fn submit_encoding(&self, input: EncodingInput) -> Result<EncodingOutcome> {
        self.submit_encoding_at(input, Utc::now())
    }

    /// Clock-explicit variant of [`Self::submit_encoding`].
    pub fn submit_encoding_at(
        &self,
        input: EncodingInput,
        now: DateTime<Utc>,
    ) -> Result<EncodingOutcome> {
        let score = validate_score(input.comprehension_score)?;

        let _gate = self.gate()?;

        let existing = self
            .store
            .get(&input.user_id, &input.topic_id, &input.topic_kind)?;

        let stability = initial_stability(score);
        let next_due = now + Duration::days(next_interval(stability));
        let status = if score >= LEARNED_THRESHOLD {
            TopicStatus::Learned
        } else {
            TopicStatus::WeakEncoding
        };

        let (mut log, stability_before) = match existing {
            Some(log) => {
                let before = log.stability;
                (log, before)
            }
            None => {
                let mut log =
                    TopicLog::new(&input.user_id, &input.topic_id, &input.topic_kind, now);
                log.topic_name = input.topic_name.clone();
                log.difficulty = DEFAULT_DIFFICULTY;
                (log, 0.0)
            }
        };

        log.initial_encoding_score = Some(score);
        log.stability = stability;
        log.retrievability = 1.0;
        log.learned_at = log.learned_at.or(Some(now));
        log.last_review_at = Some(now);
        log.next_due_at = Some(next_due);
        log.status = status;
        log.updated_at = now;

        self.store.put(&log)?;
        self.store.append_event(&ReviewEvent {
            id: Uuid::new_v4().to_string(),
            topic_log_id: log.id.clone(),
            user_id: input.user_id.clone(),
            kind: ReviewKind::Encoding,
            grade: None,
            score: Some(score),
            stability_before,
            stability_after: stability,
            retrievability_at_review: 1.0,
            user_input: Some(input.summary_text),
            feedback: input.feedback,
            reviewed_at: now,
        })?;

        tracing::debug!(
            topic = %log.topic_id,
            user = %log.user_id,
            status = %status,
            stability,
            "encoded topic"
        );

        Ok(EncodingOutcome {
            topic_id: log.topic_id,
            comprehension_score: score,
            stability,
            status,
            next_due_at: next_due,
        })
    }

    // ========================================================================
    // RECALL
    // ========================================================================

    /// Record a recall test against a previously encoded topic.
    ///
    /// # Errors
    ///
    /// `NotFound` when the user has no log for the topic: recall tests
    /// presuppose a prior encoding and never create records silently.
    pub fn submit_recall(&self, input: RecallInput) -> Result<RecallOutcome> {
        self.submit_recall_at(input, Utc::now())
    }

    /// Clock-explicit variant of [`Self::submit_recall`].
    pub fn submit_recall_at(&self, input: RecallInput, now: DateTime<Utc>) -> Result<RecallOutcome> {
        let (grade, score) = match input.signal {
            Some(RecallSignal::Grade(value)) => (Grade::from_value(value), None),
            Some(RecallSignal::Score(raw)) => {
                let score = validate_score(raw)?;
                (score_to_grade(score), Some(score))
            }
            None => {
                let score = heuristic_score(&input.answer_text);
                (score_to_grade(score), Some(score))
            }
        };

        let _gate = self.gate()?;

        let mut log = self
            .store
            .find_topic(&input.user_id, &input.topic_id)?
            .ok_or_else(|| RetentionError::NotFound(input.topic_id.clone()))?;

        let days_elapsed = log
            .last_review_at
            .map(|last| days_between(last, now).max(0.0))
            .unwrap_or(0.0);

        let stability_before = log.stability;
        let update = update_on_grade(log.stability, log.difficulty, grade, days_elapsed)?;
        let next_due = now + Duration::days(next_interval(update.stability));

        log.stability = update.stability;
        log.difficulty = update.difficulty;
        log.retrievability = 1.0; // a review resets apparent memory to perfect
        log.last_recall_grade = Some(grade);
        log.last_review_at = Some(now);
        log.next_due_at = Some(next_due);
        log.total_reviews += 1;
        if grade.is_successful() {
            log.successful_recalls += 1;
        }
        log.status = if log.stability >= MASTERY_STABILITY
            && log.successful_recalls >= MASTERY_RECALLS
        {
            TopicStatus::Mastered
        } else if grade == Grade::Again {
            TopicStatus::Forgotten
        } else {
            TopicStatus::Reviewing
        };
        log.updated_at = now;

        self.store.put(&log)?;
        self.store.append_event(&ReviewEvent {
            id: Uuid::new_v4().to_string(),
            topic_log_id: log.id.clone(),
            user_id: input.user_id.clone(),
            kind: ReviewKind::RecallTest,
            grade: Some(grade),
            score,
            stability_before,
            stability_after: update.stability,
            retrievability_at_review: update.retrievability_before,
            user_input: Some(input.answer_text),
            feedback: Some(grade.feedback().to_string()),
            reviewed_at: now,
        })?;

        if log.status == TopicStatus::Mastered {
            tracing::info!(
                topic = %log.topic_id,
                user = %log.user_id,
                stability = log.stability,
                "topic mastered"
            );
        }

        Ok(RecallOutcome {
            topic_id: log.topic_id,
            grade,
            score,
            new_stability: log.stability,
            status: log.status,
            next_due_at: next_due,
            feedback: grade.feedback().to_string(),
        })
    }

    // ========================================================================
    // MANUAL OVERRIDE & ARCHIVAL
    // ========================================================================

    /// Manually set a topic's stability and reschedule it.
    ///
    /// The value is clamped into the model's working range; the override is
    /// logged as its own event kind so the audit trail stays complete.
    pub fn override_stability(&self, user_id: &str, topic_id: &str, stability: f64) -> Result<TopicLog> {
        self.override_stability_at(user_id, topic_id, stability, Utc::now())
    }

    /// Clock-explicit variant of [`Self::override_stability`].
    pub fn override_stability_at(
        &self,
        user_id: &str,
        topic_id: &str,
        stability: f64,
        now: DateTime<Utc>,
    ) -> Result<TopicLog> {
        if !stability.is_finite() || stability <= 0.0 {
            return Err(RetentionError::InvalidInput(format!(
                "override stability must be a positive finite number, got {stability}"
            )));
        }

        let _gate = self.gate()?;

        let mut log = self
            .store
            .find_topic(user_id, topic_id)?
            .ok_or_else(|| RetentionError::NotFound(topic_id.to_string()))?;

        let stability_before = log.stability;
        let retrievability_before = log.current_retrievability(now);
        log.stability = stability.clamp(MIN_STABILITY, MAX_INTERVAL_DAYS as f64);
        log.retrievability = 1.0;
        log.last_review_at = Some(now);
        log.next_due_at = Some(now + Duration::days(next_interval(log.stability)));
        log.updated_at = now;

        self.store.put(&log)?;
        self.store.append_event(&ReviewEvent {
            id: Uuid::new_v4().to_string(),
            topic_log_id: log.id.clone(),
            user_id: user_id.to_string(),
            kind: ReviewKind::ManualOverride,
            grade: None,
            score: None,
            stability_before,
            stability_after: log.stability,
            retrievability_at_review: retrievability_before,
            user_input: None,
            feedback: None,
            reviewed_at: now,
        })?;

        tracing::info!(
            topic = %log.topic_id,
            user = %log.user_id,
            from = stability_before,
            to = log.stability,
            "stability manually overridden"
        );

        Ok(log)
    }

    /// Archive or restore a topic.
    ///
    /// Inactive logs drop out of dashboards and due queues but are retained,
    /// with their events, for audit. Not a review, so no event is appended.
    pub fn set_active(&self, user_id: &str, topic_id: &str, active: bool) -> Result<TopicLog> {
        self.set_active_at(user_id, topic_id, active, Utc::now())
    }

    /// Clock-explicit variant of [`Self::set_active`].
    pub fn set_active_at(
        &self,
        user_id: &str,
        topic_id: &str,
        active: bool,
        now: DateTime<Utc>,
    ) -> Result<TopicLog> {
        let _gate = self.gate()?;

        let mut log = self
            .store
            .find_topic(user_id, topic_id)?
            .ok_or_else(|| RetentionError::NotFound(topic_id.to_string()))?;

        log.is_active = active;
        log.updated_at = now;
        self.store.put(&log)?;
        Ok(log)
    }

    // ========================================================================
    // READ-ONLY VIEWS
    // ========================================================================

    /// Retention dashboard over a user's active topics.
    pub fn get_dashboard(&self, user_id: &str) -> Result<Dashboard> {
        self.get_dashboard_at(user_id, Utc::now())
    }

    /// Clock-explicit variant of [`Self::get_dashboard`].
    pub fn get_dashboard_at(&self, user_id: &str, now: DateTime<Utc>) -> Result<Dashboard> {
        let logs = self.store.list_for_user(user_id)?;

        let mut topics = Vec::new();
        let mut due_today = 0;
        let mut critical_count = 0;
        let mut total_retention = 0.0;

        for log in logs.iter().filter(|log| log.is_active) {
            let retrievability = log.current_retrievability(now);
            let band = RetentionBand::classify(retrievability);

            if log.is_due(now) {
                due_today += 1;
            }
            if band.needs_attention() {
                critical_count += 1;
            }
            total_retention += retrievability;

            topics.push(TopicRetentionStatus {
                topic_id: log.topic_id.clone(),
                topic_name: log.display_name(),
                topic_kind: log.topic_kind.clone(),
                stability: log.stability,
                retrievability,
                status: log.status,
                band,
                color: RetentionColor::for_retention(retrievability),
                days_until_review: log.days_until_due(now),
                next_due_at: log.next_due_at,
                last_review_at: log.last_review_at,
            });
        }

        let average_retention = if topics.is_empty() {
            0.0
        } else {
            total_retention / topics.len() as f64
        };

        Ok(Dashboard {
            topics,
            due_today,
            critical_count,
            average_retention,
        })
    }

    /// Ids of active topics due for review now.
    pub fn due_topics(&self, user_id: &str) -> Result<Vec<String>> {
        self.due_topics_at(user_id, Utc::now())
    }

    /// Clock-explicit variant of [`Self::due_topics`].
    pub fn due_topics_at(&self, user_id: &str, now: DateTime<Utc>) -> Result<Vec<String>> {
        let logs = self.store.list_for_user(user_id)?;
        Ok(logs
            .into_iter()
            .filter(|log| log.is_active && log.is_due(now))
            .map(|log| log.topic_id)
            .collect())
    }

    /// Projected decay curve for one topic.
    ///
    /// # Errors
    ///
    /// `NotFound` when the user has no log for the topic.
    pub fn get_decay_curve(&self, user_id: &str, topic_id: &str, days: u32) -> Result<DecayCurve> {
        let log = self
            .store
            .find_topic(user_id, topic_id)?
            .ok_or_else(|| RetentionError::NotFound(topic_id.to_string()))?;

        Ok(DecayCurve {
            topic_id: log.topic_id.clone(),
            topic_name: log.display_name(),
            stability: log.stability,
            points: project_decay_curve(log.stability, days, &[]),
        })
    }
}

// ============================================================================
// HELPERS
// ============================================================================

/// Reject structurally invalid scores, normalize percentage-scale ones.
fn validate_score(score: f64) -> Result<f64> {
    if !score.is_finite() || score < 0.0 {
        return Err(RetentionError::InvalidInput(format!(
            "score must be a finite non-negative number, got {score}"
        )));
    }
    Ok(normalize_score(score))
}

/// Placeholder recall scorer used when no external signal is supplied.
/// Longer answers score higher, saturating at full marks.
fn heuristic_score(answer: &str) -> f64 {
    let words = answer.split_whitespace().count();
    (words as f64 / HEURISTIC_FULL_MARKS_WORDS as f64).min(1.0)
}

// ============================================================================
// TESTS
// ============================================================================
