//! # Recurve Core
//!
//! Forgetting-curve retention engine for learning systems. Tracks a decaying
//! retrievability value for every topic a learner studies and schedules
//! recall tests so long-term retention stays above a target threshold with
//! minimal review effort.
//!
//! - **Decay model**: retrievability R(t) = e^(-t/S) with stability S in days
//! - **Update rule**: four-point recall grades (Again/Hard/Good/Easy) revise
//!   stability and difficulty after every test
//! - **Lifecycle**: encoding -> review cycle -> mastered/forgotten, with an
//!   append-only event log as the audit trail
//! - **Views**: status bands, dashboard aggregates, decay-curve projection
//!
//! The engine performs no I/O of its own. Persistence is a collaborator
//! behind the [`TopicStore`] trait, and the external text scorer that grades
//! free-text summaries is consumed only as a numeric score. Retrievability is
//! recomputed from elapsed time on every read; nothing ticks in the
//! background.
//!
//! ## Quick Start
//!
//! ```rust
//! use recurve_core::{EncodingInput, MemoryStore, RecallInput, RecallSignal, RetentionEngine};
//!
//! # fn main() -> recurve_core::Result<()> {
//! let engine = RetentionEngine::new(MemoryStore::new());
//!
//! // First exposure: the external scorer graded the learner's summary 0.9
//! let encoded = engine.submit_encoding(EncodingInput {
//!     user_id: "u1".into(),
//!     topic_id: "photosynthesis".into(),
//!     comprehension_score: 0.9,
//!     summary_text: "plants split water with light energy".into(),
//!     ..Default::default()
//! })?;
//! assert!(encoded.stability > 1.0);
//!
//! // Later, a recall test comes back graded Easy
//! let recalled = engine.submit_recall(RecallInput {
//!     user_id: "u1".into(),
//!     topic_id: "photosynthesis".into(),
//!     answer_text: "light reactions produce oxygen".into(),
//!     signal: Some(RecallSignal::Grade(4)),
//! })?;
//! assert!(recalled.new_stability > encoded.stability);
//! # Ok(())
//! # }
//! ```

#![warn(rustdoc::missing_crate_level_docs)]

// ============================================================================
// MODULES
// ============================================================================

pub mod engine;
pub mod error;
pub mod model;
pub mod status;
pub mod storage;
pub mod topic;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// Errors
pub use error::{RetentionError, Result};

// Retention model
pub use model::{
    initial_stability,
    initial_stability_with_base,
    next_interval,
    next_interval_with_retention,
    normalize_score,
    project_decay_curve,
    // Core functions
    retrievability,
    score_to_grade,
    update_on_grade,
    CurvePoint,
    Grade,
    ScheduledReview,
    StabilityUpdate,
    // Policy constants
    BASE_STABILITY,
    LOW_RETENTION_THRESHOLD,
    LOW_RETENTION_WEIGHT,
    MAX_DIFFICULTY,
    MAX_INTERVAL_DAYS,
    MIN_DIFFICULTY,
    MIN_INTERVAL_DAYS,
    MIN_STABILITY,
    TARGET_RETENTION,
};

// Status classification
pub use status::{RetentionBand, RetentionColor};

// Topic records
pub use topic::{days_between, ReviewEvent, ReviewKind, TopicLog, TopicStatus};

// Storage collaborator
pub use storage::{MemoryStore, TopicStore};

// Lifecycle engine
pub use engine::{
    Dashboard, DecayCurve, EncodingInput, EncodingOutcome, RecallInput, RecallOutcome,
    RecallSignal, RetentionEngine, TopicRetentionStatus, DEFAULT_DIFFICULTY, LEARNED_THRESHOLD,
    MASTERY_RECALLS, MASTERY_STABILITY,
};

// ============================================================================
// VERSION INFO
// ============================================================================

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// PRELUDE
// ============================================================================

/// Convenient imports for common usage
pub mod prelude {
    pub use crate::{
        Dashboard, DecayCurve, EncodingInput, EncodingOutcome, Grade, MemoryStore, RecallInput,
        RecallOutcome, RecallSignal, Result, RetentionBand, RetentionColor, RetentionEngine,
        RetentionError, ReviewEvent, ReviewKind, TopicLog, TopicStatus, TopicStore,
    };
}
