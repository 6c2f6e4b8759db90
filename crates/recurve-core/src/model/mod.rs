//! Retention Model
//!
//! The forgetting-curve math behind review scheduling:
//!
//! - **Decay**: retrievability R(t) = e^(-t/S) with stability S in days,
//!   and its inverse (the interval until R crosses a target threshold)
//! - **Update rule**: four-point recall grades revise stability/difficulty
//! - **Grade conversion**: continuous scores map onto the 1-4 grade scale,
//!   encoding quality maps onto an initial stability
//! - **Projection**: future retrievability samples for visualization
//!
//! Everything in this module is pure and referentially transparent:
//! identical inputs always produce identical outputs, so the functions are
//! safe to call from any number of concurrent callers.

mod curve;
mod grade;
mod project;
mod update;

pub use curve::{
    next_interval, next_interval_with_retention, retrievability, MAX_INTERVAL_DAYS,
    MIN_INTERVAL_DAYS, TARGET_RETENTION,
};
pub use grade::{
    initial_stability, initial_stability_with_base, normalize_score, score_to_grade, Grade,
    BASE_STABILITY,
};
pub use project::{project_decay_curve, CurvePoint, ScheduledReview};
pub use update::{
    update_on_grade, StabilityUpdate, LOW_RETENTION_THRESHOLD, LOW_RETENTION_WEIGHT,
    MAX_DIFFICULTY, MIN_DIFFICULTY, MIN_STABILITY,
};
