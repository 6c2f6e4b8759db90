//! Retention Status Classifier
//!
//! Maps current retrievability to human-facing display bands and heatmap
//! colors. Distinct from [`TopicStatus`](crate::topic::TopicStatus), which
//! additionally factors in review history.

use serde::{Deserialize, Serialize};

// ============================================================================
// RETENTION BAND
// ============================================================================

/// Display band derived purely from current retrievability.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RetentionBand {
    /// Retrievability at or above 0.95
    Mastered,
    /// At or above 0.85
    Stable,
    /// At or above 0.70
    ReviewSoon,
    /// At or above 0.50
    Critical,
    /// Below 0.50
    Forgotten,
}

impl RetentionBand {
    /// Classify current retrievability into a display band.
    pub fn classify(retrievability: f64) -> Self {
        if retrievability >= 0.95 {
            RetentionBand::Mastered
        } else if retrievability >= 0.85 {
            RetentionBand::Stable
        } else if retrievability >= 0.70 {
            RetentionBand::ReviewSoon
        } else if retrievability >= 0.50 {
            RetentionBand::Critical
        } else {
            RetentionBand::Forgotten
        }
    }

    /// Bands that warrant immediate attention on a dashboard.
    pub fn needs_attention(self) -> bool {
        matches!(self, RetentionBand::Critical | RetentionBand::Forgotten)
    }

    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            RetentionBand::Mastered => "mastered",
            RetentionBand::Stable => "stable",
            RetentionBand::ReviewSoon => "review_soon",
            RetentionBand::Critical => "critical",
            RetentionBand::Forgotten => "forgotten",
        }
    }
}

impl std::fmt::Display for RetentionBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// RETENTION COLOR
// ============================================================================

/// Traffic-light color for heatmap cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RetentionColor {
    /// Retrievability at or above 0.85
    Green,
    /// At or above 0.70
    Yellow,
    /// Below 0.70
    Red,
}

impl RetentionColor {
    /// Pick a color for the current retrievability.
    pub fn for_retention(retrievability: f64) -> Self {
        if retrievability >= 0.85 {
            RetentionColor::Green
        } else if retrievability >= 0.70 {
            RetentionColor::Yellow
        } else {
            RetentionColor::Red
        }
    }

    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            RetentionColor::Green => "green",
            RetentionColor::Yellow => "yellow",
            RetentionColor::Red => "red",
        }
    }
}

impl std::fmt::Display for RetentionColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_boundaries() {
        assert_eq!(RetentionBand::classify(1.0), RetentionBand::Mastered);
        assert_eq!(RetentionBand::classify(0.95), RetentionBand::Mastered);
        assert_eq!(RetentionBand::classify(0.94), RetentionBand::Stable);
        assert_eq!(RetentionBand::classify(0.85), RetentionBand::Stable);
        assert_eq!(RetentionBand::classify(0.70), RetentionBand::ReviewSoon);
        assert_eq!(RetentionBand::classify(0.50), RetentionBand::Critical);
        assert_eq!(RetentionBand::classify(0.49), RetentionBand::Forgotten);
        assert_eq!(RetentionBand::classify(0.0), RetentionBand::Forgotten);
    }

    #[test]
    fn test_color_boundaries() {
        assert_eq!(RetentionColor::for_retention(0.85), RetentionColor::Green);
        assert_eq!(RetentionColor::for_retention(0.84), RetentionColor::Yellow);
        assert_eq!(RetentionColor::for_retention(0.70), RetentionColor::Yellow);
        assert_eq!(RetentionColor::for_retention(0.69), RetentionColor::Red);
    }

    #[test]
    fn test_needs_attention() {
        assert!(RetentionBand::Critical.needs_attention());
        assert!(RetentionBand::Forgotten.needs_attention());
        assert!(!RetentionBand::Stable.needs_attention());
        assert!(!RetentionBand::ReviewSoon.needs_attention());
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(
            serde_json::to_string(&RetentionBand::ReviewSoon).unwrap(),
            "\"review_soon\""
        );
        assert_eq!(
            serde_json::to_string(&RetentionColor::Yellow).unwrap(),
            "\"yellow\""
        );
    }
}
