//! Sample & Feature Summary Types
//!
//! Data structures only, no extraction logic.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// SAMPLE
// ============================================================================

/// One timestamped scalar reading (e.g. a heart-rate value in bpm)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
}

impl Sample {
    pub fn new(timestamp: DateTime<Utc>, value: f64) -> Self {
        Self { timestamp, value }
    }

    /// Build from epoch milliseconds. Out-of-range timestamps clamp to the epoch.
    pub fn at_millis(millis: i64, value: f64) -> Self {
        let timestamp = Utc
            .timestamp_millis_opt(millis)
            .single()
            .unwrap_or_default();
        Self { timestamp, value }
    }
}

// ============================================================================
// FEATURE SUMMARY
// ============================================================================

/// Statistical digest of a sample sequence
///
/// For a non-empty source `min <= mean <= max` holds. An empty source yields
/// [`FeatureSummary::EMPTY`], which is a "no data" value, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FeatureSummary {
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    /// Population standard deviation (divides by N)
    pub std_dev: f64,
}

impl FeatureSummary {
    /// All-zero summary for an empty sequence
    pub const EMPTY: FeatureSummary = FeatureSummary {
        mean: 0.0,
        min: 0.0,
        max: 0.0,
        std_dev: 0.0,
    };

    pub fn new(mean: f64, min: f64, max: f64, std_dev: f64) -> Self {
        Self { mean, min, max, std_dev }
    }

    /// Spread between the extremes
    pub fn range(&self) -> f64 {
        self.max - self.min
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::EMPTY
    }
}
