//! Level Classifier
//!
//! Input: FeatureSummary
//! Output: Level
//!
//! First matching rule wins:
//! 1. std_dev > high_std_dev AND mean > high_mean → High
//! 2. std_dev > medium_std_dev → Medium
//! 3. otherwise → Low

use super::rules::LevelThresholds;
use super::types::Level;
use crate::logic::features::{compute_features, FeatureSummary, Sample};

/// Classify with the default thresholds
pub fn infer_level(features: &FeatureSummary) -> Level {
    infer_level_with_thresholds(features, &LevelThresholds::default())
}

/// Classify with custom thresholds
pub fn infer_level_with_thresholds(features: &FeatureSummary, thresholds: &LevelThresholds) -> Level {
    if features.std_dev > thresholds.high_std_dev && features.mean > thresholds.high_mean {
        Level::High
    } else if features.std_dev > thresholds.medium_std_dev {
        Level::Medium
    } else {
        Level::Low
    }
}

/// Sensor pipeline: samples → features → level
pub fn assess_samples(samples: &[Sample]) -> Level {
    let features = compute_features(samples);
    let level = infer_level(&features);
    log::debug!(
        "Assessed {} samples: mean={:.2} std_dev={:.2} -> {}",
        samples.len(),
        features.mean,
        features.std_dev,
        level
    );
    level
}
