//! Batch Feature Extraction
//!
//! Pure function over a complete sample slice.

use super::sample::{FeatureSummary, Sample};

/// Compute mean / min / max / population std-dev over the sample values.
///
/// Sample order and timestamps do not matter. Empty input returns
/// [`FeatureSummary::EMPTY`].
pub fn compute_features(samples: &[Sample]) -> FeatureSummary {
    if samples.is_empty() {
        return FeatureSummary::EMPTY;
    }

    let n = samples.len() as f64;
    let sum_mean = samples.iter().map(|s| s.value).sum::<f64>() / n;

    let min = samples
        .iter()
        .map(|s| s.value)
        .min_by(|a, b| a.total_cmp(b))
        .unwrap_or(sum_mean);
    let max = samples
        .iter()
        .map(|s| s.value)
        .max_by(|a, b| a.total_cmp(b))
        .unwrap_or(sum_mean);

    // Summation rounding can push the mean just outside [min, max]
    let mean = sum_mean.clamp(min, max);

    let variance = samples
        .iter()
        .map(|s| (s.value - mean).powi(2))
        .sum::<f64>()
        / n;

    FeatureSummary {
        mean,
        min,
        max,
        std_dev: variance.sqrt(),
    }
}
