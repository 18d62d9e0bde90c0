//! Integration Tests for Feature Extraction
//!
//! Batch and incremental extractors must agree and respect the summary bounds.

#[cfg(test)]
mod integration_tests {
    use crate::logic::features::{compute_features, FeatureSummary, RunningFeatures, Sample};

    /// Deterministic pseudo-random readings in roughly [40, 160)
    fn readings(seed: u64, len: usize) -> Vec<Sample> {
        let mut state = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        (0..len)
            .map(|i| {
                state = state
                    .wrapping_mul(6364136223846793005)
                    .wrapping_add(1442695040888963407);
                let unit = (state >> 11) as f64 / (1u64 << 53) as f64;
                Sample::at_millis(i as i64 * 1000, 40.0 + unit * 120.0)
            })
            .collect()
    }

    /// min <= mean <= max for every non-empty sequence
    #[test]
    fn test_summary_bounds() {
        for seed in 0..50 {
            for len in [1, 2, 3, 10, 257] {
                let f = compute_features(&readings(seed, len));
                assert!(f.min <= f.mean, "seed {} len {}: {:?}", seed, len, f);
                assert!(f.mean <= f.max, "seed {} len {}: {:?}", seed, len, f);
                assert!(f.std_dev >= 0.0);
            }
        }
    }

    /// Running accumulator matches the batch extractor
    #[test]
    fn test_running_matches_batch() {
        for seed in 0..20 {
            let samples = readings(seed, 100);
            let batch = compute_features(&samples);

            let mut running = RunningFeatures::new();
            running.extend(&samples);
            let incremental = running.summary();

            assert_eq!(incremental.min, batch.min);
            assert_eq!(incremental.max, batch.max);
            assert!((incremental.mean - batch.mean).abs() < 1e-9);
            assert!((incremental.std_dev - batch.std_dev).abs() < 1e-9);
        }
    }

    /// Both extractors agree on the empty sentinel
    #[test]
    fn test_empty_agrees() {
        assert_eq!(compute_features(&[]), FeatureSummary::EMPTY);
        assert_eq!(RunningFeatures::new().summary(), FeatureSummary::EMPTY);
    }

    /// Constant signal has zero spread
    #[test]
    fn test_constant_signal() {
        let samples: Vec<Sample> = (0..30).map(|i| Sample::at_millis(i, 65.0)).collect();
        let f = compute_features(&samples);
        assert_eq!(f, FeatureSummary::new(65.0, 65.0, 65.0, 0.0));
    }

    /// Values that do not sum exactly stay inside their own bounds
    #[test]
    fn test_inexact_constant_signal() {
        let samples: Vec<Sample> = (0..3).map(|i| Sample::at_millis(i, 0.1)).collect();
        let expected = FeatureSummary::new(0.1, 0.1, 0.1, 0.0);

        let mut running = RunningFeatures::new();
        running.extend(&samples);

        assert_eq!(compute_features(&samples), expected);
        assert_eq!(running.summary(), expected);

        for value in [0.1, 0.2, 0.3, 1.0 / 3.0, 72.35] {
            for len in [2, 3, 7, 10, 33] {
                let samples: Vec<Sample> = (0..len).map(|i| Sample::at_millis(i, value)).collect();
                let f = compute_features(&samples);
                assert!(f.min <= f.mean && f.mean <= f.max, "{} x{}: {:?}", value, len, f);
                assert_eq!(f.std_dev, 0.0, "{} x{}: {:?}", value, len, f);
            }
        }
    }
}
