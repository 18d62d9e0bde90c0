//! Incremental Feature Extraction
//!
//! Accumulates samples one at a time for callers that stream sensor data
//! instead of holding a full window in memory.

use super::sample::{FeatureSummary, Sample};

/// Running mean / variance (Welford) with min / max tracking
#[derive(Debug, Clone, Default)]
pub struct RunningFeatures {
    count: u64,
    mean: f64,
    m2: f64,
    min: Option<f64>,
    max: Option<f64>,
}

impl RunningFeatures {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one sample
    pub fn add_sample(&mut self, sample: &Sample) {
        self.add_value(sample.value);
    }

    /// Add one raw value
    pub fn add_value(&mut self, value: f64) {
        self.count += 1;

        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (value - self.mean);

        self.min = Some(self.min.map_or(value, |m| m.min(value)));
        self.max = Some(self.max.map_or(value, |m| m.max(value)));
    }

    pub fn len(&self) -> u64 {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Current summary; [`FeatureSummary::EMPTY`] until a sample is added
    pub fn summary(&self) -> FeatureSummary {
        if self.count == 0 {
            return FeatureSummary::EMPTY;
        }

        let variance = (self.m2 / self.count as f64).max(0.0);
        let min = self.min.unwrap_or(self.mean);
        let max = self.max.unwrap_or(self.mean);

        FeatureSummary {
            mean: self.mean.clamp(min, max),
            min,
            max,
            std_dev: variance.sqrt(),
        }
    }

    /// Reset for new window
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl Extend<Sample> for RunningFeatures {
    fn extend<I: IntoIterator<Item = Sample>>(&mut self, iter: I) {
        for sample in iter {
            self.add_sample(&sample);
        }
    }
}

impl<'a> Extend<&'a Sample> for RunningFeatures {
    fn extend<I: IntoIterator<Item = &'a Sample>>(&mut self, iter: I) {
        for sample in iter {
            self.add_sample(sample);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_running_features() {
        let mut running = RunningFeatures::new();
        assert_eq!(running.summary(), FeatureSummary::EMPTY);

        running.add_value(30.0);
        running.add_value(60.0);
        running.add_value(45.0);

        let f = running.summary();
        assert_eq!(running.len(), 3);
        assert!((f.mean - 45.0).abs() < 1e-12);
        assert_eq!(f.min, 30.0);
        assert_eq!(f.max, 60.0);
        assert!((f.std_dev - 150.0f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn test_reset() {
        let mut running = RunningFeatures::new();
        running.add_value(99.0);
        running.reset();
        assert!(running.is_empty());
        assert_eq!(running.summary(), FeatureSummary::EMPTY);
    }
}
