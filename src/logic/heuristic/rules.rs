//! Level Rules & Thresholds
//!
//! Constants and config only; the cascade lives in `classifier.rs`.

use serde::{Deserialize, Serialize};

use crate::constants::{HIGH_MEAN, HIGH_STD_DEV, MEDIUM_STD_DEV};

/// Thresholds for the level cascade (configurable)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelThresholds {
    /// std-dev must exceed this for High
    pub high_std_dev: f64,
    /// mean must also exceed this for High
    pub high_mean: f64,
    /// std-dev above this = Medium
    pub medium_std_dev: f64,
}

impl Default for LevelThresholds {
    fn default() -> Self {
        Self {
            high_std_dev: HIGH_STD_DEV,
            high_mean: HIGH_MEAN,
            medium_std_dev: MEDIUM_STD_DEV,
        }
    }
}

impl LevelThresholds {
    /// Trip Medium/High earlier
    pub fn sensitive() -> Self {
        Self {
            high_std_dev: 10.0,
            high_mean: 75.0,
            medium_std_dev: 5.0,
        }
    }

    /// Require stronger variation before leaving Low
    pub fn relaxed() -> Self {
        Self {
            high_std_dev: 20.0,
            high_mean: 90.0,
            medium_std_dev: 12.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_thresholds() {
        let t = LevelThresholds::default();
        assert_eq!(t.high_std_dev, 15.0);
        assert_eq!(t.high_mean, 80.0);
        assert_eq!(t.medium_std_dev, 8.0);
    }
}
