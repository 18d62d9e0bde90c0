//! Policy Configuration
//!
//! Supplied per `decide` call; nothing here is global.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{
    self, DEFAULT_ALLOW_FALLBACK, DEFAULT_CONFIDENCE_THRESHOLD, DEFAULT_REMOTE_TIMEOUT_MS,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    /// Local results at or above this confidence are accepted as-is
    pub confidence_threshold: f32,

    /// Caller opt-in for the remote fallback
    pub allow_fallback: bool,

    /// Budget for the single remote call (milliseconds)
    pub remote_timeout_ms: u64,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            allow_fallback: DEFAULT_ALLOW_FALLBACK,
            remote_timeout_ms: DEFAULT_REMOTE_TIMEOUT_MS,
        }
    }
}

impl PolicyConfig {
    pub fn new(confidence_threshold: f32, allow_fallback: bool) -> Self {
        Self {
            confidence_threshold,
            allow_fallback,
            ..Default::default()
        }
    }

    /// Never leave the device
    pub fn local_only() -> Self {
        Self {
            allow_fallback: false,
            ..Default::default()
        }
    }

    /// Escalate low-confidence results to the remote classifier
    pub fn hybrid() -> Self {
        Self {
            allow_fallback: true,
            ..Default::default()
        }
    }

    /// Defaults overridden by `ONDEVICE_*` environment variables
    pub fn from_env() -> Self {
        Self {
            confidence_threshold: constants::get_confidence_threshold(),
            allow_fallback: constants::get_allow_fallback(),
            remote_timeout_ms: constants::get_remote_timeout_ms(),
        }
    }

    pub fn with_threshold(mut self, confidence_threshold: f32) -> Self {
        self.confidence_threshold = confidence_threshold;
        self
    }

    pub fn with_remote_timeout(mut self, timeout: Duration) -> Self {
        self.remote_timeout_ms = timeout.as_millis().min(u64::MAX as u128) as u64;
        self
    }

    pub fn remote_timeout(&self) -> Duration {
        Duration::from_millis(self.remote_timeout_ms)
    }
}
