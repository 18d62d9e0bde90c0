//! Central Configuration Constants
//!
//! Single source of truth for all configuration defaults.
//! Runtime overrides come from environment variables, read by the helpers below.

// ============================================
// Decision policy
// ============================================

/// Minimum local confidence accepted without escalation
pub const DEFAULT_CONFIDENCE_THRESHOLD: f32 = 0.8;

/// Remote fallback is opt-in: the device stays local unless told otherwise
pub const DEFAULT_ALLOW_FALLBACK: bool = false;

/// Upper bound for one remote fallback round trip (milliseconds)
pub const DEFAULT_REMOTE_TIMEOUT_MS: u64 = 5_000;

/// Label returned when no answer is good enough
pub const UNSURE_LABEL: &str = "unsure";

// ============================================
// Local inference adapter
// ============================================

/// Label returned when the model is missing, failed to load, or was released
pub const NOT_INITIALIZED_LABEL: &str = "Classifier not initialized";

/// Label returned when the model produced no candidate above the score threshold
pub const NO_RESULT_LABEL: &str = "No result";

/// Prefix for labels describing an inference failure
pub const ERROR_LABEL_PREFIX: &str = "Error: ";

/// Default number of candidates kept per classification
pub const DEFAULT_MAX_RESULTS: usize = 3;

/// Candidates scoring below this are discarded
pub const DEFAULT_SCORE_THRESHOLD: f32 = 0.1;

// ============================================
// Sensor heuristics
// ============================================

/// std-dev above which (with a high mean) the level is High
pub const HIGH_STD_DEV: f64 = 15.0;

/// Mean above which (with a high std-dev) the level is High
pub const HIGH_MEAN: f64 = 80.0;

/// std-dev above which the level is at least Medium
pub const MEDIUM_STD_DEV: f64 = 8.0;

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Get confidence threshold from environment or use default
pub fn get_confidence_threshold() -> f32 {
    std::env::var("ONDEVICE_CONFIDENCE_THRESHOLD")
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(DEFAULT_CONFIDENCE_THRESHOLD)
}

/// Get fallback permission from environment or use default
///
/// Accepts `1/0`, `true/false`, `yes/no`, `on/off` (case-insensitive).
pub fn get_allow_fallback() -> bool {
    std::env::var("ONDEVICE_ALLOW_FALLBACK")
        .ok()
        .and_then(|s| parse_flag(&s))
        .unwrap_or(DEFAULT_ALLOW_FALLBACK)
}

/// Get remote timeout from environment or use default
pub fn get_remote_timeout_ms() -> u64 {
    std::env::var("ONDEVICE_REMOTE_TIMEOUT_MS")
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(DEFAULT_REMOTE_TIMEOUT_MS)
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
