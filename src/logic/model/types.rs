//! Model Types
//!
//! Result values, input buffer, options and errors for on-device inference.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{
    DEFAULT_MAX_RESULTS, DEFAULT_SCORE_THRESHOLD, ERROR_LABEL_PREFIX, NOT_INITIALIZED_LABEL,
    NO_RESULT_LABEL, UNSURE_LABEL,
};

// ============================================================================
// CLASSIFICATION RESULT
// ============================================================================

/// Top label and its confidence (0.0 - 1.0)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub label: String,
    pub confidence: f32,
}

impl ClassificationResult {
    pub fn new(label: impl Into<String>, confidence: f32) -> Self {
        Self {
            label: label.into(),
            confidence,
        }
    }

    /// Sentinel: no usable model
    pub fn not_initialized() -> Self {
        Self::new(NOT_INITIALIZED_LABEL, 0.0)
    }

    /// Sentinel: model ran but nothing cleared the score threshold
    pub fn no_result() -> Self {
        Self::new(NO_RESULT_LABEL, 0.0)
    }

    /// Sentinel: model failed while running
    pub fn error(message: impl std::fmt::Display) -> Self {
        Self::new(format!("{}{}", ERROR_LABEL_PREFIX, message), 0.0)
    }

    /// Sentinel: answer withheld, confidence kept as evidence
    pub fn unsure(confidence: f32) -> Self {
        Self::new(UNSURE_LABEL, confidence)
    }

    pub fn is_unsure(&self) -> bool {
        self.label == UNSURE_LABEL
    }
}

// ============================================================================
// RAW MODEL OUTPUT
// ============================================================================

/// Candidate straight from the runtime. `label` is either a class index
/// rendered as text ("17") or an already human-readable label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawCategory {
    pub label: String,
    pub score: f32,
}

impl RawCategory {
    pub fn new(label: impl Into<String>, score: f32) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }
}

// ============================================================================
// INPUT
// ============================================================================

/// Decoded, normalized pixel buffer in HWC layout
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: usize,
    pub height: usize,
    pub channels: usize,
    pub data: Vec<f32>,
}

impl ImageBuffer {
    /// Build a buffer, rejecting data whose length does not match the shape
    pub fn new(width: usize, height: usize, channels: usize, data: Vec<f32>) -> Result<Self, ModelError> {
        let expected = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(channels))
            .ok_or_else(|| {
                ModelError::InvalidInput(format!("{}x{}x{} overflows", height, width, channels))
            })?;
        if expected == 0 || data.len() != expected {
            return Err(ModelError::InvalidInput(format!(
                "expected {}x{}x{} = {} values, got {}",
                height,
                width,
                channels,
                expected,
                data.len()
            )));
        }

        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    /// Uniform buffer, mostly useful for smoke tests
    pub fn filled(width: usize, height: usize, channels: usize, value: f32) -> Result<Self, ModelError> {
        let len = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(channels))
            .unwrap_or(0);
        Self::new(width, height, channels, vec![value; len])
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

// ============================================================================
// OPTIONS
// ============================================================================

/// Candidate filtering applied on top of the raw model output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierOptions {
    /// Keep at most this many candidates (at least one is always considered)
    pub max_results: usize,
    /// Drop candidates scoring below this
    pub score_threshold: f32,
}

impl Default for ClassifierOptions {
    fn default() -> Self {
        Self {
            max_results: DEFAULT_MAX_RESULTS,
            score_threshold: DEFAULT_SCORE_THRESHOLD,
        }
    }
}

// ============================================================================
// METADATA
// ============================================================================

/// Describes the model behind a ready adapter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetadata {
    pub model_name: String,
    pub label_count: usize,
    pub loaded_at: chrono::DateTime<chrono::Utc>,
}

// ============================================================================
// ERROR HANDLING
// ============================================================================

/// Everything that can keep the local model from answering
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Model asset not found: {0}")]
    NotFound(String),

    #[error("Model checksum mismatch (expected {expected}, got {actual})")]
    ChecksumMismatch { expected: String, actual: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Session error: {0}")]
    Session(String),

    #[error("Inference failed: {0}")]
    Inference(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
