//! Heuristic Module - Level Classification
//!
//! Structure:
//! - `types.rs` - Level enum
//! - `rules.rs` - Thresholds
//! - `classifier.rs` - Threshold cascade

pub mod classifier;
pub mod rules;
pub mod types;

// Re-exports
pub use classifier::{assess_samples, infer_level, infer_level_with_thresholds};
pub use rules::LevelThresholds;
pub use types::Level;
