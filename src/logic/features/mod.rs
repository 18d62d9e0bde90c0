//! Features Module - Feature Extraction Engine
//!
//! Reduces timestamped sensor samples into a fixed statistical summary.
//! Only the sample values take part in the aggregate; timestamps are carried
//! for callers that window the stream themselves.

pub mod extractor;
pub mod running;
pub mod sample;

#[cfg(test)]
mod tests;

// Re-export common types
pub use extractor::compute_features;
pub use running::RunningFeatures;
pub use sample::{FeatureSummary, Sample};
