//! On-Device AI Core
//!
//! Local-first image classification and sensor heuristics.
//!
//! # Architecture
//!
//! ```text
//! samples ──► features::compute_features ──► heuristic::infer_level ──► Level
//!
//! image ──► model::LocalClassifier ──► policy::DecisionPolicy ──► ClassificationResult
//!                                            │
//!                                            └──► RemoteClassifier (opt-in, bounded)
//! ```
//!
//! The remote fallback is only reached when the local model is not confident
//! enough AND the caller opted in through [`PolicyConfig::allow_fallback`].

pub mod constants;
pub mod logic;

pub use logic::features::{compute_features, FeatureSummary, RunningFeatures, Sample};
pub use logic::heuristic::{assess_samples, infer_level, infer_level_with_thresholds, Level, LevelThresholds};
pub use logic::model::{
    ClassificationResult, ClassifierOptions, ImageBuffer, ImageClassifier, LabelTable,
    LocalClassifier, ModelAssets, ModelError, ModelRuntime, OnnxRuntime, RawCategory,
};
pub use logic::policy::{
    Decision, DecisionOutcome, DecisionPolicy, LocalOnlyClassifier, PolicyConfig,
    PolicyStatsSnapshot, RemoteClassifier, RemoteError,
};

/// Initialize the `env_logger` backend (default filter: `info`).
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}
