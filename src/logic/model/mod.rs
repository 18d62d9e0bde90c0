//! Model Module - On-Device Inference
//!
//! Separates model execution (`runtime`) from result handling (`adapter`),
//! so the backend can be swapped without touching callers.

pub mod adapter;
pub mod assets;
pub mod labels;
pub mod runtime;
pub mod types;

// Re-export common types
pub use adapter::{AdapterStatus, ImageClassifier, LocalClassifier};
pub use assets::ModelAssets;
pub use labels::LabelTable;
pub use runtime::{ModelRuntime, OnnxRuntime};
pub use types::{
    ClassificationResult, ClassifierOptions, ImageBuffer, ModelError, ModelMetadata, RawCategory,
};
