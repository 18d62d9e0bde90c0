//! Logic Module - Engines
//!
//! - `features/` - Feature extraction from timestamped sensor samples
//! - `heuristic/` - Threshold cascade mapping features to a level
//! - `model/` - On-device inference adapter (ONNX Runtime)
//! - `policy/` - Local-first decision policy with optional remote fallback

pub mod features;
pub mod heuristic;
pub mod model;
pub mod policy;
