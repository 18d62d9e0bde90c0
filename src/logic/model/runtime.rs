//! Model Runtime - ONNX Runtime Integration
//!
//! Runs the bundled model on an already-normalized image.
//! Kept separate from the adapter so the backend can be swapped.

use ndarray::Array4;
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Value;
use parking_lot::Mutex;

use super::assets::ModelAssets;
use super::types::{ImageBuffer, ModelError, RawCategory};

// ============================================================================
// RUNTIME TRAIT
// ============================================================================

/// Trait for inference backends (ONNX, TFLite, mocks)
pub trait ModelRuntime: Send + Sync {
    /// Static identifier for logs and status
    fn name(&self) -> &str;

    /// Score every class for one image
    fn run(&self, image: &ImageBuffer) -> Result<Vec<RawCategory>, ModelError>;
}

// ============================================================================
// ONNX IMPLEMENTATION
// ============================================================================

/// Image classifier backed by an ONNX Runtime session.
///
/// Input: `[1, H, W, C]` f32 tensor. Output: one score per class; class `i`
/// is reported with raw label `"i"` for the adapter to resolve.
pub struct OnnxRuntime {
    session: Mutex<Session>,
    output_name: String,
    name: String,
}

impl OnnxRuntime {
    /// Load from an asset bundle, verifying the checksum first when one is set
    pub fn from_assets(assets: &ModelAssets) -> Result<Self, ModelError> {
        log::info!("Loading ONNX model from: {}", assets.model_path.display());

        if !assets.model_path.exists() {
            return Err(ModelError::NotFound(assets.model_path.display().to_string()));
        }
        assets.verify_checksum()?;

        let session = Session::builder()
            .map_err(|e| ModelError::Session(format!("Failed to create session builder: {}", e)))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| ModelError::Session(format!("Failed to set optimization: {}", e)))?
            .commit_from_file(&assets.model_path)
            .map_err(|e| ModelError::Session(format!("Failed to load model: {}", e)))?;

        let output_name = session
            .outputs
            .first()
            .map(|o| o.name.clone())
            .ok_or_else(|| ModelError::Session("No output defined".to_string()))?;

        log::info!("ONNX model loaded successfully");

        Ok(Self {
            session: Mutex::new(session),
            output_name,
            name: assets.model_name(),
        })
    }

    /// Load from bytes already in memory
    pub fn from_bytes(name: &str, model_bytes: &[u8]) -> Result<Self, ModelError> {
        log::info!("Loading ONNX model from memory ({} bytes)", model_bytes.len());

        let session = Session::builder()
            .map_err(|e| ModelError::Session(format!("Session builder error: {}", e)))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| ModelError::Session(format!("Optimization error: {}", e)))?
            .commit_from_memory(model_bytes)
            .map_err(|e| ModelError::Session(format!("Load from memory error: {}", e)))?;

        let output_name = session
            .outputs
            .first()
            .map(|o| o.name.clone())
            .ok_or_else(|| ModelError::Session("No output defined".to_string()))?;

        Ok(Self {
            session: Mutex::new(session),
            output_name,
            name: name.to_string(),
        })
    }
}

impl ModelRuntime for OnnxRuntime {
    fn name(&self) -> &str {
        &self.name
    }

    fn run(&self, image: &ImageBuffer) -> Result<Vec<RawCategory>, ModelError> {
        let input_array = Array4::<f32>::from_shape_vec(
            (1, image.height, image.width, image.channels),
            image.data.clone(),
        )
        .map_err(|e| ModelError::InvalidInput(format!("Array error: {}", e)))?;

        let input_tensor = Value::from_array(input_array)
            .map_err(|e| ModelError::Inference(format!("Tensor error: {}", e)))?;

        let mut session = self.session.lock();
        let outputs = session
            .run(ort::inputs![input_tensor])
            .map_err(|e| ModelError::Inference(format!("Run failed: {}", e)))?;

        let output = outputs
            .get(&self.output_name)
            .ok_or_else(|| ModelError::Inference("No output".to_string()))?;

        let (_, scores) = output
            .try_extract_tensor::<f32>()
            .map_err(|e| ModelError::Inference(format!("Extract error: {}", e)))?;

        Ok(scores
            .iter()
            .enumerate()
            .map(|(index, score)| RawCategory::new(index.to_string(), *score))
            .collect())
    }
}
