//! Model Assets
//!
//! Location of the model weights and label table, plus integrity check.

use std::fs::File;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::types::ModelError;

/// Default weights file name inside an asset directory
pub const MODEL_FILE_NAME: &str = "model.onnx";

/// Default label file name inside an asset directory
pub const LABELS_FILE_NAME: &str = "labels.txt";

/// Model asset bundle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelAssets {
    pub model_path: PathBuf,
    pub labels_path: PathBuf,
    /// Hex SHA-256 of the weights file; verified before loading when set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_sha256: Option<String>,
}

impl ModelAssets {
    pub fn new(model_path: impl Into<PathBuf>, labels_path: impl Into<PathBuf>) -> Self {
        Self {
            model_path: model_path.into(),
            labels_path: labels_path.into(),
            expected_sha256: None,
        }
    }

    /// `<dir>/model.onnx` + `<dir>/labels.txt`
    pub fn from_dir(dir: &Path) -> Self {
        Self::new(dir.join(MODEL_FILE_NAME), dir.join(LABELS_FILE_NAME))
    }

    pub fn with_checksum(mut self, sha256: impl Into<String>) -> Self {
        self.expected_sha256 = Some(sha256.into());
        self
    }

    /// Human-readable model name (file name of the weights)
    pub fn model_name(&self) -> String {
        self.model_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.model_path.display().to_string())
    }

    /// Compare the weights file against `expected_sha256` (no-op when unset)
    pub fn verify_checksum(&self) -> Result<(), ModelError> {
        let Some(expected) = self.expected_sha256.as_deref() else {
            return Ok(());
        };

        if !self.model_path.exists() {
            return Err(ModelError::NotFound(self.model_path.display().to_string()));
        }

        let actual = compute_file_hash(&self.model_path)?;
        if !actual.eq_ignore_ascii_case(expected.trim()) {
            return Err(ModelError::ChecksumMismatch {
                expected: expected.trim().to_string(),
                actual,
            });
        }

        log::debug!("Model checksum verified: {}", actual);
        Ok(())
    }
}

/// Compute SHA256 hash of file
pub fn compute_file_hash(path: &Path) -> Result<String, std::io::Error> {
    let mut file = File::open(path)?;
    let mut hasher = Sha256::new();
    std::io::copy(&mut file, &mut hasher)?;
    Ok(hex::encode(hasher.finalize()))
}
