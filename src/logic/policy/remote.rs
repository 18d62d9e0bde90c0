//! Remote Fallback Interface
//!
//! The network side is an external collaborator. It may send the image or a
//! privacy-reduced representation of it; that choice belongs to the
//! implementation.

use async_trait::async_trait;
use thiserror::Error;

use crate::logic::model::{ClassificationResult, ImageBuffer};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RemoteError {
    #[error("Remote classifier unavailable: {0}")]
    Unavailable(String),

    #[error("Remote classifier timed out")]
    Timeout,

    #[error("Remote call cancelled")]
    Cancelled,

    #[error("Invalid remote response: {0}")]
    InvalidResponse(String),
}

/// Cloud / server-side classifier used only as an opt-in fallback
#[async_trait]
pub trait RemoteClassifier: Send + Sync {
    /// Identifier for logs
    fn name(&self) -> &str {
        "remote"
    }

    async fn classify(&self, image: &ImageBuffer) -> Result<ClassificationResult, RemoteError>;
}
