//! Local-Only Classifier
//!
//! Always answers on-device; there is no code path to a remote service.

use std::sync::Arc;

use crate::logic::model::{ClassificationResult, ImageBuffer, ImageClassifier};

pub struct LocalOnlyClassifier {
    local: Arc<dyn ImageClassifier>,
}

impl LocalOnlyClassifier {
    pub fn new(local: Arc<dyn ImageClassifier>) -> Self {
        Self { local }
    }
}

impl ImageClassifier for LocalOnlyClassifier {
    fn classify(&self, image: &ImageBuffer) -> ClassificationResult {
        self.local.classify(image)
    }
}
