//! Local Inference Adapter
//!
//! Wraps a model runtime behind a total `classify` call. The adapter is
//! either Ready or Uninitialized; in the latter state every call answers with
//! the not-initialized sentinel instead of failing.
//!
//! Lifecycle: `classify` holds a read lock for the duration of inference and
//! `release` takes the write lock, so the model is only freed once no
//! classification is in flight.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use super::assets::ModelAssets;
use super::labels::LabelTable;
use super::runtime::{ModelRuntime, OnnxRuntime};
use super::types::{
    ClassificationResult, ClassifierOptions, ImageBuffer, ModelError, ModelMetadata, RawCategory,
};

// ============================================================================
// CLASSIFIER TRAIT
// ============================================================================

/// Anything that turns an image into a (label, confidence) pair without failing
pub trait ImageClassifier: Send + Sync {
    fn classify(&self, image: &ImageBuffer) -> ClassificationResult;
}

// ============================================================================
// STATE
// ============================================================================

enum AdapterState {
    Ready {
        runtime: Box<dyn ModelRuntime>,
        labels: LabelTable,
        metadata: ModelMetadata,
    },
    Uninitialized {
        reason: String,
    },
}

/// Adapter status for callers / UI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdapterStatus {
    pub model_loaded: bool,
    pub model_name: String,
    pub label_count: usize,
    pub inference_count: u64,
    pub avg_latency_ms: f32,
    /// Why the adapter is not ready, if it is not
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unavailable_reason: Option<String>,
}

// ============================================================================
// LOCAL CLASSIFIER
// ============================================================================

pub struct LocalClassifier {
    state: RwLock<AdapterState>,
    options: ClassifierOptions,
    latency_sum_us: AtomicU64,
    inference_count: AtomicU64,
}

impl LocalClassifier {
    /// Load label table and model. Never fails: a missing or broken model
    /// yields an uninitialized adapter.
    pub fn load(assets: &ModelAssets, options: ClassifierOptions) -> Self {
        match Self::try_load(assets, options.clone()) {
            Ok(classifier) => classifier,
            Err(e) => {
                log::warn!("Local model unavailable: {}", e);
                Self::uninitialized_with(e.to_string(), options)
            }
        }
    }

    /// Like [`LocalClassifier::load`] but reports why the model could not load.
    ///
    /// A missing label table is not fatal: the model still loads and raw
    /// labels pass through unchanged.
    pub fn try_load(assets: &ModelAssets, options: ClassifierOptions) -> Result<Self, ModelError> {
        let labels = match LabelTable::from_file(&assets.labels_path) {
            Ok(labels) => labels,
            Err(e) => {
                log::warn!("Label table not loaded ({}), using raw labels", e);
                LabelTable::default()
            }
        };

        let runtime = OnnxRuntime::from_assets(assets)?;
        Ok(Self::with_runtime(Box::new(runtime), labels, options))
    }

    /// Ready adapter over any runtime
    pub fn with_runtime(
        runtime: Box<dyn ModelRuntime>,
        labels: LabelTable,
        options: ClassifierOptions,
    ) -> Self {
        let metadata = ModelMetadata {
            model_name: runtime.name().to_string(),
            label_count: labels.len(),
            loaded_at: chrono::Utc::now(),
        };
        log::info!(
            "Local classifier ready: {} ({} labels)",
            metadata.model_name,
            metadata.label_count
        );

        Self {
            state: RwLock::new(AdapterState::Ready {
                runtime,
                labels,
                metadata,
            }),
            options,
            latency_sum_us: AtomicU64::new(0),
            inference_count: AtomicU64::new(0),
        }
    }

    /// Null-object adapter
    pub fn uninitialized(reason: impl Into<String>) -> Self {
        Self::uninitialized_with(reason.into(), ClassifierOptions::default())
    }

    fn uninitialized_with(reason: String, options: ClassifierOptions) -> Self {
        Self {
            state: RwLock::new(AdapterState::Uninitialized { reason }),
            options,
            latency_sum_us: AtomicU64::new(0),
            inference_count: AtomicU64::new(0),
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(*self.state.read(), AdapterState::Ready { .. })
    }

    pub fn options(&self) -> &ClassifierOptions {
        &self.options
    }

    pub fn metadata(&self) -> Option<ModelMetadata> {
        match &*self.state.read() {
            AdapterState::Ready { metadata, .. } => Some(metadata.clone()),
            AdapterState::Uninitialized { .. } => None,
        }
    }

    /// Free the model. Waits for in-flight classifications; later calls get
    /// the not-initialized sentinel. Returns false if nothing was loaded.
    pub fn release(&self) -> bool {
        let mut state = self.state.write();
        let model_name = match &*state {
            AdapterState::Ready { metadata, .. } => metadata.model_name.clone(),
            AdapterState::Uninitialized { .. } => return false,
        };

        *state = AdapterState::Uninitialized {
            reason: "released".to_string(),
        };
        log::info!("Local classifier released: {}", model_name);
        true
    }

    pub fn status(&self) -> AdapterStatus {
        let sum = self.latency_sum_us.load(Ordering::Relaxed);
        let count = self.inference_count.load(Ordering::Relaxed);
        let avg = if count > 0 { (sum as f32 / count as f32) / 1000.0 } else { 0.0 };

        match &*self.state.read() {
            AdapterState::Ready { metadata, .. } => AdapterStatus {
                model_loaded: true,
                model_name: metadata.model_name.clone(),
                label_count: metadata.label_count,
                inference_count: count,
                avg_latency_ms: avg,
                unavailable_reason: None,
            },
            AdapterState::Uninitialized { reason } => AdapterStatus {
                model_loaded: false,
                model_name: "None".to_string(),
                label_count: 0,
                inference_count: count,
                avg_latency_ms: avg,
                unavailable_reason: Some(reason.clone()),
            },
        }
    }

    /// Up to `max_results` resolved candidates, best first.
    ///
    /// Never empty: when nothing usable comes back the single entry is the
    /// same sentinel [`ImageClassifier::classify`] would return.
    pub fn classify_top_k(&self, image: &ImageBuffer) -> Vec<ClassificationResult> {
        let state = self.state.read();
        let (runtime, labels) = match &*state {
            AdapterState::Ready { runtime, labels, .. } => (runtime, labels),
            AdapterState::Uninitialized { .. } => return vec![ClassificationResult::not_initialized()],
        };

        let start_time = Instant::now();
        let ranked = match runtime.run(image) {
            Ok(candidates) => self.rank(candidates, labels),
            Err(e) => {
                log::warn!("Local inference failed: {}", e);
                vec![ClassificationResult::error(e)]
            }
        };

        self.latency_sum_us
            .fetch_add(start_time.elapsed().as_micros() as u64, Ordering::Relaxed);
        self.inference_count.fetch_add(1, Ordering::Relaxed);

        ranked
    }

    /// Filter, rank and resolve the runtime's candidates
    fn rank(&self, candidates: Vec<RawCategory>, labels: &LabelTable) -> Vec<ClassificationResult> {
        let mut kept: Vec<RawCategory> = candidates
            .into_iter()
            .filter(|c| !c.score.is_nan() && c.score >= self.options.score_threshold)
            .collect();
        if kept.is_empty() {
            return vec![ClassificationResult::no_result()];
        }

        kept.sort_by(|a, b| b.score.total_cmp(&a.score));
        kept.truncate(self.options.max_results.max(1));

        kept.into_iter()
            .map(|c| ClassificationResult::new(labels.resolve(&c.label), c.score.clamp(0.0, 1.0)))
            .collect()
    }
}

impl ImageClassifier for LocalClassifier {
    fn classify(&self, image: &ImageBuffer) -> ClassificationResult {
        self.classify_top_k(image)
            .into_iter()
            .next()
            .unwrap_or_else(ClassificationResult::no_result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::atomic::AtomicBool;
    use std::sync::mpsc::{channel, Receiver, Sender};
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;
    use tempfile::tempdir;

    struct FixedRuntime(Vec<RawCategory>);

    impl ModelRuntime for FixedRuntime {
        fn name(&self) -> &str {
            "fixed"
        }

        fn run(&self, _image: &ImageBuffer) -> Result<Vec<RawCategory>, ModelError> {
            Ok(self.0.clone())
        }
    }

    struct FailingRuntime;

    impl ModelRuntime for FailingRuntime {
        fn name(&self) -> &str {
            "failing"
        }

        fn run(&self, _image: &ImageBuffer) -> Result<Vec<RawCategory>, ModelError> {
            Err(ModelError::Inference("tensor shape mismatch".to_string()))
        }
    }

    /// Signals when inference starts, then blocks until told to finish
    struct GatedRuntime {
        entered: Mutex<Sender<()>>,
        proceed: Mutex<Receiver<()>>,
    }

    impl ModelRuntime for GatedRuntime {
        fn name(&self) -> &str {
            "gated"
        }

        fn run(&self, _image: &ImageBuffer) -> Result<Vec<RawCategory>, ModelError> {
            let _ = self.entered.lock().send(());
            self.proceed
                .lock()
                .recv()
                .map_err(|e| ModelError::Inference(e.to_string()))?;
            Ok(vec![RawCategory::new("1", 0.8)])
        }
    }

    fn labels() -> LabelTable {
        LabelTable::from_labels(vec!["cat".into(), "dog".into(), "bird".into()])
    }

    fn image() -> ImageBuffer {
        ImageBuffer::filled(4, 4, 3, 0.5).unwrap()
    }

    fn ready(candidates: Vec<RawCategory>) -> LocalClassifier {
        LocalClassifier::with_runtime(Box::new(FixedRuntime(candidates)), labels(), ClassifierOptions::default())
    }

    #[test]
    fn test_top_candidate_resolved() {
        let classifier = ready(vec![
            RawCategory::new("0", 0.2),
            RawCategory::new("1", 0.7),
            RawCategory::new("2", 0.1),
        ]);

        let result = classifier.classify(&image());
        assert_eq!(result, ClassificationResult::new("dog", 0.7));
    }

    #[test]
    fn test_text_and_out_of_range_labels_pass_through() {
        let text = ready(vec![RawCategory::new("zebra", 0.9)]);
        assert_eq!(text.classify(&image()).label, "zebra");

        let out_of_range = ready(vec![RawCategory::new("42", 0.9)]);
        assert_eq!(out_of_range.classify(&image()).label, "42");
    }

    #[test]
    fn test_below_score_threshold_is_no_result() {
        let classifier = ready(vec![RawCategory::new("0", 0.05), RawCategory::new("1", f32::NAN)]);
        assert_eq!(classifier.classify(&image()), ClassificationResult::no_result());

        let empty = ready(vec![]);
        assert_eq!(empty.classify(&image()), ClassificationResult::no_result());
    }

    #[test]
    fn test_confidence_clamped() {
        let classifier = ready(vec![RawCategory::new("2", 1.7)]);
        assert_eq!(classifier.classify(&image()), ClassificationResult::new("bird", 1.0));
    }

    #[test]
    fn test_runtime_error_becomes_sentinel() {
        let classifier =
            LocalClassifier::with_runtime(Box::new(FailingRuntime), labels(), ClassifierOptions::default());

        let result = classifier.classify(&image());
        assert!(result.label.starts_with("Error: "));
        assert!(result.label.contains("tensor shape mismatch"));
        assert_eq!(result.confidence, 0.0);
    }

    #[test]
    fn test_release() {
        let classifier = ready(vec![RawCategory::new("0", 0.9)]);
        assert!(classifier.is_ready());
        assert_eq!(classifier.classify(&image()).label, "cat");

        assert!(classifier.release());
        assert!(!classifier.release());
        assert!(!classifier.is_ready());
        assert!(classifier.metadata().is_none());
        assert_eq!(classifier.classify(&image()), ClassificationResult::not_initialized());
    }

    #[test]
    fn test_uninitialized() {
        let classifier = LocalClassifier::uninitialized("no model bundled");
        assert_eq!(classifier.classify(&image()), ClassificationResult::not_initialized());

        let status = classifier.status();
        assert!(!status.model_loaded);
        assert_eq!(status.unavailable_reason.as_deref(), Some("no model bundled"));
    }

    #[test]
    fn test_load_missing_assets_is_uninitialized() {
        let dir = tempdir().unwrap();
        let assets = ModelAssets::from_dir(dir.path());

        assert!(LocalClassifier::try_load(&assets, ClassifierOptions::default()).is_err());

        let classifier = LocalClassifier::load(&assets, ClassifierOptions::default());
        assert!(!classifier.is_ready());
        assert_eq!(classifier.classify(&image()).confidence, 0.0);
    }

    #[test]
    fn test_status_counts_inferences() {
        let classifier = ready(vec![RawCategory::new("0", 0.9)]);
        for _ in 0..3 {
            classifier.classify(&image());
        }

        let status = classifier.status();
        assert!(status.model_loaded);
        assert_eq!(status.model_name, "fixed");
        assert_eq!(status.label_count, 3);
        assert_eq!(status.inference_count, 3);
    }

    #[test]
    fn test_max_results_caps_ranked_candidates() {
        let candidates = vec![
            RawCategory::new("1", 0.3),
            RawCategory::new("0", 0.6),
            RawCategory::new("2", 0.2),
            RawCategory::new("9", 0.05),
        ];
        let with_limit = |max_results| {
            LocalClassifier::with_runtime(
                Box::new(FixedRuntime(candidates.clone())),
                labels(),
                ClassifierOptions {
                    max_results,
                    ..ClassifierOptions::default()
                },
            )
        };

        let one = with_limit(1).classify_top_k(&image());
        assert_eq!(one, vec![ClassificationResult::new("cat", 0.6)]);

        let two = with_limit(2).classify_top_k(&image());
        assert_eq!(
            two,
            vec![ClassificationResult::new("cat", 0.6), ClassificationResult::new("dog", 0.3)]
        );

        // Below score threshold never shows up, however many are allowed
        let all = with_limit(1000).classify_top_k(&image());
        assert_eq!(all.len(), 3);
        assert_eq!(all[2], ClassificationResult::new("bird", 0.2));

        // Zero still yields the top candidate
        assert_eq!(with_limit(0).classify_top_k(&image()).len(), 1);

        // classify is always the head of the ranking
        assert_eq!(with_limit(1000).classify(&image()), all[0]);
    }

    #[test]
    fn test_top_k_sentinels() {
        let uninitialized = LocalClassifier::uninitialized("no model");
        assert_eq!(uninitialized.classify_top_k(&image()), vec![ClassificationResult::not_initialized()]);

        let empty = ready(vec![]);
        assert_eq!(empty.classify_top_k(&image()), vec![ClassificationResult::no_result()]);
    }

    #[test]
    fn test_release_waits_for_in_flight_classify() {
        let (entered_tx, entered_rx) = channel();
        let (proceed_tx, proceed_rx) = channel();
        let classifier = Arc::new(LocalClassifier::with_runtime(
            Box::new(GatedRuntime {
                entered: Mutex::new(entered_tx),
                proceed: Mutex::new(proceed_rx),
            }),
            labels(),
            ClassifierOptions::default(),
        ));

        let in_flight = {
            let classifier = Arc::clone(&classifier);
            thread::spawn(move || classifier.classify(&image()))
        };
        entered_rx
            .recv_timeout(Duration::from_secs(5))
            .expect("inference never started");

        let released = Arc::new(AtomicBool::new(false));
        let releaser = {
            let classifier = Arc::clone(&classifier);
            let released = Arc::clone(&released);
            thread::spawn(move || {
                let was_loaded = classifier.release();
                released.store(true, Ordering::SeqCst);
                was_loaded
            })
        };

        thread::sleep(Duration::from_millis(100));
        assert!(!released.load(Ordering::SeqCst), "release returned during inference");

        proceed_tx.send(()).unwrap();
        assert_eq!(in_flight.join().unwrap(), ClassificationResult::new("dog", 0.8));
        assert!(releaser.join().unwrap());
        assert!(released.load(Ordering::SeqCst));

        assert_eq!(classifier.classify(&image()), ClassificationResult::not_initialized());
    }
}
