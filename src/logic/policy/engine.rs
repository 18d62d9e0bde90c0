//! Decision Policy - Local-First Fallback
//!
//! One pass per call, at most one remote call:
//!
//! ```text
//! LOCAL_ATTEMPTED ──(conf >= threshold)──────────────► ACCEPTED
//!        │
//!        ├──(fallback not allowed)───────────────────► UNSURE
//!        │
//!        └──► FALLBACK_INVOKED ──(ok)────────────────► ACCEPTED_REMOTE
//!                    └──(error / timeout / cancel)───► UNSURE
//! ```
//!
//! UNSURE always carries the local confidence.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use super::config::PolicyConfig;
use super::remote::{RemoteClassifier, RemoteError};
use super::types::{Decision, DecisionOutcome, PolicyStatsSnapshot};
use crate::logic::model::{ClassificationResult, ImageBuffer, ImageClassifier};

// ============================================================================
// STATS
// ============================================================================

#[derive(Default)]
struct PolicyStats {
    accepted_local: AtomicU64,
    unsure_fallback_disabled: AtomicU64,
    accepted_remote: AtomicU64,
    remote_failed: AtomicU64,
    remote_timed_out: AtomicU64,
    remote_cancelled: AtomicU64,
    remote_missing: AtomicU64,
}

impl PolicyStats {
    fn record(&self, outcome: DecisionOutcome) {
        let counter = match outcome {
            DecisionOutcome::AcceptedLocal => &self.accepted_local,
            DecisionOutcome::UnsureFallbackDisabled => &self.unsure_fallback_disabled,
            DecisionOutcome::AcceptedRemote => &self.accepted_remote,
            DecisionOutcome::RemoteFailed => &self.remote_failed,
            DecisionOutcome::RemoteTimedOut => &self.remote_timed_out,
            DecisionOutcome::RemoteCancelled => &self.remote_cancelled,
            DecisionOutcome::RemoteMissing => &self.remote_missing,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    fn snapshot(&self) -> PolicyStatsSnapshot {
        let mut snapshot = PolicyStatsSnapshot {
            total_decisions: 0,
            accepted_local: self.accepted_local.load(Ordering::Relaxed),
            unsure_fallback_disabled: self.unsure_fallback_disabled.load(Ordering::Relaxed),
            accepted_remote: self.accepted_remote.load(Ordering::Relaxed),
            remote_failed: self.remote_failed.load(Ordering::Relaxed),
            remote_timed_out: self.remote_timed_out.load(Ordering::Relaxed),
            remote_cancelled: self.remote_cancelled.load(Ordering::Relaxed),
            remote_missing: self.remote_missing.load(Ordering::Relaxed),
        };
        snapshot.total_decisions = snapshot.accepted_local
            + snapshot.unsure_fallback_disabled
            + snapshot.accepted_remote
            + snapshot.remote_failed
            + snapshot.remote_timed_out
            + snapshot.remote_cancelled
            + snapshot.remote_missing;
        snapshot
    }
}

// ============================================================================
// DECISION POLICY
// ============================================================================

/// Orchestrates the on-device classifier and the optional remote fallback.
///
/// Holds no per-call state; concurrent `decide` calls are independent.
pub struct DecisionPolicy {
    local: Arc<dyn ImageClassifier>,
    remote: Option<Arc<dyn RemoteClassifier>>,
    stats: PolicyStats,
}

impl DecisionPolicy {
    pub fn new(local: Arc<dyn ImageClassifier>) -> Self {
        Self {
            local,
            remote: None,
            stats: PolicyStats::default(),
        }
    }

    pub fn with_remote(mut self, remote: Arc<dyn RemoteClassifier>) -> Self {
        self.remote = Some(remote);
        self
    }

    pub fn has_remote(&self) -> bool {
        self.remote.is_some()
    }

    /// Final classification for `image` under `config`
    pub async fn decide(&self, image: &ImageBuffer, config: &PolicyConfig) -> ClassificationResult {
        self.decide_traced(image, config).await.result
    }

    /// Like [`DecisionPolicy::decide`], also reporting which path was taken
    pub async fn decide_traced(&self, image: &ImageBuffer, config: &PolicyConfig) -> Decision {
        self.decide_with_cancel(image, config, std::future::pending::<()>())
            .await
    }

    /// Like [`DecisionPolicy::decide_traced`]; if `cancelled` completes while
    /// the remote call is outstanding, the call is dropped and the decision
    /// degrades to "unsure".
    pub async fn decide_with_cancel<F>(
        &self,
        image: &ImageBuffer,
        config: &PolicyConfig,
        cancelled: F,
    ) -> Decision
    where
        F: Future<Output = ()>,
    {
        let local = self.local.classify(image);

        if local.confidence >= config.confidence_threshold {
            return self.finish(local, DecisionOutcome::AcceptedLocal);
        }

        if !config.allow_fallback {
            return self.finish(
                ClassificationResult::unsure(local.confidence),
                DecisionOutcome::UnsureFallbackDisabled,
            );
        }

        let Some(remote) = self.remote.as_ref() else {
            log::warn!("Fallback allowed but no remote classifier configured");
            return self.finish(
                ClassificationResult::unsure(local.confidence),
                DecisionOutcome::RemoteMissing,
            );
        };

        log::debug!(
            "Local confidence {:.2} < {:.2}, asking {}",
            local.confidence,
            config.confidence_threshold,
            remote.name()
        );

        let remote_call = tokio::time::timeout(config.remote_timeout(), remote.classify(image));
        let answer = tokio::select! {
            res = remote_call => match res {
                Ok(Ok(result)) => Ok(result),
                Ok(Err(e)) => Err(e),
                Err(_) => Err(RemoteError::Timeout),
            },
            _ = cancelled => Err(RemoteError::Cancelled),
        };

        match answer {
            Ok(result) => self.finish(result, DecisionOutcome::AcceptedRemote),
            Err(e) => {
                log::warn!("Remote fallback failed ({}), returning unsure", e);
                let outcome = match e {
                    RemoteError::Timeout => DecisionOutcome::RemoteTimedOut,
                    RemoteError::Cancelled => DecisionOutcome::RemoteCancelled,
                    RemoteError::Unavailable(_) | RemoteError::InvalidResponse(_) => {
                        DecisionOutcome::RemoteFailed
                    }
                };
                self.finish(ClassificationResult::unsure(local.confidence), outcome)
            }
        }
    }

    pub fn stats(&self) -> PolicyStatsSnapshot {
        self.stats.snapshot()
    }

    fn finish(&self, result: ClassificationResult, outcome: DecisionOutcome) -> Decision {
        self.stats.record(outcome);
        log::debug!(
            "Decision {}: {} ({:.2})",
            outcome,
            result.label,
            result.confidence
        );
        Decision { result, outcome }
    }
}
