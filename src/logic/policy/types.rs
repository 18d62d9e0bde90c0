//! Decision Types
//!
//! Terminal states of one `decide` pass and the counters built from them.

use serde::{Deserialize, Serialize};

use crate::logic::model::ClassificationResult;

/// How a decision ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionOutcome {
    /// Local confidence met the threshold
    AcceptedLocal,
    /// Below threshold, fallback not allowed
    UnsureFallbackDisabled,
    /// Remote answered; its result replaced the local one
    AcceptedRemote,
    /// Remote returned an error
    RemoteFailed,
    /// Remote exceeded the configured budget
    RemoteTimedOut,
    /// Caller cancelled while the remote call was outstanding
    RemoteCancelled,
    /// Fallback allowed but no remote classifier configured
    RemoteMissing,
}

impl DecisionOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            DecisionOutcome::AcceptedLocal => "accepted_local",
            DecisionOutcome::UnsureFallbackDisabled => "unsure_fallback_disabled",
            DecisionOutcome::AcceptedRemote => "accepted_remote",
            DecisionOutcome::RemoteFailed => "remote_failed",
            DecisionOutcome::RemoteTimedOut => "remote_timed_out",
            DecisionOutcome::RemoteCancelled => "remote_cancelled",
            DecisionOutcome::RemoteMissing => "remote_missing",
        }
    }

    /// Whether a remote call was started
    pub fn remote_invoked(&self) -> bool {
        matches!(
            self,
            DecisionOutcome::AcceptedRemote
                | DecisionOutcome::RemoteFailed
                | DecisionOutcome::RemoteTimedOut
                | DecisionOutcome::RemoteCancelled
        )
    }

    /// Whether the result is the "unsure" sentinel
    pub fn is_unsure(&self) -> bool {
        !matches!(self, DecisionOutcome::AcceptedLocal | DecisionOutcome::AcceptedRemote)
    }
}

impl std::fmt::Display for DecisionOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Final result plus the path that produced it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub result: ClassificationResult,
    pub outcome: DecisionOutcome,
}

/// Outcome counters since the policy was created
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyStatsSnapshot {
    pub total_decisions: u64,
    pub accepted_local: u64,
    pub unsure_fallback_disabled: u64,
    pub accepted_remote: u64,
    pub remote_failed: u64,
    pub remote_timed_out: u64,
    pub remote_cancelled: u64,
    pub remote_missing: u64,
}

impl PolicyStatsSnapshot {
    /// Share of decisions that never left the device
    pub fn local_ratio(&self) -> f32 {
        if self.total_decisions == 0 {
            return 0.0;
        }
        let remote = self.accepted_remote + self.remote_failed + self.remote_timed_out + self.remote_cancelled;
        (self.total_decisions - remote) as f32 / self.total_decisions as f32
    }
}
