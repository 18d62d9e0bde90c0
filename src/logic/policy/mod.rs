//! Policy Module - Local-First Decision
//!
//! Structure:
//! - `config.rs` - Per-call configuration
//! - `remote.rs` - Remote fallback trait + errors
//! - `types.rs` - Outcomes and stats
//! - `engine.rs` - Decision policy
//! - `local_only.rs` - Classifier that never escalates

pub mod config;
pub mod engine;
pub mod local_only;
pub mod remote;
pub mod types;


// Re-exports
pub use config::PolicyConfig;
pub use engine::DecisionPolicy;
pub use local_only::LocalOnlyClassifier;
pub use remote::{RemoteClassifier, RemoteError};
pub use types::{Decision, DecisionOutcome, PolicyStatsSnapshot};
