//! Domain types for rollout snapshots and traffic destinations.
//!
//! These are the read-only inputs the orchestrator hands to Weir on
//! every callback. A fresh snapshot is supplied per invocation; nothing
//! here is retained between calls.

use serde::{Deserialize, Serialize};

/// Point-in-time view of a rollout, as reported by the orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RolloutSnapshot {
    /// Rollout name. Target names are derived from this.
    pub name: String,
    /// Pod hash of the canary generation.
    pub current_pod_hash: String,
    /// Pod hash of the stable generation.
    pub stable_replica_set_hash: String,
    /// The rollout has been aborted.
    #[serde(default)]
    pub abort: bool,
    /// The orchestrator has paused automatic progression.
    #[serde(default)]
    pub controller_pause: bool,
    /// Currently-applied traffic weights. Absent before any canary
    /// phase has started — a valid state, not an error.
    #[serde(default)]
    pub canary: Option<CanaryStatus>,
}

impl RolloutSnapshot {
    /// Whether the canary generation has become the new stable
    /// generation and the progressive rollout has concluded.
    pub fn is_fully_promoted(&self) -> bool {
        self.stable_replica_set_hash == self.current_pod_hash
    }

    /// Backend target name for the canary generation.
    pub fn canary_target(&self) -> String {
        format!("{}-{}", self.name, self.current_pod_hash)
    }

    /// Backend target name for the stable generation.
    pub fn stable_target(&self) -> String {
        format!("{}-{}", self.name, self.stable_replica_set_hash)
    }
}

/// Traffic weights currently applied to a rollout's generations.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CanaryStatus {
    /// Share of traffic on the canary generation (0-100).
    pub canary_weight: i32,
    /// Share of traffic on the stable generation (0-100).
    pub stable_weight: i32,
}

/// An auxiliary traffic target passed through for observability.
///
/// Weir never mutates these or dispatches on them; they are forwarded
/// into log events and otherwise left untouched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeightDestination {
    pub service_name: String,
    pub weight: i32,
}

/// Parameters for a header-based route. Accepted and ignored; header
/// routing is not performed by this router.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HeaderRoute {
    pub name: String,
    #[serde(default)]
    pub matches: Vec<HeaderMatch>,
}

/// A single header matcher within a [`HeaderRoute`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HeaderMatch {
    pub header_name: String,
    pub header_value: String,
}

/// Parameters for a mirrored route. Accepted and ignored; traffic
/// mirroring is not performed by this router.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MirrorRoute {
    pub name: String,
    #[serde(default)]
    pub percentage: Option<i32>,
}
