//! weir-core — rollout snapshots and the canary weight decision table.
//!
//! This crate holds the pure half of Weir: the domain types the
//! orchestrator supplies on each callback and the ordered rule table
//! that maps a snapshot to a weight decision. No I/O lives here; the
//! backend calls driven by a decision belong to `weir-router`.
//!
//! # Components
//!
//! - **`types`** — Rollout snapshot, canary status, destination and route parameters
//! - **`decision`** — Ordered skip/pin/split rules (`decide`)

pub mod decision;
pub mod types;

pub use decision::{decide, SkipReason, WeightDecision, PROMOTED_PIN_WEIGHT};
pub use types::{
    CanaryStatus, HeaderMatch, HeaderRoute, MirrorRoute, RolloutSnapshot, WeightDestination,
};
