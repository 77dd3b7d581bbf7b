//! weir-router — weight reconciliation against a traffic-shaping backend.
//!
//! Weir is invoked as a callback by a deployment orchestrator whenever
//! it wants to adjust live traffic between the canary and stable pod
//! generations of a rollout. Each invocation is a pure function of the
//! supplied snapshot plus at most two outbound HTTP calls; nothing is
//! retried, persisted, or reconciled across invocations.
//!
//! # Architecture
//!
//! ```text
//! orchestrator
//!   └── TrafficRouter (operation surface)
//!         ├── set_weight → WeightReconciler
//!         │     ├── weir_core::decide → Skip | Pin | Split
//!         │     └── WeightUpdateClient (0..2 ordered GETs, short-circuit)
//!         ├── header/mirror/managed routes → no-ops
//!         ├── update_hash → logging only
//!         └── verify_weight → NotImplemented
//! ```

pub mod backend;
pub mod config;
pub mod error;
pub mod reconciler;
pub mod router;

pub use backend::{WeightBackend, WeightUpdateClient};
pub use config::{BackendConfig, RouterConfig, DEFAULT_BACKEND_ENDPOINT};
pub use error::{RouterError, RouterResult};
pub use reconciler::WeightReconciler;
pub use router::{TrafficRouter, VerifyOutcome, ROUTER_TYPE};
