//! The traffic-router operation surface consumed by the orchestrator.
//!
//! Only `set_weight` carries real logic — it delegates to the
//! reconciler. Header routes, mirror routes, and managed-route
//! removal are accepted and ignored; weight verification is not
//! implemented; hash updates are logged for observability.

use tracing::info;

use weir_core::{HeaderRoute, MirrorRoute, RolloutSnapshot, WeightDestination};

use crate::backend::WeightBackend;
use crate::error::RouterResult;
use crate::reconciler::WeightReconciler;

/// Identifier this router registers under with the orchestrator.
pub const ROUTER_TYPE: &str = "weir";

/// Outcome of a weight-verification request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyOutcome {
    Verified,
    NotVerified,
    /// This router does not verify weights.
    NotImplemented,
}

/// Traffic router for a single traffic-shaping backend.
pub struct TrafficRouter<B> {
    reconciler: WeightReconciler<B>,
}

impl<B: WeightBackend> TrafficRouter<B> {
    /// Create a router over the given backend.
    pub fn new(backend: B) -> Self {
        Self {
            reconciler: WeightReconciler::new(backend),
        }
    }

    /// Called once after registration. Lifecycle beyond the log line
    /// belongs to the orchestrator.
    pub fn init(&self) -> RouterResult<()> {
        info!(router = ROUTER_TYPE, "traffic router initialized");
        Ok(())
    }

    /// Adjust the live traffic split for a rollout.
    pub async fn set_weight(
        &self,
        ro: &RolloutSnapshot,
        desired_weight: i32,
        extra_destinations: &[WeightDestination],
    ) -> RouterResult<()> {
        self.reconciler
            .reconcile(ro, desired_weight, extra_destinations)
            .await
    }

    /// Header-based routing is not performed by this router.
    pub fn set_header_route(
        &self,
        _ro: &RolloutSnapshot,
        _route: &HeaderRoute,
    ) -> RouterResult<()> {
        Ok(())
    }

    /// Traffic mirroring is not performed by this router.
    pub fn set_mirror_route(
        &self,
        _ro: &RolloutSnapshot,
        _route: &MirrorRoute,
    ) -> RouterResult<()> {
        Ok(())
    }

    /// No managed routes exist, so there is nothing to remove.
    pub fn remove_managed_routes(&self, _ro: &RolloutSnapshot) -> RouterResult<()> {
        Ok(())
    }

    /// Notification of new canary/stable pod hashes. Logged only.
    pub fn update_hash(
        &self,
        ro: &RolloutSnapshot,
        canary_hash: &str,
        stable_hash: &str,
        extra_destinations: &[WeightDestination],
    ) -> RouterResult<()> {
        info!(
            rollout = %ro.name,
            canary_hash,
            stable_hash,
            destinations = ?extra_destinations,
            "pod hashes updated"
        );
        Ok(())
    }

    /// Weight verification is not implemented.
    pub async fn verify_weight(
        &self,
        _ro: &RolloutSnapshot,
        _desired_weight: i32,
        _extra_destinations: &[WeightDestination],
    ) -> RouterResult<VerifyOutcome> {
        Ok(VerifyOutcome::NotImplemented)
    }

    /// Registration identifier for this router.
    pub fn type_name(&self) -> &'static str {
        ROUTER_TYPE
    }
}
