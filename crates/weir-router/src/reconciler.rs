//! Weight reconciliation — maps a rollout snapshot to backend calls.
//!
//! `WeightReconciler` evaluates the decision table from `weir-core`
//! and drives zero, one, or two calls against the backend in a fixed
//! order, canary target before stable target, short-circuiting on the
//! first failure. It holds no state between invocations.

use tracing::{debug, info};

use weir_core::{decide, RolloutSnapshot, WeightDecision, WeightDestination};

use crate::backend::WeightBackend;
use crate::error::RouterResult;

/// Drives weight updates for one traffic-shaping backend.
pub struct WeightReconciler<B> {
    backend: B,
}

impl<B: WeightBackend> WeightReconciler<B> {
    /// Create a reconciler over the given backend.
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Reconcile one snapshot against the backend.
    ///
    /// `desired_weight` is the canary share (0-100). Extra
    /// destinations are forwarded into log events only. Any backend
    /// failure is returned verbatim; the orchestrator re-invokes on
    /// its own schedule.
    pub async fn reconcile(
        &self,
        ro: &RolloutSnapshot,
        desired_weight: i32,
        extra_destinations: &[WeightDestination],
    ) -> RouterResult<()> {
        info!(
            rollout = %ro.name,
            desired_weight,
            destinations = ?extra_destinations,
            "reconciling traffic weights"
        );

        match decide(ro, desired_weight) {
            WeightDecision::Skip(reason) => {
                info!(rollout = %ro.name, %reason, "skipping weight update");
                Ok(())
            }
            WeightDecision::Pin { weight } => {
                let target = ro.canary_target();
                info!(
                    rollout = %ro.name,
                    %target,
                    weight,
                    "pinning canary target after promotion"
                );
                self.backend.apply(&target, weight).await
            }
            WeightDecision::Split {
                canary_weight,
                stable_weight,
            } => {
                let canary_target = ro.canary_target();
                debug!(
                    rollout = %ro.name,
                    target = %canary_target,
                    weight = canary_weight,
                    "updating canary weight"
                );
                self.backend.apply(&canary_target, canary_weight).await?;

                let stable_target = ro.stable_target();
                debug!(
                    rollout = %ro.name,
                    target = %stable_target,
                    weight = stable_weight,
                    "updating stable weight"
                );
                self.backend.apply(&stable_target, stable_weight).await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use weir_core::CanaryStatus;

    use super::*;
    use crate::error::RouterError;

    // ── Test backend ────────────────────────────────────────────────

    /// Records applied weights; fails any target on its deny list.
    #[derive(Default)]
    struct RecordingBackend {
        calls: Mutex<Vec<(String, i32)>>,
        fail_targets: Vec<String>,
    }

    impl RecordingBackend {
        fn failing_on(target: &str) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail_targets: vec![target.to_string()],
            }
        }

        fn calls(&self) -> Vec<(String, i32)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl WeightBackend for RecordingBackend {
        async fn apply(&self, target: &str, weight: i32) -> RouterResult<()> {
            self.calls
                .lock()
                .unwrap()
                .push((target.to_string(), weight));
            if self.fail_targets.iter().any(|t| t == target) {
                return Err(RouterError::BackendStatus(500));
            }
            Ok(())
        }
    }

    fn active_snapshot() -> RolloutSnapshot {
        RolloutSnapshot {
            name: "checkout".to_string(),
            current_pod_hash: "abc123".to_string(),
            stable_replica_set_hash: "def456".to_string(),
            abort: false,
            controller_pause: false,
            canary: Some(CanaryStatus {
                canary_weight: 10,
                stable_weight: 90,
            }),
        }
    }

    // ── Skip states ─────────────────────────────────────────────────

    #[tokio::test]
    async fn no_canary_status_issues_no_calls() {
        let reconciler = WeightReconciler::new(RecordingBackend::default());
        let mut ro = active_snapshot();
        ro.canary = None;

        reconciler.reconcile(&ro, 30, &[]).await.unwrap();
        assert!(reconciler.backend.calls().is_empty());
    }

    #[tokio::test]
    async fn aborted_rollout_issues_no_calls() {
        let reconciler = WeightReconciler::new(RecordingBackend::default());
        let mut ro = active_snapshot();
        ro.abort = true;

        for desired in [0, 30, 100] {
            reconciler.reconcile(&ro, desired, &[]).await.unwrap();
        }
        assert!(reconciler.backend.calls().is_empty());
    }

    #[tokio::test]
    async fn paused_rollout_issues_no_calls() {
        let reconciler = WeightReconciler::new(RecordingBackend::default());
        let mut ro = active_snapshot();
        ro.controller_pause = true;

        reconciler.reconcile(&ro, 30, &[]).await.unwrap();
        assert!(reconciler.backend.calls().is_empty());
    }

    #[tokio::test]
    async fn promoted_with_other_weights_issues_no_calls() {
        let reconciler = WeightReconciler::new(RecordingBackend::default());
        let mut ro = active_snapshot();
        ro.stable_replica_set_hash = ro.current_pod_hash.clone();
        ro.canary = Some(CanaryStatus {
            canary_weight: 5,
            stable_weight: 95,
        });

        reconciler.reconcile(&ro, 30, &[]).await.unwrap();
        assert!(reconciler.backend.calls().is_empty());
    }

    // ── Promotion pin ───────────────────────────────────────────────

    #[tokio::test]
    async fn promoted_handover_pins_canary_to_one() {
        let reconciler = WeightReconciler::new(RecordingBackend::default());
        let mut ro = active_snapshot();
        ro.stable_replica_set_hash = ro.current_pod_hash.clone();
        ro.canary = Some(CanaryStatus {
            canary_weight: 0,
            stable_weight: 100,
        });

        reconciler.reconcile(&ro, 30, &[]).await.unwrap();
        assert_eq!(
            reconciler.backend.calls(),
            vec![("checkout-abc123".to_string(), 1)]
        );
    }

    #[tokio::test]
    async fn pin_failure_is_propagated() {
        let reconciler =
            WeightReconciler::new(RecordingBackend::failing_on("checkout-abc123"));
        let mut ro = active_snapshot();
        ro.stable_replica_set_hash = ro.current_pod_hash.clone();
        ro.canary = Some(CanaryStatus {
            canary_weight: 0,
            stable_weight: 100,
        });

        let err = reconciler.reconcile(&ro, 30, &[]).await.unwrap_err();
        assert!(matches!(err, RouterError::BackendStatus(500)));
        assert_eq!(reconciler.backend.calls().len(), 1);
    }

    // ── Active split ────────────────────────────────────────────────

    #[tokio::test]
    async fn split_updates_canary_then_stable() {
        let reconciler = WeightReconciler::new(RecordingBackend::default());
        let ro = active_snapshot();

        reconciler.reconcile(&ro, 30, &[]).await.unwrap();
        assert_eq!(
            reconciler.backend.calls(),
            vec![
                ("checkout-abc123".to_string(), 30),
                ("checkout-def456".to_string(), 70),
            ]
        );
    }

    #[tokio::test]
    async fn canary_failure_short_circuits_stable_update() {
        let reconciler =
            WeightReconciler::new(RecordingBackend::failing_on("checkout-abc123"));
        let ro = active_snapshot();

        let err = reconciler.reconcile(&ro, 30, &[]).await.unwrap_err();
        assert!(matches!(err, RouterError::BackendStatus(500)));
        // The stable call was never attempted.
        assert_eq!(
            reconciler.backend.calls(),
            vec![("checkout-abc123".to_string(), 30)]
        );
    }

    #[tokio::test]
    async fn stable_failure_is_the_invocation_result() {
        let reconciler =
            WeightReconciler::new(RecordingBackend::failing_on("checkout-def456"));
        let ro = active_snapshot();

        let err = reconciler.reconcile(&ro, 30, &[]).await.unwrap_err();
        assert!(matches!(err, RouterError::BackendStatus(500)));
        assert_eq!(reconciler.backend.calls().len(), 2);
    }

    #[tokio::test]
    async fn repeated_reconcile_repeats_the_same_sequence() {
        let reconciler = WeightReconciler::new(RecordingBackend::default());
        let ro = active_snapshot();

        reconciler.reconcile(&ro, 40, &[]).await.unwrap();
        reconciler.reconcile(&ro, 40, &[]).await.unwrap();

        let calls = reconciler.backend.calls();
        assert_eq!(calls.len(), 4);
        assert_eq!(calls[..2], calls[2..]);
    }

    #[tokio::test]
    async fn extra_destinations_are_not_dispatched() {
        let reconciler = WeightReconciler::new(RecordingBackend::default());
        let ro = active_snapshot();
        let extra = vec![WeightDestination {
            service_name: "preview".to_string(),
            weight: 5,
        }];

        reconciler.reconcile(&ro, 30, &extra).await.unwrap();
        // Only the canary/stable pair; the extra destination is
        // observability-only.
        assert_eq!(reconciler.backend.calls().len(), 2);
    }
}
