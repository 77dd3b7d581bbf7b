//! The canary weight decision table.
//!
//! Reconciliation is a fixed sequence of predicate→action rules over
//! the rollout snapshot, evaluated top to bottom with the first match
//! winning. Keeping the rules as a pure function over the snapshot
//! makes the precedence testable without any backend in the loop.

use std::fmt;

use crate::types::{CanaryStatus, RolloutSnapshot};

/// Weight held on the canary target after full promotion.
///
/// A zero weight would let the backend drop the canary's traffic
/// entry; pinning 1% keeps the entry alive and addressable.
pub const PROMOTED_PIN_WEIGHT: i32 = 1;

/// What a reconcile invocation should do with the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WeightDecision {
    /// Valid steady state, no backend call.
    Skip(SkipReason),
    /// Single call pinning the canary target to `weight`.
    Pin { weight: i32 },
    /// Two calls in order: canary target first, stable target second.
    Split {
        canary_weight: i32,
        stable_weight: i32,
    },
}

/// Why a reconcile invocation issues no weight update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// No canary phase has started yet. Expected on initial rollout.
    NoCanaryStatus,
    /// The rollout was aborted. Weights applied earlier are left in
    /// place; reverting them on abort is a known gap.
    Aborted,
    /// Canary has converged to stable and no pin is needed.
    FullyPromoted,
    /// Automatic progression is paused.
    ControllerPaused,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoCanaryStatus => f.write_str("no canary status"),
            Self::Aborted => f.write_str("rollout aborted"),
            Self::FullyPromoted => f.write_str("fully promoted"),
            Self::ControllerPaused => f.write_str("controller paused"),
        }
    }
}

/// Evaluate the decision rules for one snapshot.
///
/// `desired_weight` is the canary share (0-100); the stable share is
/// always its complement. Rules, first match wins:
///
/// 1. no (or zero-valued) canary status → skip
/// 2. aborted → skip
/// 3. fully promoted → skip, unless the recorded weights are exactly
///    canary 0 / stable 100, in which case pin the canary target
/// 4. controller paused → skip
/// 5. otherwise → split `desired_weight` / `100 - desired_weight`
pub fn decide(ro: &RolloutSnapshot, desired_weight: i32) -> WeightDecision {
    let canary = match &ro.canary {
        Some(status) if *status != CanaryStatus::default() => status,
        _ => return WeightDecision::Skip(SkipReason::NoCanaryStatus),
    };

    if ro.abort {
        // todo: revert previously-applied weights
        return WeightDecision::Skip(SkipReason::Aborted);
    }

    if ro.is_fully_promoted() {
        if canary.canary_weight == 0 && canary.stable_weight == 100 {
            return WeightDecision::Pin {
                weight: PROMOTED_PIN_WEIGHT,
            };
        }
        return WeightDecision::Skip(SkipReason::FullyPromoted);
    }

    if ro.controller_pause {
        return WeightDecision::Skip(SkipReason::ControllerPaused);
    }

    WeightDecision::Split {
        canary_weight: desired_weight,
        stable_weight: 100 - desired_weight,
    }
}
