//! Apply gate and drift check.
//!
//! Two check surfaces sit on top of the pure reconciler:
//!
//! 1. **Apply gate** (`check_apply_gate`): every plan handed to an executor
//!    MUST come through here. Inputs that break the reconciler's invariants
//!    block; otherwise the computed plan is released.
//!
//! 2. **Drift check** (`drift_check`): answers "does the live table match?"
//!    for monitoring and CI. Returns [`DriftStatus::Drifted`] carrying the
//!    plan whenever it is not a no-op.
//!
//! Both are pure deterministic: no IO, no clock, no randomness.

use crate::{reconcile, validate, DesiredModuleRecord, EditPlan, ObservedModuleRecord, ValidationReport};

// ---------------------------------------------------------------------------
// Apply gate
// ---------------------------------------------------------------------------

/// Result of an apply gate check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ApplyGate {
    /// Inputs are valid; `plan` may be handed to the executor.
    Permitted { plan: EditPlan },
    /// Inputs violate a reconciler invariant. No plan is produced.
    ///
    /// The embedded `report` carries every issue found for logging.
    Blocked { report: ValidationReport },
}

impl ApplyGate {
    pub fn is_permitted(&self) -> bool {
        matches!(self, ApplyGate::Permitted { .. })
    }

    pub fn is_blocked(&self) -> bool {
        !self.is_permitted()
    }

    /// The released plan, if any.
    pub fn plan(&self) -> Option<&EditPlan> {
        match self {
            ApplyGate::Permitted { plan } => Some(plan),
            ApplyGate::Blocked { .. } => None,
        }
    }
}

/// Validate, then reconcile. A blocked gate never computes a plan.
pub fn check_apply_gate(
    observed: &[ObservedModuleRecord],
    desired: &[DesiredModuleRecord],
) -> ApplyGate {
    let report = validate(observed, desired);
    if !report.is_valid() {
        return ApplyGate::Blocked { report };
    }
    ApplyGate::Permitted {
        plan: reconcile(observed, desired),
    }
}

// ---------------------------------------------------------------------------
// Drift check
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DriftStatus {
    /// Live routing table already matches the desired module set.
    InSync,
    /// At least one edit is needed.
    Drifted { plan: EditPlan },
}

impl DriftStatus {
    pub fn is_in_sync(&self) -> bool {
        matches!(self, DriftStatus::InSync)
    }

    pub fn has_drifted(&self) -> bool {
        !self.is_in_sync()
    }

    /// Classify an already computed plan.
    pub fn from_plan(plan: EditPlan) -> Self {
        if plan.is_noop() {
            DriftStatus::InSync
        } else {
            DriftStatus::Drifted { plan }
        }
    }
}

/// Stateless; the same inputs always produce the same status.
pub fn drift_check(observed: &[ObservedModuleRecord], desired: &[DesiredModuleRecord]) -> DriftStatus {
    DriftStatus::from_plan(reconcile(observed, desired))
}
