//! `fcut plan`: compute the edit plan and emit it wrapped in an envelope.

use anyhow::{bail, Result};
use fcut_config::{ConfigMode, ValidationPolicy};
use fcut_reconcile::{check_apply_gate, reconcile, validate, ApplyGate, EditPlan};
use fcut_schemas::PlanEnvelope;
use std::path::Path;
use tracing::{info, warn};

use super::{load_inputs, print_json, resolve_config};

pub struct PlanArgs {
    pub observed: String,
    pub desired: String,
    pub config_paths: Vec<String>,
    /// Overrides `/output/exports_root`.
    pub export_root: Option<String>,
    pub strict_config: bool,
}

/// Run the configured validation policy, then reconcile.
pub fn gated_plan(
    observed: &[fcut_reconcile::ObservedModuleRecord],
    desired: &[fcut_reconcile::DesiredModuleRecord],
    policy: ValidationPolicy,
) -> Result<EditPlan> {
    match policy {
        ValidationPolicy::Fail => match check_apply_gate(observed, desired) {
            ApplyGate::Permitted { plan } => Ok(plan),
            ApplyGate::Blocked { report } => {
                let lines: Vec<String> = report.issues.iter().map(|i| i.to_string()).collect();
                bail!(
                    "INPUTS_INVALID: {} issue(s); refusing to emit a plan:\n  {}",
                    lines.len(),
                    lines.join("\n  ")
                );
            }
        },
        ValidationPolicy::Warn => {
            for issue in validate(observed, desired).issues {
                warn!(%issue, "input validation issue");
            }
            Ok(reconcile(observed, desired))
        }
        ValidationPolicy::Skip => Ok(reconcile(observed, desired)),
    }
}

pub fn run(args: PlanArgs) -> Result<()> {
    let cfg = resolve_config(&args.config_paths, ConfigMode::Plan, args.strict_config)?;
    let inputs = load_inputs(&args.observed, &args.desired)?;

    let plan = gated_plan(&inputs.observed, &inputs.desired, cfg.settings.validation)?;

    let counts = plan.counts();
    info!(
        add = counts.add,
        replace = counts.replace,
        remove = counts.remove,
        deploy = counts.deploy,
        "plan computed"
    );

    let envelope = PlanEnvelope::new(
        inputs.observed_hash,
        inputs.desired_hash,
        cfg.config_hash,
        plan,
    );

    let exports_root = args.export_root.or(cfg.settings.exports_root);
    if let Some(root) = exports_root {
        fcut_artifacts::write_plan_artifacts(Path::new(&root), &envelope)?;
    }

    print_json(&envelope, cfg.settings.pretty)
}
