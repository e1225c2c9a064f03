//! `fcut check`: report whether the live routing table has drifted.

use anyhow::{bail, Result};
use fcut_config::ConfigMode;
use fcut_reconcile::DriftStatus;
use tracing::info;

use super::plan::gated_plan;
use super::{load_inputs, resolve_config};

pub struct CheckArgs {
    pub observed: String,
    pub desired: String,
    pub config_paths: Vec<String>,
    pub strict_config: bool,
}

pub fn run(args: CheckArgs) -> Result<()> {
    let cfg = resolve_config(&args.config_paths, ConfigMode::Check, args.strict_config)?;
    let inputs = load_inputs(&args.observed, &args.desired)?;

    let plan = gated_plan(&inputs.observed, &inputs.desired, cfg.settings.validation)?;
    let status = DriftStatus::from_plan(plan);

    match &status {
        DriftStatus::InSync => {
            println!("drift=false");
        }
        DriftStatus::Drifted { plan } => {
            let c = plan.counts();
            println!(
                "drift=true add={} replace={} remove={} deploy={}",
                c.add, c.replace, c.remove, c.deploy
            );
            if !plan.deploy_targets.is_empty() {
                println!("deploy_targets={}", plan.deploy_targets.join(","));
            }
        }
    }

    info!(drift = status.has_drifted(), "check complete");

    if status.has_drifted() && cfg.settings.fail_on_drift {
        bail!("DRIFT_DETECTED: routing table does not match desired modules");
    }
    Ok(())
}
