//! `fcut validate`: run pre-validation only.

use anyhow::{bail, Result};
use fcut_reconcile::validate;

use super::load_inputs;

pub fn run(observed: &str, desired: &str) -> Result<()> {
    let inputs = load_inputs(observed, desired)?;
    let report = validate(&inputs.observed, &inputs.desired);

    if report.is_valid() {
        println!("valid=true");
        return Ok(());
    }

    println!("valid=false issues={}", report.issues.len());
    for issue in &report.issues {
        println!("issue={issue}");
    }
    bail!("INPUTS_INVALID: {} issue(s)", report.issues.len());
}
