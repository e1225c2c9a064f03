use std::collections::HashSet;

use tracing::debug;

use crate::differ::diff_all;
use crate::{DesiredModuleRecord, EditPlan, ModuleDiff, ObservedModuleRecord, RoutingIndex, Selector};

fn push_name_once(names: &mut Vec<String>, name: &str) {
    if !names.iter().any(|n| n == name) {
        names.push(name.to_string());
    }
}

/// Selectors live on-chain but claimed by no desired module, in observed
/// traversal order (record order, then per-record selector order).
fn removals(observed: &[ObservedModuleRecord], desired: &[DesiredModuleRecord]) -> Vec<Selector> {
    let claimed: HashSet<&Selector> = desired.iter().flat_map(|d| d.selectors.iter()).collect();

    observed
        .iter()
        .flat_map(|r| r.selectors.iter())
        .filter(|s| !claimed.contains(s))
        .cloned()
        .collect()
}

/// Combine per-module classifications into the final plan.
///
/// `diffs` must be in desired snapshot order; that order becomes the insertion
/// order of `add` / `replace` and therefore the order of `deploy_targets`.
pub fn assemble_plan(
    observed: &[ObservedModuleRecord],
    desired: &[DesiredModuleRecord],
    diffs: Vec<ModuleDiff>,
) -> EditPlan {
    let mut plan = EditPlan::empty();

    for diff in diffs {
        let ModuleDiff { name, add, replace } = diff;
        if !add.is_empty() {
            plan.add.insert(name.clone(), add);
        }
        if !replace.is_empty() {
            plan.replace.insert(name, replace);
        }
    }

    plan.remove = removals(observed, desired);

    // Add order first, then names that only need a replace.
    for name in plan.add.keys().chain(plan.replace.keys()) {
        push_name_once(&mut plan.deploy_targets, name);
    }

    let counts = plan.counts();
    debug!(
        add = counts.add,
        replace = counts.replace,
        remove = counts.remove,
        deploy = counts.deploy,
        "edit plan assembled"
    );

    plan
}

/// Deterministic reconciliation of an observed routing table against the
/// desired module set.
///
/// Pure: no IO, no clock, no randomness. Identical inputs give identical
/// output, ordering included. Inputs are assumed to have passed
/// [`crate::validate`]; on invalid input the result is still total but
/// carries no guarantees.
pub fn reconcile(observed: &[ObservedModuleRecord], desired: &[DesiredModuleRecord]) -> EditPlan {
    let index = RoutingIndex::build(observed);
    let diffs = diff_all(desired, &index);
    assemble_plan(observed, desired, diffs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replace_only_names_follow_add_names_in_deploy_order() {
        let observed = vec![
            ObservedModuleRecord::new("0xaa", ["0x01"], "old"),
            ObservedModuleRecord::new("0xbb", ["0x02"], "old"),
        ];
        let desired = vec![
            DesiredModuleRecord::new("R", ["0x01"], "new"),
            DesiredModuleRecord::new("AR", ["0x02", "0x03"], "new"),
            DesiredModuleRecord::new("A", ["0x04"], "new"),
        ];

        let plan = reconcile(&observed, &desired);
        assert_eq!(plan.add.keys().collect::<Vec<_>>(), vec!["AR", "A"]);
        assert_eq!(plan.replace.keys().collect::<Vec<_>>(), vec!["R", "AR"]);
        assert_eq!(plan.deploy_targets, vec!["AR", "A", "R"]);
    }

    #[test]
    fn removals_follow_observed_order_not_desired_order() {
        let observed = vec![
            ObservedModuleRecord::new("0xbb", ["0x09", "0x03"], "h"),
            ObservedModuleRecord::new("0xaa", ["0x07", "0x01"], "h"),
        ];
        let desired = vec![DesiredModuleRecord::new("A", ["0x03"], "h")];

        let plan = reconcile(&observed, &desired);
        assert_eq!(
            plan.remove,
            vec![Selector::new("0x09"), Selector::new("0x07"), Selector::new("0x01")]
        );
    }
}
