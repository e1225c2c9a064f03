//! Pre-validation of reconciliation inputs.
//!
//! The reconciler assumes two invariants it does not check itself:
//! - the observed routing table serves each selector from one module;
//! - desired modules claim pairwise disjoint selector sets.
//!
//! [`validate`] checks both (plus a few shape problems that make the plan
//! ambiguous) and returns every issue found, in a stable order: observed
//! issues in observed traversal order, then desired issues in desired order.
//! Callers run it before [`crate::reconcile`].

use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::Serialize;

use crate::{DesiredModuleRecord, ObservedModuleRecord, Selector};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "issue", rename_all = "snake_case")]
pub enum ValidationIssue {
    /// Observed table routes one selector to two modules.
    DuplicateObservedSelector {
        selector: Selector,
        first_address: String,
        second_address: String,
    },
    /// Two desired modules claim the same selector.
    OverlappingDesiredSelector {
        selector: Selector,
        first_module: String,
        second_module: String,
    },
    /// Same module name appears twice in the desired snapshot.
    DuplicateModuleName { name: String },
    /// A single record lists the same selector more than once.
    RepeatedSelector { owner: String, selector: Selector },
    /// A record carries no fingerprint.
    EmptyFingerprint { owner: String },
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateObservedSelector {
                selector,
                first_address,
                second_address,
            } => write!(
                f,
                "selector {selector} is routed to both {first_address} and {second_address}"
            ),
            Self::OverlappingDesiredSelector {
                selector,
                first_module,
                second_module,
            } => write!(
                f,
                "selector {selector} is claimed by both '{first_module}' and '{second_module}'"
            ),
            Self::DuplicateModuleName { name } => {
                write!(f, "module name '{name}' appears more than once")
            }
            Self::RepeatedSelector { owner, selector } => {
                write!(f, "'{owner}' lists selector {selector} more than once")
            }
            Self::EmptyFingerprint { owner } => write!(f, "'{owner}' has an empty fingerprint"),
        }
    }
}

/// Typed validity result.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }
}

fn check_observed(observed: &[ObservedModuleRecord], issues: &mut Vec<ValidationIssue>) {
    let mut owner: HashMap<&Selector, &str> = HashMap::new();

    for record in observed {
        if record.fingerprint.is_empty() {
            issues.push(ValidationIssue::EmptyFingerprint {
                owner: record.address.clone(),
            });
        }

        let mut seen_here: HashSet<&Selector> = HashSet::new();
        for selector in &record.selectors {
            if !seen_here.insert(selector) {
                issues.push(ValidationIssue::RepeatedSelector {
                    owner: record.address.clone(),
                    selector: selector.clone(),
                });
                continue;
            }
            match owner.get(selector) {
                Some(first) => issues.push(ValidationIssue::DuplicateObservedSelector {
                    selector: selector.clone(),
                    first_address: first.to_string(),
                    second_address: record.address.clone(),
                }),
                None => {
                    owner.insert(selector, &record.address);
                }
            }
        }
    }
}

fn check_desired(desired: &[DesiredModuleRecord], issues: &mut Vec<ValidationIssue>) {
    let mut names: HashSet<&str> = HashSet::new();
    let mut claimant: HashMap<&Selector, &str> = HashMap::new();

    for record in desired {
        if !names.insert(record.name.as_str()) {
            issues.push(ValidationIssue::DuplicateModuleName {
                name: record.name.clone(),
            });
        }
        if record.fingerprint.is_empty() {
            issues.push(ValidationIssue::EmptyFingerprint {
                owner: record.name.clone(),
            });
        }

        let mut seen_here: HashSet<&Selector> = HashSet::new();
        for selector in &record.selectors {
            if !seen_here.insert(selector) {
                issues.push(ValidationIssue::RepeatedSelector {
                    owner: record.name.clone(),
                    selector: selector.clone(),
                });
                continue;
            }
            match claimant.get(selector) {
                Some(first) => issues.push(ValidationIssue::OverlappingDesiredSelector {
                    selector: selector.clone(),
                    first_module: first.to_string(),
                    second_module: record.name.clone(),
                }),
                None => {
                    claimant.insert(selector, &record.name);
                }
            }
        }
    }
}

/// Check both snapshots for the invariants the reconciler relies on.
pub fn validate(
    observed: &[ObservedModuleRecord],
    desired: &[DesiredModuleRecord],
) -> ValidationReport {
    let mut issues = Vec::new();
    check_observed(observed, &mut issues);
    check_desired(desired, &mut issues);
    ValidationReport { issues }
}
