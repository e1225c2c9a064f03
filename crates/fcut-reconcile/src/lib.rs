//! fcut-reconcile
//!
//! Routing-table reconciliation for the facet-routed exchange proxy.
//!
//! Given the routing table observed on-chain and the module set built from
//! compiled artifacts, compute the minimal edit plan:
//! - selectors nobody serves yet => add
//! - selectors served by code with a different fingerprint => replace
//! - selectors served on-chain but claimed by no desired module => remove
//! - modules that must be deployed before the cut is submitted
//!
//! Deterministic, pure logic. No IO. No chain calls.

mod differ;
mod engine;
mod gate;
mod index;
mod types;
mod validate;

pub mod snapshot_adapter;

pub use differ::{diff_all, diff_module};
pub use engine::{assemble_plan, reconcile};
pub use gate::{check_apply_gate, drift_check, ApplyGate, DriftStatus};
pub use index::{IndexEntry, RoutingIndex};
pub use types::*;
pub use validate::{validate, ValidationIssue, ValidationReport};
