use crate::{DesiredModuleRecord, ModuleDiff, RoutingIndex};

/// Classify every selector a desired module declares, in declaration order:
/// - not routed at all => `add`
/// - routed to code with a different fingerprint => `replace`
/// - routed to code with the same fingerprint => unchanged (not emitted)
///
/// Fingerprints are compared per selector, not per module, so a table left
/// half-migrated by an interrupted run is still diffed correctly.
pub fn diff_module(desired: &DesiredModuleRecord, index: &RoutingIndex) -> ModuleDiff {
    let mut add = Vec::new();
    let mut replace = Vec::new();

    for selector in &desired.selectors {
        match index.fingerprint_of(selector) {
            None => add.push(selector.clone()),
            Some(fp) if *fp != desired.fingerprint => replace.push(selector.clone()),
            Some(_) => {}
        }
    }

    ModuleDiff {
        name: desired.name.clone(),
        add,
        replace,
    }
}

/// Run [`diff_module`] over the desired snapshot, preserving its order.
#[cfg(not(feature = "parallel"))]
pub fn diff_all(desired: &[DesiredModuleRecord], index: &RoutingIndex) -> Vec<ModuleDiff> {
    desired.iter().map(|d| diff_module(d, index)).collect()
}

/// Run [`diff_module`] over the desired snapshot on the rayon pool.
///
/// `collect` on an indexed parallel iterator keeps desired order.
#[cfg(feature = "parallel")]
pub fn diff_all(desired: &[DesiredModuleRecord], index: &RoutingIndex) -> Vec<ModuleDiff> {
    use rayon::prelude::*;

    desired.par_iter().map(|d| diff_module(d, index)).collect()
}
