use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Routable function identifier (a 4-byte tag rendered as hex in practice).
///
/// Always held in canonical form: surrounding whitespace trimmed, lowercase.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Selector(String);

impl Selector {
    pub fn new(raw: impl AsRef<str>) -> Self {
        Self(raw.as_ref().trim().to_ascii_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for Selector {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

impl From<&str> for Selector {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<Selector> for String {
    fn from(s: Selector) -> Self {
        s.0
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Hash of a module's compiled code. Equal fingerprints mean identical code.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct ContentFingerprint(String);

impl ContentFingerprint {
    pub fn new(raw: impl AsRef<str>) -> Self {
        Self(raw.as_ref().trim().to_ascii_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for ContentFingerprint {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

impl From<&str> for ContentFingerprint {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<ContentFingerprint> for String {
    fn from(fp: ContentFingerprint) -> Self {
        fp.0
    }
}

impl fmt::Display for ContentFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One module currently live in the routing table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservedModuleRecord {
    /// On-chain identity of the serving module.
    pub address: String,
    pub selectors: Vec<Selector>,
    pub fingerprint: ContentFingerprint,
}

impl ObservedModuleRecord {
    pub fn new<S: Into<Selector>>(
        address: impl Into<String>,
        selectors: impl IntoIterator<Item = S>,
        fingerprint: impl Into<ContentFingerprint>,
    ) -> Self {
        Self {
            address: address.into(),
            selectors: selectors.into_iter().map(Into::into).collect(),
            fingerprint: fingerprint.into(),
        }
    }
}

/// One module of the set the routing table should converge to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesiredModuleRecord {
    /// Role name of the module (e.g. `"TradingFacet"`).
    pub name: String,
    pub selectors: Vec<Selector>,
    pub fingerprint: ContentFingerprint,
}

impl DesiredModuleRecord {
    pub fn new<S: Into<Selector>>(
        name: impl Into<String>,
        selectors: impl IntoIterator<Item = S>,
        fingerprint: impl Into<ContentFingerprint>,
    ) -> Self {
        Self {
            name: name.into(),
            selectors: selectors.into_iter().map(Into::into).collect(),
            fingerprint: fingerprint.into(),
        }
    }
}

/// Classification of one desired module against the routing index.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ModuleDiff {
    pub name: String,
    /// Selectors not routed at all, in declaration order.
    pub add: Vec<Selector>,
    /// Selectors routed to code with a different fingerprint, in declaration order.
    pub replace: Vec<Selector>,
}

impl ModuleDiff {
    pub fn is_unchanged(&self) -> bool {
        self.add.is_empty() && self.replace.is_empty()
    }
}

/// Minimal set of routing-table edits that brings the observed table in line
/// with the desired module set.
///
/// `add` and `replace` keep insertion order; that order is part of the output
/// contract and drives `deploy_targets`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditPlan {
    pub add: IndexMap<String, Vec<Selector>>,
    pub replace: IndexMap<String, Vec<Selector>>,
    pub remove: Vec<Selector>,
    pub deploy_targets: Vec<String>,
}

/// Kind of a single routing-table cut.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CutKind {
    Add,
    Replace,
    Remove,
}

/// One routing-table mutation as submitted by the executor.
///
/// `module` is the freshly deployed module that will serve the selectors;
/// removals have no serving module.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CutAction {
    pub kind: CutKind,
    pub module: Option<String>,
    pub selectors: Vec<Selector>,
}

/// Selector totals for a plan, used for log lines and CLI summaries.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanCounts {
    pub add: usize,
    pub replace: usize,
    pub remove: usize,
    pub deploy: usize,
}

impl EditPlan {
    pub fn empty() -> Self {
        Self::default()
    }

    /// `true` when the observed routing table already matches.
    pub fn is_noop(&self) -> bool {
        self.add.is_empty()
            && self.replace.is_empty()
            && self.remove.is_empty()
            && self.deploy_targets.is_empty()
    }

    pub fn counts(&self) -> PlanCounts {
        PlanCounts {
            add: self.add.values().map(Vec::len).sum(),
            replace: self.replace.values().map(Vec::len).sum(),
            remove: self.remove.len(),
            deploy: self.deploy_targets.len(),
        }
    }

    /// Flatten the plan into the ordered cut list applied in one atomic
    /// routing-table update: adds, then replaces, then a single removal.
    pub fn cut_actions(&self) -> Vec<CutAction> {
        let mut cuts = Vec::with_capacity(self.add.len() + self.replace.len() + 1);

        for (module, selectors) in &self.add {
            cuts.push(CutAction {
                kind: CutKind::Add,
                module: Some(module.clone()),
                selectors: selectors.clone(),
            });
        }
        for (module, selectors) in &self.replace {
            cuts.push(CutAction {
                kind: CutKind::Replace,
                module: Some(module.clone()),
                selectors: selectors.clone(),
            });
        }
        if !self.remove.is_empty() {
            cuts.push(CutAction {
                kind: CutKind::Remove,
                module: None,
                selectors: self.remove.clone(),
            });
        }

        cuts
    }
}
