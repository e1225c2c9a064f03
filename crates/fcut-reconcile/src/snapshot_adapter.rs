//! Snapshot Adapter: deserialize producer wire format and normalize to core records.
//!
//! # Purpose
//! The observation producer (live routing-table introspection) and the
//! desired-state producer (compiled module artifacts) hand over JSON documents.
//! This module defines the *raw* structs that mirror those documents and the
//! [`normalize_observed`] / [`normalize_desired`] functions that turn them into
//! the [`ObservedModuleRecord`] / [`DesiredModuleRecord`] values consumed by
//! the reconciler.
//!
//! # Design constraints
//! - Pure, deterministic conversion. No IO, no network, no async.
//! - Selectors must be `0x` followed by exactly 8 hex digits; fingerprints
//!   must be `0x` followed by a non-empty, even number of hex digits. Both are
//!   lowercased.
//! - The first malformed entry (input order) is returned as the error.
//! - Unknown fields are ignored so producers can add metadata freely.

use serde::Deserialize;

use crate::{ContentFingerprint, DesiredModuleRecord, ObservedModuleRecord, Selector};

/// Hex digits in a 4-byte selector.
pub const SELECTOR_HEX_LEN: usize = 8;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotAdapterError {
    /// An observed module has an empty `address`.
    MissingAddress { position: usize },
    /// A desired module has an empty `name`.
    MissingModuleName { position: usize },
    /// A selector is not `0x` + 8 hex digits.
    MalformedSelector { owner: String, raw: String },
    /// A fingerprint is not `0x` + even-length hex.
    MalformedFingerprint { owner: String, raw: String },
}

impl std::fmt::Display for SnapshotAdapterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingAddress { position } => {
                write!(f, "observed module #{position} has empty address")
            }
            Self::MissingModuleName { position } => {
                write!(f, "desired module #{position} has empty name")
            }
            Self::MalformedSelector { owner, raw } => {
                write!(f, "module '{owner}' has malformed selector '{raw}'")
            }
            Self::MalformedFingerprint { owner, raw } => {
                write!(f, "module '{owner}' has malformed fingerprint '{raw}'")
            }
        }
    }
}

impl std::error::Error for SnapshotAdapterError {}

// ---------------------------------------------------------------------------
// Raw wire-level structs
// ---------------------------------------------------------------------------

/// One module as reported by routing-table introspection.
#[derive(Debug, Clone, Deserialize)]
pub struct RawObservedModule {
    /// Module address serving the selectors.
    pub address: String,
    pub selectors: Vec<String>,
    /// Hash of the code deployed at `address`.
    pub fingerprint: String,
}

/// Top-level observation document.
#[derive(Debug, Clone, Deserialize)]
pub struct RawObservedSnapshot {
    /// Proxy the table was read from (informational).
    #[serde(default)]
    pub proxy: Option<String>,
    #[serde(default)]
    pub chain_id: Option<u64>,
    pub modules: Vec<RawObservedModule>,
}

/// One module as built from compiled artifacts.
#[derive(Debug, Clone, Deserialize)]
pub struct RawDesiredModule {
    pub name: String,
    pub selectors: Vec<String>,
    /// Hash of the compiled deployable code.
    pub fingerprint: String,
}

/// Top-level desired-state document.
#[derive(Debug, Clone, Deserialize)]
pub struct RawDesiredSnapshot {
    pub modules: Vec<RawDesiredModule>,
}

// ---------------------------------------------------------------------------
// Normalization helpers
// ---------------------------------------------------------------------------

fn hex_body(raw: &str) -> Option<&str> {
    let body = raw.strip_prefix("0x")?;
    if body.is_empty() || !body.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    Some(body)
}

fn normalize_selector(owner: &str, raw: &str) -> Result<Selector, SnapshotAdapterError> {
    let t = raw.trim().to_ascii_lowercase();
    if !hex_body(&t).is_some_and(|body| body.len() == SELECTOR_HEX_LEN) {
        return Err(SnapshotAdapterError::MalformedSelector {
            owner: owner.to_string(),
            raw: raw.to_string(),
        });
    }
    Ok(Selector::new(t))
}

fn normalize_fingerprint(owner: &str, raw: &str) -> Result<ContentFingerprint, SnapshotAdapterError> {
    let t = raw.trim().to_ascii_lowercase();
    if !hex_body(&t).is_some_and(|body| body.len() % 2 == 0) {
        return Err(SnapshotAdapterError::MalformedFingerprint {
            owner: owner.to_string(),
            raw: raw.to_string(),
        });
    }
    Ok(ContentFingerprint::new(t))
}

fn normalize_selectors(owner: &str, raw: &[String]) -> Result<Vec<Selector>, SnapshotAdapterError> {
    raw.iter().map(|s| normalize_selector(owner, s)).collect()
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Normalize an observation document. Record and selector order is preserved.
pub fn normalize_observed(
    raw: RawObservedSnapshot,
) -> Result<Vec<ObservedModuleRecord>, SnapshotAdapterError> {
    let mut out = Vec::with_capacity(raw.modules.len());

    for (position, module) in raw.modules.into_iter().enumerate() {
        let address = module.address.trim().to_ascii_lowercase();
        if address.is_empty() {
            return Err(SnapshotAdapterError::MissingAddress { position });
        }
        let selectors = normalize_selectors(&address, &module.selectors)?;
        let fingerprint = normalize_fingerprint(&address, &module.fingerprint)?;
        out.push(ObservedModuleRecord {
            address,
            selectors,
            fingerprint,
        });
    }

    Ok(out)
}

/// Normalize a desired-state document. Record and selector order is preserved.
pub fn normalize_desired(
    raw: RawDesiredSnapshot,
) -> Result<Vec<DesiredModuleRecord>, SnapshotAdapterError> {
    let mut out = Vec::with_capacity(raw.modules.len());

    for (position, module) in raw.modules.into_iter().enumerate() {
        let name = module.name.trim().to_string();
        if name.is_empty() {
            return Err(SnapshotAdapterError::MissingModuleName { position });
        }
        let selectors = normalize_selectors(&name, &module.selectors)?;
        let fingerprint = normalize_fingerprint(&name, &module.fingerprint)?;
        out.push(DesiredModuleRecord {
            name,
            selectors,
            fingerprint,
        });
    }

    Ok(out)
}
