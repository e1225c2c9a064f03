//! Command handler modules for fcut-cli.
//!
//! Shared utilities used by multiple command paths live here.
//! Command-specific logic lives in the submodules.

pub mod check;
pub mod plan;
pub mod validate;

use anyhow::{Context, Result};
use fcut_config::{ConfigMode, ReconcileSettings, UnusedKeyPolicy};
use fcut_reconcile::snapshot_adapter::{
    normalize_desired, normalize_observed, RawDesiredSnapshot, RawObservedSnapshot,
};
use fcut_reconcile::{DesiredModuleRecord, ObservedModuleRecord};
use serde::Serialize;
use std::fs;
use tracing::{info, warn};

/// Both snapshots, normalized, plus the hashes of the raw files.
pub struct Inputs {
    pub observed: Vec<ObservedModuleRecord>,
    pub desired: Vec<DesiredModuleRecord>,
    pub observed_hash: String,
    pub desired_hash: String,
}

/// Settings resolved from layered config (or defaults when none is given).
pub struct ResolvedConfig {
    pub settings: ReconcileSettings,
    pub config_hash: Option<String>,
}

fn read_text(path: &str, what: &str) -> Result<String> {
    let bytes = fs::read(path).with_context(|| format!("read {what} failed: {path}"))?;
    let bytes = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]).unwrap_or(&bytes);
    String::from_utf8(bytes.to_vec()).with_context(|| format!("{what} must be UTF-8 text: {path}"))
}

/// Read, hash and normalize both snapshot files.
pub fn load_inputs(observed_path: &str, desired_path: &str) -> Result<Inputs> {
    let observed_raw = read_text(observed_path, "observed snapshot")?;
    let desired_raw = read_text(desired_path, "desired snapshot")?;

    let observed: RawObservedSnapshot = serde_json::from_str(&observed_raw)
        .with_context(|| format!("observed snapshot must be valid JSON: {observed_path}"))?;
    let desired: RawDesiredSnapshot = serde_json::from_str(&desired_raw)
        .with_context(|| format!("desired snapshot must be valid JSON: {desired_path}"))?;

    if let Some(proxy) = &observed.proxy {
        info!(proxy = %proxy, chain_id = ?observed.chain_id, "observed snapshot loaded");
    }

    let observed = normalize_observed(observed)
        .with_context(|| format!("observed snapshot rejected: {observed_path}"))?;
    let desired = normalize_desired(desired)
        .with_context(|| format!("desired snapshot rejected: {desired_path}"))?;

    info!(
        observed_modules = observed.len(),
        desired_modules = desired.len(),
        "snapshots normalized"
    );

    Ok(Inputs {
        observed,
        desired,
        observed_hash: fcut_config::sha256_hex(observed_raw.as_bytes()),
        desired_hash: fcut_config::sha256_hex(desired_raw.as_bytes()),
    })
}

/// Load layered config for `mode`. No paths => defaults, no hash.
pub fn resolve_config(
    config_paths: &[String],
    mode: ConfigMode,
    strict_config: bool,
) -> Result<ResolvedConfig> {
    if config_paths.is_empty() {
        return Ok(ResolvedConfig {
            settings: ReconcileSettings::default(),
            config_hash: None,
        });
    }

    let path_refs: Vec<&str> = config_paths.iter().map(|s| s.as_str()).collect();
    let loaded = fcut_config::load_layered_yaml(&path_refs)?;

    let policy = if strict_config {
        UnusedKeyPolicy::Fail
    } else {
        UnusedKeyPolicy::Warn
    };
    let report = fcut_config::report_unused_keys(mode, &loaded.config_json, policy)?;
    for leaf in &report.unused_leaf_pointers {
        warn!(mode = %report.mode, leaf = %leaf, "unused config key");
    }

    let settings = ReconcileSettings::from_config_json(&loaded.config_json)?;
    info!(config_hash = %loaded.config_hash, validation = settings.validation.as_str(), "config loaded");

    Ok(ResolvedConfig {
        settings,
        config_hash: Some(loaded.config_hash),
    })
}

/// Print `value` as JSON on stdout.
pub fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let s = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
    .context("serialize output failed")?;
    println!("{s}");
    Ok(())
}
