//! On-disk export of one reconciliation run.
//!
//! Layout: `<exports_root>/<plan_id>/{manifest.json, plan.json, cuts.json}`.
//! `plan.json` holds the full [`PlanEnvelope`]; `cuts.json` the flattened
//! cut list an executor submits.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use fcut_reconcile::{CutAction, EditPlan, PlanCounts};
use fcut_schemas::PlanEnvelope;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanManifest {
    pub schema_version: i32,
    pub plan_id: Uuid,
    pub observed_hash: String,
    pub desired_hash: String,
    pub config_hash: Option<String>,
    pub created_at_utc: DateTime<Utc>,
    pub counts: PlanCounts,
    pub deploy_targets: Vec<String>,
    pub artifacts: ArtifactList,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactList {
    pub manifest_json: String,
    pub plan_json: String,
    pub cuts_json: String,
}

pub struct WritePlanArtifactsResult {
    pub plan_dir: PathBuf,
    pub manifest_path: PathBuf,
    pub plan_path: PathBuf,
    pub cuts_path: PathBuf,
}

/// Write every artifact for `envelope` under `exports_root`.
///
/// The plan directory is keyed by `plan_id`, so a fresh envelope never
/// overwrites an earlier run. Files inside are rewritten if they exist.
pub fn write_plan_artifacts(
    exports_root: &Path,
    envelope: &PlanEnvelope<EditPlan>,
) -> Result<WritePlanArtifactsResult> {
    let plan_dir = exports_root.join(envelope.plan_id.to_string());
    fs::create_dir_all(&plan_dir)
        .with_context(|| format!("create exports dir failed: {}", plan_dir.display()))?;

    let plan = &envelope.payload;
    let manifest = PlanManifest {
        schema_version: envelope.schema_version,
        plan_id: envelope.plan_id,
        observed_hash: envelope.observed_hash.clone(),
        desired_hash: envelope.desired_hash.clone(),
        config_hash: envelope.config_hash.clone(),
        created_at_utc: envelope.created_at_utc,
        counts: plan.counts(),
        deploy_targets: plan.deploy_targets.clone(),
        artifacts: ArtifactList {
            manifest_json: "manifest.json".to_string(),
            plan_json: "plan.json".to_string(),
            cuts_json: "cuts.json".to_string(),
        },
    };
    let cuts: Vec<CutAction> = plan.cut_actions();

    let manifest_path = plan_dir.join(&manifest.artifacts.manifest_json);
    let plan_path = plan_dir.join(&manifest.artifacts.plan_json);
    let cuts_path = plan_dir.join(&manifest.artifacts.cuts_json);

    write_json(&manifest_path, &manifest)?;
    write_json(&plan_path, envelope)?;
    write_json(&cuts_path, &cuts)?;

    info!(plan_id = %envelope.plan_id, dir = %plan_dir.display(), "plan artifacts written");

    Ok(WritePlanArtifactsResult {
        plan_dir,
        manifest_path,
        plan_path,
        cuts_path,
    })
}

/// Read back a manifest written by [`write_plan_artifacts`].
pub fn read_manifest(path: &Path) -> Result<PlanManifest> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("read manifest failed: {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parse manifest failed: {}", path.display()))
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)
        .with_context(|| format!("serialize failed: {}", path.display()))?;
    fs::write(path, format!("{json}\n"))
        .with_context(|| format!("write failed: {}", path.display()))
}
