use anyhow::{bail, Result};
use serde_json::Value;

/// What to do when the inputs fail pre-validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationPolicy {
    /// Refuse to emit a plan.
    Fail,
    /// Log every issue, emit the plan anyway.
    Warn,
    /// Do not validate.
    Skip,
}

impl ValidationPolicy {
    pub fn parse(raw: &str) -> Result<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "fail" => Ok(ValidationPolicy::Fail),
            "warn" => Ok(ValidationPolicy::Warn),
            "skip" => Ok(ValidationPolicy::Skip),
            other => bail!(
                "invalid reconcile.validation '{}'. expected one of: fail | warn | skip",
                other
            ),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationPolicy::Fail => "fail",
            ValidationPolicy::Warn => "warn",
            ValidationPolicy::Skip => "skip",
        }
    }
}

/// Typed view over the merged config JSON.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcileSettings {
    pub validation: ValidationPolicy,
    /// Pretty-print emitted JSON.
    pub pretty: bool,
    /// Root directory for plan artifacts; `None` disables export.
    pub exports_root: Option<String>,
    /// `fcut check` exits non-zero when drift is found.
    pub fail_on_drift: bool,
}

impl Default for ReconcileSettings {
    fn default() -> Self {
        Self {
            validation: ValidationPolicy::Fail,
            pretty: true,
            exports_root: None,
            fail_on_drift: true,
        }
    }
}

impl ReconcileSettings {
    /// Build from canonical config JSON (produced by `load_layered_yaml`).
    ///
    /// Every field is optional; missing fields take the defaults. Present
    /// fields of the wrong type are an error, never silently defaulted.
    pub fn from_config_json(cfg: &Value) -> Result<Self> {
        let mut s = Self::default();

        if let Some(v) = cfg.pointer("/reconcile/validation") {
            let raw = v
                .as_str()
                .ok_or_else(|| anyhow::anyhow!("reconcile.validation must be a string"))?;
            s.validation = ValidationPolicy::parse(raw)?;
        }
        if let Some(v) = read_bool(cfg, "/output/pretty")? {
            s.pretty = v;
        }
        if let Some(v) = cfg.pointer("/output/exports_root") {
            match v {
                Value::Null => {}
                Value::String(p) if !p.trim().is_empty() => s.exports_root = Some(p.trim().to_string()),
                _ => bail!("output.exports_root must be a non-empty string"),
            }
        }
        if let Some(v) = read_bool(cfg, "/check/fail_on_drift")? {
            s.fail_on_drift = v;
        }

        Ok(s)
    }
}

fn read_bool(cfg: &Value, pointer: &str) -> Result<Option<bool>> {
    match cfg.pointer(pointer) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(*b)),
        Some(_) => bail!("config {} must be a boolean", pointer),
    }
}
