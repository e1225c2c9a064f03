use fcut_config::{load_layered_yaml_from_strings, report_unused_keys, ConfigMode, UnusedKeyPolicy};

/// Validates:
/// 1) Unused keys are detected in WARN mode but do not error.
/// 2) Unused keys cause failure in FAIL mode.
/// 3) Keys under consumed prefixes are not flagged.
/// 4) Registries differ per mode.

const YAML: &str = r#"
reconcile:
  validation: "warn"
output:
  pretty: false
  exports_root: "../exports"
check:
  fail_on_drift: false
legacy:
  rpc_url: "http://localhost:8545"
"#;

#[test]
fn warn_mode_reports_unused_keys_without_error() {
    let loaded = load_layered_yaml_from_strings(&[YAML]).unwrap();

    let report = report_unused_keys(ConfigMode::Plan, &loaded.config_json, UnusedKeyPolicy::Warn)
        .expect("warn mode must not error");

    assert!(!report.is_clean());
    assert_eq!(
        report.unused_leaf_pointers,
        vec!["/check/fail_on_drift".to_string(), "/legacy/rpc_url".to_string()],
        "sorted unused leaves for PLAN mode"
    );
    assert_eq!(report.mode, "PLAN");
}

#[test]
fn check_mode_consumes_check_section_but_not_exports() {
    let loaded = load_layered_yaml_from_strings(&[YAML]).unwrap();

    let report =
        report_unused_keys(ConfigMode::Check, &loaded.config_json, UnusedKeyPolicy::Warn).unwrap();
    assert_eq!(
        report.unused_leaf_pointers,
        vec!["/legacy/rpc_url".to_string(), "/output/exports_root".to_string()]
    );
}

#[test]
fn fail_mode_errors_on_unused_keys() {
    let loaded = load_layered_yaml_from_strings(&[YAML]).unwrap();

    let err = report_unused_keys(ConfigMode::Plan, &loaded.config_json, UnusedKeyPolicy::Fail)
        .unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("CONFIG_UNUSED_KEYS"), "got: {msg}");
    assert!(msg.contains("/legacy/rpc_url"));
}

#[test]
fn fully_consumed_config_is_clean() {
    let yaml = r#"
reconcile:
  validation: "fail"
output:
  pretty: true
"#;
    let loaded = load_layered_yaml_from_strings(&[yaml]).unwrap();
    for mode in [ConfigMode::Plan, ConfigMode::Check] {
        let report = report_unused_keys(mode, &loaded.config_json, UnusedKeyPolicy::Fail).unwrap();
        assert!(report.is_clean());
    }
}
