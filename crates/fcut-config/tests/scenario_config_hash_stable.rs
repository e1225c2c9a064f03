//! Config hash stability
//!
//! GREEN when:
//! - Loading the same layers twice yields identical hash and canonical JSON.
//! - Reordering keys within YAML doesn't change the hash.
//! - Different values produce different hashes.
//! - Later layers override earlier ones.

use fcut_config::load_layered_yaml_from_strings;

const BASE_YAML: &str = r#"
reconcile:
  validation: "fail"
output:
  pretty: true
  exports_root: "../exports"
check:
  fail_on_drift: true
"#;

/// Same content as BASE_YAML but with keys in different order.
const BASE_YAML_REORDERED: &str = r#"
check:
  fail_on_drift: true
output:
  exports_root: "../exports"
  pretty: true
reconcile:
  validation: "fail"
"#;

const OVERLAY_YAML: &str = r#"
reconcile:
  validation: "warn"
output:
  pretty: false
"#;

#[test]
fn same_input_produces_identical_hash() {
    let a = load_layered_yaml_from_strings(&[BASE_YAML]).unwrap();
    let b = load_layered_yaml_from_strings(&[BASE_YAML]).unwrap();

    assert_eq!(a.config_hash, b.config_hash);
    assert_eq!(a.canonical_json, b.canonical_json);
}

#[test]
fn reordered_keys_produce_same_hash() {
    let original = load_layered_yaml_from_strings(&[BASE_YAML]).unwrap();
    let reordered = load_layered_yaml_from_strings(&[BASE_YAML_REORDERED]).unwrap();

    assert_eq!(
        original.config_hash, reordered.config_hash,
        "reordering keys in YAML must not change the hash"
    );
    assert_eq!(original.canonical_json, reordered.canonical_json);
}

#[test]
fn different_values_produce_different_hash() {
    let a = load_layered_yaml_from_strings(&[BASE_YAML]).unwrap();
    let b = load_layered_yaml_from_strings(&[BASE_YAML, OVERLAY_YAML]).unwrap();

    assert_ne!(a.config_hash, b.config_hash);
}

#[test]
fn overlay_overrides_base_and_keeps_untouched_keys() {
    let loaded = load_layered_yaml_from_strings(&[BASE_YAML, OVERLAY_YAML]).unwrap();
    let cfg = &loaded.config_json;

    assert_eq!(
        cfg.pointer("/reconcile/validation").and_then(|v| v.as_str()),
        Some("warn")
    );
    assert_eq!(cfg.pointer("/output/pretty").and_then(|v| v.as_bool()), Some(false));
    assert_eq!(
        cfg.pointer("/output/exports_root").and_then(|v| v.as_str()),
        Some("../exports"),
        "overlay must not drop sibling keys"
    );
}

#[test]
fn hash_is_64_hex_chars() {
    let loaded = load_layered_yaml_from_strings(&[BASE_YAML]).unwrap();

    assert_eq!(loaded.config_hash.len(), 64);
    assert!(loaded.config_hash.chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn empty_layer_is_a_noop() {
    let a = load_layered_yaml_from_strings(&[BASE_YAML]).unwrap();
    let b = load_layered_yaml_from_strings(&[BASE_YAML, "{}"]).unwrap();

    assert_eq!(a.config_hash, b.config_hash);
}
