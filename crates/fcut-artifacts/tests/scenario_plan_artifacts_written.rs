use fcut_artifacts::{read_manifest, write_plan_artifacts};
use fcut_reconcile::{reconcile, DesiredModuleRecord, ObservedModuleRecord};
use fcut_schemas::PlanEnvelope;
use serde_json::Value;

fn sample_envelope() -> PlanEnvelope<fcut_reconcile::EditPlan> {
    let observed = vec![ObservedModuleRecord::new("0xaa", ["0x01", "0x02"], "h1")];
    let desired = vec![
        DesiredModuleRecord::new("A", ["0x01"], "h2"),
        DesiredModuleRecord::new("B", ["0x03"], "h1"),
    ];
    PlanEnvelope::new("obs", "des", Some("cfg".to_string()), reconcile(&observed, &desired))
}

#[test]
fn writes_manifest_plan_and_cuts_under_plan_id() {
    let tmp = tempfile::tempdir().unwrap();
    let env = sample_envelope();

    let out = write_plan_artifacts(tmp.path(), &env).unwrap();
    assert_eq!(out.plan_dir, tmp.path().join(env.plan_id.to_string()));
    assert!(out.manifest_path.exists());
    assert!(out.plan_path.exists());
    assert!(out.cuts_path.exists());

    let manifest = read_manifest(&out.manifest_path).unwrap();
    assert_eq!(manifest.plan_id, env.plan_id);
    assert_eq!(manifest.config_hash.as_deref(), Some("cfg"));
    assert_eq!(manifest.counts.add, 1);
    assert_eq!(manifest.counts.replace, 1);
    assert_eq!(manifest.counts.remove, 1);
    assert_eq!(manifest.deploy_targets, vec!["B", "A"]);
}

#[test]
fn cuts_file_lists_add_replace_remove_in_order() {
    let tmp = tempfile::tempdir().unwrap();
    let out = write_plan_artifacts(tmp.path(), &sample_envelope()).unwrap();

    let cuts: Value = serde_json::from_str(&std::fs::read_to_string(out.cuts_path).unwrap()).unwrap();
    let kinds: Vec<&str> = cuts
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["kind"].as_str().unwrap())
        .collect();
    assert_eq!(kinds, vec!["add", "replace", "remove"]);
    assert_eq!(cuts[2]["module"], Value::Null);
    assert_eq!(cuts[2]["selectors"][0], "0x02");
}

#[test]
fn plan_file_holds_full_envelope() {
    let tmp = tempfile::tempdir().unwrap();
    let env = sample_envelope();
    let out = write_plan_artifacts(tmp.path(), &env).unwrap();

    let back: PlanEnvelope<fcut_reconcile::EditPlan> =
        serde_json::from_str(&std::fs::read_to_string(out.plan_path).unwrap()).unwrap();
    assert_eq!(back.payload, env.payload);
    assert!(back.same_inputs(&env));
}
