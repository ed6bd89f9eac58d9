use std::fs;
use std::path::{Path, PathBuf};

use smith_core::config::{load_config, GenerateConfig};
use smith_core::dsl::ParseWarning;
use smith_core::error::SynthesisError;
use smith_core::layout::OutputLayout;
use smith_core::model::{Fragment, Outcome, PatchSpec};
use smith_core::services::synthesizers::DEFAULT_BUS_CANDIDATES;
use smith_core::services::RunReport;
use tempfile::tempdir;

#[test]
fn yaml_config_fills_missing_fields_with_defaults() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("smith.yaml");
    fs::write(&path, "fragments:\n  - SSDT-EC\n  - SSDT-AWAC\ncompile: false\n").unwrap();

    let config = load_config(&path).unwrap();
    assert_eq!(config.fragments, vec!["SSDT-EC".to_string(), "SSDT-AWAC".to_string()]);
    assert!(!config.compile);
    assert_eq!(config.output_dir, PathBuf::from("SSDTs"));
    assert_eq!(config.bus_candidates.len(), DEFAULT_BUS_CANDIDATES.len());
    assert_eq!(config.selected_fragments().map(|f| f.len()), Some(2));
}

#[test]
fn json_config_is_chosen_by_extension() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("smith.json");
    fs::write(&path, r#"{"iasl_path": "/usr/local/bin/iasl", "bus_candidates": ["SBRG"]}"#).unwrap();

    let config = load_config(&path).unwrap();
    assert_eq!(config.iasl_path.as_deref(), Some(Path::new("/usr/local/bin/iasl")));
    assert_eq!(config.synthesis_options().bus_candidates, vec!["SBRG".to_string()]);
    assert!(config.compile);
    assert!(config.selected_fragments().is_none());
}

#[test]
fn unreadable_or_malformed_config_is_an_error() {
    let temp = tempdir().unwrap();
    let err = load_config(&temp.path().join("missing.yaml")).unwrap_err();
    assert!(format!("{err:#}").contains("Failed to read config"));

    let bad = temp.path().join("bad.json");
    fs::write(&bad, "{not json").unwrap();
    let err = load_config(&bad).unwrap_err();
    assert!(format!("{err:#}").contains("Failed to parse config JSON"));
}

#[test]
fn empty_bus_candidates_fall_back_to_defaults() {
    let config = GenerateConfig { bus_candidates: Vec::new(), ..GenerateConfig::default() };
    assert_eq!(config.synthesis_options().bus_candidates.len(), DEFAULT_BUS_CANDIDATES.len());
}

#[test]
fn output_layout_is_computed_without_io() {
    let layout = OutputLayout::new("/tmp/does-not-exist/SSDTs");
    assert_eq!(layout.patches_path, PathBuf::from("/tmp/does-not-exist/SSDTs/patches.json"));
    assert_eq!(layout.report_path, PathBuf::from("/tmp/does-not-exist/SSDTs/report.json"));
    assert_eq!(
        layout.fragment_source_path("SSDT-EC"),
        PathBuf::from("/tmp/does-not-exist/SSDTs/SSDT-EC.dsl")
    );
    assert_eq!(
        layout.fragment_binary_path("SSDT-EC"),
        PathBuf::from("/tmp/does-not-exist/SSDTs/SSDT-EC.aml")
    );
    assert!(!layout.root.exists());
}

#[test]
fn report_records_each_outcome_and_collects_patches() {
    let patch = PatchSpec::new("AWAC _STA to XSTA Rename", "0014095F535441", "00140958535441");
    let awac = Fragment::new("SSDT-AWAC", "DefinitionBlock").with_patches(vec![patch.clone()]);

    let mut report = RunReport::new(Some("DSDT.aml".into()), Some("abc123".into())).with_warnings(&[
        ParseWarning::UnrootedPath { path: "\\FOO".into(), line: 3 },
    ]);
    report.record("SSDT-AWAC", &Outcome::Applicable(awac), true);
    report.record("SSDT-PLUG", &Outcome::not_applicable("no Processor object found"), false);
    report.record("SSDT-PMC", &Outcome::Failed(SynthesisError::Lookup("LPC bus".into())), false);

    assert_eq!(report.patches, vec![patch]);
    assert_eq!(report.applicable().count(), 1);
    assert_eq!(report.failed().count(), 1);
    assert_eq!(report.fragments[1].reason.as_deref(), Some("no Processor object found"));
    assert_eq!(report.fragments[2].reason.as_deref(), Some("Could not locate LPC bus"));

    let json: serde_json::Value = serde_json::to_value(&report).unwrap();
    assert_eq!(json["input_sha256"], "abc123");
    assert_eq!(json["fragments"][0]["status"], "applicable");
    assert_eq!(json["fragments"][0]["compiled"], true);
    assert_eq!(json["fragments"][2]["status"], "failed");
    assert_eq!(json["warnings"][0]["kind"], "unrooted_path");
    assert!(chrono::DateTime::parse_from_rfc3339(&report.generated_at).is_ok());
}
