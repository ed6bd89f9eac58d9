use std::fs;
use std::path::PathBuf;

use ssdt_smith::commands::{list_fragments_command, load_image, resolve_generate_config, GenerateArgs};
use ssdt_smith::{canonicalize_or_current, sha256_bytes, sha256_file};
use smith_core::services::IaslToolchain;
use tempfile::tempdir;

#[test]
fn flags_override_config_file() {
    let temp = tempdir().unwrap();
    let config = temp.path().join("smith.yaml");
    fs::write(&config, "output_dir: from-config\nfragments: [SSDT-EC]\ncompile: true\n").unwrap();

    let args = GenerateArgs {
        config: Some(config.clone()),
        only: vec!["SSDT-USB-Reset".into()],
        no_compile: true,
        ..GenerateArgs::default()
    };
    let resolved = resolve_generate_config(&args).unwrap();
    assert_eq!(resolved.output_dir, PathBuf::from("from-config"));
    assert_eq!(resolved.fragments, vec!["SSDT-USB-Reset".to_string()]);
    assert!(!resolved.compile);

    let args = GenerateArgs {
        config: Some(config),
        out: Some(PathBuf::from("from-flag")),
        ..GenerateArgs::default()
    };
    let resolved = resolve_generate_config(&args).unwrap();
    assert_eq!(resolved.output_dir, PathBuf::from("from-flag"));
    assert_eq!(resolved.fragments, vec!["SSDT-EC".to_string()]);
    assert!(resolved.compile);
}

#[test]
fn load_image_rebuilds_raw_table_from_listing() {
    let temp = tempdir().unwrap();
    let dsl = temp.path().join("DSDT.dsl");
    fs::write(&dsl, "Scope (_SB)\n{\n    Device (PCI0)\n    00000000: 5B 82 40 05  // [.@.\n}\n")
        .unwrap();

    let loaded = load_image(None, Some(&dsl), &IaslToolchain::new("iasl")).unwrap();
    assert_eq!(loaded.image.raw(), &[0x5B, 0x82, 0x40, 0x05]);
    assert_eq!(loaded.image.paths().devices("PCI0")[0].path, "\\_SB.PCI0");
    assert!(loaded.input.is_none());
    assert_eq!(loaded.input_sha256, sha256_bytes(&[0x5B, 0x82, 0x40, 0x05]));
}

#[test]
fn load_image_rejects_missing_table() {
    let temp = tempdir().unwrap();
    let err = load_image(Some(&temp.path().join("DSDT.aml")), None, &IaslToolchain::new("iasl"))
        .err()
        .expect("missing table fails");
    assert!(format!("{err:#}").contains("DSDT.aml"));
}

#[test]
fn hashes_match_for_file_and_bytes() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("DSDT.aml");
    fs::write(&path, b"DSDT").unwrap();
    assert_eq!(sha256_file(&path).unwrap(), sha256_bytes(b"DSDT"));
    assert_eq!(sha256_bytes(b"").len(), 64);
}

#[test]
fn canonicalize_or_current_keeps_missing_paths_absolute() {
    let result = canonicalize_or_current("not-yet-created-output").unwrap();
    assert!(result.is_absolute());
    assert!(result.ends_with("not-yet-created-output"));
}

#[test]
fn list_fragments_runs_in_both_modes() {
    list_fragments_command(false).unwrap();
    list_fragments_command(true).unwrap();
}
