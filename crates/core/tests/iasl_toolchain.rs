#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use smith_core::error::ToolchainError;
use smith_core::services::IaslToolchain;

fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, body).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

// Kept in one test so no other thread forks while a script is open for writing.
#[test]
fn fake_iasl_round_trip_and_failures() {
    let temp = tempfile::tempdir().unwrap();
    let bin = temp.path().join("bin");
    let work = temp.path().join("work");
    fs::create_dir_all(&bin).unwrap();
    fs::create_dir_all(&work).unwrap();

    // Stand-in that "disassembles" or "compiles" by copying its last argument.
    let fake = write_script(
        &bin,
        "iasl",
        "#!/bin/sh\nfor last; do :; done\ncase \"$1\" in\n  -da) cp \"$last\" \"${last%.aml}.dsl\" ;;\n  *) cp \"$last\" \"${last%.dsl}.aml\" ;;\nesac\n",
    );
    let broken = write_script(&bin, "iasl-broken", "#!/bin/sh\necho 'syntax error' >&2\nexit 3\n");
    let silent = write_script(&bin, "iasl-silent", "#!/bin/sh\nexit 0\n");

    let aml = temp.path().join("DSDT.aml");
    fs::write(&aml, "    Device (EC0)\n").unwrap();

    let iasl = IaslToolchain::new(&fake);
    let dsl = iasl.disassemble(&aml, &work).expect("disassemble");
    assert_eq!(dsl, work.join("DSDT.dsl"));
    assert_eq!(fs::read_to_string(&dsl).unwrap(), "    Device (EC0)\n");

    let compiled = iasl.compile(&dsl).expect("compile");
    assert_eq!(compiled, work.join("DSDT.aml"));
    assert!(compiled.is_file());

    let err = IaslToolchain::new(&broken).compile(&dsl).unwrap_err();
    match err {
        ToolchainError::Failed { stderr, .. } => assert_eq!(stderr, "syntax error"),
        other => panic!("unexpected error: {other:?}"),
    }

    let fresh = temp.path().join("fresh");
    fs::create_dir_all(&fresh).unwrap();
    let err = IaslToolchain::new(&silent).disassemble(&aml, &fresh).unwrap_err();
    assert!(matches!(err, ToolchainError::MissingOutput(_)));

    let err = IaslToolchain::new(temp.path().join("no-such-iasl")).compile(&dsl).unwrap_err();
    assert!(matches!(err, ToolchainError::NotFound(_)));
}

#[test]
fn explicit_path_wins_over_environment() {
    let iasl = IaslToolchain::resolve(Some(Path::new("/opt/acpica/iasl")));
    assert_eq!(iasl.path(), Path::new("/opt/acpica/iasl"));
}
