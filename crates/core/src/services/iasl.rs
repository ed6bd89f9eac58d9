use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use crate::error::ToolchainError;

/// Thin wrapper around the `iasl` ACPI compiler/disassembler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IaslToolchain {
    path: PathBuf,
}

impl IaslToolchain {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Use `explicit` if given, else `IASL_BIN`, else `iasl` from `PATH`.
    pub fn resolve(explicit: Option<&Path>) -> Self {
        let path = explicit
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os("IASL_BIN").map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from("iasl"));
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Copy `aml` into `work_dir` and disassemble it with an interleaved hex
    /// listing. Returns the produced `.dsl` path.
    pub fn disassemble(&self, aml: &Path, work_dir: &Path) -> Result<PathBuf, ToolchainError> {
        let file_name =
            aml.file_name().map(PathBuf::from).unwrap_or_else(|| PathBuf::from("DSDT.aml"));
        let copy = work_dir.join(&file_name);
        fs::copy(aml, &copy)?;

        tracing::info!(table = %aml.display(), "disassembling");
        let output = self.run(work_dir, |cmd| {
            cmd.args(["-da", "-dl", "-l"]).arg(&file_name);
        })?;
        check_status(&output)?;

        let dsl = copy.with_extension("dsl");
        if !dsl.is_file() {
            return Err(ToolchainError::MissingOutput(dsl));
        }
        Ok(dsl)
    }

    /// Compile `dsl`; the `.aml` lands beside it.
    pub fn compile(&self, dsl: &Path) -> Result<PathBuf, ToolchainError> {
        let dir = dsl.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
        let file_name = dsl.file_name().map(PathBuf::from).unwrap_or_else(|| dsl.to_path_buf());

        tracing::info!(source = %dsl.display(), "compiling");
        let output = self.run(dir, |cmd| {
            cmd.arg(&file_name);
        })?;
        check_status(&output)?;

        let aml = dsl.with_extension("aml");
        if !aml.is_file() {
            return Err(ToolchainError::MissingOutput(aml));
        }
        Ok(aml)
    }

    fn run(
        &self,
        dir: &Path,
        configure: impl FnOnce(&mut Command),
    ) -> Result<Output, ToolchainError> {
        let mut cmd = Command::new(&self.path);
        cmd.current_dir(dir);
        configure(&mut cmd);
        cmd.output().map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ToolchainError::NotFound(self.path.clone()),
            _ => ToolchainError::Spawn(e),
        })
    }
}

fn check_status(output: &Output) -> Result<(), ToolchainError> {
    if output.status.success() {
        return Ok(());
    }
    let mut stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
    if stderr.is_empty() {
        stderr = String::from_utf8_lossy(&output.stdout).trim().to_string();
    }
    Err(ToolchainError::Failed { status: output.status.to_string(), stderr })
}
