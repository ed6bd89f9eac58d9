use std::path::{Path, PathBuf};

/// Where a run's artifacts go.
///
/// This does *not* touch the filesystem; the CLI creates the directory and
/// writes the files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    pub root: PathBuf,
    /// Binary patch list (`patches.json`).
    pub patches_path: PathBuf,
    /// Run report (`report.json`).
    pub report_path: PathBuf,
}

impl OutputLayout {
    pub fn new(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref().to_path_buf();
        let patches_path = root.join("patches.json");
        let report_path = root.join("report.json");
        Self { root, patches_path, report_path }
    }

    /// `<root>/<name>.dsl`
    pub fn fragment_source_path(&self, name: &str) -> PathBuf {
        self.root.join(format!("{name}.dsl"))
    }

    /// `<root>/<name>.aml`
    pub fn fragment_binary_path(&self, name: &str) -> PathBuf {
        self.root.join(format!("{name}.aml"))
    }
}
