//! Core data model for a disassembled ACPI table and the fixes derived from it.
//!
//! The types here are plain values:
//! - Line classification (`LineClass`, `ObjectKind`)
//! - Structural entries and their resolved namespace paths
//! - Binary find/replace patches (`PatchSpec`)
//! - Generated SSDT fragments and the three-way synthesizer `Outcome`

use serde::{Deserialize, Serialize};

use crate::error::SynthesisError;

/// Kind of namespace object declared by a structural line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ObjectKind {
    Scope,
    Device,
    Method,
    Name,
    Processor,
}

impl ObjectKind {
    /// All kinds, in the order markers are probed when a line carries several.
    pub const PROBE_ORDER: [ObjectKind; 5] = [
        ObjectKind::Processor,
        ObjectKind::Method,
        ObjectKind::Scope,
        ObjectKind::Device,
        ObjectKind::Name,
    ];

    /// Keyword as written by the disassembler.
    pub fn keyword(self) -> &'static str {
        match self {
            ObjectKind::Scope => "Scope",
            ObjectKind::Device => "Device",
            ObjectKind::Method => "Method",
            ObjectKind::Name => "Name",
            ObjectKind::Processor => "Processor",
        }
    }

    /// The literal marker (`Keyword (`) searched for in source lines.
    pub fn marker(self) -> &'static str {
        match self {
            ObjectKind::Scope => "Scope (",
            ObjectKind::Device => "Device (",
            ObjectKind::Method => "Method (",
            ObjectKind::Name => "Name (",
            ObjectKind::Processor => "Processor (",
        }
    }

    /// Parse a kind from its keyword, case-insensitively.
    pub fn from_keyword(value: &str) -> Option<Self> {
        Self::PROBE_ORDER.into_iter().find(|kind| kind.keyword().eq_ignore_ascii_case(value))
    }
}

impl std::fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Derived classification of a single source line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineClass {
    /// Declares a namespace-visible object.
    Structural(ObjectKind),
    /// Raw byte listing (`OFFSET: HH HH ...`).
    HexPayload,
    Plain,
}

/// A structural line, retaining its 0-based line number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuralEntry {
    pub text: String,
    pub line: usize,
}

impl StructuralEntry {
    pub fn new(text: impl Into<String>, line: usize) -> Self {
        Self { text: text.into(), line }
    }
}

/// Fully-qualified namespace path of a structural object.
///
/// `path` always starts with `\` and never contains `^`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ResolvedPath {
    pub path: String,
    pub line: usize,
    pub kind: ObjectKind,
}

impl ResolvedPath {
    pub fn new(path: impl Into<String>, line: usize, kind: ObjectKind) -> Self {
        Self { path: path.into(), line, kind }
    }

    /// Last dotted segment (`EC0` for `\_SB.PCI0.LPCB.EC0`).
    pub fn name(&self) -> &str {
        last_segment(&self.path)
    }

    /// Path of the enclosing object (`\_SB.PCI0.LPCB` for `\_SB.PCI0.LPCB.EC0`).
    pub fn parent(&self) -> &str {
        parent_path(&self.path)
    }
}

/// Last dotted segment of an absolute path.
pub fn last_segment(path: &str) -> &str {
    path.rsplit('.').next().unwrap_or(path)
}

/// Everything before the last dotted segment; the path itself when it has one segment.
pub fn parent_path(path: &str) -> &str {
    match path.rfind('.') {
        Some(idx) => &path[..idx],
        None => path,
    }
}

/// A binary find/replace patch against the original table.
///
/// `find` and `replace` are equal-length uppercase hex strings; `find` occurred
/// exactly once in the raw table when the patch was generated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatchSpec {
    pub comment: String,
    pub find: String,
    pub replace: String,
}

impl PatchSpec {
    pub fn new(
        comment: impl Into<String>,
        find: impl Into<String>,
        replace: impl Into<String>,
    ) -> Self {
        Self { comment: comment.into(), find: find.into(), replace: replace.into() }
    }

    pub fn find_bytes(&self) -> Result<Vec<u8>, hex::FromHexError> {
        hex::decode(&self.find)
    }

    pub fn replace_bytes(&self) -> Result<Vec<u8>, hex::FromHexError> {
        hex::decode(&self.replace)
    }
}

/// One independently compilable SSDT, plus any binary patches it relies on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fragment {
    /// File stem, e.g. `SSDT-EC`.
    pub name: String,
    /// ASL source text.
    pub source: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub patches: Vec<PatchSpec>,
}

impl Fragment {
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self { name: name.into(), source: source.into(), patches: Vec::new() }
    }

    pub fn with_patches(mut self, patches: Vec<PatchSpec>) -> Self {
        self.patches = patches;
        self
    }
}

/// Result of running one synthesizer.
///
/// `NotApplicable` is expected (the firmware doesn't need this fix);
/// `Failed` means a supporting object or a unique patch could not be found.
#[derive(Debug)]
pub enum Outcome {
    Applicable(Fragment),
    NotApplicable(String),
    Failed(SynthesisError),
}

impl Outcome {
    pub fn not_applicable(reason: impl Into<String>) -> Self {
        Outcome::NotApplicable(reason.into())
    }

    pub fn fragment(&self) -> Option<&Fragment> {
        match self {
            Outcome::Applicable(fragment) => Some(fragment),
            _ => None,
        }
    }

    pub fn is_applicable(&self) -> bool {
        matches!(self, Outcome::Applicable(_))
    }

    /// Stable status label used in reports.
    pub fn status(&self) -> &'static str {
        match self {
            Outcome::Applicable(_) => "applicable",
            Outcome::NotApplicable(_) => "not_applicable",
            Outcome::Failed(_) => "failed",
        }
    }
}

impl From<Result<Fragment, SynthesisError>> for Outcome {
    fn from(result: Result<Fragment, SynthesisError>) -> Self {
        match result {
            Ok(fragment) => Outcome::Applicable(fragment),
            Err(err) => Outcome::Failed(err),
        }
    }
}
