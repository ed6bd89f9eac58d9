use serde::{Deserialize, Serialize};

use crate::dsl::hex::HexLocator;
use crate::dsl::lines::{hex_text, is_hex, structural_entries};
use crate::dsl::paths::resolve_all;
use crate::dsl::scope::{extract_scope, ScopeBody, ScopeOptions};
use crate::index::PathIndex;
use crate::model::{ResolvedPath, StructuralEntry};

/// Recoverable oddities noticed while indexing a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParseWarning {
    /// The upward walk stopped at a nested entry without reaching `\`, `_SB`,
    /// `_PR` or a top-level declaration.
    UnrootedPath { path: String, line: usize },
}

impl std::fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseWarning::UnrootedPath { path, line } => {
                write!(f, "path {path} (line {line}) does not resolve to a namespace root")
            }
        }
    }
}

/// A disassembled table paired with its compiled bytes, fully indexed.
///
/// Built once per run and only read afterwards; every synthesizer takes it by
/// shared reference.
#[derive(Debug, Clone)]
pub struct FirmwareImage {
    lines: Vec<String>,
    raw: Vec<u8>,
    entries: Vec<StructuralEntry>,
    index: PathIndex,
    warnings: Vec<ParseWarning>,
}

impl FirmwareImage {
    /// Index a listing and its raw table.
    pub fn parse(listing: &str, raw: Vec<u8>) -> Self {
        let lines: Vec<String> = listing.lines().map(str::to_string).collect();
        let entries = structural_entries(&lines);

        let mut warnings = Vec::new();
        let mut paths = Vec::new();
        for resolution in resolve_all(&entries) {
            if !resolution.rooted {
                tracing::warn!(
                    path = %resolution.path.path,
                    line = resolution.path.line,
                    "structural entry does not resolve to a namespace root"
                );
                warnings.push(ParseWarning::UnrootedPath {
                    path: resolution.path.path.clone(),
                    line: resolution.path.line,
                });
            }
            paths.push(resolution.path);
        }

        tracing::debug!(
            lines = lines.len(),
            structural = entries.len(),
            paths = paths.len(),
            "indexed listing"
        );

        Self { lines, raw, entries, index: PathIndex::new(paths), warnings }
    }

    /// Index a listing whose raw table is rebuilt from its own hex payload lines.
    pub fn from_listing(listing: &str) -> Result<Self, hex::FromHexError> {
        let raw: String = listing.lines().filter(|l| is_hex(l)).map(hex_text).collect();
        let raw = hex::decode(raw)?;
        Ok(Self::parse(listing, raw))
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    pub fn entries(&self) -> &[StructuralEntry] {
        &self.entries
    }

    pub fn paths(&self) -> &PathIndex {
        &self.index
    }

    pub fn warnings(&self) -> &[ParseWarning] {
        &self.warnings
    }

    pub fn scope(&self, start: usize, options: ScopeOptions) -> ScopeBody {
        extract_scope(&self.lines, start, options)
    }

    pub fn hex(&self) -> HexLocator<'_> {
        HexLocator::new(&self.lines, &self.raw)
    }

    /// Devices whose body mentions `hid` (case-insensitive), in document order.
    ///
    /// For each non-hex line containing the ID, the nearest preceding
    /// less-indented `Device (` line is taken as its owner.
    pub fn devices_with_hid(&self, hid: &str) -> Vec<ResolvedPath> {
        let hid = hid.to_ascii_uppercase();
        let mut devices: Vec<ResolvedPath> = Vec::new();

        for (idx, line) in self.lines.iter().enumerate() {
            if is_hex(line) || !line.to_ascii_uppercase().contains(&hid) {
                continue;
            }
            let pad = indentation(line);
            let owner = (0..=idx).rev().find(|&j| {
                let candidate = &self.lines[j];
                !is_hex(candidate) && candidate.contains("Device (") && indentation(candidate) < pad
            });
            let Some(owner) = owner else {
                continue;
            };
            match self.index.at_line(owner) {
                Some(device) => {
                    if !devices.iter().any(|d| d.line == device.line) {
                        devices.push(device.clone());
                    }
                }
                None => {
                    tracing::warn!(line = owner, hid = %hid, "owning device has no resolved path")
                }
            }
        }
        devices
    }
}

fn indentation(line: &str) -> usize {
    line.len() - line.trim_start_matches(' ').len()
}
