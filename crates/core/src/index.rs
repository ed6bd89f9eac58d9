//! Query index over resolved namespace paths.

use crate::model::{ObjectKind, ResolvedPath};

/// Sorted, immutable collection of resolved paths.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathIndex {
    paths: Vec<ResolvedPath>,
}

impl PathIndex {
    pub fn new(mut paths: Vec<ResolvedPath>) -> Self {
        paths.sort();
        Self { paths }
    }

    pub fn all(&self) -> &[ResolvedPath] {
        &self.paths
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Object declared on `line`, if any.
    pub fn at_line(&self, line: usize) -> Option<&ResolvedPath> {
        self.paths.iter().find(|p| p.line == line)
    }

    pub fn by_kind(&self, kind: ObjectKind) -> Vec<&ResolvedPath> {
        self.paths.iter().filter(|p| p.kind == kind).collect()
    }

    /// Paths ending in `name`, matched on whole segments and case-insensitively.
    ///
    /// `name` may be a single segment (`LPCB`), a dotted tail (`EC0._STA`), or
    /// an absolute path. An empty name matches everything.
    pub fn with_suffix(&self, name: &str) -> Vec<&ResolvedPath> {
        self.paths.iter().filter(|p| suffix_matches(&p.path, name)).collect()
    }

    /// `by_kind` and `with_suffix` combined.
    pub fn find(&self, kind: ObjectKind, name: &str) -> Vec<&ResolvedPath> {
        self.paths.iter().filter(|p| p.kind == kind && suffix_matches(&p.path, name)).collect()
    }

    pub fn first(&self, kind: ObjectKind, name: &str) -> Option<&ResolvedPath> {
        self.paths.iter().find(|p| p.kind == kind && suffix_matches(&p.path, name))
    }

    pub fn devices(&self, name: &str) -> Vec<&ResolvedPath> {
        self.find(ObjectKind::Device, name)
    }

    pub fn methods(&self, name: &str) -> Vec<&ResolvedPath> {
        self.find(ObjectKind::Method, name)
    }

    pub fn names(&self, name: &str) -> Vec<&ResolvedPath> {
        self.find(ObjectKind::Name, name)
    }

    pub fn processors(&self) -> Vec<&ResolvedPath> {
        self.by_kind(ObjectKind::Processor)
    }
}

fn suffix_matches(path: &str, name: &str) -> bool {
    let name = name.trim_start_matches('.');
    if name.is_empty() {
        return true;
    }
    let path = path.to_ascii_uppercase();
    let name = name.to_ascii_uppercase();
    if path == name {
        return true;
    }
    match path.strip_suffix(name.as_str()) {
        Some(head) => head.ends_with('.') || head.ends_with('\\'),
        None => false,
    }
}
