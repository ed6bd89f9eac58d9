//! Namespace path reconstruction from indentation.
//!
//! The disassembler nests objects by indentation, so walking the structural
//! entries backward and keeping every strictly less-indented entry yields the
//! chain of enclosing scopes.

use crate::dsl::lines::declared_kind;
use crate::model::{ObjectKind, ResolvedPath, StructuralEntry};

/// Identifiers that terminate the upward walk.
const ROOT_SCOPES: [&str; 4] = ["_SB", "_SB_", "_PR", "_PR_"];
const ROOT_PREFIXES: [&str; 5] = ["\\", "_SB.", "_SB_.", "_PR.", "_PR_."];

/// Path for one entry, and whether the walk reached a namespace root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathResolution {
    pub path: ResolvedPath,
    pub rooted: bool,
}

/// Split a structural line into its indentation marker and its identifier.
///
/// The marker is the text before the earliest object keyword; the identifier
/// is the first comma-delimited token inside the parentheses.
pub fn split_declaration(text: &str) -> Option<(&str, &str)> {
    let (start, marker) = ObjectKind::PROBE_ORDER
        .into_iter()
        .filter_map(|kind| text.find(kind.marker()).map(|idx| (idx, kind.marker())))
        .min_by_key(|(idx, _)| *idx)?;
    let args = &text[start + marker.len()..];
    let args = args.split(')').next().unwrap_or(args);
    let ident = args.split(',').next().unwrap_or(args).trim();
    Some((&text[..start], ident))
}

fn is_root(ident: &str) -> bool {
    ROOT_SCOPES.contains(&ident) || ROOT_PREFIXES.iter().any(|p| ident.starts_with(p))
}

/// Canonicalize collected root-to-leaf segments into an absolute path.
///
/// A bare `\` first segment is dropped, every `^` in a segment removes one
/// already-accumulated trailing segment, and the result always starts with `\`.
pub fn canonicalize_segments<S: AsRef<str>>(segments: &[S]) -> String {
    let mut segments: Vec<&str> = segments.iter().map(|s| s.as_ref()).collect();
    if segments.first() == Some(&"\\") {
        segments.remove(0);
    }

    let mut resolved: Vec<&str> = Vec::with_capacity(segments.len());
    for segment in segments {
        let carets = segment.matches('^').count();
        let keep = resolved.len().saturating_sub(carets);
        resolved.truncate(keep);
        resolved.push(segment.trim_start_matches('^'));
    }
    // Carets are only legal as a prefix; drop any stray ones.
    let joined = resolved.iter().map(|s| s.replace('^', "")).collect::<Vec<_>>().join(".");
    if joined.starts_with('\\') {
        joined
    } else {
        format!("\\{joined}")
    }
}

/// Smallest declaration indentation in the listing; entries there sit
/// directly in the DefinitionBlock.
fn top_level_indent(entries: &[StructuralEntry]) -> Option<usize> {
    entries.iter().filter_map(|e| split_declaration(&e.text)).map(|(m, _)| m.len()).min()
}

/// Resolve the entry at `index` by walking `entries` backward.
///
/// The walk is rooted when it reaches `\`, `_SB` or `_PR`, or when its
/// outermost entry is declared at top-level indentation.
pub fn resolve_path(entries: &[StructuralEntry], index: usize) -> PathResolution {
    resolve_within(entries, index, top_level_indent(entries))
}

fn resolve_within(
    entries: &[StructuralEntry],
    index: usize,
    top_indent: Option<usize>,
) -> PathResolution {
    let target = &entries[index];
    let kind = declared_kind(&target.text).unwrap_or_else(|| {
        ObjectKind::PROBE_ORDER
            .into_iter()
            .find(|k| target.text.contains(k.marker()))
            .unwrap_or(ObjectKind::Scope)
    });

    let mut indent: Option<usize> = None;
    let mut collected: Vec<&str> = Vec::new();
    let mut rooted = false;
    for entry in entries[..=index].iter().rev() {
        let Some((marker, ident)) = split_declaration(&entry.text) else {
            continue;
        };
        if indent.is_some_and(|current| marker.len() >= current) {
            continue;
        }
        indent = Some(marker.len());
        collected.push(ident);
        if is_root(ident) {
            rooted = true;
            break;
        }
    }
    collected.reverse();
    if !rooted && indent.is_some() && indent == top_indent {
        rooted = true;
    }

    PathResolution {
        path: ResolvedPath::new(canonicalize_segments(&collected), target.line, kind),
        rooted,
    }
}

/// Resolve every Device/Method/Name/Processor entry, sorted by path.
pub fn resolve_all(entries: &[StructuralEntry]) -> Vec<PathResolution> {
    let top_indent = top_level_indent(entries);
    let mut resolved: Vec<PathResolution> = entries
        .iter()
        .enumerate()
        .filter(|(_, entry)| declared_kind(&entry.text).is_some())
        .map(|(idx, _)| resolve_within(entries, idx, top_indent))
        .collect();
    resolved.sort_by(|a, b| a.path.cmp(&b.path));
    resolved
}
