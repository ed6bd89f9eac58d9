use crate::dsl::lines::{code_text, is_hex};

/// Toggles for scope extraction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScopeOptions {
    /// Keep hex payload lines in the body. They never count toward brace depth.
    pub include_hex: bool,
    /// Drop trailing `//` comments and leading `label:` prefixes.
    pub strip_comments: bool,
}

impl ScopeOptions {
    pub fn stripped() -> Self {
        Self { include_hex: false, strip_comments: true }
    }
}

/// Lines forming one object's lexical body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeBody {
    pub lines: Vec<String>,
    pub start: usize,
    /// Index of the last line consumed.
    pub end: usize,
    /// Input ran out before the braces balanced.
    pub truncated: bool,
}

impl ScopeBody {
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lines.iter().any(|line| line.contains(needle))
    }
}

/// Extract the body starting at `start` by counting braces.
///
/// Depth starts at the number of `{` on the first line that has any; the body
/// ends on the line where depth drops to zero or below.
pub fn extract_scope<S: AsRef<str>>(lines: &[S], start: usize, options: ScopeOptions) -> ScopeBody {
    let mut depth: Option<i64> = None;
    let mut body = Vec::new();
    let mut end = start;

    for (idx, raw) in lines.iter().enumerate().skip(start) {
        let raw = raw.as_ref();
        end = idx;
        if is_hex(raw) {
            if options.include_hex {
                body.push(raw.to_string());
            }
            continue;
        }
        let line = if options.strip_comments { code_text(raw) } else { raw };
        body.push(line.to_string());

        let opens = line.matches('{').count() as i64;
        let closes = line.matches('}').count() as i64;
        match depth {
            None => {
                if opens > 0 {
                    depth = Some(opens);
                }
            }
            Some(current) => {
                let next = current + opens - closes;
                if next <= 0 {
                    return ScopeBody { lines: body, start, end: idx, truncated: false };
                }
                depth = Some(next);
            }
        }
    }

    if start < lines.len() {
        tracing::warn!(start, "scope body runs past end of listing; returning partial body");
    }
    ScopeBody { lines: body, start, end, truncated: true }
}
