use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};

use smith_core::dsl::scope::extract_scope;
use smith_core::dsl::ScopeOptions;

/// Print the body of the object declared at `line` (0-based).
pub fn scope_command(dsl: &Path, line: usize, hex: bool, strip_comments: bool) -> Result<()> {
    let listing = fs::read_to_string(dsl)
        .with_context(|| format!("Failed to read listing at {}", dsl.display()))?;
    let lines: Vec<&str> = listing.lines().collect();
    if line >= lines.len() {
        return Err(anyhow!("Line {line} is past the end of the listing ({} lines)", lines.len()));
    }

    let body = extract_scope(&lines, line, ScopeOptions { include_hex: hex, strip_comments });
    println!("{}", body.text());
    if body.truncated {
        eprintln!("warning: braces never balanced; body is truncated at line {}", body.end);
    }
    Ok(())
}
