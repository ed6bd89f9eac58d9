use std::path::Path;

use anyhow::{anyhow, Result};

use smith_core::model::{ObjectKind, ResolvedPath};
use smith_core::services::IaslToolchain;

use crate::commands::util::load_image;

/// Print the resolved namespace paths of a table, optionally filtered.
pub fn paths_command(
    dsdt: Option<&Path>,
    dsl: Option<&Path>,
    iasl: Option<&Path>,
    kind: Option<&str>,
    suffix: Option<&str>,
    json: bool,
) -> Result<()> {
    let kind = kind
        .map(|k| ObjectKind::from_keyword(k).ok_or_else(|| anyhow!("Unknown object kind: {k}")))
        .transpose()?;

    let loaded = load_image(dsdt, dsl, &IaslToolchain::resolve(iasl))?;
    let index = loaded.image.paths();
    let paths: Vec<&ResolvedPath> = index
        .with_suffix(suffix.unwrap_or(""))
        .into_iter()
        .filter(|p| kind.map_or(true, |k| p.kind == k))
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&paths)?);
        return Ok(());
    }

    if paths.is_empty() {
        println!("Paths: (none)");
        return Ok(());
    }

    println!("Paths:");
    for path in paths {
        println!("- {} [{}] line {}", path.path, path.kind, path.line);
    }

    Ok(())
}
