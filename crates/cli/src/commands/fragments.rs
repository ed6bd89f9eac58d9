use anyhow::Result;
use serde::Serialize;

use smith_core::services::{default_synthesizer_registry, FragmentSynthesizer};

#[derive(Debug, Serialize)]
pub struct FragmentInfo {
    pub name: String,
    pub description: String,
}

/// List the fragment synthesizers built into this binary.
pub fn list_fragments_command(json: bool) -> Result<()> {
    let registry = default_synthesizer_registry();
    let entries: Vec<FragmentInfo> = registry
        .iter()
        .map(|s| FragmentInfo {
            name: s.name().to_string(),
            description: s.description().to_string(),
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    println!("Fragments:");
    for entry in entries {
        println!("- {}: {}", entry.name, entry.description);
    }

    Ok(())
}
