use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

use smith_core::config::{load_config, GenerateConfig};
use smith_core::layout::OutputLayout;
use smith_core::model::Outcome;
use smith_core::services::{default_synthesizer_registry, IaslToolchain, RunReport};

use crate::canonicalize_or_current;
use crate::commands::util::load_image;

/// Inputs for `generate`, as collected from the command line.
#[derive(Debug, Clone, Default)]
pub struct GenerateArgs {
    pub dsdt: Option<PathBuf>,
    pub dsl: Option<PathBuf>,
    pub iasl: Option<PathBuf>,
    pub out: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub only: Vec<String>,
    pub no_compile: bool,
    pub json: bool,
}

/// Merge command-line flags over the config file (or defaults).
pub fn resolve_generate_config(args: &GenerateArgs) -> Result<GenerateConfig> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => GenerateConfig::default(),
    };
    if let Some(iasl) = &args.iasl {
        config.iasl_path = Some(iasl.clone());
    }
    if let Some(out) = &args.out {
        config.output_dir = out.clone();
    }
    if !args.only.is_empty() {
        config.fragments = args.only.clone();
    }
    if args.no_compile {
        config.compile = false;
    }
    Ok(config)
}

/// Run the selected synthesizers and write fragments, patches and the report.
pub fn generate_command(args: &GenerateArgs) -> Result<()> {
    let config = resolve_generate_config(args)?;
    let iasl = IaslToolchain::resolve(config.iasl_path.as_deref());
    let loaded = load_image(args.dsdt.as_deref(), args.dsl.as_deref(), &iasl)?;

    let out_dir = canonicalize_or_current(&config.output_dir.to_string_lossy())?;
    let layout = OutputLayout::new(&out_dir);
    fs::create_dir_all(&layout.root)
        .with_context(|| format!("Failed to create output dir: {}", layout.root.display()))?;

    let registry = default_synthesizer_registry();
    let outcomes =
        registry.run(&loaded.image, &config.synthesis_options(), config.selected_fragments());

    let mut report = RunReport::new(
        loaded.input.as_ref().map(|p| p.display().to_string()),
        Some(loaded.input_sha256.clone()),
    )
    .with_warnings(loaded.image.warnings());

    for (name, outcome) in &outcomes {
        let mut compiled = false;
        if let Outcome::Applicable(fragment) = outcome {
            let dsl_path = layout.fragment_source_path(&fragment.name);
            fs::write(&dsl_path, &fragment.source)
                .with_context(|| format!("Failed to write {}", dsl_path.display()))?;
            if config.compile {
                match iasl.compile(&dsl_path) {
                    Ok(_) => compiled = true,
                    Err(err) => {
                        tracing::warn!(fragment = %name, error = %err, "compilation failed");
                        if !args.json {
                            println!("! {name}: compilation failed: {err}");
                        }
                    }
                }
            }
        }
        report.record(name, outcome, compiled);
    }

    let patches_json = serde_json::to_string_pretty(&report.patches)?;
    fs::write(&layout.patches_path, patches_json)
        .with_context(|| format!("Failed to write {}", layout.patches_path.display()))?;
    let report_json = serde_json::to_string_pretty(&report)?;
    fs::write(&layout.report_path, &report_json)
        .with_context(|| format!("Failed to write {}", layout.report_path.display()))?;

    if args.json {
        println!("{report_json}");
        return Ok(());
    }

    println!("Output: {}", layout.root.display());
    for fragment in &report.fragments {
        match fragment.status.as_str() {
            "applicable" => {
                let suffix = if fragment.compiled { " (compiled)" } else { "" };
                println!("- {}: generated{}", fragment.name, suffix);
            }
            "not_applicable" => println!(
                "- {}: not needed ({})",
                fragment.name,
                fragment.reason.as_deref().unwrap_or("")
            ),
            _ => println!(
                "- {}: FAILED ({})",
                fragment.name,
                fragment.reason.as_deref().unwrap_or("unknown error")
            ),
        }
    }
    if report.patches.is_empty() {
        println!("Patches: (none)");
    } else {
        println!("Patches:");
        for patch in &report.patches {
            println!("- {}: {} -> {}", patch.comment, patch.find, patch.replace);
        }
    }

    Ok(())
}
