use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use ssdt_smith::commands::{
    boot_log_command, generate_command, list_fragments_command, paths_command, scope_command,
    GenerateArgs,
};

/// SSDT hotpatch generator for ACPI DSDT tables.
///
/// This CLI is a thin wrapper around `smith-core` (exposed in code as `smith_core`).
/// All substantive logic lives in the library so it can be tested thoroughly.
#[derive(Parser, Debug)]
#[command(
    name = "ssdt-smith",
    version,
    about = "Generate SSDT hotpatches from a disassembled DSDT",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate SSDT fragments, binary patches and a run report.
    ///
    /// This will:
    /// - Disassemble the DSDT with iasl (unless `--dsl` is given).
    /// - Run each selected fragment synthesizer.
    /// - Write `<Fragment>.dsl` (and `.aml` when compiled), `patches.json` and `report.json`.
    Generate {
        /// Compiled DSDT (`.aml`).
        #[arg(long)]
        dsdt: Option<PathBuf>,

        /// Existing `iasl -dl -l` listing. Skips disassembly.
        #[arg(long)]
        dsl: Option<PathBuf>,

        /// Path to the iasl binary. Defaults to `IASL_BIN`, then `iasl` on PATH.
        #[arg(long)]
        iasl: Option<PathBuf>,

        /// Output directory. Defaults to `SSDTs`.
        #[arg(long)]
        out: Option<PathBuf>,

        /// Optional YAML or JSON config file.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Only run these fragments (repeatable), e.g. `--only SSDT-EC`.
        #[arg(long)]
        only: Vec<String>,

        /// Write `.dsl` sources without compiling them.
        #[arg(long, default_value_t = false)]
        no_compile: bool,

        /// Print the run report as JSON instead of a summary.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// List resolved namespace paths.
    Paths {
        #[arg(long)]
        dsdt: Option<PathBuf>,

        #[arg(long)]
        dsl: Option<PathBuf>,

        #[arg(long)]
        iasl: Option<PathBuf>,

        /// Filter by object kind (Device, Method, Name, Processor).
        #[arg(long)]
        kind: Option<String>,

        /// Filter by trailing path segment(s), e.g. `LPCB` or `EC0._STA`.
        #[arg(long)]
        suffix: Option<String>,

        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Print the body of the object declared on a given line.
    Scope {
        #[arg(long)]
        dsl: PathBuf,

        /// 0-based line index of the declaration.
        #[arg(long)]
        line: usize,

        /// Keep hex payload lines.
        #[arg(long, default_value_t = false)]
        hex: bool,

        /// Drop comments and `label:` prefixes.
        #[arg(long, default_value_t = false)]
        strip_comments: bool,
    },

    /// List the fragment synthesizers known to this binary.
    ListFragments {
        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Report MAT support and CFG Lock from an OpenCore boot log.
    BootLog {
        /// Log file. Defaults to the first `opencore-*` file in `--dir`.
        #[arg(long)]
        log: Option<PathBuf>,

        /// Directory searched when `--log` is omitted. Defaults to the current directory.
        #[arg(long)]
        dir: Option<PathBuf>,

        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays parseable.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("ssdt_smith=info,smith_core=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Generate { dsdt, dsl, iasl, out, config, only, no_compile, json } => {
            generate_command(&GenerateArgs {
                dsdt,
                dsl,
                iasl,
                out,
                config,
                only,
                no_compile,
                json,
            })?
        }
        Command::Paths { dsdt, dsl, iasl, kind, suffix, json } => paths_command(
            dsdt.as_deref(),
            dsl.as_deref(),
            iasl.as_deref(),
            kind.as_deref(),
            suffix.as_deref(),
            json,
        )?,
        Command::Scope { dsl, line, hex, strip_comments } => {
            scope_command(&dsl, line, hex, strip_comments)?
        }
        Command::ListFragments { json } => list_fragments_command(json)?,
        Command::BootLog { log, dir, json } => {
            boot_log_command(log.as_deref(), dir.as_deref(), json)?
        }
    }

    Ok(())
}
