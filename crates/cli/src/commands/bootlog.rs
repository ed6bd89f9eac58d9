use std::path::Path;

use anyhow::{anyhow, Result};
use serde::Serialize;

use smith_core::services::{find_opencore_log, read_boot_log};

#[derive(Debug, Serialize)]
struct BootLogReport {
    log: String,
    mat_support: bool,
    cfg_lock: bool,
}

/// Report the MAT and CFG Lock flags from an OpenCore boot log.
///
/// With no `--log`, the first `opencore-*` file in `dir` (default `.`) is used.
pub fn boot_log_command(log: Option<&Path>, dir: Option<&Path>, json: bool) -> Result<()> {
    let log = match log {
        Some(path) => path.to_path_buf(),
        None => {
            let dir = dir.unwrap_or(Path::new("."));
            find_opencore_log(dir)?
                .ok_or_else(|| anyhow!("No opencore-* log found in {}", dir.display()))?
        }
    };
    let status = read_boot_log(&log)?;

    if json {
        let report = BootLogReport {
            log: log.display().to_string(),
            mat_support: status.mat_support,
            cfg_lock: status.cfg_lock,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Boot log: {}", log.display());
    println!("- MAT support: {}", if status.mat_support { "yes" } else { "no" });
    println!("- CFG Lock: {}", if status.cfg_lock { "yes" } else { "no" });
    Ok(())
}
