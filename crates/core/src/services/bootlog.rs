//! OpenCore boot log flags.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};

const MAT_SUPPORT_PATTERN: &str = r"OCABC: MAT support is (\d)";
const CFG_LOCK_PATTERN: &str = r"EIST CFG Lock (\d)";

/// Firmware capabilities reported in an OpenCore log.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BootLogStatus {
    pub mat_support: bool,
    pub cfg_lock: bool,
}

/// Capture group of the last line matching `pattern`.
fn last_capture(text: &str, pattern: &str) -> Option<String> {
    let re = Regex::new(pattern).ok()?;
    text.lines()
        .filter_map(|line| re.captures(line))
        .last()
        .and_then(|caps| caps.get(1).map(|m| m.as_str().to_string()))
}

/// Scan log text; a flag is set only when its last report is `1`.
pub fn scan_boot_log(text: &str) -> BootLogStatus {
    BootLogStatus {
        mat_support: last_capture(text, MAT_SUPPORT_PATTERN).as_deref() == Some("1"),
        cfg_lock: last_capture(text, CFG_LOCK_PATTERN).as_deref() == Some("1"),
    }
}

pub fn read_boot_log(path: &Path) -> Result<BootLogStatus> {
    let body = fs::read_to_string(path)
        .with_context(|| format!("Failed to read boot log at {}", path.display()))?;
    Ok(scan_boot_log(&body))
}

/// First regular file in `dir` named `opencore-*`, by name.
pub fn find_opencore_log(dir: &Path) -> Result<Option<PathBuf>> {
    let mut logs = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("Failed to read {}", dir.display()))? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        if entry.file_name().to_string_lossy().starts_with("opencore-") {
            logs.push(entry.path());
        }
    }
    logs.sort();
    Ok(logs.into_iter().next())
}
