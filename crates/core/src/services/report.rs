//! Run report written next to the generated fragments.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::dsl::ParseWarning;
use crate::model::{Outcome, PatchSpec};

/// Per-fragment result line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FragmentReport {
    pub name: String,
    /// `applicable`, `not_applicable` or `failed`.
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default)]
    pub compiled: bool,
}

/// Summary of one generation run (`report.json`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    pub tool_version: String,
    /// RFC 3339 UTC timestamp.
    pub generated_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_sha256: Option<String>,
    pub fragments: Vec<FragmentReport>,
    pub patches: Vec<PatchSpec>,
    #[serde(default)]
    pub warnings: Vec<ParseWarning>,
}

impl RunReport {
    pub fn new(input: Option<String>, input_sha256: Option<String>) -> Self {
        Self {
            tool_version: crate::version().to_string(),
            generated_at: Utc::now().to_rfc3339(),
            input,
            input_sha256,
            fragments: Vec::new(),
            patches: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Record a synthesizer outcome. Patches of applicable fragments are
    /// collected into the run-wide list.
    pub fn record(&mut self, name: &str, outcome: &Outcome, compiled: bool) {
        let reason = match outcome {
            Outcome::Applicable(fragment) => {
                self.patches.extend(fragment.patches.iter().cloned());
                None
            }
            Outcome::NotApplicable(reason) => Some(reason.clone()),
            Outcome::Failed(err) => Some(err.to_string()),
        };
        self.fragments.push(FragmentReport {
            name: name.to_string(),
            status: outcome.status().to_string(),
            reason,
            compiled,
        });
    }

    pub fn with_warnings(mut self, warnings: &[ParseWarning]) -> Self {
        self.warnings = warnings.to_vec();
        self
    }

    pub fn applicable(&self) -> impl Iterator<Item = &FragmentReport> {
        self.fragments.iter().filter(|f| f.status == "applicable")
    }

    pub fn failed(&self) -> impl Iterator<Item = &FragmentReport> {
        self.fragments.iter().filter(|f| f.status == "failed")
    }
}
