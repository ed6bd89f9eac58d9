//! Error types shared across the indexing and synthesis layers.

use std::path::PathBuf;

use thiserror::Error;

/// Failure to grow a find pattern into one that is unique in the raw table.
#[derive(Debug, Error, PartialEq)]
pub enum PadError {
    #[error("Needle '{0}' is not a non-empty, even-length hex string")]
    InvalidNeedle(String),

    #[error("'{needle}' not found in hex run at lines {start}..={end}")]
    NeedleNotFound { needle: String, start: usize, end: usize },

    #[error("Instance {instance} out of range; hex run holds {found} occurrence(s)")]
    InstanceOutOfRange { instance: usize, found: usize },

    /// Ran out of hex lines before the pattern became unique.
    #[error("Hit end of listing before a unique pad for '{needle}' was found")]
    Exhausted { needle: String },

    #[error("Listing contains invalid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),
}

/// Failure rendering a slot template.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemplateError {
    #[error("Template slot '{0}' has no value")]
    MissingSlot(String),

    #[error("Template contains an unterminated slot")]
    UnterminatedSlot,
}

/// Why a synthesizer could not produce its fragment.
#[derive(Debug, Error)]
pub enum SynthesisError {
    /// A supporting object (e.g. the LPC bus) is missing.
    #[error("Could not locate {0}")]
    Lookup(String),

    #[error("Unable to build unique patch: {0}")]
    PatchUniqueness(#[from] PadError),

    /// The table looks like it was already patched by hand.
    #[error("{0}")]
    AlreadyPatched(String),

    #[error("Template error: {0}")]
    Template(#[from] TemplateError),
}

/// Failure invoking the external ACPI compiler/disassembler.
#[derive(Debug, Error)]
pub enum ToolchainError {
    #[error("iasl not found at {0}")]
    NotFound(PathBuf),

    #[error("Failed to spawn iasl: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("iasl exited with {status}: {stderr}")]
    Failed { status: String, stderr: String },

    #[error("Expected iasl output at {0}")]
    MissingOutput(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
