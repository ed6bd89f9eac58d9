//! Structural view of a disassembled ACPI table listing.
//!
//! This module wraps the listing produced by `iasl -dl -l`:
//! - `lines`: one-pass line classification and hex/comment helpers
//! - `paths`: namespace path resolution from indentation and carets
//! - `scope`: brace-counted body extraction
//! - `hex`: hex-run navigation and the unique find-pattern search
//! - `image`: the immutable parsed-table aggregate handed to every consumer

pub mod hex;
pub mod image;
pub mod lines;
pub mod paths;
pub mod scope;

pub use hex::{HexLocator, HexRun, PadDirection, UniquePad};
pub use image::{FirmwareImage, ParseWarning};
pub use scope::{ScopeBody, ScopeOptions};
