//! smith-core
//!
//! Core library for turning a disassembled ACPI DSDT into SSDT hotpatch
//! fragments.
//!
//! This crate defines the data model, listing indexers (line classification,
//! namespace path resolution, scope extraction, hex navigation), the query
//! index, the fragment synthesizers, and the adapters for `iasl` and OpenCore
//! boot logs.
//!
//! All substantive logic lives here so it is testable without the CLI.

pub mod config;
pub mod dsl;
pub mod error;
pub mod index;
pub mod layout;
pub mod model;
pub mod services;

/// Returns the library version as encoded at compile time.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
