//! Services built on top of an indexed firmware image.

pub mod bootlog;
pub mod iasl;
pub mod report;
pub mod synthesizers;
pub mod template;

pub use bootlog::{find_opencore_log, read_boot_log, scan_boot_log, BootLogStatus};
pub use iasl::IaslToolchain;
pub use report::{FragmentReport, RunReport};
pub use synthesizers::{
    default_synthesizer_registry, FragmentSynthesizer, SynthesisOptions, SynthesizerRegistry,
};
pub use template::{ExternalKind, SsdtBuilder, Template};
