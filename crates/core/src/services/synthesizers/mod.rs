//! Rule-based SSDT fragment synthesizers.
//!
//! Each synthesizer inspects a `FirmwareImage` and decides on its own whether
//! its fix applies. They share no state, so callers may run them in any order.

use crate::dsl::FirmwareImage;
use crate::model::Outcome;

pub mod awac;
pub mod ec;
pub mod plugin;
pub mod pmc;
pub mod usb;

pub use awac::AwacSynthesizer;
pub use ec::EcSynthesizer;
pub use plugin::PluginTypeSynthesizer;
pub use pmc::PmcSynthesizer;
pub use usb::UsbResetSynthesizer;

/// Historical names of the LPC-class bus, probed in order.
pub const DEFAULT_BUS_CANDIDATES: [&str; 5] = ["LPCB", "LPC0", "LPC", "SBRG", "PX40"];

/// Embedded controller hardware ID.
pub const EC_HID: &str = "PNP0C09";

/// `_STA` and `XSTA` as AML name bytes.
pub const STA_HEX: &str = "5F535441";
pub const XSTA_HEX: &str = "58535441";

/// `_STA` that hides a device from macOS and keeps it elsewhere.
pub(crate) const DISABLE_ON_DARWIN: &str = r#"Scope ({{device}})
{
    Method (_STA, 0, NotSerialized)  // _STA: Status
    {
        If (_OSI ("Darwin"))
        {
            Return (Zero)
        }
        Else
        {
            Return (0x0F)
        }
    }
}"#;

/// Knobs shared by all synthesizers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesisOptions {
    pub bus_candidates: Vec<String>,
}

impl Default for SynthesisOptions {
    fn default() -> Self {
        Self { bus_candidates: DEFAULT_BUS_CANDIDATES.iter().map(|s| s.to_string()).collect() }
    }
}

/// Trait implemented by each fix generator.
pub trait FragmentSynthesizer: Send + Sync {
    /// Fragment file stem, e.g. `SSDT-EC`.
    fn name(&self) -> &'static str;
    fn description(&self) -> &'static str;
    fn synthesize(&self, image: &FirmwareImage, options: &SynthesisOptions) -> Outcome;
}

/// Ordered collection of synthesizers; callers select by name.
#[derive(Default)]
pub struct SynthesizerRegistry {
    synthesizers: Vec<Box<dyn FragmentSynthesizer>>,
}

impl SynthesizerRegistry {
    pub fn new() -> Self {
        Self { synthesizers: Vec::new() }
    }

    pub fn register<S: FragmentSynthesizer + 'static>(&mut self, synthesizer: S) -> &mut Self {
        self.synthesizers.retain(|s| s.name() != synthesizer.name());
        self.synthesizers.push(Box::new(synthesizer));
        self
    }

    pub fn get(&self, name: &str) -> Option<&dyn FragmentSynthesizer> {
        self.synthesizers.iter().find(|s| s.name().eq_ignore_ascii_case(name)).map(|s| &**s)
    }

    /// Names in registration order.
    pub fn names(&self) -> Vec<&'static str> {
        self.synthesizers.iter().map(|s| s.name()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn FragmentSynthesizer> {
        self.synthesizers.iter().map(|s| &**s)
    }

    /// Run every synthesizer (or only those named in `only`) against `image`.
    ///
    /// A failure in one never stops the others.
    pub fn run(
        &self,
        image: &FirmwareImage,
        options: &SynthesisOptions,
        only: Option<&[String]>,
    ) -> Vec<(&'static str, Outcome)> {
        self.iter()
            .filter(|s| {
                only.map_or(true, |names| names.iter().any(|n| n.eq_ignore_ascii_case(s.name())))
            })
            .map(|s| {
                let outcome = s.synthesize(image, options);
                match &outcome {
                    Outcome::Applicable(_) => {
                        tracing::info!(fragment = s.name(), "fragment generated")
                    }
                    Outcome::NotApplicable(reason) => {
                        tracing::info!(fragment = s.name(), %reason, "fragment not needed")
                    }
                    Outcome::Failed(err) => {
                        let name = s.name();
                        tracing::warn!(fragment = name, error = %err, "unable to generate fragment")
                    }
                }
                (s.name(), outcome)
            })
            .collect()
    }
}

/// Registry holding the five built-in synthesizers.
pub fn default_synthesizer_registry() -> SynthesizerRegistry {
    let mut registry = SynthesizerRegistry::new();
    registry
        .register(EcSynthesizer)
        .register(PluginTypeSynthesizer)
        .register(PmcSynthesizer)
        .register(AwacSynthesizer)
        .register(UsbResetSynthesizer);
    registry
}

/// Locate the LPC-class bus: the parent of the first EC device if any,
/// otherwise the first device matching a candidate name.
pub fn locate_bus(image: &FirmwareImage, options: &SynthesisOptions) -> Option<String> {
    if let Some(ec) = image.devices_with_hid(EC_HID).first() {
        return Some(ec.parent().to_string());
    }
    search_bus_candidates(image, options)
}

/// First device matching one of the bus candidate names.
pub fn search_bus_candidates(image: &FirmwareImage, options: &SynthesisOptions) -> Option<String> {
    options
        .bus_candidates
        .iter()
        .find_map(|name| image.paths().devices(name).first().map(|p| p.path.clone()))
}
