use crate::dsl::{FirmwareImage, ScopeOptions};
use crate::error::SynthesisError;
use crate::model::{parent_path, Fragment, Outcome};
use crate::services::synthesizers::{
    search_bus_candidates, FragmentSynthesizer, SynthesisOptions, DISABLE_ON_DARWIN, EC_HID,
};
use crate::services::template::{ExternalKind, SsdtBuilder, Template};

/// Objects a real embedded controller always declares.
const EC_MARKERS: [&str; 3] = ["_HID", "_CRS", "_GPE"];

const FAKE_EC: &str = r#"Scope ({{bus}})
{
    Device (EC)
    {
        Name (_HID, "ACID0001")  // _HID: Hardware ID
        Method (_STA, 0, NotSerialized)  // _STA: Status
        {
            If (_OSI ("Darwin"))
            {
                Return (0x0F)
            }
            Else
            {
                Return (Zero)
            }
        }
    }
}"#;

/// Fabricates an `EC` device on the LPC bus, or hides genuine ECs from macOS.
pub struct EcSynthesizer;

/// A genuine EC device and the path later patches will refer to it by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EcCandidate {
    pub path: String,
    /// `EC` is referred to as `EC0`, the name it is expected to be renamed to.
    pub reference: String,
    pub valid: bool,
    pub has_sta: bool,
}

impl EcSynthesizer {
    /// Inspect every `PNP0C09` device.
    pub fn survey(image: &FirmwareImage) -> Vec<EcCandidate> {
        image
            .devices_with_hid(EC_HID)
            .into_iter()
            .map(|device| {
                let reference = if device.name() == "EC" {
                    format!("{}.EC0", device.parent())
                } else {
                    device.path.clone()
                };
                let body = image.scope(device.line, ScopeOptions::stripped());
                let valid = EC_MARKERS.iter().all(|marker| body.contains(marker));
                let has_sta = !image.paths().methods(&format!("{}._STA", device.path)).is_empty();
                EcCandidate { path: device.path, reference, valid, has_sta }
            })
            .collect()
    }

    fn build(
        &self,
        image: &FirmwareImage,
        options: &SynthesisOptions,
    ) -> Result<Fragment, SynthesisError> {
        tracing::info!("locating PNP0C09 (EC) devices");
        let candidates = Self::survey(image);

        let mut to_disable = Vec::new();
        for ec in &candidates {
            if ec.reference != ec.path {
                tracing::info!(device = %ec.path, "EC called EC; referring to it as EC0");
            }
            if !ec.valid {
                tracing::info!(device = %ec.path, "not a valid EC device");
                continue;
            }
            if ec.has_sta {
                tracing::info!(device = %ec.path, "valid EC already has _STA; skipping");
                continue;
            }
            tracing::info!(device = %ec.path, "valid EC queued for _STA override");
            to_disable.push(ec.reference.clone());
        }

        let bus = match candidates.first() {
            Some(ec) => Some(parent_path(&ec.path).to_string()),
            None => search_bus_candidates(image, options),
        }
        .ok_or_else(|| SynthesisError::Lookup("LPC bus device (LPCB/LPC0/LPC/SBRG/PX40)".into()))?;
        tracing::info!(bus = %bus, "found LPC bus");

        let mut ssdt = SsdtBuilder::new("SsdtEC", 0x0000_1000);
        ssdt.external(&bus, ExternalKind::Device);
        for device in &to_disable {
            ssdt.external(device, ExternalKind::Device);
        }
        for device in &to_disable {
            ssdt.template(&Template::new(DISABLE_ON_DARWIN).slot("device", device))?;
        }
        if to_disable.is_empty() {
            ssdt.template(&Template::new(FAKE_EC).slot("bus", &bus))?;
        }

        Ok(Fragment::new(self.name(), ssdt.build()))
    }
}

impl FragmentSynthesizer for EcSynthesizer {
    fn name(&self) -> &'static str {
        "SSDT-EC"
    }

    fn description(&self) -> &'static str {
        "Fake EC device on the LPC bus; hides genuine ECs from macOS"
    }

    fn synthesize(&self, image: &FirmwareImage, options: &SynthesisOptions) -> Outcome {
        self.build(image, options).into()
    }
}
