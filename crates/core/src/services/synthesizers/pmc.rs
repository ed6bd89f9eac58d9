use crate::dsl::FirmwareImage;
use crate::error::SynthesisError;
use crate::model::{Fragment, Outcome};
use crate::services::synthesizers::{locate_bus, FragmentSynthesizer, SynthesisOptions};
use crate::services::template::{ExternalKind, SsdtBuilder, Template};

/// Base of the PMC's fixed MMIO window.
pub const PMC_BASE: u32 = 0xFE00_0000;
pub const PMC_LENGTH: u32 = 0x0001_0000;

const PMCR_DEVICE: &str = r#"Scope ({{bus}})
{
    Device (PMCR)
    {
        Name (_HID, EisaId ("APP9876"))  // _HID: Hardware ID
        Method (_STA, 0, NotSerialized)  // _STA: Status
        {
            If (_OSI ("Darwin"))
            {
                Return (0x0B)
            }
            Else
            {
                Return (Zero)
            }
        }

        Name (_CRS, ResourceTemplate ()  // _CRS: Current Resource Settings
        {
            Memory32Fixed (ReadWrite,
                {{base}},         // Address Base
                {{length}},         // Address Length
                )
        })
    }
}"#;

/// Fabricates the `PMCR` device that macOS expects for NVRAM on 300-series boards.
pub struct PmcSynthesizer;

impl PmcSynthesizer {
    fn build(&self, bus: &str) -> Result<Fragment, SynthesisError> {
        let mut ssdt = SsdtBuilder::new("PMCR", 0x0000_1000)
            .comment("Fake PMC device exposing the fixed power-management MMIO window.");
        ssdt.external(bus, ExternalKind::Device);
        ssdt.template(
            &Template::new(PMCR_DEVICE)
                .slot("bus", bus)
                .slot("base", format!("0x{PMC_BASE:08X}"))
                .slot("length", format!("0x{PMC_LENGTH:08X}")),
        )?;
        Ok(Fragment::new(self.name(), ssdt.build()))
    }
}

impl FragmentSynthesizer for PmcSynthesizer {
    fn name(&self) -> &'static str {
        "SSDT-PMC"
    }

    fn description(&self) -> &'static str {
        "PMCR device on the LPC bus"
    }

    fn synthesize(&self, image: &FirmwareImage, options: &SynthesisOptions) -> Outcome {
        tracing::info!("locating LPC bus");
        match locate_bus(image, options) {
            Some(bus) => {
                tracing::info!(bus = %bus, "found LPC bus");
                self.build(&bus).into()
            }
            None => Outcome::Failed(SynthesisError::Lookup(
                "LPC bus device (LPCB/LPC0/LPC/SBRG/PX40)".into(),
            )),
        }
    }
}
