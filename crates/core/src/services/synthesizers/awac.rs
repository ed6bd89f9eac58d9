use crate::dsl::{FirmwareImage, ScopeOptions};
use crate::error::{PadError, SynthesisError};
use crate::model::{Fragment, ObjectKind, Outcome, PatchSpec, ResolvedPath};
use crate::services::synthesizers::{
    locate_bus, FragmentSynthesizer, SynthesisOptions, STA_HEX, XSTA_HEX,
};
use crate::services::template::{ExternalKind, SsdtBuilder, Template};

pub const AWAC_HID: &str = "ACPI000E";
pub const RTC_HID: &str = "PNP0B00";

const STAS_INIT: &str = r#"Scope ({{root}})
{
    Method (_INI, 0, NotSerialized)  // _INI: Initialize
    {
        If (_OSI ("Darwin"))
        {
            STAS = One
        }
    }
}"#;

const STA_VIA_XSTA: &str = r#"Scope ({{awac}})
{
    Name (ZSTA, 0x0F)
    Method (_STA, 0, NotSerialized)  // _STA: Status
    {
        If (_OSI ("Darwin"))
        {
            Return (Zero)
        }

        // Default to 0x0F, but return the renamed XSTA's result when present
        If (CondRefOf ({{awac}}.XSTA))
        {
            Store ({{awac}}.XSTA (), ZSTA)
        }

        Return (ZSTA)
    }
}"#;

const STA_FIXED: &str = r#"Scope ({{awac}})
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

const FAKE_RTC: &str = r#"Scope ({{bus}})
{
    Device (RTC0)
    {
        Name (_HID, EisaId ("PNP0B00"))  // _HID: Hardware ID
        Name (_CRS, ResourceTemplate ()  // _CRS: Current Resource Settings
        {
            IO (Decode16,
                0x0070,             // Range Minimum
                0x0070,             // Range Maximum
                0x01,               // Alignment
                0x08,               // Length
                )
            IRQNoFlags ()
                {8}
        })
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

/// How the AWAC clock gets disabled for macOS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClockFix {
    /// `_STA` reads `STAS`; setting it from `_INI` is enough.
    SetStas { root: String },
    /// `_STA` is renamed to `XSTA` in the binary and wrapped.
    WrapRenamedSta { awac: String, patch: PatchSpec },
    /// No `_STA` at all; add one.
    AddSta { awac: String },
}

/// Disables the AWAC clock for macOS and exposes a legacy RTC.
pub struct AwacSynthesizer;

impl AwacSynthesizer {
    /// Decide how to neutralize `awac`. Errors if `_STA` was already renamed.
    pub fn plan_clock_fix(
        image: &FirmwareImage,
        awac: &ResolvedPath,
    ) -> Result<ClockFix, SynthesisError> {
        let methods = image.paths();
        let sta = methods.first(ObjectKind::Method, &format!("{}._STA", awac.path));
        let xsta = methods.first(ObjectKind::Method, &format!("{}.XSTA", awac.path));

        let Some(sta) = sta else {
            if xsta.is_some() {
                return Err(SynthesisError::AlreadyPatched(format!(
                    "{}._STA already renamed to XSTA",
                    awac.path
                )));
            }
            tracing::info!(device = %awac.path, "no _STA method found");
            return Ok(ClockFix::AddSta { awac: awac.path.clone() });
        };

        let body = image.scope(sta.line, ScopeOptions::stripped());
        if body.contains("STAS") {
            tracing::info!(device = %awac.path, "_STA uses STAS variable");
            let root = awac.path.split('.').next().unwrap_or("\\").to_string();
            return Ok(ClockFix::SetStas { root });
        }

        tracing::info!(device = %awac.path, "generating _STA to XSTA patch");
        let patch = sta_rename_patch(image, sta, "AWAC _STA to XSTA Rename")?;
        Ok(ClockFix::WrapRenamedSta { awac: awac.path.clone(), patch })
    }

    fn build(
        &self,
        image: &FirmwareImage,
        options: &SynthesisOptions,
        awac: &ResolvedPath,
    ) -> Result<Fragment, SynthesisError> {
        let fix = Self::plan_clock_fix(image, awac)?;

        tracing::info!("locating PNP0B00 (RTC) devices");
        let rtc = image.devices_with_hid(RTC_HID);
        let bus = match rtc.first() {
            Some(existing) => {
                tracing::info!(device = %existing.path, "found RTC");
                None
            }
            None => {
                tracing::info!("no RTC found; a fake one is needed");
                let bus = locate_bus(image, options).ok_or_else(|| {
                    SynthesisError::Lookup("LPC bus device (LPCB/LPC0/LPC/SBRG/PX40)".into())
                })?;
                Some(bus)
            }
        };

        let mut ssdt = SsdtBuilder::new("AWAC", 0)
            .comment("Disables the AWAC clock for macOS and exposes a legacy RTC when missing.");
        let mut patches = Vec::new();
        match fix {
            ClockFix::SetStas { root } => {
                ssdt.external("STAS", ExternalKind::Int);
                ssdt.template(&Template::new(STAS_INIT).slot("root", root))?;
            }
            ClockFix::WrapRenamedSta { awac, patch } => {
                ssdt.external(&awac, ExternalKind::Device);
                ssdt.external(format!("{awac}.XSTA"), ExternalKind::Method);
                ssdt.template(&Template::new(STA_VIA_XSTA).slot("awac", awac))?;
                patches.push(patch);
            }
            ClockFix::AddSta { awac } => {
                ssdt.external(&awac, ExternalKind::Device);
                ssdt.template(&Template::new(STA_FIXED).slot("awac", awac))?;
            }
        }
        if let Some(bus) = bus {
            ssdt.external(&bus, ExternalKind::Device);
            ssdt.template(&Template::new(FAKE_RTC).slot("bus", bus))?;
        }

        Ok(Fragment::new(self.name(), ssdt.build()).with_patches(patches))
    }
}

/// Build a unique `_STA` -> `XSTA` rename for the method declared at `sta`.
///
/// The method's bytes are taken from the first hex run after its declaration.
pub fn sta_rename_patch(
    image: &FirmwareImage,
    sta: &ResolvedPath,
    comment: &str,
) -> Result<PatchSpec, PadError> {
    let hex = image.hex();
    let run = hex
        .find_next_hex(sta.line)
        .ok_or_else(|| PadError::Exhausted { needle: STA_HEX.to_string() })?;
    tracing::debug!(line = run.start, "found _STA bytes");
    let pad = hex.shortest_unique_pad(STA_HEX, run.start, 0)?;
    Ok(PatchSpec::new(comment, pad.wrap(STA_HEX), pad.wrap(XSTA_HEX)))
}

impl FragmentSynthesizer for AwacSynthesizer {
    fn name(&self) -> &'static str {
        "SSDT-AWAC"
    }

    fn description(&self) -> &'static str {
        "Disables AWAC (ACPI000E) for macOS and fakes an RTC (PNP0B00) when absent"
    }

    fn synthesize(&self, image: &FirmwareImage, options: &SynthesisOptions) -> Outcome {
        tracing::info!("locating ACPI000E (AWAC) devices");
        let devices = image.devices_with_hid(AWAC_HID);
        let Some(awac) = devices.first() else {
            return Outcome::not_applicable("no ACPI000E device; SSDT-AWAC not needed");
        };
        tracing::info!(device = %awac.path, "found AWAC");
        self.build(image, options, awac).into()
    }
}
