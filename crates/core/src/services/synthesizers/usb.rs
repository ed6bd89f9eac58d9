use crate::dsl::FirmwareImage;
use crate::error::SynthesisError;
use crate::index::PathIndex;
use crate::model::{last_segment, parent_path, Fragment, Outcome};
use crate::services::synthesizers::{FragmentSynthesizer, SynthesisOptions, DISABLE_ON_DARWIN};
use crate::services::template::{ExternalKind, SsdtBuilder, Template};

/// Root hub device names, gathered in this order.
pub const HUB_NAMES: [&str; 3] = ["RHUB", "HUBN", "URTH"];

/// Controller names macOS treats specially and that must be renamed.
pub const ILLEGAL_CONTROLLER_NAMES: [&str; 4] = ["XHC1", "EHC1", "EHC2", "PXSX"];

const DEFAULT_ADR: &str = "Name (_ADR, Zero)  // _ADR: Address";

const RENAMED_CONTROLLER: &str = r#"Scope ({{parent}})
{
    Device ({{name}})
    {
        {{address}}
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

/// What to do with one root hub.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HubTask {
    /// Object whose `_STA` gets overridden: the hub, or its controller when renamed.
    pub device: String,
    pub rename: Option<ControllerRename>,
}

/// A replacement controller fabricated next to the disabled original.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerRename {
    pub parent: String,
    pub new_name: String,
    /// `_ADR` declaration copied from the original controller.
    pub address: String,
}

/// Monotonic counters used to mint replacement controller names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameAllocator {
    xhc_next: u32,
    ehc_next: u32,
    used: Vec<String>,
}

impl Default for NameAllocator {
    fn default() -> Self {
        Self { xhc_next: 2, ehc_next: 1, used: Vec::new() }
    }
}

impl NameAllocator {
    pub fn is_used(&self, name: &str) -> bool {
        self.used.iter().any(|n| n == name)
    }

    pub fn mark_used(&mut self, name: impl Into<String>) {
        self.used.push(name.into());
    }

    /// Next free replacement for `old_name`: `EH0n` for EHCI controllers,
    /// `XHCn` otherwise, skipping names present in `paths` or already handed out.
    pub fn allocate(&mut self, paths: &PathIndex, old_name: &str) -> String {
        let (base, counter) = if old_name.starts_with("EHC") {
            ("EH01", &mut self.ehc_next)
        } else {
            ("XHCI", &mut self.xhc_next)
        };
        let mut number = *counter;
        let name = loop {
            let digits = format!("{number:X}");
            let keep = base.len().saturating_sub(digits.len());
            let candidate = format!("{}{}", &base[..keep], digits);
            if paths.devices(&candidate).is_empty() && !self.used.iter().any(|n| *n == candidate) {
                break candidate;
            }
            number += 1;
        };
        *counter = number + 1;
        self.used.push(name.clone());
        name
    }
}

/// Disables root hubs for macOS and renames controllers with reserved names.
pub struct UsbResetSynthesizer;

impl UsbResetSynthesizer {
    /// Plan one task per hub, allocating replacement names as needed.
    pub fn plan(image: &FirmwareImage) -> Vec<HubTask> {
        let paths = image.paths();
        let hubs: Vec<String> = HUB_NAMES
            .iter()
            .flat_map(|name| paths.devices(name))
            .map(|hub| hub.path.clone())
            .collect();

        let mut names = NameAllocator::default();
        let mut tasks = Vec::with_capacity(hubs.len());
        for hub in hubs {
            let controller = parent_path(&hub).to_string();
            let name = last_segment(&controller).to_string();
            tracing::info!(controller = %controller, "found USB root hub");

            if !ILLEGAL_CONTROLLER_NAMES.contains(&name.as_str()) && !names.is_used(&name) {
                names.mark_used(name);
                tasks.push(HubTask { device: hub, rename: None });
                continue;
            }

            let new_name = names.allocate(paths, &name);
            tracing::info!(
                controller = %controller,
                new_name = %new_name,
                "controller needs rename"
            );
            let address = paths
                .names(&format!("{controller}._ADR"))
                .first()
                .and_then(|adr| image.line(adr.line))
                .map(|line| line.trim().to_string())
                .unwrap_or_else(|| DEFAULT_ADR.to_string());
            tasks.push(HubTask {
                rename: Some(ControllerRename {
                    parent: parent_path(&controller).to_string(),
                    new_name,
                    address,
                }),
                device: controller,
            });
        }
        tasks
    }

    fn build(&self, tasks: &[HubTask]) -> Result<Fragment, SynthesisError> {
        let mut ssdt = SsdtBuilder::new("UsbReset", 0x0000_1000).comment(
            "Disables RHUB/HUBN/URTH devices and renames PXSX, XHC1, EHC1 and EHC2 controllers.",
        );

        let mut parents: Vec<&str> =
            tasks.iter().filter_map(|t| t.rename.as_ref().map(|r| r.parent.as_str())).collect();
        parents.sort_unstable();
        parents.dedup();
        for parent in parents {
            ssdt.external(parent, ExternalKind::Device);
        }
        for task in tasks {
            ssdt.external(&task.device, ExternalKind::Device);
        }

        for task in tasks {
            ssdt.template(&Template::new(DISABLE_ON_DARWIN).slot("device", &task.device))?;
            if let Some(rename) = &task.rename {
                ssdt.template(
                    &Template::new(RENAMED_CONTROLLER)
                        .slot("parent", &rename.parent)
                        .slot("name", &rename.new_name)
                        .slot("address", &rename.address),
                )?;
            }
        }

        Ok(Fragment::new(self.name(), ssdt.build()))
    }
}

impl FragmentSynthesizer for UsbResetSynthesizer {
    fn name(&self) -> &'static str {
        "SSDT-USB-Reset"
    }

    fn description(&self) -> &'static str {
        "Disables USB root hubs and renames reserved controller names"
    }

    fn synthesize(&self, image: &FirmwareImage, _options: &SynthesisOptions) -> Outcome {
        tracing::info!("gathering RHUB/HUBN/URTH devices");
        let tasks = Self::plan(image);
        if tasks.is_empty() {
            return Outcome::not_applicable("no RHUB/HUBN/URTH devices found");
        }
        self.build(&tasks).into()
    }
}
