use crate::dsl::FirmwareImage;
use crate::error::SynthesisError;
use crate::model::{Fragment, Outcome};
use crate::services::synthesizers::{FragmentSynthesizer, SynthesisOptions};
use crate::services::template::{ExternalKind, SsdtBuilder, Template};

const PLUGIN_DSM: &str = r#"Scope ({{cpu}})
{
    If (_OSI ("Darwin"))
    {
        Method (_DSM, 4, NotSerialized)  // _DSM: Device-Specific Method
        {
            If (!Arg2)
            {
                Return (Buffer (One)
                {
                     0x03
                })
            }

            Return (Package (0x02)
            {
                "plugin-type",
                One
            })
        }
    }
}"#;

/// Sets `plugin-type` on the first processor so XCPM power management loads.
pub struct PluginTypeSynthesizer;

impl PluginTypeSynthesizer {
    fn build(&self, cpu: &str) -> Result<Fragment, SynthesisError> {
        let mut ssdt = SsdtBuilder::new("CpuPlug", 0x0000_3000)
            .comment("Adds plugin-type to the first processor object for macOS power management.");
        ssdt.external(cpu, ExternalKind::Processor);
        ssdt.template(&Template::new(PLUGIN_DSM).slot("cpu", cpu))?;
        Ok(Fragment::new(self.name(), ssdt.build()))
    }
}

impl FragmentSynthesizer for PluginTypeSynthesizer {
    fn name(&self) -> &'static str {
        "SSDT-PLUG"
    }

    fn description(&self) -> &'static str {
        "plugin-type _DSM on the first Processor object"
    }

    fn synthesize(&self, image: &FirmwareImage, _options: &SynthesisOptions) -> Outcome {
        tracing::info!("determining CPU name scheme");
        let processors = image.paths().processors();
        let Some(cpu) = processors.first() else {
            return Outcome::not_applicable("no Processor object found");
        };
        tracing::info!(cpu = %cpu.path, "found processor");
        self.build(&cpu.path).into()
    }
}
