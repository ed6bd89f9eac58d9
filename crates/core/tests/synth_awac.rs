mod common;

use common::{image, AWAC_LISTING, AWAC_NO_STA_LISTING, AWAC_STAS_LISTING, AWAC_XSTA_LISTING, EC_LISTING};
use smith_core::dsl::hex::count_occurrences;
use smith_core::error::SynthesisError;
use smith_core::model::Outcome;
use smith_core::services::synthesizers::awac::ClockFix;
use smith_core::services::synthesizers::AwacSynthesizer;
use smith_core::services::{FragmentSynthesizer, SynthesisOptions};

#[test]
fn plain_sta_is_renamed_and_wrapped() {
    let image = image(AWAC_LISTING);
    let outcome = AwacSynthesizer.synthesize(&image, &SynthesisOptions::default());
    let fragment = outcome.fragment().expect("fragment generated");

    assert_eq!(fragment.name, "SSDT-AWAC");
    assert_eq!(fragment.patches.len(), 1);
    let patch = &fragment.patches[0];
    assert_eq!(patch.comment, "AWAC _STA to XSTA Rename");
    assert_eq!(patch.find, "0014095F535441");
    assert_eq!(patch.replace, "00140958535441");
    assert_eq!(patch.find.len(), patch.replace.len());

    let find = patch.find_bytes().unwrap();
    assert_eq!(count_occurrences(image.raw(), &find, 2), 1);

    let text = &fragment.source;
    assert!(text.contains("External (\\_SB.AWAC, DeviceObj)"));
    assert!(text.contains("External (\\_SB.AWAC.XSTA, MethodObj)"));
    assert!(text.contains("CondRefOf (\\_SB.AWAC.XSTA)"));
    // No PNP0B00 device, so a legacy RTC is added on the LPC bus.
    assert!(text.contains("Scope (\\_SB.PCI0.LPCB)"));
    assert!(text.contains("Device (RTC0)"));
}

#[test]
fn stas_variable_only_needs_an_initializer() {
    let image = image(AWAC_STAS_LISTING);
    let awac = image.devices_with_hid("ACPI000E").remove(0);
    assert_eq!(
        AwacSynthesizer::plan_clock_fix(&image, &awac).unwrap(),
        ClockFix::SetStas { root: "\\_SB".into() }
    );

    let outcome = AwacSynthesizer.synthesize(&image, &SynthesisOptions::default());
    let fragment = outcome.fragment().unwrap();
    assert!(fragment.patches.is_empty());
    assert!(fragment.source.contains("External (STAS, IntObj)"));
    assert!(fragment.source.contains("STAS = One"));
    // An RTC already exists.
    assert!(!fragment.source.contains("RTC0"));
}

#[test]
fn missing_sta_gets_a_fixed_one() {
    let image = image(AWAC_NO_STA_LISTING);
    let awac = image.devices_with_hid("ACPI000E").remove(0);
    assert_eq!(
        AwacSynthesizer::plan_clock_fix(&image, &awac).unwrap(),
        ClockFix::AddSta { awac: "\\_SB.AWAC".into() }
    );

    let outcome = AwacSynthesizer.synthesize(&image, &SynthesisOptions::default());
    let fragment = outcome.fragment().unwrap();
    assert!(fragment.patches.is_empty());
    assert!(fragment.source.contains("Scope (\\_SB.AWAC)"));
    assert!(!fragment.source.contains("XSTA"));
}

#[test]
fn already_renamed_sta_aborts() {
    let image = image(AWAC_XSTA_LISTING);
    let outcome = AwacSynthesizer.synthesize(&image, &SynthesisOptions::default());
    assert!(matches!(outcome, Outcome::Failed(SynthesisError::AlreadyPatched(_))));
}

#[test]
fn no_awac_device_is_not_applicable() {
    let image = image(EC_LISTING);
    let outcome = AwacSynthesizer.synthesize(&image, &SynthesisOptions::default());
    assert!(matches!(outcome, Outcome::NotApplicable(_)));
}
