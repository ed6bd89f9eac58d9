use smith_core::error::TemplateError;
use smith_core::services::{ExternalKind, SsdtBuilder, Template};

#[test]
fn slots_are_filled_in_one_pass() {
    let rendered = Template::new("Scope ({{bus}}) { Device ({{name}}) }")
        .slot("bus", "\\_SB.{{name}}")
        .slot("name", "PMCR")
        .render()
        .unwrap();
    assert_eq!(rendered, "Scope (\\_SB.{{name}}) { Device (PMCR) }");
}

#[test]
fn missing_and_unterminated_slots_are_errors() {
    assert_eq!(
        Template::new("Scope ({{bus}})").render(),
        Err(TemplateError::MissingSlot("bus".into()))
    );
    assert_eq!(
        Template::new("Scope ({{bus)").slot("bus", "X").render(),
        Err(TemplateError::UnterminatedSlot)
    );
}

#[test]
fn builder_emits_header_externals_and_indented_blocks() {
    let mut ssdt = SsdtBuilder::new("Test", 0x1000).comment("Example fragment.");
    ssdt.external("\\_SB.PCI0.LPCB", ExternalKind::Device)
        .external("\\_SB.PCI0.LPCB", ExternalKind::Device)
        .external("STAS", ExternalKind::Int);
    ssdt.block("Scope (\\_SB)\n{\n\n    Name (FOO, One)\n}");

    let expected = "//\n\
// Example fragment.\n\
//\n\
DefinitionBlock (\"\", \"SSDT\", 2, \"CORP\", \"Test\", 0x00001000)\n\
{\n    External (\\_SB.PCI0.LPCB, DeviceObj)\n    External (STAS, IntObj)\n\
\n    Scope (\\_SB)\n    {\n\n        Name (FOO, One)\n    }\n\
}\n";
    assert_eq!(ssdt.build(), expected);
}
