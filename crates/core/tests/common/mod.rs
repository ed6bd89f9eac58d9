#![allow(dead_code)]

use smith_core::dsl::FirmwareImage;

/// Build an image whose raw table is the listing's own hex payload.
pub fn image(listing: &str) -> FirmwareImage {
    FirmwareImage::from_listing(listing).expect("fixture hex is valid")
}

/// Index of the first line containing `needle`.
pub fn line_of(image: &FirmwareImage, needle: &str) -> usize {
    image
        .lines()
        .iter()
        .position(|l| l.contains(needle))
        .unwrap_or_else(|| panic!("fixture has no line containing {needle:?}"))
}

/// A genuine EC (without `_STA`) under LPCB, plus one processor.
pub const EC_LISTING: &str = r#"DefinitionBlock ("", "DSDT", 2, "ALASKA", "A M I", 0x01072009)
{
    Scope (_PR)
    {
        Processor (CPU0, 0x01, 0x00001810, 0x06)
        {
        }
    }

    Scope (_SB)
    {
        Device (PCI0)
        {
            Device (LPCB)
            {
                Name (_ADR, 0x001F0000)  // _ADR: Address
                Device (EC0)
                {
                    Name (_HID, EisaId ("PNP0C09"))  // _HID: Hardware ID
                    Name (_GPE, 0x6E)  // _GPE: General Purpose Events
                    Name (_CRS, ResourceTemplate ()  // _CRS: Current Resource Settings
                    {
                        IO (Decode16,
                            0x0062,             // Range Minimum
                            0x0062,             // Range Maximum
                            0x00,               // Alignment
                            0x01,               // Length
                            )
                    })
                }
            }
        }
    }
}
"#;

/// An LPCB bus with no EC and no processor.
pub const BARE_LPC_LISTING: &str = r#"DefinitionBlock ("", "DSDT", 2, "ALASKA", "A M I", 0x01072009)
{
    Scope (_SB)
    {
        Device (PCI0)
        {
            Device (LPCB)
            {
                Name (_ADR, 0x001F0000)  // _ADR: Address
            }
        }
    }
}
"#;

/// No LPC-class bus at all.
pub const NO_BUS_LISTING: &str = r#"DefinitionBlock ("", "DSDT", 2, "ALASKA", "A M I", 0x01072009)
{
    Scope (_SB)
    {
        Device (PCI0)
        {
            Name (_ADR, Zero)  // _ADR: Address
        }
    }
}
"#;

/// AWAC clock with a plain `_STA`, and an HPET whose `_STA` has identical bytes.
pub const AWAC_LISTING: &str = r#"DefinitionBlock ("", "DSDT", 2, "ALASKA", "A M I", 0x01072009)
{
    Scope (_SB)
    {
        Device (PCI0)
        {
    00000024: 5B 82 40 05 50 43 49 30  // [.@.PCI0
            Device (LPCB)
            {
    0000002C: 5B 82 10 4C 50 43 42  // [..LPCB
                Name (_ADR, 0x001F0000)  // _ADR: Address
    00000033: 08 5F 41 44 52 0C 00 00 1F 00  // ._ADR.....
            }
        }

        Device (AWAC)
        {
    0000003D: 5B 82 1E 41 57 41 43  // [..AWAC
            Name (_HID, "ACPI000E")  // _HID: Hardware ID
    00000044: 08 5F 48 49 44 0D 41 43 50 49 30 30 30 45 00  // ._HID.ACPI000E.
            Method (_STA, 0, NotSerialized)  // _STA: Status
    00000053: 14 09 5F 53 54 41 00 A4 0A 0F  // .._STA....
            {
                Return (0x0F)
            }
        }

        Device (HPET)
        {
    0000005D: 5B 82 10 48 50 45 54  // [..HPET
            Method (_STA, 0, NotSerialized)  // _STA: Status
    00000064: 14 09 5F 53 54 41 00 A4 0A 0F  // .._STA....
            {
                Return (0x0F)
            }
        }
    }
}
"#;

/// AWAC whose `_STA` reads `STAS`, next to an existing RTC.
pub const AWAC_STAS_LISTING: &str = r#"DefinitionBlock ("", "DSDT", 2, "ALASKA", "A M I", 0x01072009)
{
    Name (STAS, One)
    Scope (_SB)
    {
        Device (PCI0)
        {
            Device (LPCB)
            {
                Device (RTC)
                {
                    Name (_HID, EisaId ("PNP0B00"))  // _HID: Hardware ID
                }
            }
        }

        Device (AWAC)
        {
            Name (_HID, "ACPI000E")  // _HID: Hardware ID
            Method (_STA, 0, NotSerialized)  // _STA: Status
            {
                If ((STAS == Zero))
                {
                    Return (0x0F)
                }

                Return (Zero)
            }
        }
    }
}
"#;

/// AWAC without any status method.
pub const AWAC_NO_STA_LISTING: &str = r#"DefinitionBlock ("", "DSDT", 2, "ALASKA", "A M I", 0x01072009)
{
    Scope (_SB)
    {
        Device (PCI0)
        {
            Device (LPCB)
            {
                Device (RTC)
                {
                    Name (_HID, EisaId ("PNP0B00"))  // _HID: Hardware ID
                }
            }
        }

        Device (AWAC)
        {
            Name (_HID, "ACPI000E")  // _HID: Hardware ID
        }
    }
}
"#;

/// AWAC whose `_STA` was already renamed to `XSTA`.
pub const AWAC_XSTA_LISTING: &str = r#"DefinitionBlock ("", "DSDT", 2, "ALASKA", "A M I", 0x01072009)
{
    Scope (_SB)
    {
        Device (AWAC)
        {
            Name (_HID, "ACPI000E")  // _HID: Hardware ID
            Method (XSTA, 0, NotSerialized)
            {
                Return (0x0F)
            }
        }
    }
}
"#;

/// Two root hubs under controllers named `XHC1`, and one under a legal `XHC`.
pub const USB_LISTING: &str = r#"DefinitionBlock ("", "DSDT", 2, "ALASKA", "A M I", 0x01072009)
{
    Scope (_SB)
    {
        Device (PCI0)
        {
            Device (XHC1)
            {
                Name (_ADR, 0x00140000)  // _ADR: Address
                Device (RHUB)
                {
                }
            }

            Device (PEG0)
            {
                Device (XHC1)
                {
                    Device (RHUB)
                    {
                    }
                }
            }

            Device (XHC)
            {
                Device (RHUB)
                {
                }
            }
        }
    }
}
"#;
