use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};

use smith_core::dsl::FirmwareImage;
use smith_core::services::IaslToolchain;

use crate::{sha256_bytes, sha256_file};

/// An indexed table plus where it came from.
pub struct LoadedImage {
    pub image: FirmwareImage,
    /// Binary table path, when one was given.
    pub input: Option<PathBuf>,
    /// Hash of the table file, or of the raw bytes rebuilt from the listing.
    pub input_sha256: String,
}

/// Load and index a DSDT.
///
/// With `dsl`, the listing is read directly; the raw table comes from `dsdt`
/// when given, otherwise it is rebuilt from the listing's hex lines. With only
/// `dsdt`, the table is disassembled by `iasl` in a scratch directory.
pub fn load_image(
    dsdt: Option<&Path>,
    dsl: Option<&Path>,
    iasl: &IaslToolchain,
) -> Result<LoadedImage> {
    let table_sha256 = dsdt.map(sha256_file).transpose()?;

    let image = match (dsdt, dsl) {
        (_, Some(dsl)) => {
            let listing = fs::read_to_string(dsl)
                .with_context(|| format!("Failed to read listing at {}", dsl.display()))?;
            match dsdt {
                Some(dsdt) => FirmwareImage::parse(&listing, read_table(dsdt)?),
                None => FirmwareImage::from_listing(&listing).with_context(|| {
                    format!("Listing {} contains malformed hex payload", dsl.display())
                })?,
            }
        }
        (Some(dsdt), None) => {
            let scratch = tempfile::tempdir().context("Failed to create scratch directory")?;
            let listing_path = iasl
                .disassemble(dsdt, scratch.path())
                .with_context(|| format!("Failed to disassemble {}", dsdt.display()))?;
            let listing = fs::read_to_string(&listing_path).with_context(|| {
                format!("Failed to read listing at {}", listing_path.display())
            })?;
            FirmwareImage::parse(&listing, read_table(dsdt)?)
        }
        (None, None) => return Err(anyhow!("Either --dsdt or --dsl is required")),
    };

    for warning in image.warnings() {
        tracing::warn!(%warning, "listing warning");
    }

    let input_sha256 = table_sha256.unwrap_or_else(|| sha256_bytes(image.raw()));
    Ok(LoadedImage { image, input: dsdt.map(Path::to_path_buf), input_sha256 })
}

fn read_table(path: &Path) -> Result<Vec<u8>> {
    if !path.exists() {
        return Err(anyhow!("Table file does not exist: {}", path.display()));
    }
    fs::read(path).with_context(|| format!("Failed to read table at {}", path.display()))
}
