//! Build orchestration.
//!
//! Ties the stages together: validate the manifest against the source tree,
//! scan the layout, then hand off to one packaging driver per requested
//! format. Validation failures stop the run before any driver executes;
//! driver failures propagate unchanged.

use crate::driver::{ArchiveFormat, BuiltArchive, DriverError, PackagingDriver};
use crate::error::{BalerError, Result};
use crate::layout::{SourceLayout, scan};
use crate::manifest::schema::{CheckedManifest, Manifest};
use crate::manifest::validation::validate;
use crate::sdist::SdistDriver;
use crate::wheel::WheelDriver;
use camino::Utf8Path;
use log::debug;

/// Build the requested distribution archives for a manifest.
///
/// Runs the full pipeline: validation, source scan, then one driver per
/// entry in `formats`, creating `output_dir` if needed. Returns the built
/// archives in the order requested.
///
/// # Errors
///
/// Returns [`BalerError::Validation`] when the manifest is rejected (no
/// driver runs and no file is created), [`BalerError::Scan`] when the
/// source walk fails, and [`BalerError::Driver`] with the driver's own
/// diagnostic when archive production fails.
pub fn build(
    manifest: &Manifest,
    source_root: &Utf8Path,
    output_dir: &Utf8Path,
    formats: &[ArchiveFormat],
) -> Result<Vec<BuiltArchive>> {
    let checked = validate(manifest, source_root)
        .map_err(|report| BalerError::Validation { report })?;
    let layout = scan(source_root, &checked)?;
    std::fs::create_dir_all(output_dir)?;

    let drivers: Vec<Box<dyn PackagingDriver>> = formats.iter().map(|f| driver_for(*f)).collect();
    let borrowed: Vec<&dyn PackagingDriver> = drivers.iter().map(AsRef::as_ref).collect();
    Ok(run_drivers(&checked, &layout, output_dir, &borrowed)?)
}

/// Run each driver in turn against an already-validated manifest.
///
/// Split out from [`build`] so tests can exercise the orchestration with
/// mocked drivers.
///
/// # Errors
///
/// Returns the first failing driver's error unchanged.
pub fn run_drivers(
    manifest: &CheckedManifest,
    layout: &SourceLayout,
    output_dir: &Utf8Path,
    drivers: &[&dyn PackagingDriver],
) -> std::result::Result<Vec<BuiltArchive>, DriverError> {
    let mut built = Vec::with_capacity(drivers.len());
    for driver in drivers {
        debug!("producing {} for {}", driver.format(), manifest.name);
        built.push(driver.produce(manifest, layout, output_dir)?);
    }
    Ok(built)
}

/// Map a format selection to its driver.
fn driver_for(format: ArchiveFormat) -> Box<dyn PackagingDriver> {
    match format {
        ArchiveFormat::Sdist => Box::new(SdistDriver),
        ArchiveFormat::Wheel => Box::new(WheelDriver),
    }
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
