//! Binary wheel driver.
//!
//! Writes `{name}-{version}-py3-none-any.whl`: a zip holding the scanned
//! package files plus a `{name}-{version}.dist-info/` directory with the
//! `METADATA` record, a `WHEEL` file, `entry_points.txt` when entry points
//! are declared, and a `RECORD` listing every archived file with its
//! SHA-256 digest and size. Entries are written in sorted order with a
//! fixed timestamp, so an unchanged tree always produces a byte-identical
//! archive.

use crate::digest::Sha256Digest;
use crate::driver::{ArchiveFormat, BuiltArchive, DriverError, PackagingDriver, commit_archive};
use crate::layout::SourceLayout;
use crate::manifest::schema::CheckedManifest;
use crate::metadata::{render_entry_points, render_metadata};
use camino::Utf8Path;
use log::debug;
use std::fs;
use std::io::Write;
use zip::write::SimpleFileOptions;

/// The tag portion of the wheel filename: pure-Python, any platform.
const WHEEL_TAG: &str = "py3-none-any";

/// The binary wheel driver.
#[derive(Debug, Default)]
pub struct WheelDriver;

impl PackagingDriver for WheelDriver {
    fn format(&self) -> ArchiveFormat {
        ArchiveFormat::Wheel
    }

    fn produce(
        &self,
        manifest: &CheckedManifest,
        layout: &SourceLayout,
        output_dir: &Utf8Path,
    ) -> Result<BuiltArchive, DriverError> {
        let stem = manifest.distribution_stem();
        let archive_path = output_dir.join(format!("{stem}-{WHEEL_TAG}.whl"));
        debug!("writing wheel to {archive_path}");

        commit_archive(&archive_path, |staging| {
            let mut writer = zip::ZipWriter::new(fs::File::create(staging)?);
            let options = SimpleFileOptions::default()
                .compression_method(zip::CompressionMethod::Deflated)
                .last_modified_time(zip::DateTime::default())
                .unix_permissions(0o644);

            let mut record = Vec::new();
            for file in layout.files() {
                let contents = fs::read(&file.source)?;
                writer.start_file(file.archive_path.as_str(), options)?;
                writer.write_all(&contents)?;
                record.push(record_line(&file.archive_path, &contents));
            }

            let dist_info = format!("{stem}.dist-info");
            let mut info_files = vec![
                (format!("{dist_info}/METADATA"), render_metadata(manifest)),
                (format!("{dist_info}/WHEEL"), render_wheel_file()),
            ];
            if let Some(entry_points) = render_entry_points(manifest) {
                info_files.push((format!("{dist_info}/entry_points.txt"), entry_points));
            }
            for (path, contents) in &info_files {
                writer.start_file(path.as_str(), options)?;
                writer.write_all(contents.as_bytes())?;
                record.push(record_line(path, contents.as_bytes()));
            }

            record.push(format!("{dist_info}/RECORD,,"));
            writer.start_file(format!("{dist_info}/RECORD"), options)?;
            writer.write_all(record.join("\n").as_bytes())?;
            writer.write_all(b"\n")?;

            writer.finish()?;
            Ok(())
        })?;

        Ok(BuiltArchive {
            path: archive_path,
            format: ArchiveFormat::Wheel,
        })
    }
}

/// Render the `WHEEL` metadata file.
fn render_wheel_file() -> String {
    format!(
        "Wheel-Version: 1.0\nGenerator: baler {}\nRoot-Is-Purelib: true\nTag: {WHEEL_TAG}\n",
        env!("CARGO_PKG_VERSION"),
    )
}

/// Render one `RECORD` line: path, hex digest, size.
fn record_line(path: &str, contents: &[u8]) -> String {
    format!(
        "{path},sha256={},{}",
        Sha256Digest::of_bytes(contents),
        contents.len()
    )
}

#[cfg(test)]
#[path = "wheel_tests.rs"]
mod tests;
