//! Source distribution driver.
//!
//! Writes `{name}-{version}.tar.gz`: a gzip-compressed tarball whose root
//! directory is `{name}-{version}/`, containing the rendered `PKG-INFO`
//! core-metadata record followed by every file the scan selected. Entries
//! are written in sorted order with epoch timestamps, so an unchanged tree
//! always produces a byte-identical archive.

use crate::driver::{
    ArchiveFormat, BuiltArchive, DriverError, FIXED_MTIME, PackagingDriver, commit_archive,
};
use crate::layout::SourceLayout;
use crate::manifest::schema::CheckedManifest;
use crate::metadata::render_metadata;
use camino::Utf8Path;
use flate2::Compression;
use flate2::write::GzEncoder;
use log::debug;
use std::fs;
use std::io::Write;

/// The source distribution driver.
#[derive(Debug, Default)]
pub struct SdistDriver;

impl PackagingDriver for SdistDriver {
    fn format(&self) -> ArchiveFormat {
        ArchiveFormat::Sdist
    }

    fn produce(
        &self,
        manifest: &CheckedManifest,
        layout: &SourceLayout,
        output_dir: &Utf8Path,
    ) -> Result<BuiltArchive, DriverError> {
        let stem = manifest.distribution_stem();
        let archive_path = output_dir.join(format!("{stem}.tar.gz"));
        debug!("writing sdist to {archive_path}");

        commit_archive(&archive_path, |staging| {
            let encoder = GzEncoder::new(fs::File::create(staging)?, Compression::default());
            let mut builder = tar::Builder::new(encoder);

            append_entry(
                &mut builder,
                &format!("{stem}/PKG-INFO"),
                render_metadata(manifest).as_bytes(),
            )?;
            for file in layout.files() {
                let contents = fs::read(&file.source)?;
                append_entry(&mut builder, &format!("{stem}/{}", file.archive_path), &contents)?;
            }

            builder.into_inner()?.finish()?.flush()?;
            Ok(())
        })?;

        Ok(BuiltArchive {
            path: archive_path,
            format: ArchiveFormat::Sdist,
        })
    }
}

/// Append one entry with the deterministic header fields.
fn append_entry<W: Write>(
    builder: &mut tar::Builder<W>,
    path: &str,
    contents: &[u8],
) -> Result<(), DriverError> {
    let mut header = tar::Header::new_gnu();
    header.set_size(contents.len() as u64);
    header.set_mode(0o644);
    header.set_mtime(FIXED_MTIME);
    header.set_uid(0);
    header.set_gid(0);
    builder.append_data(&mut header, path, contents)?;
    Ok(())
}

#[cfg(test)]
#[path = "sdist_tests.rs"]
mod tests;
