//! Packaging driver seam and driver errors.
//!
//! A driver consumes a validated manifest plus the scanned source layout
//! and produces exactly one archive file. The trait exists so the build
//! orchestration can be exercised against a mocked driver without touching
//! the filesystem.

use crate::layout::SourceLayout;
use crate::manifest::schema::CheckedManifest;
use camino::{Utf8Path, Utf8PathBuf};
use std::fmt;
use thiserror::Error;

/// The archive formats a driver can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveFormat {
    /// Source distribution: a gzip-compressed tarball with a `PKG-INFO`
    /// record.
    Sdist,
    /// Binary wheel: a zip with a `*.dist-info/` metadata directory.
    Wheel,
}

impl fmt::Display for ArchiveFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sdist => write!(f, "sdist"),
            Self::Wheel => write!(f, "wheel"),
        }
    }
}

/// An archive a driver wrote to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltArchive {
    /// Path of the finished archive file.
    pub path: Utf8PathBuf,
    /// The format that was produced.
    pub format: ArchiveFormat,
}

/// Errors arising from archive production.
///
/// These pass through to the invoker unchanged; the pipeline never rewraps
/// or retries them.
#[derive(Debug, Error)]
pub enum DriverError {
    /// I/O error while writing the archive.
    #[error("archive I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The zip writer rejected an entry or failed to finalize.
    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
}

/// A packaging driver: consumes a manifest, emits one archive.
#[cfg_attr(test, mockall::automock)]
pub trait PackagingDriver {
    /// The format this driver produces.
    fn format(&self) -> ArchiveFormat;

    /// Write the archive for `manifest` under `output_dir`.
    ///
    /// An empty layout still produces an archive; it carries only the
    /// metadata records. The archive must appear atomically: drivers stage
    /// to a temporary name and rename into place, so a failure leaves no
    /// partial file.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::Io`] / [`DriverError::Zip`] on write
    /// failures.
    fn produce(
        &self,
        manifest: &CheckedManifest,
        layout: &SourceLayout,
        output_dir: &Utf8Path,
    ) -> Result<BuiltArchive, DriverError>;
}

/// Entry timestamp embedded in archives.
///
/// Pinned to the Unix epoch so that rebuilding an unchanged tree yields a
/// byte-identical archive.
pub(crate) const FIXED_MTIME: u64 = 0;

/// Run `write` against a staging path, then rename the result into place.
///
/// The staging file carries a `.tmp` suffix in the same directory, so the
/// rename cannot cross filesystems. On any failure the staging file is
/// removed before the error propagates.
pub(crate) fn commit_archive(
    final_path: &Utf8Path,
    write: impl FnOnce(&Utf8Path) -> Result<(), DriverError>,
) -> Result<(), DriverError> {
    let staging = Utf8PathBuf::from(format!("{final_path}.tmp"));
    match write(&staging).and_then(|()| {
        std::fs::rename(&staging, final_path)?;
        Ok(())
    }) {
        Ok(()) => Ok(()),
        Err(e) => {
            let _ = std::fs::remove_file(&staging);
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commit_renames_staging_into_place() {
        let dir = tempfile::TempDir::new().expect("temp dir creation succeeds");
        let final_path = Utf8PathBuf::from_path_buf(dir.path().join("out.tar.gz"))
            .expect("utf-8 temp path");
        commit_archive(&final_path, |staging| {
            std::fs::write(staging, b"payload")?;
            Ok(())
        })
        .expect("commit succeeds");
        assert_eq!(std::fs::read(&final_path).expect("read"), b"payload");
        assert!(!final_path.with_file_name("out.tar.gz.tmp").exists());
    }

    #[test]
    fn failed_write_leaves_no_file_behind() {
        let dir = tempfile::TempDir::new().expect("temp dir creation succeeds");
        let final_path = Utf8PathBuf::from_path_buf(dir.path().join("out.tar.gz"))
            .expect("utf-8 temp path");
        let result = commit_archive(&final_path, |staging| {
            std::fs::write(staging, b"partial")?;
            Err(DriverError::Io(std::io::Error::other("encoder broke")))
        });
        assert!(result.is_err());
        assert!(!final_path.exists());
        assert!(!final_path.with_file_name("out.tar.gz.tmp").exists());
    }
}
