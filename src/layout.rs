//! Source tree scanning and file collection.
//!
//! Resolves a validated manifest's `packages` entries to directories under
//! the source root, collects each package's module files, and expands its
//! `package_data` globs. The result is the flat, sorted file list the
//! packaging drivers archive.

use crate::manifest::schema::CheckedManifest;
use crate::manifest::validation::package_dir;
use camino::{Utf8Path, Utf8PathBuf};
use globset::{Glob, GlobSet, GlobSetBuilder};
use log::trace;
use std::collections::BTreeMap;
use thiserror::Error;

/// One file selected for archiving.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageFile {
    /// Absolute path of the file on disk.
    pub source: Utf8PathBuf,
    /// Forward-slash relative path the file takes inside the archive.
    pub archive_path: String,
}

/// The flat file list a driver archives, sorted by archive path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceLayout {
    files: Vec<PackageFile>,
}

impl SourceLayout {
    /// Return the files in archive-path order.
    #[must_use]
    pub fn files(&self) -> &[PackageFile] {
        &self.files
    }
}

/// Errors arising from source tree scanning.
#[derive(Debug, Error)]
pub enum LayoutError {
    /// I/O error while walking the source tree.
    #[error("scan I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A `package_data` glob pattern does not compile.
    #[error("invalid package_data pattern \"{pattern}\" for package \"{package}\": {reason}")]
    Pattern {
        /// The package the pattern belongs to.
        package: String,
        /// The offending pattern.
        pattern: String,
        /// Description of the glob compile failure.
        reason: String,
    },

}

/// Scan the source tree and collect the archive file list.
///
/// Each declared package contributes the `*.py` files directly inside its
/// directory plus every file matching one of its `package_data` globs
/// (matched relative to the package directory, recursively). `__pycache__`
/// directories are never descended into. Files selected twice are archived
/// once.
///
/// Validation has already established that every package directory exists;
/// a directory vanishing between validation and scan surfaces as
/// [`LayoutError::Io`].
///
/// # Errors
///
/// Returns [`LayoutError::Io`] on filesystem failures (including
/// non-UTF-8 entry names) and [`LayoutError::Pattern`] for an
/// uncompilable glob.
pub fn scan(source_root: &Utf8Path, manifest: &CheckedManifest) -> Result<SourceLayout, LayoutError> {
    let mut selected: BTreeMap<String, Utf8PathBuf> = BTreeMap::new();

    for package in &manifest.packages {
        let dir = package_dir(source_root, package);
        let prefix = package.replace('.', "/");

        for entry in dir.read_dir_utf8()? {
            let entry = entry?;
            if entry.file_type()?.is_file() && entry.file_name().ends_with(".py") {
                let archive_path = format!("{prefix}/{}", entry.file_name());
                selected.insert(archive_path, entry.path().to_path_buf());
            }
        }

        if let Some(patterns) = manifest.package_data.get(package) {
            let globs = compile_globs(package, patterns)?;
            collect_data_files(&dir, &dir, &prefix, &globs, &mut selected)?;
        }
    }

    trace!("scan selected {} file(s)", selected.len());
    let files = selected
        .into_iter()
        .map(|(archive_path, source)| PackageFile {
            source,
            archive_path,
        })
        .collect();
    Ok(SourceLayout { files })
}

/// Compile one package's `package_data` patterns into a glob set.
fn compile_globs(package: &str, patterns: &[String]) -> Result<GlobSet, LayoutError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|e| LayoutError::Pattern {
            package: package.to_owned(),
            pattern: pattern.clone(),
            reason: e.to_string(),
        })?;
        builder.add(glob);
    }
    builder.build().map_err(|e| LayoutError::Pattern {
        package: package.to_owned(),
        pattern: patterns.join(", "),
        reason: e.to_string(),
    })
}

/// Recursively collect files under `dir` whose path relative to
/// `package_root` matches the glob set.
fn collect_data_files(
    package_root: &Utf8Path,
    dir: &Utf8Path,
    prefix: &str,
    globs: &GlobSet,
    selected: &mut BTreeMap<String, Utf8PathBuf>,
) -> Result<(), LayoutError> {
    for entry in dir.read_dir_utf8()? {
        let entry = entry?;
        let file_type = entry.file_type()?;
        if file_type.is_dir() {
            if entry.file_name() != "__pycache__" {
                collect_data_files(package_root, entry.path(), prefix, globs, selected)?;
            }
            continue;
        }
        if !file_type.is_file() {
            continue;
        }
        // Entries are enumerated under package_root, so the prefix holds.
        let Ok(relative) = entry.path().strip_prefix(package_root) else {
            continue;
        };
        if globs.is_match(relative.as_std_path()) {
            let archive_path = format!("{prefix}/{}", relative.as_str().replace('\\', "/"));
            selected.insert(archive_path, entry.path().to_path_buf());
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "layout_tests.rs"]
mod tests;
