//! Error types for the baler build pipeline.
//!
//! This module defines the two user-facing error kinds the tool reports:
//! validation failures (the manifest is rejected before any driver runs) and
//! driver failures (archive production broke; the driver's diagnostic is
//! surfaced unchanged).

use crate::driver::DriverError;
use crate::layout::LayoutError;
use crate::manifest::validation::ValidationReport;
use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur while building a distribution.
#[derive(Debug, Error)]
pub enum BalerError {
    /// The manifest file could not be read.
    #[error("cannot read manifest at {path}")]
    ManifestRead {
        /// Path to the manifest file.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The manifest file is not well-formed TOML or has a mistyped field.
    #[error("invalid manifest at {path}: {reason}")]
    ManifestParse {
        /// Path to the manifest file.
        path: Utf8PathBuf,
        /// Description of the parse error.
        reason: String,
    },

    /// The manifest was rejected before any driver ran.
    #[error("manifest validation failed with {} violation(s)", report.violations().len())]
    Validation {
        /// The full set of violations found.
        report: ValidationReport,
    },

    /// Scanning the source tree for archive files failed.
    #[error("source scan failed: {0}")]
    Scan(#[from] LayoutError),

    /// Archive production failed; the driver's diagnostic passes through
    /// unchanged.
    #[error(transparent)]
    Driver(#[from] DriverError),

    /// An I/O operation outside any driver failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to write command output.
    #[error("failed to write output")]
    WriteFailed {
        /// The underlying error that caused the write to fail.
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias using [`BalerError`].
pub type Result<T> = std::result::Result<T, BalerError>;
