//! Error types for manifest field validation.
//!
//! Each variant provides a descriptive message identifying the invalid input
//! and the constraint that was violated.

use thiserror::Error;

/// Errors arising from invalid manifest field values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    /// A distribution name is empty or contains characters outside the
    /// permitted set.
    #[error("invalid package name \"{value}\": {reason}")]
    InvalidPackageName {
        /// The rejected name string.
        value: String,
        /// Description of the validation failure.
        reason: String,
    },

    /// A version string is empty or not semantic-version-like.
    #[error("invalid version \"{value}\": {reason}")]
    InvalidVersion {
        /// The rejected version string.
        value: String,
        /// Description of the validation failure.
        reason: String,
    },

    /// A dependency specifier is empty or names no package.
    #[error("invalid dependency specifier \"{value}\": {reason}")]
    InvalidRequirement {
        /// The rejected specifier string.
        value: String,
        /// Description of the validation failure.
        reason: String,
    },

    /// An entry point is not of the form `name = module:attr`.
    #[error("invalid entry point \"{value}\": {reason}")]
    InvalidEntryPoint {
        /// The rejected entry point string.
        value: String,
        /// Description of the validation failure.
        reason: String,
    },
}

/// Result type alias using [`FieldError`].
pub type Result<T> = std::result::Result<T, FieldError>;
