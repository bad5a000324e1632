//! Version string newtype for the manifest.
//!
//! Validates that the version is semantic-version-like: a dotted numeric
//! release segment optionally followed by a pre-release, post-release, or
//! dev suffix (e.g. `1.2`, `0.1.0`, `2.0.0rc1`, `1.0.post3`, `0.3.dev4`).
//! The grammar is deliberately permissive; ordering semantics are the
//! consuming index's concern, not this tool's.

use super::error::{FieldError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A validated, semantic-version-like version string.
///
/// # Examples
///
/// ```
/// use baler::manifest::version_spec::VersionSpec;
///
/// let version: VersionSpec = "0.1.0".try_into().expect("valid version");
/// assert_eq!(version.as_str(), "0.1.0");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VersionSpec(String);

/// Check that a character may appear after the leading digit.
fn is_valid_version_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_' | '+' | '!')
}

impl VersionSpec {
    /// Return the version as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper and return the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Validate that `value` is a well-formed version string.
fn validate_version(value: &str) -> Result<()> {
    let Some(first) = value.chars().next() else {
        return Err(FieldError::InvalidVersion {
            value: value.to_owned(),
            reason: "version must not be empty".to_owned(),
        });
    };
    if !first.is_ascii_digit() {
        return Err(FieldError::InvalidVersion {
            value: value.to_owned(),
            reason: "version must start with a digit".to_owned(),
        });
    }
    if let Some(bad) = value.chars().find(|c| !is_valid_version_char(*c)) {
        return Err(FieldError::InvalidVersion {
            value: value.to_owned(),
            reason: format!("invalid character '{bad}'"),
        });
    }
    if value.ends_with('.') {
        return Err(FieldError::InvalidVersion {
            value: value.to_owned(),
            reason: "version must not end with '.'".to_owned(),
        });
    }
    Ok(())
}

impl TryFrom<&str> for VersionSpec {
    type Error = FieldError;

    fn try_from(value: &str) -> Result<Self> {
        validate_version(value)?;
        Ok(Self(value.to_owned()))
    }
}

impl TryFrom<String> for VersionSpec {
    type Error = FieldError;

    fn try_from(value: String) -> Result<Self> {
        validate_version(&value)?;
        Ok(Self(value))
    }
}

impl From<VersionSpec> for String {
    fn from(version: VersionSpec) -> Self {
        version.0
    }
}

impl AsRef<str> for VersionSpec {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VersionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
