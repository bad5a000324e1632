//! Dependency specifier newtype for the manifest.
//!
//! A requirement is a dependency specifier string such as `requests`,
//! `numpy >=1.16`, or `sqlalchemy[asyncio] >=1.4, <2`. Validation checks
//! that the specifier opens with a well-formed package name; the version
//! constraint grammar beyond that is passed through to the metadata record
//! untouched.

use super::error::{FieldError, Result};
use super::package_name::PackageName;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A validated dependency specifier.
///
/// # Examples
///
/// ```
/// use baler::manifest::requirement::Requirement;
///
/// let req: Requirement = "numpy >=1.16".try_into().expect("valid specifier");
/// assert_eq!(req.package(), "numpy");
/// assert_eq!(req.as_str(), "numpy >=1.16");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Requirement(String);

impl Requirement {
    /// Return the full specifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Return the leading package name, without extras or constraints.
    #[must_use]
    pub fn package(&self) -> &str {
        split_package(self.0.trim_start()).0
    }

    /// Consume the wrapper and return the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Split a specifier into its leading package name and the remainder.
fn split_package(value: &str) -> (&str, &str) {
    let end = value
        .find(|c: char| c.is_whitespace() || matches!(c, '[' | '<' | '>' | '=' | '!' | '~' | ';'))
        .unwrap_or(value.len());
    value.split_at(end)
}

/// Validate that `value` opens with a well-formed package name.
fn validate_requirement(value: &str) -> Result<()> {
    let (package, _) = split_package(value.trim_start());
    PackageName::try_from(package).map_err(|_| FieldError::InvalidRequirement {
        value: value.to_owned(),
        reason: if value.trim().is_empty() {
            "specifier must not be empty".to_owned()
        } else {
            format!("\"{package}\" is not a valid package name")
        },
    })?;
    Ok(())
}

impl TryFrom<&str> for Requirement {
    type Error = FieldError;

    fn try_from(value: &str) -> Result<Self> {
        validate_requirement(value)?;
        Ok(Self(value.to_owned()))
    }
}

impl TryFrom<String> for Requirement {
    type Error = FieldError;

    fn try_from(value: String) -> Result<Self> {
        validate_requirement(&value)?;
        Ok(Self(value))
    }
}

impl From<Requirement> for String {
    fn from(req: Requirement) -> Self {
        req.0
    }
}

impl AsRef<str> for Requirement {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
