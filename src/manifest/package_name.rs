//! Distribution name newtype for the manifest.
//!
//! Validates that the name is non-empty, contains only ASCII alphanumeric
//! characters, hyphens, dots, and underscores, and starts and ends with an
//! alphanumeric character — the constraints registries place on published
//! distribution names.

use super::error::{FieldError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A validated distribution name.
///
/// # Examples
///
/// ```
/// use baler::manifest::package_name::PackageName;
///
/// let name: PackageName = "flask-turbo-boost".try_into().expect("valid name");
/// assert_eq!(name.as_str(), "flask-turbo-boost");
/// assert_eq!(name.normalized(), "flask_turbo_boost");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PackageName(String);

/// Check that a byte is permitted inside a distribution name.
fn is_valid_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '.' || c == '_'
}

impl PackageName {
    /// Return the name as declared, without normalization.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper and return the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Return the filename-safe normalized form: lowercased, with every
    /// run of hyphens, dots, and underscores collapsed to one underscore.
    ///
    /// # Examples
    ///
    /// ```
    /// use baler::manifest::package_name::PackageName;
    ///
    /// let name: PackageName = "Flask-Turbo.Boost".try_into().expect("valid name");
    /// assert_eq!(name.normalized(), "flask_turbo_boost");
    /// ```
    #[must_use]
    pub fn normalized(&self) -> String {
        let mut out = String::with_capacity(self.0.len());
        let mut in_separator = false;
        for c in self.0.chars() {
            if matches!(c, '-' | '.' | '_') {
                in_separator = true;
            } else {
                if in_separator {
                    out.push('_');
                    in_separator = false;
                }
                out.push(c.to_ascii_lowercase());
            }
        }
        out
    }
}

/// Validate that `value` is a well-formed distribution name.
fn validate_name(value: &str) -> Result<()> {
    let Some(first) = value.chars().next() else {
        return Err(FieldError::InvalidPackageName {
            value: value.to_owned(),
            reason: "name must not be empty".to_owned(),
        });
    };
    if let Some(bad) = value.chars().find(|c| !is_valid_name_char(*c)) {
        return Err(FieldError::InvalidPackageName {
            value: value.to_owned(),
            reason: format!("invalid character '{bad}'"),
        });
    }
    // value is non-empty, so last() is present.
    let last = value.chars().last().unwrap_or(first);
    if !first.is_ascii_alphanumeric() || !last.is_ascii_alphanumeric() {
        return Err(FieldError::InvalidPackageName {
            value: value.to_owned(),
            reason: "name must start and end with a letter or digit".to_owned(),
        });
    }
    Ok(())
}

impl TryFrom<&str> for PackageName {
    type Error = FieldError;

    fn try_from(value: &str) -> Result<Self> {
        validate_name(value)?;
        Ok(Self(value.to_owned()))
    }
}

impl TryFrom<String> for PackageName {
    type Error = FieldError;

    fn try_from(value: String) -> Result<Self> {
        validate_name(&value)?;
        Ok(Self(value))
    }
}

impl From<PackageName> for String {
    fn from(name: PackageName) -> Self {
        name.0
    }
}

impl AsRef<str> for PackageName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PackageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
