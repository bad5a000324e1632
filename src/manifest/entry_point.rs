//! Entry point parsing for the manifest.
//!
//! An entry point is a named reference from the archive's metadata to an
//! importable symbol, declared as `name = module:attr` (the attribute part
//! is optional for plugin groups that register whole modules). Installers
//! use these records to generate executable shims.

use super::error::{FieldError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A parsed entry point declaration.
///
/// # Examples
///
/// ```
/// use baler::manifest::entry_point::EntryPoint;
///
/// let ep: EntryPoint = "foo = foo.cli:main".try_into().expect("valid entry point");
/// assert_eq!(ep.name(), "foo");
/// assert_eq!(ep.target().module(), "foo.cli");
/// assert_eq!(ep.target().attr(), Some("main"));
/// assert_eq!(ep.to_string(), "foo = foo.cli:main");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EntryPoint {
    name: String,
    target: ImportTarget,
}

/// The importable symbol an entry point resolves to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImportTarget {
    module: String,
    attr: Option<String>,
}

impl ImportTarget {
    /// Return the dotted module path.
    #[must_use]
    pub fn module(&self) -> &str {
        &self.module
    }

    /// Return the dotted attribute path within the module, if any.
    #[must_use]
    pub fn attr(&self) -> Option<&str> {
        self.attr.as_deref()
    }
}

impl EntryPoint {
    /// Return the shim name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Return the import target.
    #[must_use]
    pub fn target(&self) -> &ImportTarget {
        &self.target
    }
}

/// Check that `value` is a dotted path of Python identifiers.
fn is_dotted_identifier(value: &str) -> bool {
    !value.is_empty() && value.split('.').all(is_identifier)
}

/// Check that `value` is a single Python identifier.
fn is_identifier(value: &str) -> bool {
    let mut chars = value.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn invalid(value: &str, reason: impl Into<String>) -> FieldError {
    FieldError::InvalidEntryPoint {
        value: value.to_owned(),
        reason: reason.into(),
    }
}

/// Parse an entry point declaration of the form `name = module:attr`.
fn parse_entry_point(value: &str) -> Result<EntryPoint> {
    let Some((name, target)) = value.split_once('=') else {
        return Err(invalid(value, "expected \"name = module:attr\""));
    };
    let name = name.trim();
    if name.is_empty() {
        return Err(invalid(value, "shim name must not be empty"));
    }

    let target = target.trim();
    let (module, attr) = match target.split_once(':') {
        Some((module, attr)) => (module.trim(), Some(attr.trim())),
        None => (target, None),
    };
    if !is_dotted_identifier(module) {
        return Err(invalid(
            value,
            format!("\"{module}\" is not an importable module path"),
        ));
    }
    if let Some(attr) = attr
        && !is_dotted_identifier(attr)
    {
        return Err(invalid(
            value,
            format!("\"{attr}\" is not an importable attribute path"),
        ));
    }

    Ok(EntryPoint {
        name: name.to_owned(),
        target: ImportTarget {
            module: module.to_owned(),
            attr: attr.map(str::to_owned),
        },
    })
}

impl TryFrom<&str> for EntryPoint {
    type Error = FieldError;

    fn try_from(value: &str) -> Result<Self> {
        parse_entry_point(value)
    }
}

impl TryFrom<String> for EntryPoint {
    type Error = FieldError;

    fn try_from(value: String) -> Result<Self> {
        parse_entry_point(&value)
    }
}

impl From<EntryPoint> for String {
    fn from(ep: EntryPoint) -> Self {
        ep.to_string()
    }
}

impl fmt::Display for EntryPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.name, self.target)
    }
}

impl fmt::Display for ImportTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.attr {
            Some(attr) => write!(f, "{}:{attr}", self.module),
            None => write!(f, "{}", self.module),
        }
    }
}
