//! Manifest TOML deserialization.
//!
//! Loads a `baler.toml` document into the declarative [`Manifest`] form.
//! Structural problems (malformed TOML, a field of the wrong type, an
//! unknown key) are rejected here; value-level problems are left for the
//! validation pass so they can all be reported together.

use super::schema::Manifest;
use crate::error::{BalerError, Result};
use camino::Utf8Path;
use log::trace;

/// Default manifest filename looked up under the source root.
pub const MANIFEST_FILENAME: &str = "baler.toml";

/// Parse a TOML document into a declarative [`Manifest`].
///
/// # Errors
///
/// Returns [`BalerError::ManifestParse`] if the document is not valid TOML,
/// a field has the wrong type, or an unknown key is present.
///
/// # Examples
///
/// ```
/// use baler::manifest::parser::parse_manifest;
///
/// let manifest = parse_manifest("name = \"foo\"\nversion = \"0.1\"\n", "baler.toml".into())
///     .expect("valid manifest");
/// assert_eq!(manifest.name.as_deref(), Some("foo"));
/// ```
pub fn parse_manifest(document: &str, path: &Utf8Path) -> Result<Manifest> {
    toml::from_str(document).map_err(|e| BalerError::ManifestParse {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Read and parse the manifest file at `path`.
///
/// # Errors
///
/// Returns [`BalerError::ManifestRead`] if the file cannot be read, or
/// [`BalerError::ManifestParse`] if its contents are rejected by
/// [`parse_manifest`].
pub fn load_manifest(path: &Utf8Path) -> Result<Manifest> {
    trace!("loading manifest from {path}");
    let document = std::fs::read_to_string(path).map_err(|source| BalerError::ManifestRead {
        path: path.to_path_buf(),
        source,
    })?;
    parse_manifest(&document, path)
}
