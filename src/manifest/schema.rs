//! Manifest schema types.
//!
//! Two shapes of the same record live here. [`Manifest`] is the declarative
//! form read from `baler.toml`: every field is optional and scalars are
//! plain strings, so a manifest with problems can still be loaded and every
//! violation reported at once. [`CheckedManifest`] is the validated form the
//! packaging drivers consume: required fields are present and every scalar
//! has passed its newtype validation.
//!
//! The declarative document mirrors the historical `setup(**kwargs)` call:
//!
//! ```toml
//! name = "foo"
//! version = "0.1"
//! description = "A small example"
//! packages = ["foo", "foo.util"]
//! install_requires = ["requests >=2.0"]
//!
//! [entry_points]
//! console_scripts = ["foo = foo:main"]
//! ```

use super::entry_point::EntryPoint;
use super::package_name::PackageName;
use super::requirement::Requirement;
use super::version_spec::VersionSpec;
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};

/// The declarative manifest as read from `baler.toml`.
///
/// Constructed once at build time and never mutated. Field well-formedness
/// is checked by [`super::validation::validate`], not by this type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Distribution name. Required; absence is a validation error.
    #[serde(default)]
    pub name: Option<String>,
    /// Version string. Required; absence is a validation error.
    #[serde(default)]
    pub version: Option<String>,
    /// One-line summary.
    #[serde(default)]
    pub description: Option<String>,
    /// Long description body, usually the README text.
    #[serde(default)]
    pub long_description: Option<String>,
    /// MIME-like tag for the long description (e.g. `text/markdown`).
    #[serde(default)]
    pub long_description_content_type: Option<String>,
    /// Author display name.
    #[serde(default)]
    pub author: Option<String>,
    /// Author contact address.
    #[serde(default)]
    pub author_email: Option<String>,
    /// Maintainer display name.
    #[serde(default)]
    pub maintainer: Option<String>,
    /// Maintainer contact address.
    #[serde(default)]
    pub maintainer_email: Option<String>,
    /// Project home page.
    #[serde(default)]
    pub url: Option<String>,
    /// License identifier or text.
    #[serde(default)]
    pub license: Option<String>,
    /// Module subtrees to include, as dotted package paths.
    #[serde(default)]
    pub packages: BTreeSet<String>,
    /// Non-module files to include, as glob patterns per package path.
    #[serde(default)]
    pub package_data: BTreeMap<String, Vec<String>>,
    /// Runtime dependency specifiers, in declaration order.
    #[serde(default)]
    pub install_requires: Vec<String>,
    /// Optional dependency groups, keyed by extras name.
    #[serde(default)]
    pub extras_require: BTreeMap<String, Vec<String>>,
    /// Entry point declarations, keyed by group name.
    #[serde(default)]
    pub entry_points: BTreeMap<String, Vec<String>>,
    /// Trove-style taxonomy strings.
    #[serde(default)]
    pub classifiers: Vec<String>,
    /// Supported interpreter version range (e.g. `>=3.8`).
    #[serde(default)]
    pub python_requires: Option<String>,
}

/// The validated manifest the packaging drivers consume.
///
/// Produced only by [`super::validation::validate`]; every field has passed
/// its newtype validation and the required fields are guaranteed present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckedManifest {
    /// Validated distribution name.
    pub name: PackageName,
    /// Validated version string.
    pub version: VersionSpec,
    /// One-line summary.
    pub description: Option<String>,
    /// Long description body.
    pub long_description: Option<String>,
    /// MIME-like tag for the long description.
    pub long_description_content_type: Option<String>,
    /// Author display name.
    pub author: Option<String>,
    /// Author contact address.
    pub author_email: Option<String>,
    /// Maintainer display name.
    pub maintainer: Option<String>,
    /// Maintainer contact address.
    pub maintainer_email: Option<String>,
    /// Project home page.
    pub url: Option<String>,
    /// License identifier or text.
    pub license: Option<String>,
    /// Module subtrees to include.
    pub packages: BTreeSet<String>,
    /// Non-module files to include, per package path.
    pub package_data: BTreeMap<String, Vec<String>>,
    /// Validated runtime dependency specifiers.
    pub install_requires: Vec<Requirement>,
    /// Validated optional dependency groups.
    pub extras_require: BTreeMap<String, Vec<Requirement>>,
    /// Parsed entry points, keyed by group name.
    pub entry_points: BTreeMap<String, Vec<EntryPoint>>,
    /// Taxonomy strings.
    pub classifiers: Vec<String>,
    /// Supported interpreter version range.
    pub python_requires: Option<String>,
}

impl CheckedManifest {
    /// Return the `{normalized_name}-{version}` stem distribution
    /// filenames are built from.
    ///
    /// # Examples
    ///
    /// ```
    /// use baler::manifest::schema::Manifest;
    /// use baler::manifest::validation::validate_fields;
    ///
    /// let manifest = Manifest {
    ///     name: Some("Flask-Turbo".to_owned()),
    ///     version: Some("0.1".to_owned()),
    ///     ..Manifest::default()
    /// };
    /// let checked = validate_fields(&manifest).expect("valid manifest");
    /// assert_eq!(checked.distribution_stem(), "flask_turbo-0.1");
    /// ```
    #[must_use]
    pub fn distribution_stem(&self) -> String {
        format!("{}-{}", self.name.normalized(), self.version)
    }
}
