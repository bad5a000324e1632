//! Whole-manifest validation and violation reporting.
//!
//! Validation runs in two layers. [`validate_fields`] checks the manifest in
//! isolation: required fields are present and every scalar passes its
//! newtype validation. [`validate`] additionally checks the manifest against
//! the source tree: every declared package resolves to a module subtree, and
//! every entry point target resolves to an importable symbol. Both collect
//! every violation rather than stopping at the first, so one `baler check`
//! run reports the full repair list.

use super::entry_point::EntryPoint;
use super::package_name::PackageName;
use super::requirement::Requirement;
use super::schema::{CheckedManifest, Manifest};
use super::version_spec::VersionSpec;
use camino::{Utf8Path, Utf8PathBuf};
use log::trace;
use serde::Serialize;
use std::fmt;

/// A single validation failure, naming the offending field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// The manifest field (or field entry) the violation concerns.
    pub field: String,
    /// Description of the constraint that was broken.
    pub reason: String,
}

impl Violation {
    /// Build a violation for a missing required field.
    #[must_use]
    pub fn missing(field: &str) -> Self {
        Self {
            field: field.to_owned(),
            reason: "required field is missing or empty".to_owned(),
        }
    }

    /// Build a violation for a malformed field value.
    #[must_use]
    pub fn malformed(field: &str, reason: impl Into<String>) -> Self {
        Self {
            field: field.to_owned(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}

/// The full set of violations found in one validation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    violations: Vec<Violation>,
}

impl ValidationReport {
    /// Build a report from an explicit violation list.
    #[must_use]
    pub fn from_violations(violations: Vec<Violation>) -> Self {
        Self { violations }
    }

    /// Return the violations in the order they were found.
    #[must_use]
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Return true when no violations were found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    fn push(&mut self, violation: Violation) {
        self.violations.push(violation);
    }
}

/// Validate the manifest in isolation and produce the checked form.
///
/// Checks that `name` and `version` are present and non-empty, and that
/// every scalar field passes its newtype validation. Source-tree invariants
/// are left to [`validate`].
///
/// # Errors
///
/// Returns the full [`ValidationReport`] when any field is missing or
/// malformed.
pub fn validate_fields(manifest: &Manifest) -> Result<CheckedManifest, ValidationReport> {
    let mut report = ValidationReport::default();

    let name = check_required(&mut report, "name", manifest.name.as_deref(), |value| {
        PackageName::try_from(value).map_err(|e| e.to_string())
    });
    let version = check_required(&mut report, "version", manifest.version.as_deref(), |value| {
        VersionSpec::try_from(value).map_err(|e| e.to_string())
    });

    for package in &manifest.packages {
        if !is_package_path(package) {
            report.push(Violation::malformed(
                "packages",
                format!("\"{package}\" is not a dotted module path"),
            ));
        }
    }
    for key in manifest.package_data.keys() {
        if !manifest.packages.contains(key) {
            report.push(Violation::malformed(
                "package_data",
                format!("\"{key}\" is not a declared package"),
            ));
        }
    }

    let install_requires =
        check_requirements(&mut report, "install_requires", &manifest.install_requires);
    let extras_require = manifest
        .extras_require
        .iter()
        .map(|(extra, specs)| {
            let field = format!("extras_require.{extra}");
            (extra.clone(), check_requirements(&mut report, &field, specs))
        })
        .collect();

    let entry_points = manifest
        .entry_points
        .iter()
        .map(|(group, declarations)| {
            let parsed = declarations
                .iter()
                .filter_map(|decl| {
                    EntryPoint::try_from(decl.as_str())
                        .map_err(|e| {
                            report.push(Violation::malformed(
                                &format!("entry_points.{group}"),
                                e.to_string(),
                            ));
                        })
                        .ok()
                })
                .collect();
            (group.clone(), parsed)
        })
        .collect();

    if let Some(content_type) = manifest.long_description_content_type.as_deref()
        && !content_type.contains('/')
    {
        report.push(Violation::malformed(
            "long_description_content_type",
            format!("\"{content_type}\" is not a MIME-like tag"),
        ));
    }

    let (Some(name), Some(version)) = (name, version) else {
        return Err(report);
    };
    if !report.is_empty() {
        return Err(report);
    }

    Ok(CheckedManifest {
        name,
        version,
        description: manifest.description.clone(),
        long_description: manifest.long_description.clone(),
        long_description_content_type: manifest.long_description_content_type.clone(),
        author: manifest.author.clone(),
        author_email: manifest.author_email.clone(),
        maintainer: manifest.maintainer.clone(),
        maintainer_email: manifest.maintainer_email.clone(),
        url: manifest.url.clone(),
        license: manifest.license.clone(),
        packages: manifest.packages.clone(),
        package_data: manifest.package_data.clone(),
        install_requires,
        extras_require,
        entry_points,
        classifiers: manifest.classifiers.clone(),
        python_requires: manifest.python_requires.clone(),
    })
}

/// Validate the manifest against a source tree.
///
/// Runs [`validate_fields`], then checks the source-layout invariants:
/// every declared package must resolve to a directory containing an
/// `__init__.py`, and every entry point target must resolve to a module
/// file or package directory under `source_root`.
///
/// # Errors
///
/// Returns the full [`ValidationReport`] covering both layers.
pub fn validate(
    manifest: &Manifest,
    source_root: &Utf8Path,
) -> Result<CheckedManifest, ValidationReport> {
    trace!("validating manifest against {source_root}");
    let mut field_violations = Vec::new();
    let checked = match validate_fields(manifest) {
        Ok(checked) => Some(checked),
        Err(report) => {
            field_violations = report.violations().to_vec();
            None
        }
    };

    let mut report = ValidationReport::from_violations(field_violations);

    for package in &manifest.packages {
        if !is_package_path(package) {
            // Already reported by the field pass.
            continue;
        }
        let dir = package_dir(source_root, package);
        if !dir.is_dir() {
            report.push(Violation::malformed(
                "packages",
                format!("\"{package}\" does not resolve to a directory under {source_root}"),
            ));
        } else if !dir.join("__init__.py").is_file() {
            report.push(Violation::malformed(
                "packages",
                format!("package \"{package}\" has no __init__.py"),
            ));
        }
    }

    if let Some(checked) = &checked {
        for (group, entry_points) in &checked.entry_points {
            for ep in entry_points {
                if !module_resolves(source_root, ep.target().module()) {
                    report.push(Violation::malformed(
                        &format!("entry_points.{group}"),
                        format!(
                            "target \"{}\" does not resolve to a module under {source_root}",
                            ep.target()
                        ),
                    ));
                }
            }
        }
    }

    match (checked, report.is_empty()) {
        (Some(checked), true) => Ok(checked),
        _ => Err(report),
    }
}

/// Map a dotted package path to its directory under `source_root`.
pub(crate) fn package_dir(source_root: &Utf8Path, package: &str) -> Utf8PathBuf {
    let mut dir = source_root.to_path_buf();
    for segment in package.split('.') {
        dir.push(segment);
    }
    dir
}

/// Check that a dotted module path resolves to `module.py` or a package
/// directory with an `__init__.py`.
fn module_resolves(source_root: &Utf8Path, module: &str) -> bool {
    let dir = package_dir(source_root, module);
    if dir.join("__init__.py").is_file() {
        return true;
    }
    let Some(parent) = dir.parent() else {
        return false;
    };
    let Some(stem) = dir.file_name() else {
        return false;
    };
    parent.join(format!("{stem}.py")).is_file()
}

/// Check that `value` is a dotted path of identifiers.
fn is_package_path(value: &str) -> bool {
    !value.is_empty() && value.split('.').all(is_identifier)
}

/// Check that `value` is a single identifier segment.
fn is_identifier(value: &str) -> bool {
    let mut chars = value.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Check a required scalar field, recording a violation when absent,
/// empty, or malformed.
fn check_required<T>(
    report: &mut ValidationReport,
    field: &str,
    value: Option<&str>,
    parse: impl FnOnce(&str) -> Result<T, String>,
) -> Option<T> {
    match value {
        None => {
            report.push(Violation::missing(field));
            None
        }
        Some(value) if value.trim().is_empty() => {
            report.push(Violation::missing(field));
            None
        }
        Some(value) => parse(value)
            .map_err(|reason| report.push(Violation::malformed(field, reason)))
            .ok(),
    }
}

/// Validate a requirement list, recording a violation per bad specifier.
fn check_requirements(
    report: &mut ValidationReport,
    field: &str,
    specs: &[String],
) -> Vec<Requirement> {
    specs
        .iter()
        .filter_map(|spec| {
            Requirement::try_from(spec.as_str())
                .map_err(|e| report.push(Violation::malformed(field, e.to_string())))
                .ok()
        })
        .collect()
}

#[cfg(test)]
#[path = "validation_tests.rs"]
mod tests;
