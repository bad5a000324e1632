//! Unit tests for whole-manifest validation.

use super::*;
use rstest::{fixture, rstest};
use std::fs;
use tempfile::TempDir;

#[fixture]
fn minimal_manifest() -> Manifest {
    Manifest {
        name: Some("foo".to_owned()),
        version: Some("0.1".to_owned()),
        packages: ["foo".to_owned()].into(),
        ..Manifest::default()
    }
}

/// Lay out `foo/__init__.py` and `foo/cli.py` under a fresh temp dir.
#[fixture]
fn foo_tree() -> TempDir {
    let dir = TempDir::new().expect("temp dir creation succeeds");
    let pkg = dir.path().join("foo");
    fs::create_dir(&pkg).expect("create package dir");
    fs::write(pkg.join("__init__.py"), b"").expect("write __init__");
    fs::write(pkg.join("cli.py"), b"def main():\n    pass\n").expect("write module");
    dir
}

fn source_root(dir: &TempDir) -> camino::Utf8PathBuf {
    camino::Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 temp path")
}

#[rstest]
fn accepts_minimal_manifest_fields(minimal_manifest: Manifest) {
    let checked = validate_fields(&minimal_manifest).expect("valid manifest");
    assert_eq!(checked.name.as_str(), "foo");
    assert_eq!(checked.version.as_str(), "0.1");
    assert_eq!(checked.distribution_stem(), "foo-0.1");
}

#[rstest]
fn missing_name_is_a_violation(minimal_manifest: Manifest) {
    let manifest = Manifest {
        name: None,
        ..minimal_manifest
    };
    let report = validate_fields(&manifest).expect_err("missing name rejected");
    assert_eq!(report.violations().len(), 1);
    assert_eq!(report.violations()[0].field, "name");
}

#[rstest]
fn empty_version_is_a_violation(minimal_manifest: Manifest) {
    let manifest = Manifest {
        version: Some("  ".to_owned()),
        ..minimal_manifest
    };
    let report = validate_fields(&manifest).expect_err("blank version rejected");
    assert_eq!(report.violations()[0].field, "version");
    assert!(report.violations()[0].reason.contains("missing or empty"));
}

#[rstest]
fn all_violations_are_collected_in_one_pass(minimal_manifest: Manifest) {
    let manifest = Manifest {
        name: None,
        version: Some("not-a-version".to_owned()),
        install_requires: vec![">=1.0".to_owned()],
        ..minimal_manifest
    };
    let report = validate_fields(&manifest).expect_err("three violations expected");
    let fields: Vec<&str> = report.violations().iter().map(|v| v.field.as_str()).collect();
    assert_eq!(fields, ["name", "version", "install_requires"]);
}

#[rstest]
fn malformed_entry_point_names_its_group(minimal_manifest: Manifest) {
    let manifest = Manifest {
        entry_points: [(
            "console_scripts".to_owned(),
            vec!["foo only-a-name".to_owned()],
        )]
        .into(),
        ..minimal_manifest
    };
    let report = validate_fields(&manifest).expect_err("bad entry point rejected");
    assert_eq!(report.violations()[0].field, "entry_points.console_scripts");
}

#[rstest]
fn package_data_must_name_a_declared_package(minimal_manifest: Manifest) {
    let manifest = Manifest {
        package_data: [("bar".to_owned(), vec!["*.json".to_owned()])].into(),
        ..minimal_manifest
    };
    let report = validate_fields(&manifest).expect_err("undeclared key rejected");
    assert_eq!(report.violations()[0].field, "package_data");
    assert!(report.violations()[0].reason.contains("bar"));
}

#[rstest]
fn package_resolving_to_subtree_passes(minimal_manifest: Manifest, foo_tree: TempDir) {
    let checked = validate(&minimal_manifest, &source_root(&foo_tree)).expect("valid layout");
    assert!(checked.packages.contains("foo"));
}

#[rstest]
fn missing_package_directory_is_a_violation(minimal_manifest: Manifest, foo_tree: TempDir) {
    let manifest = Manifest {
        packages: ["foo".to_owned(), "missing".to_owned()].into(),
        ..minimal_manifest
    };
    let report = validate(&manifest, &source_root(&foo_tree)).expect_err("missing dir rejected");
    assert_eq!(report.violations().len(), 1);
    assert!(report.violations()[0].reason.contains("missing"));
}

#[rstest]
fn package_without_init_is_a_violation(minimal_manifest: Manifest, foo_tree: TempDir) {
    fs::create_dir(foo_tree.path().join("bare")).expect("create bare dir");
    let manifest = Manifest {
        packages: ["bare".to_owned(), "foo".to_owned()].into(),
        ..minimal_manifest
    };
    let report = validate(&manifest, &source_root(&foo_tree)).expect_err("no __init__ rejected");
    assert!(report.violations()[0].reason.contains("__init__.py"));
}

#[rstest]
#[case("foo = foo:main")]
#[case("foo-cli = foo.cli:main")]
#[case("plugin = foo.cli")]
fn entry_point_targets_resolve_against_the_tree(
    minimal_manifest: Manifest,
    foo_tree: TempDir,
    #[case] declaration: &str,
) {
    let manifest = Manifest {
        entry_points: [("console_scripts".to_owned(), vec![declaration.to_owned()])].into(),
        ..minimal_manifest
    };
    assert!(validate(&manifest, &source_root(&foo_tree)).is_ok());
}

#[rstest]
fn unresolvable_entry_point_target_is_a_violation(
    minimal_manifest: Manifest,
    foo_tree: TempDir,
) {
    let manifest = Manifest {
        entry_points: [(
            "console_scripts".to_owned(),
            vec!["foo = foo.absent:main".to_owned()],
        )]
        .into(),
        ..minimal_manifest
    };
    let report = validate(&manifest, &source_root(&foo_tree)).expect_err("bad target rejected");
    assert!(report.violations()[0].reason.contains("foo.absent"));
}
