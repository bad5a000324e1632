//! CLI behaviour tests: exit codes and output surfaces.

use rstest::{fixture, rstest};
use std::fs;
use std::process::Command;
use tempfile::TempDir;

/// A valid project directory for CLI runs.
#[fixture]
fn project() -> TempDir {
    let dir = TempDir::new().expect("temp dir creation succeeds");
    fs::write(
        dir.path().join("baler.toml"),
        "name = \"foo\"\nversion = \"0.1\"\npackages = [\"foo\"]\n",
    )
    .expect("write manifest");
    let pkg = dir.path().join("foo");
    fs::create_dir(&pkg).expect("create package dir");
    fs::write(pkg.join("__init__.py"), b"").expect("write __init__");
    dir
}

fn baler(project: &TempDir, args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_baler"))
        .current_dir(project.path())
        .args(args)
        .output()
        .expect("spawn baler")
}

#[rstest]
fn build_succeeds_with_exit_zero(project: TempDir) {
    let output = baler(&project, &["build"]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("foo-0.1.tar.gz"));
    assert!(stdout.contains("foo-0.1-py3-none-any.whl"));
    assert!(project.path().join("dist").is_dir());
}

#[rstest]
fn check_reports_ok_on_a_valid_manifest(project: TempDir) {
    let output = baler(&project, &["check"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("manifest OK"));
}

#[rstest]
fn missing_name_exits_one_and_writes_nothing(project: TempDir) {
    fs::write(
        project.path().join("baler.toml"),
        "version = \"0.1\"\npackages = [\"foo\"]\n",
    )
    .expect("rewrite manifest");

    let output = baler(&project, &["build"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("name"));
    assert!(!project.path().join("dist").exists());
}

#[rstest]
fn check_json_reports_structured_violations(project: TempDir) {
    fs::write(project.path().join("baler.toml"), "version = \"0.1\"\n")
        .expect("rewrite manifest");

    let output = baler(&project, &["check", "--json"]);
    assert_eq!(output.status.code(), Some(1));
    let parsed: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("valid JSON report");
    assert_eq!(parsed["ok"], false);
    assert_eq!(parsed["violations"][0]["field"], "name");
}

#[rstest]
fn unreadable_manifest_exits_two(project: TempDir) {
    let output = baler(&project, &["build", "--manifest", "absent.toml"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("absent.toml"));
}

#[rstest]
fn mistyped_field_exits_one(project: TempDir) {
    fs::write(project.path().join("baler.toml"), "name = 42\nversion = \"0.1\"\n")
        .expect("rewrite manifest");

    let output = baler(&project, &["build"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(!project.path().join("dist").exists());
}
