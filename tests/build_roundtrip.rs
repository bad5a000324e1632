//! End-to-end build and round-trip verification.
//!
//! Exercises the pipeline the way a user drives it: a manifest file over a
//! real source tree, both archive formats, and a round trip that extracts
//! the produced archives and compares the embedded metadata record against
//! the manifest that produced it.

use baler::digest::Sha256Digest;
use baler::driver::ArchiveFormat;
use baler::error::BalerError;
use baler::manifest::parser::load_manifest;
use baler::metadata::parse_metadata;
use baler::pipeline;
use camino::{Utf8Path, Utf8PathBuf};
use flate2::read::GzDecoder;
use rstest::{fixture, rstest};
use std::collections::BTreeMap;
use std::fs;
use std::io::Read;
use tempfile::TempDir;

const MANIFEST: &str = r#"
name = "foo"
version = "0.1"
description = "A small example"
author = "A. Author"
license = "ISC"
packages = ["foo"]
install_requires = ["requests >=2.0"]
python_requires = ">=3.8"

[package_data]
foo = ["data/*.json"]

[entry_points]
console_scripts = ["foo = foo:main"]
"#;

/// A project directory: `baler.toml` plus a small `foo` package.
#[fixture]
fn project() -> TempDir {
    let dir = TempDir::new().expect("temp dir creation succeeds");
    fs::write(dir.path().join("baler.toml"), MANIFEST).expect("write manifest");
    let pkg = dir.path().join("foo");
    fs::create_dir_all(pkg.join("data")).expect("create dirs");
    fs::write(pkg.join("__init__.py"), b"def main():\n    pass\n").expect("write __init__");
    fs::write(pkg.join("data").join("defaults.json"), b"{}\n").expect("write data");
    dir
}

fn root(dir: &TempDir) -> Utf8PathBuf {
    Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 temp path")
}

/// Extract `(entry_path, contents)` pairs from a gzipped tarball.
fn sdist_entries(archive: &Utf8Path) -> BTreeMap<String, Vec<u8>> {
    let file = fs::File::open(archive).expect("open sdist");
    let mut tar = tar::Archive::new(GzDecoder::new(file));
    tar.entries()
        .expect("tar entries")
        .map(|entry| {
            let mut entry = entry.expect("tar entry");
            let path = entry.path().expect("entry path").to_string_lossy().into_owned();
            let mut contents = Vec::new();
            entry.read_to_end(&mut contents).expect("entry contents");
            (path, contents)
        })
        .collect()
}

#[rstest]
fn build_produces_exactly_one_archive_per_format(project: TempDir) {
    let source_root = root(&project);
    let manifest = load_manifest(&source_root.join("baler.toml")).expect("load manifest");
    let out = source_root.join("dist");

    let built = pipeline::build(
        &manifest,
        &source_root,
        &out,
        &[ArchiveFormat::Sdist, ArchiveFormat::Wheel],
    )
    .expect("build succeeds");

    assert_eq!(built.len(), 2);
    let on_disk: Vec<String> = fs::read_dir(&out)
        .expect("read dist dir")
        .map(|e| e.expect("dir entry").file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(on_disk.len(), 2);
    assert!(on_disk.contains(&"foo-0.1.tar.gz".to_owned()));
    assert!(on_disk.contains(&"foo-0.1-py3-none-any.whl".to_owned()));
}

#[rstest]
fn sdist_round_trip_preserves_required_fields(project: TempDir) {
    let source_root = root(&project);
    let manifest = load_manifest(&source_root.join("baler.toml")).expect("load manifest");
    let built = pipeline::build(
        &manifest,
        &source_root,
        &source_root.join("dist"),
        &[ArchiveFormat::Sdist],
    )
    .expect("build succeeds");

    let entries = sdist_entries(&built[0].path);
    assert!(entries.contains_key("foo-0.1/foo/__init__.py"));
    assert!(entries.contains_key("foo-0.1/foo/data/defaults.json"));

    let pkg_info = entries.get("foo-0.1/PKG-INFO").expect("PKG-INFO present");
    let record = parse_metadata(&String::from_utf8(pkg_info.clone()).expect("utf-8 record"));
    assert_eq!(record.get("Name"), manifest.name.as_deref());
    assert_eq!(record.get("Version"), manifest.version.as_deref());
    assert_eq!(record.get_all("Requires-Dist"), ["requests >=2.0"]);
}

#[rstest]
fn wheel_round_trip_verifies_record_digests(project: TempDir) {
    let source_root = root(&project);
    let manifest = load_manifest(&source_root.join("baler.toml")).expect("load manifest");
    let built = pipeline::build(
        &manifest,
        &source_root,
        &source_root.join("dist"),
        &[ArchiveFormat::Wheel],
    )
    .expect("build succeeds");

    let file = fs::File::open(&built[0].path).expect("open wheel");
    let mut zip = zip::ZipArchive::new(file).expect("zip archive");

    let mut record_text = String::new();
    zip.by_name("foo-0.1.dist-info/RECORD")
        .expect("RECORD present")
        .read_to_string(&mut record_text)
        .expect("read RECORD");

    for line in record_text.lines() {
        let mut columns = line.split(',');
        let path = columns.next().expect("path column");
        let digest = columns.next().expect("digest column");
        if digest.is_empty() {
            assert_eq!(path, "foo-0.1.dist-info/RECORD");
            continue;
        }
        let mut contents = Vec::new();
        zip.by_name(path)
            .expect("recorded entry present")
            .read_to_end(&mut contents)
            .expect("read entry");
        assert_eq!(
            digest,
            format!("sha256={}", Sha256Digest::of_bytes(&contents)),
            "digest mismatch for {path}"
        );
    }
}

#[rstest]
fn entry_point_appears_in_wheel_metadata(project: TempDir) {
    let source_root = root(&project);
    let manifest = load_manifest(&source_root.join("baler.toml")).expect("load manifest");
    let built = pipeline::build(
        &manifest,
        &source_root,
        &source_root.join("dist"),
        &[ArchiveFormat::Wheel],
    )
    .expect("build succeeds");

    let file = fs::File::open(&built[0].path).expect("open wheel");
    let mut zip = zip::ZipArchive::new(file).expect("zip archive");
    let mut entry_points = String::new();
    zip.by_name("foo-0.1.dist-info/entry_points.txt")
        .expect("entry_points.txt present")
        .read_to_string(&mut entry_points)
        .expect("read entry_points.txt");
    assert!(entry_points.contains("[console_scripts]\nfoo = foo:main\n"));
}

#[rstest]
fn package_less_manifest_still_builds_one_archive_per_format() {
    let dir = TempDir::new().expect("temp dir creation succeeds");
    fs::write(dir.path().join("baler.toml"), "name = \"bare\"\nversion = \"1.0\"\n")
        .expect("write manifest");
    let source_root = root(&dir);
    let manifest = load_manifest(&source_root.join("baler.toml")).expect("load manifest");
    let out = source_root.join("dist");

    let built = pipeline::build(
        &manifest,
        &source_root,
        &out,
        &[ArchiveFormat::Sdist, ArchiveFormat::Wheel],
    )
    .expect("metadata-only build succeeds");

    assert_eq!(built.len(), 2);
    assert!(built.iter().all(|a| a.path.is_file()));

    let entries = sdist_entries(&built[0].path);
    let names: Vec<&str> = entries.keys().map(String::as_str).collect();
    assert_eq!(names, ["bare-1.0/PKG-INFO"]);
}

#[rstest]
fn missing_name_rejects_before_any_file_is_written(project: TempDir) {
    let source_root = root(&project);
    let mut manifest = load_manifest(&source_root.join("baler.toml")).expect("load manifest");
    manifest.name = None;
    let out = source_root.join("dist");

    let err = pipeline::build(&manifest, &source_root, &out, &[ArchiveFormat::Sdist])
        .expect_err("missing name rejected");
    assert!(matches!(err, BalerError::Validation { .. }));
    assert!(!out.exists());
}

#[rstest]
fn rebuilding_twice_is_byte_identical(project: TempDir) {
    let source_root = root(&project);
    let manifest = load_manifest(&source_root.join("baler.toml")).expect("load manifest");
    let formats = [ArchiveFormat::Sdist, ArchiveFormat::Wheel];

    let first = pipeline::build(&manifest, &source_root, &source_root.join("dist-a"), &formats)
        .expect("first build");
    let second = pipeline::build(&manifest, &source_root, &source_root.join("dist-b"), &formats)
        .expect("second build");

    for (a, b) in first.iter().zip(second.iter()) {
        assert_eq!(
            fs::read(&a.path).expect("read first"),
            fs::read(&b.path).expect("read second"),
            "{} differs between builds",
            a.format
        );
    }
}
