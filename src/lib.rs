//! Baler library.
//!
//! This crate builds Python distribution archives from a declarative
//! manifest. A `baler.toml` document names the package, its version, the
//! module subtrees to include, and the usual descriptive metadata; the build
//! pipeline validates the manifest against the source tree and hands it to a
//! packaging driver that writes either a source distribution (`.tar.gz`) or
//! a binary wheel (`.whl`) to disk.
//!
//! # Modules
//!
//! - [`cli`] - Command-line argument definitions
//! - [`digest`] - SHA-256 digest newtype and file hashing
//! - [`driver`] - Packaging driver seam and driver errors
//! - [`error`] - Semantic error types for the build pipeline
//! - [`layout`] - Source tree scanning and file collection
//! - [`manifest`] - Manifest schema, parsing, and validation
//! - [`metadata`] - Core-metadata record rendering and parsing
//! - [`pipeline`] - Build orchestration
//! - [`report`] - Output formatting for `baler check`
//! - [`sdist`] - Source distribution driver
//! - [`wheel`] - Binary wheel driver

pub mod cli;
pub mod digest;
pub mod driver;
pub mod error;
pub mod layout;
pub mod manifest;
pub mod metadata;
pub mod pipeline;
pub mod report;
pub mod sdist;
pub mod wheel;
