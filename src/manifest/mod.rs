//! Manifest schema, field newtypes, parsing, and validation.
//!
//! The manifest is the declarative record describing a distributable
//! package: its name, version, descriptive metadata, module subtrees,
//! dependency specifiers, and entry points. This module implements the
//! type-safe domain model for that record, covering:
//!
//! - field-level newtypes that validate scalar values on construction;
//! - the declarative [`schema::Manifest`] as read from `baler.toml`;
//! - the [`schema::CheckedManifest`] the drivers consume;
//! - whole-manifest validation that collects every violation.
//!
//! # Sub-modules
//!
//! - [`error`] — Semantic error types for field validation failures.
//! - [`entry_point`] — Entry point parsing (`EntryPoint`, `ImportTarget`).
//! - [`package_name`] — Distribution name newtype (`PackageName`).
//! - [`parser`] — Manifest TOML deserialization.
//! - [`requirement`] — Dependency specifier newtype (`Requirement`).
//! - [`schema`] — Manifest schema types.
//! - [`validation`] — Whole-manifest validation and violation reporting.
//! - [`version_spec`] — Version string newtype (`VersionSpec`).

pub mod entry_point;
pub mod error;
pub mod package_name;
pub mod parser;
pub mod requirement;
pub mod schema;
pub mod validation;
pub mod version_spec;
