//! CLI argument definitions for baler.
//!
//! This module defines the command-line interface using clap. It is
//! separated from the main entrypoint to keep the binary small and focused
//! on orchestration.

use crate::driver::ArchiveFormat;
use camino::Utf8PathBuf;
use clap::{Parser, Subcommand, ValueEnum};

/// Build distribution archives from a declarative package manifest.
#[derive(Parser, Debug)]
#[command(name = "baler")]
#[command(version, about)]
#[command(long_about = concat!(
    "Build distribution archives from a declarative package manifest.\n\n",
    "Baler reads a baler.toml manifest describing a Python package (name, ",
    "version, packages, dependencies, entry points) and produces a source ",
    "distribution (.tar.gz), a binary wheel (.whl), or both. The manifest is ",
    "validated against the source tree first; a rejected manifest produces ",
    "no archive.\n\n",
    "Archives are deterministic: rebuilding an unchanged tree yields ",
    "byte-identical output.",
))]
#[command(after_help = concat!(
    "EXAMPLES:\n",
    "  Build both archive formats into ./dist:\n",
    "    $ baler build\n\n",
    "  Build only the source distribution:\n",
    "    $ baler build --format sdist\n\n",
    "  Validate a manifest without building:\n",
    "    $ baler check\n\n",
    "  Machine-readable validation report:\n",
    "    $ baler check --json\n",
))]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Validate the manifest and build distribution archives.
    Build(BuildArgs),

    /// Validate the manifest and report every violation.
    Check(CheckArgs),
}

/// Arguments for the build command.
#[derive(Parser, Debug, Clone)]
pub struct BuildArgs {
    /// Path to the manifest file.
    #[arg(short, long, value_name = "PATH", default_value = "baler.toml")]
    pub manifest: Utf8PathBuf,

    /// Source tree root the manifest's packages resolve against.
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub source_dir: Utf8PathBuf,

    /// Directory the archives are written to.
    #[arg(short, long, value_name = "DIR", default_value = "dist")]
    pub out: Utf8PathBuf,

    /// Archive format to produce.
    #[arg(short, long, value_enum, value_name = "FORMAT", default_value = "all")]
    pub format: FormatSelection,
}

/// Arguments for the check command.
#[derive(Parser, Debug, Clone)]
pub struct CheckArgs {
    /// Path to the manifest file.
    #[arg(short, long, value_name = "PATH", default_value = "baler.toml")]
    pub manifest: Utf8PathBuf,

    /// Source tree root the manifest's packages resolve against.
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub source_dir: Utf8PathBuf,

    /// Emit the validation report as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Which archive formats a build run produces.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatSelection {
    /// Source distribution only.
    Sdist,
    /// Binary wheel only.
    Wheel,
    /// Both formats.
    All,
}

impl FormatSelection {
    /// Expand the selection into the driver formats to run, in order.
    #[must_use]
    pub fn formats(self) -> Vec<ArchiveFormat> {
        match self {
            Self::Sdist => vec![ArchiveFormat::Sdist],
            Self::Wheel => vec![ArchiveFormat::Wheel],
            Self::All => vec![ArchiveFormat::Sdist, ArchiveFormat::Wheel],
        }
    }
}
