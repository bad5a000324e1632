//! Baler CLI entrypoint.
//!
//! This binary validates a declarative package manifest and builds
//! distribution archives. Exit codes: 0 on success, 1 when the manifest is
//! rejected by validation, 2 on any other failure.

use baler::cli::{BuildArgs, CheckArgs, Cli, Command};
use baler::error::{BalerError, Result};
use baler::manifest::parser::load_manifest;
use baler::manifest::validation::validate;
use baler::pipeline;
use baler::report::{format_human, format_json};
use clap::Parser;
use std::io::Write;

fn main() {
    let cli = Cli::parse();
    let mut stdout = std::io::stdout();
    let mut stderr = std::io::stderr();
    let exit_code = match run(&cli, &mut stdout) {
        Ok(code) => code,
        Err(e) => report_failure(&e, &mut stderr),
    };
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

fn run(cli: &Cli, stdout: &mut dyn Write) -> Result<i32> {
    match &cli.command {
        Command::Build(args) => run_build(args, stdout),
        Command::Check(args) => run_check(args, stdout),
    }
}

fn run_build(args: &BuildArgs, stdout: &mut dyn Write) -> Result<i32> {
    let manifest = load_manifest(&args.manifest)?;
    let built = pipeline::build(
        &manifest,
        &args.source_dir,
        &args.out,
        &args.format.formats(),
    )?;
    for archive in &built {
        writeln!(stdout, "built {} ({})", archive.path, archive.format)
            .map_err(|source| BalerError::WriteFailed { source })?;
    }
    Ok(0)
}

fn run_check(args: &CheckArgs, stdout: &mut dyn Write) -> Result<i32> {
    let manifest = load_manifest(&args.manifest)?;
    let report = match validate(&manifest, &args.source_dir) {
        Ok(_) => baler::manifest::validation::ValidationReport::default(),
        Err(report) => report,
    };

    let output = if args.json {
        format_json(&report)
    } else {
        format_human(&report)
    };
    writeln!(stdout, "{output}").map_err(|source| BalerError::WriteFailed { source })?;

    Ok(i32::from(!report.is_empty()))
}

/// Write a failure to stderr and pick the exit code for it.
///
/// Manifest rejections (missing, malformed, or mistyped fields) exit with
/// 1; everything else exits with 2.
fn report_failure(error: &BalerError, stderr: &mut dyn Write) -> i32 {
    let _ = writeln!(stderr, "error: {error}");
    match error {
        BalerError::Validation { report } => {
            for violation in report.violations() {
                let _ = writeln!(stderr, "  {violation}");
            }
            1
        }
        BalerError::ManifestParse { .. } => 1,
        _ => 2,
    }
}
