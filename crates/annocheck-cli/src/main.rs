// SPDX-License-Identifier: Apache-2.0
// Copyright © 2025 Au-Zone Technologies. All Rights Reserved.

use annocheck::{
    Comparison, ComparisonTable, Error, Settings,
    coco::{CocoCheck, CocoReader, CocoSummary},
    compare_files,
    via::{ViaCheck, ViaReader, ViaSummary},
};
use clap::{Parser, Subcommand, ValueEnum};
use log::debug;
use std::{
    io::IsTerminal,
    path::{Path, PathBuf},
    process::ExitCode,
};

/// Returned by `compare --fail-on-mismatch` when any image is a mismatch or
/// deficit.
const EXIT_DISCREPANCY: u8 = 3;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Settings file (TOML), layered over the user settings file.
    #[clap(long, env = "ANNOCHECK_CONFIG")]
    config: Option<PathBuf>,

    /// Output format.
    #[clap(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Disable colored output.
    #[clap(long)]
    no_color: bool,

    /// Enable debug logging.
    #[clap(long, short)]
    verbose: bool,

    /// Command to run
    #[command(subcommand)]
    cmd: Command,
}

#[derive(ValueEnum, PartialEq, Eq, Clone, Copy, Debug)]
enum OutputFormat {
    /// Human readable text and tables.
    Text,
    /// Pretty-printed JSON.
    Json,
}

#[derive(Subcommand, PartialEq, Clone, Debug)]
enum Command {
    /// List the images of a COCO export without annotations and the
    /// annotation count of every image.
    CocoCheck {
        /// Path to the COCO JSON file
        coco_path: PathBuf,
    },
    /// List the file entries of a VIA project without regions and the region
    /// count of every entry.
    ViaCheck {
        /// Path to the VIA project JSON file
        via_path: PathBuf,
    },
    /// Compare the per-image annotation counts of a VIA project and a COCO
    /// export.  Images are joined on filename; rows are highlighted as zero
    /// (yellow), match (green), mismatch (red, VIA has more) or deficit
    /// (magenta, COCO has more).
    Compare {
        /// Path to the VIA project JSON file
        via_path: PathBuf,

        /// Path to the COCO JSON file
        coco_path: PathBuf,

        /// Fail on dangling references and duplicate filenames instead of
        /// skipping or warning.
        #[clap(long)]
        strict: bool,

        /// Text shown for images without a COCO id.
        #[clap(long)]
        placeholder: Option<String>,

        /// Exit with status 3 when any image counts differ.
        #[clap(long)]
        fail_on_mismatch: bool,
    },
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn handle_coco_check(coco_path: &Path, format: OutputFormat) -> Result<ExitCode, Error> {
    let dataset = CocoReader::new().read_json(coco_path)?;
    let check = CocoCheck::from_summary(&CocoSummary::from_dataset(&dataset));

    match format {
        OutputFormat::Text => print!("{}", check),
        OutputFormat::Json => print_json(&check)?,
    }
    Ok(ExitCode::SUCCESS)
}

fn handle_via_check(via_path: &Path, format: OutputFormat) -> Result<ExitCode, Error> {
    let dataset = ViaReader::new().read_json(via_path)?;
    let check = ViaCheck::from_summary(&dataset, &ViaSummary::from_dataset(&dataset));

    match format {
        OutputFormat::Text => print!("{}", check),
        OutputFormat::Json => print_json(&check)?,
    }
    Ok(ExitCode::SUCCESS)
}

fn print_comparison(comparison: &Comparison, settings: &Settings, color: bool) {
    let table = ComparisonTable::new(comparison)
        .with_placeholder(&settings.placeholder)
        .with_color(color);
    print!("{}", table);
    println!("{}", comparison.summary());
}

fn handle_compare(
    settings: &Settings,
    via_path: &Path,
    coco_path: &Path,
    fail_on_mismatch: bool,
    format: OutputFormat,
    color: bool,
) -> Result<ExitCode, Error> {
    debug!("Comparing {:?} with {:?}: {:?}", via_path, coco_path, settings);

    let comparison = compare_files(via_path, coco_path, settings)?;

    match format {
        OutputFormat::Text => print_comparison(&comparison, settings, color),
        OutputFormat::Json => print_json(&comparison)?,
    }

    if fail_on_mismatch && !comparison.is_consistent() {
        return Ok(ExitCode::from(EXIT_DISCREPANCY));
    }
    Ok(ExitCode::SUCCESS)
}

fn run(args: Args) -> Result<ExitCode, Error> {
    let color = !args.no_color && std::io::stdout().is_terminal();
    colored::control::set_override(color);

    match args.cmd {
        Command::CocoCheck { coco_path } => handle_coco_check(&coco_path, args.format),
        Command::ViaCheck { via_path } => handle_via_check(&via_path, args.format),
        Command::Compare {
            via_path,
            coco_path,
            strict,
            placeholder,
            fail_on_mismatch,
        } => {
            let mut settings = Settings::load(args.config.as_deref())?;
            if strict {
                settings = settings.strict();
            }
            if let Some(placeholder) = placeholder {
                settings.placeholder = placeholder;
            }
            handle_compare(
                &settings,
                &via_path,
                &coco_path,
                fail_on_mismatch,
                args.format,
                color,
            )
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    let level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match run(args) {
        Ok(code) => code,
        Err(err) => {
            debug!("{:?}", err);
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}
