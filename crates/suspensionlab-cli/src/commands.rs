//! CLI command definitions for SuspensionLab
//!
//! Clap-based commands for validating setup files, converting them to and
//! from the wire format, and keeping a setup diary.

use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;

use suspensionlab_core::diary::SetupDiary;
use suspensionlab_core::validation::{Validator, WarningPolicy};

use crate::error::{CliError, Result};
use crate::loader;
use crate::output::{
    DecodedOutput, DiaryLogOutput, OutputFormat, Render, ReportOutput, WrittenOutput,
};
use crate::ExitCode;

/// SuspensionLab CLI
///
/// Validate mountain-bike setups, encode them for the telemetry pipeline and
/// keep a diary of what was ridden.
#[derive(Parser, Debug)]
#[command(name = "suspensionlab")]
#[command(about = "SuspensionLab - Validate, encode and track bike setups", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Output verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format selection
#[derive(Args, Debug, Clone, Copy)]
pub struct FormatArgs {
    /// Output format for results
    #[arg(long, value_enum, env = "SUSPENSIONLAB_FORMAT", default_value = "table")]
    pub format: OutputFormat,
}

/// Warning policy selection
#[derive(Args, Debug, Clone, Copy)]
pub struct PolicyArgs {
    /// Treat warnings as blocking
    #[arg(long, env = "SUSPENSIONLAB_STRICT")]
    pub strict: bool,
}

impl PolicyArgs {
    pub fn policy(self) -> WarningPolicy {
        if self.strict {
            WarningPolicy::Block
        } else {
            WarningPolicy::Allow
        }
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate a setup file
    ///
    /// Runs every domain rule and lists errors and warnings.
    Validate {
        /// Path to the setup file (json, yaml, yml or toml)
        #[arg(short, long)]
        setup: PathBuf,

        #[command(flatten)]
        output: FormatArgs,

        #[command(flatten)]
        policy: PolicyArgs,
    },

    /// Validate a setup file and write its wire encoding
    ///
    /// Nothing is written when the setup does not pass validation.
    Encode {
        /// Path to the setup file
        #[arg(short, long)]
        setup: PathBuf,

        /// Path of the wire file to write
        #[arg(short, long)]
        output: PathBuf,

        #[command(flatten)]
        policy: PolicyArgs,
    },

    /// Decode a wire file and print the setup
    Decode {
        /// Path to the wire file
        #[arg(short, long)]
        input: PathBuf,

        #[command(flatten)]
        output: FormatArgs,
    },

    /// Setup diary operations
    #[command(subcommand)]
    Diary(DiaryCommands),
}

/// Setup diary subcommands
#[derive(Subcommand, Debug)]
pub enum DiaryCommands {
    /// Validate a setup and append it to the diary
    Record {
        /// Path to the diary file; created when missing
        #[arg(short, long)]
        diary: PathBuf,

        /// Path to the setup file
        #[arg(short, long)]
        setup: PathBuf,

        /// Free-text note, e.g. the trail or conditions
        #[arg(short, long)]
        note: Option<String>,

        #[command(flatten)]
        policy: PolicyArgs,
    },

    /// List diary entries with their changes
    Log {
        /// Path to the diary file
        #[arg(short, long)]
        diary: PathBuf,

        #[command(flatten)]
        output: FormatArgs,
    },
}

/// Execute the validate command
pub fn execute_validate(
    setup: &Path,
    format: OutputFormat,
    policy: WarningPolicy,
    quiet: bool,
) -> Result<ExitCode> {
    let setup = loader::read_setup(setup)?;
    let report = Validator::new().validate_setup(&setup);

    if !quiet {
        ReportOutput::from_report(&report, policy).render(format)?;
    }

    Ok(ExitCode::from_report(&report, policy))
}

/// Execute the encode command
pub fn execute_encode(
    setup_path: &Path,
    output: &Path,
    policy: WarningPolicy,
    quiet: bool,
) -> Result<ExitCode> {
    let setup = loader::read_setup(setup_path)?;
    let warnings = Validator::new()
        .validate_setup(&setup)
        .into_result(policy)?;

    let bytes = loader::write_wire(output, &setup)?;
    info!(path = %output.display(), bytes, "wire file written");

    if !quiet {
        WrittenOutput {
            path: output.display().to_string(),
            bytes,
            warning_count: warnings.len(),
        }
        .render(OutputFormat::Table)?;
    }

    Ok(ExitCode::Success)
}

/// Execute the decode command
pub fn execute_decode(input: &Path, format: OutputFormat, quiet: bool) -> Result<ExitCode> {
    let setup = loader::read_wire(input)?;
    if !quiet {
        DecodedOutput::new(setup).render(format)?;
    }
    Ok(ExitCode::Success)
}

/// Execute the diary record command
pub fn execute_diary_record(
    diary_path: &Path,
    setup_path: &Path,
    note: Option<String>,
    policy: WarningPolicy,
    quiet: bool,
) -> Result<ExitCode> {
    let setup = loader::read_setup(setup_path)?;
    let mut diary = SetupDiary::load(diary_path)?;

    let entry = diary.record(setup, note, policy)?;
    let id = entry.id;
    let warning_count = entry.warnings.len();
    diary.save(diary_path)?;

    if !quiet {
        println!("Recorded entry {} ({} in diary)", id, diary.len());
        if warning_count > 0 {
            println!("{} warning(s) accepted with this setup", warning_count);
        }
    }

    Ok(ExitCode::Success)
}

/// Execute the diary log command
pub fn execute_diary_log(diary_path: &Path, format: OutputFormat) -> Result<ExitCode> {
    if !diary_path.exists() {
        return Err(CliError::file_error(format!(
            "Diary file '{}' does not exist",
            diary_path.display()
        )));
    }
    let diary = SetupDiary::load(diary_path)?;
    DiaryLogOutput::from_diary(&diary)?.render(format)?;
    Ok(ExitCode::Success)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_validate() {
        let cli = Cli::parse_from([
            "suspensionlab",
            "validate",
            "--setup",
            "bike.yaml",
            "--format",
            "json",
            "--strict",
        ]);
        match cli.command {
            Commands::Validate {
                setup,
                output,
                policy,
            } => {
                assert_eq!(setup, PathBuf::from("bike.yaml"));
                assert_eq!(output.format, OutputFormat::Json);
                assert_eq!(policy.policy(), WarningPolicy::Block);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_diary_record() {
        let cli = Cli::parse_from([
            "suspensionlab",
            "-vv",
            "diary",
            "record",
            "--diary",
            "diary.json",
            "--setup",
            "bike.toml",
            "--note",
            "wet roots",
        ]);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Diary(DiaryCommands::Record { note, policy, .. }) => {
                assert_eq!(note.as_deref(), Some("wet roots"));
                assert_eq!(policy.policy(), WarningPolicy::Allow);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
