//! SuspensionLab CLI
//!
//! Command-line producer and consumer of bike setups: loads human-written
//! setup files, validates them, converts them to and from the wire format
//! and keeps a setup diary.
//!
//! ## CLI Usage
//!
//! ```bash
//! # Validate a setup file
//! suspensionlab validate --setup bike.yaml --format json
//!
//! # Encode for the telemetry pipeline, refusing on warnings
//! suspensionlab encode --setup bike.yaml --output bike.bin --strict
//!
//! # Inspect a wire file
//! suspensionlab decode --input bike.bin
//!
//! # Keep a diary
//! suspensionlab diary record --diary diary.json --setup bike.yaml --note "dry, fast"
//! suspensionlab diary log --diary diary.json
//! ```
//!
//! ## Exit Codes
//!
//! - 0: Success
//! - 1: Validation failed with errors, or warnings under `--strict`
//! - 2: Validation passed with warnings
//! - 3: Invalid input or arguments
//! - 4: File not found or inaccessible
//! - 5: Wire file could not be decoded
//! - 10: Internal error

pub mod commands;
pub mod error;
pub mod loader;
pub mod output;

pub use commands::{Cli, Commands, DiaryCommands};
pub use error::CliError;
pub use output::OutputFormat;

use std::io::{self, Write};

use suspensionlab_core::validation::{Rejected, ValidationReport, WarningPolicy};
use tracing::warn;

use output::{Render, ReportOutput};

/// Exit codes for CLI operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Successful execution
    Success = 0,
    /// Validation failed with errors
    ValidationError = 1,
    /// Validation passed with warnings
    ValidationWarning = 2,
    /// Invalid input or arguments
    InvalidInput = 3,
    /// File not found or inaccessible
    FileError = 4,
    /// Wire decoding failed
    DecodeError = 5,
    /// Internal error
    InternalError = 10,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}

impl ExitCode {
    /// Determine exit code from validation result
    pub fn from_validation_result(has_errors: bool, has_warnings: bool) -> Self {
        if has_errors {
            ExitCode::ValidationError
        } else if has_warnings {
            ExitCode::ValidationWarning
        } else {
            ExitCode::Success
        }
    }

    /// Exit code for a report under a warning policy
    pub fn from_report(report: &ValidationReport, policy: WarningPolicy) -> Self {
        if !report.passes(policy) {
            ExitCode::ValidationError
        } else {
            Self::from_validation_result(false, report.has_warnings())
        }
    }

    /// Exit code for a failed command
    pub fn from_error(err: &CliError) -> Self {
        match err {
            CliError::InvalidInput(_) | CliError::ParseError(_) => ExitCode::InvalidInput,
            CliError::FileError(_) => ExitCode::FileError,
            CliError::Decode(_) => ExitCode::DecodeError,
            CliError::Rejected(_) => ExitCode::ValidationError,
            CliError::SerializationError(_) => ExitCode::InternalError,
        }
    }
}

/// Run the CLI with the given arguments and return the exit code
pub fn run(cli: Cli) -> Result<ExitCode, CliError> {
    let quiet = cli.quiet;
    match cli.command {
        Commands::Validate {
            setup,
            output,
            policy,
        } => commands::execute_validate(&setup, output.format, policy.policy(), quiet),
        Commands::Encode {
            setup,
            output,
            policy,
        } => commands::execute_encode(&setup, &output, policy.policy(), quiet),
        Commands::Decode { input, output } => {
            commands::execute_decode(&input, output.format, quiet)
        }
        Commands::Diary(DiaryCommands::Record {
            diary,
            setup,
            note,
            policy,
        }) => commands::execute_diary_record(&diary, &setup, note, policy.policy(), quiet),
        Commands::Diary(DiaryCommands::Log { diary, output }) => {
            commands::execute_diary_log(&diary, output.format)
        }
    }
}

/// Run the CLI, reporting any error on stderr
///
/// # Example
///
/// ```rust,no_run
/// use clap::Parser;
/// use suspensionlab_cli::{run_cli, Cli};
///
/// fn main() {
///     let cli = Cli::parse();
///     let exit_code = run_cli(cli);
///     std::process::exit(exit_code.into());
/// }
/// ```
pub fn run_cli(cli: Cli) -> ExitCode {
    let quiet = cli.quiet;
    match run(cli) {
        Ok(code) => code,
        Err(CliError::Rejected(rejected)) => {
            if !quiet {
                print_rejection(&rejected, &mut io::stdout().lock());
            }
            eprintln!("Error: {}", rejected);
            ExitCode::ValidationError
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            if e.is_user_error() {
                ExitCode::from_error(&e)
            } else {
                ExitCode::InternalError
            }
        }
    }
}

/// Print the report of a rejected setup. A failed write is logged.
fn print_rejection(rejected: &Rejected, out: &mut dyn Write) {
    let report = ReportOutput::from_rejected(rejected);
    if let Err(e) = report.render_to(OutputFormat::Table, out) {
        warn!(error = %e, "failed to print validation report");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use suspensionlab_core::codec::DecodeError;
    use suspensionlab_core::validation::{RuleId, ValidationFinding};

    #[test]
    fn test_exit_code_conversion() {
        assert_eq!(i32::from(ExitCode::Success), 0);
        assert_eq!(i32::from(ExitCode::ValidationError), 1);
        assert_eq!(i32::from(ExitCode::ValidationWarning), 2);
        assert_eq!(i32::from(ExitCode::DecodeError), 5);
        assert_eq!(i32::from(ExitCode::InternalError), 10);
    }

    #[test]
    fn test_exit_code_from_validation_result() {
        assert_eq!(
            ExitCode::from_validation_result(false, false),
            ExitCode::Success
        );
        assert_eq!(
            ExitCode::from_validation_result(true, false),
            ExitCode::ValidationError
        );
        assert_eq!(
            ExitCode::from_validation_result(false, true),
            ExitCode::ValidationWarning
        );
        assert_eq!(
            ExitCode::from_validation_result(true, true),
            ExitCode::ValidationError
        );
    }

    #[test]
    fn test_exit_code_from_report() {
        let report = ValidationReport::from_findings(vec![ValidationFinding::warning(
            RuleId::TirePressureBalance,
            "rear_tire.pressure",
            "rear below front",
        )]);
        assert_eq!(
            ExitCode::from_report(&report, WarningPolicy::Allow),
            ExitCode::ValidationWarning
        );
        assert_eq!(
            ExitCode::from_report(&report, WarningPolicy::Block),
            ExitCode::ValidationError
        );
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_print_rejection() {
        let rejected = Rejected {
            errors: vec![ValidationFinding::error(
                RuleId::HardwareSampleRate,
                "hardware.recording_freq",
                "recording below sample rate",
            )],
            warnings: Vec::new(),
            policy: WarningPolicy::Allow,
        };

        let mut buf = Vec::new();
        print_rejection(&rejected, &mut buf);
        assert!(String::from_utf8(buf).unwrap().contains("hardware.recording_freq"));

        // A closed stdout is logged rather than aborting the run
        print_rejection(&rejected, &mut BrokenPipe);
    }

    #[test]
    fn test_exit_code_from_error() {
        assert_eq!(
            ExitCode::from_error(&CliError::file_error("gone")),
            ExitCode::FileError
        );
        assert_eq!(
            ExitCode::from_error(&CliError::parse_error("bad yaml")),
            ExitCode::InvalidInput
        );
        assert_eq!(
            ExitCode::from_error(&CliError::Decode(DecodeError::VarintOverflow)),
            ExitCode::DecodeError
        );
    }
}
