//! Output formatting for the SuspensionLab CLI
//!
//! Renders validation reports, decoded setups and diary history as JSON,
//! YAML or a colored human-readable table.

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::io::{self, Write};
use uuid::Uuid;

use suspensionlab_core::diary::{FieldChange, SetupDiary};
use suspensionlab_core::schema::{CaptureSetup, SuspensionSetup, TireSetup};
use suspensionlab_core::validation::{
    Rejected, Severity, ValidationFinding, ValidationReport, WarningPolicy,
};

use crate::error::{CliError, Result};

/// Output format options for CLI results
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Default)]
pub enum OutputFormat {
    /// Human-readable table format with colors
    #[default]
    Table,
    /// JSON format for machine processing
    Json,
    /// YAML format
    Yaml,
}

/// Anything the CLI prints
pub trait Render: Serialize {
    /// Write the table form
    fn write_table(&self, out: &mut dyn Write) -> io::Result<()>;

    /// Write in the given format
    fn render_to(&self, format: OutputFormat, out: &mut dyn Write) -> Result<()> {
        let written = match format {
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(self)?;
                writeln!(out, "{}", json)
            }
            OutputFormat::Yaml => {
                let yaml = serde_yaml::to_string(self)?;
                write!(out, "{}", yaml)
            }
            OutputFormat::Table => self.write_table(out),
        };
        written
            .and_then(|_| out.flush())
            .map_err(|e| CliError::file_error(format!("Failed to write output: {}", e)))
    }

    /// Write to stdout in the given format
    fn render(&self, format: OutputFormat) -> Result<()> {
        let stdout = io::stdout();
        let mut lock = stdout.lock();
        self.render_to(format, &mut lock)
    }
}

// ============================================================================
// Validation report
// ============================================================================

/// Validation output structure for rendering
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportOutput {
    /// Whether the setup may be stored under the active policy
    pub accepted: bool,
    pub policy: WarningPolicy,
    pub error_count: usize,
    pub warning_count: usize,
    pub errors: Vec<FindingOutput>,
    pub warnings: Vec<FindingOutput>,
    pub summary: String,
}

/// Individual finding output structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FindingOutput {
    pub severity: Severity,
    /// Rule identifier
    pub rule: String,
    pub message: String,
    /// Path in the setup where the finding occurred
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl ReportOutput {
    pub fn from_report(report: &ValidationReport, policy: WarningPolicy) -> Self {
        Self::build(&report.errors, &report.warnings, report.passes(policy), policy)
    }

    /// Output for a setup that was rejected before storage
    pub fn from_rejected(rejected: &Rejected) -> Self {
        Self::build(&rejected.errors, &rejected.warnings, false, rejected.policy)
    }

    fn build(
        errors: &[ValidationFinding],
        warnings: &[ValidationFinding],
        accepted: bool,
        policy: WarningPolicy,
    ) -> Self {
        let error_count = errors.len();
        let warning_count = warnings.len();

        let summary = if error_count == 0 && warning_count == 0 {
            "Setup is valid".to_string()
        } else if error_count == 0 && accepted {
            format!("Setup is valid with {} warning(s)", warning_count)
        } else if error_count == 0 {
            format!(
                "Setup rejected: {} warning(s) under strict policy",
                warning_count
            )
        } else {
            format!(
                "Setup has {} error(s) and {} warning(s)",
                error_count, warning_count
            )
        };

        Self {
            accepted,
            policy,
            error_count,
            warning_count,
            errors: errors.iter().map(FindingOutput::from_finding).collect(),
            warnings: warnings.iter().map(FindingOutput::from_finding).collect(),
            summary,
        }
    }
}

impl Render for ReportOutput {
    fn write_table(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out)?;
        writeln!(out, "{}", "Validation Results".cyan().bold())?;
        writeln!(out, "{}", "=".repeat(60))?;
        writeln!(out)?;

        let status = if self.accepted { "+".green() } else { "x".red() };
        writeln!(out, "{} {}", status, self.summary)?;

        if self.error_count > 0 || self.warning_count > 0 {
            writeln!(out)?;
            writeln!(out, "{}", "Statistics:".cyan().bold())?;
            if self.error_count > 0 {
                writeln!(
                    out,
                    "  {} Errors:   {}",
                    "x".red(),
                    self.error_count.to_string().red()
                )?;
            }
            if self.warning_count > 0 {
                writeln!(
                    out,
                    "  {} Warnings: {}",
                    "!".yellow(),
                    self.warning_count.to_string().yellow()
                )?;
            }
            writeln!(out)?;
            writeln!(out, "{}", "Findings:".cyan().bold())?;
            writeln!(out, "{}", "-".repeat(60))?;
            for finding in self.errors.iter().chain(&self.warnings) {
                finding.write_row(out)?;
            }
        }
        Ok(())
    }
}

impl FindingOutput {
    pub fn from_finding(finding: &ValidationFinding) -> Self {
        Self {
            severity: finding.severity,
            rule: finding.rule.to_string(),
            message: finding.message.clone(),
            path: finding.field_path.clone(),
            expected: finding.expected.clone(),
            actual: finding.actual.clone(),
            suggestion: finding.suggestion.clone(),
        }
    }

    fn write_row(&self, out: &mut dyn Write) -> io::Result<()> {
        let (icon, label) = match self.severity {
            Severity::Error => ("x".red(), "ERROR".red().bold()),
            Severity::Warning => ("!".yellow(), "WARNING".yellow().bold()),
        };

        writeln!(out)?;
        writeln!(
            out,
            "{} [{}] {} {}",
            icon,
            self.rule.dimmed(),
            label,
            self.message
        )?;
        writeln!(out, "  {} {}", "Path:".dimmed(), self.path.cyan())?;
        if let (Some(expected), Some(actual)) = (&self.expected, &self.actual) {
            writeln!(
                out,
                "  {} {} (got {})",
                "Expected:".dimmed(),
                expected,
                actual
            )?;
        } else if let Some(expected) = &self.expected {
            writeln!(out, "  {} {}", "Expected:".dimmed(), expected)?;
        }
        if let Some(suggestion) = &self.suggestion {
            writeln!(out, "  {} {}", "Fix:".dimmed(), suggestion.green())?;
        }
        Ok(())
    }
}

// ============================================================================
// Decoded wire file
// ============================================================================

/// A decoded wire file
#[derive(Debug, Clone, Serialize)]
pub struct DecodedOutput {
    pub setup: CaptureSetup,
    /// Fields written by a newer schema and carried through unchanged
    pub unknown_fields: usize,
}

impl DecodedOutput {
    pub fn new(setup: CaptureSetup) -> Self {
        let unknown_fields = setup.unknown_field_count();
        Self {
            setup,
            unknown_fields,
        }
    }
}

fn write_suspension(out: &mut dyn Write, label: &str, s: &SuspensionSetup) -> io::Result<()> {
    writeln!(
        out,
        "  {:<10} {} {} mm, {}{}, sag {}%, hsc {} / lsc {} / rebound {}{}",
        format!("{}:", label).dimmed(),
        s.model,
        s.travel,
        s.spring,
        if s.pressure > 0 {
            format!(" {} psi", s.pressure)
        } else {
            String::new()
        },
        s.sag,
        s.hsc,
        s.lsc,
        s.rebound,
        if s.tokens > 0 {
            format!(", {} token(s)", s.tokens)
        } else {
            String::new()
        }
    )
}

fn write_tire(out: &mut dyn Write, label: &str, t: &TireSetup) -> io::Result<()> {
    writeln!(
        out,
        "  {:<10} {} ({}) {} {}",
        format!("{}:", label).dimmed(),
        t.model,
        t.setup_type,
        t.pressure,
        t.pressure_unit
    )
}

impl Render for DecodedOutput {
    fn write_table(&self, out: &mut dyn Write) -> io::Result<()> {
        let bike = &self.setup.bike;
        let session = &self.setup.session;

        writeln!(out)?;
        writeln!(out, "{}", "Decoded Setup".cyan().bold())?;
        writeln!(out, "{}", "=".repeat(60))?;
        writeln!(
            out,
            "  {:<10} {}",
            "Geometry:".dimmed(),
            bike.geometry.kind().to_string().bold()
        )?;
        if let Some(fork) = bike.geometry.fork() {
            write_suspension(out, "Fork", fork)?;
        }
        if let Some(shock) = bike.geometry.shock() {
            write_suspension(out, "Shock", shock)?;
        }
        writeln!(
            out,
            "  {:<10} {} ({})",
            "Wheels:".dimmed(),
            bike.wheels.rims,
            bike.wheels.material
        )?;
        write_tire(out, "Front", &bike.front_tire)?;
        write_tire(out, "Rear", &bike.rear_tire)?;
        writeln!(
            out,
            "  {:<10} {} sensor(s) at {} Hz",
            "Hardware:".dimmed(),
            bike.hardware.expected_sensors,
            bike.hardware.recording_freq
        )?;
        writeln!(
            out,
            "  {:<10} {} sensor(s) at {} Hz",
            "Session:".dimmed(),
            session.sensor_count,
            session.sample_rate
        )?;
        if self.unknown_fields > 0 {
            writeln!(out)?;
            writeln!(
                out,
                "{} {} unknown field(s) preserved",
                "i".blue(),
                self.unknown_fields
            )?;
        }
        Ok(())
    }
}

// ============================================================================
// Diary
// ============================================================================

/// Diary history for rendering
#[derive(Debug, Clone, Serialize)]
pub struct DiaryLogOutput {
    pub entries: Vec<EntryOutput>,
}

/// One diary entry with its changes from the previous entry
#[derive(Debug, Clone, Serialize)]
pub struct EntryOutput {
    pub id: Uuid,
    pub recorded_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub geometry: String,
    pub warning_count: usize,
    pub changes: Vec<FieldChange>,
}

impl DiaryLogOutput {
    pub fn from_diary(diary: &SetupDiary) -> Result<Self> {
        let entries = diary
            .timeline()?
            .into_iter()
            .map(|(entry, changes)| EntryOutput {
                id: entry.id,
                recorded_at: entry.recorded_at,
                note: entry.note.clone(),
                geometry: entry.setup.bike.geometry.kind().to_string(),
                warning_count: entry.warnings.len(),
                changes,
            })
            .collect();
        Ok(Self { entries })
    }
}

fn display_value(value: &Option<serde_json::Value>) -> String {
    match value {
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => "-".to_string(),
    }
}

impl Render for DiaryLogOutput {
    fn write_table(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out)?;
        writeln!(out, "{}", "Setup Diary".cyan().bold())?;
        writeln!(out, "{}", "=".repeat(60))?;

        if self.entries.is_empty() {
            writeln!(out, "No entries recorded")?;
            return Ok(());
        }

        for entry in &self.entries {
            writeln!(out)?;
            writeln!(
                out,
                "{} {} {}",
                entry.recorded_at.format("%Y-%m-%d %H:%M").to_string().bold(),
                entry.geometry,
                entry.id.to_string().dimmed()
            )?;
            if let Some(note) = &entry.note {
                writeln!(out, "  {}", note.italic())?;
            }
            if entry.warning_count > 0 {
                writeln!(
                    out,
                    "  {} {} warning(s) at record time",
                    "!".yellow(),
                    entry.warning_count
                )?;
            }
            for change in &entry.changes {
                writeln!(
                    out,
                    "  {} {}: {} -> {}",
                    "~".blue(),
                    change.path,
                    display_value(&change.before),
                    display_value(&change.after)
                )?;
            }
        }
        Ok(())
    }
}

/// Confirmation printed after a successful write
#[derive(Debug, Clone, Serialize)]
pub struct WrittenOutput {
    pub path: String,
    pub bytes: usize,
    pub warning_count: usize,
}

impl Render for WrittenOutput {
    fn write_table(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(
            out,
            "{} Wrote {} bytes to {}",
            "+".green(),
            self.bytes,
            self.path.cyan()
        )?;
        if self.warning_count > 0 {
            writeln!(
                out,
                "  {} {} warning(s); run validate for details",
                "!".yellow(),
                self.warning_count
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use suspensionlab_core::validation::RuleId;

    fn render_string(value: &impl Render, format: OutputFormat) -> String {
        let mut buf = Vec::new();
        value.render_to(format, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn warning_report() -> ValidationReport {
        ValidationReport::from_findings(vec![ValidationFinding::warning(
            RuleId::SagBand,
            "geometry.hardtail.fork.sag",
            "Sag 28% is outside the 15-20% band",
        )
        .with_expected("15-20%")
        .with_actual("28%")])
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
    fn test_write_failure_is_reported() {
        let output = ReportOutput::from_report(&warning_report(), WarningPolicy::Allow);
        for format in [OutputFormat::Table, OutputFormat::Json, OutputFormat::Yaml] {
            let err = output.render_to(format, &mut BrokenPipe).unwrap_err();
            assert!(matches!(err, CliError::FileError(_)));
        }
    }

    #[test]
    fn test_summary_depends_on_policy() {
        let report = warning_report();
        let allow = ReportOutput::from_report(&report, WarningPolicy::Allow);
        assert!(allow.accepted);
        assert_eq!(allow.summary, "Setup is valid with 1 warning(s)");

        let block = ReportOutput::from_report(&report, WarningPolicy::Block);
        assert!(!block.accepted);
        assert!(block.summary.contains("strict"));
    }

    #[test]
    fn test_report_json() {
        let output = ReportOutput::from_report(&warning_report(), WarningPolicy::Allow);
        let json: serde_json::Value =
            serde_json::from_str(&render_string(&output, OutputFormat::Json)).unwrap();
        assert_eq!(json["warning_count"], 1);
        assert_eq!(json["warnings"][0]["rule"], "sag_band");
        assert_eq!(json["warnings"][0]["severity"], "warning");
        assert_eq!(json["policy"], "allow");
    }

    #[test]
    fn test_report_table_lists_findings() {
        let output = ReportOutput::from_report(&warning_report(), WarningPolicy::Allow);
        let table = render_string(&output, OutputFormat::Table);
        assert!(table.contains("Validation Results"));
        assert!(table.contains("geometry.hardtail.fork.sag"));
        assert!(table.contains("28%"));
    }

    #[test]
    fn test_empty_diary_table() {
        let output = DiaryLogOutput::from_diary(&SetupDiary::new()).unwrap();
        assert!(render_string(&output, OutputFormat::Table).contains("No entries recorded"));
    }

    #[test]
    fn test_display_value() {
        assert_eq!(display_value(&Some(serde_json::json!("bar"))), "bar");
        assert_eq!(display_value(&Some(serde_json::json!(1.5))), "1.5");
        assert_eq!(display_value(&None), "-");
    }
}
