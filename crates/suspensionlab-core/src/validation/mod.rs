//! Domain validation for bike setups
//!
//! The [`Validator`] runs every registered [`ValidationRule`] against a
//! [`BikeConfiguration`] and its capture [`Config`], collecting all findings
//! rather than stopping at the first. Findings come in two severities that are
//! kept in separate channels of the [`ValidationReport`]:
//!
//! - **errors** mark data-entry faults and block persistence
//! - **warnings** mark deviations from documented tuning guidance; the caller
//!   decides through a [`WarningPolicy`] whether they block
//!
//! Validation is pure: inputs are borrowed immutably and nothing is cached.

pub mod rules;

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use tracing::{debug, info};

use crate::schema::{BikeConfiguration, CaptureSetup, Config};

pub use rules::{builtin_rules, Discipline, RuleInput};

/// Severity levels for validation findings
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Deviation from guidance, not blocking by default
    Warning,
    /// Fault that must be fixed before the setup is stored
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// Identifier of the rule that produced a finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleId {
    GeometryConsistency,
    SagBand,
    SpringConsistency,
    ClickRange,
    TirePressureUnit,
    TirePressureBounds,
    TirePressureBalance,
    HardwareSampleRate,
    CaptureProfile,
}

impl RuleId {
    pub fn as_str(self) -> &'static str {
        match self {
            RuleId::GeometryConsistency => "geometry_consistency",
            RuleId::SagBand => "sag_band",
            RuleId::SpringConsistency => "spring_consistency",
            RuleId::ClickRange => "click_range",
            RuleId::TirePressureUnit => "tire_pressure_unit",
            RuleId::TirePressureBounds => "tire_pressure_bounds",
            RuleId::TirePressureBalance => "tire_pressure_balance",
            RuleId::HardwareSampleRate => "hardware_sample_rate",
            RuleId::CaptureProfile => "capture_profile",
        }
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single rule violation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationFinding {
    /// Rule that generated this finding
    pub rule: RuleId,
    /// Severity of the finding
    pub severity: Severity,
    /// Dotted path to the offending field (e.g. "rear_tire.pressure")
    pub field_path: String,
    /// Human-readable message
    pub message: String,
    /// Expected value or range
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected: Option<String>,
    /// Actual value found
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual: Option<String>,
    /// Suggested fix
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl ValidationFinding {
    /// Create a new error finding
    pub fn error(rule: RuleId, field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(rule, Severity::Error, field_path, message)
    }

    /// Create a new warning finding
    pub fn warning(
        rule: RuleId,
        field_path: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(rule, Severity::Warning, field_path, message)
    }

    fn new(
        rule: RuleId,
        severity: Severity,
        field_path: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            rule,
            severity,
            field_path: field_path.into(),
            message: message.into(),
            expected: None,
            actual: None,
            suggestion: None,
        }
    }

    pub fn with_expected(mut self, expected: impl Into<String>) -> Self {
        self.expected = Some(expected.into());
        self
    }

    pub fn with_actual(mut self, actual: impl Into<String>) -> Self {
        self.actual = Some(actual.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    pub fn is_blocking(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for ValidationFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} at '{}': {}",
            self.severity, self.rule, self.field_path, self.message
        )
    }
}

/// Whether warnings stop a setup from being persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WarningPolicy {
    /// Warnings are informational
    #[default]
    Allow,
    /// Warnings are treated like errors
    Block,
}

/// Outcome of validating one setup, split by severity
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub errors: Vec<ValidationFinding>,
    pub warnings: Vec<ValidationFinding>,
}

impl ValidationReport {
    /// Build a report from findings in any order
    pub fn from_findings(findings: Vec<ValidationFinding>) -> Self {
        let (errors, warnings): (Vec<_>, Vec<_>) =
            findings.into_iter().partition(|f| f.is_blocking());
        Self { errors, warnings }
    }

    /// True when no error-level finding exists
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Whether the setup may be persisted under `policy`
    pub fn passes(&self, policy: WarningPolicy) -> bool {
        match policy {
            WarningPolicy::Allow => self.is_valid(),
            WarningPolicy::Block => self.is_valid() && !self.has_warnings(),
        }
    }

    /// All findings, errors first
    pub fn findings(&self) -> impl Iterator<Item = &ValidationFinding> {
        self.errors.iter().chain(self.warnings.iter())
    }

    /// Findings produced by one rule
    pub fn by_rule(&self, rule: RuleId) -> Vec<&ValidationFinding> {
        self.findings().filter(|f| f.rule == rule).collect()
    }

    /// Accept the setup (returning its warnings) or reject it
    pub fn into_result(self, policy: WarningPolicy) -> Result<Vec<ValidationFinding>, Rejected> {
        if self.passes(policy) {
            Ok(self.warnings)
        } else {
            Err(Rejected {
                errors: self.errors,
                warnings: self.warnings,
                policy,
            })
        }
    }
}

/// A setup that did not pass validation
#[derive(Error, Debug, Clone, PartialEq)]
#[error(
    "setup rejected with {} error(s) and {} warning(s)",
    .errors.len(),
    .warnings.len()
)]
pub struct Rejected {
    pub errors: Vec<ValidationFinding>,
    pub warnings: Vec<ValidationFinding>,
    pub policy: WarningPolicy,
}

/// Trait for validation rules
///
/// Rules are deterministic and side-effect free. A rule may push any number
/// of findings; it must never panic on a structurally valid setup.
pub trait ValidationRule: Send + Sync {
    /// Identifier stamped on findings
    fn id(&self) -> RuleId;

    /// Short description of what the rule checks
    fn description(&self) -> &'static str;

    /// Apply this rule
    fn evaluate(&self, input: &RuleInput<'_>, findings: &mut Vec<ValidationFinding>);
}

/// Main validator for bike setups
pub struct Validator {
    rules: Vec<Box<dyn ValidationRule>>,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator {
    /// Create a validator with the built-in rule set
    pub fn new() -> Self {
        Self {
            rules: builtin_rules(),
        }
    }

    /// Create a validator with no rules registered
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Register an additional rule
    pub fn with_rule(mut self, rule: Box<dyn ValidationRule>) -> Self {
        self.rules.push(rule);
        self
    }

    /// Identifiers of the registered rules, in evaluation order
    pub fn rule_ids(&self) -> Vec<RuleId> {
        self.rules.iter().map(|r| r.id()).collect()
    }

    /// Validate a bike against the session it will be ridden in
    pub fn validate(&self, bike: &BikeConfiguration, session: &Config) -> ValidationReport {
        let input = RuleInput { bike, session };
        let mut findings = Vec::new();

        for rule in &self.rules {
            let before = findings.len();
            rule.evaluate(&input, &mut findings);
            debug!(
                rule = %rule.id(),
                findings = findings.len() - before,
                "rule evaluated"
            );
        }

        let report = ValidationReport::from_findings(findings);
        info!(
            geometry = %bike.geometry.kind(),
            errors = report.errors.len(),
            warnings = report.warnings.len(),
            "setup validated"
        );
        report
    }

    /// Validate a session/bike pairing
    pub fn validate_setup(&self, setup: &CaptureSetup) -> ValidationReport {
        self.validate(&setup.bike, &setup.session)
    }
}

/// Validate with the built-in rules, accepting warnings.
///
/// Returns the warnings on success, or every error and warning on rejection.
pub fn validate(
    bike: &BikeConfiguration,
    session: &Config,
) -> Result<Vec<ValidationFinding>, Rejected> {
    Validator::new()
        .validate(bike, session)
        .into_result(WarningPolicy::Allow)
}
