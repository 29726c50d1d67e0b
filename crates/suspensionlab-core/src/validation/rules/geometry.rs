//! Geometry/suspension consistency
//!
//! The geometry sum type already guarantees which setups exist; this rule
//! checks that every setup that exists is usable.

use crate::schema::SuspensionSetup;
use crate::validation::{RuleId, ValidationFinding, ValidationRule};

use super::RuleInput;

pub struct GeometryConsistencyRule;

impl GeometryConsistencyRule {
    fn check_setup(path: &str, setup: &SuspensionSetup, findings: &mut Vec<ValidationFinding>) {
        if setup.model.trim().is_empty() {
            findings.push(
                ValidationFinding::error(
                    RuleId::GeometryConsistency,
                    format!("{}.model", path),
                    "Suspension model must not be empty",
                )
                .with_suggestion("Name the fork or shock model"),
            );
        }

        if setup.travel == 0 {
            findings.push(
                ValidationFinding::error(
                    RuleId::GeometryConsistency,
                    format!("{}.travel", path),
                    "Suspension travel must be greater than 0 mm",
                )
                .with_expected("> 0")
                .with_actual("0"),
            );
        }

        if setup.sag > 100 {
            findings.push(
                ValidationFinding::error(
                    RuleId::GeometryConsistency,
                    format!("{}.sag", path),
                    format!("Sag {}% is not a percentage of travel", setup.sag),
                )
                .with_expected("[0, 100]")
                .with_actual(setup.sag.to_string()),
            );
        }
    }
}

impl ValidationRule for GeometryConsistencyRule {
    fn id(&self) -> RuleId {
        RuleId::GeometryConsistency
    }

    fn description(&self) -> &'static str {
        "Every suspension component the frame geometry carries is present and usable"
    }

    fn evaluate(&self, input: &RuleInput<'_>, findings: &mut Vec<ValidationFinding>) {
        for (path, setup) in input.bike.geometry.suspension_setups() {
            Self::check_setup(path, setup, findings);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FrameGeometry, SuspensionSetup};
    use crate::validation::rules::fixtures;

    fn run(geometry: FrameGeometry) -> Vec<ValidationFinding> {
        let bike = fixtures::bike(geometry);
        let session = fixtures::session();
        let mut findings = Vec::new();
        GeometryConsistencyRule.evaluate(
            &RuleInput {
                bike: &bike,
                session: &session,
            },
            &mut findings,
        );
        findings
    }

    #[test]
    fn test_rigid_has_nothing_to_check() {
        assert!(run(FrameGeometry::rigid()).is_empty());
    }

    #[test]
    fn test_valid_hardtail_passes() {
        assert!(run(FrameGeometry::hardtail(fixtures::air_fork())).is_empty());
    }

    #[test]
    fn test_full_suspension_checks_both_setups() {
        let fork = SuspensionSetup::air("", 160, 70);
        let shock = SuspensionSetup::coil("DHX2", 0);
        let findings = run(FrameGeometry::full_suspension(fork, shock));

        assert_eq!(findings.len(), 2);
        assert_eq!(findings[0].field_path, "geometry.full_suspension.fork.model");
        assert_eq!(findings[1].field_path, "geometry.full_suspension.shock.travel");
    }

    #[test]
    fn test_sag_above_hundred_is_error() {
        let fork = fixtures::air_fork().with_sag(101);
        let findings = run(FrameGeometry::hardtail(fork));
        assert_eq!(findings.len(), 1);
        assert!(findings[0].is_blocking());
        assert_eq!(findings[0].field_path, "geometry.hardtail.fork.sag");
    }
}
