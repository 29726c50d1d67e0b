//! Spring-type consistency: air-only fields on coil setups, missing air pressure.

use crate::schema::SpringType;
use crate::validation::{RuleId, ValidationFinding, ValidationRule};

use super::RuleInput;

pub struct SpringConsistencyRule;

impl ValidationRule for SpringConsistencyRule {
    fn id(&self) -> RuleId {
        RuleId::SpringConsistency
    }

    fn description(&self) -> &'static str {
        "Air pressure and tokens are set for air springs and only for air springs"
    }

    fn evaluate(&self, input: &RuleInput<'_>, findings: &mut Vec<ValidationFinding>) {
        for (path, setup) in input.bike.geometry.suspension_setups() {
            match setup.spring {
                SpringType::Coil => {
                    let field = match (setup.pressure != 0, setup.tokens != 0) {
                        (false, false) => continue,
                        (true, false) => format!("{}.pressure", path),
                        (false, true) => format!("{}.tokens", path),
                        (true, true) => path.to_string(),
                    };
                    findings.push(
                        ValidationFinding::error(
                            RuleId::SpringConsistency,
                            field,
                            format!(
                                "Coil spring cannot use air settings \
                                 (pressure {} psi, {} token(s))",
                                setup.pressure, setup.tokens
                            ),
                        )
                        .with_expected("pressure = 0, tokens = 0")
                        .with_suggestion("Clear pressure and tokens, or switch the spring to AIR"),
                    );
                }
                SpringType::Air => {
                    if setup.pressure == 0 {
                        findings.push(
                            ValidationFinding::error(
                                RuleId::SpringConsistency,
                                format!("{}.pressure", path),
                                "Air spring requires a pressure above 0 psi",
                            )
                            .with_expected("> 0")
                            .with_actual("0"),
                        );
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FrameGeometry, SuspensionSetup};
    use crate::validation::rules::fixtures;

    fn run(setup: SuspensionSetup) -> Vec<ValidationFinding> {
        let bike = fixtures::bike(FrameGeometry::hardtail(setup));
        let session = fixtures::session();
        let mut findings = Vec::new();
        SpringConsistencyRule.evaluate(
            &RuleInput {
                bike: &bike,
                session: &session,
            },
            &mut findings,
        );
        findings
    }

    #[test]
    fn test_coil_with_pressure_is_one_error() {
        let mut setup = SuspensionSetup::coil("Marzocchi Bomber", 170);
        setup.pressure = 120;
        let findings = run(setup);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].field_path, "geometry.hardtail.fork.pressure");
    }

    #[test]
    fn test_coil_with_pressure_and_tokens_is_still_one_error() {
        let mut setup = SuspensionSetup::coil("Marzocchi Bomber", 170).with_tokens(2);
        setup.pressure = 120;
        let findings = run(setup);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].field_path, "geometry.hardtail.fork");
    }

    #[test]
    fn test_air_without_pressure_is_error() {
        let findings = run(SuspensionSetup::air("Pike", 140, 0));
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].rule, RuleId::SpringConsistency);
    }

    #[test]
    fn test_clean_setups_pass() {
        assert!(run(SuspensionSetup::coil("Bomber", 170)).is_empty());
        assert!(run(SuspensionSetup::air("Pike", 140, 85).with_tokens(3)).is_empty());
    }
}
