//! Damper adjuster click ranges.

use crate::validation::{RuleId, ValidationFinding, ValidationRule};

use super::RuleInput;

/// Highest plausible click count on any adjuster
pub const MAX_CLICKS: u32 = 30;

/// Flags click counts outside the adjuster range. Out-of-range clicks are
/// entry faults, so they are errors.
pub struct ClickRangeRule {
    max_clicks: u32,
}

impl Default for ClickRangeRule {
    fn default() -> Self {
        Self {
            max_clicks: MAX_CLICKS,
        }
    }
}

impl ClickRangeRule {
    pub fn with_max(max_clicks: u32) -> Self {
        Self { max_clicks }
    }
}

impl ValidationRule for ClickRangeRule {
    fn id(&self) -> RuleId {
        RuleId::ClickRange
    }

    fn description(&self) -> &'static str {
        "Compression and rebound click counts are within the adjuster range"
    }

    fn evaluate(&self, input: &RuleInput<'_>, findings: &mut Vec<ValidationFinding>) {
        for (path, setup) in input.bike.geometry.suspension_setups() {
            let adjusters = [
                ("hsc", setup.hsc),
                ("lsc", setup.lsc),
                ("rebound", setup.rebound),
            ];
            for (name, clicks) in adjusters {
                if clicks <= self.max_clicks {
                    continue;
                }
                findings.push(
                    ValidationFinding::error(
                        RuleId::ClickRange,
                        format!("{}.{}", path, name),
                        format!(
                            "{} of {} clicks exceeds the adjuster range",
                            name, clicks
                        ),
                    )
                    .with_expected(format!("[0, {}]", self.max_clicks))
                    .with_actual(clicks.to_string())
                    .with_suggestion("Count clicks from fully closed"),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FrameGeometry, SuspensionSetup};
    use crate::validation::rules::fixtures;

    fn run(rule: &ClickRangeRule, setup: SuspensionSetup) -> Vec<ValidationFinding> {
        let bike = fixtures::bike(FrameGeometry::hardtail(setup));
        let session = fixtures::session();
        let mut findings = Vec::new();
        rule.evaluate(
            &RuleInput {
                bike: &bike,
                session: &session,
            },
            &mut findings,
        );
        findings
    }

    #[test]
    fn test_boundary_is_allowed() {
        let setup = fixtures::air_fork().with_damping(0, 30, 30);
        assert!(run(&ClickRangeRule::default(), setup).is_empty());
    }

    #[test]
    fn test_one_error_per_adjuster() {
        let setup = fixtures::air_fork().with_damping(31, 5, 45);
        let findings = run(&ClickRangeRule::default(), setup);
        assert_eq!(findings.len(), 2);
        assert_eq!(findings[0].field_path, "geometry.hardtail.fork.hsc");
        assert_eq!(findings[1].field_path, "geometry.hardtail.fork.rebound");
        assert!(findings.iter().all(|f| f.is_blocking()));
    }

    #[test]
    fn test_custom_range() {
        let setup = fixtures::air_fork().with_damping(12, 0, 0);
        assert_eq!(run(&ClickRangeRule::with_max(10), setup).len(), 1);
    }
}
