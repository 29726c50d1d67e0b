//! Tire pressure rules: unit, bounds after normalisation, front/rear balance.

use std::ops::RangeInclusive;

use crate::schema::{PressureUnit, TireSetup};
use crate::validation::{RuleId, ValidationFinding, ValidationRule};

use super::RuleInput;

/// Plausible tire pressure in bar
pub const PRESSURE_BOUNDS_BAR: RangeInclusive<f64> = 1.0..=10.0;

fn tires<'a>(input: &RuleInput<'a>) -> [(&'static str, &'a TireSetup); 2] {
    [
        ("front_tire", &input.bike.front_tire),
        ("rear_tire", &input.bike.rear_tire),
    ]
}

/// Pressure unit must be "bar" or "psi"
pub struct PressureUnitRule;

impl ValidationRule for PressureUnitRule {
    fn id(&self) -> RuleId {
        RuleId::TirePressureUnit
    }

    fn description(&self) -> &'static str {
        "Tire pressure unit is one of bar or psi"
    }

    fn evaluate(&self, input: &RuleInput<'_>, findings: &mut Vec<ValidationFinding>) {
        for (path, tire) in tires(input) {
            if tire.unit().is_some() {
                continue;
            }
            findings.push(
                ValidationFinding::error(
                    RuleId::TirePressureUnit,
                    format!("{}.pressure_unit", path),
                    format!("Unknown pressure unit '{}'", tire.pressure_unit),
                )
                .with_expected(format!(
                    "{} or {}",
                    PressureUnit::Bar,
                    PressureUnit::Psi
                ))
                .with_actual(tire.pressure_unit.clone()),
            );
        }
    }
}

/// Pressure, normalised to bar, must be plausible. Catches values entered in
/// the wrong unit, e.g. 60 with unit "bar". Tires with an unknown unit are
/// left to [`PressureUnitRule`].
pub struct PressureBoundsRule {
    bounds: RangeInclusive<f64>,
}

impl Default for PressureBoundsRule {
    fn default() -> Self {
        Self {
            bounds: PRESSURE_BOUNDS_BAR,
        }
    }
}

impl ValidationRule for PressureBoundsRule {
    fn id(&self) -> RuleId {
        RuleId::TirePressureBounds
    }

    fn description(&self) -> &'static str {
        "Tire pressure lies within 1-10 bar after unit normalisation"
    }

    fn evaluate(&self, input: &RuleInput<'_>, findings: &mut Vec<ValidationFinding>) {
        for (path, tire) in tires(input) {
            let Some(bar) = tire.pressure_bar() else {
                continue;
            };
            // NaN falls outside every range
            if self.bounds.contains(&bar) {
                continue;
            }
            findings.push(
                ValidationFinding::error(
                    RuleId::TirePressureBounds,
                    format!("{}.pressure", path),
                    format!(
                        "Pressure {} {} ({:.2} bar) is outside {}-{} bar",
                        tire.pressure,
                        tire.pressure_unit,
                        bar,
                        self.bounds.start(),
                        self.bounds.end()
                    ),
                )
                .with_expected(format!(
                    "[{}, {}] bar",
                    self.bounds.start(),
                    self.bounds.end()
                ))
                .with_actual(format!("{} {}", tire.pressure, tire.pressure_unit))
                .with_suggestion("Check the value was entered in the stated unit"),
            );
        }
    }
}

/// Rear pressure at or above front: riders load the rear with 60-65% of
/// their weight. A deviation is only a warning.
pub struct PressureBalanceRule;

impl ValidationRule for PressureBalanceRule {
    fn id(&self) -> RuleId {
        RuleId::TirePressureBalance
    }

    fn description(&self) -> &'static str {
        "Rear tire pressure is not lower than front tire pressure"
    }

    fn evaluate(&self, input: &RuleInput<'_>, findings: &mut Vec<ValidationFinding>) {
        let (Some(front), Some(rear)) = (
            input.bike.front_tire.pressure_bar(),
            input.bike.rear_tire.pressure_bar(),
        ) else {
            return;
        };

        if rear < front {
            findings.push(
                ValidationFinding::warning(
                    RuleId::TirePressureBalance,
                    "rear_tire.pressure",
                    format!(
                        "Rear pressure {:.2} bar is below front pressure {:.2} bar",
                        rear, front
                    ),
                )
                .with_expected(format!(">= {:.2} bar", front))
                .with_actual(format!("{:.2} bar", rear))
                .with_suggestion("Run the rear tire at or above the front pressure"),
            );
        }
    }
}
