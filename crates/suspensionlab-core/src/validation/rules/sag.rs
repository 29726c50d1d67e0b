//! Sag band by riding discipline
//!
//! Discipline is inferred from travel. A sag outside the band is reported as
//! a warning only; race setups routinely run outside it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;

use crate::validation::{RuleId, ValidationFinding, ValidationRule};

use super::RuleInput;

/// Riding discipline implied by suspension travel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Discipline {
    /// Up to 120 mm
    CrossCountry,
    /// Over 120 mm, up to 170 mm
    TrailEnduro,
    /// Over 170 mm
    Downhill,
}

impl Discipline {
    pub fn from_travel(travel: u32) -> Self {
        match travel {
            0..=120 => Discipline::CrossCountry,
            121..=170 => Discipline::TrailEnduro,
            _ => Discipline::Downhill,
        }
    }

    /// Recommended sag, percent of travel
    pub fn sag_band(self) -> RangeInclusive<u32> {
        match self {
            Discipline::CrossCountry => 15..=20,
            Discipline::TrailEnduro => 25..=30,
            Discipline::Downhill => 30..=35,
        }
    }
}

impl fmt::Display for Discipline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Discipline::CrossCountry => write!(f, "XC"),
            Discipline::TrailEnduro => write!(f, "Trail/Enduro"),
            Discipline::Downhill => write!(f, "Downhill"),
        }
    }
}

pub struct SagBandRule;

impl ValidationRule for SagBandRule {
    fn id(&self) -> RuleId {
        RuleId::SagBand
    }

    fn description(&self) -> &'static str {
        "Sag sits within the band recommended for the discipline implied by travel"
    }

    fn evaluate(&self, input: &RuleInput<'_>, findings: &mut Vec<ValidationFinding>) {
        for (path, setup) in input.bike.geometry.suspension_setups() {
            let discipline = Discipline::from_travel(setup.travel);
            let band = discipline.sag_band();
            if band.contains(&setup.sag) {
                continue;
            }

            findings.push(
                ValidationFinding::warning(
                    RuleId::SagBand,
                    format!("{}.sag", path),
                    format!(
                        "Sag {}% is outside the {}-{}% band for {} travel ({} mm)",
                        setup.sag,
                        band.start(),
                        band.end(),
                        discipline,
                        setup.travel
                    ),
                )
                .with_expected(format!("{}-{}%", band.start(), band.end()))
                .with_actual(format!("{}%", setup.sag))
                .with_suggestion(if setup.sag < *band.start() {
                    "Lower spring pressure or preload to add sag"
                } else {
                    "Raise spring pressure or preload to reduce sag"
                }),
            );
        }
    }
}
