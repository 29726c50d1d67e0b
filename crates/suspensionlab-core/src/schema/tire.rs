//! Tires and wheels.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::unknown::UnknownFields;

/// Conversion factor between the two accepted pressure units
pub const PSI_PER_BAR: f64 = 14.5038;

/// Unit a tire pressure is expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PressureUnit {
    Bar,
    Psi,
}

impl PressureUnit {
    pub fn as_str(self) -> &'static str {
        match self {
            PressureUnit::Bar => "bar",
            PressureUnit::Psi => "psi",
        }
    }

    /// Convert a pressure in this unit to bar
    pub fn to_bar(self, value: f64) -> f64 {
        match self {
            PressureUnit::Bar => value,
            PressureUnit::Psi => value / PSI_PER_BAR,
        }
    }
}

impl fmt::Display for PressureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PressureUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bar" => Ok(PressureUnit::Bar),
            "psi" => Ok(PressureUnit::Psi),
            _ => Err(format!("Unknown pressure unit: {}", s)),
        }
    }
}

/// Tire model, mounting system and inflation.
///
/// `pressure_unit` stays a free string so that a file or wire message with a
/// bad unit can still be represented and reported by the validator.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TireSetup {
    pub model: String,
    /// Mounting system, e.g. "tubeless", "clincher" or "tubular"
    pub setup_type: String,
    pub pressure: f32,
    pub pressure_unit: String,
    #[serde(skip)]
    pub unknown_fields: UnknownFields,
}

impl TireSetup {
    pub fn new(
        model: impl Into<String>,
        setup_type: impl Into<String>,
        pressure: f32,
        unit: PressureUnit,
    ) -> Self {
        Self {
            model: model.into(),
            setup_type: setup_type.into(),
            pressure,
            pressure_unit: unit.as_str().to_string(),
            unknown_fields: UnknownFields::default(),
        }
    }

    /// Parsed unit, if it is one of the accepted values
    pub fn unit(&self) -> Option<PressureUnit> {
        self.pressure_unit.parse().ok()
    }

    /// Pressure normalised to bar, if the unit is recognised
    pub fn pressure_bar(&self) -> Option<f64> {
        self.unit().map(|u| u.to_bar(f64::from(self.pressure)))
    }
}

/// Wheel build.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WheelsConfig {
    pub rims: String,
    pub material: String,
    #[serde(skip)]
    pub unknown_fields: UnknownFields,
}

impl WheelsConfig {
    pub fn new(rims: impl Into<String>, material: impl Into<String>) -> Self {
        Self {
            rims: rims.into(),
            material: material.into(),
            unknown_fields: UnknownFields::default(),
        }
    }
}
