//! Root records: the bike setup and the session/bike pairing.

use serde::{Deserialize, Serialize};

use super::geometry::FrameGeometry;
use super::hardware::{Config, HardwareConfig};
use super::tire::{TireSetup, WheelsConfig};
use super::unknown::UnknownFields;

/// Complete mechanical setup of one bike.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BikeConfiguration {
    pub geometry: FrameGeometry,
    pub wheels: WheelsConfig,
    pub front_tire: TireSetup,
    pub rear_tire: TireSetup,
    pub hardware: HardwareConfig,
    #[serde(skip)]
    pub unknown_fields: UnknownFields,
}

impl BikeConfiguration {
    pub fn new(
        geometry: FrameGeometry,
        wheels: WheelsConfig,
        front_tire: TireSetup,
        rear_tire: TireSetup,
        hardware: HardwareConfig,
    ) -> Self {
        Self {
            geometry,
            wheels,
            front_tire,
            rear_tire,
            hardware,
            unknown_fields: UnknownFields::default(),
        }
    }

    /// Unknown wire fields held anywhere in this setup
    pub fn unknown_field_count(&self) -> usize {
        self.unknown_fields.len()
            + self.geometry.unknown_field_count()
            + self.wheels.unknown_fields.len()
            + self.front_tire.unknown_fields.len()
            + self.rear_tire.unknown_fields.len()
            + self.hardware.unknown_fields.len()
    }
}

/// A capture session paired with the bike ridden in it.
///
/// This is the unit written to setup files and wire files; downstream
/// telemetry summaries are keyed by the same pairing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptureSetup {
    pub session: Config,
    pub bike: BikeConfiguration,
    #[serde(skip)]
    pub unknown_fields: UnknownFields,
}

impl CaptureSetup {
    pub fn new(session: Config, bike: BikeConfiguration) -> Self {
        Self {
            session,
            bike,
            unknown_fields: UnknownFields::default(),
        }
    }

    pub fn unknown_field_count(&self) -> usize {
        self.unknown_fields.len()
            + self.session.unknown_fields.len()
            + self.bike.unknown_field_count()
    }
}
