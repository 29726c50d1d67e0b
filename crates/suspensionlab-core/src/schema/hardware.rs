//! Onboard sensing hardware and the capture session profile.

use serde::{Deserialize, Serialize};

use super::unknown::UnknownFields;

/// Sensor hardware mounted on the bike.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HardwareConfig {
    /// Number of sensors the logger expects to find
    pub expected_sensors: u32,
    /// Rate the sensors report at, in Hz
    pub recording_freq: u32,
    #[serde(skip)]
    pub unknown_fields: UnknownFields,
}

impl HardwareConfig {
    pub fn new(expected_sensors: u32, recording_freq: u32) -> Self {
        Self {
            expected_sensors,
            recording_freq,
            unknown_fields: UnknownFields::default(),
        }
    }
}

/// Telemetry capture profile of a riding session.
///
/// Independent of the bike itself: one session may cover several
/// [`BikeConfiguration`](super::BikeConfiguration) snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Config {
    pub sensor_count: u32,
    /// Capture rate in Hz
    pub sample_rate: u32,
    #[serde(skip)]
    pub unknown_fields: UnknownFields,
}

impl Config {
    pub fn new(sensor_count: u32, sample_rate: u32) -> Self {
        Self {
            sensor_count,
            sample_rate,
            unknown_fields: UnknownFields::default(),
        }
    }
}
