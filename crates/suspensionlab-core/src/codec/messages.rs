//! Wire layouts of the schema types
//!
//! | Message | Fields |
//! |---|---|
//! | SuspensionSetup | 1 model, 2 travel, 3 spring, 4 pressure, 5 sag, 6 hsc, 7 lsc, 8 rebound, 9 tokens |
//! | TireSetup | 1 model, 2 setup_type, 3 pressure (fixed32), 4 pressure_unit |
//! | HardwareConfig | 1 expected_sensors, 2 recording_freq |
//! | WheelsConfig | 1 rims, 2 material |
//! | BikeConfiguration | 1 rigid / 2 hardtail / 3 full_suspension (one of), 4 wheels, 5 front_tire, 6 rear_tire, 7 hardware |
//! | Config | 1 sensor_count, 2 sample_rate |
//! | HardtailGeometry | 1 fork |
//! | FullSuspensionGeometry | 1 fork, 2 shock |
//! | CaptureSetup | 1 session, 2 bike |
//!
//! These numbers are part of the stored format. Never renumber a field; add
//! new ones above the current maximum.

use super::{DecodeError, DecodeResult, Decoder, Encoder, WireMessage};
use crate::schema::{
    BikeConfiguration, CaptureSetup, Config, FrameGeometry, FullSuspensionGeometry,
    HardtailGeometry, HardwareConfig, RigidGeometry, SpringType, SuspensionSetup, TireSetup,
    UnknownFields, WheelsConfig,
};

impl WireMessage for SuspensionSetup {
    const NAME: &'static str = "SuspensionSetup";

    fn encode_fields(&self, enc: &mut Encoder) {
        enc.string(1, &self.model);
        enc.uint32(2, self.travel);
        enc.enumeration(3, self.spring.wire_value());
        enc.uint32(4, self.pressure);
        enc.uint32(5, self.sag);
        enc.uint32(6, self.hsc);
        enc.uint32(7, self.lsc);
        enc.uint32(8, self.rebound);
        enc.uint32(9, self.tokens);
        enc.unknown(&self.unknown_fields);
    }

    fn decode_fields(dec: &mut Decoder<'_>) -> DecodeResult<Self> {
        let mut out = Self::default();
        while let Some((field, wire_type)) = dec.next_key()? {
            match field {
                1 => out.model = dec.string(wire_type, Self::NAME, field)?,
                2 => out.travel = dec.uint32(wire_type, Self::NAME, field)?,
                3 => {
                    let value = dec.enumeration(wire_type, Self::NAME, field)?;
                    out.spring = SpringType::from_wire(value).ok_or(
                        DecodeError::UnknownEnumValue {
                            message: Self::NAME,
                            field,
                            value,
                        },
                    )?;
                }
                4 => out.pressure = dec.uint32(wire_type, Self::NAME, field)?,
                5 => out.sag = dec.uint32(wire_type, Self::NAME, field)?,
                6 => out.hsc = dec.uint32(wire_type, Self::NAME, field)?,
                7 => out.lsc = dec.uint32(wire_type, Self::NAME, field)?,
                8 => out.rebound = dec.uint32(wire_type, Self::NAME, field)?,
                9 => out.tokens = dec.uint32(wire_type, Self::NAME, field)?,
                _ => out.unknown_fields.push(dec.unknown(field, wire_type)?),
            }
        }
        Ok(out)
    }
}

impl WireMessage for TireSetup {
    const NAME: &'static str = "TireSetup";

    fn encode_fields(&self, enc: &mut Encoder) {
        enc.string(1, &self.model);
        enc.string(2, &self.setup_type);
        enc.float(3, self.pressure);
        enc.string(4, &self.pressure_unit);
        enc.unknown(&self.unknown_fields);
    }

    fn decode_fields(dec: &mut Decoder<'_>) -> DecodeResult<Self> {
        let mut out = Self::default();
        while let Some((field, wire_type)) = dec.next_key()? {
            match field {
                1 => out.model = dec.string(wire_type, Self::NAME, field)?,
                2 => out.setup_type = dec.string(wire_type, Self::NAME, field)?,
                3 => out.pressure = dec.float(wire_type, Self::NAME, field)?,
                4 => out.pressure_unit = dec.string(wire_type, Self::NAME, field)?,
                _ => out.unknown_fields.push(dec.unknown(field, wire_type)?),
            }
        }
        Ok(out)
    }
}

impl WireMessage for HardwareConfig {
    const NAME: &'static str = "HardwareConfig";

    fn encode_fields(&self, enc: &mut Encoder) {
        enc.uint32(1, self.expected_sensors);
        enc.uint32(2, self.recording_freq);
        enc.unknown(&self.unknown_fields);
    }

    fn decode_fields(dec: &mut Decoder<'_>) -> DecodeResult<Self> {
        let mut out = Self::default();
        while let Some((field, wire_type)) = dec.next_key()? {
            match field {
                1 => out.expected_sensors = dec.uint32(wire_type, Self::NAME, field)?,
                2 => out.recording_freq = dec.uint32(wire_type, Self::NAME, field)?,
                _ => out.unknown_fields.push(dec.unknown(field, wire_type)?),
            }
        }
        Ok(out)
    }
}

impl WireMessage for WheelsConfig {
    const NAME: &'static str = "WheelsConfig";

    fn encode_fields(&self, enc: &mut Encoder) {
        enc.string(1, &self.rims);
        enc.string(2, &self.material);
        enc.unknown(&self.unknown_fields);
    }

    fn decode_fields(dec: &mut Decoder<'_>) -> DecodeResult<Self> {
        let mut out = Self::default();
        while let Some((field, wire_type)) = dec.next_key()? {
            match field {
                1 => out.rims = dec.string(wire_type, Self::NAME, field)?,
                2 => out.material = dec.string(wire_type, Self::NAME, field)?,
                _ => out.unknown_fields.push(dec.unknown(field, wire_type)?),
            }
        }
        Ok(out)
    }
}

impl WireMessage for Config {
    const NAME: &'static str = "Config";

    fn encode_fields(&self, enc: &mut Encoder) {
        enc.uint32(1, self.sensor_count);
        enc.uint32(2, self.sample_rate);
        enc.unknown(&self.unknown_fields);
    }

    fn decode_fields(dec: &mut Decoder<'_>) -> DecodeResult<Self> {
        let mut out = Self::default();
        while let Some((field, wire_type)) = dec.next_key()? {
            match field {
                1 => out.sensor_count = dec.uint32(wire_type, Self::NAME, field)?,
                2 => out.sample_rate = dec.uint32(wire_type, Self::NAME, field)?,
                _ => out.unknown_fields.push(dec.unknown(field, wire_type)?),
            }
        }
        Ok(out)
    }
}

impl WireMessage for RigidGeometry {
    const NAME: &'static str = "RigidGeometry";

    fn encode_fields(&self, enc: &mut Encoder) {
        enc.unknown(&self.unknown_fields);
    }

    fn decode_fields(dec: &mut Decoder<'_>) -> DecodeResult<Self> {
        let mut out = Self::default();
        while let Some((field, wire_type)) = dec.next_key()? {
            out.unknown_fields.push(dec.unknown(field, wire_type)?);
        }
        Ok(out)
    }
}

impl WireMessage for HardtailGeometry {
    const NAME: &'static str = "HardtailGeometry";

    fn encode_fields(&self, enc: &mut Encoder) {
        enc.message(1, &self.fork);
        enc.unknown(&self.unknown_fields);
    }

    fn decode_fields(dec: &mut Decoder<'_>) -> DecodeResult<Self> {
        let mut fork = None;
        let mut unknown_fields = UnknownFields::default();
        while let Some((field, wire_type)) = dec.next_key()? {
            match field {
                1 => fork = Some(dec.message(wire_type, Self::NAME, field)?),
                _ => unknown_fields.push(dec.unknown(field, wire_type)?),
            }
        }
        Ok(Self {
            fork: fork.ok_or(DecodeError::MissingField {
                message: Self::NAME,
                field: "fork",
            })?,
            unknown_fields,
        })
    }
}

impl WireMessage for FullSuspensionGeometry {
    const NAME: &'static str = "FullSuspensionGeometry";

    fn encode_fields(&self, enc: &mut Encoder) {
        enc.message(1, &self.fork);
        enc.message(2, &self.shock);
        enc.unknown(&self.unknown_fields);
    }

    fn decode_fields(dec: &mut Decoder<'_>) -> DecodeResult<Self> {
        let mut fork = None;
        let mut shock = None;
        let mut unknown_fields = UnknownFields::default();
        while let Some((field, wire_type)) = dec.next_key()? {
            match field {
                1 => fork = Some(dec.message(wire_type, Self::NAME, field)?),
                2 => shock = Some(dec.message(wire_type, Self::NAME, field)?),
                _ => unknown_fields.push(dec.unknown(field, wire_type)?),
            }
        }
        Ok(Self {
            fork: fork.ok_or(DecodeError::MissingField {
                message: Self::NAME,
                field: "fork",
            })?,
            shock: shock.ok_or(DecodeError::MissingField {
                message: Self::NAME,
                field: "shock",
            })?,
            unknown_fields,
        })
    }
}

impl WireMessage for BikeConfiguration {
    const NAME: &'static str = "BikeConfiguration";

    fn encode_fields(&self, enc: &mut Encoder) {
        match &self.geometry {
            FrameGeometry::Rigid(rigid) => enc.message(1, rigid),
            FrameGeometry::Hardtail(hardtail) => enc.message(2, hardtail),
            FrameGeometry::FullSuspension(full) => enc.message(3, full),
        }
        enc.message(4, &self.wheels);
        enc.message(5, &self.front_tire);
        enc.message(6, &self.rear_tire);
        enc.message(7, &self.hardware);
        enc.unknown(&self.unknown_fields);
    }

    fn decode_fields(dec: &mut Decoder<'_>) -> DecodeResult<Self> {
        let mut geometry: Option<FrameGeometry> = None;
        let mut wheels = None;
        let mut front_tire = None;
        let mut rear_tire = None;
        let mut hardware = None;
        let mut unknown_fields = UnknownFields::default();

        while let Some((field, wire_type)) = dec.next_key()? {
            let variant = match field {
                1 => FrameGeometry::Rigid(dec.message(wire_type, Self::NAME, field)?),
                2 => FrameGeometry::Hardtail(dec.message(wire_type, Self::NAME, field)?),
                3 => FrameGeometry::FullSuspension(dec.message(wire_type, Self::NAME, field)?),
                4 => {
                    wheels = Some(dec.message(wire_type, Self::NAME, field)?);
                    continue;
                }
                5 => {
                    front_tire = Some(dec.message(wire_type, Self::NAME, field)?);
                    continue;
                }
                6 => {
                    rear_tire = Some(dec.message(wire_type, Self::NAME, field)?);
                    continue;
                }
                7 => {
                    hardware = Some(dec.message(wire_type, Self::NAME, field)?);
                    continue;
                }
                _ => {
                    unknown_fields.push(dec.unknown(field, wire_type)?);
                    continue;
                }
            };
            if geometry.replace(variant).is_some() {
                return Err(DecodeError::ConflictingVariant { message: Self::NAME });
            }
        }

        let missing = |field| DecodeError::MissingField {
            message: Self::NAME,
            field,
        };
        Ok(Self {
            geometry: geometry.ok_or(DecodeError::MissingVariant { message: Self::NAME })?,
            wheels: wheels.ok_or_else(|| missing("wheels"))?,
            front_tire: front_tire.ok_or_else(|| missing("front_tire"))?,
            rear_tire: rear_tire.ok_or_else(|| missing("rear_tire"))?,
            hardware: hardware.ok_or_else(|| missing("hardware"))?,
            unknown_fields,
        })
    }
}

impl WireMessage for CaptureSetup {
    const NAME: &'static str = "CaptureSetup";

    fn encode_fields(&self, enc: &mut Encoder) {
        enc.message(1, &self.session);
        enc.message(2, &self.bike);
        enc.unknown(&self.unknown_fields);
    }

    fn decode_fields(dec: &mut Decoder<'_>) -> DecodeResult<Self> {
        let mut session = None;
        let mut bike = None;
        let mut unknown_fields = UnknownFields::default();
        while let Some((field, wire_type)) = dec.next_key()? {
            match field {
                1 => session = Some(dec.message(wire_type, Self::NAME, field)?),
                2 => bike = Some(dec.message(wire_type, Self::NAME, field)?),
                _ => unknown_fields.push(dec.unknown(field, wire_type)?),
            }
        }
        Ok(Self {
            session: session.ok_or(DecodeError::MissingField {
                message: Self::NAME,
                field: "session",
            })?,
            bike: bike.ok_or(DecodeError::MissingField {
                message: Self::NAME,
                field: "bike",
            })?,
            unknown_fields,
        })
    }
}
