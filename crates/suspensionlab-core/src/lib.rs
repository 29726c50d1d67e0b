//! SuspensionLab Core
//!
//! Setup schema, validation and wire format for mountain-bike telemetry
//! capture.
//!
//! ## Features
//!
//! - **Schema**: typed bike setup (frame geometry, suspension, tires, wheels,
//!   sensor hardware) and capture session profile
//! - **Validation**: domain rules reporting errors and warnings on separate
//!   channels, with a caller-chosen [`WarningPolicy`]
//! - **Codec**: compact tagged-field binary format with stable field numbers
//!   and unknown-field preservation
//! - **Diary**: append-only history of accepted setups with field-level
//!   change listing
//!
//! ## Architecture
//!
//! 1. **Schema** (`schema/`): plain data; construction never fails.
//! 2. **Validation** (`validation/`): pure checks over a borrowed setup.
//! 3. **Codec** (`codec/`): encode/decode against the field-number table.
//! 4. **Diary** (`diary`): validates, timestamps and stores accepted setups.
//!
//! ## Example
//!
//! ```rust
//! use suspensionlab_core::codec;
//! use suspensionlab_core::schema::{
//!     BikeConfiguration, Config, FrameGeometry, HardwareConfig, PressureUnit,
//!     SuspensionSetup, TireSetup, WheelsConfig,
//! };
//! use suspensionlab_core::validation::validate;
//!
//! let bike = BikeConfiguration::new(
//!     FrameGeometry::hardtail(SuspensionSetup::air("SID", 100, 80).with_sag(18)),
//!     WheelsConfig::new("XRC 1200", "carbon"),
//!     TireSetup::new("Race King", "tubeless", 1.6, PressureUnit::Bar),
//!     TireSetup::new("Race King", "tubeless", 1.8, PressureUnit::Bar),
//!     HardwareConfig::new(2, 1000),
//! );
//! let session = Config::new(2, 1000);
//!
//! let warnings = validate(&bike, &session).expect("setup is valid");
//! assert!(warnings.is_empty());
//!
//! let bytes = codec::encode(&bike);
//! let back: BikeConfiguration = codec::decode(&bytes).unwrap();
//! assert_eq!(back, bike);
//! ```

pub mod codec;
pub mod diary;
pub mod error;
pub mod schema;
pub mod validation;

pub use codec::{decode, encode, DecodeError, WireMessage};
pub use diary::{FieldChange, SetupDiary, SetupEntry};
pub use error::{DiaryError, Result};
pub use schema::{BikeConfiguration, CaptureSetup, Config, FrameGeometry};
pub use validation::{
    Rejected, Severity, ValidationFinding, ValidationReport, Validator, WarningPolicy,
};
