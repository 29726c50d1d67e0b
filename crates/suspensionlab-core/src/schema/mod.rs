//! Setup schema
//!
//! Strongly-typed description of a bike's mechanical setup and of the
//! telemetry capture session it is ridden in. Shape constraints live in the
//! types themselves: the frame geometry is a sum type, so a hardtail has no
//! place to put a shock and a rigid frame has no place to put a fork.
//! Business rules (ranges, unit sanity, cross-field checks) are left to
//! [`crate::validation`].

pub mod bike;
pub mod geometry;
pub mod hardware;
pub mod tire;
pub mod unknown;

pub use bike::{BikeConfiguration, CaptureSetup};
pub use geometry::{
    FrameGeometry, FullSuspensionGeometry, GeometryKind, HardtailGeometry, RigidGeometry,
    SpringType, SuspensionSetup,
};
pub use hardware::{Config, HardwareConfig};
pub use tire::{PressureUnit, TireSetup, WheelsConfig, PSI_PER_BAR};
pub use unknown::{UnknownField, UnknownFields};
