//! Frame geometry variants and suspension component setups.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::unknown::UnknownFields;

/// Spring medium of a fork or shock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SpringType {
    /// Air spring, tuned with pressure and volume tokens
    #[default]
    #[serde(alias = "air")]
    Air,
    /// Coil spring
    #[serde(alias = "coil")]
    Coil,
}

impl SpringType {
    /// Value written on the wire
    pub fn wire_value(self) -> u64 {
        match self {
            SpringType::Air => 0,
            SpringType::Coil => 1,
        }
    }

    /// Parse a wire value; anything outside the closed set is rejected
    pub fn from_wire(value: u64) -> Option<Self> {
        match value {
            0 => Some(SpringType::Air),
            1 => Some(SpringType::Coil),
            _ => None,
        }
    }
}

impl fmt::Display for SpringType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpringType::Air => write!(f, "AIR"),
            SpringType::Coil => write!(f, "COIL"),
        }
    }
}

/// Setup of a single suspension component (fork or rear shock).
///
/// `pressure` and `tokens` only mean something for air springs; a coil
/// setup leaves them at zero.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SuspensionSetup {
    /// Component model name
    pub model: String,
    /// Travel in millimetres
    pub travel: u32,
    /// Spring medium
    #[serde(default)]
    pub spring: SpringType,
    /// Air pressure in psi
    #[serde(default)]
    pub pressure: u32,
    /// Sag as a percentage of travel
    #[serde(default)]
    pub sag: u32,
    /// High-speed compression clicks
    #[serde(default)]
    pub hsc: u32,
    /// Low-speed compression clicks
    #[serde(default)]
    pub lsc: u32,
    /// Rebound clicks
    #[serde(default)]
    pub rebound: u32,
    /// Volume spacer count
    #[serde(default)]
    pub tokens: u32,
    #[serde(skip)]
    pub unknown_fields: UnknownFields,
}

impl SuspensionSetup {
    /// Air-sprung component at the given pressure (psi)
    pub fn air(model: impl Into<String>, travel: u32, pressure: u32) -> Self {
        Self {
            model: model.into(),
            travel,
            spring: SpringType::Air,
            pressure,
            ..Self::default()
        }
    }

    /// Coil-sprung component
    pub fn coil(model: impl Into<String>, travel: u32) -> Self {
        Self {
            model: model.into(),
            travel,
            spring: SpringType::Coil,
            ..Self::default()
        }
    }

    pub fn with_sag(mut self, sag: u32) -> Self {
        self.sag = sag;
        self
    }

    /// Set compression and rebound damping clicks
    pub fn with_damping(mut self, hsc: u32, lsc: u32, rebound: u32) -> Self {
        self.hsc = hsc;
        self.lsc = lsc;
        self.rebound = rebound;
        self
    }

    pub fn with_tokens(mut self, tokens: u32) -> Self {
        self.tokens = tokens;
        self
    }
}

/// Rigid frame and fork. Carries no suspension.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RigidGeometry {
    #[serde(skip)]
    pub unknown_fields: UnknownFields,
}

/// Front suspension only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HardtailGeometry {
    pub fork: SuspensionSetup,
    #[serde(skip)]
    pub unknown_fields: UnknownFields,
}

/// Front and rear suspension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FullSuspensionGeometry {
    pub fork: SuspensionSetup,
    pub shock: SuspensionSetup,
    #[serde(skip)]
    pub unknown_fields: UnknownFields,
}

/// Discriminant of [`FrameGeometry`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeometryKind {
    Rigid,
    Hardtail,
    FullSuspension,
}

impl fmt::Display for GeometryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeometryKind::Rigid => write!(f, "rigid"),
            GeometryKind::Hardtail => write!(f, "hardtail"),
            GeometryKind::FullSuspension => write!(f, "full_suspension"),
        }
    }
}

/// Frame geometry class. Exactly one variant is ever present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FrameGeometry {
    Rigid(RigidGeometry),
    Hardtail(HardtailGeometry),
    FullSuspension(FullSuspensionGeometry),
}

impl FrameGeometry {
    pub fn rigid() -> Self {
        FrameGeometry::Rigid(RigidGeometry::default())
    }

    pub fn hardtail(fork: SuspensionSetup) -> Self {
        FrameGeometry::Hardtail(HardtailGeometry {
            fork,
            unknown_fields: UnknownFields::default(),
        })
    }

    pub fn full_suspension(fork: SuspensionSetup, shock: SuspensionSetup) -> Self {
        FrameGeometry::FullSuspension(FullSuspensionGeometry {
            fork,
            shock,
            unknown_fields: UnknownFields::default(),
        })
    }

    pub fn kind(&self) -> GeometryKind {
        match self {
            FrameGeometry::Rigid(_) => GeometryKind::Rigid,
            FrameGeometry::Hardtail(_) => GeometryKind::Hardtail,
            FrameGeometry::FullSuspension(_) => GeometryKind::FullSuspension,
        }
    }

    /// Fork setup, absent on a rigid frame
    pub fn fork(&self) -> Option<&SuspensionSetup> {
        match self {
            FrameGeometry::Rigid(_) => None,
            FrameGeometry::Hardtail(h) => Some(&h.fork),
            FrameGeometry::FullSuspension(f) => Some(&f.fork),
        }
    }

    /// Rear shock setup, present only on a full-suspension frame
    pub fn shock(&self) -> Option<&SuspensionSetup> {
        match self {
            FrameGeometry::FullSuspension(f) => Some(&f.shock),
            _ => None,
        }
    }

    /// Every suspension setup present, labelled with its field path
    pub fn suspension_setups(&self) -> Vec<(&'static str, &SuspensionSetup)> {
        match self {
            FrameGeometry::Rigid(_) => Vec::new(),
            FrameGeometry::Hardtail(h) => vec![("geometry.hardtail.fork", &h.fork)],
            FrameGeometry::FullSuspension(f) => vec![
                ("geometry.full_suspension.fork", &f.fork),
                ("geometry.full_suspension.shock", &f.shock),
            ],
        }
    }

    pub(crate) fn unknown_field_count(&self) -> usize {
        match self {
            FrameGeometry::Rigid(r) => r.unknown_fields.len(),
            FrameGeometry::Hardtail(h) => h.unknown_fields.len() + h.fork.unknown_fields.len(),
            FrameGeometry::FullSuspension(f) => {
                f.unknown_fields.len() + f.fork.unknown_fields.len() + f.shock.unknown_fields.len()
            }
        }
    }
}
