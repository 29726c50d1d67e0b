//! Built-in validation rules
//!
//! Each rule lives in its own module and implements
//! [`ValidationRule`](super::ValidationRule). Thresholds come from the
//! suspension and tire setup guides the analysis pipeline is tuned against.

pub mod clicks;
pub mod geometry;
pub mod hardware;
pub mod sag;
pub mod spring;
pub mod tire;

use crate::schema::{BikeConfiguration, Config};

use super::ValidationRule;

pub use sag::Discipline;

/// Everything a rule may look at
#[derive(Debug, Clone, Copy)]
pub struct RuleInput<'a> {
    pub bike: &'a BikeConfiguration,
    pub session: &'a Config,
}

/// The standard rule set, in evaluation order
pub fn builtin_rules() -> Vec<Box<dyn ValidationRule>> {
    vec![
        Box::new(geometry::GeometryConsistencyRule),
        Box::new(sag::SagBandRule),
        Box::new(spring::SpringConsistencyRule),
        Box::new(clicks::ClickRangeRule::default()),
        Box::new(tire::PressureUnitRule),
        Box::new(tire::PressureBoundsRule::default()),
        Box::new(tire::PressureBalanceRule),
        Box::new(hardware::SampleRateRule),
        Box::new(hardware::CaptureProfileRule),
    ]
}
