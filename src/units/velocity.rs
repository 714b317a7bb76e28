use serde::{Deserialize, Serialize};

use super::Unit;
use crate::quantity::{UnitFamily, UnitTag};

/// 속도 단위. 내부 기준은 m/s이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VelocityUnit {
    MeterPerSecond,
    KilometerPerHour,
    FootPerSecond,
    MilePerHour,
}

fn to_mps(value: f64, unit: VelocityUnit) -> f64 {
    match unit {
        VelocityUnit::MeterPerSecond => value,
        VelocityUnit::KilometerPerHour => value / 3.6,
        VelocityUnit::FootPerSecond => value * 0.3048,
        VelocityUnit::MilePerHour => value * 0.44704,
    }
}

fn from_mps(value: f64, unit: VelocityUnit) -> f64 {
    match unit {
        VelocityUnit::MeterPerSecond => value,
        VelocityUnit::KilometerPerHour => value * 3.6,
        VelocityUnit::FootPerSecond => value / 0.3048,
        VelocityUnit::MilePerHour => value / 0.44704,
    }
}

impl Unit for VelocityUnit {
    const FAMILY: UnitFamily = UnitFamily::Velocity;
    const ALL: &'static [Self] = &[
        VelocityUnit::MeterPerSecond,
        VelocityUnit::KilometerPerHour,
        VelocityUnit::FootPerSecond,
        VelocityUnit::MilePerHour,
    ];

    fn to_base(self, value: f64) -> f64 {
        to_mps(value, self)
    }

    fn from_base(self, value: f64) -> f64 {
        from_mps(value, self)
    }

    fn symbol(self) -> &'static str {
        match self {
            VelocityUnit::MeterPerSecond => "m/s",
            VelocityUnit::KilometerPerHour => "km/h",
            VelocityUnit::FootPerSecond => "ft/s",
            VelocityUnit::MilePerHour => "mph",
        }
    }

    fn into_tag(self) -> UnitTag {
        UnitTag::Velocity(self)
    }

    fn from_tag(tag: UnitTag) -> Option<Self> {
        match tag {
            UnitTag::Velocity(u) => Some(u),
            _ => None,
        }
    }
}
