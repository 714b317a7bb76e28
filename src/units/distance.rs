use serde::{Deserialize, Serialize};

use super::Unit;
use crate::quantity::{UnitFamily, UnitTag};

/// 거리(길이) 단위. 내부 기준은 미터이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DistanceUnit {
    Millimeter,
    Centimeter,
    Meter,
    Kilometer,
    Inch,
    Foot,
    Yard,
    Mile,
}

fn to_meter(value: f64, unit: DistanceUnit) -> f64 {
    match unit {
        DistanceUnit::Millimeter => value / 1000.0,
        DistanceUnit::Centimeter => value / 100.0,
        DistanceUnit::Meter => value,
        DistanceUnit::Kilometer => value * 1000.0,
        DistanceUnit::Inch => value * 0.0254,
        DistanceUnit::Foot => value * 0.3048,
        DistanceUnit::Yard => value * 0.9144,
        DistanceUnit::Mile => value * 1609.344,
    }
}

fn from_meter(value_m: f64, unit: DistanceUnit) -> f64 {
    match unit {
        DistanceUnit::Millimeter => value_m * 1000.0,
        DistanceUnit::Centimeter => value_m * 100.0,
        DistanceUnit::Meter => value_m,
        DistanceUnit::Kilometer => value_m / 1000.0,
        DistanceUnit::Inch => value_m / 0.0254,
        DistanceUnit::Foot => value_m / 0.3048,
        DistanceUnit::Yard => value_m / 0.9144,
        DistanceUnit::Mile => value_m / 1609.344,
    }
}

impl Unit for DistanceUnit {
    const FAMILY: UnitFamily = UnitFamily::Distance;
    const ALL: &'static [Self] = &[
        DistanceUnit::Millimeter,
        DistanceUnit::Centimeter,
        DistanceUnit::Meter,
        DistanceUnit::Kilometer,
        DistanceUnit::Inch,
        DistanceUnit::Foot,
        DistanceUnit::Yard,
        DistanceUnit::Mile,
    ];

    fn to_base(self, value: f64) -> f64 {
        to_meter(value, self)
    }

    fn from_base(self, value: f64) -> f64 {
        from_meter(value, self)
    }

    fn symbol(self) -> &'static str {
        match self {
            DistanceUnit::Millimeter => "mm",
            DistanceUnit::Centimeter => "cm",
            DistanceUnit::Meter => "m",
            DistanceUnit::Kilometer => "km",
            DistanceUnit::Inch => "in",
            DistanceUnit::Foot => "ft",
            DistanceUnit::Yard => "yd",
            DistanceUnit::Mile => "mi",
        }
    }

    fn into_tag(self) -> UnitTag {
        UnitTag::Distance(self)
    }

    fn from_tag(tag: UnitTag) -> Option<Self> {
        match tag {
            UnitTag::Distance(u) => Some(u),
            _ => None,
        }
    }
}
