use serde::{Deserialize, Serialize};

use super::Unit;
use crate::quantity::{UnitFamily, UnitTag};

/// 질량(탄두 무게) 단위. 내부 기준은 kg이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeightUnit {
    Grain,
    Gram,
    Kilogram,
    Ounce,
    Pound,
}

const KG_PER_GRAIN: f64 = 0.000_064_798_91;
const KG_PER_OUNCE: f64 = 0.028_349_523_125;
const KG_PER_POUND: f64 = 0.453_592_37;

fn to_kg(value: f64, unit: WeightUnit) -> f64 {
    match unit {
        WeightUnit::Grain => value * KG_PER_GRAIN,
        WeightUnit::Gram => value / 1000.0,
        WeightUnit::Kilogram => value,
        WeightUnit::Ounce => value * KG_PER_OUNCE,
        WeightUnit::Pound => value * KG_PER_POUND,
    }
}

fn from_kg(value: f64, unit: WeightUnit) -> f64 {
    match unit {
        WeightUnit::Grain => value / KG_PER_GRAIN,
        WeightUnit::Gram => value * 1000.0,
        WeightUnit::Kilogram => value,
        WeightUnit::Ounce => value / KG_PER_OUNCE,
        WeightUnit::Pound => value / KG_PER_POUND,
    }
}

impl Unit for WeightUnit {
    const FAMILY: UnitFamily = UnitFamily::Weight;
    const ALL: &'static [Self] = &[
        WeightUnit::Grain,
        WeightUnit::Gram,
        WeightUnit::Kilogram,
        WeightUnit::Ounce,
        WeightUnit::Pound,
    ];

    fn to_base(self, value: f64) -> f64 {
        to_kg(value, self)
    }

    fn from_base(self, value: f64) -> f64 {
        from_kg(value, self)
    }

    fn symbol(self) -> &'static str {
        match self {
            WeightUnit::Grain => "gr",
            WeightUnit::Gram => "g",
            WeightUnit::Kilogram => "kg",
            WeightUnit::Ounce => "oz",
            WeightUnit::Pound => "lb",
        }
    }

    fn into_tag(self) -> UnitTag {
        UnitTag::Weight(self)
    }

    fn from_tag(tag: UnitTag) -> Option<Self> {
        match tag {
            UnitTag::Weight(u) => Some(u),
            _ => None,
        }
    }
}
