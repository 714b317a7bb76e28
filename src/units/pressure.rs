use serde::{Deserialize, Serialize};

use super::Unit;
use crate::quantity::{UnitFamily, UnitTag};

/// 대기압 단위. 내부 기준은 Pa(절대압)이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PressureUnit {
    MillimetersOfMercury,
    InchesOfMercury,
    Bar,
    HectoPascal,
    Psi,
}

const PA_PER_MMHG: f64 = 133.322_387_415;
const PA_PER_INHG: f64 = 3_386.388_666_6;
const PA_PER_BAR: f64 = 100_000.0;
const PA_PER_PSI: f64 = 6_894.757_293_168;

/// 주어진 압력을 Pa로 변환한다.
pub fn to_pascal(value: f64, unit: PressureUnit) -> f64 {
    match unit {
        PressureUnit::MillimetersOfMercury => value * PA_PER_MMHG,
        PressureUnit::InchesOfMercury => value * PA_PER_INHG,
        PressureUnit::Bar => value * PA_PER_BAR,
        PressureUnit::HectoPascal => value * 100.0,
        PressureUnit::Psi => value * PA_PER_PSI,
    }
}

/// Pa 값을 원하는 단위로 변환한다.
pub fn from_pascal(value_pa: f64, unit: PressureUnit) -> f64 {
    match unit {
        PressureUnit::MillimetersOfMercury => value_pa / PA_PER_MMHG,
        PressureUnit::InchesOfMercury => value_pa / PA_PER_INHG,
        PressureUnit::Bar => value_pa / PA_PER_BAR,
        PressureUnit::HectoPascal => value_pa / 100.0,
        PressureUnit::Psi => value_pa / PA_PER_PSI,
    }
}

impl Unit for PressureUnit {
    const FAMILY: UnitFamily = UnitFamily::Pressure;
    const ALL: &'static [Self] = &[
        PressureUnit::MillimetersOfMercury,
        PressureUnit::InchesOfMercury,
        PressureUnit::Bar,
        PressureUnit::HectoPascal,
        PressureUnit::Psi,
    ];

    fn to_base(self, value: f64) -> f64 {
        to_pascal(value, self)
    }

    fn from_base(self, value: f64) -> f64 {
        from_pascal(value, self)
    }

    fn symbol(self) -> &'static str {
        match self {
            PressureUnit::MillimetersOfMercury => "mmHg",
            PressureUnit::InchesOfMercury => "inHg",
            PressureUnit::Bar => "bar",
            PressureUnit::HectoPascal => "hPa",
            PressureUnit::Psi => "psi",
        }
    }

    fn into_tag(self) -> UnitTag {
        UnitTag::Pressure(self)
    }

    fn from_tag(tag: UnitTag) -> Option<Self> {
        match tag {
            UnitTag::Pressure(u) => Some(u),
            _ => None,
        }
    }
}
