use serde::{Deserialize, Serialize};

use crate::units::{
    AngularUnit, DistanceUnit, PressureUnit, TemperatureUnit, Unit, VelocityUnit, WeightUnit,
};

/// 다루는 물리량 계열을 나타낸다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitFamily {
    Distance,
    Weight,
    Velocity,
    Angular,
    Temperature,
    Pressure,
}

impl UnitFamily {
    pub const ALL: [UnitFamily; 6] = [
        UnitFamily::Distance,
        UnitFamily::Weight,
        UnitFamily::Velocity,
        UnitFamily::Angular,
        UnitFamily::Temperature,
        UnitFamily::Pressure,
    ];

    /// 계열에 속한 모든 단위를 태그로 나열한다.
    pub fn units(self) -> Vec<UnitTag> {
        fn tags<U: Unit>() -> Vec<UnitTag> {
            U::ALL.iter().map(|u| u.into_tag()).collect()
        }
        match self {
            UnitFamily::Distance => tags::<DistanceUnit>(),
            UnitFamily::Weight => tags::<WeightUnit>(),
            UnitFamily::Velocity => tags::<VelocityUnit>(),
            UnitFamily::Angular => tags::<AngularUnit>(),
            UnitFamily::Temperature => tags::<TemperatureUnit>(),
            UnitFamily::Pressure => tags::<PressureUnit>(),
        }
    }
}

/// 계열 정보를 함께 가지는 동적 단위 태그.
///
/// 패널 레이아웃처럼 여러 계열의 필드를 한 목록에 담아야 할 때 사용한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitTag {
    Distance(DistanceUnit),
    Weight(WeightUnit),
    Velocity(VelocityUnit),
    Angular(AngularUnit),
    Temperature(TemperatureUnit),
    Pressure(PressureUnit),
}

impl UnitTag {
    pub const fn family(self) -> UnitFamily {
        match self {
            UnitTag::Distance(_) => UnitFamily::Distance,
            UnitTag::Weight(_) => UnitFamily::Weight,
            UnitTag::Velocity(_) => UnitFamily::Velocity,
            UnitTag::Angular(_) => UnitFamily::Angular,
            UnitTag::Temperature(_) => UnitFamily::Temperature,
            UnitTag::Pressure(_) => UnitFamily::Pressure,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            UnitTag::Distance(u) => u.symbol(),
            UnitTag::Weight(u) => u.symbol(),
            UnitTag::Velocity(u) => u.symbol(),
            UnitTag::Angular(u) => u.symbol(),
            UnitTag::Temperature(u) => u.symbol(),
            UnitTag::Pressure(u) => u.symbol(),
        }
    }

    /// 값을 다른 단위로 변환한다. 계열이 다르면 `None`을 돌려준다.
    pub fn convert(self, value: f64, to: UnitTag) -> Option<f64> {
        match (self, to) {
            (UnitTag::Distance(a), UnitTag::Distance(b)) => Some(crate::units::convert(value, a, b)),
            (UnitTag::Weight(a), UnitTag::Weight(b)) => Some(crate::units::convert(value, a, b)),
            (UnitTag::Velocity(a), UnitTag::Velocity(b)) => Some(crate::units::convert(value, a, b)),
            (UnitTag::Angular(a), UnitTag::Angular(b)) => Some(crate::units::convert(value, a, b)),
            (UnitTag::Temperature(a), UnitTag::Temperature(b)) => {
                Some(crate::units::convert(value, a, b))
            }
            (UnitTag::Pressure(a), UnitTag::Pressure(b)) => Some(crate::units::convert(value, a, b)),
            _ => None,
        }
    }
}

impl std::fmt::Display for UnitTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

/// 단위와 함께 저장되는 값. 한 번 만들어지면 바뀌지 않는다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UnitValue {
    pub magnitude: f64,
    pub unit: UnitTag,
}

impl UnitValue {
    pub const fn new(magnitude: f64, unit: UnitTag) -> Self {
        Self { magnitude, unit }
    }

    pub fn family(&self) -> UnitFamily {
        self.unit.family()
    }

    /// 같은 계열의 다른 단위로 표현한 새 값. 계열이 다르면 `None`.
    pub fn to(&self, unit: UnitTag) -> Option<UnitValue> {
        self.unit
            .convert(self.magnitude, unit)
            .map(|magnitude| UnitValue { magnitude, unit })
    }
}

impl std::fmt::Display for UnitValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.magnitude, self.unit)
    }
}
