use std::ops::{Add, Mul, Sub};

use serde::{Deserialize, Serialize};

use crate::conversion::ConversionError;
use crate::quantity::UnitValue;
use crate::units::Unit;

/// 계열이 타입으로 고정된 측정값.
///
/// `Measurement<DistanceUnit>`에는 거리 단위만 들어갈 수 있다.
/// 비교(`==`)는 크기와 단위를 그대로 비교하며, 단위가 다른 값의
/// 물리적 동등성은 [`Measurement::approx_eq`]로 확인한다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measurement<U> {
    pub value: f64,
    pub unit: U,
}

impl<U: Unit> Measurement<U> {
    pub const fn new(value: f64, unit: U) -> Self {
        Self { value, unit }
    }

    pub const fn zero(unit: U) -> Self {
        Self { value: 0.0, unit }
    }

    /// 지정한 단위로 환산한 크기.
    pub fn in_unit(&self, unit: U) -> f64 {
        crate::units::convert(self.value, self.unit, unit)
    }

    /// 지정한 단위로 표현한 새 측정값.
    pub fn to(&self, unit: U) -> Self {
        Self::new(self.in_unit(unit), unit)
    }

    /// 단위를 맞춘 뒤 상대 오차 `tolerance` 이내이면 같다고 본다.
    pub fn approx_eq(&self, other: &Self, tolerance: f64) -> bool {
        let other = other.in_unit(self.unit);
        let scale = self.value.abs().max(other.abs()).max(1.0);
        (self.value - other).abs() <= tolerance * scale
    }
}

impl<U: Unit> Add for Measurement<U> {
    type Output = Measurement<U>;

    /// 결과는 왼쪽 피연산자의 단위를 따른다.
    fn add(self, rhs: Self) -> Self::Output {
        Measurement::new(self.value + rhs.in_unit(self.unit), self.unit)
    }
}

impl<U: Unit> Sub for Measurement<U> {
    type Output = Measurement<U>;

    fn sub(self, rhs: Self) -> Self::Output {
        Measurement::new(self.value - rhs.in_unit(self.unit), self.unit)
    }
}

impl<U: Unit> Mul<f64> for Measurement<U> {
    type Output = Measurement<U>;

    fn mul(self, rhs: f64) -> Self::Output {
        Measurement::new(self.value * rhs, self.unit)
    }
}

impl<U: Unit> std::fmt::Display for Measurement<U> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match f.precision() {
            Some(p) => write!(f, "{:.*} {}", p, self.value, self.unit.symbol()),
            None => write!(f, "{} {}", self.value, self.unit.symbol()),
        }
    }
}

impl<U: Unit> From<Measurement<U>> for UnitValue {
    fn from(m: Measurement<U>) -> Self {
        UnitValue::new(m.value, m.unit.into_tag())
    }
}

impl<U: Unit> TryFrom<UnitValue> for Measurement<U> {
    type Error = ConversionError;

    fn try_from(value: UnitValue) -> Result<Self, Self::Error> {
        let unit = U::from_tag(value.unit).ok_or(ConversionError::FamilyMismatch {
            expected: U::FAMILY,
            actual: value.family(),
        })?;
        Ok(Measurement::new(value.magnitude, unit))
    }
}
