//! 단위 정의 및 변환 모듈 모음.
//!
//! 계열마다 하나의 enum을 두고, 내부 기준 단위를 거쳐 변환한다.
//! 계열 간의 혼동은 [`Unit`] 트레이트의 연관 상수로 컴파일 시점에 막는다.

pub mod angular;
pub mod distance;
pub mod pressure;
pub mod temperature;
pub mod velocity;
pub mod weight;

pub use angular::AngularUnit;
pub use distance::DistanceUnit;
pub use pressure::PressureUnit;
pub use temperature::TemperatureUnit;
pub use velocity::VelocityUnit;
pub use weight::WeightUnit;

use crate::quantity::{UnitFamily, UnitTag};

/// 한 물리량 계열에 속하는 단위 enum이 구현하는 공통 인터페이스.
pub trait Unit: Copy + PartialEq + std::fmt::Debug + 'static {
    /// 이 단위가 속한 계열.
    const FAMILY: UnitFamily;

    /// 계열의 모든 단위 (UI 콤보 순서).
    const ALL: &'static [Self];

    /// 값을 계열의 내부 기준 단위로 환산한다.
    fn to_base(self, value: f64) -> f64;

    /// 내부 기준 단위 값을 이 단위로 환산한다.
    fn from_base(self, value: f64) -> f64;

    /// 화면에 표시할 단위 기호.
    fn symbol(self) -> &'static str;

    fn into_tag(self) -> UnitTag;

    /// 동적 태그에서 이 계열의 단위를 꺼낸다. 계열이 다르면 `None`.
    fn from_tag(tag: UnitTag) -> Option<Self>;
}

/// 같은 계열 안에서 값을 변환한다.
pub fn convert<U: Unit>(value: f64, from: U, to: U) -> f64 {
    if from == to {
        value
    } else {
        to.from_base(from.to_base(value))
    }
}
