//! 패널이 주고받는 탄도 계산 입력 레코드.
//!
//! 궤적 계산 자체는 외부 라이브러리의 몫이며, 여기서는 입력값의 모양만 정의한다.

pub mod ammunition;
pub mod atmosphere;
pub mod rifle;
pub mod shot;

pub use ammunition::{
    bc_from_sectional_density, Ammunition, BallisticCoefficient, BallisticCoefficientValueType,
    DragTableId,
};
pub use atmosphere::Atmosphere;
pub use rifle::{Rifle, Rifling, Sight, TwistDirection, ZeroingParameters};
pub use shot::ShotParameters;
