//! 입력 패널 바인더 모음.
//!
//! 각 패널은 필드 레이아웃과 도메인 레코드 사이를 요청이 있을 때만 변환한다.
//! 부모 패널은 자식 패널을 구체 타입이 아닌 능력(트레이트)으로 참조하며,
//! 그 참조는 `Weak`이라 수명은 트리를 조립한 쪽이 정한다.

pub mod ammo;
pub mod atmosphere;
pub mod humidity;
pub mod layout;
pub mod parameters;
pub mod tree;
pub mod weapon;

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::ballistics::{Ammunition, Atmosphere};
use crate::measurement::Measurement;
use crate::system::MeasurementSystemControl;
use crate::units::AngularUnit;

pub use ammo::AmmoPanel;
pub use atmosphere::AtmospherePanel;
pub use humidity::{HumidityInput, StepKey};
pub use layout::{FieldSet, FieldSpec, UnitPreset};
pub use parameters::ParametersPanel;
pub use tree::{PanelSnapshot, PanelTree};
pub use weapon::WeaponPanel;

/// 대기 레코드를 읽고 쓸 수 있는 패널.
pub trait AtmosphereProvider: MeasurementSystemControl {
    fn atmosphere(&self) -> Atmosphere;

    /// `None`이면 현재 측정 체계의 기본값으로 되돌린다.
    fn set_atmosphere(&mut self, atmosphere: Option<&Atmosphere>);
}

/// 탄약 레코드를 읽고 쓸 수 있는 패널.
pub trait AmmunitionProvider: MeasurementSystemControl {
    fn ammunition(&self) -> Ammunition;

    /// `None`이면 기본값으로 되돌린다.
    fn set_ammunition(&mut self, ammunition: Option<&Ammunition>);
}

/// 조준경 클릭 한 번의 각도를 알려 주는 협력자.
pub trait SightClickProvider {
    fn vertical_click(&self) -> Measurement<AngularUnit>;
}

pub type SharedPanel<T> = Rc<RefCell<T>>;
pub type AtmosphereLink = Weak<RefCell<dyn AtmosphereProvider>>;
pub type AmmunitionLink = Weak<RefCell<dyn AmmunitionProvider>>;
pub type SightClickLink = Weak<RefCell<dyn SightClickProvider>>;

/// 약한 참조가 아직 살아 있으면 꺼낸다.
pub(crate) fn upgrade<T: ?Sized>(link: &Option<Weak<RefCell<T>>>) -> Option<Rc<RefCell<T>>> {
    link.as_ref().and_then(Weak::upgrade)
}
