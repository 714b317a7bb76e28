//! 패널 트리 조립.
//!
//! 루트가 모든 패널을 소유하고 현재 측정 체계를 기억한다. 소총 패널은
//! 영점 조정용 대기/탄약 패널을, 사격 조건 패널은 소총 패널의 클릭 값을
//! 약한 참조로만 알고 있다.

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::ballistics::{Ammunition, Atmosphere, Rifle, ShotParameters};
use crate::config::{Config, MeasurementSystem};
use crate::panels::{
    AmmoPanel, AmmunitionProvider, AtmospherePanel, AtmosphereProvider, ParametersPanel,
    SharedPanel, SightClickProvider, WeaponPanel,
};
use crate::system::MeasurementSystemControl;
use crate::units::AngularUnit;

/// 모든 패널의 현재 레코드.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelSnapshot {
    pub ammunition: Ammunition,
    pub rifle: Rifle,
    pub atmosphere: Atmosphere,
    pub parameters: ShotParameters,
}

impl PanelSnapshot {
    /// 사람이 읽을 수 있는 TOML 문서로 쓴다.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

pub struct PanelTree {
    system: MeasurementSystem,
    pub ammo: SharedPanel<AmmoPanel>,
    pub weapon: SharedPanel<WeaponPanel>,
    pub atmosphere: SharedPanel<AtmospherePanel>,
    pub parameters: SharedPanel<ParametersPanel>,
    pub zero_atmosphere: SharedPanel<AtmospherePanel>,
    pub zero_ammunition: SharedPanel<AmmoPanel>,
}

impl PanelTree {
    /// 패널을 만들고 연결한 뒤 측정 체계를 적용하고 기본값으로 채운다.
    pub fn new(system: MeasurementSystem, angular_unit: AngularUnit) -> Self {
        let tree = Self {
            system,
            ammo: Rc::new(RefCell::new(AmmoPanel::new())),
            weapon: Rc::new(RefCell::new(WeaponPanel::new())),
            atmosphere: Rc::new(RefCell::new(AtmospherePanel::new())),
            parameters: Rc::new(RefCell::new(ParametersPanel::new())),
            zero_atmosphere: Rc::new(RefCell::new(AtmospherePanel::new())),
            zero_ammunition: Rc::new(RefCell::new(AmmoPanel::new())),
        };

        let zero_atmosphere: Rc<RefCell<dyn AtmosphereProvider>> = tree.zero_atmosphere.clone();
        let zero_ammunition: Rc<RefCell<dyn AmmunitionProvider>> = tree.zero_ammunition.clone();
        let clicks: Rc<RefCell<dyn SightClickProvider>> = tree.weapon.clone();
        {
            let mut weapon = tree.weapon.borrow_mut();
            weapon.set_zero_atmosphere(Some(Rc::downgrade(&zero_atmosphere)));
            weapon.set_zero_ammunition(Some(Rc::downgrade(&zero_ammunition)));
        }
        {
            let mut parameters = tree.parameters.borrow_mut();
            parameters.set_sight_clicks(Some(Rc::downgrade(&clicks)));
            parameters.set_shot_angle_unit(angular_unit);
        }

        tree.apply_system();
        tree.reset();
        tree
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.measurement_system, config.default_angular_unit)
    }

    /// 모든 패널을 현재 측정 체계의 기본값으로 되돌린다.
    pub fn reset(&self) {
        self.ammo.borrow_mut().set_ammunition(None);
        self.atmosphere.borrow_mut().set_atmosphere(None);
        // 영점 대기/탄약은 소총 패널이 함께 되돌린다
        self.weapon.borrow_mut().set_rifle(None);
        self.parameters.borrow_mut().set_parameters(None);
    }

    pub fn snapshot(&self) -> PanelSnapshot {
        PanelSnapshot {
            ammunition: self.ammo.borrow().ammunition(),
            rifle: self.weapon.borrow().rifle(),
            atmosphere: self.atmosphere.borrow().atmosphere(),
            parameters: self.parameters.borrow().parameters(),
        }
    }

    pub fn restore(&self, snapshot: &PanelSnapshot) {
        self.ammo.borrow_mut().set_ammunition(Some(&snapshot.ammunition));
        self.weapon.borrow_mut().set_rifle(Some(&snapshot.rifle));
        self.atmosphere
            .borrow_mut()
            .set_atmosphere(Some(&snapshot.atmosphere));
        self.parameters
            .borrow_mut()
            .set_parameters(Some(&snapshot.parameters));
    }

    fn apply_system(&self) {
        let system = self.system;
        self.ammo.borrow_mut().set_measurement_system(system);
        self.atmosphere.borrow_mut().set_measurement_system(system);
        self.parameters.borrow_mut().set_measurement_system(system);
        // 영점 대기/탄약에는 소총 패널이 전파한다
        self.weapon.borrow_mut().set_measurement_system(system);
    }
}

impl MeasurementSystemControl for PanelTree {
    fn measurement_system(&self) -> MeasurementSystem {
        self.system
    }

    fn set_measurement_system(&mut self, system: MeasurementSystem) {
        tracing::debug!(from = %self.system, to = %system, "측정 체계 변경");
        self.system = system;
        self.apply_system();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panels::parameters::SHOT_ANGLE;
    use crate::panels::weapon::ZERO_DISTANCE;
    use crate::quantity::UnitTag;
    use crate::units::DistanceUnit;

    #[test]
    fn children_are_wired() {
        let tree = PanelTree::new(MeasurementSystem::Metric, AngularUnit::MOA);
        let snapshot = tree.snapshot();
        assert!(snapshot.rifle.zero.atmosphere.is_some());
        assert!(snapshot.rifle.zero.ammunition.is_some());
    }

    #[test]
    fn imperial_tree_starts_with_imperial_defaults() {
        let tree = PanelTree::new(MeasurementSystem::Imperial, AngularUnit::Mil);
        let s = tree.snapshot();
        assert_eq!(s.rifle.zero.distance.unit, DistanceUnit::Yard);
        assert_eq!(s.rifle.zero.distance.value, 25.0);
        assert_eq!(
            s.rifle.zero.atmosphere.unwrap().altitude.unit,
            DistanceUnit::Foot
        );
        assert_eq!(
            tree.parameters.borrow().fields().field(SHOT_ANGLE).unit(),
            UnitTag::Angular(AngularUnit::Mil)
        );
    }

    #[test]
    fn switching_twice_is_idempotent() {
        let mut tree = PanelTree::new(MeasurementSystem::Metric, AngularUnit::MOA);
        tree.set_measurement_system(MeasurementSystem::Imperial);
        let once = tree.snapshot();
        tree.set_measurement_system(MeasurementSystem::Imperial);
        assert_eq!(tree.snapshot(), once);
        assert_eq!(
            tree.weapon.borrow().fields().field(ZERO_DISTANCE).unit(),
            UnitTag::Distance(DistanceUnit::Yard)
        );
        assert_eq!(
            tree.zero_ammunition.borrow().measurement_system(),
            MeasurementSystem::Imperial
        );
    }

    #[test]
    fn switch_preserves_physical_values() {
        let mut tree = PanelTree::new(MeasurementSystem::Metric, AngularUnit::MOA);
        let before = tree.snapshot();
        tree.set_measurement_system(MeasurementSystem::Imperial);
        tree.set_measurement_system(MeasurementSystem::Metric);
        let after = tree.snapshot();
        assert!(after
            .rifle
            .zero
            .distance
            .approx_eq(&before.rifle.zero.distance, 1e-12));
        assert!(after
            .atmosphere
            .pressure
            .approx_eq(&before.atmosphere.pressure, 1e-12));
    }

    #[test]
    fn snapshot_toml_round_trip() {
        for system in [MeasurementSystem::Metric, MeasurementSystem::Imperial] {
            let tree = PanelTree::new(system, AngularUnit::MOA);
            let snapshot = tree.snapshot();
            let text = snapshot.to_toml().unwrap();
            let back: PanelSnapshot = toml::from_str(&text).unwrap();
            assert_eq!(back, snapshot, "{system}");
        }
    }

    #[test]
    fn snapshot_toml_keeps_optional_parts() {
        let tree = PanelTree::new(MeasurementSystem::Imperial, AngularUnit::Mil);
        let mut snapshot = tree.snapshot();
        snapshot.rifle.rifling = Some(crate::ballistics::Rifling {
            direction: crate::ballistics::TwistDirection::Left,
            step: crate::measurement::Measurement::new(10.0, DistanceUnit::Inch),
        });
        snapshot.parameters.shot_angle =
            Some(crate::measurement::Measurement::new(1.5, AngularUnit::Mil));
        snapshot.ammunition.bullet_diameter =
            Some(crate::measurement::Measurement::new(0.308, DistanceUnit::Inch));
        let back: PanelSnapshot = toml::from_str(&snapshot.to_toml().unwrap()).unwrap();
        assert_eq!(back, snapshot);
    }

    #[test]
    fn restore_round_trip() {
        let tree = PanelTree::new(MeasurementSystem::Metric, AngularUnit::MOA);
        let mut snapshot = tree.snapshot();
        snapshot.parameters.maximum_distance.value = 800.0;
        snapshot.atmosphere.humidity = 0.3;
        tree.restore(&snapshot);
        assert_eq!(tree.snapshot(), snapshot);
    }
}
