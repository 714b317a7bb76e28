//! 소총(조준경/영점/강선) 입력 패널.
//!
//! 영점 조정용 대기·탄약 패널은 능력 트레이트로만 알고 있으며,
//! 측정 체계 변경과 레코드 설정을 그쪽으로 넘긴다.

use crate::ballistics::{Rifle, Rifling, Sight, TwistDirection, ZeroingParameters};
use crate::config::MeasurementSystem;
use crate::measurement::Measurement;
use crate::panels::layout::{FieldSet, FieldSpec, UnitPreset};
use crate::panels::{upgrade, AmmunitionLink, AtmosphereLink, SightClickProvider};
use crate::quantity::UnitTag;
use crate::system::MeasurementSystemControl;
use crate::units::{AngularUnit, DistanceUnit};

pub const SIGHT_HEIGHT: &str = "sight_height";
pub const ZERO_DISTANCE: &str = "zero_distance";
pub const RIFLING_STEP: &str = "rifling_step";
pub const VERTICAL_CLICK: &str = "vertical_click";
pub const HORIZONTAL_CLICK: &str = "horizontal_click";

const CLICK_PRESET: UnitPreset = UnitPreset::new(UnitTag::Angular(AngularUnit::MOA), 2);
const MM_0: UnitPreset = UnitPreset::new(UnitTag::Distance(DistanceUnit::Millimeter), 0);
const INCH_1: UnitPreset = UnitPreset::new(UnitTag::Distance(DistanceUnit::Inch), 1);

pub static WEAPON_FIELDS: [FieldSpec; 5] = [
    FieldSpec::system_bound(SIGHT_HEIGHT, "Sight height", MM_0, INCH_1),
    FieldSpec::system_bound(
        ZERO_DISTANCE,
        "Zero distance",
        UnitPreset::new(UnitTag::Distance(DistanceUnit::Meter), 0),
        UnitPreset::new(UnitTag::Distance(DistanceUnit::Yard), 0),
    ),
    FieldSpec::system_bound(RIFLING_STEP, "Rifling step", MM_0, INCH_1),
    FieldSpec::user_unit(VERTICAL_CLICK, "Vertical click", CLICK_PRESET),
    FieldSpec::user_unit(HORIZONTAL_CLICK, "Horizontal click", CLICK_PRESET),
];

/// 클릭 값이 없을 때 쓰는 기본값
pub const DEFAULT_CLICK: Measurement<AngularUnit> = Measurement::new(0.25, AngularUnit::MOA);

fn default_zero_distance(system: MeasurementSystem) -> Measurement<DistanceUnit> {
    match system {
        MeasurementSystem::Metric => Measurement::new(100.0, DistanceUnit::Meter),
        MeasurementSystem::Imperial => Measurement::new(25.0, DistanceUnit::Yard),
    }
}

fn default_sight_height(system: MeasurementSystem) -> Measurement<DistanceUnit> {
    match system {
        MeasurementSystem::Metric => Measurement::new(50.0, DistanceUnit::Millimeter),
        MeasurementSystem::Imperial => Measurement::new(2.6, DistanceUnit::Inch),
    }
}

pub struct WeaponPanel {
    system: MeasurementSystem,
    fields: FieldSet,
    rifling_direction: Option<TwistDirection>,
    zero_atmosphere: Option<AtmosphereLink>,
    zero_ammunition: Option<AmmunitionLink>,
}

impl Default for WeaponPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl WeaponPanel {
    pub fn new() -> Self {
        let mut panel = Self {
            system: MeasurementSystem::Metric,
            fields: FieldSet::new(&WEAPON_FIELDS),
            rifling_direction: None,
            zero_atmosphere: None,
            zero_ammunition: None,
        };
        panel.set_rifle(None);
        panel
    }

    pub fn fields(&self) -> &FieldSet {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> &mut FieldSet {
        &mut self.fields
    }

    /// 영점 조정 대기 패널을 연결한다.
    pub fn set_zero_atmosphere(&mut self, link: Option<AtmosphereLink>) {
        self.zero_atmosphere = link;
    }

    /// 영점 조정 탄약 패널을 연결한다.
    pub fn set_zero_ammunition(&mut self, link: Option<AmmunitionLink>) {
        self.zero_ammunition = link;
    }

    pub fn rifling_direction(&self) -> Option<TwistDirection> {
        self.rifling_direction
    }

    /// 회전 방향을 고른다. 방향이 있을 때만 강선 피치 입력이 켜진다.
    pub fn set_rifling_direction(&mut self, direction: Option<TwistDirection>) {
        self.rifling_direction = direction;
        self.fields
            .field_mut(RIFLING_STEP)
            .set_enabled(direction.is_some());
    }

    pub fn rifle(&self) -> Rifle {
        let zero = ZeroingParameters {
            distance: self.fields.field(ZERO_DISTANCE).measurement_or_zero(),
            atmosphere: upgrade(&self.zero_atmosphere).map(|p| p.borrow().atmosphere()),
            ammunition: upgrade(&self.zero_ammunition).map(|p| p.borrow().ammunition()),
        };
        let rifling = self.rifling_direction.map(|direction| Rifling {
            direction,
            step: self.fields.field(RIFLING_STEP).measurement_or_zero(),
        });
        Rifle {
            sight: Sight {
                height: self.fields.field(SIGHT_HEIGHT).measurement_or_zero(),
                vertical_click: self.fields.field(VERTICAL_CLICK).measurement(),
                horizontal_click: self.fields.field(HORIZONTAL_CLICK).measurement(),
            },
            zero,
            rifling,
        }
    }

    /// 레코드를 입력 상자에 옮긴다. `None`이면 현재 측정 체계의 기본값을 쓴다.
    pub fn set_rifle(&mut self, rifle: Option<&Rifle>) {
        let rifling = rifle.and_then(|r| r.rifling.as_ref());
        match rifling {
            Some(r) => {
                self.set_rifling_direction(Some(r.direction));
                self.fields.assign_adopting(RIFLING_STEP, Some(r.step.into()));
            }
            None => {
                self.set_rifling_direction(None);
                self.fields.field_mut(RIFLING_STEP).set_value(None);
            }
        }

        let zero = rifle.map(|r| &r.zero);
        let distance = zero
            .map(|z| z.distance)
            .unwrap_or_else(|| default_zero_distance(self.system));
        self.fields
            .assign_adopting(ZERO_DISTANCE, Some(distance.into()));
        if let Some(atmosphere) = upgrade(&self.zero_atmosphere) {
            atmosphere
                .borrow_mut()
                .set_atmosphere(zero.and_then(|z| z.atmosphere.as_ref()));
        }
        if let Some(ammunition) = upgrade(&self.zero_ammunition) {
            ammunition
                .borrow_mut()
                .set_ammunition(zero.and_then(|z| z.ammunition.as_ref()));
        }

        let sight = rifle.map(|r| &r.sight);
        let height = sight
            .map(|s| s.height)
            .unwrap_or_else(|| default_sight_height(self.system));
        self.fields.assign_adopting(SIGHT_HEIGHT, Some(height.into()));
        let vertical = sight.and_then(|s| s.vertical_click).unwrap_or(DEFAULT_CLICK);
        let horizontal = sight.and_then(|s| s.horizontal_click).unwrap_or(DEFAULT_CLICK);
        self.fields
            .assign_adopting(VERTICAL_CLICK, Some(vertical.into()));
        self.fields
            .assign_adopting(HORIZONTAL_CLICK, Some(horizontal.into()));
    }
}

impl MeasurementSystemControl for WeaponPanel {
    fn measurement_system(&self) -> MeasurementSystem {
        self.system
    }

    fn set_measurement_system(&mut self, system: MeasurementSystem) {
        tracing::debug!(%system, "소총 패널 측정 체계 변경");
        self.system = system;
        self.fields.apply_system(system);
        if let Some(atmosphere) = upgrade(&self.zero_atmosphere) {
            atmosphere.borrow_mut().set_measurement_system(system);
        }
        if let Some(ammunition) = upgrade(&self.zero_ammunition) {
            ammunition.borrow_mut().set_measurement_system(system);
        }
    }
}

impl SightClickProvider for WeaponPanel {
    fn vertical_click(&self) -> Measurement<AngularUnit> {
        self.fields
            .field(VERTICAL_CLICK)
            .measurement()
            .unwrap_or(DEFAULT_CLICK)
    }
}
