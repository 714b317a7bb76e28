//! 패널 레이아웃: 필드 이름 → 계열/측정 체계별 단위·자릿수.
//!
//! 패널은 정적 [`FieldSpec`] 목록으로 필드를 선언하고, [`FieldSet`]이
//! 그 목록대로 필드를 만들어 보관한다. 렌더링 어댑터는 같은 목록을
//! 순회하며 입력 상자와 단위 콤보를 그린다.

use crate::config::MeasurementSystem;
use crate::field::MeasurementField;
use crate::quantity::{UnitFamily, UnitTag, UnitValue};

/// 단위와 소수 자릿수 한 쌍.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitPreset {
    pub unit: UnitTag,
    pub precision: usize,
}

impl UnitPreset {
    pub const fn new(unit: UnitTag, precision: usize) -> Self {
        Self { unit, precision }
    }
}

/// 패널 필드 하나의 선언.
///
/// `metric`/`imperial`이 없으면 측정 체계 전환의 영향을 받지 않는다(각도 필드).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub family: UnitFamily,
    pub initial: UnitPreset,
    pub metric: Option<UnitPreset>,
    pub imperial: Option<UnitPreset>,
}

impl FieldSpec {
    /// 측정 체계에 따라 단위가 바뀌는 필드. 처음에는 미터법 단위를 쓴다.
    pub const fn system_bound(
        name: &'static str,
        label: &'static str,
        metric: UnitPreset,
        imperial: UnitPreset,
    ) -> Self {
        Self {
            name,
            label,
            family: metric.unit.family(),
            initial: metric,
            metric: Some(metric),
            imperial: Some(imperial),
        }
    }

    /// 사용자가 고른 단위를 유지하는 필드.
    pub const fn user_unit(name: &'static str, label: &'static str, initial: UnitPreset) -> Self {
        Self {
            name,
            label,
            family: initial.unit.family(),
            initial,
            metric: None,
            imperial: None,
        }
    }

    pub fn preset(&self, system: MeasurementSystem) -> Option<UnitPreset> {
        match system {
            MeasurementSystem::Metric => self.metric,
            MeasurementSystem::Imperial => self.imperial,
        }
    }

    /// 단위가 어느 체계의 기본 단위와 같으면 그 프리셋을 돌려준다.
    pub fn preset_for_unit(&self, unit: UnitTag) -> Option<UnitPreset> {
        [self.metric, self.imperial]
            .into_iter()
            .flatten()
            .find(|p| p.unit == unit)
    }
}

/// 레이아웃 순서대로 필드를 보관한다.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSet {
    entries: Vec<(&'static FieldSpec, MeasurementField)>,
}

impl FieldSet {
    pub fn new(specs: &'static [FieldSpec]) -> Self {
        let entries = specs
            .iter()
            .map(|spec| {
                (
                    spec,
                    MeasurementField::new(spec.initial.unit, spec.initial.precision),
                )
            })
            .collect();
        Self { entries }
    }

    /// # Panics
    /// 레이아웃에 없는 이름이면 패닉한다.
    pub fn field(&self, name: &str) -> &MeasurementField {
        self.entries
            .iter()
            .find(|(spec, _)| spec.name == name)
            .map(|(_, field)| field)
            .unwrap_or_else(|| panic!("알 수 없는 필드: {name}"))
    }

    /// # Panics
    /// 레이아웃에 없는 이름이면 패닉한다.
    pub fn field_mut(&mut self, name: &str) -> &mut MeasurementField {
        self.entries
            .iter_mut()
            .find(|(spec, _)| spec.name == name)
            .map(|(_, field)| field)
            .unwrap_or_else(|| panic!("알 수 없는 필드: {name}"))
    }

    pub fn spec(&self, name: &str) -> Option<&'static FieldSpec> {
        self.entries
            .iter()
            .find(|(spec, _)| spec.name == name)
            .map(|(spec, _)| *spec)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static FieldSpec, &MeasurementField)> {
        self.entries.iter().map(|(spec, field)| (*spec, field))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&'static FieldSpec, &mut MeasurementField)> {
        self.entries.iter_mut().map(|(spec, field)| (*spec, field))
    }

    /// 체계별 프리셋이 있는 모든 필드의 표시 단위를 바꾼다.
    pub fn apply_system(&mut self, system: MeasurementSystem) {
        for (spec, field) in self.entries.iter_mut() {
            if let Some(preset) = spec.preset(system) {
                field.set_unit(preset.unit, preset.precision);
            }
        }
    }

    /// 레코드 값을 넣으면서 그 단위를 표시 단위로 삼는다.
    /// 단위가 체계 프리셋과 같으면 프리셋의 자릿수도 따른다.
    pub fn assign_adopting(&mut self, name: &str, value: Option<UnitValue>) {
        let preset = value.and_then(|v| self.spec(name).and_then(|s| s.preset_for_unit(v.unit)));
        let field = self.field_mut(name);
        if let Some(preset) = preset {
            field.set_unit(preset.unit, preset.precision);
        }
        field.set_value_adopting(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::{AngularUnit, DistanceUnit};

    static SPECS: [FieldSpec; 2] = [
        FieldSpec::system_bound(
            "diameter",
            "Diameter",
            UnitPreset::new(UnitTag::Distance(DistanceUnit::Millimeter), 2),
            UnitPreset::new(UnitTag::Distance(DistanceUnit::Inch), 3),
        ),
        FieldSpec::user_unit(
            "angle",
            "Angle",
            UnitPreset::new(UnitTag::Angular(AngularUnit::MOA), 2),
        ),
    ];

    #[test]
    fn new_fields_are_empty_in_initial_unit() {
        let set = FieldSet::new(&SPECS);
        assert!(set.field("diameter").is_empty());
        assert_eq!(set.field("diameter").unit(), UnitTag::Distance(DistanceUnit::Millimeter));
        assert_eq!(set.iter().count(), 2);
    }

    #[test]
    fn apply_system_skips_user_unit_fields() {
        let mut set = FieldSet::new(&SPECS);
        set.field_mut("angle")
            .set_unit(UnitTag::Angular(AngularUnit::Mil), 1);
        set.apply_system(MeasurementSystem::Imperial);
        assert_eq!(set.field("diameter").unit(), UnitTag::Distance(DistanceUnit::Inch));
        assert_eq!(set.field("diameter").precision(), 3);
        assert_eq!(set.field("angle").unit(), UnitTag::Angular(AngularUnit::Mil));
    }

    #[test]
    fn adopting_preset_unit_takes_its_precision() {
        let mut set = FieldSet::new(&SPECS);
        set.assign_adopting(
            "diameter",
            Some(UnitValue::new(0.308, UnitTag::Distance(DistanceUnit::Inch))),
        );
        assert_eq!(set.field("diameter").precision(), 3);
        assert_eq!(set.field("diameter").text(), "0.308");

        set.assign_adopting(
            "diameter",
            Some(UnitValue::new(0.8, UnitTag::Distance(DistanceUnit::Centimeter))),
        );
        assert_eq!(set.field("diameter").unit(), UnitTag::Distance(DistanceUnit::Centimeter));
        assert_eq!(set.field("diameter").precision(), 3);
    }

    #[test]
    #[should_panic]
    fn unknown_field_name_fails_fast() {
        let set = FieldSet::new(&SPECS);
        let _ = set.field("weight");
    }
}
