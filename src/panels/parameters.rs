//! 궤적 계산 범위와 사격 각도 입력 패널.

use crate::ballistics::ShotParameters;
use crate::config::MeasurementSystem;
use crate::measurement::Measurement;
use crate::panels::layout::{FieldSet, FieldSpec, UnitPreset};
use crate::panels::{upgrade, SightClickLink};
use crate::quantity::UnitTag;
use crate::system::MeasurementSystemControl;
use crate::units::{AngularUnit, DistanceUnit};

pub const MAX_DISTANCE: &str = "max_distance";
pub const STEP: &str = "step";
pub const SHOT_ANGLE: &str = "shot_angle";

const METER_0: UnitPreset = UnitPreset::new(UnitTag::Distance(DistanceUnit::Meter), 0);
const YARD_0: UnitPreset = UnitPreset::new(UnitTag::Distance(DistanceUnit::Yard), 0);

pub static PARAMETER_FIELDS: [FieldSpec; 3] = [
    FieldSpec::system_bound(MAX_DISTANCE, "Maximum distance", METER_0, YARD_0),
    FieldSpec::system_bound(STEP, "Step", METER_0, YARD_0),
    FieldSpec::user_unit(
        SHOT_ANGLE,
        "Shot angle",
        UnitPreset::new(UnitTag::Angular(AngularUnit::MOA), 2),
    ),
];

pub struct ParametersPanel {
    system: MeasurementSystem,
    fields: FieldSet,
    clicks_text: String,
    sight_clicks: Option<SightClickLink>,
    calculate_listeners: Vec<Box<dyn FnMut()>>,
}

impl Default for ParametersPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl ParametersPanel {
    /// 모든 입력이 빈 패널.
    pub fn new() -> Self {
        Self {
            system: MeasurementSystem::Metric,
            fields: FieldSet::new(&PARAMETER_FIELDS),
            clicks_text: String::new(),
            sight_clicks: None,
            calculate_listeners: Vec::new(),
        }
    }

    pub fn fields(&self) -> &FieldSet {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> &mut FieldSet {
        &mut self.fields
    }

    /// 사격 각도 필드의 표시 단위를 바꾼다 (설정의 기본 각도 단위).
    pub fn set_shot_angle_unit(&mut self, unit: AngularUnit) {
        let precision = self.fields.field(SHOT_ANGLE).precision();
        self.fields
            .field_mut(SHOT_ANGLE)
            .set_unit(UnitTag::Angular(unit), precision);
    }

    pub fn set_sight_clicks(&mut self, link: Option<SightClickLink>) {
        self.sight_clicks = link;
    }

    pub fn clicks_text(&self) -> &str {
        &self.clicks_text
    }

    pub fn set_clicks_text(&mut self, text: &str) {
        self.clicks_text = text.to_string();
    }

    /// 클릭 수만큼 사격 각도를 더한다. 클릭 제공자가 없으면 아무 일도 없다.
    ///
    /// 결과는 각도 필드의 표시 단위를 따른다. 빈 각도는 클릭 단위의 0으로 본다.
    pub fn apply_clicks(&mut self) -> bool {
        let Some(provider) = upgrade(&self.sight_clicks) else {
            return false;
        };
        let increment = provider.borrow().vertical_click();
        // 클릭 수는 정수만 받는다
        let count = self.clicks_text.trim().parse::<i32>().unwrap_or(0);
        let field = self.fields.field_mut(SHOT_ANGLE);
        let angle = match field.measurement::<AngularUnit>() {
            Some(angle) => angle,
            None => Measurement::zero(increment.unit),
        };
        let angle = angle + increment * f64::from(count);
        field.set_measurement_adopting(Some(angle));
        true
    }

    pub fn parameters(&self) -> ShotParameters {
        ShotParameters {
            maximum_distance: self.fields.field(MAX_DISTANCE).measurement_or_zero(),
            step: self.fields.field(STEP).measurement_or_zero(),
            shot_angle: self.fields.field(SHOT_ANGLE).measurement(),
        }
    }

    pub fn set_parameters(&mut self, parameters: Option<&ShotParameters>) {
        match parameters {
            Some(p) => {
                self.fields
                    .assign_adopting(MAX_DISTANCE, Some(p.maximum_distance.into()));
                self.fields.assign_adopting(STEP, Some(p.step.into()));
                self.fields
                    .assign_adopting(SHOT_ANGLE, p.shot_angle.map(Into::into));
            }
            None => {
                for (_, field) in self.fields.iter_mut() {
                    field.set_value(None);
                }
                self.clicks_text.clear();
            }
        }
    }

    /// 계산 요청을 받을 콜백을 등록한다.
    pub fn on_calculate_requested(&mut self, listener: impl FnMut() + 'static) {
        self.calculate_listeners.push(Box::new(listener));
    }

    pub fn request_calculation(&mut self) {
        tracing::debug!("궤적 계산 요청");
        for listener in self.calculate_listeners.iter_mut() {
            listener();
        }
    }
}

impl MeasurementSystemControl for ParametersPanel {
    fn measurement_system(&self) -> MeasurementSystem {
        self.system
    }

    fn set_measurement_system(&mut self, system: MeasurementSystem) {
        self.system = system;
        self.fields.apply_system(system);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panels::SightClickProvider;
    use approx::assert_relative_eq;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    struct FixedClick(Measurement<AngularUnit>);

    impl SightClickProvider for FixedClick {
        fn vertical_click(&self) -> Measurement<AngularUnit> {
            self.0
        }
    }

    fn with_click(click: Measurement<AngularUnit>) -> (ParametersPanel, Rc<RefCell<dyn SightClickProvider>>) {
        let provider: Rc<RefCell<dyn SightClickProvider>> = Rc::new(RefCell::new(FixedClick(click)));
        let mut panel = ParametersPanel::new();
        panel.set_sight_clicks(Some(Rc::downgrade(&provider)));
        (panel, provider)
    }

    #[test]
    fn starts_empty() {
        let panel = ParametersPanel::new();
        assert!(panel.fields().iter().all(|(_, f)| f.is_empty()));
        assert_eq!(panel.clicks_text(), "");
        assert_eq!(panel.parameters().shot_angle, None);
    }

    #[test]
    fn clicks_on_empty_angle() {
        let (mut panel, _provider) = with_click(Measurement::new(0.25, AngularUnit::Mil));
        panel.set_clicks_text("5");
        assert!(panel.apply_clicks());
        let angle = panel.parameters().shot_angle.unwrap();
        assert_eq!(angle.unit, AngularUnit::Mil);
        assert_relative_eq!(angle.value, 1.25, epsilon = 1e-12);
    }

    #[test]
    fn clicks_add_to_existing_angle_in_its_unit() {
        let (mut panel, _provider) = with_click(Measurement::new(0.25, AngularUnit::MOA));
        panel
            .fields_mut()
            .field_mut(SHOT_ANGLE)
            .set_measurement_adopting(Some(Measurement::new(1.0, AngularUnit::Degree)));
        panel.set_clicks_text("4");
        panel.apply_clicks();
        let angle = panel.parameters().shot_angle.unwrap();
        assert_eq!(angle.unit, AngularUnit::Degree);
        assert_relative_eq!(angle.value, 1.0 + 1.0 / 60.0, epsilon = 1e-9);
    }

    #[test]
    fn invalid_click_count_is_zero() {
        let (mut panel, _provider) = with_click(Measurement::new(0.1, AngularUnit::Mil));
        panel.set_clicks_text("many");
        panel.apply_clicks();
        assert_eq!(
            panel.parameters().shot_angle,
            Some(Measurement::zero(AngularUnit::Mil))
        );
    }

    #[test]
    fn non_integer_click_count_is_zero() {
        for text in ["NaN", "inf", "2.5", "-1e3"] {
            let (mut panel, _provider) = with_click(Measurement::new(0.25, AngularUnit::MOA));
            panel.set_clicks_text(text);
            panel.apply_clicks();
            assert_eq!(
                panel.parameters().shot_angle,
                Some(Measurement::zero(AngularUnit::MOA)),
                "{text}"
            );
        }
        let (mut panel, _provider) = with_click(Measurement::new(0.25, AngularUnit::MOA));
        panel.set_clicks_text(" -3 ");
        panel.apply_clicks();
        assert_eq!(
            panel.parameters().shot_angle,
            Some(Measurement::new(-0.75, AngularUnit::MOA))
        );
    }

    #[test]
    fn no_provider_is_noop() {
        let mut panel = ParametersPanel::new();
        panel.set_clicks_text("5");
        assert!(!panel.apply_clicks());
        assert!(panel.fields().field(SHOT_ANGLE).is_empty());

        let (mut panel, provider) = with_click(Measurement::new(0.1, AngularUnit::Mil));
        drop(provider);
        assert!(!panel.apply_clicks());
    }

    #[test]
    fn round_trip_and_system_switch() {
        let mut panel = ParametersPanel::new();
        let p = ShotParameters {
            maximum_distance: Measurement::new(1000.0, DistanceUnit::Yard),
            step: Measurement::new(100.0, DistanceUnit::Yard),
            shot_angle: Some(Measurement::new(2.0, AngularUnit::Mil)),
        };
        panel.set_parameters(Some(&p));
        assert_eq!(panel.parameters(), p);

        panel.set_measurement_system(MeasurementSystem::Metric);
        let read = panel.parameters();
        assert_eq!(read.maximum_distance.unit, DistanceUnit::Meter);
        assert_relative_eq!(read.maximum_distance.value, 914.4, epsilon = 1e-9);
        assert_eq!(read.shot_angle, p.shot_angle);
    }

    #[test]
    fn shot_angle_unit_from_config() {
        let mut panel = ParametersPanel::new();
        panel.set_shot_angle_unit(AngularUnit::Mil);
        assert_eq!(
            panel.fields().field(SHOT_ANGLE).unit(),
            UnitTag::Angular(AngularUnit::Mil)
        );
    }

    #[test]
    fn calculate_request_notifies() {
        let mut panel = ParametersPanel::new();
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        panel.on_calculate_requested(move || counter.set(counter.get() + 1));
        panel.request_calculation();
        panel.request_calculation();
        assert_eq!(calls.get(), 2);
    }
}
