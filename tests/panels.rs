//! 패널 트리 전체 흐름 회귀 테스트.
use approx::assert_relative_eq;
use ballistic_panels::ballistics::{DragTableId, TwistDirection};
use ballistic_panels::config::MeasurementSystem;
use ballistic_panels::measurement::Measurement;
use ballistic_panels::panels::weapon::{RIFLING_STEP, VERTICAL_CLICK};
use ballistic_panels::panels::{AmmunitionProvider, PanelTree};
use ballistic_panels::quantity::UnitTag;
use ballistic_panels::system::MeasurementSystemControl;
use ballistic_panels::units::{AngularUnit, DistanceUnit, PressureUnit, WeightUnit};

#[test]
fn clicks_from_rifle_move_shot_angle() {
    let tree = PanelTree::new(MeasurementSystem::Metric, AngularUnit::MOA);
    tree.weapon
        .borrow_mut()
        .fields_mut()
        .field_mut(VERTICAL_CLICK)
        .set_measurement_adopting(Some(Measurement::new(0.25, AngularUnit::Mil)));

    let mut parameters = tree.parameters.borrow_mut();
    parameters.set_clicks_text("5");
    assert!(parameters.apply_clicks());
    let angle = parameters.parameters().shot_angle.unwrap();
    assert_eq!(angle.unit, AngularUnit::Mil);
    assert_relative_eq!(angle.value, 1.25, epsilon = 1e-12);
}

#[test]
fn imperial_round_trip_keeps_values() {
    let mut tree = PanelTree::new(MeasurementSystem::Metric, AngularUnit::MOA);
    let metric = tree.snapshot();

    tree.set_measurement_system(MeasurementSystem::Imperial);
    let imperial = tree.snapshot();
    assert_eq!(imperial.atmosphere.pressure.unit, PressureUnit::InchesOfMercury);
    assert_eq!(imperial.parameters.maximum_distance.unit, DistanceUnit::Yard);
    assert!(imperial
        .atmosphere
        .pressure
        .approx_eq(&metric.atmosphere.pressure, 1e-9));

    tree.set_measurement_system(MeasurementSystem::Metric);
    let back = tree.snapshot();
    assert!(back
        .parameters
        .maximum_distance
        .approx_eq(&metric.parameters.maximum_distance, 1e-9));
    assert_eq!(back.atmosphere.pressure.unit, PressureUnit::MillimetersOfMercury);
}

#[test]
fn rifling_step_follows_direction() {
    let tree = PanelTree::new(MeasurementSystem::Metric, AngularUnit::MOA);
    let mut weapon = tree.weapon.borrow_mut();
    assert!(!weapon.fields().field(RIFLING_STEP).is_enabled());
    weapon.set_rifling_direction(Some(TwistDirection::Right));
    assert!(weapon.fields().field(RIFLING_STEP).is_enabled());
    weapon
        .fields_mut()
        .field_mut(RIFLING_STEP)
        .set_measurement_adopting(Some(Measurement::new(10.0, DistanceUnit::Inch)));
    let rifling = weapon.rifle().rifling.unwrap();
    assert_eq!(rifling.direction, TwistDirection::Right);
    assert_eq!(rifling.step, Measurement::new(10.0, DistanceUnit::Inch));
}

#[test]
fn zero_ammunition_is_independent_of_main_ammunition() {
    let tree = PanelTree::new(MeasurementSystem::Metric, AngularUnit::MOA);
    let mut ammo = tree.ammo.borrow().ammunition();
    ammo.weight = Measurement::new(175.0, WeightUnit::Grain);
    tree.ammo.borrow_mut().set_ammunition(Some(&ammo));

    let zero = tree.snapshot().rifle.zero.ammunition.unwrap();
    assert_ne!(zero.weight, ammo.weight);
}

#[test]
fn sectional_density_sets_custom_coefficient() {
    let tree = PanelTree::new(MeasurementSystem::Imperial, AngularUnit::MOA);
    let mut ammo = tree.ammo.borrow_mut();
    let fields = ammo.fields_mut();
    fields
        .field_mut("bullet_weight")
        .set_measurement_adopting(Some(Measurement::new(180.0, WeightUnit::Grain)));
    fields
        .field_mut("bullet_diameter")
        .set_measurement_adopting(Some(Measurement::new(0.308, DistanceUnit::Inch)));
    assert!(ammo.sectional_density_to_bc());
    let bc = ammo.ballistic_coefficient_input();
    assert_eq!(bc.table, DragTableId::GC);
    assert_relative_eq!(bc.value, 0.27106, epsilon = 1e-12);
    assert_eq!(
        ammo.fields().field("bullet_weight").unit(),
        UnitTag::Weight(WeightUnit::Grain)
    );
}

#[test]
fn malformed_click_count_leaves_zero_angle() {
    let tree = PanelTree::new(MeasurementSystem::Metric, AngularUnit::MOA);
    let mut parameters = tree.parameters.borrow_mut();
    for text in ["NaN", "2.5"] {
        parameters.set_parameters(None);
        parameters.set_clicks_text(text);
        assert!(parameters.apply_clicks());
        let angle = parameters.parameters().shot_angle.unwrap();
        assert_eq!(angle, Measurement::zero(AngularUnit::MOA), "{text}");
        assert!(angle.value.is_finite());
    }
}
