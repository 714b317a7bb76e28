//! 대기 조건 입력 패널.

use crate::ballistics::Atmosphere;
use crate::config::MeasurementSystem;
use crate::measurement::Measurement;
use crate::panels::humidity::HumidityInput;
use crate::panels::layout::{FieldSet, FieldSpec, UnitPreset};
use crate::panels::AtmosphereProvider;
use crate::quantity::UnitTag;
use crate::system::MeasurementSystemControl;
use crate::units::{DistanceUnit, PressureUnit, TemperatureUnit};

pub const ALTITUDE: &str = "altitude";
pub const PRESSURE: &str = "pressure";
pub const TEMPERATURE: &str = "temperature";

pub static ATMOSPHERE_FIELDS: [FieldSpec; 3] = [
    FieldSpec::system_bound(
        ALTITUDE,
        "Altitude",
        UnitPreset::new(UnitTag::Distance(DistanceUnit::Meter), 0),
        UnitPreset::new(UnitTag::Distance(DistanceUnit::Foot), 0),
    ),
    FieldSpec::system_bound(
        PRESSURE,
        "Pressure",
        UnitPreset::new(UnitTag::Pressure(PressureUnit::MillimetersOfMercury), 1),
        UnitPreset::new(UnitTag::Pressure(PressureUnit::InchesOfMercury), 2),
    ),
    FieldSpec::system_bound(
        TEMPERATURE,
        "Temperature",
        UnitPreset::new(UnitTag::Temperature(TemperatureUnit::Celsius), 1),
        UnitPreset::new(UnitTag::Temperature(TemperatureUnit::Fahrenheit), 1),
    ),
];

/// 측정 체계별 표준 대기.
pub fn default_atmosphere(system: MeasurementSystem) -> Atmosphere {
    let humidity = crate::panels::humidity::DEFAULT_HUMIDITY_PERCENT / 100.0;
    match system {
        MeasurementSystem::Metric => Atmosphere::new(
            Measurement::new(0.0, DistanceUnit::Meter),
            Measurement::new(760.0, PressureUnit::MillimetersOfMercury),
            Measurement::new(15.0, TemperatureUnit::Celsius),
            humidity,
        ),
        MeasurementSystem::Imperial => Atmosphere::new(
            Measurement::new(0.0, DistanceUnit::Foot),
            Measurement::new(29.95, PressureUnit::InchesOfMercury),
            Measurement::new(59.0, TemperatureUnit::Fahrenheit),
            humidity,
        ),
    }
}

pub struct AtmospherePanel {
    system: MeasurementSystem,
    fields: FieldSet,
    humidity: HumidityInput,
}

impl Default for AtmospherePanel {
    fn default() -> Self {
        Self::new()
    }
}

impl AtmospherePanel {
    /// 미터법 표준 대기로 채운 패널.
    pub fn new() -> Self {
        let mut panel = Self {
            system: MeasurementSystem::Metric,
            fields: FieldSet::new(&ATMOSPHERE_FIELDS),
            humidity: HumidityInput::default(),
        };
        panel.set_atmosphere(None);
        panel
    }

    pub fn fields(&self) -> &FieldSet {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> &mut FieldSet {
        &mut self.fields
    }

    pub fn humidity(&self) -> &HumidityInput {
        &self.humidity
    }

    pub fn humidity_mut(&mut self) -> &mut HumidityInput {
        &mut self.humidity
    }
}

impl MeasurementSystemControl for AtmospherePanel {
    fn measurement_system(&self) -> MeasurementSystem {
        self.system
    }

    fn set_measurement_system(&mut self, system: MeasurementSystem) {
        self.system = system;
        self.fields.apply_system(system);
    }
}

impl AtmosphereProvider for AtmospherePanel {
    fn atmosphere(&self) -> Atmosphere {
        Atmosphere::new(
            self.fields.field(ALTITUDE).measurement_or_zero(),
            self.fields.field(PRESSURE).measurement_or_zero(),
            self.fields.field(TEMPERATURE).measurement_or_zero(),
            self.humidity.fraction(),
        )
    }

    fn set_atmosphere(&mut self, atmosphere: Option<&Atmosphere>) {
        let atmosphere = match atmosphere {
            Some(a) => a.clone(),
            None => default_atmosphere(self.system),
        };
        self.fields
            .assign_adopting(ALTITUDE, Some(atmosphere.altitude.into()));
        self.fields
            .assign_adopting(PRESSURE, Some(atmosphere.pressure.into()));
        self.fields
            .assign_adopting(TEMPERATURE, Some(atmosphere.temperature.into()));
        self.humidity.set_fraction(atmosphere.humidity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn metric_defaults() {
        let panel = AtmospherePanel::new();
        let a = panel.atmosphere();
        assert_eq!(a.altitude, Measurement::new(0.0, DistanceUnit::Meter));
        assert_eq!(a.temperature, Measurement::new(15.0, TemperatureUnit::Celsius));
        assert_eq!(a.pressure, Measurement::new(760.0, PressureUnit::MillimetersOfMercury));
        assert_eq!(panel.humidity().text(), "78");
        assert_eq!(panel.fields().field(PRESSURE).text(), "760.0");
    }

    #[test]
    fn imperial_reset_uses_imperial_defaults() {
        let mut panel = AtmospherePanel::new();
        panel.set_measurement_system(MeasurementSystem::Imperial);
        panel.set_atmosphere(None);
        let a = panel.atmosphere();
        assert_eq!(a.altitude, Measurement::new(0.0, DistanceUnit::Foot));
        assert_eq!(a.temperature, Measurement::new(59.0, TemperatureUnit::Fahrenheit));
        assert_eq!(a.pressure, Measurement::new(29.95, PressureUnit::InchesOfMercury));
        assert_eq!(panel.fields().field(PRESSURE).text(), "29.95");
    }

    #[test]
    fn system_switch_converts_existing_values() {
        let mut panel = AtmospherePanel::new();
        panel.set_measurement_system(MeasurementSystem::Imperial);
        let a = panel.atmosphere();
        assert_eq!(a.temperature.unit, TemperatureUnit::Fahrenheit);
        assert_relative_eq!(a.temperature.value, 59.0, epsilon = 1e-9);
        assert_eq!(a.pressure.unit, PressureUnit::InchesOfMercury);
        assert_relative_eq!(a.pressure.value, 29.9213, epsilon = 1e-3);
    }

    #[test]
    fn set_adopts_units_and_humidity() {
        let mut panel = AtmospherePanel::new();
        let a = Atmosphere::new(
            Measurement::new(330.0, DistanceUnit::Foot),
            Measurement::new(29.5, PressureUnit::InchesOfMercury),
            Measurement::new(70.0, TemperatureUnit::Fahrenheit),
            0.51,
        );
        panel.set_atmosphere(Some(&a));
        assert_eq!(
            panel.fields().field(ALTITUDE).unit(),
            UnitTag::Distance(DistanceUnit::Foot)
        );
        assert_eq!(panel.humidity().text(), "51");
        assert_eq!(panel.atmosphere(), a);
    }

    #[test]
    fn humidity_text_drives_fraction() {
        let mut panel = AtmospherePanel::new();
        panel.humidity_mut().set_text("51.5");
        assert_relative_eq!(panel.atmosphere().humidity, 0.515, epsilon = 1e-12);
        panel.humidity_mut().set_text("wet");
        assert_eq!(panel.atmosphere().humidity, 0.0);
    }
}
