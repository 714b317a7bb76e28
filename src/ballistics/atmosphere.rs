use serde::{Deserialize, Serialize};

use crate::measurement::Measurement;
use crate::units::{DistanceUnit, PressureUnit, TemperatureUnit};

/// 대기 조건. 습도는 0~1 비율이다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Atmosphere {
    pub altitude: Measurement<DistanceUnit>,
    pub pressure: Measurement<PressureUnit>,
    pub temperature: Measurement<TemperatureUnit>,
    pub humidity: f64,
}

impl Atmosphere {
    pub fn new(
        altitude: Measurement<DistanceUnit>,
        pressure: Measurement<PressureUnit>,
        temperature: Measurement<TemperatureUnit>,
        humidity: f64,
    ) -> Self {
        Self {
            altitude,
            pressure,
            temperature,
            humidity,
        }
    }
}
