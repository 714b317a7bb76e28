use serde::{Deserialize, Serialize};

use crate::measurement::Measurement;
use crate::units::{AngularUnit, DistanceUnit};

/// 궤적 표 계산 범위와 사격 각도.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShotParameters {
    pub maximum_distance: Measurement<DistanceUnit>,
    pub step: Measurement<DistanceUnit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shot_angle: Option<Measurement<AngularUnit>>,
}
