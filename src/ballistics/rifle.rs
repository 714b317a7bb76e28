use serde::{Deserialize, Serialize};

use super::{Ammunition, Atmosphere};
use crate::measurement::Measurement;
use crate::units::{AngularUnit, DistanceUnit};

/// 강선 회전 방향.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TwistDirection {
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rifling {
    pub direction: TwistDirection,
    /// 한 바퀴 회전하는 데 필요한 길이
    pub step: Measurement<DistanceUnit>,
}

/// 조준경 높이와 클릭 값. 클릭이 없으면 0.25 MOA로 본다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sight {
    pub height: Measurement<DistanceUnit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vertical_click: Option<Measurement<AngularUnit>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub horizontal_click: Option<Measurement<AngularUnit>>,
}

/// 영점 조정 조건. 대기와 탄약이 없으면 사격 조건과 같다고 본다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZeroingParameters {
    pub distance: Measurement<DistanceUnit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub atmosphere: Option<Atmosphere>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ammunition: Option<Ammunition>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rifle {
    pub sight: Sight,
    pub zero: ZeroingParameters,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rifling: Option<Rifling>,
}
