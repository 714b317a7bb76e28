use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use super::Unit;
use crate::quantity::{UnitFamily, UnitTag};

/// 각도 단위. 내부 기준은 라디안이다.
///
/// 조준경 클릭과 사격 각도는 측정 체계(미터/야드파운드)와 무관하게
/// 사용자가 고른 각도 단위를 유지한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AngularUnit {
    /// 분각 (1/60도)
    MOA,
    /// NATO 밀 (원 = 6400)
    Mil,
    /// 밀리라디안
    MRad,
    /// 구 소련식 1/1000 (원 = 6000)
    Thousand,
    Degree,
    Radian,
    /// 100야드에서 1인치
    InchesPer100Yards,
    /// 100미터에서 1센티미터
    CmPer100Meters,
}

fn radians_per_unit(unit: AngularUnit) -> f64 {
    match unit {
        AngularUnit::MOA => PI / (180.0 * 60.0),
        AngularUnit::Mil => 2.0 * PI / 6400.0,
        AngularUnit::MRad => 0.001,
        AngularUnit::Thousand => 2.0 * PI / 6000.0,
        AngularUnit::Degree => PI / 180.0,
        AngularUnit::Radian => 1.0,
        AngularUnit::InchesPer100Yards => (1.0_f64 / 3600.0).atan(),
        AngularUnit::CmPer100Meters => (1.0_f64 / 10_000.0).atan(),
    }
}

impl Unit for AngularUnit {
    const FAMILY: UnitFamily = UnitFamily::Angular;
    const ALL: &'static [Self] = &[
        AngularUnit::MOA,
        AngularUnit::Mil,
        AngularUnit::MRad,
        AngularUnit::Thousand,
        AngularUnit::Degree,
        AngularUnit::Radian,
        AngularUnit::InchesPer100Yards,
        AngularUnit::CmPer100Meters,
    ];

    fn to_base(self, value: f64) -> f64 {
        value * radians_per_unit(self)
    }

    fn from_base(self, value: f64) -> f64 {
        value / radians_per_unit(self)
    }

    fn symbol(self) -> &'static str {
        match self {
            AngularUnit::MOA => "moa",
            AngularUnit::Mil => "mil",
            AngularUnit::MRad => "mrad",
            AngularUnit::Thousand => "ths",
            AngularUnit::Degree => "°",
            AngularUnit::Radian => "rad",
            AngularUnit::InchesPer100Yards => "in/100yd",
            AngularUnit::CmPer100Meters => "cm/100m",
        }
    }

    fn into_tag(self) -> UnitTag {
        UnitTag::Angular(self)
    }

    fn from_tag(tag: UnitTag) -> Option<Self> {
        match tag {
            UnitTag::Angular(u) => Some(u),
            _ => None,
        }
    }
}
