use serde::{Deserialize, Serialize};

use crate::measurement::Measurement;
use crate::units::{DistanceUnit, VelocityUnit, WeightUnit};

/// 항력 함수(표준 항력표) 식별자. `GC`는 사용자 정의 항력표를 뜻한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DragTableId {
    G1,
    G2,
    G5,
    G6,
    G7,
    G8,
    GI,
    GS,
    RA4,
    GC,
}

impl DragTableId {
    pub const ALL: [DragTableId; 10] = [
        DragTableId::G1,
        DragTableId::G2,
        DragTableId::G5,
        DragTableId::G6,
        DragTableId::G7,
        DragTableId::G8,
        DragTableId::GI,
        DragTableId::GS,
        DragTableId::RA4,
        DragTableId::GC,
    ];

    pub fn name(self) -> &'static str {
        match self {
            DragTableId::G1 => "G1",
            DragTableId::G2 => "G2",
            DragTableId::G5 => "G5",
            DragTableId::G6 => "G6",
            DragTableId::G7 => "G7",
            DragTableId::G8 => "G8",
            DragTableId::GI => "GI",
            DragTableId::GS => "GS",
            DragTableId::RA4 => "RA4",
            DragTableId::GC => "GC",
        }
    }
}

/// 탄도계수 값을 어떻게 해석할지 나타낸다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BallisticCoefficientValueType {
    /// 표준 탄도계수
    #[default]
    Coefficient,
    /// 기준 탄형에 대한 형상계수
    FormFactor,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallisticCoefficient {
    pub value: f64,
    pub table: DragTableId,
    #[serde(default)]
    pub value_type: BallisticCoefficientValueType,
}

impl BallisticCoefficient {
    pub const fn new(value: f64, table: DragTableId) -> Self {
        Self {
            value,
            table,
            value_type: BallisticCoefficientValueType::Coefficient,
        }
    }

    pub const fn form_factor(value: f64, table: DragTableId) -> Self {
        Self {
            value,
            table,
            value_type: BallisticCoefficientValueType::FormFactor,
        }
    }

    pub fn is_form_factor(&self) -> bool {
        self.value_type == BallisticCoefficientValueType::FormFactor
    }
}

/// 탄약 입력 레코드. 탄두 직경과 길이는 선택 항목이다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ammunition {
    pub weight: Measurement<WeightUnit>,
    pub muzzle_velocity: Measurement<VelocityUnit>,
    pub ballistic_coefficient: BallisticCoefficient,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bullet_diameter: Option<Measurement<DistanceUnit>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bullet_length: Option<Measurement<DistanceUnit>>,
}

/// 단면밀도를 GC 탄도계수로 쓴다: `무게[gr] / 7000 / 직경[in]²`, 소수 다섯째 자리 반올림.
///
/// 무게나 직경이 0이면 `None`.
pub fn bc_from_sectional_density(
    weight: Measurement<WeightUnit>,
    diameter: Measurement<DistanceUnit>,
) -> Option<f64> {
    if weight.value == 0.0 || diameter.value == 0.0 {
        return None;
    }
    let grains = weight.in_unit(WeightUnit::Grain);
    let inches = diameter.in_unit(DistanceUnit::Inch);
    let sd = grains / 7000.0 / inches.powi(2);
    Some((sd * 100_000.0).round() / 100_000.0)
}
