//! 사용자 정의 항력표(.drg) 읽기.
//!
//! 파일은 읽기 전용 바이트로 열고, 해석은 [`DragTableCodec`]에 맡긴다.
//! 기본 코덱 [`DrgCodec`]은 ASCII 텍스트 형식을 다룬다.
//!
//! ```text
//! CFM,308 Win 175gr SMK,0.01134,0.00782,0.0315
//! 0.263 0.00
//! 0.263 0.50
//! 0.405 1.00
//! ```
//!
//! 첫 줄은 `CFM,이름,무게[kg],직경[m][,길이[m]]`이고, 이후 줄은 `Cd 마하수` 쌍이다.

use std::fs;
use std::path::Path;

use crate::measurement::Measurement;
use crate::units::{DistanceUnit, WeightUnit};

/// 항력표 읽기 오류.
#[derive(Debug, thiserror::Error)]
pub enum DragTableError {
    #[error("파일 입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    #[error("ASCII 텍스트가 아닙니다")]
    NotAscii,
    #[error("헤더가 없습니다")]
    MissingHeader,
    #[error("잘못된 헤더: {0}")]
    BadHeader(String),
    #[error("{line}번째 줄을 읽을 수 없습니다: {text}")]
    BadPoint { line: usize, text: String },
    #[error("항력 데이터가 없습니다")]
    NoPoints,
}

/// 마하수에 따른 항력계수 한 점.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragTablePoint {
    pub mach: f64,
    pub drag_coefficient: f64,
}

/// 항력표에 들어 있는 기준 탄두 정보.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceAmmunition {
    pub weight: Measurement<WeightUnit>,
    pub bullet_diameter: Option<Measurement<DistanceUnit>>,
    pub bullet_length: Option<Measurement<DistanceUnit>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DragTable {
    pub name: String,
    pub ammunition: ReferenceAmmunition,
    /// 마하수 오름차순
    pub points: Vec<DragTablePoint>,
}

/// 항력표 바이트를 해석하는 협력자.
pub trait DragTableCodec {
    fn decode(&self, bytes: &[u8]) -> Result<DragTable, DragTableError>;
}

/// 텍스트 `.drg` 형식 코덱.
#[derive(Debug, Clone, Copy, Default)]
pub struct DrgCodec;

impl DragTableCodec for DrgCodec {
    fn decode(&self, bytes: &[u8]) -> Result<DragTable, DragTableError> {
        if !bytes.is_ascii() {
            return Err(DragTableError::NotAscii);
        }
        let text = std::str::from_utf8(bytes).map_err(|_| DragTableError::NotAscii)?;
        let mut lines = text
            .lines()
            .enumerate()
            .map(|(i, l)| (i + 1, l.trim()))
            .filter(|(_, l)| !l.is_empty());

        let (_, header) = lines.next().ok_or(DragTableError::MissingHeader)?;
        let (name, ammunition) = parse_header(header)?;

        let mut points = Vec::new();
        for (line, text) in lines {
            points.push(parse_point(line, text)?);
        }
        if points.is_empty() {
            return Err(DragTableError::NoPoints);
        }
        points.sort_by(|a, b| a.mach.total_cmp(&b.mach));

        Ok(DragTable {
            name,
            ammunition,
            points,
        })
    }
}

fn parse_header(header: &str) -> Result<(String, ReferenceAmmunition), DragTableError> {
    let bad = || DragTableError::BadHeader(header.to_string());
    let parts: Vec<&str> = header.split(',').map(str::trim).collect();
    if parts.len() < 4 || !parts[0].eq_ignore_ascii_case("CFM") {
        return Err(bad());
    }
    let number = |s: &str| s.parse::<f64>().ok().filter(|v| v.is_finite());
    let weight_kg = number(parts[2]).ok_or_else(bad)?;
    let diameter_m = number(parts[3]).ok_or_else(bad)?;
    let length_m = parts.get(4).and_then(|s| number(s));

    let positive = |v: f64, unit: DistanceUnit| (v > 0.0).then(|| Measurement::new(v, unit));
    Ok((
        parts[1].to_string(),
        ReferenceAmmunition {
            weight: Measurement::new(weight_kg, WeightUnit::Kilogram),
            bullet_diameter: positive(diameter_m, DistanceUnit::Meter),
            bullet_length: length_m.and_then(|v| positive(v, DistanceUnit::Meter)),
        },
    ))
}

fn parse_point(line: usize, text: &str) -> Result<DragTablePoint, DragTableError> {
    let bad = || DragTableError::BadPoint {
        line,
        text: text.to_string(),
    };
    let mut it = text
        .split_whitespace()
        .map(|s| s.parse::<f64>().ok().filter(|v| v.is_finite()));
    match (it.next(), it.next(), it.next()) {
        (Some(Some(drag_coefficient)), Some(Some(mach)), None) if mach >= 0.0 => {
            Ok(DragTablePoint {
                mach,
                drag_coefficient,
            })
        }
        _ => Err(bad()),
    }
}

/// 파일을 읽기 전용으로 열어 코덱으로 해석한다.
pub fn open(path: &Path, codec: &dyn DragTableCodec) -> Result<DragTable, DragTableError> {
    let bytes = fs::read(path)?;
    codec.decode(&bytes)
}
