//! 조준선(레티클) 편집 모델.
//!
//! 레티클은 각도 좌표계의 도형 목록과 BDC 점 목록으로 이루어진다.
//! 이 모듈은 목록 편집만 다루고, 그리기와 파일 저장은 하지 않는다.

use serde::{Deserialize, Serialize};

use crate::measurement::Measurement;
use crate::units::{AngularUnit, DistanceUnit};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ReticleError {
    #[error("{0}번 항목이 없습니다")]
    NoSuchItem(usize),
}

/// 레티클 좌표. 원점은 왼쪽 위이다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReticlePosition {
    pub x: Measurement<AngularUnit>,
    pub y: Measurement<AngularUnit>,
}

impl ReticlePosition {
    pub const fn new(x: f64, y: f64, unit: AngularUnit) -> Self {
        Self {
            x: Measurement::new(x, unit),
            y: Measurement::new(y, unit),
        }
    }
}

impl std::fmt::Display for ReticlePosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// 경로 구성 명령.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PathCommand {
    MoveTo(ReticlePosition),
    LineTo(ReticlePosition),
    Arc {
        to: ReticlePosition,
        radius: Measurement<AngularUnit>,
        major_arc: bool,
        clockwise: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ReticleElement {
    Line {
        start: ReticlePosition,
        end: ReticlePosition,
        line_width: Option<Measurement<AngularUnit>>,
        color: Option<String>,
    },
    Circle {
        center: ReticlePosition,
        radius: Measurement<AngularUnit>,
        fill: bool,
        color: Option<String>,
    },
    Rectangle {
        top_left: ReticlePosition,
        size: ReticlePosition,
        fill: bool,
        color: Option<String>,
    },
    Path {
        commands: Vec<PathCommand>,
        fill: bool,
        color: Option<String>,
    },
    Text {
        position: ReticlePosition,
        height: Measurement<AngularUnit>,
        text: String,
        color: Option<String>,
    },
}

impl ReticleElement {
    pub fn kind(&self) -> &'static str {
        match self {
            ReticleElement::Line { .. } => "Line",
            ReticleElement::Circle { .. } => "Circle",
            ReticleElement::Rectangle { .. } => "Rectangle",
            ReticleElement::Path { .. } => "Path",
            ReticleElement::Text { .. } => "Text",
        }
    }
}

/// 거리별 조준점.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BdcPoint {
    pub position: ReticlePosition,
    pub distance: Measurement<DistanceUnit>,
    pub text_offset: Measurement<AngularUnit>,
    pub text_height: Measurement<AngularUnit>,
}

/// 편집 목록의 한 줄: 도형이거나 BDC 점.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ReticleItem {
    Element(ReticleElement),
    Bdc(BdcPoint),
}

impl std::fmt::Display for ReticleItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReticleItem::Element(e) => match e {
                ReticleElement::Line { start, end, .. } => write!(f, "Line {start} - {end}"),
                ReticleElement::Circle { center, radius, .. } => {
                    write!(f, "Circle {center} r={radius}")
                }
                ReticleElement::Rectangle { top_left, size, .. } => {
                    write!(f, "Rectangle {top_left} {size}")
                }
                ReticleElement::Path { commands, .. } => write!(f, "Path [{}]", commands.len()),
                ReticleElement::Text { position, text, .. } => {
                    write!(f, "Text {position} \"{text}\"")
                }
            },
            ReticleItem::Bdc(p) => write!(f, "BDC {} @ {}", p.position, p.distance),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reticle {
    pub name: String,
    pub size: ReticlePosition,
    pub zero: Option<ReticlePosition>,
    pub elements: Vec<ReticleElement>,
    pub bdc: Vec<BdcPoint>,
}

impl Default for Reticle {
    fn default() -> Self {
        Self {
            name: "New Reticle".to_string(),
            size: ReticlePosition::new(10.0, 10.0, AngularUnit::Mil),
            zero: Some(ReticlePosition::new(5.0, 5.0, AngularUnit::Mil)),
            elements: Vec::new(),
            bdc: Vec::new(),
        }
    }
}

/// 레티클 편집 상태. 목록은 도형 다음에 BDC 점이 오는 순서이다.
#[derive(Debug, Clone, Default)]
pub struct ReticleEditor {
    reticle: Reticle,
    modified: bool,
}

impl ReticleEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reticle(&self) -> &Reticle {
        &self.reticle
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// 편집 중인 레티클을 버리고 새로 시작한다.
    pub fn new_reticle(&mut self) {
        self.reticle = Reticle::default();
        self.modified = false;
    }

    pub fn open(&mut self, reticle: Reticle) {
        self.reticle = reticle;
        self.modified = false;
    }

    /// 이름, 크기, 영점을 바꾼다.
    pub fn set_parameters(&mut self, name: &str, size: ReticlePosition, zero: Option<ReticlePosition>) {
        self.reticle.name = name.to_string();
        self.reticle.size = size;
        self.reticle.zero = zero;
        self.modified = true;
    }

    pub fn len(&self) -> usize {
        self.reticle.elements.len() + self.reticle.bdc.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn items(&self) -> Vec<ReticleItem> {
        self.reticle
            .elements
            .iter()
            .cloned()
            .map(ReticleItem::Element)
            .chain(self.reticle.bdc.iter().cloned().map(ReticleItem::Bdc))
            .collect()
    }

    pub fn item(&self, index: usize) -> Result<ReticleItem, ReticleError> {
        let elements = self.reticle.elements.len();
        if index < elements {
            Ok(ReticleItem::Element(self.reticle.elements[index].clone()))
        } else {
            self.reticle
                .bdc
                .get(index - elements)
                .cloned()
                .map(ReticleItem::Bdc)
                .ok_or(ReticleError::NoSuchItem(index))
        }
    }

    /// 항목을 추가하고 그 목록 위치를 돌려준다.
    pub fn add(&mut self, item: ReticleItem) -> usize {
        self.modified = true;
        match item {
            ReticleItem::Element(e) => {
                self.reticle.elements.push(e);
                self.reticle.elements.len() - 1
            }
            ReticleItem::Bdc(p) => {
                self.reticle.bdc.push(p);
                self.len() - 1
            }
        }
    }

    pub fn duplicate(&mut self, index: usize) -> Result<usize, ReticleError> {
        let item = self.item(index)?;
        Ok(self.add(item))
    }

    pub fn delete(&mut self, index: usize) -> Result<ReticleItem, ReticleError> {
        let elements = self.reticle.elements.len();
        let removed = if index < elements {
            ReticleItem::Element(self.reticle.elements.remove(index))
        } else if index - elements < self.reticle.bdc.len() {
            ReticleItem::Bdc(self.reticle.bdc.remove(index - elements))
        } else {
            return Err(ReticleError::NoSuchItem(index));
        };
        self.modified = true;
        Ok(removed)
    }

    /// 편집 결과로 항목을 바꾼다. 종류가 바뀌면 해당 목록 끝으로 옮겨진다.
    pub fn replace(&mut self, index: usize, item: ReticleItem) -> Result<usize, ReticleError> {
        let elements = self.reticle.elements.len();
        match item {
            ReticleItem::Element(e) if index < elements => {
                self.reticle.elements[index] = e;
            }
            ReticleItem::Bdc(p) if index >= elements && index - elements < self.reticle.bdc.len() => {
                self.reticle.bdc[index - elements] = p;
            }
            other => {
                self.delete(index)?;
                return Ok(self.add(other));
            }
        }
        self.modified = true;
        Ok(index)
    }
}
