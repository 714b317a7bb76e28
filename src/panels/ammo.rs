//! 탄약 입력 패널.

use std::path::Path;

use crate::ballistics::{bc_from_sectional_density, Ammunition, BallisticCoefficient, DragTableId};
use crate::config::MeasurementSystem;
use crate::drag_table::{self, DragTable, DragTableCodec, DrgCodec};
use crate::measurement::Measurement;
use crate::panels::layout::{FieldSet, FieldSpec, UnitPreset};
use crate::panels::AmmunitionProvider;
use crate::prompt::{FileNamePrompt, OpenFileRequest};
use crate::quantity::UnitTag;
use crate::system::MeasurementSystemControl;
use crate::units::{DistanceUnit, VelocityUnit, WeightUnit};

pub const BULLET_WEIGHT: &str = "bullet_weight";
pub const MUZZLE_VELOCITY: &str = "muzzle_velocity";
pub const BULLET_DIAMETER: &str = "bullet_diameter";
pub const BULLET_LENGTH: &str = "bullet_length";

const MM_2: UnitPreset = UnitPreset::new(UnitTag::Distance(DistanceUnit::Millimeter), 2);
const INCH_3: UnitPreset = UnitPreset::new(UnitTag::Distance(DistanceUnit::Inch), 3);

pub static AMMO_FIELDS: [FieldSpec; 4] = [
    FieldSpec::system_bound(
        BULLET_WEIGHT,
        "Bullet weight",
        UnitPreset::new(UnitTag::Weight(WeightUnit::Gram), 2),
        UnitPreset::new(UnitTag::Weight(WeightUnit::Grain), 1),
    ),
    FieldSpec::system_bound(
        MUZZLE_VELOCITY,
        "Muzzle velocity",
        UnitPreset::new(UnitTag::Velocity(VelocityUnit::MeterPerSecond), 1),
        UnitPreset::new(UnitTag::Velocity(VelocityUnit::FootPerSecond), 1),
    ),
    FieldSpec::system_bound(BULLET_DIAMETER, "Bullet diameter", MM_2, INCH_3),
    FieldSpec::system_bound(BULLET_LENGTH, "Bullet length", MM_2, INCH_3),
];

/// 기본 탄도계수 (G1 0.5)
pub const DEFAULT_BALLISTIC_COEFFICIENT: BallisticCoefficient =
    BallisticCoefficient::new(0.5, DragTableId::G1);

type TableListener = Box<dyn FnMut(Option<&DragTable>)>;

pub struct AmmoPanel {
    system: MeasurementSystem,
    fields: FieldSet,
    /// 탄도계수 입력값과 항력표. 해석(형상계수 여부)은 `form_factor`가 정한다.
    ballistic_coefficient: BallisticCoefficient,
    form_factor: bool,
    custom_ballistic_file: String,
    custom_table: Option<DragTable>,
    codec: Box<dyn DragTableCodec>,
    table_listeners: Vec<TableListener>,
}

impl Default for AmmoPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl AmmoPanel {
    pub fn new() -> Self {
        Self::with_codec(Box::new(DrgCodec))
    }

    pub fn with_codec(codec: Box<dyn DragTableCodec>) -> Self {
        let mut panel = Self {
            system: MeasurementSystem::Metric,
            fields: FieldSet::new(&AMMO_FIELDS),
            ballistic_coefficient: DEFAULT_BALLISTIC_COEFFICIENT,
            form_factor: false,
            custom_ballistic_file: String::new(),
            custom_table: None,
            codec,
            table_listeners: Vec::new(),
        };
        panel.clear();
        panel
    }

    pub fn fields(&self) -> &FieldSet {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> &mut FieldSet {
        &mut self.fields
    }

    /// 입력 상자에 보이는 탄도계수 (값 + 항력표).
    pub fn ballistic_coefficient_input(&self) -> BallisticCoefficient {
        self.ballistic_coefficient
    }

    pub fn set_ballistic_coefficient_input(&mut self, value: f64, table: DragTableId) {
        self.ballistic_coefficient = BallisticCoefficient::new(value, table);
    }

    pub fn is_form_factor(&self) -> bool {
        self.form_factor
    }

    pub fn set_form_factor(&mut self, form_factor: bool) {
        self.form_factor = form_factor;
    }

    /// 모든 입력을 비운다. 탄도계수는 G1 0.5로 돌아간다.
    pub fn clear(&mut self) {
        self.fields.field_mut(BULLET_WEIGHT).set_value(None);
        self.fields.field_mut(MUZZLE_VELOCITY).set_value(None);
        self.fields.field_mut(BULLET_DIAMETER).set_value(None);
        self.fields.field_mut(BULLET_LENGTH).set_value(None);
        self.ballistic_coefficient = DEFAULT_BALLISTIC_COEFFICIENT;
        self.form_factor = false;
    }

    /// 단면밀도를 GC 탄도계수로 옮긴다. 무게나 직경이 비었거나 0이면 아무 일도 없다.
    pub fn sectional_density_to_bc(&mut self) -> bool {
        let weight = self.fields.field(BULLET_WEIGHT).measurement_or_zero::<WeightUnit>();
        let diameter = self
            .fields
            .field(BULLET_DIAMETER)
            .measurement_or_zero::<DistanceUnit>();
        match bc_from_sectional_density(weight, diameter) {
            Some(bc) => {
                self.ballistic_coefficient = BallisticCoefficient::new(bc, DragTableId::GC);
                self.form_factor = false;
                true
            }
            None => false,
        }
    }

    pub fn custom_ballistic_file(&self) -> &str {
        &self.custom_ballistic_file
    }

    pub fn custom_table(&self) -> Option<&DragTable> {
        self.custom_table.as_ref()
    }

    /// 사용자 항력표가 바뀔 때마다 호출될 콜백을 등록한다.
    pub fn on_custom_table_changed(&mut self, listener: impl FnMut(Option<&DragTable>) + 'static) {
        self.table_listeners.push(Box::new(listener));
    }

    /// 사용자 항력표 파일을 지정한다.
    ///
    /// 읽기에 성공하면 탄도계수를 GC 1.0 형상계수로 바꾸고, 항력표의 기준 탄두
    /// 무게(g)와 직경(mm)을 채운다. 파일이 없거나 읽을 수 없으면 항력표 없음으로 돌아간다.
    pub fn set_custom_ballistic_file(&mut self, path: &str) {
        self.custom_ballistic_file = path.to_string();
        if path.is_empty() || !Path::new(path).exists() {
            self.custom_table = None;
        } else {
            match drag_table::open(Path::new(path), self.codec.as_ref()) {
                Ok(table) => self.apply_custom_table(table),
                Err(err) => {
                    tracing::warn!(path, error = %err, "사용자 항력표를 읽지 못했습니다");
                    self.custom_table = None;
                    self.form_factor = false;
                }
            }
        }
        let table = self.custom_table.as_ref();
        for listener in self.table_listeners.iter_mut() {
            listener(table);
        }
    }

    fn apply_custom_table(&mut self, table: DragTable) {
        tracing::debug!(name = %table.name, points = table.points.len(), "사용자 항력표 적용");
        self.ballistic_coefficient = BallisticCoefficient::new(1.0, DragTableId::GC);
        self.form_factor = true;
        let weight = table.ammunition.weight.to(WeightUnit::Gram);
        self.fields
            .field_mut(BULLET_WEIGHT)
            .set_measurement_adopting(Some(weight));
        if let Some(diameter) = table.ammunition.bullet_diameter {
            let diameter = diameter.to(DistanceUnit::Millimeter);
            self.fields
                .field_mut(BULLET_DIAMETER)
                .set_measurement_adopting(Some(diameter));
        }
        self.custom_table = Some(table);
    }

    /// 파일 대화상자로 항력표를 고른다. 취소하면 `false`.
    pub fn load_custom_table(&mut self, prompt: &mut dyn FileNamePrompt) -> bool {
        let request = OpenFileRequest::new("Open drag table")
            .add_filter("drg", "Custom Drag Table")
            .default_extension("drg")
            .check_file_exists(true);
        match prompt.ask_open(&request) {
            Some(path) => {
                self.set_custom_ballistic_file(&path.to_string_lossy());
                true
            }
            None => false,
        }
    }
}

impl MeasurementSystemControl for AmmoPanel {
    fn measurement_system(&self) -> MeasurementSystem {
        self.system
    }

    fn set_measurement_system(&mut self, system: MeasurementSystem) {
        self.system = system;
        self.fields.apply_system(system);
    }
}

impl AmmunitionProvider for AmmoPanel {
    fn ammunition(&self) -> Ammunition {
        let mut bc = self.ballistic_coefficient;
        if self.form_factor {
            bc = BallisticCoefficient::form_factor(bc.value, bc.table);
        }
        Ammunition {
            weight: self.fields.field(BULLET_WEIGHT).measurement_or_zero(),
            muzzle_velocity: self.fields.field(MUZZLE_VELOCITY).measurement_or_zero(),
            ballistic_coefficient: bc,
            bullet_diameter: self.fields.field(BULLET_DIAMETER).measurement(),
            bullet_length: self.fields.field(BULLET_LENGTH).measurement(),
        }
    }

    fn set_ammunition(&mut self, ammunition: Option<&Ammunition>) {
        match ammunition {
            None => {
                self.fields.field_mut(BULLET_WEIGHT).set_value(None);
                let velocity = self.fields.field_mut(MUZZLE_VELOCITY);
                let zero = Measurement::zero(velocity.measurement_or_zero::<VelocityUnit>().unit);
                velocity.set_measurement(Some(zero));
                self.ballistic_coefficient = DEFAULT_BALLISTIC_COEFFICIENT;
                self.form_factor = false;
                self.fields.field_mut(BULLET_DIAMETER).set_value(None);
                self.fields.field_mut(BULLET_LENGTH).set_value(None);
            }
            Some(ammo) => {
                self.fields
                    .assign_adopting(BULLET_WEIGHT, Some(ammo.weight.into()));
                self.fields
                    .assign_adopting(MUZZLE_VELOCITY, Some(ammo.muzzle_velocity.into()));
                self.ballistic_coefficient = BallisticCoefficient::new(
                    ammo.ballistic_coefficient.value,
                    ammo.ballistic_coefficient.table,
                );
                self.form_factor = ammo.ballistic_coefficient.is_form_factor();
                self.fields
                    .assign_adopting(BULLET_DIAMETER, ammo.bullet_diameter.map(Into::into));
                self.fields
                    .assign_adopting(BULLET_LENGTH, ammo.bullet_length.map(Into::into));
            }
        }
    }
}
