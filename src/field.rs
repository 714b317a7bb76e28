//! 단위를 인식하는 측정 입력 필드.
//!
//! 필드는 값이 있을 때 항상 표시 단위로 저장한다. 표시 단위를 바꾸면
//! 저장된 크기를 환산하며, 물리량 자체는 변하지 않는다.

use crate::conversion::ConversionError;
use crate::measurement::Measurement;
use crate::quantity::{UnitFamily, UnitTag, UnitValue};
use crate::units::Unit;

#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementField {
    family: UnitFamily,
    value: Option<f64>,
    unit: UnitTag,
    precision: usize,
    enabled: bool,
}

impl MeasurementField {
    /// 빈 필드를 만든다. 계열은 초기 단위에서 정해진다.
    pub fn new(unit: UnitTag, precision: usize) -> Self {
        Self {
            family: unit.family(),
            value: None,
            unit,
            precision,
            enabled: true,
        }
    }

    pub fn family(&self) -> UnitFamily {
        self.family
    }

    pub fn unit(&self) -> UnitTag {
        self.unit
    }

    pub fn precision(&self) -> usize {
        self.precision
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_none()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// 표시 단위와 소수 자릿수를 바꾼다. 값이 있으면 새 단위로 환산한다.
    ///
    /// # Panics
    /// 다른 계열의 단위를 넘기면 패닉한다.
    pub fn set_unit(&mut self, unit: UnitTag, precision: usize) {
        self.check_family(unit);
        if let Some(v) = self.value {
            self.value = self.unit.convert(v, unit);
        }
        self.unit = unit;
        self.precision = precision;
    }

    /// 표시 단위로 표현된 현재 값.
    pub fn value(&self) -> Option<UnitValue> {
        self.value.map(|v| UnitValue::new(v, self.unit))
    }

    /// 값을 저장한다. 들어온 단위가 표시 단위와 다르면 표시 단위로 환산한다.
    ///
    /// # Panics
    /// 다른 계열의 값을 넘기면 패닉한다.
    pub fn set_value(&mut self, value: Option<UnitValue>) {
        let converted = match value {
            Some(v) => {
                self.check_family(v.unit);
                v.unit.convert(v.magnitude, self.unit)
            }
            None => None,
        };
        self.value = converted;
    }

    /// 값을 저장하면서 들어온 단위를 표시 단위로 삼는다. 소수 자릿수는 유지한다.
    /// 빈 값이면 단위는 그대로 둔다.
    pub fn set_value_adopting(&mut self, value: Option<UnitValue>) {
        match value {
            Some(v) => {
                self.check_family(v.unit);
                self.unit = v.unit;
                self.value = Some(v.magnitude);
            }
            None => self.value = None,
        }
    }

    /// 타입이 정해진 측정값으로 읽는다.
    ///
    /// # Panics
    /// 필드 계열과 `U`의 계열이 다르면 패닉한다.
    pub fn measurement<U: Unit>(&self) -> Option<Measurement<U>> {
        let unit = self.typed_unit::<U>();
        self.value.map(|v| Measurement::new(v, unit))
    }

    /// 빈 필드는 표시 단위의 0으로 읽는다.
    pub fn measurement_or_zero<U: Unit>(&self) -> Measurement<U> {
        let unit = self.typed_unit::<U>();
        Measurement::new(self.value.unwrap_or(0.0), unit)
    }

    pub fn set_measurement<U: Unit>(&mut self, value: Option<Measurement<U>>) {
        self.set_value(value.map(UnitValue::from));
    }

    pub fn set_measurement_adopting<U: Unit>(&mut self, value: Option<Measurement<U>>) {
        self.set_value_adopting(value.map(UnitValue::from));
    }

    /// 소수 자릿수를 적용한 표시 문자열. 빈 필드는 빈 문자열이다.
    pub fn text(&self) -> String {
        match self.value {
            Some(v) => format!("{:.*}", self.precision, v),
            None => String::new(),
        }
    }

    /// 사용자가 입력한 문자열을 표시 단위의 값으로 받아들인다.
    /// 빈 문자열은 빈 값이 되고, 숫자가 아니면 필드를 그대로 두고 오류를 돌려준다.
    pub fn set_text(&mut self, text: &str) -> Result<(), ConversionError> {
        let text = text.trim();
        if text.is_empty() {
            self.value = None;
            return Ok(());
        }
        let v = text
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| ConversionError::InvalidNumber(text.to_string()))?;
        self.value = Some(v);
        Ok(())
    }

    fn typed_unit<U: Unit>(&self) -> U {
        match U::from_tag(self.unit) {
            Some(u) => u,
            None => panic!(
                "{:?} 필드를 {:?} 값으로 읽을 수 없습니다",
                self.family,
                U::FAMILY
            ),
        }
    }

    fn check_family(&self, unit: UnitTag) {
        assert_eq!(
            unit.family(),
            self.family,
            "{:?} 필드에 {} 단위를 넣을 수 없습니다",
            self.family,
            unit
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::{AngularUnit, DistanceUnit, WeightUnit};
    use approx::assert_relative_eq;

    fn mm() -> UnitTag {
        UnitTag::Distance(DistanceUnit::Millimeter)
    }

    fn inch() -> UnitTag {
        UnitTag::Distance(DistanceUnit::Inch)
    }

    #[test]
    fn set_unit_converts_stored_value() {
        let mut f = MeasurementField::new(mm(), 2);
        f.set_value(Some(UnitValue::new(7.8232, mm())));
        f.set_unit(inch(), 3);
        let v = f.value().unwrap();
        assert_eq!(v.unit, inch());
        assert_relative_eq!(v.magnitude, 0.308, epsilon = 1e-12);
        assert_eq!(f.text(), "0.308");
        assert_eq!(f.precision(), 3);
    }

    #[test]
    fn set_value_converts_into_display_unit() {
        let mut f = MeasurementField::new(mm(), 2);
        f.set_value(Some(UnitValue::new(1.0, inch())));
        assert_eq!(f.unit(), mm());
        assert_relative_eq!(f.value().unwrap().magnitude, 25.4, epsilon = 1e-12);
    }

    #[test]
    fn adopting_switches_display_unit() {
        let mut f = MeasurementField::new(mm(), 2);
        f.set_value_adopting(Some(UnitValue::new(1.0, inch())));
        assert_eq!(f.value(), Some(UnitValue::new(1.0, inch())));
        assert_eq!(f.precision(), 2);
    }

    #[test]
    fn empty_keeps_unit_and_precision() {
        let mut f = MeasurementField::new(mm(), 2);
        f.set_value(Some(UnitValue::new(3.0, mm())));
        f.set_unit(inch(), 3);
        f.set_value(None);
        assert!(f.is_empty());
        assert_eq!(f.unit(), inch());
        assert_eq!(f.precision(), 3);
        assert_eq!(f.text(), "");

        f.set_unit(mm(), 1);
        assert!(f.is_empty());
    }

    #[test]
    fn round_trip_through_any_unit() {
        let original = UnitValue::new(123.456, mm());
        for unit in crate::quantity::UnitFamily::Distance.units() {
            let mut f = MeasurementField::new(mm(), 2);
            f.set_value(Some(original));
            f.set_unit(unit, 4);
            let expected = original.to(unit).unwrap().magnitude;
            assert_relative_eq!(f.value().unwrap().magnitude, expected, max_relative = 1e-12);
            f.set_unit(mm(), 2);
            assert_relative_eq!(f.value().unwrap().magnitude, 123.456, max_relative = 1e-12);
        }
    }

    #[test]
    fn text_input() {
        let mut f = MeasurementField::new(mm(), 1);
        f.set_text(" 12.26 ").unwrap();
        assert_eq!(
            f.measurement::<DistanceUnit>(),
            Some(Measurement::new(12.26, DistanceUnit::Millimeter))
        );
        assert!(f.set_text("abc").is_err());
        assert_eq!(f.text(), "12.3");
        f.set_text("").unwrap();
        assert!(f.is_empty());
    }

    #[test]
    fn empty_reads_as_zero_when_asked() {
        let f = MeasurementField::new(UnitTag::Angular(AngularUnit::Mil), 2);
        assert_eq!(f.measurement::<AngularUnit>(), None);
        assert_eq!(
            f.measurement_or_zero::<AngularUnit>(),
            Measurement::zero(AngularUnit::Mil)
        );
    }

    #[test]
    #[should_panic]
    fn family_mismatch_fails_fast() {
        let mut f = MeasurementField::new(mm(), 2);
        f.set_value(Some(UnitValue::new(1.0, UnitTag::Weight(WeightUnit::Gram))));
    }

    #[test]
    #[should_panic]
    fn typed_read_of_wrong_family_fails_fast() {
        let f = MeasurementField::new(mm(), 2);
        let _ = f.measurement::<WeightUnit>();
    }
}
