use crate::quantity::{UnitFamily, UnitTag};
use crate::units::*;

/// 단위 변환 시 발생 가능한 오류.
#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    /// 알 수 없는 단위 문자열
    #[error("알 수 없는 단위: {0}")]
    UnknownUnit(String),
    /// 알 수 없는 물리량 이름
    #[error("지원하지 않는 물리량: {0}")]
    UnknownFamily(String),
    /// 계열이 다른 단위끼리의 변환
    #[error("단위 계열 불일치: {expected:?} 자리에 {actual:?}")]
    FamilyMismatch {
        expected: UnitFamily,
        actual: UnitFamily,
    },
    /// 숫자로 읽을 수 없는 입력
    #[error("숫자가 아닙니다: {0}")]
    InvalidNumber(String),
}

/// 문자열로 전달된 단위명을 태그로 바꾼 뒤 지정된 단위로 환산한다.
///
/// 단위 문자열 예시는 `mm`, `gr`, `ft/s`, `moa`, `C`, `inHg` 등을 사용할 수 있다.
pub fn convert(
    family: UnitFamily,
    value: f64,
    from_unit_str: &str,
    to_unit_str: &str,
) -> Result<f64, ConversionError> {
    let from = parse_unit(family, from_unit_str)?;
    let to = parse_unit(family, to_unit_str)?;
    from.convert(value, to).ok_or(ConversionError::FamilyMismatch {
        expected: family,
        actual: to.family(),
    })
}

/// 물리량 이름을 계열로 바꾼다.
pub fn parse_family(s: &str) -> Result<UnitFamily, ConversionError> {
    match s.to_lowercase().as_str() {
        "distance" | "length" => Ok(UnitFamily::Distance),
        "weight" | "mass" => Ok(UnitFamily::Weight),
        "velocity" | "speed" => Ok(UnitFamily::Velocity),
        "angle" | "angular" => Ok(UnitFamily::Angular),
        "temperature" | "temp" => Ok(UnitFamily::Temperature),
        "pressure" => Ok(UnitFamily::Pressure),
        _ => Err(ConversionError::UnknownFamily(s.to_string())),
    }
}

/// 계열 안에서 단위 문자열을 해석한다.
pub fn parse_unit(family: UnitFamily, s: &str) -> Result<UnitTag, ConversionError> {
    let tag = match family {
        UnitFamily::Distance => UnitTag::Distance(parse_distance_unit(s)?),
        UnitFamily::Weight => UnitTag::Weight(parse_weight_unit(s)?),
        UnitFamily::Velocity => UnitTag::Velocity(parse_velocity_unit(s)?),
        UnitFamily::Angular => UnitTag::Angular(parse_angular_unit(s)?),
        UnitFamily::Temperature => UnitTag::Temperature(parse_temperature_unit(s)?),
        UnitFamily::Pressure => UnitTag::Pressure(parse_pressure_unit(s)?),
    };
    Ok(tag)
}

/// `"180 gr"`처럼 숫자와 단위가 함께 적힌 문자열을 해석한다.
pub fn parse_value_with_unit(
    family: UnitFamily,
    s: &str,
) -> Result<crate::quantity::UnitValue, ConversionError> {
    let s = s.trim();
    let split = s
        .find(|c: char| !(c.is_ascii_digit() || c == '.' || c == '-' || c == '+' || c == 'e'))
        .unwrap_or(s.len());
    let (number, unit) = s.split_at(split);
    let magnitude = number
        .trim()
        .parse::<f64>()
        .map_err(|_| ConversionError::InvalidNumber(number.to_string()))?;
    let unit = parse_unit(family, unit.trim())?;
    Ok(crate::quantity::UnitValue::new(magnitude, unit))
}

fn parse_distance_unit(s: &str) -> Result<DistanceUnit, ConversionError> {
    match s.to_lowercase().as_str() {
        "mm" | "millimeter" => Ok(DistanceUnit::Millimeter),
        "cm" | "centimeter" => Ok(DistanceUnit::Centimeter),
        "m" | "meter" | "metre" => Ok(DistanceUnit::Meter),
        "km" => Ok(DistanceUnit::Kilometer),
        "in" | "inch" | "\"" => Ok(DistanceUnit::Inch),
        "ft" | "foot" | "feet" => Ok(DistanceUnit::Foot),
        "yd" | "yard" | "yards" => Ok(DistanceUnit::Yard),
        "mi" | "mile" => Ok(DistanceUnit::Mile),
        _ => Err(ConversionError::UnknownUnit(s.to_string())),
    }
}

fn parse_weight_unit(s: &str) -> Result<WeightUnit, ConversionError> {
    match s.to_lowercase().as_str() {
        "gr" | "grain" | "grains" => Ok(WeightUnit::Grain),
        "g" | "gram" => Ok(WeightUnit::Gram),
        "kg" => Ok(WeightUnit::Kilogram),
        "oz" | "ounce" => Ok(WeightUnit::Ounce),
        "lb" | "lbs" | "pound" => Ok(WeightUnit::Pound),
        _ => Err(ConversionError::UnknownUnit(s.to_string())),
    }
}

fn parse_velocity_unit(s: &str) -> Result<VelocityUnit, ConversionError> {
    match s.to_lowercase().as_str() {
        "m/s" | "mps" => Ok(VelocityUnit::MeterPerSecond),
        "km/h" | "kph" => Ok(VelocityUnit::KilometerPerHour),
        "ft/s" | "fps" => Ok(VelocityUnit::FootPerSecond),
        "mph" | "mi/h" => Ok(VelocityUnit::MilePerHour),
        _ => Err(ConversionError::UnknownUnit(s.to_string())),
    }
}

fn parse_angular_unit(s: &str) -> Result<AngularUnit, ConversionError> {
    match s.to_lowercase().as_str() {
        "moa" | "'" => Ok(AngularUnit::MOA),
        "mil" => Ok(AngularUnit::Mil),
        "mrad" => Ok(AngularUnit::MRad),
        "ths" | "thousand" => Ok(AngularUnit::Thousand),
        "deg" | "degree" | "°" => Ok(AngularUnit::Degree),
        "rad" | "radian" => Ok(AngularUnit::Radian),
        "in/100yd" | "ipy" => Ok(AngularUnit::InchesPer100Yards),
        "cm/100m" => Ok(AngularUnit::CmPer100Meters),
        _ => Err(ConversionError::UnknownUnit(s.to_string())),
    }
}

fn parse_temperature_unit(s: &str) -> Result<TemperatureUnit, ConversionError> {
    match s.to_lowercase().as_str() {
        "c" | "celsius" | "°c" => Ok(TemperatureUnit::Celsius),
        "f" | "fahrenheit" | "°f" => Ok(TemperatureUnit::Fahrenheit),
        "k" | "kelvin" => Ok(TemperatureUnit::Kelvin),
        "r" | "rankine" | "°r" => Ok(TemperatureUnit::Rankine),
        _ => Err(ConversionError::UnknownUnit(s.to_string())),
    }
}

fn parse_pressure_unit(s: &str) -> Result<PressureUnit, ConversionError> {
    match s.to_lowercase().as_str() {
        "mmhg" | "torr" => Ok(PressureUnit::MillimetersOfMercury),
        "inhg" => Ok(PressureUnit::InchesOfMercury),
        "bar" => Ok(PressureUnit::Bar),
        "hpa" | "mbar" => Ok(PressureUnit::HectoPascal),
        "psi" => Ok(PressureUnit::Psi),
        _ => Err(ConversionError::UnknownUnit(s.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn convert_inches_to_millimeters() {
        let out = convert(UnitFamily::Distance, 0.308, "in", "mm").unwrap();
        assert!((out - 7.8232).abs() < 1e-9);
    }

    #[test]
    fn convert_standard_pressure() {
        let out = convert(UnitFamily::Pressure, 760.0, "mmHg", "inHg").unwrap();
        assert!((out - 29.921).abs() < 1e-3);
    }

    #[test]
    fn unknown_unit_is_reported() {
        let err = convert(UnitFamily::Weight, 1.0, "stone", "g").unwrap_err();
        assert!(matches!(err, ConversionError::UnknownUnit(u) if u == "stone"));
    }

    #[test]
    fn every_symbol_parses_back() {
        for family in UnitFamily::ALL {
            for unit in family.units() {
                assert_eq!(parse_unit(family, unit.symbol()).unwrap(), unit);
            }
        }
    }

    #[test]
    fn value_with_unit() {
        let v = parse_value_with_unit(UnitFamily::Weight, "180gr").unwrap();
        assert_eq!(v.unit, UnitTag::Weight(WeightUnit::Grain));
        assert_eq!(v.magnitude, 180.0);
        let v = parse_value_with_unit(UnitFamily::Distance, " 0.308 in ").unwrap();
        assert_eq!(v.unit, UnitTag::Distance(DistanceUnit::Inch));
    }
}
