//! 습도 입력 상자. 정수 백분율을 위/아래 키로 1씩 조정한다.

/// 입력 상자에서 눌린 조정 키.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKey {
    Up,
    Down,
}

/// 기본 습도 [%]
pub const DEFAULT_HUMIDITY_PERCENT: f64 = 78.0;

/// 입력 문자열을 백분율로 읽는다. 숫자가 아니면 0이다.
pub fn parse_percent(text: &str) -> f64 {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// 백분율을 가장 짧은 형태로 쓴다 (`78`, `51.5`).
pub fn format_percent(percent: f64) -> String {
    let rounded = (percent * 1e6).round() / 1e6;
    // -0 표시 방지
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{rounded}")
}

/// 키 하나를 적용한 새 문자열. 결과는 [0, 100]으로 자른다.
pub fn step(text: &str, key: StepKey) -> String {
    let delta = match key {
        StepKey::Up => 1.0,
        StepKey::Down => -1.0,
    };
    format_percent((parse_percent(text) + delta).clamp(0.0, 100.0))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HumidityInput {
    text: String,
}

impl Default for HumidityInput {
    fn default() -> Self {
        Self {
            text: format_percent(DEFAULT_HUMIDITY_PERCENT),
        }
    }
}

impl HumidityInput {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
    }

    pub fn key_down(&mut self, key: StepKey) {
        self.text = step(&self.text, key);
    }

    /// 0~1 비율
    pub fn fraction(&self) -> f64 {
        parse_percent(&self.text) / 100.0
    }

    pub fn set_fraction(&mut self, fraction: f64) {
        self.text = format_percent(fraction * 100.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stepper_cases() {
        let cases = [
            ("0", StepKey::Up, "1"),
            ("1", StepKey::Up, "2"),
            ("1.5", StepKey::Up, "2.5"),
            ("99.5", StepKey::Up, "100"),
            ("100", StepKey::Up, "100"),
            ("1", StepKey::Down, "0"),
            ("0", StepKey::Down, "0"),
            ("2.5", StepKey::Down, "1.5"),
            ("0.5", StepKey::Down, "0"),
            ("a", StepKey::Up, "1"),
            ("a", StepKey::Down, "0"),
        ];
        for (text, key, expected) in cases {
            assert_eq!(step(text, key), expected, "{text:?} {key:?}");
        }
    }

    #[test]
    fn fraction_round_trip() {
        let mut h = HumidityInput::default();
        assert_eq!(h.text(), "78");
        h.set_fraction(0.51);
        assert_eq!(h.text(), "51");
        h.set_text("51.5");
        assert!((h.fraction() - 0.515).abs() < 1e-12);
    }

    #[test]
    fn key_down_updates_text() {
        let mut h = HumidityInput::default();
        h.set_text("99");
        h.key_down(StepKey::Up);
        h.key_down(StepKey::Up);
        assert_eq!(h.text(), "100");
    }
}
