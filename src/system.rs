//! 측정 체계 전파.
//!
//! 트리의 루트에서 `set_measurement_system`을 호출하면 각 패널은 자신의
//! 필드에 프리셋을 적용한 뒤 연결된 자식 패널에 같은 호출을 넘긴다.
//! 필드 변환이 서로 독립적이라 순서와 무관하고, 두 번 호출해도 결과가 같다.

use crate::config::MeasurementSystem;

/// 측정 체계 상태를 갖고 그 변경을 받아들이는 패널.
pub trait MeasurementSystemControl {
    fn measurement_system(&self) -> MeasurementSystem;

    fn set_measurement_system(&mut self, system: MeasurementSystem);
}
