//! 탄도 계산기 입력 패널의 단위 인식 바인딩을 라이브러리로 분리하여
//! CLI와 GUI가 같은 패널 모델을 쓰도록 한다.

pub mod app;
pub mod ballistics;
pub mod config;
pub mod conversion;
pub mod drag_table;
pub mod field;
pub mod measurement;
pub mod panels;
pub mod prompt;
pub mod quantity;
pub mod reticle;
pub mod system;
pub mod ui_cli;
pub mod units;
