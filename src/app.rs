use crate::config::Config;
use crate::conversion::ConversionError;
use crate::drag_table::DragTableError;
use crate::panels::{AmmunitionProvider, PanelTree};
use crate::ui_cli::{self, Cli, Command, MenuChoice};

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// 파일 입출력 오류
    #[error("입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    /// 설정 저장/로드 오류
    #[error("설정 오류: {0}")]
    Config(#[from] crate::config::ConfigError),
    /// 단위 변환 오류
    #[error("단위 변환 오류: {0}")]
    Conversion(#[from] ConversionError),
    /// 항력표 읽기 오류
    #[error("항력표 오류: {0}")]
    DragTable(#[from] DragTableError),
    /// 레코드 출력 오류
    #[error("출력 오류: {0}")]
    Render(#[from] toml::ser::Error),
    /// 단면밀도 계산에 필요한 값이 0
    #[error("무게와 직경은 0보다 커야 합니다")]
    EmptySectionalDensity,
}

/// 설정을 반영한 패널 트리를 만든다. 저장된 사용자 항력표가 있으면 탄약 패널에 불러온다.
pub fn build_tree(config: &Config) -> PanelTree {
    let tree = PanelTree::from_config(config);
    if let Some(path) = &config.custom_drag_table {
        let mut ammo = tree.ammo.borrow_mut();
        ammo.set_custom_ballistic_file(&path.to_string_lossy());
        if ammo.custom_table().is_none() {
            tracing::warn!(path = %path.display(), "설정의 항력표를 불러오지 못했습니다");
        }
    }
    tree
}

/// 명령을 실행한다. 하위 명령이 없으면 대화형 메뉴를 띄운다.
pub fn run(cli: Cli, config: &mut Config) -> Result<(), AppError> {
    match cli.command {
        Some(Command::Convert {
            family,
            value,
            from,
            to,
        }) => ui_cli::handle_convert(&family, value, &from, &to),
        Some(Command::SdToBc { weight, diameter }) => ui_cli::handle_sd_to_bc(&weight, &diameter),
        Some(Command::Humidity { text, key }) => {
            ui_cli::handle_humidity(&text, key.into());
            Ok(())
        }
        Some(Command::Defaults { system }) => {
            let mut cfg = config.clone();
            if let Some(system) = system {
                cfg.measurement_system = system.into();
            }
            ui_cli::handle_defaults(&build_tree(&cfg))
        }
        Some(Command::DragTable { path }) => ui_cli::handle_drag_table(&path),
        Some(Command::System { system }) => {
            config.measurement_system = system.into();
            config.save()?;
            println!("측정 체계가 {} 로 설정되었습니다.", config.measurement_system);
            Ok(())
        }
        None => run_interactive(config),
    }
}

/// CLI 애플리케이션의 메뉴 루프를 실행한다.
fn run_interactive(config: &mut Config) -> Result<(), AppError> {
    loop {
        let result = match ui_cli::main_menu()? {
            MenuChoice::UnitConversion => ui_cli::menu_convert(),
            MenuChoice::SectionalDensity => ui_cli::menu_sd_to_bc(),
            MenuChoice::Humidity => ui_cli::menu_humidity(),
            MenuChoice::Defaults => ui_cli::handle_defaults(&build_tree(config)),
            MenuChoice::DragTable => ui_cli::menu_drag_table(config),
            MenuChoice::Settings => {
                ui_cli::handle_settings(config)?;
                config.save().map_err(AppError::from)
            }
            MenuChoice::Exit => {
                config.save()?;
                println!("프로그램을 종료합니다.");
                break;
            }
        };
        // 메뉴 하나의 실패로 루프를 끝내지 않는다
        if let Err(err) = result {
            println!("오류: {err}");
        }
    }
    Ok(())
}
