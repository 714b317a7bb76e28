use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};

use crate::app::AppError;
use crate::ballistics::bc_from_sectional_density;
use crate::config::{Config, MeasurementSystem};
use crate::conversion;
use crate::drag_table::{self, DragTable, DrgCodec};
use crate::measurement::Measurement;
use crate::panels::humidity::{self, StepKey};
use crate::panels::PanelTree;
use crate::quantity::UnitFamily;
use crate::units::{DistanceUnit, Unit, WeightUnit};

#[derive(Debug, Parser)]
#[command(name = "ballistic_panels_cli", version, about = "탄도 입력 패널 도구")]
pub struct Cli {
    /// 하위 명령이 없으면 대화형 메뉴로 실행한다
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// 단위 변환 (예: convert distance 0.308 in mm)
    Convert {
        family: String,
        value: f64,
        from: String,
        to: String,
    },
    /// 단면밀도를 GC 탄도계수로 계산 (예: --weight 180gr --diameter 0.308in)
    SdToBc {
        #[arg(long)]
        weight: String,
        #[arg(long)]
        diameter: String,
    },
    /// 습도 입력 상자에 위/아래 키를 적용
    Humidity {
        #[arg(allow_hyphen_values = true)]
        text: String,
        #[arg(value_enum)]
        key: StepArg,
    },
    /// 모든 패널의 기본 레코드 출력
    Defaults {
        #[arg(long, value_enum)]
        system: Option<SystemArg>,
    },
    /// 사용자 항력표(.drg) 정보 출력
    DragTable { path: PathBuf },
    /// 기본 측정 체계 저장
    System {
        #[arg(value_enum)]
        system: SystemArg,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SystemArg {
    Metric,
    Imperial,
}

impl From<SystemArg> for MeasurementSystem {
    fn from(value: SystemArg) -> Self {
        match value {
            SystemArg::Metric => MeasurementSystem::Metric,
            SystemArg::Imperial => MeasurementSystem::Imperial,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StepArg {
    Up,
    Down,
}

impl From<StepArg> for StepKey {
    fn from(value: StepArg) -> Self {
        match value {
            StepArg::Up => StepKey::Up,
            StepArg::Down => StepKey::Down,
        }
    }
}

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    UnitConversion,
    SectionalDensity,
    Humidity,
    Defaults,
    DragTable,
    Settings,
    Exit,
}

/// 메인 메뉴를 표시하고 선택값을 반환한다.
pub fn main_menu() -> Result<MenuChoice, AppError> {
    println!("\n=== Ballistic Panels ===");
    println!("1) 단위 변환기");
    println!("2) 단면밀도 → 탄도계수");
    println!("3) 습도 입력 조정");
    println!("4) 기본 입력값 보기");
    println!("5) 사용자 항력표 불러오기");
    println!("6) 설정");
    println!("0) 종료");
    loop {
        let sel = read_line("메뉴 선택: ")?;
        match sel.trim() {
            "1" => return Ok(MenuChoice::UnitConversion),
            "2" => return Ok(MenuChoice::SectionalDensity),
            "3" => return Ok(MenuChoice::Humidity),
            "4" => return Ok(MenuChoice::Defaults),
            "5" => return Ok(MenuChoice::DragTable),
            "6" => return Ok(MenuChoice::Settings),
            "0" => return Ok(MenuChoice::Exit),
            _ => println!("잘못된 입력입니다. 다시 선택하세요."),
        }
    }
}

pub fn handle_convert(family: &str, value: f64, from: &str, to: &str) -> Result<(), AppError> {
    let family = conversion::parse_family(family)?;
    let result = conversion::convert(family, value, from, to)?;
    println!("변환 결과: {result} {}", conversion::parse_unit(family, to)?);
    Ok(())
}

/// 단위 변환 메뉴를 처리한다.
pub fn menu_convert() -> Result<(), AppError> {
    println!("\n-- 단위 변환 --");
    for (i, family) in UnitFamily::ALL.iter().enumerate() {
        let symbols: Vec<&str> = family.units().iter().map(|u| u.symbol()).collect();
        println!("{}) {:?}: {}", i + 1, family, symbols.join(", "));
    }
    let family = loop {
        let sel = read_line("항목 번호를 입력: ")?;
        if let Some(family) = sel
            .trim()
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|n| UnitFamily::ALL.get(n))
        {
            break *family;
        }
        println!("지원하지 않는 번호입니다.");
    };
    let value = read_f64("값 입력: ")?;
    let from = read_line("입력 단위(ex: mm, gr, ft/s): ")?;
    let to = read_line("변환 단위(ex: in, g, m/s): ")?;
    let result = conversion::convert(family, value, from.trim(), to.trim())?;
    println!("변환 결과: {result} {}", to.trim());
    Ok(())
}

/// `"180gr"`, `"0.308 in"` 같은 입력으로 단면밀도 탄도계수를 계산한다.
pub fn sectional_density_bc(weight: &str, diameter: &str) -> Result<f64, AppError> {
    let weight = conversion::parse_value_with_unit(UnitFamily::Weight, weight)?;
    let diameter = conversion::parse_value_with_unit(UnitFamily::Distance, diameter)?;
    let weight: Measurement<WeightUnit> = weight.try_into()?;
    let diameter: Measurement<DistanceUnit> = diameter.try_into()?;
    bc_from_sectional_density(weight, diameter).ok_or(AppError::EmptySectionalDensity)
}

pub fn handle_sd_to_bc(weight: &str, diameter: &str) -> Result<(), AppError> {
    let bc = sectional_density_bc(weight, diameter)?;
    println!("탄도계수: {bc} GC");
    Ok(())
}

pub fn menu_sd_to_bc() -> Result<(), AppError> {
    println!("\n-- 단면밀도 → 탄도계수 --");
    let weight = read_line("탄두 무게 (ex: 180gr, 11.66g): ")?;
    let diameter = read_line("탄두 직경 (ex: 0.308in, 7.82mm): ")?;
    handle_sd_to_bc(&weight, &diameter)
}

pub fn handle_humidity(text: &str, key: StepKey) {
    println!("{}", humidity::step(text, key));
}

pub fn menu_humidity() -> Result<(), AppError> {
    println!("\n-- 습도 입력 조정 --");
    let text = read_line("현재 값 [%]: ")?;
    let key = match read_line("1=위 2=아래: ")?.trim() {
        "2" => StepKey::Down,
        _ => StepKey::Up,
    };
    handle_humidity(text.trim(), key);
    Ok(())
}

pub fn handle_defaults(tree: &PanelTree) -> Result<(), AppError> {
    print!("{}", tree.snapshot().to_toml()?);
    Ok(())
}

pub fn handle_drag_table(path: &Path) -> Result<(), AppError> {
    let table = drag_table::open(path, &DrgCodec)?;
    print_drag_table(&table);
    Ok(())
}

/// 항력표를 읽어 보여 주고, 성공하면 설정에 경로를 기억한다.
pub fn menu_drag_table(config: &mut Config) -> Result<(), AppError> {
    println!("\n-- 사용자 항력표 --");
    let path = PathBuf::from(read_line("파일 경로 (.drg): ")?.trim());
    let table = drag_table::open(&path, &DrgCodec)?;
    print_drag_table(&table);
    config.custom_drag_table = Some(path);
    config.save()?;
    Ok(())
}

fn print_drag_table(table: &DragTable) {
    let ammo = &table.ammunition;
    println!("이름: {}", table.name);
    println!(
        "기준 탄두 무게: {:.2} ({:.1})",
        ammo.weight.to(WeightUnit::Gram),
        ammo.weight.to(WeightUnit::Grain)
    );
    if let Some(d) = ammo.bullet_diameter {
        println!(
            "기준 탄두 직경: {:.2} ({:.3})",
            d.to(DistanceUnit::Millimeter),
            d.to(DistanceUnit::Inch)
        );
    }
    if let Some(l) = ammo.bullet_length {
        println!(
            "기준 탄두 길이: {:.2} ({:.3})",
            l.to(DistanceUnit::Millimeter),
            l.to(DistanceUnit::Inch)
        );
    }
    if let (Some(first), Some(last)) = (table.points.first(), table.points.last()) {
        println!(
            "데이터 {}점, 마하 {:.2} ~ {:.2}",
            table.points.len(),
            first.mach,
            last.mach
        );
    }
}

/// 설정 메뉴를 처리한다.
pub fn handle_settings(cfg: &mut Config) -> Result<(), AppError> {
    println!("\n-- 설정 --");
    println!("현재 측정 체계: {}", cfg.measurement_system);
    println!("현재 사격 각도 단위: {}", cfg.default_angular_unit.symbol());
    println!("1) Metric  2) Imperial");
    let sel = read_line("변경할 번호(취소하려면 엔터): ")?;
    if sel.trim().is_empty() {
        return Ok(());
    }
    cfg.measurement_system = match sel.trim() {
        "1" => MeasurementSystem::Metric,
        "2" => MeasurementSystem::Imperial,
        _ => {
            println!("잘못된 입력이므로 변경하지 않습니다.");
            cfg.measurement_system
        }
    };
    let angle = read_line("사격 각도 단위(ex: moa, mil, 취소하려면 엔터): ")?;
    if !angle.trim().is_empty() {
        match conversion::parse_unit(UnitFamily::Angular, angle.trim()) {
            Ok(crate::quantity::UnitTag::Angular(unit)) => cfg.default_angular_unit = unit,
            _ => println!("잘못된 입력이므로 변경하지 않습니다."),
        }
    }
    println!("측정 체계가 {} 로 설정되었습니다.", cfg.measurement_system);
    Ok(())
}

fn read_line(prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush().map_err(AppError::Io)?;
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).map_err(AppError::Io)?;
    Ok(buf)
}

fn read_f64(prompt: &str) -> Result<f64, AppError> {
    loop {
        let s = read_line(prompt)?;
        match s.trim().parse::<f64>() {
            Ok(v) => return Ok(v),
            Err(_) => println!("숫자를 입력하세요."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_subcommands() {
        let cli = Cli::parse_from(["ballistic_panels_cli", "convert", "distance", "1", "in", "mm"]);
        assert!(matches!(cli.command, Some(Command::Convert { value, .. }) if value == 1.0));

        let cli = Cli::parse_from(["ballistic_panels_cli", "defaults", "--system", "imperial"]);
        assert!(matches!(
            cli.command,
            Some(Command::Defaults {
                system: Some(SystemArg::Imperial)
            })
        ));

        let cli = Cli::parse_from(["ballistic_panels_cli"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn sd_to_bc_from_text() {
        let bc = sectional_density_bc("180gr", "0.308 in").unwrap();
        assert_eq!(bc, 0.27106);
        assert!(matches!(
            sectional_density_bc("0gr", "0.308in"),
            Err(AppError::EmptySectionalDensity)
        ));
        assert!(matches!(
            sectional_density_bc("180 parsecs", "0.308in"),
            Err(AppError::Conversion(_))
        ));
    }
}
