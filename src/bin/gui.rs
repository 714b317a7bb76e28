#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! eframe/egui 기반 데스크톱 GUI 진입점.
//!
//! 화면은 패널 레이아웃(`FieldSet`)을 그대로 순회해 입력 상자와 단위 콤보를 그린다.
//! 값과 단위 상태는 모두 라이브러리의 패널이 갖고, 이 파일은 편집 중인 문자열만 보관한다.

use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;
use std::{
    fs,
    path::{Path, PathBuf},
};

use ballistic_panels::{
    app::build_tree,
    ballistics::{DragTableId, TwistDirection},
    config::{self, MeasurementSystem},
    field::MeasurementField,
    measurement::Measurement,
    panels::{
        AmmoPanel, AtmospherePanel, FieldSet, FieldSpec, PanelTree, StepKey,
    },
    prompt::RfdFilePrompt,
    reticle::{BdcPoint, PathCommand, ReticleEditor, ReticleElement, ReticleItem, ReticlePosition},
    system::MeasurementSystemControl,
    units::{AngularUnit, DistanceUnit},
};
use eframe::{egui, App, Frame};
use image::GenericImageView;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), eframe::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let icon_data = load_app_icon();
    let mut viewport = egui::ViewportBuilder::default().with_inner_size([760.0, 560.0]);
    if let Some(icon) = icon_data {
        viewport = viewport.with_icon(icon);
    }
    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    let app_cfg = match config::load_or_default() {
        Ok(cfg) => cfg,
        Err(err) => {
            tracing::warn!(error = %err, "설정을 읽지 못해 기본값을 사용합니다");
            config::Config::default()
        }
    };
    eframe::run_native(
        "Ballistic Panels",
        options,
        Box::new(move |cc| {
            if let Err(e) = setup_fonts(&cc.egui_ctx) {
                tracing::info!("{e}");
            }
            Box::new(GuiApp::new(app_cfg.clone()))
        }),
    )
}

fn load_app_icon() -> Option<egui::IconData> {
    let search = ["icon.png", "assets/icon.png", "../assets/icon.png"];
    let path = search.iter().find(|p| Path::new(*p).exists())?;
    let bytes = fs::read(path).ok()?;
    let img = image::load_from_memory(&bytes).ok()?;
    let rgba = img.to_rgba8();
    let (w, h) = img.dimensions();
    Some(egui::IconData {
        rgba: rgba.into_raw(),
        width: w,
        height: h,
    })
}

/// 한글 오류 메시지를 표시하기 위해 폰트를 찾아 적용한다.
/// 1) assets/fonts/malgun.ttf
/// 2) Windows 시스템 폰트
fn setup_fonts(ctx: &egui::Context) -> Result<(), String> {
    let asset_path = Path::new("assets/fonts/malgun.ttf");
    let candidate = if asset_path.exists() {
        Some(asset_path.to_path_buf())
    } else {
        std::env::var_os("WINDIR").and_then(|windir| {
            let fonts = Path::new(&windir).join("Fonts");
            ["malgun.ttf", "gulim.ttc"]
                .iter()
                .map(|c| fonts.join(c))
                .find(|p| p.exists())
        })
    };
    let path = candidate.ok_or_else(|| "Korean font not found; using default font.".to_string())?;
    let bytes = fs::read(&path).map_err(|e| format!("Failed to read font file: {e}"))?;
    let mut fonts = egui::FontDefinitions::default();
    fonts
        .font_data
        .insert("korean_font".into(), egui::FontData::from_owned(bytes));
    for family in [egui::FontFamily::Proportional, egui::FontFamily::Monospace] {
        fonts
            .families
            .entry(family)
            .or_default()
            .push("korean_font".into());
    }
    ctx.set_fonts(fonts);
    Ok(())
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Tab {
    Ammunition,
    Weapon,
    Atmosphere,
    Parameters,
    Reticle,
}

struct GuiApp {
    config: config::Config,
    tree: PanelTree,
    tab: Tab,
    /// 편집 중인 입력 상자의 문자열. 포커스를 잃으면 필드 값으로 다시 그린다.
    edits: HashMap<String, String>,
    calculate_requested: Rc<Cell<bool>>,
    snapshot_text: Option<String>,
    reticle: ReticleEditor,
    reticle_selected: Option<usize>,
    status: Option<String>,
}

impl GuiApp {
    fn new(config: config::Config) -> Self {
        let tree = build_tree(&config);
        let calculate_requested = Rc::new(Cell::new(false));
        let flag = calculate_requested.clone();
        tree.parameters
            .borrow_mut()
            .on_calculate_requested(move || flag.set(true));
        Self {
            config,
            tree,
            tab: Tab::Ammunition,
            edits: HashMap::new(),
            calculate_requested,
            snapshot_text: None,
            reticle: ReticleEditor::new(),
            reticle_selected: None,
            status: None,
        }
    }

    /// 측정 체계를 트리 전체에 적용하고 편집 중인 문자열을 버린다.
    fn apply_measurement_system(&mut self, system: MeasurementSystem) {
        self.tree.set_measurement_system(system);
        self.config.measurement_system = system;
        self.edits.clear();
    }

    fn save_config(&mut self) {
        if let Err(e) = self.config.save() {
            tracing::warn!(error = %e, "설정 저장 실패");
            self.status = Some(format!("Save error: {e}"));
        }
    }

    fn ui_nav(&mut self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.heading("Panels");
            ui.add_space(8.0);
        });
        for (tab, label) in [
            (Tab::Ammunition, "Ammunition"),
            (Tab::Weapon, "Weapon"),
            (Tab::Atmosphere, "Atmosphere"),
            (Tab::Parameters, "Parameters"),
            (Tab::Reticle, "Reticle"),
        ] {
            let selected = self.tab == tab;
            let button = egui::Button::new(label)
                .fill(if selected {
                    ui.visuals().selection.bg_fill
                } else {
                    ui.visuals().extreme_bg_color
                })
                .min_size(egui::vec2(ui.available_width(), 32.0));
            if ui.add(button).clicked() {
                self.tab = tab;
            }
        }
    }

    fn ui_ammunition(&mut self, ui: &mut egui::Ui) {
        ui.heading("Ammunition");
        ui.separator();
        let ammo = self.tree.ammo.clone();
        if let Some(message) = ammo_ui(ui, "ammo", &mut ammo.borrow_mut(), &mut self.edits) {
            self.status = Some(message);
        }
        self.config.custom_drag_table = remembered_drag_table(&ammo.borrow());
    }

    fn ui_weapon(&mut self, ui: &mut egui::Ui) {
        ui.heading("Weapon");
        ui.separator();
        {
            let mut weapon = self.tree.weapon.borrow_mut();
            let mut direction = weapon.rifling_direction();
            ui.horizontal(|ui| {
                ui.label("Rifling direction");
                egui::ComboBox::from_id_source("rifling_direction")
                    .selected_text(match direction {
                        None => "None",
                        Some(TwistDirection::Left) => "Left",
                        Some(TwistDirection::Right) => "Right",
                    })
                    .show_ui(ui, |ui| {
                        ui.selectable_value(&mut direction, None, "None");
                        ui.selectable_value(&mut direction, Some(TwistDirection::Left), "Left");
                        ui.selectable_value(&mut direction, Some(TwistDirection::Right), "Right");
                    });
            });
            if direction != weapon.rifling_direction() {
                weapon.set_rifling_direction(direction);
            }
            field_grid(ui, "weapon", weapon.fields_mut(), &mut self.edits);
            if ui.button("Reset").clicked() {
                weapon.set_rifle(None);
                self.edits.clear();
            }
        }
        ui.add_space(8.0);
        egui::CollapsingHeader::new("Zero atmosphere").show(ui, |ui| {
            atmosphere_ui(
                ui,
                "zero_atmosphere",
                &mut self.tree.zero_atmosphere.borrow_mut(),
                &mut self.edits,
            );
        });
        egui::CollapsingHeader::new("Zero ammunition").show(ui, |ui| {
            if let Some(message) = ammo_ui(
                ui,
                "zero_ammunition",
                &mut self.tree.zero_ammunition.borrow_mut(),
                &mut self.edits,
            ) {
                self.status = Some(message);
            }
        });
    }

    fn ui_atmosphere(&mut self, ui: &mut egui::Ui) {
        ui.heading("Atmosphere");
        ui.separator();
        atmosphere_ui(
            ui,
            "atmosphere",
            &mut self.tree.atmosphere.borrow_mut(),
            &mut self.edits,
        );
    }

    fn ui_parameters(&mut self, ui: &mut egui::Ui) {
        ui.heading("Shot parameters");
        ui.separator();
        let mut parameters = self.tree.parameters.borrow_mut();
        field_grid(ui, "parameters", parameters.fields_mut(), &mut self.edits);
        ui.horizontal(|ui| {
            ui.label("Clicks");
            let mut clicks = parameters.clicks_text().to_string();
            if ui
                .add(egui::TextEdit::singleline(&mut clicks).desired_width(60.0))
                .changed()
            {
                parameters.set_clicks_text(&clicks);
            }
            if ui.button("Apply clicks").clicked() {
                parameters.apply_clicks();
                self.edits.remove("parameters.shot_angle");
            }
        });
        ui.add_space(8.0);
        if ui.button("Calculate").clicked() {
            parameters.request_calculation();
        }
    }

    fn ui_reticle(&mut self, ui: &mut egui::Ui) {
        ui.heading("Reticle");
        ui.separator();
        let mut name = self.reticle.reticle().name.clone();
        ui.horizontal(|ui| {
            ui.label("Name");
            if ui.text_edit_singleline(&mut name).changed() {
                let r = self.reticle.reticle();
                let (size, zero) = (r.size, r.zero);
                self.reticle.set_parameters(&name, size, zero);
            }
        });
        let r = self.reticle.reticle();
        ui.label(format!("Size: {}   Zero: {}", r.size, r.zero.map(|z| z.to_string()).unwrap_or_default()));
        let center = r.zero.unwrap_or(ReticlePosition::new(0.0, 0.0, AngularUnit::Mil));

        ui.horizontal_wrapped(|ui| {
            if ui.button("New").clicked() {
                self.reticle.new_reticle();
                self.reticle_selected = None;
            }
            let mut added = None;
            for (label, item) in new_reticle_items(center) {
                if ui.button(label).clicked() {
                    added = Some(item);
                }
            }
            if let Some(item) = added {
                self.reticle_selected = Some(self.reticle.add(item));
            }
        });
        ui.separator();
        for (i, item) in self.reticle.items().iter().enumerate() {
            let selected = self.reticle_selected == Some(i);
            if ui.selectable_label(selected, item.to_string()).clicked() {
                self.reticle_selected = Some(i);
            }
        }
        ui.separator();
        ui.horizontal(|ui| {
            let Some(index) = self.reticle_selected else {
                return;
            };
            if ui.button("Duplicate").clicked() {
                match self.reticle.duplicate(index) {
                    Ok(i) => self.reticle_selected = Some(i),
                    Err(e) => self.status = Some(e.to_string()),
                }
            }
            if ui.button("Delete").clicked() {
                if let Err(e) = self.reticle.delete(index) {
                    self.status = Some(e.to_string());
                }
                self.reticle_selected = None;
            }
        });
    }
}

/// 새 레티클 항목 버튼 목록. 위치는 영점 기준이다.
fn new_reticle_items(center: ReticlePosition) -> Vec<(&'static str, ReticleItem)> {
    let unit = center.x.unit;
    let at = |dx: f64, dy: f64| ReticlePosition {
        x: Measurement::new(center.x.value + dx, unit),
        y: Measurement::new(center.y.in_unit(unit) + dy, unit),
    };
    let one = Measurement::new(1.0, unit);
    vec![
        (
            "Line",
            ReticleItem::Element(ReticleElement::Line {
                start: at(-1.0, 0.0),
                end: at(1.0, 0.0),
                line_width: None,
                color: None,
            }),
        ),
        (
            "Circle",
            ReticleItem::Element(ReticleElement::Circle {
                center: at(0.0, 0.0),
                radius: one,
                fill: false,
                color: None,
            }),
        ),
        (
            "Rectangle",
            ReticleItem::Element(ReticleElement::Rectangle {
                top_left: at(-1.0, -1.0),
                size: ReticlePosition::new(2.0, 2.0, unit),
                fill: false,
                color: None,
            }),
        ),
        (
            "Path",
            ReticleItem::Element(ReticleElement::Path {
                commands: vec![
                    PathCommand::MoveTo(at(-1.0, 0.0)),
                    PathCommand::LineTo(at(0.0, 1.0)),
                    PathCommand::LineTo(at(1.0, 0.0)),
                ],
                fill: false,
                color: None,
            }),
        ),
        (
            "Text",
            ReticleItem::Element(ReticleElement::Text {
                position: at(1.0, 1.0),
                height: Measurement::new(0.5, unit),
                text: "1".into(),
                color: None,
            }),
        ),
        (
            "BDC Point",
            ReticleItem::Bdc(BdcPoint {
                position: at(0.0, 2.0),
                distance: Measurement::new(300.0, DistanceUnit::Meter),
                text_offset: Measurement::new(0.5, unit),
                text_height: Measurement::new(0.3, unit),
            }),
        ),
    ]
}

/// 필드 한 줄: 라벨, 값 입력 상자, 단위 콤보.
fn field_row(
    ui: &mut egui::Ui,
    key: String,
    spec: &FieldSpec,
    field: &mut MeasurementField,
    edits: &mut HashMap<String, String>,
) {
    ui.label(spec.label);
    let enabled = field.is_enabled();
    let mut text = edits.get(&key).cloned().unwrap_or_else(|| field.text());
    let response = ui.add_enabled(
        enabled,
        egui::TextEdit::singleline(&mut text).desired_width(110.0),
    );
    if response.changed() {
        if let Err(e) = field.set_text(&text) {
            tracing::debug!(field = spec.name, error = %e, "입력 무시");
        }
        edits.insert(key.clone(), text);
    }
    if response.lost_focus() {
        edits.remove(&key);
    }
    let mut unit = field.unit();
    ui.add_enabled_ui(enabled, |ui| {
        egui::ComboBox::from_id_source(format!("{key}.unit"))
            .selected_text(unit.symbol())
            .show_ui(ui, |ui| {
                for u in spec.family.units() {
                    ui.selectable_value(&mut unit, u, u.symbol());
                }
            });
    });
    if unit != field.unit() {
        let precision = spec
            .preset_for_unit(unit)
            .map_or(field.precision(), |p| p.precision);
        field.set_unit(unit, precision);
        edits.remove(&key);
    }
    ui.end_row();
}

fn field_grid(ui: &mut egui::Ui, prefix: &str, fields: &mut FieldSet, edits: &mut HashMap<String, String>) {
    egui::Grid::new(format!("{prefix}_grid"))
        .num_columns(3)
        .spacing([12.0, 6.0])
        .show(ui, |ui| {
            for (spec, field) in fields.iter_mut() {
                field_row(ui, format!("{prefix}.{}", spec.name), spec, field, edits);
            }
        });
}

/// 탄약 패널 화면. 사용자에게 보여 줄 메시지가 있으면 돌려준다.
fn ammo_ui(
    ui: &mut egui::Ui,
    prefix: &str,
    ammo: &mut AmmoPanel,
    edits: &mut HashMap<String, String>,
) -> Option<String> {
    let mut message = None;
    field_grid(ui, prefix, ammo.fields_mut(), edits);

    let bc = ammo.ballistic_coefficient_input();
    let (mut value, mut table) = (bc.value, bc.table);
    let mut form_factor = ammo.is_form_factor();
    ui.horizontal(|ui| {
        ui.label("Ballistic coefficient");
        ui.add(egui::DragValue::new(&mut value).speed(0.001).max_decimals(5));
        egui::ComboBox::from_id_source(format!("{prefix}.bc_table"))
            .selected_text(table.name())
            .show_ui(ui, |ui| {
                for id in DragTableId::ALL {
                    ui.selectable_value(&mut table, id, id.name());
                }
            });
        ui.checkbox(&mut form_factor, "Form factor");
    });
    if value != bc.value || table != bc.table {
        ammo.set_ballistic_coefficient_input(value, table);
    }
    if form_factor != ammo.is_form_factor() {
        ammo.set_form_factor(form_factor);
    }

    ui.horizontal(|ui| {
        if ui.button("SD → BC").clicked() && !ammo.sectional_density_to_bc() {
            message = Some("Bullet weight and diameter are required.".to_string());
        }
        if ui.button("Custom table…").clicked() && ammo.load_custom_table(&mut RfdFilePrompt) {
            clear_prefix(edits, prefix);
            if ammo.custom_table().is_none() {
                message = Some(format!("Cannot read {}", ammo.custom_ballistic_file()));
            }
        }
        if ui.button("Clear").clicked() {
            ammo.clear();
            clear_prefix(edits, prefix);
        }
    });
    if let Some(table) = ammo.custom_table() {
        ui.label(format!("Custom table: {} ({} points)", table.name, table.points.len()));
    }
    message
}

fn atmosphere_ui(
    ui: &mut egui::Ui,
    prefix: &str,
    atmosphere: &mut AtmospherePanel,
    edits: &mut HashMap<String, String>,
) {
    field_grid(ui, prefix, atmosphere.fields_mut(), edits);
    ui.horizontal(|ui| {
        ui.label("Humidity, %");
        let mut text = atmosphere.humidity().text().to_string();
        let response = ui.add(egui::TextEdit::singleline(&mut text).desired_width(60.0));
        if response.changed() {
            atmosphere.humidity_mut().set_text(&text);
        }
        if response.has_focus() {
            let (up, down) = ui.input(|i| {
                (
                    i.key_pressed(egui::Key::ArrowUp),
                    i.key_pressed(egui::Key::ArrowDown),
                )
            });
            if up {
                atmosphere.humidity_mut().key_down(StepKey::Up);
            }
            if down {
                atmosphere.humidity_mut().key_down(StepKey::Down);
            }
        }
    });
    if ui.button("Reset").clicked() {
        use ballistic_panels::panels::AtmosphereProvider;
        atmosphere.set_atmosphere(None);
        clear_prefix(edits, prefix);
    }
}

/// 설정에 남길 항력표 경로. 읽기에 성공한 파일만 기억한다.
fn remembered_drag_table(ammo: &AmmoPanel) -> Option<PathBuf> {
    ammo.custom_table()
        .map(|_| PathBuf::from(ammo.custom_ballistic_file()))
}

fn clear_prefix(edits: &mut HashMap<String, String>, prefix: &str) {
    edits.retain(|k, _| !k.starts_with(&format!("{prefix}.")));
}

impl App for GuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        // 상단 바
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Ballistic Panels");
                ui.separator();
                let mut system = self.tree.measurement_system();
                ui.selectable_value(&mut system, MeasurementSystem::Metric, "Metric");
                ui.selectable_value(&mut system, MeasurementSystem::Imperial, "Imperial");
                if system != self.tree.measurement_system() {
                    self.apply_measurement_system(system);
                    self.save_config();
                }
                ui.separator();
                if ui.button("Reset all").clicked() {
                    self.tree.reset();
                    self.edits.clear();
                }
            });
        });

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(self.status.as_deref().unwrap_or("Ready"));
                if self.status.is_some() && ui.small_button("x").clicked() {
                    self.status = None;
                }
            });
        });

        egui::SidePanel::left("nav")
            .resizable(true)
            .min_width(120.0)
            .default_width(160.0)
            .show(ctx, |ui| {
                self.ui_nav(ui);
            });

        let custom_table = self.config.custom_drag_table.clone();
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false; 2])
                .show(ui, |ui| match self.tab {
                    Tab::Ammunition => self.ui_ammunition(ui),
                    Tab::Weapon => self.ui_weapon(ui),
                    Tab::Atmosphere => self.ui_atmosphere(ui),
                    Tab::Parameters => self.ui_parameters(ui),
                    Tab::Reticle => self.ui_reticle(ui),
                });
        });
        if self.config.custom_drag_table != custom_table {
            self.save_config();
        }

        if self.calculate_requested.replace(false) {
            self.snapshot_text = Some(match self.tree.snapshot().to_toml() {
                Ok(text) => text,
                Err(e) => format!("{e}"),
            });
        }
        if let Some(text) = &self.snapshot_text {
            let mut open = true;
            egui::Window::new("Calculation input")
                .collapsible(false)
                .resizable(true)
                .open(&mut open)
                .show(ctx, |ui| {
                    egui::ScrollArea::vertical().show(ui, |ui| {
                        ui.monospace(text.as_str());
                    });
                });
            if !open {
                self.snapshot_text = None;
            }
        }
    }
}
