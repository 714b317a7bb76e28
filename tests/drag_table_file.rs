//! 사용자 항력표 파일을 탄약 패널과 설정에 연결하는 흐름.
use std::cell::RefCell;
use std::rc::Rc;

use ballistic_panels::app::build_tree;
use ballistic_panels::ballistics::DragTableId;
use ballistic_panels::config::{load_or_create, Config};
use ballistic_panels::drag_table::{self, DrgCodec};
use ballistic_panels::panels::AmmunitionProvider;
use ballistic_panels::units::{DistanceUnit, WeightUnit};

const SAMPLE: &str = "CFM,308 Win 175gr SMK,0.01134,0.00782,0.0315\n\
0.263 0.00\n\
0.263 0.50\n\
0.405 1.00\n";

#[test]
fn table_file_fills_ammunition() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("smk.drg");
    std::fs::write(&path, SAMPLE).unwrap();

    let table = drag_table::open(&path, &DrgCodec).unwrap();
    assert_eq!(table.name, "308 Win 175gr SMK");
    assert_eq!(table.points.len(), 3);

    let cfg = Config {
        custom_drag_table: Some(path.clone()),
        ..Config::default()
    };
    let tree = build_tree(&cfg);
    let ammo = tree.ammo.borrow().ammunition();
    assert_eq!(ammo.ballistic_coefficient.table, DragTableId::GC);
    assert_eq!(ammo.ballistic_coefficient.value, 1.0);
    assert!(ammo.ballistic_coefficient.is_form_factor());
    assert_eq!(ammo.weight.unit, WeightUnit::Gram);
    assert!((ammo.weight.value - 11.34).abs() < 1e-9);
    let diameter = ammo.bullet_diameter.unwrap();
    assert_eq!(diameter.unit, DistanceUnit::Millimeter);
    assert!((diameter.value - 7.82).abs() < 1e-9);
}

#[test]
fn listeners_see_table_changes() {
    let dir = tempfile::tempdir().unwrap();
    let good = dir.path().join("good.drg");
    let bad = dir.path().join("bad.drg");
    std::fs::write(&good, SAMPLE).unwrap();
    std::fs::write(&bad, "not a table").unwrap();

    let tree = build_tree(&Config::default());
    let seen = Rc::new(RefCell::new(Vec::new()));
    let log = seen.clone();
    tree.ammo
        .borrow_mut()
        .on_custom_table_changed(move |t| log.borrow_mut().push(t.map(|t| t.name.clone())));

    tree.ammo
        .borrow_mut()
        .set_custom_ballistic_file(&good.to_string_lossy());
    tree.ammo
        .borrow_mut()
        .set_custom_ballistic_file(&bad.to_string_lossy());
    tree.ammo.borrow_mut().set_custom_ballistic_file("");

    assert_eq!(
        *seen.borrow(),
        vec![Some("308 Win 175gr SMK".to_string()), None, None]
    );
    assert!(!tree.ammo.borrow().is_form_factor());
}

#[test]
fn stored_table_path_survives_config_reload() {
    let dir = tempfile::tempdir().unwrap();
    let table = dir.path().join("smk.drg");
    std::fs::write(&table, SAMPLE).unwrap();
    let cfg_path = dir.path().join("config.toml");
    let cfg = Config {
        custom_drag_table: Some(table),
        ..Config::default()
    };
    cfg.save_to(&cfg_path).unwrap();

    let loaded = load_or_create(&cfg_path).unwrap();
    let tree = build_tree(&loaded);
    assert!(tree.ammo.borrow().custom_table().is_some());
}
