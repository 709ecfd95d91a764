use std::ffi::OsStr;
use std::fs;
use std::path::PathBuf;

use zmodel::boundary::BoundaryType;
use zmodel::config::{Config, InitialConditionCfg, TimeIntegrator};
use zmodel::order::Order;
use zmodel::sim;

fn yaml_cases() -> Vec<PathBuf> {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests");
    let mut v = vec![];
    for entry in fs::read_dir(&dir).expect("read tests dir") {
        let path = entry.expect("dir entry").path();
        if path.extension() == Some(OsStr::new("yaml")) {
            v.push(path);
        }
    }
    v.sort();
    v
}

fn load(file: &str) -> Config {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(file);
    Config::from_path(path).expect("load config")
}

#[test]
fn every_yaml_case_builds_a_mesh_and_engine() {
    let cases = yaml_cases();
    assert!(cases.len() >= 3, "expected the yaml fixtures, found {:?}", cases);
    for path in cases {
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        let cfg = Config::from_path(&path).expect("load yaml config");
        let mesh = cfg.build_mesh().unwrap_or_else(|e| panic!("{}: {:#}", name, e));
        let engine = cfg.build_engine(&mesh).unwrap_or_else(|e| panic!("{}: {:#}", name, e));
        assert_eq!(engine.order(), cfg.model.order, "{}: order", name);
        assert_eq!(mesh.halo_width(), cfg.mesh.halo_width, "{}: halo", name);
        if cfg.model.order != Order::Low {
            assert!(cfg.model.far_field.is_some(), "{}: far field section", name);
        }
    }
}

#[test]
fn low_sine_fixture_has_expected_settings() {
    let cfg = load("tests/low_sine.yaml");
    assert_eq!(cfg.mesh.nx, 16);
    assert_eq!(cfg.mesh.boundary, [BoundaryType::Periodic; 4]);
    assert_eq!(cfg.model.order, Order::Low);
    assert!(matches!(cfg.simulation.time_integrator, TimeIntegrator::SspRk3));
    match &cfg.initial_condition {
        InitialConditionCfg::Sine { amplitude, mode_x, mode_y } => {
            assert!((amplitude - 0.01).abs() < 1e-15);
            assert_eq!((*mode_x, *mode_y), (1, 0));
        }
        other => panic!("unexpected initial condition {:?}", other),
    }
    let mesh = cfg.build_mesh().expect("mesh");
    assert_eq!(mesh.periodic(), [true, true]);
}

#[test]
fn missing_far_field_section_is_a_config_error() {
    let mut cfg = load("tests/medium_sine.yaml");
    cfg.model.far_field = None;
    let mesh = cfg.build_mesh().expect("mesh");
    assert!(cfg.build_engine(&mesh).is_err());
}

#[test]
fn too_thin_halo_is_a_config_error() {
    let mut cfg = load("tests/low_sine.yaml");
    cfg.mesh.halo_width = 1;
    assert!(cfg.build_mesh().is_err());
}

#[test]
fn low_order_run_grows_vorticity_from_rest() {
    let stats = sim::run(load("tests/low_sine.yaml")).expect("run sim");
    assert_eq!(stats.steps, 20);
    assert!(stats.max_w.is_finite() && stats.max_w > 0.0, "max_w = {}", stats.max_w);
    assert!(stats.max_zdot.is_finite());
    assert!((stats.zmax - 0.01).abs() < 1e-3, "zmax = {}", stats.zmax);
    assert!((stats.zmin + 0.01).abs() < 1e-3, "zmin = {}", stats.zmin);
}

#[test]
fn far_field_runs_stay_finite() {
    for file in ["tests/medium_sine.yaml", "tests/high_gaussian.yaml"] {
        let stats = sim::run(load(file)).expect("run sim");
        assert!(stats.zmin.is_finite() && stats.zmax.is_finite(), "{}", file);
        assert!(stats.max_zdot.is_finite(), "{}", file);
        assert!(stats.max_w.is_finite(), "{}", file);
    }
}
