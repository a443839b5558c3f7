use assert_fs::prelude::*;
use measure_engine::{
    config::{read_config_json, write_config_json},
    EngineConfig, MeasurementEngine, MeasurementKind, Point3, Unit,
};
use predicates::prelude::*;

#[test]
fn config_roundtrip_through_file() {
    let dir = assert_fs::TempDir::new().unwrap();
    let file = dir.child("engine.json");
    let cfg = EngineConfig {
        closure_threshold: 0.25,
        default_unit: Unit::Inch,
    };
    write_config_json(file.path().to_str().unwrap(), &cfg).unwrap();
    file.assert(predicate::str::contains("\"default_unit\": \"in\""));

    let loaded = read_config_json(file.path().to_str().unwrap()).unwrap();
    assert_eq!(loaded, cfg);
    dir.close().unwrap();
}

#[test]
fn config_rejects_negative_threshold() {
    let file = assert_fs::NamedTempFile::new("bad.json").unwrap();
    file.write_str(r#"{"closure_threshold": -0.5}"#).unwrap();
    let err = read_config_json(file.path().to_str().unwrap()).unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
}

#[test]
fn config_rejects_unknown_unit() {
    let file = assert_fs::NamedTempFile::new("unit.json").unwrap();
    file.write_str(r#"{"default_unit": "yd"}"#).unwrap();
    let err = read_config_json(file.path().to_str().unwrap()).unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
}

#[test]
fn loaded_threshold_drives_closure() {
    let file = assert_fs::NamedTempFile::new("wide.json").unwrap();
    file.write_str(r#"{"closure_threshold": 2.0}"#).unwrap();
    let cfg = read_config_json(file.path().to_str().unwrap()).unwrap();
    assert_eq!(cfg.default_unit, Unit::Meter);

    let mut engine = MeasurementEngine::with_config(cfg);
    engine.select_tool(MeasurementKind::Area);
    for q in [
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(10.0, 0.0, 0.0),
        Point3::new(10.0, 10.0, 0.0),
    ] {
        engine.submit_point(q).unwrap();
    }
    let m = engine
        .submit_point(Point3::new(1.0, 1.0, 0.0))
        .unwrap()
        .expect("within the configured threshold");
    assert!((m.value() - 50.0).abs() < 1e-9);
}
