//! Tests for save directory loading and derived dynamics
//!
//! These tests verify:
//! - A written save directory loads back with identical contents
//! - Missing and malformed files are reported with their path
//! - Radius and wealth dynamics apply the specification at every mesh point
//! - Function sections over an effort domain

use crate::error::LoadError;
use crate::format::linspace;
use crate::model::{GridName, Model, SaveHeader, VariableName};

use super::fixtures::{self, effort, quantity};

#[test]
fn test_load_written_save() {
    let dir = tempfile::tempdir().unwrap();
    let original = fixtures::model();
    fixtures::write_save(&original, dir.path());

    let model = Model::load(dir.path()).unwrap();
    assert_eq!(model.save_dir(), Some(dir.path()));
    assert_eq!(model.parameters(), original.parameters());
    assert_eq!(model.specification(), original.specification());
    for name in GridName::ALL {
        assert_eq!(model.grid(name).values(), original.grid(name).values());
    }
    for name in VariableName::ALL {
        assert_eq!(model.variable(name).data(), original.variable(name).data());
    }
    assert_eq!(
        model.variable(VariableName::S).path(),
        Some(dir.path().join("spol").as_path())
    );
}

#[test]
fn test_header_is_parsed() {
    let dir = tempfile::tempdir().unwrap();
    fixtures::write_save(&fixtures::model(), dir.path());

    let model = Model::load(dir.path()).unwrap();
    let header = model.header().unwrap();
    assert_eq!(
        header.created,
        Some(jiff::civil::date(2025, 10, 18).at(9, 30, 0, 0))
    );
    assert_eq!(header.host.as_deref(), Some("workstation"));
    assert_eq!(header.user.as_deref(), Some("analyst"));
}

#[test]
fn test_header_tolerates_padded_day_and_bad_timestamps() {
    let header = SaveHeader::parse("Created   :Sat Oct  4 07:05:09 2025\nUser      :me\n");
    assert_eq!(
        header.created,
        Some(jiff::civil::date(2025, 10, 4).at(7, 5, 9, 0))
    );
    assert_eq!(header.host, None);

    let bad = SaveHeader::parse("Created   :yesterday\n");
    assert_eq!(bad.created, None);
}

#[test]
fn test_missing_header_is_optional() {
    let dir = tempfile::tempdir().unwrap();
    fixtures::model().save(dir.path()).unwrap();
    let model = Model::load(dir.path()).unwrap();
    assert!(model.header().is_none());
}

#[test]
fn test_missing_file_names_path() {
    let dir = tempfile::tempdir().unwrap();
    fixtures::write_save(&fixtures::model(), dir.path());
    std::fs::remove_file(dir.path().join("spol")).unwrap();

    let err = Model::load(dir.path()).unwrap_err();
    match &err {
        LoadError::MissingFile { path } => assert_eq!(path, &dir.path().join("spol")),
        other => panic!("expected missing file, got {other:?}"),
    }
    assert!(err.to_string().contains("consider executing 'rad_msol'"));
}

#[test]
fn test_short_parameter_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    fixtures::write_save(&fixtures::model(), dir.path());
    std::fs::write(dir.path().join("model"), [0u8; 16]).unwrap();

    let err = Model::load(dir.path()).unwrap_err();
    assert!(matches!(
        err,
        LoadError::Truncated {
            expected: 40,
            actual: 16,
            ..
        }
    ));
}

#[test]
fn test_parameter_file_trailing_data_is_ignored() {
    let dir = tempfile::tempdir().unwrap();
    let model = fixtures::model();
    fixtures::write_save(&model, dir.path());

    let path = dir.path().join("model");
    let mut bytes = std::fs::read(&path).unwrap();
    bytes.extend([0xAB; 64]);
    std::fs::write(&path, bytes).unwrap();

    let loaded = Model::load(dir.path()).unwrap();
    assert_eq!(loaded.parameters(), model.parameters());
}

#[test]
fn test_invalid_specification_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    fixtures::write_save(&fixtures::model(), dir.path());
    std::fs::write(dir.path().join("fncs"), "util = v->q\ncost = v->s\n").unwrap();

    let err = Model::load(dir.path()).unwrap_err();
    assert!(matches!(err, LoadError::Specification { .. }));
}

#[test]
fn test_radius_dynamics_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    fixtures::write_save(&fixtures::model(), dir.path());
    let model = Model::load(dir.path()).unwrap();
    let delta = model.parameters().delta;

    let radt = model.radius_dynamics();
    assert_eq!(radt.data().dim(), (4, 4));
    let r_values = model.grid(GridName::R).values();
    for r_idx in 0..4 {
        for x_idx in 0..4 {
            let s = effort(r_idx, x_idx);
            let expected = 1.0 - (1.0 - delta * r_values[r_idx]) * (-s).exp();
            let actual = radt.get(r_idx, x_idx).unwrap();
            assert!((actual - expected).abs() < 1e-12, "({r_idx}, {x_idx})");
        }
    }
}

#[test]
fn test_wealth_dynamics_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    fixtures::write_save(&fixtures::model(), dir.path());
    let model = Model::load(dir.path()).unwrap();
    let p = *model.parameters();

    let wltt = model.wealth_dynamics();
    let r_values = model.grid(GridName::R).values();
    let x_values = model.grid(GridName::X).values();
    for r_idx in 0..4 {
        for x_idx in 0..4 {
            let s = effort(r_idx, x_idx);
            let q = quantity(r_idx, x_idx);
            let radt = 1.0 - (1.0 - p.delta * r_values[r_idx]) * (-s).exp();
            let expected = p.r * (x_values[x_idx] - radt * q);
            let actual = wltt.get(r_idx, x_idx).unwrap();
            assert!((actual - expected).abs() < 1e-12, "({r_idx}, {x_idx})");
        }
    }
}

#[test]
fn test_dynamics_on_rectangular_mesh() {
    let model = fixtures::model_with(fixtures::parameters(), 5, 3);
    let radt = model.radius_dynamics();
    assert_eq!(radt.data().dim(), (3, 5));
    assert!(std::sync::Arc::ptr_eq(radt.x_grid(), model.grid(GridName::X)));
}

#[test]
fn test_function_sections() {
    let model = fixtures::model();
    let r_values = linspace(0.0, 1.0, 5);
    let s_domain = linspace(0.0, 3.0, 100);

    let radt = model.radius_transition_sections(&r_values, &s_domain);
    assert_eq!(radt.len(), 5);
    assert!(radt.iter().all(|curve| curve.len() == 100));
    // No effort keeps a fraction delta * r of the radius
    assert!((radt[4][0] - 0.9).abs() < 1e-12);
    assert!(radt[4].windows(2).all(|w| w[0] <= w[1]));

    let cost = model.cost_sections(&r_values, &s_domain);
    assert!(cost.iter().all(|curve| curve[0].abs() < 1e-12));
}
