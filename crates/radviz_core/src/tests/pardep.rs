//! Tests for parameter dependence discovery and extraction
//!
//! These tests verify:
//! - Saves are discovered by prefix and sorted, ignoring stray entries
//! - Default extraction points are the interior of a four point equipartition
//! - Extracted series follow the `g = r_pos * len(x) + x_pos` ordering

use std::path::Path;

use crate::error::LoadError;
use crate::model::ParameterName;
use crate::pardep::{ParameterDependence, ResponseField};

use super::fixtures::{self, effort, quantity};

const ALPHAS: [f64; 3] = [1.0, 1.5, 2.5];

/// Lay out `<data>/alpha/alpha0N` saves, written out of order.
fn write_alpha_family(data_dir: &Path) {
    let root = data_dir.join("alpha");
    for (i, alpha) in ALPHAS.iter().enumerate().rev() {
        let mut params = fixtures::parameters();
        params.alpha = *alpha;
        let model = fixtures::model_with(params, 4, 4);
        fixtures::write_save(&model, &root.join(format!("alpha{i:02}")));
    }
    std::fs::write(root.join("alpha_notes"), "not a save").unwrap();
    std::fs::create_dir_all(root.join("beta00")).unwrap();
}

#[test]
fn test_discover_sorts_matching_directories() {
    let dir = tempfile::tempdir().unwrap();
    write_alpha_family(dir.path());

    let pardep = ParameterDependence::discover(dir.path(), ParameterName::Alpha).unwrap();
    let names: Vec<String> = pardep
        .save_dirs()
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["alpha00", "alpha01", "alpha02"]);
    assert_eq!(pardep.parameter(), ParameterName::Alpha);
}

#[test]
fn test_missing_parameter_directory() {
    let dir = tempfile::tempdir().unwrap();
    let err = ParameterDependence::discover(dir.path(), ParameterName::Gamma).unwrap_err();
    assert!(matches!(err, LoadError::MissingFile { .. }));
}

#[test]
fn test_default_indices_need_a_save() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("delta")).unwrap();

    let pardep = ParameterDependence::discover(dir.path(), ParameterName::Delta).unwrap();
    match pardep.default_indices() {
        Err(LoadError::NoSaveDirectories { pattern }) => assert_eq!(pattern, "delta/delta*"),
        other => panic!("expected no saves, got {other:?}"),
    }
}

#[test]
fn test_default_indices_are_equipartition_interior() {
    let dir = tempfile::tempdir().unwrap();
    write_alpha_family(dir.path());

    let pardep = ParameterDependence::discover(dir.path(), ParameterName::Alpha).unwrap();
    let (r_indices, x_indices) = pardep.default_indices().unwrap();
    // Grid points equal to a bound are skipped by the strict comparison
    assert_eq!(x_indices, vec![2, 3]);
    assert_eq!(r_indices.len(), 2);
}

#[test]
fn test_extract_series_across_saves() {
    let dir = tempfile::tempdir().unwrap();
    write_alpha_family(dir.path());
    let pardep = ParameterDependence::discover(dir.path(), ParameterName::Alpha).unwrap();

    let data = pardep.extract(&[1, 2], &[0, 3]).unwrap();
    assert_eq!(data.param_grid, ALPHAS.to_vec());
    assert_eq!(data.point_count(), 4);
    assert_eq!(data.spol.dim(), (4, 3));

    // g = 1 is r_indices[0] with x_indices[1]
    assert_eq!(data.point_position(1), (0, 1));
    assert!((data.r_points[1] - 1.0 / 3.0).abs() < 1e-12);
    assert_eq!(data.x_points[1], 3.0);
    for value in data.series(ResponseField::Spol, 1) {
        assert_eq!(*value, effort(1, 3));
    }
    for value in data.series(ResponseField::Qpol, 2) {
        assert_eq!(*value, quantity(2, 0));
    }
    for value in data.series(ResponseField::V, 3) {
        assert_eq!(*value, 10.0 * 2.0 + 3.0);
    }
}

#[test]
fn test_extract_rejects_out_of_range_points() {
    let dir = tempfile::tempdir().unwrap();
    write_alpha_family(dir.path());
    let pardep = ParameterDependence::discover(dir.path(), ParameterName::Alpha).unwrap();

    let err = pardep.extract(&[1], &[7]).unwrap_err();
    assert!(matches!(
        err,
        LoadError::IndexOutOfRange {
            what: "wealth",
            index: 7,
            len: 4
        }
    ));
}

#[test]
fn test_dependence_data_serializes() {
    let dir = tempfile::tempdir().unwrap();
    write_alpha_family(dir.path());
    let pardep = ParameterDependence::discover(dir.path(), ParameterName::Alpha).unwrap();
    let data = pardep.extract(&[1], &[2]).unwrap();

    let json = serde_json::to_value(&data).unwrap();
    assert_eq!(json["parameter"], "alpha");
    assert_eq!(json["param_grid"][2], 2.5);
    assert_eq!(ResponseField::ALL.map(ResponseField::label), ["spol", "qpol", "v"]);
}
