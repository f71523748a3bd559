//! Tests for figure contents

use radviz_core::{GridName, ParameterDependence, ParameterName, ResponseField, VariableName};

use crate::plot::dependence::{dependence_chart, figure_name};
use crate::plot::functions::{cost_chart, default_domain, learning_chart};
use crate::plot::html::{surface_figure, surface_html};
use crate::plot::sections::{SectionAxis, section_chart, section_indices};
use crate::plot::surface::surface_cells;
use crate::plot::{LineChart, PointLabel, padded_range, section_label};

use super::fixtures;

#[test]
fn test_padded_range() {
    assert_eq!(padded_range([0.0, 10.0]), -0.5..10.5);
    assert_eq!(padded_range([3.0, 3.0]), 2.5..3.5);
    assert_eq!(padded_range([f64::NAN, 0.0, 20.0, f64::INFINITY]), -1.0..21.0);
    assert_eq!(padded_range(Vec::<f64>::new()), 0.0..1.0);
}

#[test]
fn test_section_labels() {
    assert_eq!(section_label("r", 0, 1.0 / 3.0), "r0=0.33");
    assert_eq!(section_label("x", 2, 4.0), "x2=4.00");
}

#[test]
fn test_default_and_requested_section_indices() {
    let model = fixtures::model();
    let x_grid = model.grid(GridName::X);
    assert_eq!(section_indices(x_grid, None).unwrap(), vec![0, 2, 3, 4]);
    assert_eq!(section_indices(x_grid, Some(&[1.5, 4.0])).unwrap(), vec![2, 4]);
    assert!(section_indices(x_grid, Some(&[9.0])).is_err());
}

#[test]
fn test_radius_sections_follow_rows() {
    let model = fixtures::model();
    let v0 = model.variable(VariableName::V0);
    let point = PointLabel {
        label: "A".to_string(),
        x: 1.0,
        y: 2.0,
    };

    let chart = section_chart(v0, SectionAxis::Radius, &[0, 3], "v", &[point.clone()], 0.0).unwrap();
    assert_eq!(chart.x_desc, "x");
    assert_eq!(chart.y_desc, "v");
    assert_eq!(chart.points, vec![point]);
    assert_eq!(chart.curves.len(), 2);
    assert_eq!(chart.curves[0].label, "r0=0.00");
    assert_eq!(chart.curves[1].label, "r1=1.00");
    assert_eq!(
        chart.curves[1].points,
        vec![(0.0, 30.0), (1.0, 31.0), (2.0, 32.0), (3.0, 33.0), (4.0, 34.0)]
    );
}

#[test]
fn test_wealth_sections_follow_columns() {
    let model = fixtures::model();
    let v0 = model.variable(VariableName::V0);

    let chart = section_chart(v0, SectionAxis::Wealth, &[4], "v", &[], 0.0).unwrap();
    assert_eq!(chart.x_desc, "r");
    assert_eq!(chart.curves[0].label, "x0=4.00");
    let values: Vec<f64> = chart.curves[0].points.iter().map(|p| p.1).collect();
    assert_eq!(values, vec![4.0, 14.0, 24.0, 34.0]);

    assert!(section_chart(v0, SectionAxis::Wealth, &[5], "v", &[], 0.0).is_err());
}

#[test]
fn test_smoothing_keeps_linear_interior() {
    let model = fixtures::model();
    let v0 = model.variable(VariableName::V0);
    let chart = section_chart(v0, SectionAxis::Radius, &[1], "v", &[], 1.0).unwrap();
    let values: Vec<f64> = chart.curves[0].points.iter().map(|p| p.1).collect();
    // A linear row is only bent at the mirrored edges
    assert!((values[2] - 12.0).abs() < 1e-9);
    assert!(values[0] > 10.0);
    assert!(values[4] < 14.0);
}

#[test]
fn test_learning_and_cost_charts() {
    let model = fixtures::model();
    let (r_values, s_domain) = default_domain();
    assert_eq!(r_values, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
    assert_eq!(s_domain.len(), 100);

    let learning = learning_chart(&model, &r_values, &s_domain);
    assert_eq!(learning.y_desc, "r'");
    assert_eq!(learning.curves.len(), 5);
    assert_eq!(learning.curves[4].label, "r4=1.00");
    assert_eq!(learning.curves[0].points[0], (0.0, 0.0));
    let reference = learning.reference.as_ref().unwrap();
    assert!(reference.iter().all(|&(_, y)| y == 1.0));

    let cost = cost_chart(&model, &r_values, &s_domain);
    assert_eq!(cost.x_desc, "s");
    assert_eq!(cost.y_desc, "c");
    assert!(cost.reference.is_none());
    assert!(cost.curves.iter().all(|c| c.points[0].1.abs() < 1e-12));
}

#[test]
fn test_chart_ranges_include_reference() {
    let model = fixtures::model();
    let (r_values, s_domain) = default_domain();
    let chart: LineChart = learning_chart(&model, &r_values, &s_domain);
    let (x_range, y_range) = chart.ranges();
    assert!(x_range.start < 0.0 && x_range.end > 3.0);
    assert!(y_range.end > 1.0);
}

#[test]
fn test_dependence_chart() {
    let dir = tempfile::tempdir().unwrap();
    for (i, alpha) in [1.0, 2.0, 3.0].into_iter().enumerate() {
        let mut params = fixtures::parameters();
        params.alpha = alpha;
        fixtures::model_with(params)
            .save(dir.path().join("alpha").join(format!("alpha{i}")))
            .unwrap();
    }
    let data = ParameterDependence::discover(dir.path(), ParameterName::Alpha)
        .unwrap()
        .extract(&[1, 2], &[1, 3])
        .unwrap();

    let chart = dependence_chart(&data, ResponseField::Spol, 1.0);
    assert_eq!(chart.x_desc, "alpha");
    assert_eq!(chart.y_desc, "s");
    assert_eq!(chart.curves.len(), 4);
    assert_eq!(chart.curves[1].label, "r0=0.33,x1=3.00");
    assert_eq!(chart.curves[1].points.len(), 3);
    assert_eq!(chart.curves[1].points[2].0, 3.0);

    assert_eq!(dependence_chart(&data, ResponseField::V, 1.0).y_desc, "v");
    assert_eq!(figure_name(ParameterName::R, ResponseField::Qpol), "R_on_qpol.png");
}

#[test]
fn test_surface_cells_cover_mesh() {
    let model = fixtures::model();
    let cells = surface_cells(model.variable(VariableName::V0));
    assert_eq!(cells.len(), 3 * 4);
    let first = &cells[0];
    assert_eq!(first.corners[0], (0.0, 0.0, 0.0));
    assert_eq!(first.corners[1], (1.0, 1.0, 0.0));
    assert_eq!(first.corners[2].1, 11.0);
    assert!((first.mean - 5.5).abs() < 1e-12);
}

#[test]
fn test_surface_html() {
    let model = fixtures::model();
    let v0 = model.variable(VariableName::V0);

    let figure = surface_figure(v0);
    let z = figure["data"][0]["z"].as_array().unwrap();
    assert_eq!(z.len(), 4);
    assert_eq!(z[2].as_array().unwrap().len(), 5);
    assert_eq!(z[2][1], 21.0);
    assert_eq!(figure["layout"]["scene"]["yaxis"]["title"], "r");

    let html = surface_html(v0).unwrap();
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("Plotly.newPlot(\"surface\""));
    assert!(html.contains("\"type\":\"surface\""));
}
