//! Responses of the solution to a parameter across a family of saves.

use radviz_core::smooth::gaussian_filter1d;
use radviz_core::{DependenceData, ParameterName, ResponseField};

use super::{Curve, LineChart, section_label};

/// `<param>_on_<field>.png`
pub fn figure_name(parameter: ParameterName, field: ResponseField) -> String {
    format!("{}_on_{}.png", parameter.name(), field.label())
}

/// One smoothed curve per extraction point against the parameter values.
pub fn dependence_chart(data: &DependenceData, field: ResponseField, sigma: f64) -> LineChart {
    let curves = (0..data.point_count())
        .map(|g_idx| {
            let (r_pos, x_pos) = data.point_position(g_idx);
            let series = data.series(field, g_idx).to_vec();
            let label = format!(
                "{},{}",
                section_label("r", r_pos, data.r_points[g_idx]),
                section_label("x", x_pos, data.x_points[g_idx])
            );
            Curve::new(label, &data.param_grid, &gaussian_filter1d(&series, sigma))
        })
        .collect();

    LineChart {
        x_desc: data.parameter.name().to_string(),
        y_desc: field.label().chars().take(1).collect(),
        curves,
        ..Default::default()
    }
}
