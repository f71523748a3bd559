//! Radius transition and cost sections of the functional specification.

use radviz_core::Model;
use radviz_core::format::linspace;

use super::{Curve, LineChart, section_label};

pub const LEARNING_FIGURE: &str = "l_rsections.png";
pub const COST_FIGURE: &str = "c_rsections.png";

const SECTION_COUNT: usize = 5;
const EFFORT_MAX: f64 = 3.0;
const EFFORT_POINTS: usize = 100;

/// Radii of the sections and the effort domain they are drawn over
pub fn default_domain() -> (Vec<f64>, Vec<f64>) {
    (
        linspace(0.0, 1.0, SECTION_COUNT),
        linspace(0.0, EFFORT_MAX, EFFORT_POINTS),
    )
}

fn chart(y_desc: &str, r_values: &[f64], s_domain: &[f64], sections: Vec<Vec<f64>>) -> LineChart {
    LineChart {
        x_desc: "s".to_string(),
        y_desc: y_desc.to_string(),
        curves: sections
            .iter()
            .zip(r_values)
            .enumerate()
            .map(|(i, (values, &r))| Curve::new(section_label("r", i, r), s_domain, values))
            .collect(),
        ..Default::default()
    }
}

/// Next radius `r'` against effort, with the full attention bound `r' = 1`.
pub fn learning_chart(model: &Model, r_values: &[f64], s_domain: &[f64]) -> LineChart {
    let sections = model.radius_transition_sections(r_values, s_domain);
    let mut chart = chart("r'", r_values, s_domain, sections);
    chart.reference = Some(s_domain.iter().map(|&s| (s, 1.0)).collect());
    chart
}

/// Attention cost against effort.
pub fn cost_chart(model: &Model, r_values: &[f64], s_domain: &[f64]) -> LineChart {
    let sections = model.cost_sections(r_values, s_domain);
    chart("c", r_values, s_domain, sections)
}
