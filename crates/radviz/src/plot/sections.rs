//! Sections of a variable at fixed radius or fixed wealth.

use radviz_core::smooth::gaussian_filter1d;
use radviz_core::{Grid, GridError, Variable};

use super::{Curve, LineChart, PointLabel, section_label};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionAxis {
    /// Curves over wealth, one per radius
    Radius,
    /// Curves over radius, one per wealth
    Wealth,
}

impl SectionAxis {
    /// File name suffix of the figure
    pub fn suffix(self) -> &'static str {
        match self {
            SectionAxis::Radius => "rsections",
            SectionAxis::Wealth => "xsections",
        }
    }

    fn fixed_name(self) -> &'static str {
        match self {
            SectionAxis::Radius => "r",
            SectionAxis::Wealth => "x",
        }
    }

    fn free_name(self) -> &'static str {
        match self {
            SectionAxis::Radius => "x",
            SectionAxis::Wealth => "r",
        }
    }

    /// Grid along which the sections are fixed
    pub fn fixed_grid(self, variable: &Variable) -> &Grid {
        match self {
            SectionAxis::Radius => variable.r_grid(),
            SectionAxis::Wealth => variable.x_grid(),
        }
    }
}

/// Section indices: an equipartition of `grid` by default, otherwise the
/// closest points at or above the requested values.
pub fn section_indices(grid: &Grid, values: Option<&[f64]>) -> Result<Vec<usize>, GridError> {
    match values {
        None => grid.eqpart(4),
        Some(values) => grid.lower_bound_index(values),
    }
}

/// Smoothed sections of `variable` at `indices` of the fixed axis.
pub fn section_chart(
    variable: &Variable,
    axis: SectionAxis,
    indices: &[usize],
    zlabel: &str,
    points: &[PointLabel],
    sigma: f64,
) -> radviz_core::Result<LineChart> {
    let (fixed, free) = match axis {
        SectionAxis::Radius => (variable.r_grid(), variable.x_grid()),
        SectionAxis::Wealth => (variable.x_grid(), variable.r_grid()),
    };

    let curves = indices
        .iter()
        .enumerate()
        .map(|(i, &idx)| {
            let section = match axis {
                SectionAxis::Radius => variable.r_section(idx)?,
                SectionAxis::Wealth => variable.x_section(idx)?,
            };
            let smoothed = gaussian_filter1d(&section.to_vec(), sigma);
            let label = section_label(axis.fixed_name(), i, fixed.values()[idx]);
            Ok(Curve::new(label, free.values(), &smoothed))
        })
        .collect::<radviz_core::Result<Vec<_>>>()?;

    Ok(LineChart {
        x_desc: axis.free_name().to_string(),
        y_desc: zlabel.to_string(),
        curves,
        reference: None,
        points: points.to_vec(),
    })
}
