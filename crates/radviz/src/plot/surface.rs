//! Three dimensional surface of a variable over the wealth x radius mesh.

use std::path::Path;

use color_eyre::eyre::WrapErr;
use plotters::prelude::*;
use radviz_core::Variable;

use super::{FigureStyle, padded_range};

/// Camera elevation in degrees
const PITCH_DEGREES: f64 = 30.0;

/// One mesh cell: its corners as `(x, value, r)` and its mean value
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceCell {
    pub corners: [(f64, f64, f64); 4],
    pub mean: f64,
}

/// Quadrilaterals between neighbouring mesh points, radius-major.
pub fn surface_cells(variable: &Variable) -> Vec<SurfaceCell> {
    let x = variable.x_grid().values();
    let r = variable.r_grid().values();
    let data = variable.data();
    let (r_size, x_size) = data.dim();

    let mut cells = Vec::with_capacity(r_size.saturating_sub(1) * x_size.saturating_sub(1));
    for r_idx in 1..r_size {
        for x_idx in 1..x_size {
            let corner = |ri: usize, xi: usize| (x[xi], data[[ri, xi]], r[ri]);
            let corners = [
                corner(r_idx - 1, x_idx - 1),
                corner(r_idx - 1, x_idx),
                corner(r_idx, x_idx),
                corner(r_idx, x_idx - 1),
            ];
            let mean = corners.iter().map(|c| c.1).sum::<f64>() / 4.0;
            cells.push(SurfaceCell { corners, mean });
        }
    }
    cells
}

/// Render the surface of `variable` seen from azimuth `angle` (degrees).
pub fn draw_surface(
    path: &Path,
    variable: &Variable,
    zlabel: &str,
    angle: f64,
    style: &FigureStyle,
) -> color_eyre::Result<()> {
    let (low, high) = variable.range().unwrap_or((0.0, 1.0));
    let span = if high > low { high - low } else { 1.0 };

    let root = BitMapBackend::new(path, (style.width, style.height)).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption(format!("{}: {zlabel}", variable.name()), style.font())
        .margin(20)
        .build_cartesian_3d(
            padded_range(variable.x_grid().values().iter().copied()),
            padded_range(variable.data().iter().copied()),
            padded_range(variable.r_grid().values().iter().copied()),
        )?;
    chart.with_projection(|mut pb| {
        pb.pitch = PITCH_DEGREES.to_radians();
        pb.yaw = angle.to_radians();
        pb.scale = 0.8;
        pb.into_matrix()
    });

    chart
        .configure_axes()
        .light_grid_style(BLACK.mix(0.15))
        .max_light_lines(3)
        .label_style(style.font())
        .draw()?;

    chart.draw_series(surface_cells(variable).into_iter().map(|cell| {
        let color = style.colormap_at((cell.mean - low) / span);
        Polygon::new(cell.corners.to_vec(), color.filled())
    }))?;

    root.present()
        .wrap_err_with(|| format!("Failed to write figure '{}'", path.display()))?;
    tracing::info!(path = %path.display(), "Saved surface");
    Ok(())
}
