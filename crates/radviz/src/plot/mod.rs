//! PNG figures and interactive pages.
//!
//! Chart contents are computed first ([`LineChart`], section and dependence
//! curves) and rendered by the `draw_*` functions, so the data behind every
//! figure can be inspected without a font backend.

pub mod dependence;
pub mod functions;
pub mod html;
pub mod sections;
pub mod surface;

use std::ops::Range;
use std::path::Path;
use std::str::FromStr;

use color_eyre::eyre::{WrapErr, eyre};
use plotters::prelude::*;
use plotters::series::DashedLineSeries;

use crate::config::RadConfig;

const FONT_FAMILY: &str = "sans-serif";

/// Rendering options shared by all figures
#[derive(Clone)]
pub struct FigureStyle {
    pub width: u32,
    pub height: u32,
    pub font_size: u32,
    pub palette: Vec<RGBColor>,
    pub smoothing_sigma: f64,
    pub colormap: (RGBColor, RGBColor),
}

impl FigureStyle {
    pub fn from_config(config: &RadConfig) -> color_eyre::Result<Self> {
        let palette = config
            .palette
            .iter()
            .map(|hex| parse_hex_color(hex))
            .collect::<color_eyre::Result<Vec<_>>>()
            .wrap_err("Invalid palette")?;
        let colormap = (
            parse_hex_color(&config.colormap.low).wrap_err("Invalid colormap")?,
            parse_hex_color(&config.colormap.high).wrap_err("Invalid colormap")?,
        );
        Ok(Self {
            width: config.figure.width,
            height: config.figure.height,
            font_size: config.figure.font_size,
            palette,
            smoothing_sigma: config.smoothing_sigma,
            colormap,
        })
    }

    /// Series color `index`, cycling through the palette
    pub fn color(&self, index: usize) -> RGBColor {
        if self.palette.is_empty() {
            return BLACK;
        }
        self.palette[index % self.palette.len()]
    }

    /// Colormap value at `t` in `[0, 1]`
    pub fn colormap_at(&self, t: f64) -> RGBColor {
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        let (low, high) = self.colormap;
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        RGBColor(mix(low.0, high.0), mix(low.1, high.1), mix(low.2, high.2))
    }

    fn font(&self) -> (&'static str, f64) {
        (FONT_FAMILY, self.font_size as f64)
    }
}

/// Parse `#rrggbb` (the `#` is optional).
pub fn parse_hex_color(hex: &str) -> color_eyre::Result<RGBColor> {
    let digits = hex.trim().trim_start_matches('#');
    if digits.len() != 6 || !digits.is_ascii() {
        return Err(eyre!("'{hex}' is not a #rrggbb color"));
    }
    let channel = |i: usize| {
        u8::from_str_radix(&digits[i..i + 2], 16)
            .map_err(|_| eyre!("'{hex}' is not a #rrggbb color"))
    };
    Ok(RGBColor(channel(0)?, channel(2)?, channel(4)?))
}

/// The finite extent of `values` widened by 5% on each side.
///
/// Degenerate extents are widened to a unit interval around the value, and
/// no finite values at all give `0..1`.
pub fn padded_range(values: impl IntoIterator<Item = f64>) -> Range<f64> {
    let extent = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(None, |acc: Option<(f64, f64)>, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        });
    match extent {
        None => 0.0..1.0,
        Some((lo, hi)) if hi - lo <= f64::EPSILON * lo.abs().max(1.0) => (lo - 0.5)..(hi + 0.5),
        Some((lo, hi)) => {
            let pad = 0.05 * (hi - lo);
            (lo - pad)..(hi + pad)
        }
    }
}

/// Legend label of section `index` at grid value `value`, e.g. `r1=0.33`
pub fn section_label(axis: &str, index: usize, value: f64) -> String {
    format!("{axis}{index}={value:.2}")
}

/// A labelled point drawn on a section figure, given as `LABEL,X,Y`
#[derive(Debug, Clone, PartialEq)]
pub struct PointLabel {
    pub label: String,
    pub x: f64,
    pub y: f64,
}

impl FromStr for PointLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut fields = s.rsplitn(3, ',');
        let (Some(y), Some(x), Some(label)) = (fields.next(), fields.next(), fields.next()) else {
            return Err(format!("expected LABEL,X,Y, found '{s}'"));
        };
        let coordinate = |text: &str| {
            text.trim()
                .parse::<f64>()
                .map_err(|e| format!("invalid coordinate '{text}' in '{s}': {e}"))
        };
        Ok(Self {
            label: label.trim().to_string(),
            x: coordinate(x)?,
            y: coordinate(y)?,
        })
    }
}

/// One labelled series of a line chart
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    pub label: String,
    pub points: Vec<(f64, f64)>,
}

impl Curve {
    pub fn new(label: impl Into<String>, xs: &[f64], ys: &[f64]) -> Self {
        Self {
            label: label.into(),
            points: xs.iter().copied().zip(ys.iter().copied()).collect(),
        }
    }
}

/// Contents of a two dimensional line figure
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineChart {
    pub x_desc: String,
    pub y_desc: String,
    pub curves: Vec<Curve>,
    /// Dotted black guide drawn under the curves
    pub reference: Option<Vec<(f64, f64)>>,
    pub points: Vec<PointLabel>,
}

impl LineChart {
    /// Axis ranges covering every curve, guide and point
    pub fn ranges(&self) -> (Range<f64>, Range<f64>) {
        let all = || {
            self.curves
                .iter()
                .flat_map(|c| c.points.iter().copied())
                .chain(self.reference.iter().flatten().copied())
                .chain(self.points.iter().map(|p| (p.x, p.y)))
        };
        (
            padded_range(all().map(|(x, _)| x)),
            padded_range(all().map(|(_, y)| y)),
        )
    }
}

/// Render `chart` as a PNG at `path`.
pub fn draw_line_chart(path: &Path, chart: &LineChart, style: &FigureStyle) -> color_eyre::Result<()> {
    let (x_range, y_range) = chart.ranges();

    let root = BitMapBackend::new(path, (style.width, style.height)).into_drawing_area();
    root.fill(&WHITE)?;
    let mut ctx = ChartBuilder::on(&root)
        .margin(10)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(x_range, y_range)?;

    ctx.configure_mesh()
        .x_desc(chart.x_desc.as_str())
        .y_desc(chart.y_desc.as_str())
        .label_style(style.font())
        .axis_desc_style(style.font())
        .draw()?;

    if let Some(reference) = &chart.reference {
        ctx.draw_series(DashedLineSeries::new(
            reference.clone().into_iter(),
            2,
            4,
            BLACK.stroke_width(1),
        ))?;
    }

    for (i, curve) in chart.curves.iter().enumerate() {
        let color = style.color(i);
        ctx.draw_series(LineSeries::new(curve.points.iter().copied(), color.stroke_width(2)))?
            .label(curve.label.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
    }

    for point in &chart.points {
        ctx.draw_series(std::iter::once(
            EmptyElement::at((point.x, point.y))
                + Circle::new((0, 0), 3, BLACK.filled())
                + Text::new(point.label.clone(), (-18, -16), style.font()),
        ))?;
    }

    if !chart.curves.is_empty() {
        ctx.configure_series_labels()
            .label_font(style.font())
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
    }

    root.present()
        .wrap_err_with(|| format!("Failed to write figure '{}'", path.display()))?;
    tracing::info!(path = %path.display(), "Saved figure");
    Ok(())
}
