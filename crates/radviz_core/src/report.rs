//! LaTeX tables describing a model's parameterization.

use std::path::Path;

use crate::error::{LoadError, Result};
use crate::format::{format_g, format_shortest};
use crate::grid::Grid;
use crate::model::{GridName, Model};

const TABLE_TEMPLATE: &str = r"\begin{subtable}[t]{.53\textwidth}
\centering
\footnotesize
\begin{tabularx}{\textwidth}[t]{Xllll}\toprule
\multicolumn{5}{c}{\textbf{Grid Parameterization}} \\\midrule
\textbf{Grid} & \textbf{Points} & \textbf{Min} & \textbf{Max} & \textbf{Weight} \\\midrule
wealth & @x_size@ & @xmin@ & @xmax@ & @xc@ \\\hdashline
radius & @r_size@ & @rmin@ & @rmax@ & @rc@ \\\hdashline
\multirow{ 2}{*}{quantity} & \multirow{ 2}{*}{@qn@} & \multirow{ 2}{*}{@qmin@} & @qmax@ &
    \multirow{2}{*}{@qc@} \\
&  & & (120000) &  \\\hdashline
\multirow{ 2}{*}{effort} & \multirow{ 2}{*}{@sn@} & \multirow{ 2}{*}{@smin@} & @smax@ &
    \multirow{2}{*}{@sc@} \\
&  & & (1.0) &  \\\bottomrule\bottomrule
\end{tabularx}
\end{subtable}\hfill
\begin{subtable}[t]{.45\textwidth}
\centering
\footnotesize
\begin{tabularx}{\textwidth}[t]{Xl}\toprule
\multicolumn{2}{c}{\textbf{Model Parameterization}} \\\midrule
\textbf{Parameter} & \textbf{Value} \\\midrule
discount factor ($\beta$) & @beta@ \\\hdashline
radius persistence ($\delta$) & @delta@ \\\hdashline
attentional costs ($\alpha$) & @alpha@ \\\hdashline
complementarities factor ($\gamma$) & @gamma@ \\\hdashline
returns ($R$) & $\frac{1}{\beta}$ \\\bottomrule\bottomrule
\end{tabularx}
\end{subtable}";

/// Render the grid and model parameterization table of `model`.
pub fn latex_table(model: &Model) -> String {
    let mut fields: Vec<(String, String)> = Vec::new();
    let grid_fields = [
        (GridName::X, ["x_size", "xmin", "xmax", "xc"]),
        (GridName::R, ["r_size", "rmin", "rmax", "rc"]),
        (GridName::Q, ["qn", "qmin", "qmax", "qc"]),
        (GridName::S, ["sn", "smin", "smax", "sc"]),
    ];
    for (name, keys) in grid_fields {
        let grid: &Grid = model.grid(name);
        let bound = |v: Option<f64>| v.map(format_g).unwrap_or_default();
        let values = [
            grid.len().to_string(),
            bound(grid.min()),
            bound(grid.max()),
            format_g(grid.weight()),
        ];
        fields.extend(keys.iter().map(|k| k.to_string()).zip(values));
    }

    let p = model.parameters();
    for (key, value) in [
        ("beta", p.beta),
        ("delta", p.delta),
        ("alpha", p.alpha),
        ("gamma", p.gamma),
    ] {
        fields.push((key.to_string(), format_shortest(value)));
    }

    fields
        .iter()
        .fold(TABLE_TEMPLATE.to_string(), |text, (key, value)| {
            text.replace(&format!("@{key}@"), value)
        })
}

/// Write [`latex_table`] to `path`.
pub fn save_latex_table(model: &Model, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    std::fs::write(path, latex_table(model)).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), "Saved LaTeX table");
    Ok(())
}
