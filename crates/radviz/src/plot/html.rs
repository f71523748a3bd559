//! Standalone HTML page with an interactive plotly surface.

use std::path::Path;

use color_eyre::eyre::WrapErr;
use radviz_core::Variable;
use serde_json::{Value, json};

const PLOTLY_SCRIPT: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

fn axis(title: Option<&str>) -> Value {
    let mut axis = json!({
        "gridcolor": "rgb(255, 255, 255)",
        "zerolinecolor": "rgb(255, 255, 255)",
        "showbackground": true,
        "backgroundcolor": "rgb(230, 230, 230)",
    });
    if let Some(title) = title {
        axis["title"] = json!(title);
    }
    axis
}

/// Plotly figure for `variable`: wealth along x, radius along y.
pub fn surface_figure(variable: &Variable) -> Value {
    let z: Vec<Vec<f64>> = variable.data().rows().into_iter().map(|row| row.to_vec()).collect();
    json!({
        "data": [{
            "type": "surface",
            "x": variable.x_grid().values(),
            "y": variable.r_grid().values(),
            "z": z,
        }],
        "layout": {
            "title": variable.name(),
            "scene": {
                "xaxis": axis(Some("x")),
                "yaxis": axis(Some("r")),
                "zaxis": axis(None),
            },
        },
    })
}

pub fn surface_html(variable: &Variable) -> Result<String, serde_json::Error> {
    let figure = surface_figure(variable);
    let data = serde_json::to_string(&figure["data"])?;
    let layout = serde_json::to_string(&figure["layout"])?;
    Ok(format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{title}</title>
<script src="{PLOTLY_SCRIPT}"></script>
</head>
<body>
<div id="surface" style="width:100%;height:90vh;"></div>
<script>
Plotly.newPlot("surface", {data}, {layout});
</script>
</body>
</html>
"#,
        title = variable.name(),
    ))
}

pub fn save_surface_html(path: &Path, variable: &Variable) -> color_eyre::Result<()> {
    let html = surface_html(variable)?;
    std::fs::write(path, html).wrap_err_with(|| format!("Failed to write '{}'", path.display()))?;
    tracing::info!(path = %path.display(), "Saved interactive surface");
    Ok(())
}
