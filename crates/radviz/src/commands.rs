//! Subcommand implementations.

use std::path::{Path, PathBuf};

use color_eyre::eyre::WrapErr;
use radviz_core::report::save_latex_table;
use radviz_core::{GridName, Model, ParameterDependence, ParameterName, ResponseField, VariableName};

use crate::cli::{Command, FiguresArgs, PlotVariable};
use crate::config::RadConfig;
use crate::plot::dependence::{dependence_chart, figure_name};
use crate::plot::functions::{COST_FIGURE, LEARNING_FIGURE, cost_chart, default_domain, learning_chart};
use crate::plot::html::save_surface_html;
use crate::plot::sections::{SectionAxis, section_chart, section_indices};
use crate::plot::surface::draw_surface;
use crate::plot::{FigureStyle, draw_line_chart};

/// Run `command` and return the files it wrote.
pub fn run(config: &RadConfig, command: Command) -> color_eyre::Result<Vec<PathBuf>> {
    match command {
        Command::Info { save_dir } => {
            print!("{}", info(&load_model(config, &save_dir)?));
            Ok(Vec::new())
        }
        Command::Figures(args) => figures(config, args),
        Command::Surface {
            save_dir,
            variable,
            prefix,
        } => surface(config, &save_dir, variable, prefix),
        Command::Table { save_dir, output } => table(config, &save_dir, &output),
        Command::Functions { save_dir } => functions(config, &save_dir),
        Command::Pardep {
            parameter,
            r_indices,
            x_indices,
            json,
        } => pardep(config, parameter, r_indices, x_indices, json),
    }
}

fn load_model(config: &RadConfig, save_dir: &Path) -> color_eyre::Result<Model> {
    let path = config.resolve_save_dir(save_dir);
    let model = Model::load(&path).wrap_err_with(|| format!("Failed to load model '{}'", path.display()))?;
    tracing::info!(save_dir = %path.display(), "Loaded model");
    Ok(model)
}

/// Text description of a loaded model.
pub fn info(model: &Model) -> String {
    let mut out = String::new();
    if let Some(dir) = model.save_dir() {
        out.push_str(&format!("save: {}\n", dir.display()));
    }
    if let Some(header) = model.header() {
        if let Some(created) = header.created {
            out.push_str(&format!("created: {created}\n"));
        }
        if let Some(host) = &header.host {
            out.push_str(&format!("host: {host}\n"));
        }
        if let Some(user) = &header.user {
            out.push_str(&format!("user: {user}\n"));
        }
    }
    out.push_str(&model.model_string());
    out.push('\n');
    for name in GridName::ALL {
        out.push_str(&format!("{}\n", model.grid(name)));
    }
    for name in VariableName::ALL {
        out.push_str(&format!("{}\n", model.variable(name)));
    }
    out
}

fn figures(config: &RadConfig, args: FiguresArgs) -> color_eyre::Result<Vec<PathBuf>> {
    let model = load_model(config, &args.save_dir)?;
    let style = FigureStyle::from_config(config)?;
    config.ensure_temp_dir()?;

    let variable = args.variable.resolve(&model);
    let prefix = args.prefix.as_deref().unwrap_or(args.variable.name());
    let zlabel = args.zlabel.as_deref().unwrap_or(args.variable.name());

    let surf_path = config.output_path(&format!("{prefix}_surf.png"));
    draw_surface(&surf_path, &variable, zlabel, args.angle, &style)?;
    let mut written = vec![surf_path];

    let requests = [
        (SectionAxis::Radius, args.rsections.as_deref(), &args.r_points),
        (SectionAxis::Wealth, args.xsections.as_deref(), &args.x_points),
    ];
    for (axis, values, points) in requests {
        let indices = section_indices(axis.fixed_grid(&variable), values)
            .wrap_err_with(|| format!("Cannot place {}", axis.suffix()))?;
        let chart = section_chart(&variable, axis, &indices, zlabel, points, style.smoothing_sigma)?;
        let path = config.output_path(&format!("{prefix}_{}.png", axis.suffix()));
        draw_line_chart(&path, &chart, &style)?;
        written.push(path);
    }
    Ok(written)
}

fn surface(
    config: &RadConfig,
    save_dir: &Path,
    variable: PlotVariable,
    prefix: Option<String>,
) -> color_eyre::Result<Vec<PathBuf>> {
    let model = load_model(config, save_dir)?;
    config.ensure_temp_dir()?;
    let prefix = prefix.as_deref().unwrap_or(variable.name());
    let path = config.output_path(&format!("{prefix}_surf.html"));
    save_surface_html(&path, &variable.resolve(&model))?;
    Ok(vec![path])
}

fn table(config: &RadConfig, save_dir: &Path, output: &Path) -> color_eyre::Result<Vec<PathBuf>> {
    let model = load_model(config, save_dir)?;
    config.ensure_temp_dir()?;
    let path = config.temp_dir.join(output);
    save_latex_table(&model, &path)?;
    Ok(vec![path])
}

fn functions(config: &RadConfig, save_dir: &Path) -> color_eyre::Result<Vec<PathBuf>> {
    let model = load_model(config, save_dir)?;
    let style = FigureStyle::from_config(config)?;
    config.ensure_temp_dir()?;

    let (r_values, s_domain) = default_domain();
    let learning_path = config.output_path(LEARNING_FIGURE);
    draw_line_chart(&learning_path, &learning_chart(&model, &r_values, &s_domain), &style)?;
    let cost_path = config.output_path(COST_FIGURE);
    draw_line_chart(&cost_path, &cost_chart(&model, &r_values, &s_domain), &style)?;
    Ok(vec![learning_path, cost_path])
}

fn pardep(
    config: &RadConfig,
    parameter: ParameterName,
    r_indices: Option<Vec<usize>>,
    x_indices: Option<Vec<usize>>,
    json: Option<PathBuf>,
) -> color_eyre::Result<Vec<PathBuf>> {
    let style = FigureStyle::from_config(config)?;
    let dependence = ParameterDependence::discover(&config.data_dir, parameter)?;
    tracing::info!(
        parameter = parameter.name(),
        saves = dependence.save_dirs().len(),
        "Running parameter dependence"
    );

    let (r_indices, x_indices) = match (r_indices, x_indices) {
        (Some(r), Some(x)) => (r, x),
        (r, x) => {
            let (default_r, default_x) = dependence.default_indices()?;
            (r.unwrap_or(default_r), x.unwrap_or(default_x))
        }
    };
    let data = dependence.extract(&r_indices, &x_indices)?;
    config.ensure_temp_dir()?;

    let mut written = Vec::new();
    for field in ResponseField::ALL {
        let path = config.output_path(&figure_name(parameter, field));
        draw_line_chart(&path, &dependence_chart(&data, field, style.smoothing_sigma), &style)?;
        written.push(path);
    }

    if let Some(json) = json {
        let path = config.temp_dir.join(json);
        let text = serde_json::to_string_pretty(&data)?;
        std::fs::write(&path, text).wrap_err_with(|| format!("Failed to write '{}'", path.display()))?;
        tracing::info!(path = %path.display(), "Saved dependence data");
        written.push(path);
    }
    Ok(written)
}
