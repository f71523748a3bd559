//! Command line arguments.

use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use radviz_core::{Model, ParameterName, Variable, VariableName};

use crate::plot::PointLabel;

#[derive(Parser, Debug)]
#[command(name = "radviz")]
#[command(about = "Figures, tables and reports for radial attention model solutions")]
pub struct Args {
    /// Configuration file (default: <config dir>/radviz/config.yaml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Root of the solver's save directories
    #[arg(short, long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Output directory for figures, tables and pages
    #[arg(short, long, global = true)]
    pub temp_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info", global = true)]
    pub log_level: String,

    /// Also write logs to this file
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Describe a save: parameters, functions, grids, variables and header
    Info {
        /// Save directory, relative to the data directory
        save_dir: PathBuf,
    },
    /// Surface, radius section and wealth section figures of a variable
    Figures(FiguresArgs),
    /// Interactive HTML surface of a variable
    Surface {
        save_dir: PathBuf,
        #[arg(short, long)]
        variable: PlotVariable,
        /// Output file prefix (default: the variable name)
        #[arg(short, long)]
        prefix: Option<String>,
    },
    /// LaTeX table of the grid and model parameterization
    Table {
        save_dir: PathBuf,
        /// Output file name inside the output directory
        #[arg(short, long, default_value = "model_table.tex")]
        output: PathBuf,
    },
    /// Radius transition and cost sections over effort
    Functions { save_dir: PathBuf },
    /// Responses of the solution to one parameter across its saves
    Pardep {
        /// alpha, beta, delta, gamma or R
        parameter: ParameterName,
        /// Radius indices of the extraction points
        #[arg(long, value_delimiter = ',')]
        r_indices: Option<Vec<usize>>,
        /// Wealth indices of the extraction points
        #[arg(long, value_delimiter = ',')]
        x_indices: Option<Vec<usize>>,
        /// Also dump the extracted arrays as JSON
        #[arg(long)]
        json: Option<PathBuf>,
    },
}

#[derive(ClapArgs, Debug)]
pub struct FiguresArgs {
    pub save_dir: PathBuf,

    #[arg(short, long)]
    pub variable: PlotVariable,

    /// Output file prefix (default: the variable name)
    #[arg(short, long)]
    pub prefix: Option<String>,

    /// Label of the variable axis (default: the variable name)
    #[arg(short, long)]
    pub zlabel: Option<String>,

    /// Surface azimuth in degrees
    #[arg(short, long, default_value_t = -60.0, allow_hyphen_values = true)]
    pub angle: f64,

    /// Radii of the radius sections (default: a four point equipartition)
    #[arg(long, value_delimiter = ',')]
    pub rsections: Option<Vec<f64>>,

    /// Wealths of the wealth sections (default: a four point equipartition)
    #[arg(long, value_delimiter = ',')]
    pub xsections: Option<Vec<f64>>,

    /// Labelled point on the radius sections, as LABEL,X,Y
    #[arg(long = "r-point", allow_hyphen_values = true)]
    pub r_points: Vec<PointLabel>,

    /// Labelled point on the wealth sections, as LABEL,X,Y
    #[arg(long = "x-point", allow_hyphen_values = true)]
    pub x_points: Vec<PointLabel>,
}

/// Variables that can be plotted: the saved ones and the derived dynamics
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PlotVariable {
    V0,
    V1,
    S,
    Q,
    /// Next date's radius
    Radt,
    /// Next date's wealth
    Wltt,
}

impl PlotVariable {
    pub fn name(self) -> &'static str {
        match self {
            PlotVariable::V0 => "v0",
            PlotVariable::V1 => "v1",
            PlotVariable::S => "s",
            PlotVariable::Q => "q",
            PlotVariable::Radt => "radt",
            PlotVariable::Wltt => "wltt",
        }
    }

    /// Load or derive the variable from `model`.
    pub fn resolve(self, model: &Model) -> Variable {
        match self {
            PlotVariable::V0 => model.variable(VariableName::V0).clone(),
            PlotVariable::V1 => model.variable(VariableName::V1).clone(),
            PlotVariable::S => model.variable(VariableName::S).clone(),
            PlotVariable::Q => model.variable(VariableName::Q).clone(),
            PlotVariable::Radt => model.radius_dynamics(),
            PlotVariable::Wltt => model.wealth_dynamics(),
        }
    }
}
