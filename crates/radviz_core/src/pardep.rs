//! Sensitivity of the solution to one model parameter.
//!
//! The solver's parameter dependence run saves one model per parameter value
//! under `<data_dir>/<param>/<param>NN`. This module discovers those saves,
//! reloads each of them and extracts the policy and value entries at a fixed
//! set of mesh points, giving one series per point across the parameter's
//! values.

use std::path::{Path, PathBuf};

use ndarray::{Array2, ArrayView1};
use serde::Serialize;

use crate::error::{LoadError, Result};
use crate::model::{GridName, Model, ParameterName, VariableName};

/// Extracted fields, in output order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseField {
    /// Optimal effort
    Spol,
    /// Optimal quantity
    Qpol,
    /// Initial value function
    V,
}

impl ResponseField {
    pub const ALL: [ResponseField; 3] = [ResponseField::Spol, ResponseField::Qpol, ResponseField::V];

    pub fn label(self) -> &'static str {
        match self {
            ResponseField::Spol => "spol",
            ResponseField::Qpol => "qpol",
            ResponseField::V => "v",
        }
    }

    fn variable(self) -> VariableName {
        match self {
            ResponseField::Spol => VariableName::S,
            ResponseField::Qpol => VariableName::Q,
            ResponseField::V => VariableName::V0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ParameterDependence {
    parameter: ParameterName,
    save_dirs: Vec<PathBuf>,
}

impl ParameterDependence {
    /// Find the saves of `parameter` under `data_dir`, sorted by name.
    pub fn discover(data_dir: impl AsRef<Path>, parameter: ParameterName) -> Result<Self> {
        let root = data_dir.as_ref().join(parameter.name());
        let entries = std::fs::read_dir(&root).map_err(|e| LoadError::io(&root, e))?;

        let mut save_dirs: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| {
                entry
                    .file_name()
                    .to_str()
                    .is_some_and(|name| name.starts_with(parameter.name()))
            })
            .map(|entry| entry.path())
            .filter(|path| path.is_dir())
            .collect();
        save_dirs.sort();

        tracing::debug!(
            parameter = parameter.name(),
            saves = save_dirs.len(),
            "Discovered parameter dependence saves"
        );
        Ok(Self {
            parameter,
            save_dirs,
        })
    }

    /// Use an explicit list of saves.
    pub fn from_save_dirs(parameter: ParameterName, save_dirs: Vec<PathBuf>) -> Self {
        Self {
            parameter,
            save_dirs,
        }
    }

    pub fn parameter(&self) -> ParameterName {
        self.parameter
    }

    pub fn save_dirs(&self) -> &[PathBuf] {
        &self.save_dirs
    }

    /// The two interior points of a four point equipartition of the first
    /// save's radius and wealth grids.
    pub fn default_indices(&self) -> Result<(Vec<usize>, Vec<usize>)> {
        let first = self.save_dirs.first().ok_or_else(|| LoadError::NoSaveDirectories {
            pattern: format!("{0}/{0}*", self.parameter.name()),
        })?;
        let model = Model::load(first)?;
        let interior = |name: GridName| -> Result<Vec<usize>> {
            let grid = model.grid(name);
            let indices = grid.eqpart(4)?;
            Ok(indices[1..3].to_vec())
        };
        Ok((interior(GridName::R)?, interior(GridName::X)?))
    }

    /// Reload every save and extract the responses at all `(r, x)` pairs.
    ///
    /// Point `g = r_pos * x_indices.len() + x_pos` of the output refers to
    /// `(r_indices[r_pos], x_indices[x_pos])`.
    pub fn extract(&self, r_indices: &[usize], x_indices: &[usize]) -> Result<DependenceData> {
        let index_count = r_indices.len() * x_indices.len();
        let point_count = self.save_dirs.len();

        let mut data = DependenceData {
            parameter: self.parameter,
            param_grid: vec![0.0; point_count],
            r_indices: r_indices.to_vec(),
            x_indices: x_indices.to_vec(),
            r_points: vec![0.0; index_count],
            x_points: vec![0.0; index_count],
            spol: Array2::zeros((index_count, point_count)),
            qpol: Array2::zeros((index_count, point_count)),
            v: Array2::zeros((index_count, point_count)),
        };

        for (p_idx, save_dir) in self.save_dirs.iter().enumerate() {
            let model = Model::load(save_dir)?;
            data.param_grid[p_idx] = model.parameters().get(self.parameter);
            tracing::debug!(
                save_dir = %save_dir.display(),
                value = data.param_grid[p_idx],
                "Extracting parameter dependence point"
            );

            let r_values = model.grid(GridName::R).values();
            let x_values = model.grid(GridName::X).values();
            for (r_pos, &r_idx) in r_indices.iter().enumerate() {
                for (x_pos, &x_idx) in x_indices.iter().enumerate() {
                    let g_idx = r_pos * x_indices.len() + x_pos;
                    data.r_points[g_idx] = *r_values.get(r_idx).ok_or(LoadError::IndexOutOfRange {
                        what: "radius",
                        index: r_idx,
                        len: r_values.len(),
                    })?;
                    data.x_points[g_idx] = *x_values.get(x_idx).ok_or(LoadError::IndexOutOfRange {
                        what: "wealth",
                        index: x_idx,
                        len: x_values.len(),
                    })?;
                    for field in ResponseField::ALL {
                        let value = model
                            .variable(field.variable())
                            .get(r_idx, x_idx)
                            .ok_or(LoadError::IndexOutOfRange {
                                what: field.label(),
                                index: r_idx,
                                len: r_values.len(),
                            })?;
                        data.field_mut(field)[[g_idx, p_idx]] = value;
                    }
                }
            }
        }

        Ok(data)
    }
}

/// Responses of the solution at fixed mesh points across parameter values
#[derive(Debug, Clone, Serialize)]
pub struct DependenceData {
    pub parameter: ParameterName,
    /// Parameter value of each save
    pub param_grid: Vec<f64>,
    pub r_indices: Vec<usize>,
    pub x_indices: Vec<usize>,
    /// Radius of each extraction point
    pub r_points: Vec<f64>,
    /// Wealth of each extraction point
    pub x_points: Vec<f64>,
    /// Shape `(points, saves)`
    pub spol: Array2<f64>,
    pub qpol: Array2<f64>,
    pub v: Array2<f64>,
}

impl DependenceData {
    pub fn field(&self, field: ResponseField) -> &Array2<f64> {
        match field {
            ResponseField::Spol => &self.spol,
            ResponseField::Qpol => &self.qpol,
            ResponseField::V => &self.v,
        }
    }

    fn field_mut(&mut self, field: ResponseField) -> &mut Array2<f64> {
        match field {
            ResponseField::Spol => &mut self.spol,
            ResponseField::Qpol => &mut self.qpol,
            ResponseField::V => &mut self.v,
        }
    }

    /// Number of extraction points
    pub fn point_count(&self) -> usize {
        self.r_points.len()
    }

    /// One extraction point's response across the parameter values
    pub fn series(&self, field: ResponseField, g_idx: usize) -> ArrayView1<'_, f64> {
        self.field(field).row(g_idx)
    }

    /// Positions of extraction point `g_idx` within the index lists
    pub fn point_position(&self, g_idx: usize) -> (usize, usize) {
        let width = self.x_indices.len().max(1);
        (g_idx / width, g_idx % width)
    }
}
