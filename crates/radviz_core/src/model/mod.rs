//! A solved radial attention model loaded from a solver save directory.
//!
//! A save directory holds:
//! - grid files `xg`, `rg`, `qg`, `sg` (wealth, radius, quantity, effort),
//! - variable files `v0`, `v1` (value functions), `spol`, `qpol` (optimal
//!   effort and quantity),
//! - `model` with the scalar parameters,
//! - `fncs` with the functional specification,
//! - optionally `head`, describing when and where the save was produced.

mod header;
mod params;
mod spec;

pub use header::SaveHeader;
pub use params::{ParameterName, Parameters};
pub use spec::{Function, FunctionKind, Specification};

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::{LoadError, Result};
use crate::format::format_shortest;
use crate::grid::Grid;
use crate::variable::Variable;

pub const PARAMETERS_FILE: &str = "model";
pub const SPECIFICATION_FILE: &str = "fncs";
pub const HEADER_FILE: &str = "head";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GridName {
    /// Wealth
    X,
    /// Radius of attention
    R,
    /// Product quantity
    Q,
    /// Effort
    S,
}

impl GridName {
    pub const ALL: [GridName; 4] = [GridName::X, GridName::R, GridName::Q, GridName::S];

    pub fn key(self) -> &'static str {
        match self {
            GridName::X => "x",
            GridName::R => "r",
            GridName::Q => "q",
            GridName::S => "s",
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            GridName::X => "xg",
            GridName::R => "rg",
            GridName::Q => "qg",
            GridName::S => "sg",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariableName {
    /// Initial value function
    V0,
    /// Final value function
    V1,
    /// Optimal effort
    S,
    /// Optimal quantity
    Q,
}

impl VariableName {
    pub const ALL: [VariableName; 4] = [
        VariableName::V0,
        VariableName::V1,
        VariableName::S,
        VariableName::Q,
    ];

    pub fn key(self) -> &'static str {
        match self {
            VariableName::V0 => "v0",
            VariableName::V1 => "v1",
            VariableName::S => "s",
            VariableName::Q => "q",
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            VariableName::V0 => "v0",
            VariableName::V1 => "v1",
            VariableName::S => "spol",
            VariableName::Q => "qpol",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.key() == key)
    }
}

impl fmt::Display for VariableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone)]
pub struct Grids {
    pub x: Arc<Grid>,
    pub r: Arc<Grid>,
    pub q: Arc<Grid>,
    pub s: Arc<Grid>,
}

impl Grids {
    pub fn get(&self, name: GridName) -> &Arc<Grid> {
        match name {
            GridName::X => &self.x,
            GridName::R => &self.r,
            GridName::Q => &self.q,
            GridName::S => &self.s,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Variables {
    pub v0: Variable,
    pub v1: Variable,
    pub s: Variable,
    pub q: Variable,
}

impl Variables {
    pub fn get(&self, name: VariableName) -> &Variable {
        match name {
            VariableName::V0 => &self.v0,
            VariableName::V1 => &self.v1,
            VariableName::S => &self.s,
            VariableName::Q => &self.q,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Model {
    save_dir: Option<PathBuf>,
    grids: Grids,
    variables: Variables,
    parameters: Parameters,
    specification: Specification,
    header: Option<SaveHeader>,
}

impl Model {
    /// Assemble a model from in-memory parts.
    ///
    /// Every variable must be defined on the model's wealth and radius grids.
    pub fn from_parts(
        grids: Grids,
        variables: Variables,
        parameters: Parameters,
        specification: Specification,
    ) -> Result<Self> {
        for name in VariableName::ALL {
            let var = variables.get(name);
            let expected = (grids.r.len(), grids.x.len());
            if var.data().dim() != expected {
                return Err(LoadError::ShapeMismatch {
                    what: "variable shape",
                    expected: format!("{expected:?}"),
                    actual: format!("{:?}", var.data().dim()),
                });
            }
        }
        Ok(Self {
            save_dir: None,
            grids,
            variables,
            parameters,
            specification,
            header: None,
        })
    }

    /// Load every file of a save directory.
    pub fn load(save_dir: impl AsRef<Path>) -> Result<Self> {
        let save_dir = save_dir.as_ref();
        tracing::debug!(save_dir = %save_dir.display(), "Loading model");

        let required = GridName::ALL
            .iter()
            .map(|g| g.file_name())
            .chain(VariableName::ALL.iter().map(|v| v.file_name()))
            .chain([PARAMETERS_FILE, SPECIFICATION_FILE]);
        for file in required {
            let path = save_dir.join(file);
            if !path.is_file() {
                return Err(LoadError::MissingFile { path });
            }
        }

        let grid = |name: GridName| Grid::load(save_dir.join(name.file_name())).map(Arc::new);
        let grids = Grids {
            x: grid(GridName::X)?,
            r: grid(GridName::R)?,
            q: grid(GridName::Q)?,
            s: grid(GridName::S)?,
        };

        let variable = |name: VariableName| {
            Variable::load(
                grids.x.clone(),
                grids.r.clone(),
                save_dir.join(name.file_name()),
            )
        };
        let variables = Variables {
            v0: variable(VariableName::V0)?,
            v1: variable(VariableName::V1)?,
            s: variable(VariableName::S)?,
            q: variable(VariableName::Q)?,
        };

        let parameters = Parameters::load(save_dir.join(PARAMETERS_FILE))?;
        let specification = Specification::load(save_dir.join(SPECIFICATION_FILE), &parameters)?;
        let header = SaveHeader::load(&save_dir.join(HEADER_FILE));

        tracing::debug!(
            save_dir = %save_dir.display(),
            x_points = grids.x.len(),
            r_points = grids.r.len(),
            "Loaded model"
        );

        Ok(Self {
            save_dir: Some(save_dir.to_path_buf()),
            grids,
            variables,
            parameters,
            specification,
            header,
        })
    }

    /// Write the model in the solver's save directory layout.
    pub fn save(&self, save_dir: impl AsRef<Path>) -> Result<()> {
        let save_dir = save_dir.as_ref();
        std::fs::create_dir_all(save_dir).map_err(|source| LoadError::Io {
            path: save_dir.to_path_buf(),
            source,
        })?;
        for name in GridName::ALL {
            self.grids.get(name).save(save_dir.join(name.file_name()))?;
        }
        for name in VariableName::ALL {
            self.variables.get(name).save(save_dir.join(name.file_name()))?;
        }
        self.parameters.save(save_dir.join(PARAMETERS_FILE))?;

        let path = save_dir.join(SPECIFICATION_FILE);
        std::fs::write(&path, self.specification.to_file_string())
            .map_err(|source| LoadError::Io { path, source })
    }

    pub fn save_dir(&self) -> Option<&Path> {
        self.save_dir.as_deref()
    }

    pub fn grids(&self) -> &Grids {
        &self.grids
    }

    pub fn grid(&self, name: GridName) -> &Arc<Grid> {
        self.grids.get(name)
    }

    pub fn variables(&self) -> &Variables {
        &self.variables
    }

    pub fn variable(&self, name: VariableName) -> &Variable {
        self.variables.get(name)
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    pub fn specification(&self) -> &Specification {
        &self.specification
    }

    pub fn header(&self) -> Option<&SaveHeader> {
        self.header.as_ref()
    }

    /// Next date's radius `radt(r, s*(r, x))` at every mesh point.
    pub fn radius_dynamics(&self) -> Variable {
        let r_values = self.grids.r.values();
        let effort = self.variables.s.data();
        Variable::from_fn(self.grids.x.clone(), self.grids.r.clone(), |r_idx, x_idx| {
            self.specification
                .radt(r_values[r_idx], effort[[r_idx, x_idx]])
        })
    }

    /// Next date's wealth `wltt(q*(r, x), r, s*(r, x), x)` at every mesh point.
    pub fn wealth_dynamics(&self) -> Variable {
        let r_values = self.grids.r.values();
        let x_values = self.grids.x.values();
        let effort = self.variables.s.data();
        let quantity = self.variables.q.data();
        Variable::from_fn(self.grids.x.clone(), self.grids.r.clone(), |r_idx, x_idx| {
            self.specification.wltt(
                quantity[[r_idx, x_idx]],
                r_values[r_idx],
                effort[[r_idx, x_idx]],
                x_values[x_idx],
            )
        })
    }

    /// `radt(r, s)` over `s_domain`, one curve per radius in `r_values`.
    pub fn radius_transition_sections(&self, r_values: &[f64], s_domain: &[f64]) -> Vec<Vec<f64>> {
        self.sections(r_values, s_domain, |r, s| self.specification.radt(r, s))
    }

    /// `cost(r, s)` over `s_domain`, one curve per radius in `r_values`.
    pub fn cost_sections(&self, r_values: &[f64], s_domain: &[f64]) -> Vec<Vec<f64>> {
        self.sections(r_values, s_domain, |r, s| self.specification.cost(r, s))
    }

    fn sections(
        &self,
        r_values: &[f64],
        s_domain: &[f64],
        f: impl Fn(f64, f64) -> f64,
    ) -> Vec<Vec<f64>> {
        r_values
            .iter()
            .map(|&r| s_domain.iter().map(|&s| f(r, s)).collect())
            .collect()
    }

    /// Brace-nested description of the parameters and specification.
    pub fn model_string(&self) -> String {
        let p = &self.parameters;
        let spec = &self.specification;
        format!(
            "model={{\n                .alpha={}, .beta={}, .delta={}, .gamma={}, .R={}, .util={}, .cost={},\n                .radt={}, .wltt={}}}",
            format_shortest(p.alpha),
            format_shortest(p.beta),
            format_shortest(p.delta),
            format_shortest(p.gamma),
            format_shortest(p.r),
            spec.function(FunctionKind::Util).display(),
            spec.function(FunctionKind::Cost).display(),
            spec.function(FunctionKind::Radt).display(),
            spec.function(FunctionKind::Wltt).display(),
        )
    }
}
