//! Deterministic save directories on small meshes

use std::path::Path;
use std::sync::Arc;

use crate::grid::Grid;
use crate::model::{Grids, Model, Parameters, Specification, Variables};
use crate::variable::Variable;

/// The expressions the solver writes into `fncs`, with its macros expanded
pub const SOLVER_FNCS: &str = "\
util = ((1.0 - (1.0 - v->m->delta*v->r)*exp(-v->s))*(1.0 - exp(-v->q)))
cost = ((exp(v->m->alpha*v->s)-1.0)*(1.0-v->m->gamma*(1.0 - (1.0 - v->m->delta*v->r)*exp(-v->s))))
radt = (1.0 - (1.0 - v->m->delta*v->r)*exp(-v->s))
wltt = v->m->R*(v->x-(1.0 - (1.0 - v->m->delta*v->r)*exp(-v->s))*v->q)
";

pub const HEAD: &str = "\
Created   :Sat Oct 18 09:30:00 2025
Host      :workstation
User      :analyst
";

pub fn parameters() -> Parameters {
    Parameters {
        alpha: 2.0,
        beta: 0.95,
        delta: 0.9,
        gamma: 0.5,
        r: 1.25,
    }
}

/// Effort policy at `(r_idx, x_idx)`
pub fn effort(r_idx: usize, x_idx: usize) -> f64 {
    0.5 + 0.1 * r_idx as f64 + 0.01 * x_idx as f64
}

/// Quantity policy at `(r_idx, x_idx)`
pub fn quantity(r_idx: usize, x_idx: usize) -> f64 {
    0.2 * x_idx as f64 + 0.05 * r_idx as f64
}

/// A model on a 4 x 4 mesh with the solver's specification
pub fn model() -> Model {
    model_with(parameters(), 4, 4)
}

pub fn model_with(parameters: Parameters, x_points: usize, r_points: usize) -> Model {
    let grids = Grids {
        x: Arc::new(Grid::power(x_points, 0.0, 3.0, 1.0)),
        r: Arc::new(Grid::power(r_points, 0.0, 1.0, 1.0)),
        q: Arc::new(Grid::power(5, 0.0, 2.0, 1.0)),
        s: Arc::new(Grid::power(6, 0.0, 1.0, 2.0)),
    };
    let variable = |f: &dyn Fn(usize, usize) -> f64| {
        Variable::from_fn(grids.x.clone(), grids.r.clone(), |r, x| f(r, x))
    };
    let variables = Variables {
        v0: variable(&|r, x| 10.0 * r as f64 + x as f64),
        v1: variable(&|r, x| 20.0 * r as f64 + 2.0 * x as f64),
        s: variable(&effort),
        q: variable(&quantity),
    };
    let specification = Specification::parse(SOLVER_FNCS, &parameters).unwrap();
    Model::from_parts(grids, variables, parameters, specification).unwrap()
}

/// Write `model` to `dir` together with a `head` file.
pub fn write_save(model: &Model, dir: &Path) {
    model.save(dir).unwrap();
    std::fs::write(dir.join("head"), HEAD).unwrap();
}
