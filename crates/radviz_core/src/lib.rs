//! Radial attention model output library
//!
//! This crate reads the binary save directories written by the radial
//! attention solver and derives the quantities needed to report on them:
//! - Grids and two dimensional variables in the solver's little-endian layout
//! - Model parameters and the functional specification (`fncs`) compiled into
//!   callable expressions with the parameters substituted
//! - Radius and wealth dynamics under the optimal policies
//! - Parameter dependence extraction across a family of saves
//! - LaTeX tables and model descriptions
//!
//! ```ignore
//! use radviz_core::{Model, VariableName};
//!
//! let model = Model::load("data/baseline")?;
//! let radt = model.radius_dynamics();
//! println!("{}", model.variable(VariableName::S));
//! println!("{}", model.model_string());
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

mod binary;
pub mod error;
pub mod expr;
pub mod format;
pub mod grid;
pub mod pardep;
pub mod report;
pub mod smooth;
pub mod variable;

// ============================================================================
// Type definition modules
// ============================================================================

pub mod model;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use error::{GridError, LoadError, Result, SpecError};
pub use expr::{Argument, Arguments, ExprError};
pub use grid::Grid;
pub use model::{
    Function, FunctionKind, GridName, Grids, Model, ParameterName, Parameters, SaveHeader,
    Specification, VariableName, Variables,
};
pub use pardep::{DependenceData, ParameterDependence, ResponseField};
pub use variable::Variable;
