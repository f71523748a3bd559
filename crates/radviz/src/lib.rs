//! Command line reports for radial attention model solutions
//!
//! Loads the solver's save directories through `radviz_core` and writes:
//! - Surface and section figures of value functions, policies and dynamics
//! - Radius transition and cost sections of the functional specification
//! - Parameter dependence figures across a family of saves
//! - LaTeX parameterization tables and interactive HTML surfaces

// ============================================================================
// Core modules
// ============================================================================

pub mod cli;
pub mod commands;
pub mod logging;
pub mod plot;

// ============================================================================
// Type definition modules
// ============================================================================

pub mod config;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use cli::{Args, Command};
pub use config::RadConfig;
pub use logging::init_logging;
