//! Integration tests for the radviz_core model readers
//!
//! Tests are organized by topic:
//! - `fixtures` - Synthetic solver save directories shared by the tests
//! - `grid` - Grid files and index selection
//! - `variable` - Variable files and the wealth x radius layout
//! - `expr` - Specification expressions and parameter substitution
//! - `model` - Save directory loading and derived dynamics
//! - `pardep` - Parameter dependence discovery and extraction
//! - `report` - LaTeX tables and model descriptions

mod expr;
mod fixtures;
mod model;
mod pardep;
