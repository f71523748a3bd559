//! Tests for the radviz front end
//!
//! Tests are organized by topic:
//! - `fixtures` - Synthetic models and save directories
//! - `config` - YAML configuration and path resolution
//! - `cli` - Argument parsing
//! - `charts` - Figure contents computed before rendering
//! - `commands` - Subcommands that write text outputs

mod charts;
