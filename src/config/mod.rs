//! Configuration Management
//!
//! Unified configuration system with hierarchical resolution:
//! 1. Built-in defaults
//! 2. Global config (`<config dir>/depdocs/config.toml`)
//! 3. Project config (`./depdocs.toml`)
//! 4. `--config <file>`
//! 5. Environment variables (`DEPDOCS_*`)
//! 6. CLI arguments (highest priority)

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::*;
