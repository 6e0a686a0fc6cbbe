//! Configuration Types
//!
//! All configuration structures with sensible defaults.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::constants::{logging, output, tool};
use crate::types::{DepDocsError, Result, is_single_dir_name};

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// External documentation tool
    pub tool: ToolConfig,

    /// Generated project layout
    pub output: OutputConfig,

    /// Log file settings
    pub logging: LoggingConfig,
}

impl Config {
    /// Validate values that would otherwise fail late in the run.
    pub fn validate(&self) -> Result<()> {
        if self.tool.program.trim().is_empty() {
            return Err(DepDocsError::Config(
                "tool.program must not be empty".to_string(),
            ));
        }

        if !is_single_dir_name(self.output.default_group.trim()) {
            return Err(DepDocsError::Config(format!(
                "output.default_group must be a single directory name, got {:?}",
                self.output.default_group
            )));
        }

        if self.logging.run_name.trim().is_empty() {
            return Err(DepDocsError::Config(
                "logging.run_name must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

// =============================================================================
// Tool Configuration
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    /// Program name or path of the documentation tool
    pub program: String,

    /// Run `docs serve` after `docs generate`
    pub serve: bool,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            program: tool::DEFAULT_PROGRAM.to_string(),
            serve: true,
        }
    }
}

// =============================================================================
// Output Configuration
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory for objects without a group
    pub default_group: String,

    /// Project template directory; the built-in skeleton when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_dir: Option<PathBuf>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            default_group: output::DEFAULT_GROUP.to_string(),
            template_dir: None,
        }
    }
}

// =============================================================================
// Logging Configuration
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Directory receiving the two log files
    pub dir: PathBuf,

    /// Base name of the log files
    pub run_name: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            run_name: logging::DEFAULT_RUN_NAME.to_string(),
        }
    }
}

impl LoggingConfig {
    /// `<dir>/<run_name>.log`
    pub fn debug_log_path(&self) -> PathBuf {
        self.dir
            .join(format!("{}{}", self.run_name, logging::DEBUG_LOG_SUFFIX))
    }

    /// `<dir>/<run_name>.errors.log`
    pub fn error_log_path(&self) -> PathBuf {
        self.dir
            .join(format!("{}{}", self.run_name, logging::ERROR_LOG_SUFFIX))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.tool.program, "dbt");
        assert!(config.tool.serve);
        assert_eq!(config.output.default_group, "database");
        assert_eq!(config.output.template_dir, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_log_paths() {
        let logging = LoggingConfig {
            dir: PathBuf::from("logs"),
            run_name: "lineage".to_string(),
        };
        assert_eq!(logging.debug_log_path(), PathBuf::from("logs/lineage.log"));
        assert_eq!(
            logging.error_log_path(),
            PathBuf::from("logs/lineage.errors.log")
        );
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.tool.program = " ".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.output.default_group = "../outside".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.logging.run_name = String::new();
        assert!(config.validate().is_err());
    }
}
