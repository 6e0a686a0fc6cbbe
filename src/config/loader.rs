//! Configuration Loader (Figment-based)
//!
//! Loads and merges configuration from multiple sources using Figment:
//! 1. Built-in defaults (Serialized)
//! 2. Global config (`<config dir>/depdocs/config.toml`)
//! 3. Project config (`./depdocs.toml`)
//! 4. Explicit `--config` file
//! 5. Environment variables (`DEPDOCS_*`, nested keys split on `__`)

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};
use tracing::debug;

use super::types::Config;
use crate::types::{DepDocsError, Result};

const ENV_PREFIX: &str = "DEPDOCS_";
const PROJECT_CONFIG_FILE: &str = "depdocs.toml";

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with the full resolution chain
    pub fn load(extra: Option<&Path>) -> Result<Config> {
        let figment = Self::figment(
            Self::global_config_path().as_deref(),
            &Self::project_config_path(),
            extra,
        )?
        .merge(Env::prefixed(ENV_PREFIX).split("__"));

        Self::extract(figment)
    }

    /// Load configuration from a specific file only
    pub fn load_from_file(path: &Path) -> Result<Config> {
        Self::extract(
            Figment::new()
                .merge(Serialized::defaults(Config::default()))
                .merge(Toml::file(path)),
        )
    }

    /// File layers without the environment.
    ///
    /// Missing global and project files are skipped; a missing `extra` file
    /// is an error since it was asked for explicitly.
    pub fn figment(global: Option<&Path>, project: &Path, extra: Option<&Path>) -> Result<Figment> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        if let Some(global) = global
            && global.exists()
        {
            debug!("Loading global config from: {}", global.display());
            figment = figment.merge(Toml::file(global));
        }

        if project.exists() {
            debug!("Loading project config from: {}", project.display());
            figment = figment.merge(Toml::file(project));
        }

        if let Some(extra) = extra {
            if !extra.is_file() {
                return Err(DepDocsError::Config(format!(
                    "Config file not found: {}",
                    extra.display()
                )));
            }
            debug!("Loading config from: {}", extra.display());
            figment = figment.merge(Toml::file(extra));
        }

        Ok(figment)
    }

    fn extract(figment: Figment) -> Result<Config> {
        let config: Config = figment
            .extract()
            .map_err(|e| DepDocsError::Config(format!("Configuration error: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    // =========================================================================
    // Path Management
    // =========================================================================

    /// Get path to global config file
    pub fn global_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "depdocs").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Get path to project config file
    pub fn project_config_path() -> PathBuf {
        PathBuf::from(PROJECT_CONFIG_FILE)
    }

    /// Render the effective configuration as TOML
    pub fn render(config: &Config) -> Result<String> {
        toml::to_string_pretty(config).map_err(|e| DepDocsError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_from_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("depdocs.toml");
        fs::write(
            &path,
            r#"
[tool]
program = "/opt/dbt/bin/dbt"
serve = false

[output]
default_group = "warehouse"
"#,
        )
        .unwrap();

        let config = ConfigLoader::load_from_file(&path).unwrap();
        assert_eq!(config.tool.program, "/opt/dbt/bin/dbt");
        assert!(!config.tool.serve);
        assert_eq!(config.output.default_group, "warehouse");
        assert_eq!(config.logging.run_name, "depdocs");
    }

    #[test]
    fn test_layer_precedence() {
        let temp = TempDir::new().unwrap();
        let global = temp.path().join("global.toml");
        let project = temp.path().join("project.toml");
        let extra = temp.path().join("extra.toml");
        fs::write(&global, "[tool]\nprogram = \"global-dbt\"\nserve = false\n").unwrap();
        fs::write(&project, "[tool]\nprogram = \"project-dbt\"\n").unwrap();
        fs::write(&extra, "[logging]\nrun_name = \"nightly\"\n").unwrap();

        let figment = ConfigLoader::figment(Some(&global), &project, Some(&extra)).unwrap();
        let config = ConfigLoader::extract(figment).unwrap();

        assert_eq!(config.tool.program, "project-dbt");
        assert!(!config.tool.serve);
        assert_eq!(config.logging.run_name, "nightly");
    }

    #[test]
    fn test_missing_files_are_skipped() {
        let temp = TempDir::new().unwrap();
        let figment = ConfigLoader::figment(
            Some(&temp.path().join("none.toml")),
            &temp.path().join("also-none.toml"),
            None,
        )
        .unwrap();
        assert_eq!(ConfigLoader::extract(figment).unwrap(), Config::default());
    }

    #[test]
    fn test_missing_extra_file_is_error() {
        let temp = TempDir::new().unwrap();
        let err = ConfigLoader::figment(
            None,
            &temp.path().join("none.toml"),
            Some(&temp.path().join("explicit.toml")),
        )
        .unwrap_err();
        assert!(matches!(err, DepDocsError::Config(_)));
    }

    #[test]
    fn test_invalid_values_fail_validation() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bad.toml");
        fs::write(&path, "[output]\ndefault_group = \"a/b\"\n").unwrap();
        assert!(ConfigLoader::load_from_file(&path).is_err());
    }

    #[test]
    fn test_render_round_trips_through_toml() {
        let rendered = ConfigLoader::render(&Config::default()).unwrap();
        assert!(rendered.contains("program = \"dbt\""));
        assert!(rendered.contains("default_group = \"database\""));
    }
}
