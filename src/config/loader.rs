//! Configuration loading
//!
//! Layers, lowest to highest precedence: built-in defaults, the root
//! `config.yaml`, then environment variable overrides.

use super::{paths, schema::Config};
use crate::datasource::DataMode;
use anyhow::{Context, Result};
use std::path::Path;

pub const NAMESPACE_ENV: &str = "KUBETOPO_NAMESPACE";
pub const MODE_ENV: &str = "KUBETOPO_MODE";

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with all layers applied
    pub fn load() -> Result<Config> {
        Self::load_from(&paths::config_file())
    }

    /// Load with `path` as the root config file
    ///
    /// A missing file is not an error; the defaults are used instead.
    pub fn load_from(path: &Path) -> Result<Config> {
        let config = if path.exists() {
            Self::load_file(path)?
        } else {
            tracing::debug!("No config file at {}, using defaults", path.display());
            Config::default()
        };
        Ok(Self::apply_env_overrides(config))
    }

    /// Load configuration from a file
    pub fn load_file(path: &Path) -> Result<Config> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate the config file at `path`, if there is one
    ///
    /// Fails on YAML syntax errors, wrong value types and values outside
    /// their range.
    pub fn validate(path: &Path) -> Result<()> {
        if path.exists() {
            let config = Self::load_file(path)?;
            Self::check_values(&config)?;
        }
        Ok(())
    }

    fn check_values(config: &Config) -> Result<()> {
        if config.default_namespace.trim().is_empty() {
            anyhow::bail!("defaultNamespace must not be empty");
        }
        if !(0.0..=1.0).contains(&config.ui.dim_opacity) {
            anyhow::bail!(
                "ui.dimOpacity must be between 0 and 1, got {}",
                config.ui.dim_opacity
            );
        }
        Ok(())
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(mut config: Config) -> Config {
        if let Some(namespace) = std::env::var(NAMESPACE_ENV).ok().filter(|ns| !ns.is_empty()) {
            config.default_namespace = namespace;
        }

        if let Ok(mode) = std::env::var(MODE_ENV) {
            match mode.parse::<DataMode>() {
                Ok(mode) => config.mode = mode,
                Err(e) => tracing::warn!("Ignoring {}: {}", MODE_ENV, e),
            }
        }

        config
    }

    /// Save configuration to a file
    pub fn save(config: &Config, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let yaml =
            serde_yaml::to_string(config).context("Failed to serialize configuration to YAML")?;

        std::fs::write(path, yaml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Save root configuration
    pub fn save_root(config: &Config) -> Result<()> {
        Self::save(config, &paths::config_file())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_valid() {
        let dir = tempfile::tempdir().unwrap();
        let config = ConfigLoader::load_file(&dir.path().join("config.yaml"));
        assert!(config.is_err());
        assert!(ConfigLoader::validate(&dir.path().join("config.yaml")).is_ok());
    }

    #[test]
    fn test_save_then_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.yaml");
        let config = Config {
            default_namespace: "shop".to_string(),
            refresh_interval_secs: 5,
            ..Default::default()
        };
        ConfigLoader::save(&config, &path).unwrap();
        assert_eq!(ConfigLoader::load_file(&path).unwrap(), config);
    }

    #[test]
    fn test_validate_rejects_bad_opacity() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "ui:\n  dimOpacity: 1.5\n").unwrap();
        let err = ConfigLoader::validate(&path).unwrap_err();
        assert!(err.to_string().contains("dimOpacity"));
    }

    #[test]
    fn test_validate_rejects_bad_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "mode: [unterminated\n").unwrap();
        assert!(ConfigLoader::validate(&path).is_err());
    }

    #[test]
    fn test_env_overrides() {
        // SAFETY: set_var is unsafe in Rust 2024 due to potential data races.
        // No other test in this crate reads or writes these variables.
        unsafe {
            std::env::set_var(NAMESPACE_ENV, "from-env");
            std::env::set_var(MODE_ENV, "cluster");
        }

        let config = ConfigLoader::apply_env_overrides(Config::default());
        assert_eq!(config.default_namespace, "from-env");
        assert_eq!(config.mode, DataMode::Cluster);

        // SAFETY: see above
        unsafe {
            std::env::remove_var(NAMESPACE_ENV);
            std::env::remove_var(MODE_ENV);
        }
    }
}
