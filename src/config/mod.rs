//! Configuration system for kubetopo
//!
//! A single YAML file under the platform config directory, with environment
//! variable overrides on top. Keys use camelCase with dot notation for
//! nested sections (`ui.noIcons`).

pub mod loader;
pub mod paths;
pub mod schema;

pub use loader::ConfigLoader;
pub use schema::{Config, DefaultView, UiConfig};

/// All keys understood by [`get_config_value`] and [`set_config_value`]
pub const CONFIG_KEYS: &[&str] = &[
    "defaultNamespace",
    "mode",
    "context",
    "defaultView",
    "refreshIntervalSecs",
    "ui.enableMouse",
    "ui.noIcons",
    "ui.startFullscreen",
    "ui.dimOpacity",
];

/// Get a configuration value by key (dot notation)
pub fn get_config_value(config: &Config, key: &str) -> anyhow::Result<String> {
    match key {
        "defaultNamespace" => Ok(config.default_namespace.clone()),
        "mode" => Ok(config.mode.to_string()),
        "context" => Ok(config.context.clone().unwrap_or_default()),
        "defaultView" => Ok(config.default_view.to_string()),
        "refreshIntervalSecs" => Ok(config.refresh_interval_secs.to_string()),
        "ui.enableMouse" => Ok(config.ui.enable_mouse.to_string()),
        "ui.noIcons" => Ok(config.ui.no_icons.to_string()),
        "ui.startFullscreen" => Ok(config.ui.start_fullscreen.to_string()),
        "ui.dimOpacity" => Ok(config.ui.dim_opacity.to_string()),
        _ => Err(anyhow::anyhow!("Unknown configuration key: {}", key)),
    }
}

/// Set a configuration value by key (dot notation)
pub fn set_config_value(config: &mut Config, key: &str, value: &str) -> anyhow::Result<()> {
    use anyhow::Context;
    match key {
        "defaultNamespace" => {
            if value.trim().is_empty() {
                anyhow::bail!("defaultNamespace must not be empty");
            }
            config.default_namespace = value.to_string();
        }
        "mode" => {
            config.mode = value.parse()?;
        }
        "context" => {
            config.context = (!value.is_empty()).then(|| value.to_string());
        }
        "defaultView" => {
            config.default_view = DefaultView::parse(value).ok_or_else(|| {
                anyhow::anyhow!("defaultView must be 'namespace' or 'configSecrets'")
            })?;
        }
        "refreshIntervalSecs" => {
            config.refresh_interval_secs = value
                .parse()
                .context("refreshIntervalSecs must be a number")?;
        }
        "ui.enableMouse" => {
            config.ui.enable_mouse = value
                .parse()
                .context("ui.enableMouse must be 'true' or 'false'")?;
        }
        "ui.noIcons" => {
            config.ui.no_icons = value
                .parse()
                .context("ui.noIcons must be 'true' or 'false'")?;
        }
        "ui.startFullscreen" => {
            config.ui.start_fullscreen = value
                .parse()
                .context("ui.startFullscreen must be 'true' or 'false'")?;
        }
        "ui.dimOpacity" => {
            let opacity: f64 = value
                .parse()
                .context("ui.dimOpacity must be a number")?;
            if !(0.0..=1.0).contains(&opacity) {
                anyhow::bail!("ui.dimOpacity must be between 0 and 1");
            }
            config.ui.dim_opacity = opacity;
        }
        _ => return Err(anyhow::anyhow!("Unknown configuration key: {}", key)),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datasource::DataMode;

    #[test]
    fn test_every_key_is_readable() {
        let config = Config::default();
        for key in CONFIG_KEYS {
            assert!(get_config_value(&config, key).is_ok(), "{}", key);
        }
        assert!(get_config_value(&config, "ui.skin").is_err());
    }

    #[test]
    fn test_set_values() {
        let mut config = Config::default();
        set_config_value(&mut config, "mode", "cluster").unwrap();
        set_config_value(&mut config, "defaultView", "configSecrets").unwrap();
        set_config_value(&mut config, "ui.dimOpacity", "0.5").unwrap();
        set_config_value(&mut config, "context", "kind-dev").unwrap();
        assert_eq!(config.mode, DataMode::Cluster);
        assert_eq!(config.default_view, DefaultView::ConfigSecrets);
        assert_eq!(config.ui.dim_opacity, 0.5);
        assert_eq!(config.context.as_deref(), Some("kind-dev"));

        set_config_value(&mut config, "context", "").unwrap();
        assert_eq!(config.context, None);
    }

    #[test]
    fn test_set_rejects_invalid() {
        let mut config = Config::default();
        assert!(set_config_value(&mut config, "ui.dimOpacity", "2").is_err());
        assert!(set_config_value(&mut config, "ui.noIcons", "maybe").is_err());
        assert!(set_config_value(&mut config, "defaultView", "pods").is_err());
        assert_eq!(config, Config::default());
    }
}
