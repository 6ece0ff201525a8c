//! Configuration schema definitions
//!
//! Defines the structure of `config.yaml`. Every field has a default so a
//! partial file only overrides what it names.

use crate::datasource::DataMode;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Starting namespace
    #[serde(default = "default_namespace")]
    pub default_namespace: String,

    /// Where resource data comes from
    #[serde(default)]
    pub mode: DataMode,

    /// kubeconfig context to use instead of the current one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,

    /// View shown at startup
    #[serde(default)]
    pub default_view: DefaultView,

    /// Seconds between automatic refreshes, 0 disables them
    #[serde(default = "default_refresh_interval_secs")]
    pub refresh_interval_secs: u64,

    /// UI configuration
    #[serde(default)]
    pub ui: UiConfig,
}

/// UI configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UiConfig {
    /// Enable mouse hover and click on graph nodes
    #[serde(default = "default_true")]
    pub enable_mouse: bool,

    /// Disable Unicode icons for compatibility
    #[serde(default = "default_false")]
    pub no_icons: bool,

    /// Open the graph fullscreen
    #[serde(default = "default_false")]
    pub start_fullscreen: bool,

    /// Opacity of nodes and edges outside the hovered neighbourhood
    #[serde(default = "default_dim_opacity")]
    pub dim_opacity: f64,
}

/// Views that can be opened at startup without naming a resource
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum DefaultView {
    #[default]
    Namespace,
    ConfigSecrets,
}

impl DefaultView {
    pub fn as_str(&self) -> &'static str {
        match self {
            DefaultView::Namespace => "namespace",
            DefaultView::ConfigSecrets => "configSecrets",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "namespace" => Some(DefaultView::Namespace),
            "configSecrets" | "config-secrets" => Some(DefaultView::ConfigSecrets),
            _ => None,
        }
    }
}

impl fmt::Display for DefaultView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Default value functions
fn default_namespace() -> String {
    "default".to_string()
}

fn default_refresh_interval_secs() -> u64 {
    30
}

fn default_true() -> bool {
    true
}

fn default_false() -> bool {
    false
}

fn default_dim_opacity() -> f64 {
    0.3
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_namespace: default_namespace(),
            mode: DataMode::default(),
            context: None,
            default_view: DefaultView::default(),
            refresh_interval_secs: default_refresh_interval_secs(),
            ui: UiConfig::default(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            enable_mouse: default_true(),
            no_icons: default_false(),
            start_fullscreen: default_false(),
            dim_opacity: default_dim_opacity(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert_eq!(config.default_namespace, "default");
        assert_eq!(config.mode, DataMode::Demo);
        assert_eq!(config.refresh_interval_secs, 30);
        assert!(config.ui.enable_mouse);
        assert_eq!(config.ui.dim_opacity, 0.3);
    }

    #[test]
    fn test_config_serialization() {
        let yaml = serde_yaml::to_string(&Config::default()).unwrap();
        assert!(yaml.contains("defaultNamespace"));
        assert!(yaml.contains("refreshIntervalSecs"));
        assert!(yaml.contains("dimOpacity"));
        assert!(!yaml.contains("context"));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let yaml = r#"
mode: cluster
defaultView: configSecrets
ui:
  noIcons: true
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.mode, DataMode::Cluster);
        assert_eq!(config.default_view, DefaultView::ConfigSecrets);
        assert!(config.ui.no_icons);
        assert!(config.ui.enable_mouse);
        assert_eq!(config.default_namespace, "default");
    }
}
