//! CLI command handlers

use anyhow::{Context, Result};
use clap::Subcommand;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::config::{self, Config, ConfigLoader, paths};
use crate::datasource::{DemoCache, create_provider};
use crate::view::TopologyView;

/// Configuration management subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigSubcommand {
    /// Get configuration value
    Get {
        /// Configuration key (e.g., "defaultNamespace", "ui.noIcons")
        key: Option<String>,
    },
    /// Set configuration value
    Set {
        /// Configuration key (e.g., "defaultNamespace", "ui.noIcons")
        key: String,
        /// Configuration value
        value: String,
    },
    /// List all configuration
    List,
    /// List the keys accepted by get and set
    Keys,
    /// Show configuration file path
    Path,
    /// Validate configuration
    Validate,
}

/// Handle configuration subcommands
pub fn handle_config_command(cmd: ConfigSubcommand) -> Result<()> {
    match cmd {
        ConfigSubcommand::Get { key } => {
            let config = ConfigLoader::load().context("Failed to load configuration")?;

            if let Some(key) = key {
                let value = config::get_config_value(&config, &key)?;
                println!("{}", value);
            } else {
                print_yaml(&config)?;
            }
        }
        ConfigSubcommand::Set { key, value } => {
            // Edit the file's own values, not the env-overridden view of them
            let path = paths::config_file();
            let mut config = if path.exists() {
                ConfigLoader::load_file(&path)?
            } else {
                Config::default()
            };

            config::set_config_value(&mut config, &key, &value)
                .with_context(|| format!("Failed to set {} = {}", key, value))?;

            ConfigLoader::save_root(&config).context("Failed to save configuration")?;
            println!("Configuration saved");
        }
        ConfigSubcommand::List => {
            let config = ConfigLoader::load().context("Failed to load configuration")?;
            print_yaml(&config)?;
        }
        ConfigSubcommand::Keys => {
            for key in config::CONFIG_KEYS {
                println!("{}", key);
            }
        }
        ConfigSubcommand::Path => {
            println!("{}", paths::config_file().display());
        }
        ConfigSubcommand::Validate => {
            let path = paths::config_file();
            match ConfigLoader::validate(&path) {
                Ok(()) => println!("Configuration is valid"),
                Err(e) => {
                    eprintln!("Configuration validation failed: {:#}", e);
                    std::process::exit(1);
                }
            }
        }
    }

    Ok(())
}

fn print_yaml(config: &Config) -> Result<()> {
    let yaml = serde_yaml::to_string(config).context("Failed to serialize configuration")?;
    print!("{}", yaml);
    Ok(())
}

/// Fetch one namespace, build `view` and print the graph as JSON
pub async fn handle_export_command(config: &Config, view: &TopologyView, pretty: bool) -> Result<()> {
    let cache = Arc::new(Mutex::new(DemoCache::new()));
    let provider = create_provider(config.mode, config.context.as_deref(), cache).await?;

    let snapshot = provider
        .fetch(&config.default_namespace)
        .await
        .with_context(|| format!("Failed to fetch namespace {}", config.default_namespace))?;
    let graph = view.build(&snapshot)?;

    let json = if pretty {
        serde_json::to_string_pretty(&graph)
    } else {
        serde_json::to_string(&graph)
    }
    .context("Failed to serialize topology")?;
    println!("{}", json);
    Ok(())
}
