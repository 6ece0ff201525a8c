//! CLI argument parsing and subcommands

mod commands;
mod logging;

pub use commands::{ConfigSubcommand, handle_config_command, handle_export_command};
pub use logging::init_logging;

use crate::config::{Config, DefaultView};
use crate::datasource::DataMode;
use crate::view::TopologyView;
use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};

/// kubetopo - draw the resource topology of a Kubernetes namespace
#[derive(Parser, Debug, Default)]
#[command(name = "kubetopo")]
#[command(
    about = "A terminal dashboard that draws the resource topology of a Kubernetes namespace",
    long_about = None,
    version
)]
pub struct Args {
    /// Enable debug logging
    #[arg(long, short = 'd')]
    pub debug: bool,

    /// Namespace to show (overrides defaultNamespace)
    #[arg(long, short = 'n', global = true)]
    pub namespace: Option<String>,

    /// Use generated demo data instead of a cluster
    #[arg(long, global = true)]
    pub demo: bool,

    /// kubeconfig context to connect with
    #[arg(long, global = true)]
    pub context: Option<String>,

    /// View to open
    #[arg(long, value_enum, global = true)]
    pub view: Option<ViewArg>,

    /// Open the deployment-centric view for this Deployment
    #[arg(long, global = true, conflicts_with = "pod")]
    pub deployment: Option<String>,

    /// Open the pod-centric view for this Pod
    #[arg(long, global = true)]
    pub pod: Option<String>,

    /// Grouping key for the config/secrets view (defaults to the namespace)
    #[arg(long, global = true)]
    pub grouping: Option<String>,

    /// ASCII icons instead of Unicode
    #[arg(long)]
    pub no_icons: bool,

    /// Start with the graph fullscreen
    #[arg(long)]
    pub fullscreen: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Main commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Configuration management
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
    /// Build one view and print its graph as JSON
    Export {
        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ViewArg {
    Namespace,
    ConfigSecrets,
    Deployment,
    Pod,
}

impl Args {
    /// Apply command line overrides on top of the loaded configuration
    pub fn apply_to(&self, mut config: Config) -> Config {
        if let Some(namespace) = self.namespace.as_ref().filter(|ns| !ns.is_empty()) {
            config.default_namespace = namespace.clone();
        }
        if self.demo {
            config.mode = DataMode::Demo;
        }
        if let Some(context) = &self.context {
            config.context = Some(context.clone());
        }
        if self.no_icons {
            config.ui.no_icons = true;
        }
        if self.fullscreen {
            config.ui.start_fullscreen = true;
        }
        config
    }

    /// Work out which view to open
    ///
    /// `--deployment` and `--pod` imply their views; otherwise `--view`, then
    /// the configured default view.
    pub fn resolve_view(&self, config: &Config) -> Result<TopologyView> {
        let grouping = || {
            self.grouping
                .clone()
                .unwrap_or_else(|| config.default_namespace.clone())
        };

        let view = match (self.view, &self.deployment, &self.pod) {
            (None | Some(ViewArg::Deployment), Some(name), _) => {
                TopologyView::Deployment { name: name.clone() }
            }
            (None | Some(ViewArg::Pod), None, Some(name)) => TopologyView::Pod { name: name.clone() },
            (Some(ViewArg::Deployment), None, _) => {
                anyhow::bail!("--view deployment requires --deployment NAME")
            }
            (Some(ViewArg::Pod), _, None) => anyhow::bail!("--view pod requires --pod NAME"),
            (Some(ViewArg::Namespace), _, _) => TopologyView::Namespace,
            (Some(ViewArg::ConfigSecrets), _, _) => TopologyView::ConfigSecrets {
                grouping: grouping(),
            },
            (Some(_), _, _) => {
                anyhow::bail!("--deployment and --pod select their own views")
            }
            (None, None, None) if self.grouping.is_some() => TopologyView::ConfigSecrets {
                grouping: grouping(),
            },
            (None, None, None) => match config.default_view {
                DefaultView::Namespace => TopologyView::Namespace,
                DefaultView::ConfigSecrets => TopologyView::ConfigSecrets {
                    grouping: grouping(),
                },
            },
        };
        Ok(view)
    }
}
