//! kubetopo - a terminal dashboard that draws the resource topology of a
//! Kubernetes namespace
//!
//! Deployments, Pods, ConfigMaps, Secrets and autoscalers are laid out as a
//! graph; hovering highlights a node's neighbours and clicking a node opens
//! the graph centered on it.

use anyhow::Result;
use clap::Parser;
use kubetopo::cli::{self, Args, Command};
use kubetopo::config::{Config, ConfigLoader};
use kubetopo::datasource::{DataMode, DemoCache, create_provider};
use kubetopo::tui::{self, App};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

#[tokio::main]
async fn main() -> Result<()> {
    let mut args = Args::parse();

    // Config subcommands run before logging and without a cluster
    let config_command = args
        .command
        .take_if(|command| matches!(command, Command::Config { .. }));
    if let Some(Command::Config { subcommand }) = config_command {
        return cli::handle_config_command(subcommand);
    }

    let log_file = cli::init_logging(args.debug);
    if let Some(ref log_path) = log_file {
        eprintln!(
            "Debug logging enabled. Logs written to: {}",
            log_path.display()
        );
    }

    let config = ConfigLoader::load().unwrap_or_else(|e| {
        tracing::warn!("Failed to load configuration, using defaults: {:#}", e);
        Config::default()
    });
    let config = args.apply_to(config);
    let view = args.resolve_view(&config)?;

    tracing::debug!(
        "Configuration loaded: mode={}, namespace={}, view={}",
        config.mode,
        config.default_namespace,
        view
    );

    if let Some(Command::Export { pretty }) = args.command {
        return cli::handle_export_command(&config, &view, pretty).await;
    }

    let context = config
        .context
        .clone()
        .or_else(|| {
            (config.mode == DataMode::Cluster)
                .then(kubetopo::kube::current_context)
                .flatten()
        })
        .unwrap_or_else(|| config.mode.to_string());

    let cache = Arc::new(Mutex::new(DemoCache::new()));
    let provider = create_provider(config.mode, config.context.as_deref(), cache).await?;
    let refresh_interval = Duration::from_secs(config.refresh_interval_secs);

    let app = App::new(config, view, context);
    tui::run_tui(app, provider, refresh_interval).await?;

    if let Some(log_path) = log_file {
        eprintln!("Debug log: {}", log_path.display());
    }

    Ok(())
}
