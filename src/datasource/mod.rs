//! Resource data sources
//!
//! The topology core never fetches anything itself. A [`ResourceProvider`]
//! resolves one namespace worth of records into a [`ResourceSnapshot`], and
//! the builders run on that snapshot afterwards.
//!
//! Two providers exist: [`DemoProvider`] generates deterministic sample data
//! and [`ClusterProvider`] lists live objects through kube-rs.

mod cache;
mod cluster;
mod demo;

pub use cache::DemoCache;
pub use cluster::{
    ClusterProvider, config_map_from_json, deployment_from_json, hpa_from_json, pod_from_json,
    secret_from_json,
};
pub use demo::{DemoProvider, generate_demo_snapshot};

use crate::models::{ConfigMap, Deployment, Hpa, Pod, Secret};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Everything the builders need for one namespace
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResourceSnapshot {
    pub namespace: String,
    pub deployments: Vec<Deployment>,
    pub pods: Vec<Pod>,
    pub config_maps: Vec<ConfigMap>,
    pub secrets: Vec<Secret>,
    pub hpas: Vec<Hpa>,
}

impl ResourceSnapshot {
    pub fn deployment(&self, name: &str) -> Option<&Deployment> {
        self.deployments.iter().find(|d| d.name == name)
    }

    pub fn pod(&self, name: &str) -> Option<&Pod> {
        self.pods.iter().find(|p| p.name == name)
    }

    pub fn config_map(&self, name: &str) -> Option<&ConfigMap> {
        self.config_maps.iter().find(|cm| cm.name == name)
    }

    pub fn secret(&self, name: &str) -> Option<&Secret> {
        self.secrets.iter().find(|s| s.name == name)
    }

    pub fn resource_count(&self) -> usize {
        self.deployments.len()
            + self.pods.len()
            + self.config_maps.len()
            + self.secrets.len()
            + self.hpas.len()
    }
}

/// Where resource data comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataMode {
    #[default]
    Demo,
    Cluster,
}

impl DataMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataMode::Demo => "demo",
            DataMode::Cluster => "cluster",
        }
    }
}

impl fmt::Display for DataMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "demo" | "mock" => Ok(DataMode::Demo),
            "cluster" | "live" => Ok(DataMode::Cluster),
            other => anyhow::bail!("Unknown data mode: {} (expected demo or cluster)", other),
        }
    }
}

/// Data source errors
#[derive(Debug, thiserror::Error)]
pub enum DataSourceError {
    #[error("Kubernetes API error: {0}")]
    Kube(#[from] kube::Error),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Fetch task failed: {0}")]
    Task(String),

    #[error("Failed to convert {kind} {name}: {reason}")]
    Conversion {
        kind: &'static str,
        name: String,
        reason: String,
    },
}

/// Result type for data source operations
pub type DataSourceResult<T> = Result<T, DataSourceError>;

/// Supplies resource records for a namespace
#[async_trait]
pub trait ResourceProvider: Send + Sync {
    fn mode(&self) -> DataMode;

    /// Fetch all records the topology views need for `namespace`
    async fn fetch(&self, namespace: &str) -> DataSourceResult<ResourceSnapshot>;

    /// Drop any cached data so the next fetch is fresh
    async fn invalidate(&self) {}
}

/// Create the provider for a data mode
///
/// Demo data goes through `cache`, which the caller keeps so a later
/// provider for the same namespace can reuse it.
pub async fn create_provider(
    mode: DataMode,
    context: Option<&str>,
    cache: Arc<Mutex<DemoCache>>,
) -> anyhow::Result<Arc<dyn ResourceProvider>> {
    let provider: Arc<dyn ResourceProvider> = match mode {
        DataMode::Demo => Arc::new(DemoProvider::new(cache)),
        DataMode::Cluster => Arc::new(ClusterProvider::connect(context).await?),
    };
    tracing::info!("Using {} data source", mode);
    Ok(provider)
}

/// Format an elapsed duration as the short `Nd` / `Nh` / `Nm` age string
pub fn format_age(elapsed: chrono::Duration) -> String {
    let days = elapsed.num_days();
    if days > 0 {
        return format!("{}d", days);
    }
    let hours = elapsed.num_hours();
    if hours > 0 {
        return format!("{}h", hours);
    }
    format!("{}m", elapsed.num_minutes().max(0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_format_age() {
        assert_eq!(format_age(Duration::days(3) + Duration::hours(5)), "3d");
        assert_eq!(format_age(Duration::hours(7)), "7h");
        assert_eq!(format_age(Duration::minutes(42)), "42m");
        assert_eq!(format_age(Duration::seconds(-5)), "0m");
    }

    #[test]
    fn test_data_mode_parse() {
        assert_eq!("Demo".parse::<DataMode>().unwrap(), DataMode::Demo);
        assert_eq!("cluster".parse::<DataMode>().unwrap(), DataMode::Cluster);
        assert!("staging".parse::<DataMode>().is_err());
    }

    #[test]
    fn test_snapshot_lookup() {
        let snapshot = ResourceSnapshot {
            pods: vec![Pod {
                name: "web-1".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        };
        assert!(snapshot.pod("web-1").is_some());
        assert!(snapshot.deployment("web").is_none());
        assert_eq!(snapshot.resource_count(), 1);
    }
}
