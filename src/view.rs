//! Topology views
//!
//! A [`TopologyView`] names one of the four graphs that can be drawn for a
//! namespace and knows which builder to run on a [`ResourceSnapshot`].

use crate::datasource::{DataSourceError, DataSourceResult, ResourceSnapshot};
use crate::interaction::Route;
use crate::topology::{
    TopologyGraph, build_config_secrets_topology, build_deployment_topology,
    build_namespace_topology, build_pod_topology,
};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopologyView {
    /// Every Deployment with its Pods, plus the namespace's ConfigMaps and Secrets
    Namespace,
    /// ConfigMaps and Secrets of one grouping and the Deployments using them
    ConfigSecrets { grouping: String },
    /// One Deployment with its Pods, HPAs, ConfigMaps and Secrets
    Deployment { name: String },
    /// One Pod with its containers, ConfigMaps and Secrets
    Pod { name: String },
}

impl TopologyView {
    /// The graph view a navigation route opens, if it opens one
    ///
    /// ConfigMap and Secret routes open a detail panel instead.
    pub fn for_route(route: &Route) -> Option<Self> {
        match route {
            Route::Deployment(name) => Some(TopologyView::Deployment { name: name.clone() }),
            Route::Pod(name) => Some(TopologyView::Pod { name: name.clone() }),
            Route::ConfigMap(_) | Route::Secret(_) => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            TopologyView::Namespace => "namespace",
            TopologyView::ConfigSecrets { .. } => "config-secrets",
            TopologyView::Deployment { .. } => "deployment",
            TopologyView::Pod { .. } => "pod",
        }
    }

    /// Build this view's graph from already fetched records
    ///
    /// Fails only when a focal Deployment or Pod is missing from the
    /// snapshot. Empty collections produce an empty graph.
    pub fn build(&self, snapshot: &ResourceSnapshot) -> DataSourceResult<TopologyGraph> {
        let graph = match self {
            TopologyView::Namespace => build_namespace_topology(
                &snapshot.deployments,
                &snapshot.pods,
                &snapshot.config_maps,
                &snapshot.secrets,
            ),
            TopologyView::ConfigSecrets { grouping } => build_config_secrets_topology(
                &snapshot.deployments,
                &snapshot.config_maps,
                &snapshot.secrets,
                grouping,
            ),
            TopologyView::Deployment { name } => {
                let deployment = snapshot.deployment(name).ok_or_else(|| {
                    DataSourceError::NotFound(format!(
                        "Deployment {}/{}",
                        snapshot.namespace, name
                    ))
                })?;
                build_deployment_topology(
                    deployment,
                    &snapshot.pods,
                    &snapshot.config_maps,
                    &snapshot.secrets,
                    &snapshot.hpas,
                )
            }
            TopologyView::Pod { name } => {
                let pod = snapshot.pod(name).ok_or_else(|| {
                    DataSourceError::NotFound(format!("Pod {}/{}", snapshot.namespace, name))
                })?;
                build_pod_topology(pod, &snapshot.config_maps, &snapshot.secrets)
            }
        };

        tracing::debug!(
            "Built {} view: {} nodes, {} edges",
            self,
            graph.nodes.len(),
            graph.edges.len()
        );
        Ok(graph)
    }
}

impl fmt::Display for TopologyView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TopologyView::Namespace => f.write_str("Namespace"),
            TopologyView::ConfigSecrets { grouping } => write!(f, "Config & Secrets ({})", grouping),
            TopologyView::Deployment { name } => write!(f, "Deployment/{}", name),
            TopologyView::Pod { name } => write!(f, "Pod/{}", name),
        }
    }
}
