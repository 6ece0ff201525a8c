//! Namespace-wide view
//!
//! Deployments across the top with their Pods stacked underneath, and a
//! left column of ConfigMaps and Secrets. The ConfigMap/Secret column is an
//! overview only: this view does not cross-reference them, so they carry no
//! edges.

use super::{config_map_node, deployment_node, pod_node, replicas_detail, secret_node};
use crate::models::{ConfigMap, Deployment, Pod, Secret};
use crate::topology::graph::{GraphAssembler, Position, ResourceEdge, TopologyGraph};

const LEFT_X: f64 = 50.0;
const FIRST_COLUMN_X: f64 = 200.0;
const COLUMN_WIDTH: f64 = 250.0;
const TOP_Y: f64 = 50.0;
const POD_TOP_Y: f64 = 200.0;
const ROW_HEIGHT: f64 = 100.0;

/// Build the namespace overview
///
/// Pods are matched to a Deployment by `labels.app == deployment.name`;
/// pods matching no Deployment are left out.
pub fn build_namespace_topology(
    deployments: &[Deployment],
    pods: &[Pod],
    config_maps: &[ConfigMap],
    secrets: &[Secret],
) -> TopologyGraph {
    let mut graph = GraphAssembler::new();

    for (column, deployment) in deployments.iter().enumerate() {
        let x = FIRST_COLUMN_X + column as f64 * COLUMN_WIDTH;
        let node = deployment_node(deployment, Position::new(x, TOP_Y))
            .with_detail("replicas", replicas_detail(deployment));
        let deployment_id = node.id.clone();
        if !graph.add_node(node) {
            continue;
        }

        let deployment_pods = pods
            .iter()
            .filter(|pod| pod.app_label() == Some(deployment.name.as_str()));
        for (row, pod) in deployment_pods.enumerate() {
            let node = pod_node(pod, Position::new(x, POD_TOP_Y + row as f64 * ROW_HEIGHT));
            let pod_id = node.id.clone();
            if graph.add_node(node) {
                graph.add_edge(ResourceEdge::new(&deployment_id, &pod_id, pod.is_running()));
            }
        }
    }

    for (row, config_map) in config_maps.iter().enumerate() {
        graph.add_node(config_map_node(
            config_map,
            Position::new(LEFT_X, TOP_Y + row as f64 * ROW_HEIGHT),
        ));
    }

    for (index, secret) in secrets.iter().enumerate() {
        let row = config_maps.len() + index;
        graph.add_node(secret_node(
            secret,
            Position::new(LEFT_X, TOP_Y + row as f64 * ROW_HEIGHT),
        ));
    }

    let graph = graph.finish();
    tracing::debug!(
        "Built namespace topology: {} nodes, {} edges",
        graph.nodes.len(),
        graph.edges.len()
    );
    graph
}
