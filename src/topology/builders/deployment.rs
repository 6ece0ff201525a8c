//! Deployment-centric view
//!
//! HPAs above the Deployment, its ConfigMaps and Secrets on the left, its
//! Pods on the right.

use super::{
    config_map_node, deployment_node, hpa_node, keys_detail, pod_belongs_to_deployment, pod_node,
    replicas_detail, secret_node,
};
use crate::models::{ConfigMap, Deployment, HealthStatus, Hpa, Pod, Secret};
use crate::topology::graph::{
    GraphAssembler, HandlePosition, Position, ResourceEdge, TopologyGraph,
};
use crate::topology::status::Health;

const LEFT_X: f64 = 50.0;
const CENTER_X: f64 = 500.0;
const RIGHT_X: f64 = 950.0;
const TOP_Y: f64 = 50.0;
const ROW_HEIGHT: f64 = 150.0;
/// The Deployment sits at `max(FOCAL_MIN_Y, left_count * FOCAL_ROW_WEIGHT)`
const FOCAL_MIN_Y: f64 = 300.0;
const FOCAL_ROW_WEIGHT: f64 = 80.0;
const HPA_GAP: f64 = 200.0;

/// Build the topology around a single Deployment
///
/// Only related resources are drawn: HPAs whose scale target is this
/// Deployment, ConfigMaps and Secrets named in its reference lists, and Pods
/// that belong to it (see [`pod_belongs_to_deployment`]).
pub fn build_deployment_topology(
    deployment: &Deployment,
    pods: &[Pod],
    config_maps: &[ConfigMap],
    secrets: &[Secret],
    hpas: &[Hpa],
) -> TopologyGraph {
    let related_hpas: Vec<&Hpa> = hpas
        .iter()
        .filter(|hpa| hpa.targets_deployment(&deployment.name))
        .collect();
    let mounted_config_maps: Vec<&ConfigMap> = config_maps
        .iter()
        .filter(|cm| deployment.references_config_map(&cm.name))
        .collect();
    let mounted_secrets: Vec<&Secret> = secrets
        .iter()
        .filter(|s| deployment.references_secret(&s.name))
        .collect();
    let owned_pods: Vec<&Pod> = pods
        .iter()
        .filter(|pod| pod_belongs_to_deployment(pod, deployment))
        .collect();

    let left_count = mounted_config_maps.len() + mounted_secrets.len();
    let deployment_y = FOCAL_MIN_Y.max(left_count as f64 * FOCAL_ROW_WEIGHT);
    let deployment_status = deployment.health();

    let mut graph = GraphAssembler::new();
    let focal = deployment_node(deployment, Position::new(CENTER_X, deployment_y))
        .with_detail("replicas", replicas_detail(deployment))
        .with_detail("strategy", deployment.strategy.clone());
    let deployment_id = focal.id.clone();

    for (index, hpa) in related_hpas.iter().enumerate() {
        let y = deployment_y - HPA_GAP - index as f64 * ROW_HEIGHT;
        let node = hpa_node(hpa, Position::new(CENTER_X, y));
        let node_id = node.id.clone();
        if graph.add_node(node) {
            graph.add_edge(
                ResourceEdge::new(
                    &node_id,
                    &deployment_id,
                    deployment_status == HealthStatus::Healthy,
                )
                .with_handles(HandlePosition::Bottom, HandlePosition::Top),
            );
        }
    }

    graph.add_node(focal);

    for (index, config_map) in mounted_config_maps.iter().enumerate() {
        let node = config_map_node(
            config_map,
            Position::new(LEFT_X, TOP_Y + index as f64 * ROW_HEIGHT),
        )
        .with_detail("keys", keys_detail(config_map.data.len()));
        let node_id = node.id.clone();
        if graph.add_node(node) {
            graph.add_edge(ResourceEdge::new(&node_id, &deployment_id, false));
        }
    }

    for (index, secret) in mounted_secrets.iter().enumerate() {
        let row = mounted_config_maps.len() + index;
        let node = secret_node(secret, Position::new(LEFT_X, TOP_Y + row as f64 * ROW_HEIGHT))
            .with_detail("type", secret.secret_type.clone())
            .with_detail("keys", keys_detail(secret.keys.len()));
        let node_id = node.id.clone();
        if graph.add_node(node) {
            graph.add_edge(ResourceEdge::new(&node_id, &deployment_id, false));
        }
    }

    for (index, pod) in owned_pods.iter().enumerate() {
        let node = pod_node(pod, Position::new(RIGHT_X, TOP_Y + index as f64 * ROW_HEIGHT))
            .with_detail("node", pod.node_name.clone())
            .with_detail("restarts", pod.restart_count.to_string());
        let node_id = node.id.clone();
        if graph.add_node(node) {
            graph.add_edge(ResourceEdge::new(&deployment_id, &node_id, pod.is_running()));
        }
    }

    let graph = graph.finish();
    tracing::debug!(
        "Built deployment topology for {}: {} nodes, {} edges",
        deployment.name,
        graph.nodes.len(),
        graph.edges.len()
    );
    graph
}
