//! Pod-centric view
//!
//! The Pod in the middle, one sub-node per container on the right, the
//! ConfigMaps and Secrets it references on the left.

use super::{config_map_node, pod_node, secret_node};
use crate::models::{ConfigMap, HealthStatus, Pod, ResourceType, Secret};
use crate::topology::graph::{GraphAssembler, Position, ResourceEdge, ResourceNode, TopologyGraph};

const LEFT_X: f64 = 50.0;
const CENTER_X: f64 = 400.0;
const RIGHT_X: f64 = 750.0;
const CENTER_Y: f64 = 200.0;
const TOP_Y: f64 = 100.0;
const ROW_HEIGHT: f64 = 120.0;

/// Build the topology around a single Pod
///
/// Container nodes take their status from the container's `ready` flag,
/// not from the pod phase. They are typed as `Pod` and identified as
/// `container-{pod}-{container}`.
pub fn build_pod_topology(pod: &Pod, config_maps: &[ConfigMap], secrets: &[Secret]) -> TopologyGraph {
    let referenced_config_maps: Vec<&ConfigMap> = config_maps
        .iter()
        .filter(|cm| pod.references_config_map(&cm.name))
        .collect();
    let referenced_secrets: Vec<&Secret> = secrets
        .iter()
        .filter(|s| pod.references_secret(&s.name))
        .collect();

    let mut graph = GraphAssembler::new();
    let focal = pod_node(pod, Position::new(CENTER_X, CENTER_Y))
        .with_detail("node", pod.node_name.clone())
        .with_detail("ip", pod.ip.clone())
        .with_detail("restarts", pod.restart_count.to_string());
    let pod_id = focal.id.clone();
    graph.add_node(focal);

    for (index, config_map) in referenced_config_maps.iter().enumerate() {
        let node = config_map_node(
            config_map,
            Position::new(LEFT_X, TOP_Y + index as f64 * ROW_HEIGHT),
        );
        let node_id = node.id.clone();
        if graph.add_node(node) {
            graph.add_edge(ResourceEdge::new(&node_id, &pod_id, false));
        }
    }

    for (index, secret) in referenced_secrets.iter().enumerate() {
        let row = referenced_config_maps.len() + index;
        let node = secret_node(secret, Position::new(LEFT_X, TOP_Y + row as f64 * ROW_HEIGHT));
        let node_id = node.id.clone();
        if graph.add_node(node) {
            graph.add_edge(ResourceEdge::new(&node_id, &pod_id, false));
        }
    }

    for (index, container) in pod.containers.iter().enumerate() {
        let status = if container.ready {
            HealthStatus::Healthy
        } else {
            HealthStatus::Error
        };
        let node = ResourceNode::new(
            ResourceType::Pod,
            &container.name,
            &pod.namespace,
            status,
            Position::new(RIGHT_X, TOP_Y + index as f64 * ROW_HEIGHT),
        )
        .with_id(format!("container-{}-{}", pod.name, container.name))
        .with_detail("image", container.image.clone())
        .with_detail("restarts", container.restart_count.to_string());
        let node_id = node.id.clone();
        if graph.add_node(node) {
            graph.add_edge(ResourceEdge::new(&pod_id, &node_id, container.ready));
        }
    }

    let graph = graph.finish();
    tracing::debug!(
        "Built pod topology for {}: {} nodes, {} edges",
        pod.name,
        graph.nodes.len(),
        graph.edges.len()
    );
    graph
}
