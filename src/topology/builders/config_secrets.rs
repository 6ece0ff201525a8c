//! Config/Secrets-centric view
//!
//! Which ConfigMaps and Secrets feed which Deployments, scoped to one Flux
//! namespace grouping.

use super::{FLUX_NAMESPACE_LABEL, config_map_node, deployment_node, keys_detail, secret_node};
use crate::models::{ConfigMap, Deployment, ResourceType, Secret};
use crate::topology::graph::{GraphAssembler, Position, ResourceEdge, ResourceNode, TopologyGraph};
use std::collections::BTreeMap;

const LEFT_X: f64 = 100.0;
const RIGHT_X: f64 = 800.0;
const TOP_Y: f64 = 50.0;
const ROW_HEIGHT: f64 = 120.0;

fn in_grouping(labels: &BTreeMap<String, String>, grouping_key: &str) -> bool {
    labels.get(FLUX_NAMESPACE_LABEL).map(String::as_str) == Some(grouping_key)
}

/// Draw an edge from `source_id` to every Deployment that references it,
/// recording each newly connected Deployment in first-seen order
fn connect_dependents<'a>(
    graph: &mut GraphAssembler,
    connected: &mut Vec<&'a Deployment>,
    deployments: &'a [Deployment],
    source_id: &str,
    is_referenced: impl Fn(&Deployment) -> bool,
) {
    for deployment in deployments.iter().filter(|d| is_referenced(d)) {
        let target_id = ResourceNode::node_id(&ResourceType::Deployment, &deployment.name);
        graph.add_edge(ResourceEdge::new(source_id, &target_id, false));
        if !connected.iter().any(|d| d.name == deployment.name) {
            connected.push(deployment);
        }
    }
}

/// Build the ConfigMap/Secret fan-out for one grouping key
///
/// Items whose `kustomize.toolkit.fluxcd.io/namespace` label equals
/// `grouping_key` go in the left column. Deployments are emitted only when
/// at least one of those items is in their reference lists, in the order
/// they were first connected. Returns an empty graph when nothing matches
/// the grouping.
pub fn build_config_secrets_topology(
    deployments: &[Deployment],
    config_maps: &[ConfigMap],
    secrets: &[Secret],
    grouping_key: &str,
) -> TopologyGraph {
    let grouped_config_maps: Vec<&ConfigMap> = config_maps
        .iter()
        .filter(|cm| in_grouping(&cm.labels, grouping_key))
        .collect();
    let grouped_secrets: Vec<&Secret> = secrets
        .iter()
        .filter(|s| in_grouping(&s.labels, grouping_key))
        .collect();

    if grouped_config_maps.is_empty() && grouped_secrets.is_empty() {
        tracing::debug!("No ConfigMaps or Secrets in grouping {}", grouping_key);
        return TopologyGraph::empty();
    }

    let mut graph = GraphAssembler::new();
    let mut connected: Vec<&Deployment> = Vec::new();

    for (row, config_map) in grouped_config_maps.iter().enumerate() {
        let node = config_map_node(
            config_map,
            Position::new(LEFT_X, TOP_Y + row as f64 * ROW_HEIGHT),
        )
        .with_detail("keys", keys_detail(config_map.data.len()));
        let node_id = node.id.clone();
        if graph.add_node(node) {
            connect_dependents(&mut graph, &mut connected, deployments, &node_id, |d| {
                d.references_config_map(&config_map.name)
            });
        }
    }

    for (index, secret) in grouped_secrets.iter().enumerate() {
        let row = grouped_config_maps.len() + index;
        let node = secret_node(secret, Position::new(LEFT_X, TOP_Y + row as f64 * ROW_HEIGHT))
            .with_detail("type", secret.secret_type.clone())
            .with_detail("keys", keys_detail(secret.keys.len()));
        let node_id = node.id.clone();
        if graph.add_node(node) {
            connect_dependents(&mut graph, &mut connected, deployments, &node_id, |d| {
                d.references_secret(&secret.name)
            });
        }
    }

    for (row, deployment) in connected.iter().enumerate() {
        graph.add_node(deployment_node(
            deployment,
            Position::new(RIGHT_X, TOP_Y + row as f64 * ROW_HEIGHT),
        ));
    }

    let graph = graph.finish();
    tracing::debug!(
        "Built config/secrets topology for {}: {} nodes, {} edges",
        grouping_key,
        graph.nodes.len(),
        graph.edges.len()
    );
    graph
}
