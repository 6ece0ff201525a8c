//! Graph data structures for resource topology
//!
//! A topology is a plain `{nodes, edges}` value. Builders assemble it through
//! [`GraphAssembler`], which keeps node ids unique and drops any edge whose
//! endpoints were never added.

use crate::models::{HealthStatus, ResourceType};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// Position of a node in graph space, assigned by the builder
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Attachment side of an edge on a node. Layout only, no semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HandlePosition {
    Top,
    Bottom,
    Left,
    Right,
}

/// A resource drawn in the topology
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceNode {
    /// Unique per graph, `{resourceTypeTag}-{resourceName}`
    pub id: String,
    pub position: Position,
    pub resource_type: ResourceType,
    /// Display name (the resource's name)
    pub label: String,
    pub status: HealthStatus,
    pub namespace: String,
    /// Short key/value lines shown inside the node, in display order
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<(String, String)>,
}

impl ResourceNode {
    pub fn new(
        resource_type: ResourceType,
        name: &str,
        namespace: &str,
        status: HealthStatus,
        position: Position,
    ) -> Self {
        Self {
            id: Self::node_id(&resource_type, name),
            position,
            resource_type,
            label: name.to_string(),
            status,
            namespace: namespace.to_string(),
            details: Vec::new(),
        }
    }

    /// Conventional node id for a resource
    pub fn node_id(resource_type: &ResourceType, name: &str) -> String {
        format!("{}-{}", resource_type.id_tag(), name)
    }

    /// Override the conventional id (used for sub-nodes such as containers)
    pub fn with_id(mut self, id: String) -> Self {
        self.id = id;
        self
    }

    pub fn with_detail(mut self, key: &str, value: impl Into<String>) -> Self {
        self.details.push((key.to_string(), value.into()));
        self
    }

    pub fn detail(&self, key: &str) -> Option<&str> {
        self.details
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// A directed relationship: source provides to, or owns, target
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceEdge {
    /// `{sourceId}-{targetId}`
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_handle: Option<HandlePosition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_handle: Option<HandlePosition>,
    /// The relationship is live (e.g. its target is running)
    pub animated: bool,
}

impl ResourceEdge {
    pub fn new(source: &str, target: &str, animated: bool) -> Self {
        Self {
            id: format!("{}-{}", source, target),
            source: source.to_string(),
            target: target.to_string(),
            source_handle: None,
            target_handle: None,
            animated,
        }
    }

    pub fn with_handles(mut self, source: HandlePosition, target: HandlePosition) -> Self {
        self.source_handle = Some(source);
        self.target_handle = Some(target);
        self
    }

    /// Whether this edge starts or ends at the given node
    pub fn touches(&self, node_id: &str) -> bool {
        self.source == node_id || self.target == node_id
    }
}

/// The `{nodes, edges}` value describing one view
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct TopologyGraph {
    pub nodes: Vec<ResourceNode>,
    pub edges: Vec<ResourceEdge>,
}

impl TopologyGraph {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: &str) -> Option<&ResourceNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Bounding box of all node positions as (min, max)
    pub fn bounds(&self) -> Option<(Position, Position)> {
        let first = self.nodes.first()?.position;
        let (min, max) = self
            .nodes
            .iter()
            .fold((first, first), |(min, max), node| {
                (
                    Position::new(min.x.min(node.position.x), min.y.min(node.position.y)),
                    Position::new(max.x.max(node.position.x), max.y.max(node.position.y)),
                )
            });
        Some((min, max))
    }
}

/// Incremental builder for a [`TopologyGraph`]
///
/// Node ids stay unique (the first node with an id wins) and `finish` drops
/// edges that reference a node not present in the graph.
#[derive(Debug, Default)]
pub(crate) struct GraphAssembler {
    nodes: Vec<ResourceNode>,
    edges: Vec<ResourceEdge>,
    node_index: HashMap<String, usize>,
    edge_ids: HashSet<String>,
}

impl GraphAssembler {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Add a node. Returns false if a node with the same id already exists.
    pub(crate) fn add_node(&mut self, node: ResourceNode) -> bool {
        if self.node_index.contains_key(&node.id) {
            tracing::debug!("Skipping duplicate topology node {}", node.id);
            return false;
        }
        self.node_index.insert(node.id.clone(), self.nodes.len());
        self.nodes.push(node);
        true
    }

    pub(crate) fn add_edge(&mut self, edge: ResourceEdge) {
        if self.edge_ids.insert(edge.id.clone()) {
            self.edges.push(edge);
        }
    }

    pub(crate) fn finish(self) -> TopologyGraph {
        let GraphAssembler {
            nodes,
            mut edges,
            node_index,
            ..
        } = self;

        edges.retain(|edge| {
            let keep =
                node_index.contains_key(&edge.source) && node_index.contains_key(&edge.target);
            if !keep {
                tracing::warn!("Dropping dangling topology edge {}", edge.id);
            }
            keep
        });

        TopologyGraph { nodes, edges }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(kind: ResourceType, name: &str) -> ResourceNode {
        ResourceNode::new(
            kind,
            name,
            "default",
            HealthStatus::Healthy,
            Position::default(),
        )
    }

    #[test]
    fn test_node_id_convention() {
        let pod = node(ResourceType::Pod, "web-app-abc123");
        assert_eq!(pod.id, "pod-web-app-abc123");
        assert_eq!(pod.label, "web-app-abc123");
    }

    #[test]
    fn test_edge_id_convention() {
        let edge = ResourceEdge::new("configmap-app", "deployment-web", false);
        assert_eq!(edge.id, "configmap-app-deployment-web");
        assert!(edge.touches("deployment-web"));
        assert!(!edge.touches("pod-web"));
    }

    #[test]
    fn test_assembler_skips_duplicate_nodes() {
        let mut assembler = GraphAssembler::new();
        assert!(assembler.add_node(node(ResourceType::Pod, "a")));
        assert!(!assembler.add_node(node(ResourceType::Pod, "a")));
        assert_eq!(assembler.finish().nodes.len(), 1);
    }

    #[test]
    fn test_assembler_drops_dangling_edges() {
        let mut assembler = GraphAssembler::new();
        assembler.add_node(node(ResourceType::Deployment, "web"));
        assembler.add_node(node(ResourceType::Pod, "web-1"));
        assembler.add_edge(ResourceEdge::new("deployment-web", "pod-web-1", true));
        assembler.add_edge(ResourceEdge::new("deployment-web", "pod-missing", true));
        assembler.add_edge(ResourceEdge::new("deployment-web", "pod-web-1", true));

        let graph = assembler.finish();
        assert_eq!(graph.edges.len(), 1);
        assert_eq!(graph.edges[0].target, "pod-web-1");
    }

    #[test]
    fn test_bounds() {
        let mut graph = TopologyGraph::empty();
        assert!(graph.bounds().is_none());

        let mut a = node(ResourceType::Pod, "a");
        a.position = Position::new(50.0, 300.0);
        let mut b = node(ResourceType::Pod, "b");
        b.position = Position::new(950.0, 50.0);
        graph.nodes = vec![a, b];

        let (min, max) = graph.bounds().unwrap();
        assert_eq!(min, Position::new(50.0, 50.0));
        assert_eq!(max, Position::new(950.0, 300.0));
    }
}
