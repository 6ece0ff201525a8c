//! Hover projection
//!
//! `project(nodes, edges, hovered)` derives the per-render visual weighting
//! of a graph without touching the graph itself. Nothing here holds state;
//! the hovered id lives in [`GraphInteraction`](super::GraphInteraction).

use crate::topology::{ResourceEdge, ResourceNode};
use std::collections::HashSet;

/// Ids of every node one edge away from `node_id`, in either direction
///
/// Recomputed on each call. The node itself is only included when it has a
/// self-loop.
pub fn connected_node_ids<'a>(edges: &'a [ResourceEdge], node_id: &str) -> HashSet<&'a str> {
    let mut connected = HashSet::new();
    for edge in edges {
        if edge.source == node_id {
            connected.insert(edge.target.as_str());
        }
        if edge.target == node_id {
            connected.insert(edge.source.as_str());
        }
    }
    connected
}

/// Visual weights applied by the projection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HighlightStyle {
    /// Opacity of nodes and edges outside the hovered neighbourhood
    pub dim_opacity: f64,
    pub stroke_width: f64,
    pub emphasized_stroke_width: f64,
}

impl Default for HighlightStyle {
    fn default() -> Self {
        Self {
            dim_opacity: 0.3,
            stroke_width: 1.0,
            emphasized_stroke_width: 2.0,
        }
    }
}

impl HighlightStyle {
    pub fn with_dim_opacity(mut self, opacity: f64) -> Self {
        self.dim_opacity = opacity.clamp(0.0, 1.0);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emphasis {
    /// Nothing is hovered
    Normal,
    Hovered,
    /// One edge away from the hovered node
    Connected,
    Dimmed,
}

impl Emphasis {
    pub fn is_dimmed(self) -> bool {
        self == Emphasis::Dimmed
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StyledNode<'a> {
    pub node: &'a ResourceNode,
    pub emphasis: Emphasis,
    pub opacity: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StyledEdge<'a> {
    pub edge: &'a ResourceEdge,
    /// Touches the hovered node
    pub emphasized: bool,
    pub opacity: f64,
    pub stroke_width: f64,
    /// The edge's own flag, forced on while its hovered endpoint is hovered
    pub animated: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedGraph<'a> {
    pub nodes: Vec<StyledNode<'a>>,
    pub edges: Vec<StyledEdge<'a>>,
}

/// Project a graph with the default [`HighlightStyle`]
pub fn project<'a>(
    nodes: &'a [ResourceNode],
    edges: &'a [ResourceEdge],
    hovered: Option<&str>,
) -> ProjectedGraph<'a> {
    project_with(nodes, edges, hovered, &HighlightStyle::default())
}

/// Project a graph for the given hovered node
///
/// With nothing hovered every node and edge keeps full opacity and its own
/// `animated` flag. With a hovered node, that node and its connected set
/// stay opaque while everything else is dimmed; edges touching the hovered
/// node are emphasized and animated, all other edges are dimmed.
pub fn project_with<'a>(
    nodes: &'a [ResourceNode],
    edges: &'a [ResourceEdge],
    hovered: Option<&str>,
    style: &HighlightStyle,
) -> ProjectedGraph<'a> {
    let Some(hovered_id) = hovered else {
        return ProjectedGraph {
            nodes: nodes
                .iter()
                .map(|node| StyledNode {
                    node,
                    emphasis: Emphasis::Normal,
                    opacity: 1.0,
                })
                .collect(),
            edges: edges
                .iter()
                .map(|edge| StyledEdge {
                    edge,
                    emphasized: false,
                    opacity: 1.0,
                    stroke_width: style.stroke_width,
                    animated: edge.animated,
                })
                .collect(),
        };
    };

    let connected = connected_node_ids(edges, hovered_id);

    let nodes = nodes
        .iter()
        .map(|node| {
            let emphasis = if node.id == hovered_id {
                Emphasis::Hovered
            } else if connected.contains(node.id.as_str()) {
                Emphasis::Connected
            } else {
                Emphasis::Dimmed
            };
            let opacity = if emphasis.is_dimmed() {
                style.dim_opacity
            } else {
                1.0
            };
            StyledNode {
                node,
                emphasis,
                opacity,
            }
        })
        .collect();

    let edges = edges
        .iter()
        .map(|edge| {
            if edge.touches(hovered_id) {
                StyledEdge {
                    edge,
                    emphasized: true,
                    opacity: 1.0,
                    stroke_width: style.emphasized_stroke_width,
                    animated: true,
                }
            } else {
                StyledEdge {
                    edge,
                    emphasized: false,
                    opacity: style.dim_opacity,
                    stroke_width: style.stroke_width,
                    animated: edge.animated,
                }
            }
        })
        .collect();

    ProjectedGraph { nodes, edges }
}
