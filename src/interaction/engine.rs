//! Live interaction state for one rendered graph
//!
//! [`GraphInteraction`] mirrors the last built [`TopologyGraph`] and holds
//! the ephemeral pointer state on top of it: the hovered node, the selected
//! node and a pending "fit to viewport" request. Rendering asks it for a
//! [`ProjectedGraph`]; the graph data is never rewritten by hover.

use super::navigation::{Navigator, Route};
use super::projection::{HighlightStyle, ProjectedGraph, connected_node_ids, project_with};
use crate::topology::{ResourceEdge, ResourceNode, TopologyGraph};
use std::collections::HashSet;

#[derive(Debug, Clone, Default)]
pub struct GraphInteraction {
    graph: TopologyGraph,
    hovered: Option<String>,
    selected: Option<String>,
    /// Bumped every time a different graph replaces the mirror
    generation: u64,
    fit_pending: bool,
    style: HighlightStyle,
}

impl GraphInteraction {
    pub fn new(graph: TopologyGraph) -> Self {
        Self {
            graph,
            fit_pending: true,
            ..Default::default()
        }
    }

    pub fn with_style(mut self, style: HighlightStyle) -> Self {
        self.style = style;
        self
    }

    pub fn style(&self) -> &HighlightStyle {
        &self.style
    }

    /// Re-synchronize with a freshly built graph
    ///
    /// Returns false, and changes nothing, when the graph equals the one
    /// already mirrored. Otherwise the mirror is replaced, a fit is
    /// scheduled, and hovered/selected ids that no longer exist are cleared.
    pub fn sync(&mut self, graph: &TopologyGraph) -> bool {
        if &self.graph == graph {
            return false;
        }
        self.replace(graph.clone());
        true
    }

    /// Replace the mirrored graph unconditionally
    pub fn replace(&mut self, graph: TopologyGraph) {
        self.graph = graph;
        self.generation += 1;
        self.fit_pending = true;

        let graph = &self.graph;
        if let Some(id) = self.hovered.take_if(|id| graph.node(id).is_none()) {
            tracing::debug!("Hovered node {} left the graph", id);
        }
        self.selected.take_if(|id| graph.node(id).is_none());
    }

    pub fn graph(&self) -> &TopologyGraph {
        &self.graph
    }

    pub fn nodes(&self) -> &[ResourceNode] {
        &self.graph.nodes
    }

    pub fn edges(&self) -> &[ResourceEdge] {
        &self.graph.edges
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn hovered_node_id(&self) -> Option<&str> {
        self.hovered.as_deref()
    }

    pub fn selected_node_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn hovered_node(&self) -> Option<&ResourceNode> {
        self.hovered.as_deref().and_then(|id| self.graph.node(id))
    }

    pub fn connected_node_ids(&self, node_id: &str) -> HashSet<&str> {
        connected_node_ids(&self.graph.edges, node_id)
    }

    pub fn on_node_mouse_enter(&mut self, node_id: &str) {
        if self.hovered.as_deref() != Some(node_id) {
            self.hovered = Some(node_id.to_string());
        }
    }

    pub fn on_node_mouse_leave(&mut self) {
        self.hovered = None;
    }

    /// Handle a click on a node
    ///
    /// The node becomes selected. Routable kinds are handed to the
    /// navigator using the node's label as the resource name; the route is
    /// returned for callers that want to act on it directly.
    pub fn on_node_click<N: Navigator + ?Sized>(
        &mut self,
        node_id: &str,
        navigator: &mut N,
    ) -> Option<Route> {
        let node = self.graph.node(node_id)?;
        let route = Route::for_node(node);
        self.selected = Some(node.id.clone());

        match &route {
            Some(route) => {
                tracing::debug!("Navigating to {}", route);
                navigator.navigate(route);
            }
            None => {
                tracing::debug!("{} nodes are not navigable", node.resource_type);
            }
        }
        route
    }

    /// Move keyboard focus to the next node, making it the hovered node
    pub fn select_next(&mut self) {
        self.step_focus(1);
    }

    pub fn select_previous(&mut self) {
        self.step_focus(-1);
    }

    fn step_focus(&mut self, step: isize) {
        let count = self.graph.nodes.len();
        if count == 0 {
            return;
        }
        let current = self
            .hovered
            .as_deref()
            .and_then(|id| self.graph.nodes.iter().position(|n| n.id == id));
        let next = match current {
            Some(index) => (index as isize + step).rem_euclid(count as isize) as usize,
            None if step < 0 => count - 1,
            None => 0,
        };
        self.hovered = Some(self.graph.nodes[next].id.clone());
    }

    pub fn styled(&self) -> ProjectedGraph<'_> {
        project_with(
            &self.graph.nodes,
            &self.graph.edges,
            self.hovered.as_deref(),
            &self.style,
        )
    }

    /// Ask for a fit on the next render regardless of graph changes
    pub fn request_fit(&mut self) {
        self.fit_pending = true;
    }

    /// Consume the pending fit request, if any
    pub fn take_fit_request(&mut self) -> bool {
        std::mem::take(&mut self.fit_pending)
    }
}
