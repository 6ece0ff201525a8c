//! Graph-space to terminal-cell transform
//!
//! Builders place nodes in an abstract pixel space. The viewport maps that
//! space onto the graph area with a uniform zoom `k` and an offset, squashing
//! the vertical axis by [`CELL_ASPECT`] so distances look right on screen.
//! Node boxes keep a fixed cell size at every zoom level.

use super::constants::{
    CELL_ASPECT, DEFAULT_ZOOM, FIT_PADDING_COLS, FIT_PADDING_ROWS, MAX_ZOOM, MIN_ZOOM, NODE_HEIGHT,
    NODE_WIDTH,
};
use crate::topology::{Position, ResourceNode, TopologyGraph};
use ratatui::layout::Rect;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Column of graph-space x = 0, relative to the graph area
    pub x: f64,
    /// Row of graph-space y = 0, relative to the graph area
    pub y: f64,
    pub k: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            x: FIT_PADDING_COLS,
            y: FIT_PADDING_ROWS,
            k: DEFAULT_ZOOM,
        }
    }
}

impl Viewport {
    /// Cell coordinates of a graph position, relative to the area origin
    pub fn to_screen(&self, position: Position) -> (f64, f64) {
        (
            position.x * self.k + self.x,
            position.y * self.k * CELL_ASPECT + self.y,
        )
    }

    pub fn to_graph(&self, col: f64, row: f64) -> Position {
        Position::new(
            (col - self.x) / self.k,
            (row - self.y) / (self.k * CELL_ASPECT),
        )
    }

    /// Scale and center so every node box fits inside a `width` x `height` area
    pub fn fit(&mut self, graph: &TopologyGraph, width: u16, height: u16) {
        let Some((min, max)) = graph.bounds() else {
            *self = Self::default();
            return;
        };

        let avail_w = (f64::from(width) - f64::from(NODE_WIDTH) - 2.0 * FIT_PADDING_COLS).max(1.0);
        let avail_h =
            (f64::from(height) - f64::from(NODE_HEIGHT) - 2.0 * FIT_PADDING_ROWS).max(1.0);
        let span_x = max.x - min.x;
        let span_y = (max.y - min.y) * CELL_ASPECT;

        let kx = if span_x > 0.0 { avail_w / span_x } else { MAX_ZOOM };
        let ky = if span_y > 0.0 { avail_h / span_y } else { MAX_ZOOM };
        let k = kx.min(ky).clamp(MIN_ZOOM, MAX_ZOOM);

        self.k = k;
        self.x = FIT_PADDING_COLS + (avail_w - span_x * k).max(0.0) / 2.0 - min.x * k;
        self.y = FIT_PADDING_ROWS + (avail_h - span_y * k).max(0.0) / 2.0
            - min.y * k * CELL_ASPECT;
    }

    /// Zoom by `factor`, keeping the graph point under (`col`, `row`) in place
    pub fn zoom_at(&mut self, factor: f64, col: f64, row: f64) {
        let k = (self.k * factor).clamp(MIN_ZOOM, MAX_ZOOM);
        let ratio = k / self.k;
        self.x = col - (col - self.x) * ratio;
        self.y = row - (row - self.y) * ratio;
        self.k = k;
    }

    pub fn pan(&mut self, cols: f64, rows: f64) {
        self.x += cols;
        self.y += rows;
    }

    /// Unclipped box of a node in absolute cell coordinates
    fn node_box(&self, node: &ResourceNode, area: Rect) -> (i32, i32, i32, i32) {
        let (col, row) = self.to_screen(node.position);
        let left = i32::from(area.x) + col.round() as i32;
        let top = i32::from(area.y) + row.round() as i32;
        (
            left,
            top,
            left + i32::from(NODE_WIDTH),
            top + i32::from(NODE_HEIGHT),
        )
    }

    /// The node's box clipped to `area`, or None when it is off screen
    pub fn node_rect(&self, node: &ResourceNode, area: Rect) -> Option<Rect> {
        let (left, top, right, bottom) = self.node_box(node, area);
        let left = left.max(i32::from(area.x));
        let top = top.max(i32::from(area.y));
        let right = right.min(i32::from(area.right()));
        let bottom = bottom.min(i32::from(area.bottom()));
        if left >= right || top >= bottom {
            return None;
        }
        Some(Rect::new(
            left as u16,
            top as u16,
            (right - left) as u16,
            (bottom - top) as u16,
        ))
    }

    /// Center of the node's box relative to the area origin, in cells
    pub fn node_center(&self, node: &ResourceNode) -> (f64, f64) {
        let (col, row) = self.to_screen(node.position);
        (
            col.round() + f64::from(NODE_WIDTH) / 2.0,
            row.round() + f64::from(NODE_HEIGHT) / 2.0,
        )
    }

    /// Topmost node under an absolute terminal cell
    ///
    /// Nodes are drawn in order, so later nodes win where boxes overlap.
    pub fn node_at<'a>(
        &self,
        nodes: &'a [ResourceNode],
        area: Rect,
        column: u16,
        row: u16,
    ) -> Option<&'a ResourceNode> {
        nodes.iter().rev().find(|node| {
            self.node_rect(node, area).is_some_and(|rect| {
                column >= rect.x && column < rect.right() && row >= rect.y && row < rect.bottom()
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{HealthStatus, ResourceType};

    fn node_at(name: &str, x: f64, y: f64) -> ResourceNode {
        ResourceNode::new(
            ResourceType::Pod,
            name,
            "default",
            HealthStatus::Healthy,
            Position::new(x, y),
        )
    }

    fn graph(nodes: Vec<ResourceNode>) -> TopologyGraph {
        TopologyGraph {
            nodes,
            edges: Vec::new(),
        }
    }

    #[test]
    fn test_fit_keeps_every_node_inside() {
        let g = graph(vec![
            node_at("a", 50.0, 50.0),
            node_at("b", 950.0, 50.0),
            node_at("c", 500.0, 700.0),
        ]);
        let area = Rect::new(0, 0, 120, 40);
        let mut viewport = Viewport::default();
        viewport.fit(&g, area.width, area.height);

        for node in &g.nodes {
            let rect = viewport.node_rect(node, area).unwrap();
            assert_eq!(rect.width, NODE_WIDTH, "{} clipped", node.id);
            assert_eq!(rect.height, NODE_HEIGHT, "{} clipped", node.id);
        }
    }

    #[test]
    fn test_fit_empty_graph_resets() {
        let mut viewport = Viewport {
            x: 40.0,
            y: -3.0,
            k: 0.3,
        };
        viewport.fit(&TopologyGraph::empty(), 80, 24);
        assert_eq!(viewport, Viewport::default());
    }

    #[test]
    fn test_zoom_keeps_anchor_fixed() {
        let mut viewport = Viewport::default();
        let before = viewport.to_graph(30.0, 10.0);
        viewport.zoom_at(1.25, 30.0, 10.0);
        let after = viewport.to_graph(30.0, 10.0);
        assert!((before.x - after.x).abs() < 1e-9);
        assert!((before.y - after.y).abs() < 1e-9);
        assert!(viewport.k > DEFAULT_ZOOM);
    }

    #[test]
    fn test_zoom_is_clamped() {
        let mut viewport = Viewport::default();
        for _ in 0..50 {
            viewport.zoom_at(0.5, 0.0, 0.0);
        }
        assert_eq!(viewport.k, MIN_ZOOM);
    }

    #[test]
    fn test_hit_testing() {
        let nodes = vec![node_at("a", 0.0, 0.0), node_at("b", 400.0, 0.0)];
        let area = Rect::new(5, 2, 100, 30);
        let viewport = Viewport {
            x: 0.0,
            y: 0.0,
            k: 0.1,
        };
        // "b" sits at column 40 of the area
        assert_eq!(
            viewport.node_at(&nodes, area, 5, 2).map(|n| n.label.as_str()),
            Some("a")
        );
        assert_eq!(
            viewport.node_at(&nodes, area, 46, 3).map(|n| n.label.as_str()),
            Some("b")
        );
        assert!(viewport.node_at(&nodes, area, 5, 20).is_none());
    }

    #[test]
    fn test_off_screen_node_has_no_rect() {
        let viewport = Viewport {
            x: -500.0,
            y: 0.0,
            k: 0.1,
        };
        assert!(
            viewport
                .node_rect(&node_at("a", 0.0, 0.0), Rect::new(0, 0, 80, 24))
                .is_none()
        );
    }
}
