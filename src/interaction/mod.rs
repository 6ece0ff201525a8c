//! Graph interaction
//!
//! Pointer-driven state over a built topology: hover with its connected-set
//! projection, click navigation and viewport re-fit scheduling.

mod engine;
pub mod navigation;
pub mod projection;

pub use engine::GraphInteraction;
pub use navigation::{Navigator, Route};
pub use projection::{
    Emphasis, HighlightStyle, ProjectedGraph, StyledEdge, StyledNode, connected_node_ids, project,
    project_with,
};
