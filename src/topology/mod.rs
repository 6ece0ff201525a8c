//! Resource topology
//!
//! Status mapping, the graph value types and the four view builders.

pub mod builders;
pub mod graph;
pub mod status;

pub use builders::{
    FLUX_NAMESPACE_LABEL, build_config_secrets_topology, build_deployment_topology,
    build_namespace_topology, build_pod_topology, pod_belongs_to_deployment,
};
pub use graph::{HandlePosition, Position, ResourceEdge, ResourceNode, TopologyGraph};
pub use status::{Health, map_status};
