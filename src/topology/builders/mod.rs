//! Topology builders
//!
//! One pure function per view. Each takes already-fetched resource
//! collections and returns a fresh [`TopologyGraph`] with every node placed
//! on a fixed grid: dependencies on the left, the focal resource in the
//! middle, dependents on the right. Siblings stack downwards in input order.
//!
//! Edges always point from the dependency (ConfigMap, Secret, HPA) to the
//! dependent, and from a Deployment to its Pods.

mod config_secrets;
mod deployment;
mod namespace;
mod pod;

pub use config_secrets::build_config_secrets_topology;
pub use deployment::build_deployment_topology;
pub use namespace::build_namespace_topology;
pub use pod::build_pod_topology;

use crate::models::{ConfigMap, Deployment, Hpa, Pod, ResourceType, Secret};
use crate::topology::graph::{Position, ResourceNode};
use crate::topology::status::Health;

/// Label Flux stamps on objects applied by a Kustomization
pub const FLUX_NAMESPACE_LABEL: &str = "kustomize.toolkit.fluxcd.io/namespace";

/// Whether a pod belongs to a deployment
///
/// A pod matches when it is owned by a ReplicaSet named `{deployment}-...`,
/// or, as a fallback, when its `app` label equals the deployment name.
pub fn pod_belongs_to_deployment(pod: &Pod, deployment: &Deployment) -> bool {
    let prefix = format!("{}-", deployment.name);
    let owned = pod
        .owner_references
        .iter()
        .any(|owner| owner.kind == "ReplicaSet" && owner.name.starts_with(&prefix));
    owned || pod.app_label() == Some(deployment.name.as_str())
}

fn deployment_node(deployment: &Deployment, position: Position) -> ResourceNode {
    ResourceNode::new(
        ResourceType::Deployment,
        &deployment.name,
        &deployment.namespace,
        deployment.health(),
        position,
    )
}

fn replicas_detail(deployment: &Deployment) -> String {
    format!(
        "{}/{}",
        deployment.replicas.ready, deployment.replicas.desired
    )
}

fn pod_node(pod: &Pod, position: Position) -> ResourceNode {
    ResourceNode::new(
        ResourceType::Pod,
        &pod.name,
        &pod.namespace,
        pod.health(),
        position,
    )
}

fn config_map_node(config_map: &ConfigMap, position: Position) -> ResourceNode {
    ResourceNode::new(
        ResourceType::ConfigMap,
        &config_map.name,
        &config_map.namespace,
        config_map.health(),
        position,
    )
}

fn secret_node(secret: &Secret, position: Position) -> ResourceNode {
    ResourceNode::new(
        ResourceType::Secret,
        &secret.name,
        &secret.namespace,
        secret.health(),
        position,
    )
}

fn hpa_node(hpa: &Hpa, position: Position) -> ResourceNode {
    ResourceNode::new(
        ResourceType::Hpa,
        &hpa.name,
        &hpa.namespace,
        hpa.health(),
        position,
    )
    .with_detail("min", hpa.min_replicas.to_string())
    .with_detail("max", hpa.max_replicas.to_string())
    .with_detail("current", hpa.current_replicas.to_string())
}

fn keys_detail(count: usize) -> String {
    format!("{} keys", count)
}
