//! Resource type definitions
//!
//! This module provides the closed set of Kubernetes kinds the topology
//! understands. Kinds outside the set are carried in [`ResourceType::Unknown`]
//! so icon, color and routing lookups can fall back instead of failing.

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Kubernetes resource kinds drawn in a topology graph
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ResourceType {
    Deployment,
    Pod,
    Service,
    ConfigMap,
    Secret,
    PersistentVolumeClaim,
    Hpa,
    /// Any kind outside the supported set, keeping the original string
    Unknown(String),
}

static KNOWN: [ResourceType; 7] = [
    ResourceType::Deployment,
    ResourceType::Pod,
    ResourceType::Service,
    ResourceType::ConfigMap,
    ResourceType::Secret,
    ResourceType::PersistentVolumeClaim,
    ResourceType::Hpa,
];

impl ResourceType {
    /// Get the display name as a string
    pub fn as_str(&self) -> &str {
        match self {
            ResourceType::Deployment => "Deployment",
            ResourceType::Pod => "Pod",
            ResourceType::Service => "Service",
            ResourceType::ConfigMap => "ConfigMap",
            ResourceType::Secret => "Secret",
            ResourceType::PersistentVolumeClaim => "PersistentVolumeClaim",
            ResourceType::Hpa => "HPA",
            ResourceType::Unknown(kind) => kind.as_str(),
        }
    }

    /// Short lowercase tag used as the node id prefix (`pod-web-abc123`)
    pub fn id_tag(&self) -> String {
        match self {
            ResourceType::Deployment => "deployment".to_string(),
            ResourceType::Pod => "pod".to_string(),
            ResourceType::Service => "service".to_string(),
            ResourceType::ConfigMap => "configmap".to_string(),
            ResourceType::Secret => "secret".to_string(),
            ResourceType::PersistentVolumeClaim => "pvc".to_string(),
            ResourceType::Hpa => "hpa".to_string(),
            ResourceType::Unknown(kind) => kind.to_lowercase(),
        }
    }

    /// Parse a kind string. Never fails: unrecognized kinds become `Unknown`.
    pub fn parse(s: &str) -> Self {
        match s {
            "Deployment" => ResourceType::Deployment,
            "Pod" => ResourceType::Pod,
            "Service" => ResourceType::Service,
            "ConfigMap" => ResourceType::ConfigMap,
            "Secret" => ResourceType::Secret,
            "PersistentVolumeClaim" => ResourceType::PersistentVolumeClaim,
            "HPA" | "HorizontalPodAutoscaler" => ResourceType::Hpa,
            other => ResourceType::Unknown(other.to_string()),
        }
    }

    /// All supported kinds, excluding `Unknown`
    pub fn known() -> &'static [Self] {
        &KNOWN
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, ResourceType::Unknown(_))
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<String> for ResourceType {
    fn from(s: String) -> Self {
        ResourceType::parse(&s)
    }
}

impl From<ResourceType> for String {
    fn from(kind: ResourceType) -> Self {
        kind.as_str().to_string()
    }
}

impl FromStr for ResourceType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ResourceType::parse(s))
    }
}
