//! Resource records consumed by the topology builders
//!
//! These are flattened views of Kubernetes objects: only the fields the
//! dashboard displays or matches on. Every field has a default so partially
//! populated records (demo data, hand-written fixtures) deserialize cleanly.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Replica counters of a Deployment
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReplicaCounts {
    pub desired: i32,
    pub ready: i32,
    pub available: i32,
    pub unavailable: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Deployment {
    pub name: String,
    pub namespace: String,
    pub replicas: ReplicaCounts,
    /// Rollout condition: `Available`, `Progressing`, `Degraded`, ...
    pub status: String,
    pub age: String,
    pub labels: BTreeMap<String, String>,
    pub selector: BTreeMap<String, String>,
    pub strategy: String,
    /// Names of ConfigMaps mounted or referenced by the pod template
    pub config_maps: Vec<String>,
    /// Names of Secrets mounted or referenced by the pod template
    pub secrets: Vec<String>,
}

impl Deployment {
    pub fn references_config_map(&self, name: &str) -> bool {
        self.config_maps.iter().any(|cm| cm == name)
    }

    pub fn references_secret(&self, name: &str) -> bool {
        self.secrets.iter().any(|s| s == name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OwnerReference {
    pub kind: String,
    pub name: String,
    pub uid: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Container {
    pub name: String,
    pub image: String,
    pub ready: bool,
    pub restart_count: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Pod {
    pub name: String,
    pub namespace: String,
    /// Phase, or `CrashLoopBackOff` when a container is crash looping
    pub status: String,
    pub restart_count: i32,
    pub age: String,
    pub node_name: String,
    pub ip: String,
    pub containers: Vec<Container>,
    pub labels: BTreeMap<String, String>,
    pub owner_references: Vec<OwnerReference>,
    pub config_maps: Vec<String>,
    pub secrets: Vec<String>,
}

impl Pod {
    /// Value of the conventional `app` label
    pub fn app_label(&self) -> Option<&str> {
        self.labels.get("app").map(String::as_str)
    }

    pub fn is_running(&self) -> bool {
        self.status == "Running"
    }

    pub fn references_config_map(&self, name: &str) -> bool {
        self.config_maps.iter().any(|cm| cm == name)
    }

    pub fn references_secret(&self, name: &str) -> bool {
        self.secrets.iter().any(|s| s == name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfigMap {
    pub name: String,
    pub namespace: String,
    pub age: String,
    pub data: BTreeMap<String, String>,
    pub labels: BTreeMap<String, String>,
}

/// Secret metadata. Values are never carried, only key names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Secret {
    pub name: String,
    pub namespace: String,
    #[serde(rename = "type")]
    pub secret_type: String,
    pub age: String,
    pub keys: Vec<String>,
    pub labels: BTreeMap<String, String>,
}

/// Scale target of a HorizontalPodAutoscaler
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TargetRef {
    pub kind: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Hpa {
    pub name: String,
    pub namespace: String,
    pub target_ref: TargetRef,
    pub min_replicas: i32,
    pub max_replicas: i32,
    pub current_replicas: i32,
    pub desired_replicas: i32,
    pub age: String,
}

impl Hpa {
    pub fn targets_deployment(&self, deployment_name: &str) -> bool {
        self.target_ref.kind == "Deployment" && self.target_ref.name == deployment_name
    }
}
