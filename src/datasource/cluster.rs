//! Live cluster data through kube-rs
//!
//! Objects are listed with typed `Api`s, serialized to JSON and flattened
//! into records by the `*_from_json` converters. The converters are pure so
//! they can be exercised with hand-written manifests.
//!
//! Secret values are never copied into records, only their key names.

use super::{
    DataMode, DataSourceError, DataSourceResult, ResourceProvider, ResourceSnapshot, format_age,
};
use crate::models::{
    ConfigMap, Container, Deployment, Hpa, OwnerReference, Pod, ReplicaCounts, Secret, TargetRef,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use k8s_openapi::api::apps::v1::Deployment as K8sDeployment;
use k8s_openapi::api::autoscaling::v2::HorizontalPodAutoscaler;
use k8s_openapi::api::core::v1::{
    ConfigMap as K8sConfigMap, Pod as K8sPod, Secret as K8sSecret,
};
use kube::api::ListParams;
use kube::{Api, ResourceExt};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

fn str_at<'a>(value: &'a Value, pointer: &str) -> Option<&'a str> {
    value.pointer(pointer).and_then(Value::as_str)
}

fn i32_at(value: &Value, pointer: &str) -> Option<i32> {
    value
        .pointer(pointer)
        .and_then(Value::as_i64)
        .and_then(|n| i32::try_from(n).ok())
}

fn array_at<'a>(value: &'a Value, pointer: &str) -> &'a [Value] {
    value
        .pointer(pointer)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

fn string_map_at(value: &Value, pointer: &str) -> BTreeMap<String, String> {
    value
        .pointer(pointer)
        .and_then(Value::as_object)
        .map(|map| {
            map.iter()
                .filter_map(|(k, v)| v.as_str().map(|v| (k.clone(), v.to_string())))
                .collect()
        })
        .unwrap_or_default()
}

fn required_name(value: &Value, kind: &'static str) -> DataSourceResult<String> {
    str_at(value, "/metadata/name")
        .map(str::to_string)
        .ok_or_else(|| DataSourceError::Conversion {
            kind,
            name: "<unnamed>".to_string(),
            reason: "metadata.name is missing".to_string(),
        })
}

fn age_at(value: &Value, now: DateTime<Utc>) -> String {
    str_at(value, "/metadata/creationTimestamp")
        .and_then(|ts| DateTime::parse_from_rfc3339(ts).ok())
        .map(|created| format_age(now - created.with_timezone(&Utc)))
        .unwrap_or_default()
}

fn push_unique(names: &mut Vec<String>, name: Option<&str>) {
    let Some(name) = name.filter(|n| !n.is_empty()) else {
        return;
    };
    if !names.iter().any(|n| n == name) {
        names.push(name.to_string());
    }
}

/// ConfigMap and Secret names a pod spec refers to
///
/// Looks at `envFrom`, `env[].valueFrom` of every container and init
/// container, at `configMap`, `secret` and projected volumes, and at
/// `imagePullSecrets`.
fn pod_spec_references(spec: &Value) -> (Vec<String>, Vec<String>) {
    let mut config_maps = Vec::new();
    let mut secrets = Vec::new();

    let containers = array_at(spec, "/containers")
        .iter()
        .chain(array_at(spec, "/initContainers"));
    for container in containers {
        for source in array_at(container, "/envFrom") {
            push_unique(&mut config_maps, str_at(source, "/configMapRef/name"));
            push_unique(&mut secrets, str_at(source, "/secretRef/name"));
        }
        for env in array_at(container, "/env") {
            push_unique(
                &mut config_maps,
                str_at(env, "/valueFrom/configMapKeyRef/name"),
            );
            push_unique(&mut secrets, str_at(env, "/valueFrom/secretKeyRef/name"));
        }
    }

    for volume in array_at(spec, "/volumes") {
        push_unique(&mut config_maps, str_at(volume, "/configMap/name"));
        push_unique(&mut secrets, str_at(volume, "/secret/secretName"));
        for source in array_at(volume, "/projected/sources") {
            push_unique(&mut config_maps, str_at(source, "/configMap/name"));
            push_unique(&mut secrets, str_at(source, "/secret/name"));
        }
    }

    for pull_secret in array_at(spec, "/imagePullSecrets") {
        push_unique(&mut secrets, str_at(pull_secret, "/name"));
    }

    (config_maps, secrets)
}

/// Rollout condition derived from replica counters
fn deployment_status(replicas: &ReplicaCounts) -> &'static str {
    if replicas.unavailable > 0 {
        "Degraded"
    } else if replicas.ready < replicas.desired {
        "Progressing"
    } else {
        "Available"
    }
}

pub fn deployment_from_json(value: &Value, now: DateTime<Utc>) -> DataSourceResult<Deployment> {
    let name = required_name(value, "Deployment")?;
    let desired = i32_at(value, "/spec/replicas").unwrap_or(1);
    let ready = i32_at(value, "/status/readyReplicas").unwrap_or(0);
    let replicas = ReplicaCounts {
        desired,
        ready,
        available: i32_at(value, "/status/availableReplicas").unwrap_or(0),
        unavailable: i32_at(value, "/status/unavailableReplicas").unwrap_or(0),
    };
    let (config_maps, secrets) = value
        .pointer("/spec/template/spec")
        .map(pod_spec_references)
        .unwrap_or_default();

    Ok(Deployment {
        namespace: str_at(value, "/metadata/namespace")
            .unwrap_or_default()
            .to_string(),
        status: deployment_status(&replicas).to_string(),
        replicas,
        age: age_at(value, now),
        labels: string_map_at(value, "/metadata/labels"),
        selector: string_map_at(value, "/spec/selector/matchLabels"),
        strategy: str_at(value, "/spec/strategy/type")
            .unwrap_or("RollingUpdate")
            .to_string(),
        config_maps,
        secrets,
        name,
    })
}

fn container_from_status(status: &Value) -> Container {
    Container {
        name: str_at(status, "/name").unwrap_or_default().to_string(),
        image: str_at(status, "/image").unwrap_or_default().to_string(),
        ready: status
            .pointer("/ready")
            .and_then(Value::as_bool)
            .unwrap_or(false),
        restart_count: i32_at(status, "/restartCount").unwrap_or(0),
    }
}

fn container_from_spec(spec: &Value) -> Container {
    Container {
        name: str_at(spec, "/name").unwrap_or_default().to_string(),
        image: str_at(spec, "/image").unwrap_or_default().to_string(),
        ready: false,
        restart_count: 0,
    }
}

pub fn pod_from_json(value: &Value, now: DateTime<Utc>) -> DataSourceResult<Pod> {
    let name = required_name(value, "Pod")?;
    let statuses = array_at(value, "/status/containerStatuses");

    let crash_looping = statuses
        .iter()
        .any(|s| str_at(s, "/state/waiting/reason") == Some("CrashLoopBackOff"));
    let status = if crash_looping {
        "CrashLoopBackOff"
    } else {
        str_at(value, "/status/phase").unwrap_or("Unknown")
    };

    let containers: Vec<Container> = if statuses.is_empty() {
        array_at(value, "/spec/containers")
            .iter()
            .map(container_from_spec)
            .collect()
    } else {
        statuses.iter().map(container_from_status).collect()
    };

    let owner_references = array_at(value, "/metadata/ownerReferences")
        .iter()
        .map(|owner| OwnerReference {
            kind: str_at(owner, "/kind").unwrap_or_default().to_string(),
            name: str_at(owner, "/name").unwrap_or_default().to_string(),
            uid: str_at(owner, "/uid").unwrap_or_default().to_string(),
        })
        .collect();

    let (config_maps, secrets) = value
        .pointer("/spec")
        .map(pod_spec_references)
        .unwrap_or_default();

    Ok(Pod {
        namespace: str_at(value, "/metadata/namespace")
            .unwrap_or_default()
            .to_string(),
        status: status.to_string(),
        restart_count: containers.iter().map(|c| c.restart_count).sum(),
        age: age_at(value, now),
        node_name: str_at(value, "/spec/nodeName")
            .unwrap_or_default()
            .to_string(),
        ip: str_at(value, "/status/podIP").unwrap_or_default().to_string(),
        containers,
        labels: string_map_at(value, "/metadata/labels"),
        owner_references,
        config_maps,
        secrets,
        name,
    })
}

pub fn config_map_from_json(value: &Value, now: DateTime<Utc>) -> DataSourceResult<ConfigMap> {
    let name = required_name(value, "ConfigMap")?;
    let mut data = string_map_at(value, "/data");
    // Binary entries show up by key only
    if let Some(binary) = value.pointer("/binaryData").and_then(Value::as_object) {
        for key in binary.keys() {
            data.entry(key.clone())
                .or_insert_with(|| "<binary>".to_string());
        }
    }

    Ok(ConfigMap {
        namespace: str_at(value, "/metadata/namespace")
            .unwrap_or_default()
            .to_string(),
        age: age_at(value, now),
        data,
        labels: string_map_at(value, "/metadata/labels"),
        name,
    })
}

pub fn secret_from_json(value: &Value, now: DateTime<Utc>) -> DataSourceResult<Secret> {
    let name = required_name(value, "Secret")?;
    let mut keys: Vec<String> = ["/data", "/stringData"]
        .iter()
        .filter_map(|pointer| value.pointer(pointer).and_then(Value::as_object))
        .flat_map(|map| map.keys().cloned())
        .collect();
    keys.sort();
    keys.dedup();

    Ok(Secret {
        namespace: str_at(value, "/metadata/namespace")
            .unwrap_or_default()
            .to_string(),
        secret_type: str_at(value, "/type").unwrap_or("Opaque").to_string(),
        age: age_at(value, now),
        keys,
        labels: string_map_at(value, "/metadata/labels"),
        name,
    })
}

pub fn hpa_from_json(value: &Value, now: DateTime<Utc>) -> DataSourceResult<Hpa> {
    let name = required_name(value, "HorizontalPodAutoscaler")?;
    Ok(Hpa {
        namespace: str_at(value, "/metadata/namespace")
            .unwrap_or_default()
            .to_string(),
        target_ref: TargetRef {
            kind: str_at(value, "/spec/scaleTargetRef/kind")
                .unwrap_or_default()
                .to_string(),
            name: str_at(value, "/spec/scaleTargetRef/name")
                .unwrap_or_default()
                .to_string(),
        },
        min_replicas: i32_at(value, "/spec/minReplicas").unwrap_or(1),
        max_replicas: i32_at(value, "/spec/maxReplicas").unwrap_or(0),
        current_replicas: i32_at(value, "/status/currentReplicas").unwrap_or(0),
        desired_replicas: i32_at(value, "/status/desiredReplicas").unwrap_or(0),
        age: age_at(value, now),
        name,
    })
}

fn convert_all<K, T>(
    kind: &'static str,
    items: Vec<K>,
    now: DateTime<Utc>,
    convert: fn(&Value, DateTime<Utc>) -> DataSourceResult<T>,
) -> DataSourceResult<Vec<T>>
where
    K: Serialize + ResourceExt,
{
    items
        .iter()
        .map(|item| {
            let value = serde_json::to_value(item).map_err(|e| DataSourceError::Conversion {
                kind,
                name: item.name_any(),
                reason: e.to_string(),
            })?;
            convert(&value, now)
        })
        .collect()
}

/// Lists resources from the current kubeconfig context
#[derive(Clone)]
pub struct ClusterProvider {
    client: kube::Client,
}

impl ClusterProvider {
    pub fn new(client: kube::Client) -> Self {
        Self { client }
    }

    /// Connect using the kubeconfig, optionally with an explicit context
    pub async fn connect(context: Option<&str>) -> anyhow::Result<Self> {
        let client = crate::kube::create_client(context).await?;
        Ok(Self::new(client))
    }
}

#[async_trait]
impl ResourceProvider for ClusterProvider {
    fn mode(&self) -> DataMode {
        DataMode::Cluster
    }

    async fn fetch(&self, namespace: &str) -> DataSourceResult<ResourceSnapshot> {
        let deployments: Api<K8sDeployment> = Api::namespaced(self.client.clone(), namespace);
        let pods: Api<K8sPod> = Api::namespaced(self.client.clone(), namespace);
        let config_maps: Api<K8sConfigMap> = Api::namespaced(self.client.clone(), namespace);
        let secrets: Api<K8sSecret> = Api::namespaced(self.client.clone(), namespace);
        let hpas: Api<HorizontalPodAutoscaler> = Api::namespaced(self.client.clone(), namespace);

        let params = ListParams::default();
        let (deployment_list, pod_list, config_map_list, secret_list, hpa_list) = futures::try_join!(
            deployments.list(&params),
            pods.list(&params),
            config_maps.list(&params),
            secrets.list(&params),
            hpas.list(&params)
        )?;

        let now = Utc::now();
        let snapshot = ResourceSnapshot {
            namespace: namespace.to_string(),
            deployments: convert_all(
                "Deployment",
                deployment_list.items,
                now,
                deployment_from_json,
            )?,
            pods: convert_all("Pod", pod_list.items, now, pod_from_json)?,
            config_maps: convert_all(
                "ConfigMap",
                config_map_list.items,
                now,
                config_map_from_json,
            )?,
            secrets: convert_all("Secret", secret_list.items, now, secret_from_json)?,
            hpas: convert_all(
                "HorizontalPodAutoscaler",
                hpa_list.items,
                now,
                hpa_from_json,
            )?,
        };

        tracing::info!(
            "Fetched {} resources from namespace {}",
            snapshot.resource_count(),
            namespace
        );
        Ok(snapshot)
    }
}
