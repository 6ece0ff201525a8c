//! Tests for the demo provider, its cache, and live-object conversion

use chrono::{TimeZone, Utc};
use kubetopo::datasource::{
    DataMode, DemoCache, ResourceProvider, create_provider, deployment_from_json,
    generate_demo_snapshot, pod_from_json,
};
use kubetopo::models::HealthStatus;
use kubetopo::topology::build_deployment_topology;
use serde_json::json;
use std::sync::Arc;
use tokio::sync::Mutex;

fn shared_cache() -> Arc<Mutex<DemoCache>> {
    Arc::new(Mutex::new(DemoCache::new()))
}

#[test]
fn test_demo_data_depends_only_on_namespace() {
    assert_eq!(generate_demo_snapshot("shop"), generate_demo_snapshot("shop"));
    assert_ne!(generate_demo_snapshot("shop"), generate_demo_snapshot("billing"));
}

#[test]
fn test_demo_data_builds_connected_deployments() {
    let snapshot = generate_demo_snapshot("shop");
    for deployment in &snapshot.deployments {
        let graph = build_deployment_topology(
            deployment,
            &snapshot.pods,
            &snapshot.config_maps,
            &snapshot.secrets,
            &snapshot.hpas,
        );
        // Every demo app mounts its own ConfigMap and Secret and owns a pod
        assert!(graph.nodes.len() >= 4, "{} is too small", deployment.name);
        let focal = format!("deployment-{}", deployment.name);
        let config = format!("configmap-{}-config", deployment.name);
        assert!(graph.edges.iter().all(|e| e.touches(&focal)));
        assert!(
            graph
                .edges
                .iter()
                .any(|e| e.source == config && e.target == focal)
        );
    }
}

#[test]
fn test_demo_hpas_target_scaled_tiers() {
    let snapshot = generate_demo_snapshot("default");
    let mut targets: Vec<&str> = snapshot
        .hpas
        .iter()
        .map(|hpa| hpa.target_ref.name.as_str())
        .collect();
    targets.sort();
    assert_eq!(targets, vec!["api-server", "web-app", "worker"]);
    assert!(snapshot.hpas.iter().all(|hpa| hpa.min_replicas <= hpa.max_replicas));
}

#[tokio::test]
async fn test_cache_is_single_slot() {
    let cache = shared_cache();
    let provider = create_provider(DataMode::Demo, None, cache.clone())
        .await
        .unwrap();
    assert_eq!(provider.mode(), DataMode::Demo);

    let shop = provider.fetch("shop").await.unwrap();
    assert_eq!(shop.namespace, "shop");
    assert!(cache.lock().await.contains(DataMode::Demo, "shop"));

    provider.fetch("billing").await.unwrap();
    let guard = cache.lock().await;
    assert!(!guard.contains(DataMode::Demo, "shop"));
    assert!(guard.contains(DataMode::Demo, "billing"));
}

#[tokio::test]
async fn test_cache_outlives_provider() {
    let cache = shared_cache();
    let first = create_provider(DataMode::Demo, None, cache.clone())
        .await
        .unwrap();
    let snapshot = first.fetch("shop").await.unwrap();
    drop(first);

    let second = create_provider(DataMode::Demo, None, cache.clone())
        .await
        .unwrap();
    assert_eq!(second.fetch("shop").await.unwrap(), snapshot);

    second.invalidate().await;
    assert!(cache.lock().await.age().is_none());
}

#[test]
fn test_live_objects_feed_the_builders() {
    let now = Utc.with_ymd_and_hms(2026, 1, 10, 12, 0, 0).unwrap();
    let deployment = deployment_from_json(
        &json!({
            "metadata": {
                "name": "web",
                "namespace": "shop",
                "creationTimestamp": "2026-01-08T12:00:00Z"
            },
            "spec": {
                "replicas": 2,
                "template": {"spec": {
                    "containers": [{
                        "name": "web",
                        "envFrom": [{"configMapRef": {"name": "web-config"}}]
                    }],
                    "volumes": [{"name": "tls", "secret": {"secretName": "web-tls"}}]
                }}
            },
            "status": {"readyReplicas": 2, "availableReplicas": 2}
        }),
        now,
    )
    .unwrap();
    assert_eq!(deployment.age, "2d");
    assert_eq!(deployment.config_maps, vec!["web-config"]);
    assert_eq!(deployment.secrets, vec!["web-tls"]);
    assert_eq!(deployment.status, "Available");

    let pod = pod_from_json(
        &json!({
            "metadata": {
                "name": "web-7f9c6-abcde",
                "namespace": "shop",
                "ownerReferences": [{"kind": "ReplicaSet", "name": "web-7f9c6", "uid": "u1"}]
            },
            "spec": {"nodeName": "node-1", "containers": [{"name": "web", "image": "web:1"}]},
            "status": {
                "phase": "Running",
                "containerStatuses": [
                    {"name": "web", "image": "web:1", "ready": true, "restartCount": 1}
                ]
            }
        }),
        now,
    )
    .unwrap();

    let graph = build_deployment_topology(&deployment, &[pod], &[], &[], &[]);
    assert_eq!(graph.nodes.len(), 2);
    assert_eq!(graph.nodes[0].status, HealthStatus::Healthy);
    assert!(graph.edges[0].animated);
}
