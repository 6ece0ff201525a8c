//! Tests for the four topology builders and status mapping
//!
//! Builders are pure: these tests only construct records and inspect the
//! returned graphs.

use kubetopo::models::{
    ConfigMap, Container, Deployment, HealthStatus, Hpa, OwnerReference, Pod, ResourceType,
    Secret, TargetRef,
};
use kubetopo::topology::{
    FLUX_NAMESPACE_LABEL, TopologyGraph, build_config_secrets_topology, build_deployment_topology,
    build_namespace_topology, build_pod_topology, map_status,
};
use std::collections::{BTreeMap, HashSet};

fn deployment(name: &str, status: &str) -> Deployment {
    Deployment {
        name: name.to_string(),
        namespace: "shop".to_string(),
        status: status.to_string(),
        ..Default::default()
    }
}

fn owned_pod(name: &str, replica_set: &str, status: &str) -> Pod {
    Pod {
        name: name.to_string(),
        namespace: "shop".to_string(),
        status: status.to_string(),
        owner_references: vec![OwnerReference {
            kind: "ReplicaSet".to_string(),
            name: replica_set.to_string(),
            uid: format!("uid-{}", name),
        }],
        ..Default::default()
    }
}

fn labelled_pod(name: &str, app: &str, status: &str) -> Pod {
    Pod {
        name: name.to_string(),
        namespace: "shop".to_string(),
        status: status.to_string(),
        labels: BTreeMap::from([("app".to_string(), app.to_string())]),
        ..Default::default()
    }
}

fn grouped(grouping: &str) -> BTreeMap<String, String> {
    BTreeMap::from([(FLUX_NAMESPACE_LABEL.to_string(), grouping.to_string())])
}

fn config_map(name: &str, grouping: &str) -> ConfigMap {
    ConfigMap {
        name: name.to_string(),
        namespace: "shop".to_string(),
        labels: grouped(grouping),
        ..Default::default()
    }
}

fn secret(name: &str, grouping: &str) -> Secret {
    Secret {
        name: name.to_string(),
        namespace: "shop".to_string(),
        secret_type: "Opaque".to_string(),
        labels: grouped(grouping),
        ..Default::default()
    }
}

fn assert_well_formed(graph: &TopologyGraph) {
    let ids: HashSet<&str> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids.len(), graph.nodes.len(), "node ids must be unique");
    for edge in &graph.edges {
        assert!(ids.contains(edge.source.as_str()), "dangling {}", edge.id);
        assert!(ids.contains(edge.target.as_str()), "dangling {}", edge.id);
    }
}

fn edge_pairs(graph: &TopologyGraph) -> Vec<(&str, &str, bool)> {
    graph
        .edges
        .iter()
        .map(|e| (e.source.as_str(), e.target.as_str(), e.animated))
        .collect()
}

#[test]
fn test_deployment_with_two_pods_and_one_config_map() {
    let mut web = deployment("web", "Available");
    web.config_maps = vec!["web-config".to_string()];
    let pods = vec![
        owned_pod("web-5d9f7-aaaaa", "web-5d9f7", "Running"),
        owned_pod("web-5d9f7-bbbbb", "web-5d9f7", "Pending"),
        owned_pod("api-77c4d-ccccc", "api-77c4d", "Running"),
    ];
    let config_maps = vec![config_map("web-config", "shop"), config_map("api-config", "shop")];

    let graph = build_deployment_topology(&web, &pods, &config_maps, &[], &[]);

    assert_well_formed(&graph);
    assert_eq!(graph.nodes.len(), 4);
    assert_eq!(graph.edges.len(), 3);
    assert_eq!(
        edge_pairs(&graph),
        vec![
            ("configmap-web-config", "deployment-web", false),
            ("deployment-web", "pod-web-5d9f7-aaaaa", true),
            ("deployment-web", "pod-web-5d9f7-bbbbb", false),
        ]
    );
}

#[test]
fn test_deployment_layout_columns() {
    let mut web = deployment("web", "Available");
    web.secrets = vec!["web-secret".to_string()];
    let hpas = vec![Hpa {
        name: "web-hpa".to_string(),
        target_ref: TargetRef {
            kind: "Deployment".to_string(),
            name: "web".to_string(),
        },
        ..Default::default()
    }];
    let pods = vec![labelled_pod("standalone", "web", "Running")];
    let secrets = vec![secret("web-secret", "shop")];

    let graph = build_deployment_topology(&web, &pods, &[], &secrets, &hpas);
    assert_well_formed(&graph);

    let focal = graph.node("deployment-web").unwrap().position;
    let hpa = graph.node("hpa-web-hpa").unwrap().position;
    let left = graph.node("secret-web-secret").unwrap().position;
    let right = graph.node("pod-standalone").unwrap().position;

    assert!(hpa.y < focal.y, "HPA sits above the deployment");
    assert_eq!(hpa.x, focal.x);
    assert!(left.x < focal.x && focal.x < right.x);

    // Healthy target: the HPA edge is live
    let hpa_edge = graph
        .edges
        .iter()
        .find(|e| e.source == "hpa-web-hpa")
        .unwrap();
    assert!(hpa_edge.animated);
    assert!(hpa_edge.source_handle.is_some());
}

#[test]
fn test_hpa_for_other_kind_is_ignored() {
    let web = deployment("web", "Degraded");
    let hpas = vec![Hpa {
        name: "web-hpa".to_string(),
        target_ref: TargetRef {
            kind: "StatefulSet".to_string(),
            name: "web".to_string(),
        },
        ..Default::default()
    }];
    let graph = build_deployment_topology(&web, &[], &[], &[], &hpas);
    assert_eq!(graph.nodes.len(), 1);
    assert_eq!(graph.nodes[0].status, HealthStatus::Error);
    assert!(graph.edges.is_empty());
}

#[test]
fn test_pod_view_containers_use_ready_flag() {
    let mut pod = labelled_pod("web-1", "web", "Running");
    pod.config_maps = vec!["web-config".to_string()];
    pod.secrets = vec!["web-secret".to_string()];
    pod.containers = vec![
        Container {
            name: "app".to_string(),
            image: "web:1.2".to_string(),
            ready: true,
            restart_count: 0,
        },
        Container {
            name: "sidecar".to_string(),
            image: "envoy:1.30".to_string(),
            ready: false,
            restart_count: 4,
        },
    ];

    let graph = build_pod_topology(
        &pod,
        &[config_map("web-config", "shop")],
        &[secret("web-secret", "shop"), secret("unrelated", "shop")],
    );

    assert_well_formed(&graph);
    assert_eq!(graph.nodes.len(), 5);

    let app = graph.node("container-web-1-app").unwrap();
    let sidecar = graph.node("container-web-1-sidecar").unwrap();
    assert_eq!(app.status, HealthStatus::Healthy);
    assert_eq!(sidecar.status, HealthStatus::Error);
    assert_eq!(sidecar.detail("restarts"), Some("4"));

    assert_eq!(
        edge_pairs(&graph),
        vec![
            ("configmap-web-config", "pod-web-1", false),
            ("secret-web-secret", "pod-web-1", false),
            ("pod-web-1", "container-web-1-app", true),
            ("pod-web-1", "container-web-1-sidecar", false),
        ]
    );
}

#[test]
fn test_namespace_view_leaves_config_unconnected() {
    let deployments = vec![deployment("web", "Available"), deployment("api", "Progressing")];
    let pods = vec![
        labelled_pod("web-1", "web", "Running"),
        labelled_pod("web-2", "web", "CrashLoopBackOff"),
        labelled_pod("api-1", "api", "Running"),
        labelled_pod("orphan", "batch", "Running"),
    ];
    let config_maps = vec![config_map("web-config", "shop")];
    let secrets = vec![secret("web-secret", "shop")];

    let graph = build_namespace_topology(&deployments, &pods, &config_maps, &secrets);

    assert_well_formed(&graph);
    assert!(graph.node("pod-orphan").is_none());
    assert_eq!(graph.nodes.len(), 7);
    assert_eq!(graph.edges.len(), 3);
    assert!(!graph.edges.iter().any(|e| e.touches("configmap-web-config")));
    assert!(!graph.edges.iter().any(|e| e.touches("secret-web-secret")));

    let web = graph.node("deployment-web").unwrap().position;
    let api = graph.node("deployment-api").unwrap().position;
    let web_pod = graph.node("pod-web-2").unwrap().position;
    assert_eq!(web.y, api.y);
    assert!(web.x < api.x);
    assert_eq!(web_pod.x, web.x);
    assert!(web_pod.y > web.y);
}

#[test]
fn test_config_secrets_fan_out() {
    let mut web = deployment("web", "Available");
    web.config_maps = vec!["web-config".to_string()];
    web.secrets = vec!["db-secret".to_string()];
    let mut api = deployment("api", "Available");
    api.secrets = vec!["db-secret".to_string()];
    let batch = deployment("batch", "Available");

    let graph = build_config_secrets_topology(
        &[web, api, batch],
        &[config_map("web-config", "shop")],
        &[secret("db-secret", "shop"), secret("other-secret", "other")],
        "shop",
    );
    assert_well_formed(&graph);

    let nodes: Vec<&str> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
    let edges: Vec<&str> = graph.edges.iter().map(|e| e.id.as_str()).collect();
    let summary = format!("nodes:\n{}\nedges:\n{}", nodes.join("\n"), edges.join("\n"));

    insta::assert_snapshot!(summary, @r"
    nodes:
    configmap-web-config
    secret-db-secret
    deployment-web
    deployment-api
    edges:
    configmap-web-config-deployment-web
    secret-db-secret-deployment-web
    secret-db-secret-deployment-api
    ");
}

#[test]
fn test_config_secrets_empty_grouping() {
    let mut web = deployment("web", "Available");
    web.config_maps = vec!["web-config".to_string()];

    let graph = build_config_secrets_topology(
        &[web],
        &[config_map("web-config", "shop")],
        &[],
        "staging",
    );
    assert_eq!(graph, TopologyGraph::empty());
}

#[test]
fn test_builders_are_deterministic() {
    let deployments = vec![deployment("web", "Available")];
    let pods = vec![labelled_pod("web-1", "web", "Running")];
    let config_maps = vec![config_map("web-config", "shop")];

    let first = build_namespace_topology(&deployments, &pods, &config_maps, &[]);
    let second = build_namespace_topology(&deployments, &pods, &config_maps, &[]);
    assert_eq!(first, second);
}

#[test]
fn test_duplicate_names_keep_ids_unique() {
    let deployments = vec![deployment("web", "Available"), deployment("web", "Degraded")];
    let pods = vec![
        labelled_pod("web-1", "web", "Running"),
        labelled_pod("web-1", "web", "Running"),
    ];
    let graph = build_namespace_topology(&deployments, &pods, &[], &[]);
    assert_well_formed(&graph);
    assert_eq!(graph.nodes.len(), 2);
    assert_eq!(graph.edges.len(), 1);
}

#[test]
fn test_status_mapping() {
    let deployment = ResourceType::Deployment;
    let pod = ResourceType::Pod;

    assert_eq!(map_status(&deployment, Some("Available")), HealthStatus::Healthy);
    assert_eq!(map_status(&deployment, Some("Progressing")), HealthStatus::Warning);
    assert_eq!(map_status(&deployment, Some("Degraded")), HealthStatus::Error);
    assert_eq!(map_status(&deployment, Some("Running")), HealthStatus::Unknown);
    assert_eq!(map_status(&deployment, None), HealthStatus::Unknown);

    assert_eq!(map_status(&pod, Some("Running")), HealthStatus::Healthy);
    assert_eq!(map_status(&pod, Some("Pending")), HealthStatus::Warning);
    assert_eq!(map_status(&pod, Some("Failed")), HealthStatus::Error);
    assert_eq!(map_status(&pod, Some("CrashLoopBackOff")), HealthStatus::Error);
    assert_eq!(map_status(&pod, Some("Succeeded")), HealthStatus::Unknown);
    assert_eq!(map_status(&pod, Some("running")), HealthStatus::Unknown);
}

#[test]
fn test_presence_only_kinds_are_healthy() {
    for kind in [
        ResourceType::ConfigMap,
        ResourceType::Secret,
        ResourceType::Service,
        ResourceType::PersistentVolumeClaim,
        ResourceType::Hpa,
    ] {
        assert_eq!(map_status(&kind, None), HealthStatus::Healthy, "{}", kind);
    }
    assert_eq!(
        map_status(&ResourceType::parse("StatefulSet"), Some("Available")),
        HealthStatus::Unknown
    );
}
