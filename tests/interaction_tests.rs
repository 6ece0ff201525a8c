//! Tests for hover projection and click navigation over built graphs

use kubetopo::interaction::{Emphasis, GraphInteraction, Route, connected_node_ids, project};
use kubetopo::models::{Deployment, HealthStatus, OwnerReference, Pod, ResourceType};
use kubetopo::topology::{
    Position, ResourceEdge, ResourceNode, TopologyGraph, build_deployment_topology,
};
use std::collections::BTreeMap;

fn fixture() -> TopologyGraph {
    let web = Deployment {
        name: "web".to_string(),
        namespace: "shop".to_string(),
        status: "Available".to_string(),
        config_maps: vec!["web-config".to_string()],
        ..Default::default()
    };
    let pods = ["web-6c8d9-x1", "web-6c8d9-x2"]
        .iter()
        .map(|name| Pod {
            name: name.to_string(),
            namespace: "shop".to_string(),
            status: "Running".to_string(),
            owner_references: vec![OwnerReference {
                kind: "ReplicaSet".to_string(),
                name: "web-6c8d9".to_string(),
                uid: String::new(),
            }],
            labels: BTreeMap::from([("app".to_string(), "web".to_string())]),
            ..Default::default()
        })
        .collect::<Vec<_>>();
    let config_maps = vec![kubetopo::models::ConfigMap {
        name: "web-config".to_string(),
        ..Default::default()
    }];
    build_deployment_topology(&web, &pods, &config_maps, &[], &[])
}

#[test]
fn test_connected_set_is_symmetric() {
    let graph = fixture();
    for a in &graph.nodes {
        for b in connected_node_ids(&graph.edges, &a.id) {
            assert!(
                connected_node_ids(&graph.edges, b).contains(a.id.as_str()),
                "{} -> {} is not symmetric",
                a.id,
                b
            );
        }
    }
}

#[test]
fn test_hover_on_pod_keeps_deployment_opaque() {
    let graph = fixture();
    let projected = project(&graph.nodes, &graph.edges, Some("pod-web-6c8d9-x1"));

    let by_id = |id: &str| {
        projected
            .nodes
            .iter()
            .find(|n| n.node.id == id)
            .map(|n| (n.emphasis, n.opacity))
            .unwrap()
    };
    assert_eq!(by_id("pod-web-6c8d9-x1"), (Emphasis::Hovered, 1.0));
    assert_eq!(by_id("deployment-web"), (Emphasis::Connected, 1.0));
    assert_eq!(by_id("pod-web-6c8d9-x2"), (Emphasis::Dimmed, 0.3));
    assert_eq!(by_id("configmap-web-config"), (Emphasis::Dimmed, 0.3));

    let emphasized: Vec<&str> = projected
        .edges
        .iter()
        .filter(|e| e.emphasized)
        .map(|e| e.edge.id.as_str())
        .collect();
    assert_eq!(emphasized, vec!["deployment-web-pod-web-6c8d9-x1"]);
}

#[test]
fn test_projection_is_idempotent() {
    let graph = fixture();
    let first = project(&graph.nodes, &graph.edges, Some("deployment-web"));
    let second = project(&graph.nodes, &graph.edges, Some("deployment-web"));
    assert_eq!(first, second);
}

#[test]
fn test_hover_unknown_id_dims_everything() {
    let graph = fixture();
    let projected = project(&graph.nodes, &graph.edges, Some("pod-gone"));
    assert!(projected.nodes.iter().all(|n| n.emphasis.is_dimmed()));
    assert!(projected.edges.iter().all(|e| !e.emphasized));
}

#[test]
fn test_click_pod_navigates_by_label() {
    let mut engine = GraphInteraction::new(fixture());
    let mut visited = Vec::new();
    let route = engine.on_node_click("pod-web-6c8d9-x2", &mut |route: &Route| {
        visited.push(route.clone())
    });

    assert_eq!(route, Some(Route::Pod("web-6c8d9-x2".to_string())));
    assert_eq!(visited, vec![Route::Pod("web-6c8d9-x2".to_string())]);
    assert_eq!(engine.selected_node_id(), Some("pod-web-6c8d9-x2"));
}

#[test]
fn test_click_config_map_routes_to_config_map() {
    let mut engine = GraphInteraction::new(fixture());
    let mut visited = Vec::new();
    engine.on_node_click("configmap-web-config", &mut |route: &Route| {
        visited.push(route.to_string())
    });
    assert_eq!(visited, vec!["ConfigMap/web-config".to_string()]);
}

#[test]
fn test_click_non_navigable_kinds() {
    let graph = TopologyGraph {
        nodes: vec![
            ResourceNode::new(
                ResourceType::Service,
                "frontend",
                "shop",
                HealthStatus::Healthy,
                Position::default(),
            ),
            ResourceNode::new(
                ResourceType::Hpa,
                "web-hpa",
                "shop",
                HealthStatus::Healthy,
                Position::new(0.0, 100.0),
            ),
        ],
        edges: vec![ResourceEdge::new("hpa-web-hpa", "service-frontend", false)],
    };
    let mut engine = GraphInteraction::new(graph);
    let mut calls = 0;

    for id in ["service-frontend", "hpa-web-hpa"] {
        assert_eq!(engine.on_node_click(id, &mut |_: &Route| calls += 1), None);
    }
    assert_eq!(calls, 0);
}

#[test]
fn test_rebuild_with_equal_graph_keeps_hover() {
    let mut engine = GraphInteraction::new(fixture());
    engine.on_node_mouse_enter("deployment-web");
    assert!(engine.take_fit_request());

    assert!(!engine.sync(&fixture()));
    assert_eq!(engine.hovered_node_id(), Some("deployment-web"));
    assert!(!engine.take_fit_request());

    // A different graph schedules a fit and drops vanished hover targets
    assert!(engine.sync(&TopologyGraph::empty()));
    assert_eq!(engine.hovered_node_id(), None);
    assert!(engine.take_fit_request());
}
