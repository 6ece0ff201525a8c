//! Tests for node presentation lookups and their fallbacks

use kubetopo::models::{HealthStatus, ResourceType};
use kubetopo::presentation::{
    DEFAULT_ASCII_ICON, DEFAULT_ICON, IconSet, NEUTRAL_COLOR, UNKNOWN_STATUS_ICON, detail_lines,
    present, present_node, present_with,
};
use kubetopo::topology::{Position, ResourceNode};

#[test]
fn test_unknown_type_falls_back() {
    let kind = ResourceType::parse("StatefulSet");
    let presentation = present(&kind, HealthStatus::Unknown);
    assert_eq!(presentation.icon, DEFAULT_ICON);
    assert_eq!(presentation.color, NEUTRAL_COLOR);
    assert_eq!(presentation.status_icon, UNKNOWN_STATUS_ICON);
    assert_eq!(presentation.status_color, NEUTRAL_COLOR);

    let ascii = present_with(&kind, HealthStatus::Healthy, IconSet::Ascii);
    assert_eq!(ascii.icon, DEFAULT_ASCII_ICON);
    assert_ne!(ascii.status_color, NEUTRAL_COLOR);
}

#[test]
fn test_every_known_type_has_its_own_entry() {
    let mut colors = Vec::new();
    for kind in ResourceType::known() {
        let presentation = present(kind, HealthStatus::Healthy);
        assert_ne!(presentation.icon, DEFAULT_ICON, "{}", kind);
        assert_ne!(presentation.color, NEUTRAL_COLOR, "{}", kind);
        colors.push(presentation.color);
    }
    colors.sort();
    colors.dedup();
    assert_eq!(colors.len(), ResourceType::known().len());
}

#[test]
fn test_status_colors_differ() {
    let kind = ResourceType::Pod;
    let healthy = present(&kind, HealthStatus::Healthy);
    let warning = present(&kind, HealthStatus::Warning);
    let error = present(&kind, HealthStatus::Error);
    assert_ne!(healthy.status_color, warning.status_color);
    assert_ne!(warning.status_color, error.status_color);
    assert_ne!(healthy.status_icon, error.status_icon);
}

#[test]
fn test_node_details_keep_order() {
    let node = ResourceNode::new(
        ResourceType::Deployment,
        "web",
        "shop",
        HealthStatus::Healthy,
        Position::default(),
    )
    .with_detail("replicas", "3/3")
    .with_detail("strategy", "RollingUpdate");

    assert_eq!(
        detail_lines(&node),
        vec!["replicas: 3/3".to_string(), "strategy: RollingUpdate".to_string()]
    );
    assert_eq!(
        present_node(&node, IconSet::Unicode),
        present(&ResourceType::Deployment, HealthStatus::Healthy)
    );
}
