//! Click routing
//!
//! Turns a clicked node into a navigation target. Only Deployments, Pods,
//! ConfigMaps and Secrets have somewhere to go; every other kind is a no-op.

use crate::models::ResourceType;
use crate::topology::ResourceNode;
use std::fmt;

/// Where a node click leads, named by the node's label
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Deployment(String),
    Pod(String),
    ConfigMap(String),
    Secret(String),
}

impl Route {
    pub fn for_node(node: &ResourceNode) -> Option<Self> {
        Self::for_resource(&node.resource_type, &node.label)
    }

    pub fn for_resource(resource_type: &ResourceType, name: &str) -> Option<Self> {
        let name = name.to_string();
        match resource_type {
            ResourceType::Deployment => Some(Route::Deployment(name)),
            ResourceType::Pod => Some(Route::Pod(name)),
            ResourceType::ConfigMap => Some(Route::ConfigMap(name)),
            ResourceType::Secret => Some(Route::Secret(name)),
            ResourceType::Service
            | ResourceType::PersistentVolumeClaim
            | ResourceType::Hpa
            | ResourceType::Unknown(_) => None,
        }
    }

    pub fn resource_type(&self) -> ResourceType {
        match self {
            Route::Deployment(_) => ResourceType::Deployment,
            Route::Pod(_) => ResourceType::Pod,
            Route::ConfigMap(_) => ResourceType::ConfigMap,
            Route::Secret(_) => ResourceType::Secret,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Route::Deployment(name)
            | Route::Pod(name)
            | Route::ConfigMap(name)
            | Route::Secret(name) => name,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.resource_type(), self.name())
    }
}

/// Receiver of navigation side effects
#[cfg_attr(test, mockall::automock)]
pub trait Navigator {
    fn navigate(&mut self, route: &Route);
}

impl<F> Navigator for F
where
    F: FnMut(&Route),
{
    fn navigate(&mut self, route: &Route) {
        self(route)
    }
}
