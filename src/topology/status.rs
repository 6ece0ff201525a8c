//! Resource status mapping
//!
//! Maps a resource's domain status (rollout condition, pod phase) to one of
//! the four health categories. Total: unmapped strings become `Unknown`.

use crate::models::{ConfigMap, Deployment, HealthStatus, Hpa, Pod, ResourceType, Secret};

/// Map a resource's raw status string to a health category
///
/// Kinds without an intrinsic health signal (ConfigMap, Secret, Service,
/// PersistentVolumeClaim, HPA) are presence-only and always healthy.
pub fn map_status(resource_type: &ResourceType, status: Option<&str>) -> HealthStatus {
    match resource_type {
        ResourceType::Deployment => match status {
            Some("Available") => HealthStatus::Healthy,
            Some("Progressing") => HealthStatus::Warning,
            Some("Degraded") => HealthStatus::Error,
            _ => HealthStatus::Unknown,
        },
        ResourceType::Pod => match status {
            Some("Running") => HealthStatus::Healthy,
            Some("Pending") => HealthStatus::Warning,
            Some("Failed") | Some("CrashLoopBackOff") => HealthStatus::Error,
            _ => HealthStatus::Unknown,
        },
        ResourceType::Service
        | ResourceType::ConfigMap
        | ResourceType::Secret
        | ResourceType::PersistentVolumeClaim
        | ResourceType::Hpa => HealthStatus::Healthy,
        ResourceType::Unknown(_) => HealthStatus::Unknown,
    }
}

/// Records that can report their own health category
pub trait Health {
    fn health(&self) -> HealthStatus;
}

impl Health for Deployment {
    fn health(&self) -> HealthStatus {
        map_status(&ResourceType::Deployment, Some(&self.status))
    }
}

impl Health for Pod {
    fn health(&self) -> HealthStatus {
        map_status(&ResourceType::Pod, Some(&self.status))
    }
}

impl Health for ConfigMap {
    fn health(&self) -> HealthStatus {
        map_status(&ResourceType::ConfigMap, None)
    }
}

impl Health for Secret {
    fn health(&self) -> HealthStatus {
        map_status(&ResourceType::Secret, None)
    }
}

impl Health for Hpa {
    fn health(&self) -> HealthStatus {
        map_status(&ResourceType::Hpa, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deployment_conditions() {
        let kind = ResourceType::Deployment;
        assert_eq!(map_status(&kind, Some("Available")), HealthStatus::Healthy);
        assert_eq!(map_status(&kind, Some("Progressing")), HealthStatus::Warning);
        assert_eq!(map_status(&kind, Some("Degraded")), HealthStatus::Error);
        assert_eq!(map_status(&kind, Some("Not Ready")), HealthStatus::Unknown);
        assert_eq!(map_status(&kind, None), HealthStatus::Unknown);
    }

    #[test]
    fn test_pod_phases() {
        let kind = ResourceType::Pod;
        assert_eq!(map_status(&kind, Some("Running")), HealthStatus::Healthy);
        assert_eq!(map_status(&kind, Some("Pending")), HealthStatus::Warning);
        assert_eq!(map_status(&kind, Some("Failed")), HealthStatus::Error);
        assert_eq!(
            map_status(&kind, Some("CrashLoopBackOff")),
            HealthStatus::Error
        );
        assert_eq!(map_status(&kind, Some("Succeeded")), HealthStatus::Unknown);
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
            assert_eq!(map_status(&kind, None), HealthStatus::Healthy);
            assert_eq!(map_status(&kind, Some("Degraded")), HealthStatus::Healthy);
        }
    }

    #[test]
    fn test_unknown_kind() {
        let kind = ResourceType::Unknown("Job".to_string());
        assert_eq!(map_status(&kind, Some("Running")), HealthStatus::Unknown);
    }

    #[test]
    fn test_record_health() {
        let pod = Pod {
            status: "Pending".to_string(),
            ..Default::default()
        };
        assert_eq!(pod.health(), HealthStatus::Warning);
        assert_eq!(ConfigMap::default().health(), HealthStatus::Healthy);
    }
}
