//! Model layer
//!
//! Structure:
//! - `records.rs` - Resource records supplied by the data sources
//! - `resource_type.rs` - Closed set of resource kinds with an `Unknown` fallback
//! - `health.rs` - Health categories

mod health;
mod records;
mod resource_type;

pub use health::HealthStatus;
pub use records::{
    ConfigMap, Container, Deployment, Hpa, OwnerReference, Pod, ReplicaCounts, Secret, TargetRef,
};
pub use resource_type::ResourceType;
