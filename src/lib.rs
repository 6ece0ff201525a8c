//! kubetopo library
//!
//! Builds node/edge topology graphs from Kubernetes resource records and
//! drives hover, click and fullscreen interaction over them. The terminal
//! front end sits behind the `tui` feature; everything else is headless.

pub mod cli;
pub mod config;
pub mod datasource;
pub mod interaction;
pub mod kube;
pub mod models;
pub mod presentation;
pub mod topology;
#[cfg(feature = "tui")]
pub mod tui;
pub mod view;

// Re-export commonly used types for convenience
pub use datasource::{DataMode, ResourceProvider, ResourceSnapshot};
pub use interaction::{GraphInteraction, Navigator, Route};
pub use topology::{ResourceEdge, ResourceNode, TopologyGraph};
pub use view::TopologyView;
