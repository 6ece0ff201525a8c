//! Node presentation
//!
//! Two closed lookup tables: one keyed by resource type (icon and accent
//! color), one keyed by health status (status glyph and color). Both fall
//! back to a neutral icon and gray for anything they do not know, so an
//! unrecognized resource type still renders.
//!
//! Colors are CSS hex strings; the terminal front end converts them.

use crate::models::{HealthStatus, ResourceType};
use crate::topology::ResourceNode;

/// Icon used when a resource type has no entry
pub const DEFAULT_ICON: &str = "◇";
pub const DEFAULT_ASCII_ICON: &str = "[?]";
pub const UNKNOWN_STATUS_ICON: &str = "?";
/// Neutral gray used for unknown types and unknown status
pub const NEUTRAL_COLOR: &str = "#9e9e9e";

/// Glyph family used for icons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IconSet {
    #[default]
    Unicode,
    /// Plain ASCII for terminals without good symbol fonts
    Ascii,
}

impl IconSet {
    pub fn from_no_icons(no_icons: bool) -> Self {
        if no_icons {
            IconSet::Ascii
        } else {
            IconSet::Unicode
        }
    }
}

/// What a node looks like
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodePresentation {
    pub icon: &'static str,
    /// Accent color of the resource type
    pub color: &'static str,
    pub status_icon: &'static str,
    pub status_color: &'static str,
}

fn type_entry(resource_type: &ResourceType, icons: IconSet) -> Option<(&'static str, &'static str)> {
    let (unicode, ascii, color) = match resource_type {
        ResourceType::Deployment => ("⬢", "[D]", "#3F51B5"),
        ResourceType::Pod => ("●", "[P]", "#9C27B0"),
        ResourceType::Service => ("⇄", "[S]", "#00BCD4"),
        ResourceType::ConfigMap => ("⚙", "[C]", "#0288d1"),
        ResourceType::Secret => ("⚿", "[K]", "#ed6c02"),
        ResourceType::PersistentVolumeClaim => ("▤", "[V]", "#FF9800"),
        ResourceType::Hpa => ("⇕", "[H]", "#FFEB3B"),
        ResourceType::Unknown(_) => return None,
    };
    let icon = match icons {
        IconSet::Unicode => unicode,
        IconSet::Ascii => ascii,
    };
    Some((icon, color))
}

fn status_entry(status: HealthStatus, icons: IconSet) -> Option<(&'static str, &'static str)> {
    let (unicode, ascii, color) = match status {
        HealthStatus::Healthy => ("✓", "+", "#4caf50"),
        HealthStatus::Warning => ("⚠", "!", "#ff9800"),
        HealthStatus::Error => ("✗", "x", "#f44336"),
        HealthStatus::Unknown => return None,
    };
    let icon = match icons {
        IconSet::Unicode => unicode,
        IconSet::Ascii => ascii,
    };
    Some((icon, color))
}

/// Presentation of a resource type and status with the Unicode icon set
pub fn present(resource_type: &ResourceType, status: HealthStatus) -> NodePresentation {
    present_with(resource_type, status, IconSet::Unicode)
}

pub fn present_with(
    resource_type: &ResourceType,
    status: HealthStatus,
    icons: IconSet,
) -> NodePresentation {
    let (icon, color) = type_entry(resource_type, icons).unwrap_or((
        match icons {
            IconSet::Unicode => DEFAULT_ICON,
            IconSet::Ascii => DEFAULT_ASCII_ICON,
        },
        NEUTRAL_COLOR,
    ));
    let (status_icon, status_color) =
        status_entry(status, icons).unwrap_or((UNKNOWN_STATUS_ICON, NEUTRAL_COLOR));
    NodePresentation {
        icon,
        color,
        status_icon,
        status_color,
    }
}

pub fn present_node(node: &ResourceNode, icons: IconSet) -> NodePresentation {
    present_with(&node.resource_type, node.status, icons)
}

/// Compact `key: value` lines for a node's details, in display order
pub fn detail_lines(node: &ResourceNode) -> Vec<String> {
    node.details
        .iter()
        .map(|(key, value)| format!("{}: {}", key, value))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_type_and_status() {
        let p = present(&ResourceType::Deployment, HealthStatus::Healthy);
        assert_eq!(p.color, "#3F51B5");
        assert_eq!(p.status_color, "#4caf50");
        assert_ne!(p.icon, DEFAULT_ICON);
    }

    #[test]
    fn test_unknown_status_is_gray() {
        let p = present(&ResourceType::Pod, HealthStatus::Unknown);
        assert_eq!(p.color, "#9C27B0");
        assert_eq!(p.status_color, NEUTRAL_COLOR);
    }

    #[test]
    fn test_ascii_icons() {
        let p = present_with(&ResourceType::Secret, HealthStatus::Error, IconSet::Ascii);
        assert_eq!(p.icon, "[K]");
        assert_eq!(p.status_icon, "x");
        assert!(p.icon.is_ascii() && p.status_icon.is_ascii());
    }
}
