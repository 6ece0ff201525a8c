//! Centralized keybindings
//!
//! Single source of truth for the footer hints and the help overlay.

/// A keybinding with its human-readable label
#[derive(Debug, Clone, Copy)]
pub struct KeyHint {
    pub key: &'static str,
    pub label: &'static str,
}

impl KeyHint {
    pub const fn new(key: &'static str, label: &'static str) -> Self {
        Self { key, label }
    }
}

/// Hints shown in the footer, most important first
pub fn footer_hints() -> Vec<KeyHint> {
    vec![
        KeyHint::new("Tab", "Focus"),
        KeyHint::new("Enter", "Open"),
        KeyHint::new("n", "Namespace"),
        KeyHint::new("c", "Config"),
        KeyHint::new("f", "Fullscreen"),
        KeyHint::new("z", "Fit"),
        KeyHint::new("r", "Refresh"),
        KeyHint::new("?", "Help"),
        KeyHint::new("Esc", "Back"),
        KeyHint::new("q", "Quit"),
    ]
}

pub fn graph_help() -> Vec<KeyHint> {
    vec![
        KeyHint::new("<Tab>", "Focus next node"),
        KeyHint::new("<S-Tab>", "Focus previous node"),
        KeyHint::new("<Enter>", "Open focused node"),
        KeyHint::new("<mouse>", "Hover highlights neighbours"),
        KeyHint::new("<click>", "Open node"),
        KeyHint::new("<z>", "Fit graph to view"),
        KeyHint::new("<+>/<->", "Zoom in/out"),
        KeyHint::new("<h/j/k/l>", "Pan"),
        KeyHint::new("<wheel>", "Zoom at pointer"),
        KeyHint::new("<drag>", "Pan"),
    ]
}

pub fn view_help() -> Vec<KeyHint> {
    vec![
        KeyHint::new("<n>", "Namespace topology"),
        KeyHint::new("<c>", "ConfigMaps & Secrets"),
        KeyHint::new("<f>", "Toggle fullscreen"),
        KeyHint::new("<r>", "Refresh data"),
        KeyHint::new("<Esc>", "Close / back"),
        KeyHint::new("<Backspace>", "Back"),
        KeyHint::new("<?>", "Show/hide help"),
        KeyHint::new("<q>", "Quit"),
    ]
}
