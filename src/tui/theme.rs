//! Theme and styling definitions
//!
//! Chrome colors (header, footer, panels) live on [`Theme`]. Resource and
//! status colors come from the presentation tables as hex strings and are
//! converted here, faded by the projected opacity when dimmed.

use crate::presentation::{NEUTRAL_COLOR, NodePresentation};
use ratatui::style::{Color, Modifier, Style};

/// Theme configuration for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    // Header colors
    pub header_context: Color,
    pub header_namespace: Color,
    pub header_view: Color,
    pub header_counts: Color,

    // Status colors
    pub status_ok: Color,
    pub status_error: Color,

    // Text colors
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_label: Color,
    pub text_value: Color,

    // Graph colors
    pub canvas_background: Color,
    pub edge: Color,
    pub edge_emphasized: Color,
    pub node_selected: Color,

    // Footer colors
    pub footer_key: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            header_context: Color::Yellow,
            header_namespace: Color::Yellow,
            header_view: Color::Cyan,
            header_counts: Color::Cyan,

            status_ok: Color::Green,
            status_error: Color::Red,

            text_primary: Color::White,
            text_secondary: Color::Gray,
            text_label: Color::Cyan,
            text_value: Color::White,

            canvas_background: Color::Rgb(0, 0, 0),
            edge: Color::Rgb(120, 120, 120),
            edge_emphasized: Color::Rgb(0, 188, 212),
            node_selected: Color::Rgb(255, 235, 59),

            footer_key: Color::Yellow,
        }
    }
}

impl Theme {
    pub fn header_context_style(&self) -> Style {
        Style::default()
            .fg(self.header_context)
            .add_modifier(Modifier::BOLD)
    }

    pub fn footer_key_style(&self) -> Style {
        Style::default().fg(self.footer_key)
    }

    pub fn status_style(&self, is_error: bool) -> Style {
        Style::default()
            .fg(if is_error {
                self.status_error
            } else {
                self.status_ok
            })
            .add_modifier(Modifier::BOLD)
    }

    /// Accent (resource type) color of a node
    pub fn resource_color(&self, presentation: &NodePresentation, opacity: f64) -> Color {
        self.fade(hex_color(presentation.color), opacity)
    }

    /// Status color of a node
    pub fn status_color(&self, presentation: &NodePresentation, opacity: f64) -> Color {
        self.fade(hex_color(presentation.status_color), opacity)
    }

    /// Blend `color` toward the canvas background
    ///
    /// Terminals have no alpha channel, so opacity is applied by mixing RGB
    /// colors. Named colors pass through unchanged at full opacity and are
    /// replaced with a gray at reduced opacity.
    pub fn fade(&self, color: Color, opacity: f64) -> Color {
        let opacity = opacity.clamp(0.0, 1.0);
        if opacity >= 1.0 {
            return color;
        }
        let (Color::Rgb(r, g, b), Color::Rgb(br, bg, bb)) = (color, self.canvas_background)
        else {
            return Color::DarkGray;
        };
        let mix = |fg: u8, bg: u8| -> u8 {
            (f64::from(fg) * opacity + f64::from(bg) * (1.0 - opacity)).round() as u8
        };
        Color::Rgb(mix(r, br), mix(g, bg), mix(b, bb))
    }
}

/// Parse a CSS hex color, falling back to the neutral gray
pub fn hex_color(hex: &str) -> Color {
    csscolorparser::parse(hex)
        .or_else(|_| csscolorparser::parse(NEUTRAL_COLOR))
        .map(|color| {
            let [r, g, b, _] = color.to_rgba8();
            Color::Rgb(r, g, b)
        })
        .unwrap_or(Color::Gray)
}
