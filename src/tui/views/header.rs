//! Header view rendering

use crate::tui::theme::Theme;
use crate::view::TopologyView;
use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// What the header shows
pub struct HeaderInfo<'a> {
    pub context: &'a str,
    pub namespace: &'a str,
    pub mode: &'a str,
    pub view: &'a TopologyView,
    pub history: &'a [TopologyView],
    pub node_count: usize,
    pub edge_count: usize,
    pub resource_count: usize,
}

/// Render the header with context, namespace, current view and counts
pub fn render_header(f: &mut Frame, area: Rect, info: &HeaderInfo<'_>, theme: &Theme) {
    let label = Style::default().fg(theme.text_label);

    let context_line = Line::from(vec![
        Span::styled("Context: ", label),
        Span::styled(info.context.to_string(), theme.header_context_style()),
        Span::raw("  "),
        Span::styled("Namespace: ", label),
        Span::styled(
            info.namespace.to_string(),
            Style::default().fg(theme.header_namespace),
        ),
        Span::raw("  "),
        Span::styled("Source: ", label),
        Span::styled(info.mode.to_string(), Style::default().fg(theme.text_value)),
    ]);

    // Breadcrumb of the views behind the current one
    let mut trail: Vec<Span> = vec![Span::styled("View: ", label)];
    for previous in info.history {
        trail.push(Span::styled(
            previous.to_string(),
            Style::default().fg(theme.text_secondary),
        ));
        trail.push(Span::styled(" > ", Style::default().fg(theme.text_secondary)));
    }
    trail.push(Span::styled(
        info.view.to_string(),
        Style::default().fg(theme.header_view),
    ));

    let counts_line = Line::from(vec![
        Span::styled("Nodes: ", label),
        Span::styled(
            info.node_count.to_string(),
            Style::default().fg(theme.header_counts),
        ),
        Span::raw("  "),
        Span::styled("Edges: ", label),
        Span::styled(
            info.edge_count.to_string(),
            Style::default().fg(theme.header_counts),
        ),
        Span::raw("  "),
        Span::styled("Resources: ", label),
        Span::styled(
            info.resource_count.to_string(),
            Style::default().fg(theme.header_counts),
        ),
    ]);

    let header = Paragraph::new(vec![context_line, Line::from(trail), counts_line])
        .block(Block::default().borders(Borders::ALL).title("kubetopo"));
    f.render_widget(header, area);
}
