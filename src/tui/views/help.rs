//! Help view rendering

use crate::tui::keybindings::{KeyHint, graph_help, view_help};
use crate::tui::theme::Theme;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

/// Render the help overlay with one column per key group
pub fn render_help(f: &mut Frame, area: Rect, theme: &Theme) {
    f.render_widget(Clear, area);

    let block = Block::default().title("Help").borders(Borders::ALL);
    let inner_area = block.inner(area);
    f.render_widget(block, area);

    let column_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(inner_area);

    render_help_column(f, column_chunks[0], "GRAPH", &graph_help(), theme);
    render_help_column(f, column_chunks[1], "VIEWS", &view_help(), theme);
}

/// Render a single help column (no borders, just content)
fn render_help_column(f: &mut Frame, area: Rect, title: &str, items: &[KeyHint], theme: &Theme) {
    let mut lines = vec![Line::from(Span::styled(
        title,
        Style::default()
            .fg(theme.text_label)
            .add_modifier(Modifier::BOLD),
    ))];

    for hint in items {
        lines.push(Line::from(vec![
            Span::styled(
                format!("{} ", hint.key),
                Style::default()
                    .fg(theme.footer_key)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(hint.label),
        ]));
    }

    f.render_widget(Paragraph::new(lines), area);
}
