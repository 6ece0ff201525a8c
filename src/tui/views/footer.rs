//! Footer view rendering

use crate::tui::keybindings::footer_hints;
use crate::tui::theme::Theme;
use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

/// Render the footer: the status message if one is set, key hints otherwise
pub fn render_footer(
    f: &mut Frame,
    area: Rect,
    show_help: bool,
    status_message: Option<&(String, bool)>,
    theme: &Theme,
) {
    let spans: Vec<Span> = if show_help {
        vec![
            Span::raw("Press "),
            Span::styled("?", theme.footer_key_style()),
            Span::raw(" to hide help"),
        ]
    } else if let Some((msg, is_error)) = status_message {
        vec![Span::styled(msg.clone(), theme.status_style(*is_error))]
    } else {
        let mut spans = Vec::new();
        for (idx, hint) in footer_hints().iter().enumerate() {
            if idx > 0 {
                spans.push(Span::raw(" | "));
            }
            spans.push(Span::styled(hint.key, theme.footer_key_style()));
            spans.push(Span::raw(format!(" {}", hint.label)));
        }
        spans
    };

    let footer = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL))
        .wrap(Wrap { trim: true });
    f.render_widget(footer, area);
}
