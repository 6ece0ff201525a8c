//! Node side panel and ConfigMap/Secret detail popup

use super::helpers::{centered_rect, create_themed_block, truncate_message};
use crate::datasource::ResourceSnapshot;
use crate::interaction::Route;
use crate::presentation::{IconSet, detail_lines, present_node};
use crate::topology::ResourceNode;
use crate::tui::theme::Theme;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph, Wrap},
};

const POPUP_WIDTH: u16 = 64;
const MAX_VALUE_LEN: usize = 40;

/// Render the side panel describing the focused node
pub fn render_node_panel(
    f: &mut Frame,
    area: Rect,
    node: Option<&ResourceNode>,
    icons: IconSet,
    theme: &Theme,
) {
    let block = create_themed_block("Details", theme);
    let Some(node) = node else {
        let paragraph = Paragraph::new(vec![
            Line::from("Hover or Tab to a node"),
            Line::from("to see its details."),
        ])
        .block(block)
        .style(Style::default().fg(theme.text_secondary));
        f.render_widget(paragraph, area);
        return;
    };

    let presentation = present_node(node, icons);
    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                format!("{} ", presentation.icon),
                Style::default().fg(theme.resource_color(&presentation, 1.0)),
            ),
            Span::styled(
                node.label.clone(),
                Style::default()
                    .fg(theme.text_primary)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        field_line("Kind", node.resource_type.to_string(), theme),
        field_line("Namespace", node.namespace.clone(), theme),
        Line::from(vec![
            Span::styled("Status: ", Style::default().fg(theme.text_label)),
            Span::styled(
                format!("{} {}", presentation.status_icon, node.status),
                Style::default().fg(theme.status_color(&presentation, 1.0)),
            ),
        ]),
        Line::from(""),
    ];
    lines.extend(
        detail_lines(node)
            .into_iter()
            .map(|line| Line::from(Span::styled(line, Style::default().fg(theme.text_value)))),
    );

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}

/// Render the popup for a clicked ConfigMap or Secret
///
/// Secret values are never shown; only key names are available.
pub fn render_resource_detail(
    f: &mut Frame,
    area: Rect,
    route: &Route,
    snapshot: Option<&ResourceSnapshot>,
    theme: &Theme,
) {
    let lines = snapshot
        .and_then(|snapshot| resource_lines(route, snapshot, theme))
        .unwrap_or_else(|| {
            vec![Line::from(Span::styled(
                format!("{} is no longer present", route),
                Style::default().fg(theme.status_error),
            ))]
        });

    let height = (lines.len() as u16).saturating_add(3);
    let popup = centered_rect(POPUP_WIDTH, height, area);
    let title = format!("{} (Esc to close)", route);

    f.render_widget(Clear, popup);
    f.render_widget(
        Paragraph::new(lines)
            .block(create_themed_block(title, theme))
            .wrap(Wrap { trim: false }),
        popup,
    );
}

fn resource_lines(
    route: &Route,
    snapshot: &ResourceSnapshot,
    theme: &Theme,
) -> Option<Vec<Line<'static>>> {
    let mut lines = Vec::new();
    let users: Vec<&str> = match route {
        Route::ConfigMap(name) => {
            let cm = snapshot.config_map(name)?;
            lines.push(field_line("Namespace", cm.namespace.clone(), theme));
            lines.push(field_line("Age", cm.age.clone(), theme));
            lines.push(section_line("Data", theme));
            for (key, value) in &cm.data {
                lines.push(field_line(
                    &format!("  {}", key),
                    truncate_message(value, MAX_VALUE_LEN),
                    theme,
                ));
            }
            snapshot
                .deployments
                .iter()
                .filter(|d| d.references_config_map(name))
                .map(|d| d.name.as_str())
                .collect()
        }
        Route::Secret(name) => {
            let secret = snapshot.secret(name)?;
            lines.push(field_line("Namespace", secret.namespace.clone(), theme));
            lines.push(field_line("Type", secret.secret_type.clone(), theme));
            lines.push(field_line("Age", secret.age.clone(), theme));
            lines.push(section_line("Keys", theme));
            for key in &secret.keys {
                lines.push(Line::from(Span::styled(
                    format!("  {}", key),
                    Style::default().fg(theme.text_value),
                )));
            }
            snapshot
                .deployments
                .iter()
                .filter(|d| d.references_secret(name))
                .map(|d| d.name.as_str())
                .collect()
        }
        Route::Deployment(_) | Route::Pod(_) => return None,
    };

    let used_by = if users.is_empty() {
        "-".to_string()
    } else {
        users.join(", ")
    };
    lines.push(field_line("Used by", used_by, theme));
    Some(lines)
}

fn field_line(label: &str, value: String, theme: &Theme) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{}: ", label), Style::default().fg(theme.text_label)),
        Span::styled(value, Style::default().fg(theme.text_value)),
    ])
}

fn section_line(title: &str, theme: &Theme) -> Line<'static> {
    Line::from(Span::styled(
        format!("{}:", title),
        Style::default()
            .fg(theme.text_label)
            .add_modifier(Modifier::BOLD),
    ))
}
