//! Topology graph rendering
//!
//! Edges go on a Braille canvas underneath; nodes are bordered boxes drawn
//! on top at the viewport positions. Everything visual comes from the hover
//! projection, so this module never decides what is dimmed.

use crate::interaction::{Emphasis, ProjectedGraph, StyledEdge, StyledNode};
use crate::presentation::{IconSet, present_node};
use crate::tui::constants::EDGE_DASH;
use crate::tui::theme::Theme;
use crate::tui::viewport::Viewport;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        Block, BorderType, Borders, Clear, Paragraph,
        canvas::{Canvas, Context, Line as CanvasLine},
    },
};
use std::collections::HashMap;

/// Everything the graph widget needs for one frame
pub struct GraphFrame<'a> {
    pub projected: &'a ProjectedGraph<'a>,
    pub viewport: &'a Viewport,
    pub selected: Option<&'a str>,
    pub icons: IconSet,
    /// Animation clock
    pub tick: u64,
}

/// Render the graph into `area` (no outer block)
pub fn render_graph(f: &mut Frame, area: Rect, frame: &GraphFrame<'_>, theme: &Theme) {
    if area.width == 0 || area.height == 0 {
        return;
    }

    let centers: HashMap<&str, (f64, f64)> = frame
        .projected
        .nodes
        .iter()
        .map(|styled| {
            (
                styled.node.id.as_str(),
                frame.viewport.node_center(styled.node),
            )
        })
        .collect();

    let width = f64::from(area.width);
    let height = f64::from(area.height);
    let phase = (frame.tick % 4) as f64 * EDGE_DASH / 2.0;

    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .background_color(theme.canvas_background)
        .x_bounds([0.0, width])
        .y_bounds([0.0, height])
        .paint(|ctx| {
            for styled in &frame.projected.edges {
                let (Some(&from), Some(&to)) = (
                    centers.get(styled.edge.source.as_str()),
                    centers.get(styled.edge.target.as_str()),
                ) else {
                    continue;
                };
                // Canvas y grows upward, rows grow downward
                let from = (from.0, height - from.1);
                let to = (to.0, height - to.1);
                draw_edge(ctx, styled, from, to, phase, theme);
            }
        });
    f.render_widget(canvas, area);

    for styled in &frame.projected.nodes {
        let Some(rect) = frame.viewport.node_rect(styled.node, area) else {
            continue;
        };
        let selected = frame.selected == Some(styled.node.id.as_str());
        render_node(f, rect, styled, selected, frame.icons, theme);
    }
}

fn draw_edge(
    ctx: &mut Context<'_>,
    styled: &StyledEdge<'_>,
    from: (f64, f64),
    to: (f64, f64),
    phase: f64,
    theme: &Theme,
) {
    let base = if styled.emphasized {
        theme.edge_emphasized
    } else {
        theme.edge
    };
    let color = theme.fade(base, styled.opacity);

    let mut strokes = vec![(0.0, 0.0)];
    if styled.stroke_width > 1.0 {
        // One Braille dot column to the side reads as a thicker line
        let (dx, dy) = (to.0 - from.0, to.1 - from.1);
        let len = (dx * dx + dy * dy).sqrt().max(f64::EPSILON);
        strokes.push((-dy / len * 0.5, dx / len * 0.5));
    }

    for (ox, oy) in strokes {
        let a = (from.0 + ox, from.1 + oy);
        let b = (to.0 + ox, to.1 + oy);
        if styled.animated {
            draw_dashed(ctx, a, b, phase, color);
        } else {
            ctx.draw(&CanvasLine::new(a.0, a.1, b.0, b.1, color));
        }
    }
}

/// Dashed segment whose pattern is shifted by `phase`, so it marches as
/// the phase advances
fn draw_dashed(
    ctx: &mut Context<'_>,
    from: (f64, f64),
    to: (f64, f64),
    phase: f64,
    color: ratatui::style::Color,
) {
    let (dx, dy) = (to.0 - from.0, to.1 - from.1);
    let len = (dx * dx + dy * dy).sqrt();
    if len < f64::EPSILON {
        return;
    }
    let (ux, uy) = (dx / len, dy / len);
    let period = EDGE_DASH * 2.0;

    let mut start = phase % period - period;
    while start < len {
        let a = start.max(0.0);
        let b = (start + EDGE_DASH).min(len);
        if b > a {
            ctx.draw(&CanvasLine::new(
                from.0 + ux * a,
                from.1 + uy * a,
                from.0 + ux * b,
                from.1 + uy * b,
                color,
            ));
        }
        start += period;
    }
}

fn render_node(
    f: &mut Frame,
    rect: Rect,
    styled: &StyledNode<'_>,
    selected: bool,
    icons: IconSet,
    theme: &Theme,
) {
    let node = styled.node;
    let presentation = present_node(node, icons);
    let accent = theme.resource_color(&presentation, styled.opacity);
    let status_color = theme.status_color(&presentation, styled.opacity);
    let text = theme.fade(theme.text_primary, styled.opacity);
    let secondary = theme.fade(theme.text_secondary, styled.opacity);

    let border_color = if selected { theme.node_selected } else { accent };
    let border_type = if styled.emphasis == Emphasis::Hovered {
        BorderType::Thick
    } else {
        BorderType::Rounded
    };

    let title = Line::from(vec![
        Span::styled(format!(" {} ", presentation.icon), Style::default().fg(accent)),
        Span::styled(
            format!("{} ", node.resource_type),
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        ),
    ]);

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(border_type)
        .border_style(Style::default().fg(border_color));

    let mut label_style = Style::default().fg(text);
    if styled.emphasis != Emphasis::Dimmed {
        label_style = label_style.add_modifier(Modifier::BOLD);
    }

    let mut lines = vec![Line::from(vec![
        Span::styled(
            format!("{} ", presentation.status_icon),
            Style::default().fg(status_color),
        ),
        Span::styled(node.label.clone(), label_style),
    ])];
    if let Some((key, value)) = node.details.first() {
        lines.push(Line::from(Span::styled(
            format!("{}: {}", key, value),
            Style::default().fg(secondary),
        )));
    }

    f.render_widget(Clear, rect);
    f.render_widget(Paragraph::new(lines).block(block), rect);
}
