//! Rendering logic for the application
//!
//! Inline layout is header, graph with an optional side panel, and footer.
//! Fullscreen hands the whole frame to the graph. Both render the same
//! mirrored graph and the same interaction state.

use super::core::App;
use crate::tui::constants::{
    FOOTER_HEIGHT, HEADER_HEIGHT, MIN_TERMINAL_HEIGHT, MIN_TERMINAL_WIDTH,
    SIDE_PANEL_MIN_TERMINAL_WIDTH, SIDE_PANEL_WIDTH,
};
use crate::tui::views::{self, GraphFrame, HeaderInfo, helpers};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    text::Line,
    widgets::{Block, Borders, Paragraph},
};

impl App {
    /// Main render entry point
    pub fn render(&mut self, f: &mut Frame) {
        self.check_status_message_timeout();
        self.tick();

        let size = f.area();
        if size.width < MIN_TERMINAL_WIDTH || size.height < MIN_TERMINAL_HEIGHT {
            let error_lines = vec![
                Line::from(""),
                Line::from(format!(
                    "Terminal too small! Need at least {}x{} (current: {}x{})",
                    MIN_TERMINAL_WIDTH, MIN_TERMINAL_HEIGHT, size.width, size.height
                )),
                Line::from("Please resize your terminal window."),
            ];
            let error_block = Block::default().title("Error").borders(Borders::ALL);
            f.render_widget(Paragraph::new(error_lines).block(error_block), size);
            return;
        }

        if self.ui_state.fullscreen {
            self.render_fullscreen(f, size);
        } else {
            self.render_inline(f, size);
        }

        if let Some(route) = self.router.detail() {
            views::render_resource_detail(f, size, route, self.snapshot(), &self.theme);
        }

        if self.ui_state.show_help {
            let popup = helpers::centered_rect(size.width.saturating_sub(8), 16, size);
            views::render_help(f, popup, &self.theme);
        }
    }

    fn render_inline(&mut self, f: &mut Frame, size: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(HEADER_HEIGHT),
                Constraint::Min(0),
                Constraint::Length(FOOTER_HEIGHT),
            ])
            .split(size);

        let info = HeaderInfo {
            context: &self.context,
            namespace: self.namespace(),
            mode: self.config.mode.as_str(),
            view: self.router.current(),
            history: self.router.history(),
            node_count: self.graph().nodes.len(),
            edge_count: self.graph().edges.len(),
            resource_count: self.snapshot().map_or(0, |s| s.resource_count()),
        };
        views::render_header(f, chunks[0], &info, &self.theme);

        let main = chunks[1];
        let (graph_area, panel_area) = if size.width >= SIDE_PANEL_MIN_TERMINAL_WIDTH {
            let split = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Min(0), Constraint::Length(SIDE_PANEL_WIDTH)])
                .split(main);
            (split[0], Some(split[1]))
        } else {
            (main, None)
        };

        let title = self.router.current().to_string();
        self.render_graph_block(f, graph_area, title);

        if let Some(panel) = panel_area {
            let focused = self
                .interaction
                .hovered_node()
                .or_else(|| {
                    self.interaction
                        .selected_node_id()
                        .and_then(|id| self.graph().node(id))
                });
            views::render_node_panel(f, panel, focused, self.icons, &self.theme);
        }

        views::render_footer(
            f,
            chunks[2],
            self.ui_state.show_help,
            self.status_message(),
            &self.theme,
        );
    }

    fn render_fullscreen(&mut self, f: &mut Frame, size: Rect) {
        let mut title = format!("{} [fullscreen]", self.router.current());
        if let Some((msg, _)) = self.status_message() {
            title = format!("{} {}", title, msg);
        }
        self.render_graph_block(f, size, title);
    }

    /// Render the bordered graph area, fitting the viewport first if needed
    fn render_graph_block(&mut self, f: &mut Frame, area: Rect, title: String) {
        if self.is_loading() {
            self.ui_state.graph_area = None;
            helpers::render_loading_state(
                f,
                area,
                &title,
                &format!("Loading resources in {}...", self.namespace()),
                &self.theme,
            );
            return;
        }

        if self.graph().is_empty() {
            self.ui_state.graph_area = None;
            let message = match self.last_error() {
                Some(error) => format!("Could not load resources: {}", error),
                None => "No resources to show".to_string(),
            };
            helpers::render_empty_state(
                f,
                area,
                &title,
                &message,
                "Press r to refresh, n for the namespace view",
                &self.theme,
            );
            return;
        }

        let block = helpers::create_themed_block(title, &self.theme);
        let inner = block.inner(area);
        f.render_widget(block, area);

        self.fit_if_needed(inner);
        self.ui_state.graph_area = Some(inner);

        let projected = self.interaction.styled();
        let frame = GraphFrame {
            projected: &projected,
            viewport: &self.viewport,
            selected: self.interaction.selected_node_id(),
            icons: self.icons,
            tick: self.ui_state.tick,
        };
        views::render_graph(f, inner, &frame, &self.theme);
    }

    /// Re-fit when the graph was replaced, a fit was asked for, or the
    /// available area changed size
    fn fit_if_needed(&mut self, inner: Rect) {
        let size = (inner.width, inner.height);
        let requested = self.interaction.take_fit_request();
        if requested || self.ui_state.fitted_size != Some(size) {
            self.viewport
                .fit(self.interaction.graph(), inner.width, inner.height);
            self.ui_state.fitted_size = Some(size);
        }
    }
}
