//! Keyboard and mouse handling

use super::core::App;
use crate::tui::constants::{PAN_STEP_COLS, PAN_STEP_ROWS, ZOOM_STEP};
use crate::view::TopologyView;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

impl App {
    /// Handle a key press
    ///
    /// Returns Some(true) to quit, Some(false) when the key was handled and
    /// None when it did nothing.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<bool> {
        self.check_status_message_timeout();

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Some(true);
        }

        if self.ui_state.show_help {
            return match key.code {
                KeyCode::Char('q') => Some(true),
                KeyCode::Esc | KeyCode::Char('?') => {
                    self.ui_state.show_help = false;
                    Some(false)
                }
                _ => None,
            };
        }

        match key.code {
            KeyCode::Char('q') => Some(true),
            KeyCode::Esc => self.handle_escape(),
            KeyCode::Backspace => self.go_back().then_some(false),
            KeyCode::Char('?') => {
                self.ui_state.show_help = true;
                Some(false)
            }
            KeyCode::Char('f') => {
                self.toggle_fullscreen();
                Some(false)
            }
            KeyCode::Char('n') => {
                self.open_view(TopologyView::Namespace);
                Some(false)
            }
            KeyCode::Char('c') => {
                let grouping = self.namespace().to_string();
                self.open_view(TopologyView::ConfigSecrets { grouping });
                Some(false)
            }
            KeyCode::Char('r') => {
                self.request_refresh(true);
                self.set_status_message(("Refreshing...".to_string(), false));
                Some(false)
            }
            KeyCode::Tab => {
                self.interaction.select_next();
                Some(false)
            }
            KeyCode::BackTab => {
                self.interaction.select_previous();
                Some(false)
            }
            KeyCode::Enter => {
                let id = self.interaction.hovered_node_id()?.to_string();
                self.click_node(&id);
                Some(false)
            }
            KeyCode::Char('z') => {
                self.interaction.request_fit();
                Some(false)
            }
            KeyCode::Char('+') | KeyCode::Char('=') => {
                self.zoom_centered(ZOOM_STEP);
                Some(false)
            }
            KeyCode::Char('-') => {
                self.zoom_centered(1.0 / ZOOM_STEP);
                Some(false)
            }
            KeyCode::Char('h') | KeyCode::Left => {
                self.viewport.pan(PAN_STEP_COLS, 0.0);
                Some(false)
            }
            KeyCode::Char('l') | KeyCode::Right => {
                self.viewport.pan(-PAN_STEP_COLS, 0.0);
                Some(false)
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.viewport.pan(0.0, PAN_STEP_ROWS);
                Some(false)
            }
            KeyCode::Char('j') | KeyCode::Down => {
                self.viewport.pan(0.0, -PAN_STEP_ROWS);
                Some(false)
            }
            _ => None,
        }
    }

    /// Esc closes the innermost thing that is open
    fn handle_escape(&mut self) -> Option<bool> {
        if self.ui_state.status_message.take().is_some() {
            self.ui_state.status_message_time = None;
            return Some(false);
        }
        if self.router.close_detail() {
            return Some(false);
        }
        if self.ui_state.fullscreen {
            self.toggle_fullscreen();
            return Some(false);
        }
        self.go_back().then_some(false)
    }

    /// Click a node: select it and follow its route
    pub fn click_node(&mut self, node_id: &str) {
        if let Some(route) = self.interaction.on_node_click(node_id, &mut self.router) {
            tracing::debug!("Clicked {}", route);
        }
        self.rebuild_if_view_changed();
    }

    fn zoom_centered(&mut self, factor: f64) {
        let (col, row) = self
            .ui_state
            .graph_area
            .map(|area| (f64::from(area.width) / 2.0, f64::from(area.height) / 2.0))
            .unwrap_or_default();
        self.viewport.zoom_at(factor, col, row);
    }

    /// Handle a mouse event. Returns true when it changed anything.
    pub fn handle_mouse(&mut self, event: MouseEvent) -> bool {
        if !self.config.ui.enable_mouse || self.ui_state.show_help {
            return false;
        }
        let Some(area) = self.ui_state.graph_area else {
            return false;
        };
        let inside = event.column >= area.x
            && event.column < area.right()
            && event.row >= area.y
            && event.row < area.bottom();

        match event.kind {
            MouseEventKind::Moved => {
                let before = self.interaction.hovered_node_id().map(str::to_string);
                let hit = inside
                    .then(|| {
                        self.viewport
                            .node_at(self.interaction.nodes(), area, event.column, event.row)
                    })
                    .flatten()
                    .map(|node| node.id.clone());
                match hit {
                    Some(id) => self.interaction.on_node_mouse_enter(&id),
                    None if before.is_some() => self.interaction.on_node_mouse_leave(),
                    None => {}
                }
                before.as_deref() != self.interaction.hovered_node_id()
            }
            MouseEventKind::Down(MouseButton::Left) if inside => {
                let hit = self
                    .viewport
                    .node_at(self.interaction.nodes(), area, event.column, event.row)
                    .map(|node| node.id.clone());
                match hit {
                    Some(id) => self.click_node(&id),
                    None => self.ui_state.drag_origin = Some((event.column, event.row)),
                }
                true
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                let Some((col, row)) = self.ui_state.drag_origin else {
                    return false;
                };
                self.viewport.pan(
                    f64::from(event.column) - f64::from(col),
                    f64::from(event.row) - f64::from(row),
                );
                self.ui_state.drag_origin = Some((event.column, event.row));
                true
            }
            MouseEventKind::Up(MouseButton::Left) => self.ui_state.drag_origin.take().is_some(),
            MouseEventKind::ScrollUp if inside => {
                self.viewport.zoom_at(
                    ZOOM_STEP,
                    f64::from(event.column - area.x),
                    f64::from(event.row - area.y),
                );
                true
            }
            MouseEventKind::ScrollDown if inside => {
                self.viewport.zoom_at(
                    1.0 / ZOOM_STEP,
                    f64::from(event.column - area.x),
                    f64::from(event.row - area.y),
                );
                true
            }
            _ => false,
        }
    }
}
