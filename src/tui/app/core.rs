//! Application state and main TUI logic

use super::state::{FetchState, UIState, ViewRouter};
use crate::config::Config;
use crate::datasource::{DataMode, ResourceSnapshot};
use crate::interaction::{GraphInteraction, HighlightStyle};
use crate::presentation::IconSet;
use crate::topology::TopologyGraph;
use crate::tui::constants::STATUS_MESSAGE_TIMEOUT_SECS;
use crate::tui::theme::Theme;
use crate::tui::viewport::Viewport;
use crate::view::TopologyView;
use ratatui::layout::Rect;
use std::time::{Duration, Instant};

/// Main application state
pub struct App {
    // Core data
    pub(crate) config: Config,
    pub(crate) theme: Theme,
    pub(crate) context: String,
    pub(crate) icons: IconSet,

    // Organized state
    pub(crate) router: ViewRouter,
    pub(crate) interaction: GraphInteraction,
    pub(crate) viewport: Viewport,
    pub(crate) ui_state: UIState,
    pub(crate) fetch_state: FetchState,
}

impl App {
    pub fn new(config: Config, view: TopologyView, context: String) -> Self {
        let style = HighlightStyle::default().with_dim_opacity(config.ui.dim_opacity);
        let ui_state = UIState {
            fullscreen: config.ui.start_fullscreen,
            ..Default::default()
        };

        Self {
            icons: IconSet::from_no_icons(config.ui.no_icons),
            theme: Theme::default(),
            context,
            router: ViewRouter::new(view),
            interaction: GraphInteraction::default().with_style(style),
            viewport: Viewport::default(),
            ui_state,
            fetch_state: FetchState {
                // First fetch starts as soon as the run loop does
                pending: Some(false),
                ..Default::default()
            },
            config,
        }
    }

    pub fn namespace(&self) -> &str {
        &self.config.default_namespace
    }

    pub fn mode(&self) -> DataMode {
        self.config.mode
    }

    pub fn context(&self) -> &str {
        &self.context
    }

    pub fn current_view(&self) -> &TopologyView {
        self.router.current()
    }

    pub fn router(&self) -> &ViewRouter {
        &self.router
    }

    pub fn interaction(&self) -> &GraphInteraction {
        &self.interaction
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn graph(&self) -> &TopologyGraph {
        self.interaction.graph()
    }

    pub fn snapshot(&self) -> Option<&ResourceSnapshot> {
        self.fetch_state.snapshot.as_ref()
    }

    pub fn is_fullscreen(&self) -> bool {
        self.ui_state.fullscreen
    }

    pub fn show_help(&self) -> bool {
        self.ui_state.show_help
    }

    pub fn status_message(&self) -> Option<&(String, bool)> {
        self.ui_state.status_message.as_ref()
    }

    /// Where the graph was drawn in the last frame
    pub fn graph_area(&self) -> Option<Rect> {
        self.ui_state.graph_area
    }

    /// Toggle the fullscreen graph
    ///
    /// Only the container changes: the mirrored graph, hover and selection
    /// stay exactly as they are.
    pub fn toggle_fullscreen(&mut self) {
        self.ui_state.fullscreen = !self.ui_state.fullscreen;
        tracing::debug!("Fullscreen: {}", self.ui_state.fullscreen);
    }

    pub fn set_status_message(&mut self, message: (String, bool)) {
        self.ui_state.status_message = Some(message);
        self.ui_state.status_message_time = Some(Instant::now());
    }

    pub(crate) fn check_status_message_timeout(&mut self) {
        let expired = self
            .ui_state
            .status_message_time
            .is_some_and(|t| t.elapsed() >= Duration::from_secs(STATUS_MESSAGE_TIMEOUT_SECS));
        if expired {
            self.ui_state.status_message = None;
            self.ui_state.status_message_time = None;
        }
    }

    /// Open a graph view, remembering the current one for Esc
    pub fn open_view(&mut self, view: TopologyView) {
        self.router.push(view);
        self.rebuild_if_view_changed();
    }

    /// Go back one view. Returns false if there is nothing to go back to.
    pub fn go_back(&mut self) -> bool {
        let moved = self.router.back();
        self.rebuild_if_view_changed();
        moved
    }

    pub(crate) fn rebuild_if_view_changed(&mut self) {
        if self.router.take_view_change() {
            self.rebuild_graph();
        }
    }

    /// Build the current view from the cached snapshot
    ///
    /// A graph equal to the mirrored one leaves hover, selection and the
    /// viewport untouched, so a refresh with unchanged data is invisible.
    pub(crate) fn rebuild_graph(&mut self) {
        let Some(snapshot) = self.fetch_state.snapshot.as_ref() else {
            return;
        };

        let graph = match self.router.current().build(snapshot) {
            Ok(graph) => graph,
            Err(e) => {
                tracing::warn!("Failed to build {}: {}", self.router.current(), e);
                self.set_status_message((e.to_string(), true));
                TopologyGraph::empty()
            }
        };

        if self.interaction.sync(&graph) {
            tracing::debug!(
                "Graph replaced (generation {}): {} nodes, {} edges",
                self.interaction.generation(),
                graph.nodes.len(),
                graph.edges.len()
            );
        }
    }

    /// Install freshly fetched data and rebuild the current view
    pub fn set_snapshot(&mut self, snapshot: ResourceSnapshot) {
        tracing::info!(
            "Loaded {} resources for namespace {}",
            snapshot.resource_count(),
            snapshot.namespace
        );
        self.fetch_state.snapshot = Some(snapshot);
        self.fetch_state.last_refresh = Some(Instant::now());
        self.fetch_state.last_error = None;
        // Pending view changes are covered by the rebuild below
        self.router.take_view_change();
        self.rebuild_graph();
    }

    pub fn set_fetch_error(&mut self, error: String) {
        tracing::warn!("Fetch failed: {}", error);
        self.fetch_state.last_refresh = Some(Instant::now());
        self.set_status_message((format!("Refresh failed: {}", error), true));
        self.fetch_state.last_error = Some(error);
    }

    pub fn last_error(&self) -> Option<&str> {
        self.fetch_state.last_error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.fetch_state.snapshot.is_none() && self.fetch_state.in_flight()
    }

    /// Advance the animation clock by one frame
    pub fn tick(&mut self) {
        self.ui_state.tick = self.ui_state.tick.wrapping_add(1);
    }
}
