//! Application state structures
//!
//! Sub-structures that group the App's fields: which view is shown and how
//! the user got there, transient UI flags, and in-flight data fetches.

use crate::datasource::{DataSourceResult, ResourceSnapshot};
use crate::interaction::{Navigator, Route};
use crate::view::TopologyView;
use ratatui::layout::Rect;
use std::time::Instant;
use tokio::sync::oneshot;

/// Current view, the views behind it, and an open ConfigMap/Secret panel
///
/// Node clicks land here through [`Navigator`]: Deployment and Pod routes
/// push a new graph view, ConfigMap and Secret routes open a detail panel
/// over the current graph.
#[derive(Debug)]
pub struct ViewRouter {
    current: TopologyView,
    history: Vec<TopologyView>,
    detail: Option<Route>,
    view_changed: bool,
}

impl ViewRouter {
    pub fn new(view: TopologyView) -> Self {
        Self {
            current: view,
            history: Vec::new(),
            detail: None,
            view_changed: true,
        }
    }

    pub fn current(&self) -> &TopologyView {
        &self.current
    }

    pub fn history(&self) -> &[TopologyView] {
        &self.history
    }

    pub fn detail(&self) -> Option<&Route> {
        self.detail.as_ref()
    }

    pub fn close_detail(&mut self) -> bool {
        self.detail.take().is_some()
    }

    /// Switch to `view`, remembering the current one. No-op if already shown.
    pub fn push(&mut self, view: TopologyView) {
        self.detail = None;
        if view == self.current {
            return;
        }
        let previous = std::mem::replace(&mut self.current, view);
        self.history.push(previous);
        self.view_changed = true;
    }

    /// Return to the previous view. False if there is none.
    pub fn back(&mut self) -> bool {
        let Some(previous) = self.history.pop() else {
            return false;
        };
        self.current = previous;
        self.detail = None;
        self.view_changed = true;
        true
    }

    /// Whether the graph must be rebuilt for a new view, clearing the flag
    pub fn take_view_change(&mut self) -> bool {
        std::mem::take(&mut self.view_changed)
    }
}

impl Navigator for ViewRouter {
    fn navigate(&mut self, route: &Route) {
        match TopologyView::for_route(route) {
            Some(view) => self.push(view),
            None => self.detail = Some(route.clone()),
        }
    }
}

/// UI-related state (overlays, status messages, layout cache)
#[derive(Debug, Default)]
pub struct UIState {
    /// Graph shown in a full-terminal modal
    pub fullscreen: bool,
    pub show_help: bool,
    /// Status message to display (message, is_error)
    pub status_message: Option<(String, bool)>,
    pub status_message_time: Option<Instant>,
    /// Graph area of the last frame, used for mouse hit-testing
    pub graph_area: Option<Rect>,
    /// Size of the graph area the viewport was last fitted to
    pub fitted_size: Option<(u16, u16)>,
    /// Last cell of an active left-button drag
    pub drag_origin: Option<(u16, u16)>,
    /// Advances every frame; drives animated edges
    pub tick: u64,
}

/// A fetch the run loop should start
pub struct FetchRequest {
    pub namespace: String,
    /// Drop provider caches before fetching
    pub invalidate: bool,
    pub tx: oneshot::Sender<DataSourceResult<ResourceSnapshot>>,
}

/// Data fetch state
#[derive(Debug, Default)]
pub struct FetchState {
    pub snapshot: Option<ResourceSnapshot>,
    /// Fetch requested but not yet handed to the run loop (invalidate flag)
    pub pending: Option<bool>,
    pub rx: Option<oneshot::Receiver<DataSourceResult<ResourceSnapshot>>>,
    pub last_refresh: Option<Instant>,
    pub last_error: Option<String>,
}

impl FetchState {
    pub fn in_flight(&self) -> bool {
        self.pending.is_some() || self.rx.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_router_routes_clicks() {
        let mut router = ViewRouter::new(TopologyView::Namespace);
        assert!(router.take_view_change());

        router.navigate(&Route::Secret("db-secret".to_string()));
        assert_eq!(router.detail(), Some(&Route::Secret("db-secret".to_string())));
        assert!(!router.take_view_change());

        router.navigate(&Route::Deployment("web".to_string()));
        assert!(router.detail().is_none());
        assert!(router.take_view_change());
        assert_eq!(
            router.current(),
            &TopologyView::Deployment {
                name: "web".to_string()
            }
        );
        assert_eq!(router.history(), &[TopologyView::Namespace]);
    }

    #[test]
    fn test_router_back() {
        let mut router = ViewRouter::new(TopologyView::Namespace);
        router.take_view_change();
        assert!(!router.back());

        router.navigate(&Route::Pod("web-1".to_string()));
        router.navigate(&Route::Pod("web-1".to_string()));
        assert_eq!(router.history().len(), 1);
        router.take_view_change();

        assert!(router.back());
        assert!(router.take_view_change());
        assert_eq!(router.current(), &TopologyView::Namespace);
    }
}
