//! Async data fetching
//!
//! The App never awaits. It records that a fetch is wanted; the run loop
//! takes the request, spawns the provider call and the result comes back
//! over a oneshot channel that is polled every frame.

use super::core::App;
use super::state::FetchRequest;
use crate::datasource::{DataSourceError, DataSourceResult, ResourceSnapshot};
use std::time::Duration;
use tokio::sync::oneshot::error::TryRecvError;

impl App {
    /// Ask for a refresh; `invalidate` also drops cached demo data
    pub fn request_refresh(&mut self, invalidate: bool) {
        if self.fetch_state.rx.is_some() {
            tracing::debug!("Refresh already in flight");
            return;
        }
        let invalidate = invalidate || self.fetch_state.pending.unwrap_or(false);
        self.fetch_state.pending = Some(invalidate);
    }

    /// Queue a periodic refresh once `interval` has passed since the last one
    ///
    /// A zero interval disables periodic refreshes.
    pub fn schedule_refresh(&mut self, interval: Duration) {
        if interval.is_zero() || self.fetch_state.in_flight() {
            return;
        }
        let due = self
            .fetch_state
            .last_refresh
            .is_none_or(|last| last.elapsed() >= interval);
        if due {
            self.fetch_state.pending = Some(false);
        }
    }

    /// Trigger a fetch if one is pending
    pub fn trigger_fetch(&mut self) -> Option<FetchRequest> {
        let invalidate = self.fetch_state.pending.take()?;
        let (tx, rx) = tokio::sync::oneshot::channel();
        self.fetch_state.rx = Some(rx);
        Some(FetchRequest {
            namespace: self.namespace().to_string(),
            invalidate,
            tx,
        })
    }

    /// Try to get the result of the in-flight fetch
    pub fn try_get_fetch_result(&mut self) -> Option<DataSourceResult<ResourceSnapshot>> {
        let rx = self.fetch_state.rx.as_mut()?;
        match rx.try_recv() {
            Ok(result) => {
                self.fetch_state.rx = None;
                Some(result)
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Closed) => {
                self.fetch_state.rx = None;
                Some(Err(DataSourceError::Task(
                    "ended without a result".to_string(),
                )))
            }
        }
    }

    /// Apply a finished fetch
    pub fn apply_fetch_result(&mut self, result: DataSourceResult<ResourceSnapshot>) {
        match result {
            Ok(snapshot) => self.set_snapshot(snapshot),
            Err(e) => self.set_fetch_error(e.to_string()),
        }
    }
}
