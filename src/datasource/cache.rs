//! Caller-owned cache for generated demo data
//!
//! Holds at most one snapshot, keyed by `(mode, namespace)`. Asking for a
//! different key drops the held snapshot, so switching namespace or mode is
//! what invalidates it. Whoever constructs the cache owns its lifetime; it
//! is handed to [`DemoProvider`](super::DemoProvider) explicitly.

use super::{DataMode, ResourceSnapshot};
use std::time::Instant;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    mode: DataMode,
    namespace: String,
}

#[derive(Debug, Clone)]
struct CacheEntry {
    key: CacheKey,
    snapshot: ResourceSnapshot,
    created: Instant,
}

#[derive(Debug, Default)]
pub struct DemoCache {
    entry: Option<CacheEntry>,
}

impl DemoCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached snapshot for this key, if it is the one held
    pub fn get(&self, mode: DataMode, namespace: &str) -> Option<&ResourceSnapshot> {
        self.entry
            .as_ref()
            .filter(|entry| entry.key.mode == mode && entry.key.namespace == namespace)
            .map(|entry| &entry.snapshot)
    }

    pub fn contains(&self, mode: DataMode, namespace: &str) -> bool {
        self.get(mode, namespace).is_some()
    }

    /// Return the snapshot for this key, generating it on a miss
    ///
    /// A miss on a different key replaces the previously held snapshot.
    pub fn get_or_insert_with<F>(
        &mut self,
        mode: DataMode,
        namespace: &str,
        generate: F,
    ) -> &ResourceSnapshot
    where
        F: FnOnce() -> ResourceSnapshot,
    {
        let key = CacheKey {
            mode,
            namespace: namespace.to_string(),
        };

        if let Some(previous) = self.entry.take_if(|entry| entry.key != key) {
            tracing::debug!(
                "Demo cache key changed ({}/{} -> {}/{}), regenerating",
                previous.key.mode,
                previous.key.namespace,
                mode,
                namespace
            );
        }

        let entry = self.entry.get_or_insert_with(|| CacheEntry {
            key,
            snapshot: generate(),
            created: Instant::now(),
        });
        &entry.snapshot
    }

    /// Age of the held snapshot
    pub fn age(&self) -> Option<std::time::Duration> {
        self.entry.as_ref().map(|entry| entry.created.elapsed())
    }

    pub fn invalidate(&mut self) {
        if self.entry.take().is_some() {
            tracing::debug!("Demo cache invalidated");
        }
    }
}
