//! Snapshot cache for the full todo list.
//!
//! # Design
//! The cache is an accelerator only: `TodoService` behaves identically with
//! `NoCache`, which makes it easy to test the store and the cache contract
//! separately. There is exactly one slot, keyed by `CACHE_KEY`, holding the
//! whole list; writes never patch it, they clear it.

use std::time::Duration;

use moka::sync::Cache;

use crate::types::Todo;

/// Key of the single snapshot slot.
pub const CACHE_KEY: &str = "todos";

/// Default lifetime of a snapshot.
pub const DEFAULT_TTL: Duration = Duration::from_secs(3600);

/// A single-slot cache of the ordered todo list.
pub trait SnapshotCache: Send + Sync {
    /// The cached snapshot, if one is present and not expired.
    fn get(&self) -> Option<Vec<Todo>>;

    /// Store `snapshot`, restarting its time-to-live.
    fn set(&self, snapshot: Vec<Todo>);

    /// Drop the snapshot. Calling this on an empty cache is a no-op.
    fn invalidate(&self);
}

/// Time-limited snapshot cache backed by `moka`.
#[derive(Clone)]
pub struct TtlCache {
    inner: Cache<&'static str, Vec<Todo>>,
}

impl TtlCache {
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_TTL)
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            inner: Cache::builder().time_to_live(ttl).build(),
        }
    }
}

impl Default for TtlCache {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapshotCache for TtlCache {
    fn get(&self) -> Option<Vec<Todo>> {
        self.inner.get(CACHE_KEY)
    }

    fn set(&self, snapshot: Vec<Todo>) {
        self.inner.insert(CACHE_KEY, snapshot);
    }

    fn invalidate(&self) {
        self.inner.invalidate(CACHE_KEY);
    }
}

/// A cache that never holds anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCache;

impl SnapshotCache for NoCache {
    fn get(&self) -> Option<Vec<Todo>> {
        None
    }

    fn set(&self, _snapshot: Vec<Todo>) {}

    fn invalidate(&self) {}
}
