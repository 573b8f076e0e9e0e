//! Orchestration of validation, storage and caching.
//!
//! # Design
//! `TodoService` owns its store and cache outright; callers share it behind
//! whatever lock suits them. Every mutating method takes `&mut self` and
//! clears the cache before returning, so holding the lock for the duration
//! of a call is enough to make "mutate, then invalidate" atomic for readers.

use serde_json::Value;
use tracing::{info, warn};

use crate::cache::{SnapshotCache, TtlCache};
use crate::error::TodoError;
use crate::store::TodoStore;
use crate::types::Todo;
use crate::validate::{validate_create, validate_update};

pub struct TodoService {
    store: TodoStore,
    cache: Box<dyn SnapshotCache>,
}

impl TodoService {
    pub fn new(store: TodoStore, cache: impl SnapshotCache + 'static) -> Self {
        Self {
            store,
            cache: Box::new(cache),
        }
    }

    /// The seeded store behind a one-hour snapshot cache.
    pub fn seeded() -> Self {
        Self::new(TodoStore::seeded(), TtlCache::new())
    }

    /// All todos in insertion order, from the cache when possible.
    pub fn list(&self) -> Vec<Todo> {
        if let Some(snapshot) = self.cache.get() {
            info!("serving todos from cache");
            return snapshot;
        }
        info!("serving todos from store");
        let snapshot = self.store.list_all().to_vec();
        self.cache.set(snapshot.clone());
        snapshot
    }

    pub fn get(&self, id: u64) -> Result<Todo, TodoError> {
        match self.store.get_by_id(id) {
            Some(todo) => {
                info!(id, "fetched todo");
                Ok(todo.clone())
            }
            None => {
                warn!(id, "todo not found");
                Err(TodoError::NotFound(id))
            }
        }
    }

    pub fn create(&mut self, body: &Value) -> Result<Todo, TodoError> {
        let input = validate_create(body).inspect_err(|e| {
            warn!(field = e.field(), reason = %e, "invalid create payload");
        })?;
        let todo = self.store.create(input);
        self.cache.invalidate();
        info!(id = todo.id, "created todo");
        Ok(todo)
    }

    /// Partial update. An unknown id is reported before the payload is
    /// looked at.
    pub fn update(&mut self, id: u64, body: &Value) -> Result<Todo, TodoError> {
        if self.store.get_by_id(id).is_none() {
            warn!(id, "todo not found");
            return Err(TodoError::NotFound(id));
        }
        let patch = validate_update(body).inspect_err(|e| {
            warn!(id, field = e.field(), reason = %e, "invalid update payload");
        })?;
        let todo = self.store.update(id, patch)?;
        self.cache.invalidate();
        info!(id, "updated todo");
        Ok(todo)
    }

    pub fn delete(&mut self, id: u64) -> Result<(), TodoError> {
        self.store.delete(id).inspect_err(|_| {
            warn!(id, "todo not found");
        })?;
        self.cache.invalidate();
        info!(id, "deleted todo");
        Ok(())
    }
}
