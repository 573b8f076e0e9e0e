//! Domain types for the todo service.
//!
//! # Design
//! `Todo` is the wire shape as well as the stored record, so the JSON field
//! names here are the public contract. The payload types are only produced by
//! `validate`, which means holding one proves the input already passed the
//! type checks.

use serde::{Deserialize, Serialize};

/// A single todo item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub id: u64,
    pub task: String,
    pub completed: bool,
}

/// Validated payload for creating a new todo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTodo {
    pub task: String,
}

/// Validated payload for a partial update. `None` means the field was not
/// supplied and must be left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoPatch {
    pub task: Option<String>,
    pub completed: Option<bool>,
}

impl TodoPatch {
    pub fn is_empty(&self) -> bool {
        self.task.is_none() && self.completed.is_none()
    }
}
