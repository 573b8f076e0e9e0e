//! Payload validation for mutating operations.
//!
//! Works on the raw JSON value rather than a derived struct: a missing field,
//! an explicit `null` and a value of the wrong type all lead to different
//! outcomes, and serde defaults would blur them together. A body that is
//! valid JSON but not an object simply has no fields.

use serde_json::Value;

use crate::error::ValidationError;
use crate::types::{NewTodo, TodoPatch};

/// Check a creation payload. `task` must be a non-empty string.
pub fn validate_create(body: &Value) -> Result<NewTodo, ValidationError> {
    match body.get("task") {
        None | Some(Value::Null) => Err(ValidationError::TaskMissing),
        Some(Value::String(task)) if task.is_empty() => Err(ValidationError::TaskMissing),
        Some(Value::String(task)) => Ok(NewTodo { task: task.clone() }),
        Some(_) => Err(ValidationError::TaskNotString),
    }
}

/// Check an update payload. Both fields are optional, but a field that is
/// present (even as `null`) must have the right type. `task` is checked
/// first.
pub fn validate_update(body: &Value) -> Result<TodoPatch, ValidationError> {
    let task = match body.get("task") {
        None => None,
        Some(Value::String(task)) => Some(task.clone()),
        Some(_) => return Err(ValidationError::TaskNotString),
    };
    let completed = match body.get("completed") {
        None => None,
        Some(Value::Bool(completed)) => Some(*completed),
        Some(_) => return Err(ValidationError::CompletedNotBoolean),
    };
    Ok(TodoPatch { task, completed })
}
