//! Error types for the todo core.
//!
//! # Design
//! Both failure kinds are deterministic: retrying the same call reproduces
//! the same error, so callers map them straight to a response instead of
//! retrying. Anything else that can go wrong lives in the HTTP layer.

/// A field-level rejection of a mutation payload.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// `task` was absent, `null` or the empty string on creation.
    #[error("Task is required and must be a string")]
    TaskMissing,

    /// `task` was present but not a string.
    #[error("Task must be a string")]
    TaskNotString,

    /// `completed` was present but not a boolean.
    #[error("Completed must be a boolean")]
    CompletedNotBoolean,
}

impl ValidationError {
    /// Name of the payload field that was rejected.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::TaskMissing | ValidationError::TaskNotString => "task",
            ValidationError::CompletedNotBoolean => "completed",
        }
    }
}

/// Errors returned by `TodoStore` and `TodoService`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TodoError {
    /// No todo has the requested id.
    #[error("todo {0} not found")]
    NotFound(u64),

    /// The mutation payload failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}
