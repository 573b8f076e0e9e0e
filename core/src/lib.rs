//! Core logic for the todo service.
//!
//! # Overview
//! An ordered in-memory list of todos with store-assigned integer ids, a
//! single-slot snapshot cache in front of list reads, and validation of the
//! JSON payloads that mutate the list.
//!
//! # Design
//! - `TodoStore` is the only authority for ids and ordering.
//! - `SnapshotCache` is an accelerator behind a small trait; `NoCache`
//!   proves correctness does not depend on it.
//! - `validate` turns raw JSON into typed payloads or a field-level
//!   `ValidationError`.
//! - `TodoService` ties the three together and knows nothing about HTTP.

pub mod cache;
pub mod error;
pub mod service;
pub mod store;
pub mod types;
pub mod validate;

pub use cache::{NoCache, SnapshotCache, TtlCache};
pub use error::{TodoError, ValidationError};
pub use service::TodoService;
pub use store::TodoStore;
pub use types::{NewTodo, Todo, TodoPatch};
