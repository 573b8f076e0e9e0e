//! In-process todo storage.
//!
//! # Design
//! Todos live in a `Vec` in insertion order; lookups are linear scans, which
//! is fine for the handful of items a single list holds. The store is the
//! only place ids are assigned: a new id is one above the current maximum,
//! so ids freed at the top of the range (or by draining the list) are handed
//! out again.

use crate::error::TodoError;
use crate::types::{NewTodo, Todo, TodoPatch};

#[derive(Debug, Clone, Default)]
pub struct TodoStore {
    todos: Vec<Todo>,
}

impl TodoStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// The two starter todos the service boots with.
    pub fn seeded() -> Self {
        Self::from_todos(vec![
            Todo {
                id: 1,
                task: "Learn Rust".to_string(),
                completed: false,
            },
            Todo {
                id: 2,
                task: "Build the Todo API".to_string(),
                completed: false,
            },
        ])
    }

    pub fn from_todos(todos: Vec<Todo>) -> Self {
        Self { todos }
    }

    pub fn len(&self) -> usize {
        self.todos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.todos.is_empty()
    }

    pub fn list_all(&self) -> &[Todo] {
        &self.todos
    }

    pub fn get_by_id(&self, id: u64) -> Option<&Todo> {
        self.todos.iter().find(|t| t.id == id)
    }

    pub fn create(&mut self, input: NewTodo) -> Todo {
        let todo = Todo {
            id: self.next_id(),
            task: input.task,
            completed: false,
        };
        self.todos.push(todo.clone());
        todo
    }

    /// Apply only the fields present in `patch`.
    pub fn update(&mut self, id: u64, patch: TodoPatch) -> Result<Todo, TodoError> {
        let todo = self
            .todos
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(TodoError::NotFound(id))?;
        if let Some(task) = patch.task {
            todo.task = task;
        }
        if let Some(completed) = patch.completed {
            todo.completed = completed;
        }
        Ok(todo.clone())
    }

    pub fn delete(&mut self, id: u64) -> Result<(), TodoError> {
        let index = self
            .todos
            .iter()
            .position(|t| t.id == id)
            .ok_or(TodoError::NotFound(id))?;
        self.todos.remove(index);
        Ok(())
    }

    fn next_id(&self) -> u64 {
        self.todos.iter().map(|t| t.id).max().map_or(1, |max| max + 1)
    }
}
