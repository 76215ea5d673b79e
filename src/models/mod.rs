use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Todo {
    pub id: u64,
    pub name: String,
    pub completed: bool,
}

impl Todo {
    pub fn new(id: u64, name: String) -> Self {
        Self {
            id,
            name,
            completed: false,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct TodoList {
    pub id: u64,
    pub name: String,
    pub todos: Vec<Todo>,
}

impl TodoList {
    pub fn new(id: u64, name: String) -> Self {
        Self {
            id,
            name,
            todos: Vec::new(),
        }
    }

    pub fn todos_count(&self) -> usize {
        self.todos.len()
    }

    pub fn todos_remaining_count(&self) -> usize {
        self.todos.iter().filter(|todo| !todo.completed).count()
    }

    pub fn next_todo_id(&self) -> u64 {
        next_id(self.todos.iter().map(|todo| todo.id))
    }
}

/// Anything that can be shown as done or not done.
pub trait Completion {
    fn is_complete(&self) -> bool;
}

impl Completion for Todo {
    fn is_complete(&self) -> bool {
        self.completed
    }
}

impl Completion for TodoList {
    /// A list is complete once it has at least one todo and none are left open.
    fn is_complete(&self) -> bool {
        self.todos_count() > 0 && self.todos_remaining_count() == 0
    }
}

/// Yields incomplete entries first, then complete ones, keeping the original
/// relative order inside each group.
pub fn by_completion<T: Completion>(entries: &[T]) -> impl Iterator<Item = &T> {
    entries
        .iter()
        .filter(|entry| !entry.is_complete())
        .chain(entries.iter().filter(|entry| entry.is_complete()))
}

/// `max(ids) + 1`, or 1 for an empty collection.
pub fn next_id(ids: impl Iterator<Item = u64>) -> u64 {
    ids.max().unwrap_or(0) + 1
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ListError {
    #[error("{0}")]
    Validation(&'static str),
    #[error("The specified list was not found.")]
    ListNotFound(u64),
    #[error("The specified todo was not found.")]
    TodoNotFound { list_id: u64, todo_id: u64 },
}
