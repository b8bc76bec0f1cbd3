//! Request and response bodies for the HTTP surface.
//!
//! Typed at the boundary: unknown body fields are rejected, missing required
//! fields fail deserialization, and partial updates are all-`Option` so only
//! supplied fields reach the use case.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use todo_core::{NewTodo, Todo, TodoId, TodoPatch};

/// Body for `POST /todos`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateTodoRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub priority: i64,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl CreateTodoRequest {
    pub fn into_draft(self) -> todo_core::Result<NewTodo> {
        NewTodo::new(&self.title, self.description, self.priority, self.tags)
    }
}

/// Body for `PATCH /todos/{id}`. Omitted fields remain unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateTodoRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<i64>,
    pub tags: Option<Vec<String>>,
    pub is_done: Option<bool>,
}

impl UpdateTodoRequest {
    pub fn into_patch(self) -> TodoPatch {
        TodoPatch {
            title: self.title,
            description: self.description,
            priority: self.priority,
            tags: self.tags,
            is_done: self.is_done,
        }
    }
}

/// A todo as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoOut {
    pub id: TodoId,
    pub title: String,
    pub description: Option<String>,
    pub priority: i64,
    pub tags: Vec<String>,
    pub is_done: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Todo> for TodoOut {
    fn from(todo: Todo) -> Self {
        Self {
            id: todo.id,
            title: todo.title,
            description: todo.description,
            priority: todo.priority,
            tags: todo.tags,
            is_done: todo.is_done,
            created_at: todo.created_at,
            updated_at: todo.updated_at,
        }
    }
}
