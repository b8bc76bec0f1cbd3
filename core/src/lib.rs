//! Core library for the todo service.
//!
//! # Overview
//! Implements the todo domain in layers: `domain` holds the entity and the
//! repository contract, `usecase` the application operations, and `db` the
//! SQLite adapter. HTTP lives in the `todo-server` crate; nothing in here
//! knows about status codes or request bodies.
//!
//! # Design
//! - `TodoRepository` is the only trait boundary. Use cases hold it as
//!   `Arc<dyn TodoRepository>`, so storage can be swapped without touching
//!   the service or the HTTP layer.
//! - Every path that produces a `Todo` goes through validation in
//!   `domain::todo`; rows read back from SQLite are trusted because only
//!   validated entities are ever written.
//! - Errors carry intent (`Validation`, `NotFound`, `InvalidQuery`), and the
//!   HTTP layer is the sole place that maps them to status codes.

pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod logging;
pub mod usecase;

pub use config::Config;
pub use db::SqliteTodoRepository;
pub use domain::repository::{SortField, SortKey, TodoFilter, TodoRepository};
pub use domain::todo::{NewTodo, Todo, TodoId, TodoPatch};
pub use error::{Error, Result};
pub use usecase::TodoService;
