//! SQLite adapter for the todo repository.

pub mod repo;
pub mod schema;

pub use repo::SqliteTodoRepository;
