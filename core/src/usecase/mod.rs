//! Application operations, one per HTTP endpoint.

pub mod todos;

pub use todos::TodoService;
