//! Domain layer: the `Todo` entity and the persistence contract.

pub mod repository;
pub mod todo;
