//! The persistence contract for todos, plus the filter and sort parameters
//! `list` accepts.
//!
//! This is the port side of the layering: use cases and the HTTP layer
//! depend only on `TodoRepository`, never on a concrete store.

use async_trait::async_trait;

use crate::domain::todo::{NewTodo, Todo, TodoId, TodoPatch};
use crate::error::{Error, Result};

/// Filter applied by `list`. `None` means "no filter".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TodoFilter {
    pub is_done: Option<bool>,
}

/// Fields a list can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Id,
    Title,
    Priority,
    CreatedAt,
    UpdatedAt,
}

impl SortField {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "id" => Some(Self::Id),
            "title" => Some(Self::Title),
            "priority" => Some(Self::Priority),
            "created_at" => Some(Self::CreatedAt),
            "updated_at" => Some(Self::UpdatedAt),
            _ => None,
        }
    }

    /// Column name for SQL ordering. Static strings only, so a sort key can
    /// never inject into a query.
    pub fn column(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Title => "title",
            Self::Priority => "priority",
            Self::CreatedAt => "created_at",
            Self::UpdatedAt => "updated_at",
        }
    }
}

/// A parsed sort key: a field name, optionally prefixed with `-` for
/// descending order (`-priority` = priority descending).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey {
    pub field: SortField,
    pub descending: bool,
}

impl SortKey {
    /// Parse `field` or `-field`. Unsupported names fail with
    /// `Error::InvalidQuery`.
    pub fn parse(raw: &str) -> Result<Self> {
        let (descending, name) = match raw.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, raw),
        };
        let field = SortField::from_name(name)
            .ok_or_else(|| Error::InvalidQuery(format!("unsupported sort key: {raw}")))?;
        Ok(Self { field, descending })
    }
}

/// Storage-agnostic persistence capability for todos.
///
/// `get`, `update` and `delete` signal an absent id through their return
/// value (`None` / `false`); mapping that to `Error::NotFound` is the use
/// case's job.
#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// Persist a draft, assigning its id and timestamps.
    async fn add(&self, draft: &NewTodo) -> Result<Todo>;

    /// List todos matching `filter`, ordered by `sort` (insertion order,
    /// i.e. ascending id, when `sort` is `None`).
    async fn list(&self, filter: &TodoFilter, sort: Option<&SortKey>) -> Result<Vec<Todo>>;

    /// Fetch a todo by id.
    async fn get(&self, id: TodoId) -> Result<Option<Todo>>;

    /// Merge a patch into the stored todo. Validation of the merged entity
    /// happens before anything is written.
    async fn update(&self, id: TodoId, patch: &TodoPatch) -> Result<Option<Todo>>;

    /// Hard-delete a todo. Returns `false` if the id was absent.
    async fn delete(&self, id: TodoId) -> Result<bool>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_ascending_key() {
        let key = SortKey::parse("priority").unwrap();
        assert_eq!(key.field, SortField::Priority);
        assert!(!key.descending);
    }

    #[test]
    fn parse_descending_key() {
        let key = SortKey::parse("-priority").unwrap();
        assert_eq!(key.field, SortField::Priority);
        assert!(key.descending);
    }

    #[test]
    fn parse_all_supported_fields() {
        for name in ["id", "title", "priority", "created_at", "updated_at"] {
            assert!(SortKey::parse(name).is_ok(), "{name} should parse");
        }
    }

    #[test]
    fn parse_unsupported_key_is_invalid_query() {
        assert!(matches!(
            SortKey::parse("due_date"),
            Err(Error::InvalidQuery(_))
        ));
        assert!(matches!(SortKey::parse("-"), Err(Error::InvalidQuery(_))));
        assert!(matches!(SortKey::parse(""), Err(Error::InvalidQuery(_))));
    }
}
