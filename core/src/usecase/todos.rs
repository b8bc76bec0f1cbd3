//! Use cases for the todo entity: thin orchestration over the repository
//! contract. Absent ids become `Error::NotFound` here; validation already
//! happened at entity construction.

use std::sync::Arc;

use crate::domain::repository::{SortKey, TodoFilter, TodoRepository};
use crate::domain::todo::{NewTodo, Todo, TodoId, TodoPatch};
use crate::error::{Error, Result};

/// One application operation per method. Holds the repository as a trait
/// object so the HTTP layer never sees a concrete store.
#[derive(Clone)]
pub struct TodoService {
    repo: Arc<dyn TodoRepository>,
}

impl TodoService {
    pub fn new(repo: Arc<dyn TodoRepository>) -> Self {
        Self { repo }
    }

    /// Validate the input and persist a new todo. The returned entity
    /// carries the id assigned by the store and `is_done = false`.
    pub async fn create_todo(&self, draft: NewTodo) -> Result<Todo> {
        self.repo.add(&draft).await
    }

    /// List todos, optionally filtered by completion and sorted by a key.
    pub async fn list_todos(&self, filter: TodoFilter, sort: Option<SortKey>) -> Result<Vec<Todo>> {
        self.repo.list(&filter, sort.as_ref()).await
    }

    pub async fn get_todo(&self, id: TodoId) -> Result<Todo> {
        self.repo.get(id).await?.ok_or(Error::NotFound(id))
    }

    /// Partial update: only supplied fields change.
    pub async fn update_todo(&self, id: TodoId, patch: TodoPatch) -> Result<Todo> {
        self.repo.update(id, &patch).await?.ok_or(Error::NotFound(id))
    }

    pub async fn delete_todo(&self, id: TodoId) -> Result<()> {
        if self.repo.delete(id).await? {
            Ok(())
        } else {
            Err(Error::NotFound(id))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repository::SortField;
    use async_trait::async_trait;
    use chrono::Utc;
    use std::cmp::Ordering;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// In-memory adapter, enough to exercise the use cases without SQLite.
    struct InMemoryTodoRepo {
        todos: Mutex<(HashMap<TodoId, Todo>, TodoId)>,
    }

    impl InMemoryTodoRepo {
        fn new() -> Self {
            Self {
                todos: Mutex::new((HashMap::new(), 0)),
            }
        }
    }

    fn compare(a: &Todo, b: &Todo, field: SortField) -> Ordering {
        match field {
            SortField::Id => a.id.cmp(&b.id),
            SortField::Title => a.title.cmp(&b.title),
            SortField::Priority => a.priority.cmp(&b.priority),
            SortField::CreatedAt => a.created_at.cmp(&b.created_at),
            SortField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
        }
    }

    #[async_trait]
    impl TodoRepository for InMemoryTodoRepo {
        async fn add(&self, draft: &NewTodo) -> Result<Todo> {
            let mut guard = self.todos.lock().unwrap();
            guard.1 += 1;
            let now = Utc::now();
            let todo = Todo {
                id: guard.1,
                title: draft.title.clone(),
                description: draft.description.clone(),
                is_done: false,
                priority: draft.priority,
                tags: draft.tags.clone(),
                created_at: now,
                updated_at: now,
            };
            guard.0.insert(todo.id, todo.clone());
            Ok(todo)
        }

        async fn list(&self, filter: &TodoFilter, sort: Option<&SortKey>) -> Result<Vec<Todo>> {
            let guard = self.todos.lock().unwrap();
            let mut todos: Vec<Todo> = guard
                .0
                .values()
                .filter(|t| filter.is_done.map_or(true, |done| t.is_done == done))
                .cloned()
                .collect();
            match sort {
                Some(key) => todos.sort_by(|a, b| {
                    let ord = compare(a, b, key.field);
                    let ord = if key.descending { ord.reverse() } else { ord };
                    ord.then(a.id.cmp(&b.id))
                }),
                None => todos.sort_by_key(|t| t.id),
            }
            Ok(todos)
        }

        async fn get(&self, id: TodoId) -> Result<Option<Todo>> {
            Ok(self.todos.lock().unwrap().0.get(&id).cloned())
        }

        async fn update(&self, id: TodoId, patch: &TodoPatch) -> Result<Option<Todo>> {
            let mut guard = self.todos.lock().unwrap();
            let Some(current) = guard.0.get(&id) else {
                return Ok(None);
            };
            let updated = current.apply(patch)?;
            guard.0.insert(id, updated.clone());
            Ok(Some(updated))
        }

        async fn delete(&self, id: TodoId) -> Result<bool> {
            Ok(self.todos.lock().unwrap().0.remove(&id).is_some())
        }
    }

    fn service() -> TodoService {
        TodoService::new(Arc::new(InMemoryTodoRepo::new()))
    }

    fn draft(title: &str, priority: i64) -> NewTodo {
        NewTodo::new(title, None, priority, vec![]).unwrap()
    }

    #[tokio::test]
    async fn create_then_get_round_trips() {
        let service = service();
        let created = service.create_todo(draft("Buy milk", 1)).await.unwrap();
        assert!(!created.is_done);
        let fetched = service.get_todo(created.id).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn get_absent_id_is_not_found() {
        assert!(matches!(
            service().get_todo(42).await,
            Err(Error::NotFound(42))
        ));
    }

    #[tokio::test]
    async fn list_partitions_by_is_done() {
        let service = service();
        let a = service.create_todo(draft("a", 0)).await.unwrap();
        let b = service.create_todo(draft("b", 0)).await.unwrap();
        service
            .update_todo(
                b.id,
                TodoPatch {
                    is_done: Some(true),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let open = service
            .list_todos(
                TodoFilter {
                    is_done: Some(false),
                },
                None,
            )
            .await
            .unwrap();
        let done = service
            .list_todos(
                TodoFilter {
                    is_done: Some(true),
                },
                None,
            )
            .await
            .unwrap();
        assert_eq!(open.len(), 1);
        assert_eq!(open[0].id, a.id);
        assert_eq!(done.len(), 1);
        assert_eq!(done[0].id, b.id);
    }

    #[tokio::test]
    async fn list_sorts_descending_by_priority() {
        let service = service();
        service.create_todo(draft("low", 1)).await.unwrap();
        service.create_todo(draft("high", 5)).await.unwrap();
        let sorted = service
            .list_todos(TodoFilter::default(), Some(SortKey::parse("-priority").unwrap()))
            .await
            .unwrap();
        let priorities: Vec<_> = sorted.iter().map(|t| t.priority).collect();
        assert_eq!(priorities, vec![5, 1]);
    }

    #[tokio::test]
    async fn update_absent_id_is_not_found() {
        let result = service()
            .update_todo(
                7,
                TodoPatch {
                    is_done: Some(true),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(result, Err(Error::NotFound(7))));
    }

    #[tokio::test]
    async fn update_rejects_invalid_merge() {
        let service = service();
        let created = service.create_todo(draft("valid", 0)).await.unwrap();
        let result = service
            .update_todo(
                created.id,
                TodoPatch {
                    title: Some(String::new()),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(result, Err(Error::Validation(_))));
        // storage unchanged
        let fetched = service.get_todo(created.id).await.unwrap();
        assert_eq!(fetched.title, "valid");
    }

    #[tokio::test]
    async fn delete_twice_is_not_found() {
        let service = service();
        let created = service.create_todo(draft("gone", 0)).await.unwrap();
        service.delete_todo(created.id).await.unwrap();
        assert!(matches!(
            service.delete_todo(created.id).await,
            Err(Error::NotFound(_))
        ));
        assert!(matches!(
            service.get_todo(created.id).await,
            Err(Error::NotFound(_))
        ));
    }
}
