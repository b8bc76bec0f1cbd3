//! SQLite implementation of `TodoRepository`.
//!
//! A single `rusqlite::Connection` behind a `Mutex`; the lock is taken per
//! call and never held across an await point. Entity ⇄ row mapping lives
//! here: tags travel as a JSON text column, timestamps as RFC 3339 text.

use std::path::Path;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::domain::repository::{SortKey, TodoFilter, TodoRepository};
use crate::domain::todo::{NewTodo, Todo, TodoId, TodoPatch};
use crate::error::Result;

const TODO_COLUMNS: &str = "id, title, description, is_done, priority, tags, created_at, updated_at";

/// Repository adapter over a SQLite database.
pub struct SqliteTodoRepository {
    conn: Mutex<Connection>,
}

impl SqliteTodoRepository {
    /// Open or create a database at the given path and run migrations.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        conn.execute_batch(
            "
            PRAGMA foreign_keys = ON;
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            ",
        )?;
        super::schema::run_migrations(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute("PRAGMA foreign_keys = ON", [])?;
        super::schema::run_migrations(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

#[async_trait]
impl TodoRepository for SqliteTodoRepository {
    async fn add(&self, draft: &NewTodo) -> Result<Todo> {
        let now = Utc::now();
        let tags_json = serde_json::to_string(&draft.tags)?;

        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO todos (title, description, is_done, priority, tags, created_at, updated_at)
             VALUES (?1, ?2, 0, ?3, ?4, ?5, ?5)",
            params![
                draft.title,
                draft.description,
                draft.priority,
                tags_json,
                now.to_rfc3339(),
            ],
        )?;
        let id = conn.last_insert_rowid();

        tracing::debug!(id, title = %draft.title, "todo created");
        Ok(Todo {
            id,
            title: draft.title.clone(),
            description: draft.description.clone(),
            is_done: false,
            priority: draft.priority,
            tags: draft.tags.clone(),
            created_at: now,
            updated_at: now,
        })
    }

    async fn list(&self, filter: &TodoFilter, sort: Option<&SortKey>) -> Result<Vec<Todo>> {
        let mut sql = format!("SELECT {TODO_COLUMNS} FROM todos");
        if filter.is_done.is_some() {
            sql.push_str(" WHERE is_done = ?1");
        }
        // Secondary id key keeps equal-valued rows in a deterministic order.
        match sort {
            Some(key) => {
                let direction = if key.descending { "DESC" } else { "ASC" };
                sql.push_str(&format!(
                    " ORDER BY {} {direction}, id ASC",
                    key.field.column()
                ));
            }
            None => sql.push_str(" ORDER BY id ASC"),
        }

        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(&sql)?;
        let todos = match filter.is_done {
            Some(done) => stmt
                .query_map(params![done], |row| row_to_todo(row))?
                .collect::<rusqlite::Result<Vec<_>>>()?,
            None => stmt
                .query_map([], |row| row_to_todo(row))?
                .collect::<rusqlite::Result<Vec<_>>>()?,
        };
        Ok(todos)
    }

    async fn get(&self, id: TodoId) -> Result<Option<Todo>> {
        let conn = self.conn.lock().unwrap();
        let todo = conn
            .query_row(
                &format!("SELECT {TODO_COLUMNS} FROM todos WHERE id = ?1"),
                params![id],
                |row| row_to_todo(row),
            )
            .optional()?;
        Ok(todo)
    }

    async fn update(&self, id: TodoId, patch: &TodoPatch) -> Result<Option<Todo>> {
        let mut conn = self.conn.lock().unwrap();
        let tx = conn.transaction()?;

        let current = tx
            .query_row(
                &format!("SELECT {TODO_COLUMNS} FROM todos WHERE id = ?1"),
                params![id],
                |row| row_to_todo(row),
            )
            .optional()?;
        let Some(current) = current else {
            return Ok(None);
        };

        // Validation failure propagates here, before anything is written;
        // the open transaction rolls back on drop.
        let updated = current.apply(patch)?;
        let tags_json = serde_json::to_string(&updated.tags)?;

        tx.execute(
            "UPDATE todos
             SET title = ?1, description = ?2, is_done = ?3, priority = ?4, tags = ?5, updated_at = ?6
             WHERE id = ?7",
            params![
                updated.title,
                updated.description,
                updated.is_done,
                updated.priority,
                tags_json,
                updated.updated_at.to_rfc3339(),
                id,
            ],
        )?;
        tx.commit()?;

        tracing::debug!(id, "todo updated");
        Ok(Some(updated))
    }

    async fn delete(&self, id: TodoId) -> Result<bool> {
        let conn = self.conn.lock().unwrap();
        let deleted = conn.execute("DELETE FROM todos WHERE id = ?1", params![id])?;
        if deleted > 0 {
            tracing::debug!(id, "todo deleted");
        }
        Ok(deleted > 0)
    }
}

fn row_to_todo(row: &Row<'_>) -> rusqlite::Result<Todo> {
    let tags_json: String = row.get(5)?;
    let tags: Vec<String> = serde_json::from_str(&tags_json).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(5, rusqlite::types::Type::Text, Box::new(e))
    })?;
    Ok(Todo {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        is_done: row.get(3)?,
        priority: row.get(4)?,
        tags,
        created_at: parse_timestamp(row, 6)?,
        updated_at: parse_timestamp(row, 7)?,
    })
}

fn parse_timestamp(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let raw: String = row.get(idx)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
        })
}
